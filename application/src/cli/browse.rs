//! Interactive browsing of [`Managed`] entities.

use std::{collections::BTreeMap, fmt, future, io, time::Instant};

use common::Debouncer;
use service::{
    controller::{ListController, Notice, Notify as _, UnknownField},
    query, Command, Query,
};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt as _},
    time,
};
use tracing as log;

use crate::{args::parse_pair, config, console::Terminal, Error, Service};

use super::resource::{refresh_room_counts, Managed};

/// Line entered during browsing.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Input {
    /// Criterion of a search field.
    Search {
        /// Name of the search field.
        field: String,

        /// Raw criterion.
        value: String,
    },

    /// Move to the page.
    Page(usize),

    /// Clear the search.
    Reset,

    /// Fetch everything anew.
    Reload,

    /// Delete the entity with the ID.
    Delete(u64),

    /// Stop browsing.
    Quit,
}

impl Input {
    /// Parses the provided `line`.
    ///
    /// Blank lines are [`None`].
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        if line.contains('=') {
            let (field, value) = parse_pair(line)?;
            return Ok(Some(Self::Search { field, value }));
        }

        let mut words = line.split_whitespace();
        let cmd = words.next().unwrap_or_default();
        let arg = words.next();
        Ok(Some(match (cmd, arg) {
            ("page", Some(n)) => Self::Page(
                n.parse().map_err(|_| format!("`{n}` is not a page"))?,
            ),
            ("delete", Some(id)) => Self::Delete(
                id.parse().map_err(|_| format!("`{id}` is not an ID"))?,
            ),
            ("reset", None) => Self::Reset,
            ("reload", None) => Self::Reload,
            ("quit" | "exit", None) => Self::Quit,
            _ => {
                return Err(format!(
                    "Unknown command `{line}`, expected `FIELD=VALUE`, \
                     `page N`, `reset`, `reload`, `delete ID` or `quit`",
                ));
            }
        }))
    }
}

/// Browses `E`ntities reading [`Input`] lines from the provided `input`
/// until it ends or `quit` is entered.
///
/// Search criteria are applied once no new criterion of the same field has
/// been entered for the configured debounce delay. Criteria still pending
/// when the `input` ends are applied right away.
pub(super) async fn run<E, R, W>(
    service: &Service,
    input: R,
    list: &config::List,
    term: &mut Terminal<W>,
) -> Result<(), Error>
where
    E: Managed,
    R: AsyncBufRead + Unpin,
    W: io::Write,
    Service: Command<E::Delete, Ok = (), Err: fmt::Display>
        + Query<query::List<E>, Ok = Vec<E>, Err: fmt::Display>,
{
    let mut ctrl = ListController::<E>::new(list.page_size);
    let mut pending = BTreeMap::<String, Debouncer<String>>::new();
    let mut lines = input.lines();

    refresh_room_counts::<E, _>(service, term).await;
    ctrl.reload(service, term).await;
    flush(term)?;

    loop {
        let deadline = pending.values().filter_map(Debouncer::deadline).min();

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.map_err(|e| Error::internal(&e))? else {
                    break;
                };
                match Input::parse(&line) {
                    Ok(None) => continue,
                    Ok(Some(Input::Quit)) => return Ok(()),
                    Ok(Some(Input::Search { field, value })) => {
                        if E::criterion(&field).is_some() {
                            pending
                                .entry(field)
                                .or_insert_with(|| {
                                    Debouncer::new(list.debounce)
                                })
                                .push(Instant::now(), value);
                        } else {
                            term.notify(Notice::error(
                                UnknownField(field).to_string(),
                            ));
                        }
                    }
                    Ok(Some(Input::Page(n))) => {
                        if !ctrl.on_page_change(n, term) {
                            term.notify(Notice::error(format!(
                                "Page {n} doesn't exist",
                            )));
                        }
                    }
                    Ok(Some(Input::Reset)) => {
                        pending.clear();
                        ctrl.on_reset(term);
                    }
                    Ok(Some(Input::Reload)) => {
                        refresh_room_counts::<E, _>(service, term).await;
                        ctrl.reload(service, term).await;
                    }
                    Ok(Some(Input::Delete(id))) => {
                        refresh_room_counts::<E, _>(service, term).await;
                        ctrl.delete(service, term, E::delete(id.into())).await;
                    }
                    Err(e) => term.notify(Notice::error(e)),
                }
            }
            () = sleep_until(deadline) => {
                let now = Instant::now();
                for (field, debouncer) in &mut pending {
                    if let Some(value) = debouncer.poll(now) {
                        search(&mut ctrl, field, &value, term);
                    }
                }
            }
        }

        flush(term)?;
    }

    log::debug!("input ended, applying pending search criteria");
    for (field, mut debouncer) in pending {
        if let Some(value) = debouncer.flush() {
            search(&mut ctrl, &field, &value, term);
        }
    }
    flush(term)
}

/// Applies the search criterion of the `field`.
fn search<E: Managed, W: io::Write>(
    ctrl: &mut ListController<E>,
    field: &str,
    value: &str,
    term: &mut Terminal<W>,
) {
    if let Err(e) = ctrl.on_search_input(field, value, term) {
        term.notify(Notice::error(e.to_string()));
    }
}

/// Waits until the provided `deadline`, or forever if there is none.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => time::sleep_until(time::Instant::from_std(at)).await,
        None => future::pending().await,
    }
}

/// Writes the [`Terminal`] contents.
fn flush<W: io::Write>(term: &mut Terminal<W>) -> Result<(), Error> {
    term.flush().map_err(|e| Error::internal(&e))
}

#[cfg(test)]
mod spec {
    use common::Handler as _;
    use service::{
        command::{CreateApartment, CreateRoom},
        domain::Apartment,
    };
    use tempfile::TempDir;

    use crate::{cli::test, config, Terminal};

    use super::{run, Input};

    #[test]
    fn parses_input() {
        assert_eq!(Input::parse("  "), Ok(None));
        assert_eq!(
            Input::parse("name=Sun Plaza"),
            Ok(Some(Input::Search {
                field: "name".into(),
                value: "Sun Plaza".into(),
            })),
        );
        assert_eq!(Input::parse("page 3"), Ok(Some(Input::Page(3))));
        assert_eq!(Input::parse("delete 7"), Ok(Some(Input::Delete(7))));
        assert_eq!(Input::parse("reset"), Ok(Some(Input::Reset)));
        assert_eq!(Input::parse("reload"), Ok(Some(Input::Reload)));
        assert_eq!(Input::parse("quit"), Ok(Some(Input::Quit)));
        assert!(Input::parse("page x").is_err());
        assert!(Input::parse("jump").is_err());
        assert!(Input::parse("=Sun").is_err());
    }

    async fn browse(dir: &TempDir, input: &str) -> String {
        let service = test::service(dir);
        let sun = service
            .execute(CreateApartment {
                details: test::apartment("Sun"),
            })
            .await
            .unwrap();
        drop(
            service
                .execute(CreateApartment {
                    details: test::apartment("Lake"),
                })
                .await
                .unwrap(),
        );
        drop(
            service
                .execute(CreateRoom {
                    details: test::room(sun.id.into(), "A-1"),
                })
                .await
                .unwrap(),
        );

        let mut term = Terminal::new(Vec::<u8>::new());
        run::<Apartment, _, _>(
            &service,
            input.as_bytes(),
            &config::List::default(),
            &mut term,
        )
        .await
        .unwrap();
        String::from_utf8(term.into_inner()).unwrap()
    }

    /// Returns the last rendered listing in the `out`put.
    fn last_listing(out: &str) -> &str {
        out.rsplit("ID  NAME").next().unwrap()
    }

    #[tokio::test]
    async fn applies_pending_search_once_input_ends() {
        let dir = tempfile::tempdir().unwrap();

        let out = browse(&dir, "name=La\nname=Sun\n").await;

        let last = last_listing(&out);
        assert!(last.contains("Sun"));
        assert!(!last.contains("Lake"));
        assert!(last.contains("Showing 1-1 of 1"));
    }

    #[tokio::test]
    async fn reports_bad_input_and_keeps_browsing() {
        let dir = tempfile::tempdir().unwrap();

        let out = browse(&dir, "color=red\npage 5\njump\nreload\n").await;

        assert!(out.contains("[error] Unknown field `color`"));
        assert!(out.contains("[error] Page 5 doesn't exist"));
        assert!(out.contains("[error] Unknown command `jump`"));
        assert!(last_listing(&out).contains("Lake"));
    }

    #[tokio::test]
    async fn deletes_and_reloads() {
        let dir = tempfile::tempdir().unwrap();

        let out = browse(&dir, "delete 1\ndelete 2\nquit\nreload\n").await;

        assert!(out.contains("[error] Failed to delete"));
        assert!(out.contains("[success] Deleted successfully"));
        let last = last_listing(&out);
        assert!(last.contains("Sun"));
        assert!(!last.contains("Lake"));
    }

    #[tokio::test]
    async fn discards_pending_search_on_quit() {
        let dir = tempfile::tempdir().unwrap();

        let out = browse(&dir, "name=Sun\nquit\n").await;

        assert!(last_listing(&out).contains("Lake"));
    }
}
