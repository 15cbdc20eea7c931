//! Execution of the console [`Command`]s.

mod browse;
mod media;
mod resource;

use std::io;

use service::{
    controller::Level,
    domain::{Apartment, Room},
    query, Query as _,
};

use crate::{
    args::Command, config, console, define_error, AsError as _, Error,
    Service, Terminal,
};

pub use self::resource::Managed;

define_error! {
    enum CliError {
        #[code = "NOT_FOUND"]
        #[message = "Entry not found"]
        NotFound,

        #[code = "OPERATION_FAILED"]
        #[message = "Operation failed"]
        Failed,
    }
}

/// Executes the provided [`Command`], writing its outcome into the
/// [`Terminal`].
///
/// # Errors
///
/// If the [`Command`] fails.
pub async fn run<W: io::Write>(
    service: &Service,
    command: Command,
    list: &config::List,
    term: &mut Terminal<W>,
) -> Result<(), Error> {
    let res = match command {
        Command::Apartments(op) => {
            resource::run::<Apartment, _>(service, op, list, term).await
        }
        Command::Rooms(op) => {
            resource::run::<Room, _>(service, op, list, term).await
        }
        Command::Dashboard => dashboard(service, term).await,
        Command::Upload(op) => media::run(service, op, term).await,
    };
    settle(term, res)
}

/// Shows the dashboard statistics.
async fn dashboard<W: io::Write>(
    service: &Service,
    term: &mut Terminal<W>,
) -> Result<(), Error> {
    let stats = service
        .execute(query::Dashboard)
        .await
        .map_err(|e| e.into_error())?;
    term.show(console::dashboard(&stats));
    Ok(())
}

/// Writes everything collected in the [`Terminal`] and checks whether any
/// failure was reported there.
fn settle<W: io::Write>(
    term: &mut Terminal<W>,
    res: Result<(), Error>,
) -> Result<(), Error> {
    let failed = term.notices().iter().any(|n| n.level == Level::Error);
    term.flush().map_err(|e| Error::internal(&e))?;
    res?;
    if failed {
        return Err(CliError::Failed.into());
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test {
    //! Shared helpers of console tests.

    use service::{
        domain::{apartment, room},
        infra::{gateway::local::FileStorage, Backend, Local},
    };
    use tempfile::TempDir;

    use crate::Service;

    /// Creates a [`Service`] over a [`Local`] gateway in the provided
    /// directory.
    pub(crate) fn service(dir: &TempDir) -> Service {
        Service::new(
            service::Config::default(),
            Backend::Local(Local::new(FileStorage::new(dir.path()))),
        )
    }

    pub(crate) fn apartment(name: &str) -> apartment::Details {
        serde_json::from_value(serde_json::json!({
            "district": "Central",
            "name": name,
            "address": "1 Some Street",
        }))
        .unwrap()
    }

    pub(crate) fn room(apartment_id: u64, number: &str) -> room::Details {
        serde_json::from_value(serde_json::json!({
            "apartmentId": apartment_id,
            "roomNumber": number,
            "floor": 2,
            "area": 30,
            "rent": 3000,
        }))
        .unwrap()
    }
}

#[cfg(test)]
mod spec {
    use service::command::{CreateApartment, CreateRoom};

    use common::Handler as _;

    use crate::{args::Command, config, Terminal};

    use super::{run, test};

    #[tokio::test]
    async fn shows_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let service = test::service(&dir);
        let sun = service
            .execute(CreateApartment {
                details: test::apartment("Sun"),
            })
            .await
            .unwrap();
        drop(
            service
                .execute(CreateRoom {
                    details: test::room(sun.id.into(), "A-1"),
                })
                .await
                .unwrap(),
        );
        let mut term = Terminal::new(Vec::<u8>::new());

        run(&service, Command::Dashboard, &config::List::default(), &mut term)
            .await
            .unwrap();

        let out = String::from_utf8(term.into_inner()).unwrap();
        assert!(out.contains("Apartments:      1"));
        assert!(out.contains("Available rooms: 1"));
        assert!(out.contains("Average rent:    ¥3000.00"));
    }
}
