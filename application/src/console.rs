//! [`Terminal`] view of the console.

use std::{collections::HashMap, io};

use itertools::Itertools as _;
use service::{
    controller::{FormView, ListView, Listing, Notice, Notify},
    domain::{apartment, Apartment, Room},
    form::ValidationResult,
    read::Statistics,
};
use tracing as log;

/// Numbers of [`Room`]s per [`Apartment`].
pub type RoomCounts = HashMap<apartment::Id, usize>;

/// Entity rendered as a table row.
pub trait Row {
    /// Headers of the table columns.
    const HEADERS: &'static [&'static str];

    /// Returns the cells of this row.
    fn cells(&self, counts: &RoomCounts) -> Vec<String>;
}

impl Row for Apartment {
    const HEADERS: &'static [&'static str] =
        &["ID", "NAME", "DISTRICT", "ADDRESS", "RENT", "ROOMS", "STATUS"];

    fn cells(&self, counts: &RoomCounts) -> Vec<String> {
        let d = &self.details;
        let rent = match (d.rent_min, d.rent_max) {
            (Some(min), Some(max)) => format!("{min} - {max}"),
            (Some(min), None) => format!("from {min}"),
            (None, Some(max)) => format!("up to {max}"),
            (None, None) => "-".to_owned(),
        };
        vec![
            self.id.to_string(),
            d.name.to_string(),
            d.district.clone(),
            d.address.to_string(),
            rent,
            counts.get(&self.id).copied().unwrap_or(0).to_string(),
            d.status.to_string(),
        ]
    }
}

impl Row for Room {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "APARTMENT",
        "NUMBER",
        "FLOOR",
        "AREA",
        "RENT",
        "STATUS",
    ];

    fn cells(&self, _: &RoomCounts) -> Vec<String> {
        let d = &self.details;
        vec![
            self.id.to_string(),
            d.apartment_id.to_string(),
            d.room_number.to_string(),
            d.floor.to_string(),
            format!("{} m²", d.area),
            d.rent.to_string(),
            d.status.to_string(),
        ]
    }
}

/// Text view writing into an [`io::Write`]r.
///
/// Rendered frames are buffered and replace each other, so only the latest
/// one is written on [`Terminal::flush()`], followed by the collected
/// [`Notice`]s and field marks.
#[derive(Debug)]
pub struct Terminal<W> {
    /// Output to write into.
    out: W,

    /// Latest rendered frame.
    frame: Option<String>,

    /// [`Notice`]s collected since the last flush.
    notices: Vec<Notice>,

    /// Messages of the invalid form fields.
    marks: Vec<(&'static str, String)>,

    /// [`RoomCounts`] shown along with [`Apartment`]s.
    counts: RoomCounts,

    /// Indicator whether a form was left after saving.
    left: bool,
}

impl<W: io::Write> Terminal<W> {
    /// Creates a new [`Terminal`] writing into the provided output.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            frame: None,
            notices: Vec::new(),
            marks: Vec::new(),
            counts: RoomCounts::new(),
            left: false,
        }
    }

    /// Sets the [`RoomCounts`] to render [`Apartment`]s with.
    pub fn set_room_counts(&mut self, counts: RoomCounts) {
        self.counts = counts;
    }

    /// Indicates whether a form was left after saving.
    #[must_use]
    pub fn has_left(&self) -> bool {
        self.left
    }

    /// Returns the latest rendered frame, if any.
    #[must_use]
    pub fn frame(&self) -> Option<&str> {
        self.frame.as_deref()
    }

    /// Returns the [`Notice`]s collected since the last flush.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Replaces the current frame with the provided text.
    pub fn show(&mut self, text: impl Into<String>) {
        self.frame = Some(text.into());
    }

    /// Writes the latest frame along with the collected [`Notice`]s and
    /// field marks, clearing them.
    ///
    /// # Errors
    ///
    /// If writing into the output fails.
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(frame) = self.frame.take() {
            writeln!(self.out, "{frame}")?;
        }
        for (field, message) in self.marks.drain(..) {
            writeln!(self.out, "  {field}: {message}")?;
        }
        for notice in self.notices.drain(..) {
            writeln!(self.out, "{notice}")?;
        }
        self.out.flush()
    }

    /// Consumes this [`Terminal`] returning its output.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W> Notify for Terminal<W> {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn set_loading(&mut self, loading: bool) {
        log::debug!(loading, "loading state changed");
    }
}

impl<W: io::Write, E: Row> ListView<E> for Terminal<W> {
    fn render(&mut self, listing: &Listing<'_, E>) {
        self.frame = Some(format!(
            "{}\n{}",
            table(
                E::HEADERS,
                listing.items.iter().map(|e| e.cells(&self.counts)),
            ),
            footer(listing),
        ));
    }
}

impl<W: io::Write> FormView for Terminal<W> {
    fn mark_field(&mut self, field: &'static str, result: &ValidationResult) {
        self.marks.retain(|(f, _)| *f != field);
        if let Some(message) = result.message() {
            self.marks.push((field, message.to_owned()));
        }
    }

    fn navigate_away(&mut self) {
        self.left = true;
    }
}

/// Formats a table with the provided `headers` and `rows`, aligning the
/// columns.
fn table(
    headers: &[&str],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> String {
    let rows = rows.into_iter().collect::<Vec<_>>();
    let widths = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain([h.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    let mut out = line(headers.iter().copied(), &widths);
    if rows.is_empty() {
        out.push_str("\n(no entries)");
    }
    for row in &rows {
        out.push('\n');
        out.push_str(&line(row.iter().map(String::as_str), &widths));
    }
    out
}

/// Formats a single table line, padding the `cells` to the `widths`.
fn line<'c>(cells: impl Iterator<Item = &'c str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(c, w)| format!("{c:<w$}"))
        .join("  ")
        .trim_end()
        .to_owned()
}

/// Formats the display range and the pagination bar of a [`Listing`].
fn footer<E>(listing: &Listing<'_, E>) -> String {
    let range = listing.range;
    let window = &listing.window;
    let pages = window
        .pages
        .clone()
        .map(|p| {
            if p == listing.current_page {
                format!("[{p}]")
            } else {
                p.to_string()
            }
        })
        .join(" ");
    let bar = [
        window.has_previous.then(|| "<".to_owned()),
        (!pages.is_empty()).then_some(pages),
        window.has_next.then(|| ">".to_owned()),
    ]
    .into_iter()
    .flatten()
    .join(" ");

    format!(
        "Showing {}-{} of {} | page {}/{} {bar}",
        range.start,
        range.end,
        range.total,
        listing.current_page,
        listing.total_pages,
    )
    .trim_end()
    .to_owned()
}

/// Formats the dashboard [`Statistics`].
#[must_use]
pub fn dashboard(stats: &Statistics) -> String {
    let Statistics {
        apartments,
        rooms,
        available_rooms,
        average_rent,
    } = stats;

    format!(
        "Apartments:      {apartments}\n\
         Rooms:           {rooms}\n\
         Available rooms: {available_rooms}\n\
         Average rent:    {average_rent}",
    )
}

#[cfg(test)]
mod spec {
    use common::{pagination::paginate, pagination::PageState, Money};
    use service::{
        controller::{FormView as _, ListView as _, Listing, Notice, Notify},
        domain::{apartment, Apartment},
        form::ValidationResult,
        read::Statistics,
    };

    use super::{dashboard, RoomCounts, Terminal};

    fn apartment(id: u64, name: &str) -> Apartment {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "district": "Central",
            "address": "1 Some Street",
            "rentMin": 1000,
            "rentMax": 2000,
        }))
        .unwrap()
    }

    fn listing(items: &[Apartment], page: usize) -> Listing<'_, Apartment> {
        let mut state = PageState::new(2);
        state.set_total_items(items.len());
        _ = state.go_to(page);
        let slice = paginate(items, state.current(), state.size());
        Listing {
            items: slice.items,
            range: slice.range,
            current_page: state.current(),
            total_pages: slice.total_pages,
            window: state.window(2),
        }
    }

    #[test]
    fn renders_table_with_room_counts() {
        let items = [apartment(1, "Sun"), apartment(2, "Lake")];
        let mut term = Terminal::new(Vec::<u8>::new());
        term.set_room_counts(RoomCounts::from([(apartment::Id::from(1), 3)]));

        term.render(&listing(&items, 1));
        let frame = term.frame().unwrap();

        let lines = frame.lines().collect::<Vec<_>>();
        assert!(lines[0].starts_with("ID  NAME"));
        assert!(lines[1].contains("Sun"));
        assert!(lines[1].contains("¥1000.00 - ¥2000.00"));
        assert!(lines[1].contains(" 3 "));
        assert!(lines[2].contains("Lake"));
        assert!(lines[2].contains(" 0 "));
        assert_eq!(lines[3], "Showing 1-2 of 2 | page 1/1 [1]");
    }

    #[test]
    fn renders_pagination_bar() {
        let items = (1..=7)
            .map(|id| apartment(id, &format!("Apartment {id}")))
            .collect::<Vec<_>>();
        let mut term = Terminal::new(Vec::<u8>::new());

        term.render(&listing(&items, 2));

        let frame = term.frame().unwrap();
        assert!(frame.ends_with("Showing 3-4 of 7 | page 2/4 < 1 [2] 3 4 >"));
    }

    #[test]
    fn renders_empty_listing() {
        let mut term = Terminal::new(Vec::<u8>::new());

        term.render(&listing(&[], 1));

        let frame = term.frame().unwrap();
        assert!(frame.contains("(no entries)"));
        assert!(frame.ends_with("Showing 0-0 of 0 | page 1/0"));
    }

    #[test]
    fn flushes_only_latest_frame() {
        let items = [apartment(1, "Sun"), apartment(2, "Lake")];
        let mut term = Terminal::new(Vec::<u8>::new());
        term.show("first");
        term.render(&listing(&items, 1));
        term.notify(Notice::success("Deleted successfully"));

        term.flush().unwrap();
        term.flush().unwrap();

        let out = String::from_utf8(term.into_inner()).unwrap();
        assert!(!out.contains("first"));
        assert_eq!(out.matches("Sun").count(), 1);
        assert!(out.ends_with("[success] Deleted successfully\n"));
    }

    #[test]
    fn replaces_field_marks() {
        let mut term = Terminal::new(Vec::<u8>::new());
        term.mark_field("name", &ValidationResult::Invalid("Too short".into()));
        term.mark_field("name", &ValidationResult::Valid);
        term.mark_field("address", &ValidationResult::Invalid("Empty".into()));

        term.flush().unwrap();

        let out = String::from_utf8(term.into_inner()).unwrap();
        assert_eq!(out, "  address: Empty\n");
    }

    #[test]
    fn leaves_form_once_navigated_away() {
        let mut term = Terminal::new(Vec::<u8>::new());
        assert!(!term.has_left());

        term.navigate_away();

        assert!(term.has_left());
    }

    #[test]
    fn formats_dashboard() {
        let stats = Statistics {
            apartments: 2,
            rooms: 5,
            available_rooms: 3,
            average_rent: Money::ZERO,
        };

        let text = dashboard(&stats);

        assert!(text.contains("Apartments:      2"));
        assert!(text.ends_with("Average rent:    ¥0.00"));
    }
}
