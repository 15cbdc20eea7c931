//! [`ListController`] definitions.

use std::fmt;

use common::pagination::{paginate, DisplayRange, PageState, Window};
use tracing as log;

use crate::{
    domain::Entity,
    query,
    search::{self, SearchParams, Searchable},
    Command, Query, Service,
};

use super::{Notice, Notify, Sequence, Token, UnknownField};

/// Number of page buttons shown on each side of the current page.
const WINDOW_RADIUS: usize = 2;

/// View rendering [`Listing`]s of a [`ListController`].
pub trait ListView<E>: Notify {
    /// Renders the provided [`Listing`], replacing the previous one.
    fn render(&mut self, listing: &Listing<'_, E>);
}

/// Currently visible page of a [`ListController`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Listing<'a, E> {
    /// Entities on the current page.
    pub items: &'a [E],

    /// [`DisplayRange`] of the current page.
    pub range: DisplayRange,

    /// Current 1-based page.
    pub current_page: usize,

    /// Total number of pages.
    pub total_pages: usize,

    /// Page buttons of the pagination bar.
    pub window: Window,
}

/// State machine of a list screen: search, pagination and reloads.
#[derive(Clone, Debug)]
pub struct ListController<E> {
    /// Entities as last fetched from the gateway.
    source: Vec<E>,

    /// [`source`] entities matching the current [`SearchParams`].
    ///
    /// [`source`]: ListController::source
    filtered: Vec<E>,

    /// Current [`SearchParams`].
    search: SearchParams,

    /// Current [`PageState`].
    page: PageState,

    /// Issuer of reload [`Token`]s.
    requests: Sequence,
}

impl<E: Entity + Searchable> ListController<E> {
    /// Creates a new empty [`ListController`] showing `page_size` entities
    /// per page.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            source: Vec::new(),
            filtered: Vec::new(),
            search: SearchParams::new(),
            page: PageState::new(page_size),
            requests: Sequence::default(),
        }
    }

    /// Returns the current [`SearchParams`].
    #[must_use]
    pub fn search(&self) -> &SearchParams {
        &self.search
    }

    /// Returns the current [`PageState`].
    #[must_use]
    pub fn page(&self) -> &PageState {
        &self.page
    }

    /// Returns all the entities matching the current [`SearchParams`].
    #[must_use]
    pub fn filtered(&self) -> &[E] {
        &self.filtered
    }

    /// Returns the currently visible [`Listing`].
    #[must_use]
    pub fn listing(&self) -> Listing<'_, E> {
        let page =
            paginate(&self.filtered, self.page.current(), self.page.size());
        Listing {
            items: page.items,
            range: page.range,
            current_page: self.page.current(),
            total_pages: page.total_pages,
            window: self.page.window(WINDOW_RADIUS),
        }
    }

    /// Sets the criterion of the provided search `field` and shows the first
    /// page of the matching entities.
    ///
    /// # Errors
    ///
    /// If the `field` isn't a search field of `E`.
    pub fn on_search_input(
        &mut self,
        field: &str,
        value: &str,
        view: &mut impl ListView<E>,
    ) -> Result<(), UnknownField> {
        if E::criterion(field).is_none() {
            return Err(UnknownField(field.to_owned()));
        }

        self.search.set(field, value);
        self.page.reset();
        self.recompute(view);
        Ok(())
    }

    /// Moves to the `target` page, if it exists.
    ///
    /// Returns whether the move was accepted.
    pub fn on_page_change(
        &mut self,
        target: usize,
        view: &mut impl ListView<E>,
    ) -> bool {
        if !self.page.go_to(target) {
            log::debug!(
                "page {target} is out of `1..={}`",
                self.page.total_pages(),
            );
            return false;
        }

        view.render(&self.listing());
        true
    }

    /// Clears the [`SearchParams`] and shows the first page.
    pub fn on_reset(&mut self, view: &mut impl ListView<E>) {
        self.search.clear();
        self.page.reset();
        self.recompute(view);
    }

    /// Re-filters the fetched entities, clamps the current page and renders
    /// the resulting [`Listing`].
    pub fn recompute(&mut self, view: &mut impl ListView<E>) {
        self.filtered = search::filter(&self.source, &self.search);
        self.page.set_total_items(self.filtered.len());
        view.render(&self.listing());
    }

    /// Starts a reload, outdating every reload started before.
    ///
    /// The returned [`Token`] is to be passed to [`finish_reload()`].
    ///
    /// [`finish_reload()`]: ListController::finish_reload
    pub fn begin_reload(&mut self, view: &mut impl ListView<E>) -> Token {
        view.set_loading(true);
        self.requests.issue()
    }

    /// Applies the `result` of the reload started with the provided
    /// [`Token`].
    ///
    /// Results of outdated reloads are discarded. Returns whether the
    /// `result` was applied.
    pub fn finish_reload<Er: fmt::Display>(
        &mut self,
        token: Token,
        result: Result<Vec<E>, Er>,
        view: &mut impl ListView<E>,
    ) -> bool {
        if !self.requests.is_latest(token) {
            log::debug!("discarding stale `{}` list response", E::COLLECTION);
            return false;
        }

        view.set_loading(false);
        match result {
            Ok(entities) => {
                log::debug!(
                    "loaded {} `{}` entries",
                    entities.len(),
                    E::COLLECTION,
                );
                self.source = entities;
                self.recompute(view);
            }
            Err(e) => {
                view.notify(Notice::error(format!("Failed to load data: {e}")));
            }
        }
        true
    }

    /// Fetches all the entities anew and renders them.
    #[tracing::instrument(skip_all, fields(collection = E::COLLECTION))]
    pub async fn reload<Gw>(
        &mut self,
        service: &Service<Gw>,
        view: &mut impl ListView<E>,
    ) where
        Service<Gw>: Query<query::List<E>, Ok = Vec<E>, Err: fmt::Display>,
    {
        let token = self.begin_reload(view);
        let result = service.execute(query::List::<E>::by(())).await;
        _ = self.finish_reload(token, result, view);
    }

    /// Executes the provided deletion [`Command`], notifies about its
    /// outcome and reloads all the entities.
    #[tracing::instrument(skip_all, fields(collection = E::COLLECTION))]
    pub async fn delete<Gw, C>(
        &mut self,
        service: &Service<Gw>,
        view: &mut impl ListView<E>,
        cmd: C,
    ) where
        Service<Gw>: Command<C, Ok = (), Err: fmt::Display>
            + Query<query::List<E>, Ok = Vec<E>, Err: fmt::Display>,
    {
        view.set_loading(true);
        let result = <Service<Gw> as Command<C>>::execute(service, cmd).await;
        view.set_loading(false);

        match result {
            Ok(()) => view.notify(Notice::success("Deleted successfully")),
            Err(e) => {
                log::error!("failed to delete `{}` entry: {e}", E::COLLECTION);
                view.notify(Notice::error(format!("Failed to delete: {e}")));
            }
        }

        self.reload(service, view).await;
    }
}
