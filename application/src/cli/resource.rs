//! Operations upon [`Managed`] entities.

use std::{fmt, io};

use service::{
    command::{DeleteApartment, DeleteRoom},
    controller::{Editable, FormController, ListController, Notice, Notify as _},
    domain::{Apartment, Entity as _, Room},
    form::FormInput,
    infra::gateway,
    query,
    search::Searchable,
    Command, Query,
};
use tokio::io::BufReader;
use tracerr::Traced;
use tracing as log;

use crate::{
    args, config,
    console::{Row, Terminal},
    AsError, Error, Service,
};

use super::{browse, CliError};

/// Entity managed through the console.
pub trait Managed: Editable + Searchable + Row {
    /// [`Command`] deleting this entity.
    type Delete;

    /// Indicator whether listings of this entity show [`Room`] counts.
    const WITH_ROOM_COUNTS: bool;

    /// Creates a new [`Managed::Delete`] [`Command`] of the entity with the
    /// provided `id`.
    fn delete(id: Self::Id) -> Self::Delete;
}

impl Managed for Apartment {
    type Delete = DeleteApartment;

    const WITH_ROOM_COUNTS: bool = true;

    fn delete(id: Self::Id) -> DeleteApartment {
        DeleteApartment { id }
    }
}

impl Managed for Room {
    type Delete = DeleteRoom;

    const WITH_ROOM_COUNTS: bool = false;

    fn delete(id: Self::Id) -> DeleteRoom {
        DeleteRoom { id }
    }
}

/// Executes the provided [`args::Resource`] operation upon `E`ntities.
pub(super) async fn run<E, W>(
    service: &Service,
    op: args::Resource,
    list: &config::List,
    term: &mut Terminal<W>,
) -> Result<(), Error>
where
    E: Managed,
    W: io::Write,
    Service: Command<E::Create, Ok = E, Err: AsError + fmt::Display>
        + Command<E::Update, Ok = E, Err: AsError + fmt::Display>
        + Command<E::Delete, Ok = (), Err: fmt::Display>
        + Query<query::List<E>, Ok = Vec<E>, Err: fmt::Display>
        + Query<
            query::ById<E>,
            Ok = Option<E>,
            Err = Traced<gateway::Error>,
        >,
{
    use args::Resource as R;

    match op {
        R::List { filters, page } => {
            let mut ctrl = ListController::<E>::new(list.page_size);
            refresh_room_counts::<E, _>(service, term).await;
            ctrl.reload(service, term).await;
            for (field, value) in filters {
                ctrl.on_search_input(&field, &value, term)
                    .map_err(AsError::into_error)?;
            }
            if page != 1 && !ctrl.on_page_change(page, term) {
                term.notify(Notice::error(format!(
                    "Page {page} doesn't exist",
                )));
            }
            Ok(())
        }
        R::Show { id } => {
            let entity = <Service as Query<query::ById<E>>>::execute(
                service,
                query::ById::<E>::by(id.into()),
            )
            .await
            .map_err(AsError::into_error)?
            .ok_or(CliError::NotFound)?;
            term.show(
                serde_json::to_string_pretty(&entity)
                    .map_err(|e| Error::internal(&e))?,
            );
            Ok(())
        }
        R::Create { fields } => {
            let input = fields.into_iter().collect::<FormInput>();
            submit(service, FormController::<E>::new(), &input, term).await
        }
        R::Update { id, fields } => {
            let mut form = FormController::<E>::new();
            let mut input = form
                .load(service, id.into(), term)
                .await
                .map_err(AsError::into_error)?;
            input.merge(fields.into_iter().collect());
            submit(service, form, &input, term).await
        }
        R::Delete { id } => {
            let mut ctrl = ListController::<E>::new(list.page_size);
            refresh_room_counts::<E, _>(service, term).await;
            ctrl.delete(service, term, E::delete(id.into())).await;
            Ok(())
        }
        R::Browse => {
            browse::run::<E, _, _>(
                service,
                BufReader::new(tokio::io::stdin()),
                list,
                term,
            )
            .await
        }
    }
}

/// Submits the `input` through the provided [`FormController`] and shows the
/// saved entity once the form is left.
async fn submit<E, W>(
    service: &Service,
    mut form: FormController<E>,
    input: &FormInput,
    term: &mut Terminal<W>,
) -> Result<(), Error>
where
    E: Managed,
    W: io::Write,
    Service: Command<E::Create, Ok = E, Err: AsError + fmt::Display>
        + Command<E::Update, Ok = E, Err: AsError + fmt::Display>,
{
    let saved = form
        .on_submit(service, input, term)
        .await
        .map_err(AsError::into_error)?;
    if term.has_left() {
        term.show(format!("{} #{}", E::COLLECTION, saved.id()));
    }
    Ok(())
}

/// Fetches [`Room`] counts shown along with `E`ntities, if they need any.
///
/// Failing to fetch them only logs a warning.
pub(super) async fn refresh_room_counts<E: Managed, W: io::Write>(
    service: &Service,
    term: &mut Terminal<W>,
) {
    if !E::WITH_ROOM_COUNTS {
        return;
    }
    match service.execute(query::RoomCounts).await {
        Ok(counts) => term.set_room_counts(counts),
        Err(e) => log::warn!("failed to count rooms: {e}"),
    }
}
