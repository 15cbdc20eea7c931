//! [`FormController`] definitions.

use std::{collections::BTreeMap, fmt};

use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    command::{CreateApartment, CreateRoom, UpdateApartment, UpdateRoom},
    domain::{apartment, room, Apartment, Entity, Room},
    form::{
        validate, validate_all, FormInput, Payload, Schema, ValidationResult,
        Violations,
    },
    infra::gateway,
    query, Command, Query, Service,
};

use super::{Notice, Notify, UnknownField};

/// View of a form driven by a [`FormController`].
pub trait FormView: Notify {
    /// Marks the provided field with its [`ValidationResult`], replacing any
    /// previous mark.
    fn mark_field(&mut self, field: &'static str, result: &ValidationResult);

    /// Leaves the form once it has been saved.
    fn navigate_away(&mut self);
}

/// [`Schema`] whose drafts are saved with [`Command`]s.
pub trait Editable: Schema {
    /// [`Command`] creating a new [`Entity`].
    type Create;

    /// [`Command`] updating an existing [`Entity`].
    type Update;

    /// Creates a new [`Editable::Create`] [`Command`] out of the `draft`.
    fn create(draft: Self::Draft) -> Self::Create;

    /// Creates a new [`Editable::Update`] [`Command`] of the [`Entity`] with
    /// the provided `id`.
    fn update(id: Self::Id, draft: Self::Draft) -> Self::Update;
}

impl Editable for Apartment {
    type Create = CreateApartment;
    type Update = UpdateApartment;

    fn create(details: apartment::Details) -> CreateApartment {
        CreateApartment { details }
    }

    fn update(
        id: apartment::Id,
        details: apartment::Details,
    ) -> UpdateApartment {
        UpdateApartment { id, details }
    }
}

impl Editable for Room {
    type Create = CreateRoom;
    type Update = UpdateRoom;

    fn create(details: room::Details) -> CreateRoom {
        CreateRoom { details }
    }

    fn update(id: room::Id, details: room::Details) -> UpdateRoom {
        UpdateRoom { id, details }
    }
}

/// Mode of a [`FormController`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode<Id> {
    /// Form creates a new entity.
    Create,

    /// Form edits the existing entity with the provided ID.
    Edit(Id),
}

/// State machine of a create/edit form.
#[derive(Clone, Debug)]
pub struct FormController<E: Entity> {
    /// Current [`Mode`].
    mode: Mode<E::Id>,

    /// Entity being edited, as loaded.
    original: Option<E>,

    /// [`ValidationResult`]s of the validated fields.
    fields: BTreeMap<&'static str, ValidationResult>,
}

impl<E: Entity> Default for FormController<E> {
    fn default() -> Self {
        Self {
            mode: Mode::Create,
            original: None,
            fields: BTreeMap::new(),
        }
    }
}

impl<E: Editable> FormController<E> {
    /// Creates a new [`FormController`] in the [`Mode::Create`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current [`Mode`].
    #[must_use]
    pub fn mode(&self) -> Mode<E::Id> {
        self.mode
    }

    /// Returns the loaded entity, if any.
    #[must_use]
    pub fn original(&self) -> Option<&E> {
        self.original.as_ref()
    }

    /// Returns the [`ValidationResult`] of the provided field, if it was
    /// validated.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ValidationResult> {
        self.fields.get(name)
    }

    /// Indicates whether every validated field is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(ValidationResult::is_valid)
    }

    /// Loads the entity with the provided `id` and switches into the
    /// [`Mode::Edit`].
    ///
    /// Returns the [`FormInput`] filled with the current values of the
    /// entity.
    ///
    /// # Errors
    ///
    /// - [`LoadError::NotFound`] if there is no such entity.
    /// - [`LoadError::Gateway`] if the entity failed to be fetched.
    #[tracing::instrument(skip_all, fields(collection = E::COLLECTION, %id))]
    pub async fn load<Gw>(
        &mut self,
        service: &Service<Gw>,
        id: E::Id,
        view: &mut impl FormView,
    ) -> Result<FormInput, Traced<LoadError>>
    where
        Service<Gw>: Query<
            query::ById<E>,
            Ok = Option<E>,
            Err = Traced<gateway::Error>,
        >,
    {
        view.set_loading(true);
        let result = service.execute(query::ById::<E>::by(id)).await;
        view.set_loading(false);

        let entity = result
            .map_err(tracerr::map_from_and_wrap!(=> LoadError))
            .and_then(|found| {
                found
                    .ok_or(LoadError::NotFound {
                        collection: <E as Entity>::COLLECTION,
                        id: id.into(),
                    })
                    .map_err(tracerr::wrap!())
            })
            .inspect_err(|e| view.notify(Notice::error(e.to_string())))?;

        let input = entity.fill();
        self.mode = Mode::Edit(id);
        self.original = Some(entity);
        self.fields.clear();
        Ok(input)
    }

    /// Validates the provided `raw` value of the field, marking it in the
    /// `view`.
    ///
    /// # Errors
    ///
    /// If the field isn't a part of the [`Schema`].
    pub fn on_field_blur(
        &mut self,
        name: &str,
        raw: &str,
        view: &mut impl FormView,
    ) -> Result<&ValidationResult, UnknownField> {
        let field =
            E::field(name).ok_or_else(|| UnknownField(name.to_owned()))?;

        let slot = self
            .fields
            .entry(field.name)
            .or_insert(ValidationResult::Valid);
        *slot = validate(field.name, raw, &field.rules);
        view.mark_field(field.name, slot);
        Ok(slot)
    }

    /// Validates the whole `input` and saves it, creating a new entity or
    /// updating the loaded one depending on the [`Mode`].
    ///
    /// Nothing is sent if any field is invalid. The form state is kept
    /// intact on failures, so submitting may be retried.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Validation`] if any field is invalid.
    /// - [`SubmitError::Malformed`] if the values don't fit the entity.
    /// - [`SubmitError::Create`] or [`SubmitError::Update`] if saving failed.
    #[tracing::instrument(skip_all, fields(collection = E::COLLECTION))]
    pub async fn on_submit<Gw, CErr, UErr>(
        &mut self,
        service: &Service<Gw>,
        input: &FormInput,
        view: &mut impl FormView,
    ) -> Result<E, SubmitError<CErr, UErr>>
    where
        Service<Gw>: Command<E::Create, Ok = E, Err = CErr>
            + Command<E::Update, Ok = E, Err = UErr>,
        CErr: fmt::Display,
        UErr: fmt::Display,
    {
        let (results, violations) = validate_all(E::FIELDS, input);
        for (name, result) in &results {
            view.mark_field(*name, result);
        }
        self.fields = results.into_iter().collect();
        if !violations.is_empty() {
            log::debug!("form is invalid: {violations}");
            view.notify(Notice::error("Please fix the highlighted fields"));
            return Err(SubmitError::Validation(violations));
        }

        let draft = Payload::build(E::FIELDS, input)
            .into_draft::<E::Draft>()
            .map_err(SubmitError::Malformed)
            .inspect_err(|e| view.notify(Notice::error(e.to_string())))?;

        view.set_loading(true);
        let result = match self.mode {
            Mode::Create => {
                <Service<Gw> as Command<E::Create>>::execute(
                    service,
                    E::create(draft),
                )
                .await
                .map_err(SubmitError::Create)
            }
            Mode::Edit(id) => {
                <Service<Gw> as Command<E::Update>>::execute(
                    service,
                    E::update(id, draft),
                )
                .await
                .map_err(SubmitError::Update)
            }
        };
        view.set_loading(false);

        match result {
            Ok(saved) => {
                view.notify(Notice::success("Saved successfully"));
                view.navigate_away();
                Ok(saved)
            }
            Err(e) => {
                log::error!("failed to save `{}` entry: {e}", E::COLLECTION);
                view.notify(Notice::error(format!("Failed to save: {e}")));
                Err(e)
            }
        }
    }
}

/// Error of loading an entity into a [`FormController`].
#[derive(Debug, Display, Error, From)]
pub enum LoadError {
    /// [`Gateway`] error.
    ///
    /// [`Gateway`]: crate::infra::Gateway
    #[display("Failed to load data: {_0}")]
    Gateway(gateway::Error),

    /// Entity doesn't exist.
    #[display("No `{collection}` entry with ID {id}")]
    #[from(ignore)]
    NotFound {
        /// Name of the collection.
        collection: &'static str,

        /// ID of the missing entity.
        id: u64,
    },
}

/// Error of submitting a [`FormController`].
#[derive(Debug, Display, Error)]
pub enum SubmitError<C, U> {
    /// Some fields are invalid.
    #[display("Invalid form: {_0}")]
    Validation(Violations),

    /// Valid values don't fit the entity.
    #[display("Malformed form values: {_0}")]
    Malformed(serde_json::Error),

    /// Creating failed.
    #[display("{_0}")]
    Create(#[error(not(source))] C),

    /// Updating failed.
    #[display("{_0}")]
    Update(#[error(not(source))] U),
}
