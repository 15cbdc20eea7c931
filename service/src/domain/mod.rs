//! Domain definitions.

pub mod apartment;
pub mod room;
pub mod upload;

use std::{fmt, hash::Hash};

use common::DateTime;
use serde::{de::DeserializeOwned, Serialize};

pub use self::{apartment::Apartment, room::Room};

/// Entity stored behind a gateway as a whole collection.
pub trait Entity:
    Clone + fmt::Debug + DeserializeOwned + Serialize + Send + Sync + 'static
{
    /// ID of this [`Entity`].
    type Id: Copy
        + fmt::Debug
        + fmt::Display
        + Eq
        + From<u64>
        + Hash
        + Into<u64>
        + Send
        + Sync
        + 'static;

    /// [`EntityDraft`] creating or updating this [`Entity`].
    type Draft: EntityDraft<Entity = Self>;

    /// Name of the collection this [`Entity`] belongs to.
    ///
    /// Used as the REST resource path and as the local storage key.
    const COLLECTION: &'static str;

    /// Returns the ID of this [`Entity`].
    fn id(&self) -> Self::Id;

    /// Builds a new [`Entity`] with the provided `id` from its `draft`.
    fn from_draft(id: Self::Id, draft: Self::Draft, now: DateTime) -> Self;

    /// Overwrites the editable fields of this [`Entity`] with the `draft`.
    fn apply(&mut self, draft: Self::Draft, now: DateTime);
}

/// Typed payload of creating or updating an [`Entity`].
pub trait EntityDraft:
    Clone + fmt::Debug + DeserializeOwned + Serialize + Send + Sync + 'static
{
    /// [`Entity`] this draft is for.
    type Entity: Entity<Draft = Self>;
}
