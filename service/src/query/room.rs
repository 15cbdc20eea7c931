//! [`Query`] collection related to [`Room`]s.

use crate::domain::Room;
#[cfg(doc)]
use crate::Query;

/// Queries all the [`Room`]s.
pub type List = super::List<Room>;

/// Queries a [`Room`] by its [`room::Id`].
///
/// [`room::Id`]: crate::domain::room::Id
pub type ById = super::ById<Room>;
