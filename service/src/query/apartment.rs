//! [`Query`] collection related to [`Apartment`]s.

use crate::domain::Apartment;
#[cfg(doc)]
use crate::Query;

/// Queries all the [`Apartment`]s.
pub type List = super::List<Apartment>;

/// Queries an [`Apartment`] by its [`apartment::Id`].
///
/// [`apartment::Id`]: crate::domain::apartment::Id
pub type ById = super::ById<Apartment>;
