//! Filter engine applying [`SearchParams`] to lists of [`Searchable`]
//! entities.

mod apartment;
mod room;

use std::{collections::BTreeMap, fmt, str::FromStr};

use rust_decimal::Decimal;
use tracing as log;

/// Raw search criteria entered by a user, keyed by filter field names.
///
/// Empty or whitespace-only criteria mean "no filter".
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchParams(BTreeMap<String, String>);

impl SearchParams {
    /// Creates new empty [`SearchParams`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raw criterion of the provided `field`.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        drop(self.0.insert(field.into(), value.into()));
    }

    /// Returns the raw criterion of the provided `field`, or an empty string
    /// if there is none.
    #[must_use]
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map_or("", String::as_str)
    }

    /// Clears all the criteria.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Indicates whether none of the criteria filters anything.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.values().all(|v| v.trim().is_empty())
    }

    /// Iterates over the non-blank criteria.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Entity filterable by [`SearchParams`].
pub trait Searchable: Sized + 'static {
    /// Filterable fields of this entity.
    const CRITERIA: &'static [Criterion<Self>];

    /// Looks up the [`Criterion`] of the provided filter `field`.
    #[must_use]
    fn criterion(field: &str) -> Option<&'static Criterion<Self>> {
        Self::CRITERIA.iter().find(|c| c.field == field)
    }
}

/// Filterable field of a [`Searchable`] entity.
pub struct Criterion<E: 'static> {
    /// Name of the filter field in [`SearchParams`].
    pub field: &'static str,

    /// [`Matcher`] checking entities against the field criterion.
    pub matcher: Matcher<E>,
}

impl<E> fmt::Debug for Criterion<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Criterion")
            .field("field", &self.field)
            .field("matcher", &self.matcher)
            .finish()
    }
}

/// Predicate matching an entity value against a raw criterion.
pub enum Matcher<E: 'static> {
    /// Case-insensitive substring match.
    Contains(fn(&E) -> &str),

    /// Exact equality with the criterion parsed as an integer.
    Equals(fn(&E) -> u64),

    /// Entity value is greater than or equal to the criterion.
    ///
    /// Entities without a value never match.
    AtLeast(fn(&E) -> Option<Decimal>),

    /// Entity value is less than or equal to the criterion.
    ///
    /// Entities without a value always match, as they have no upper bound.
    AtMost(fn(&E) -> Option<Decimal>),
}

impl<E> fmt::Debug for Matcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Contains(_) => "Contains",
            Self::Equals(_) => "Equals",
            Self::AtLeast(_) => "AtLeast",
            Self::AtMost(_) => "AtMost",
        })
    }
}

/// [`Matcher`] along with its criterion parsed once per filtering.
enum Prepared<E: 'static> {
    /// Lowercased criterion of a [`Matcher::Contains`].
    Contains(fn(&E) -> &str, String),

    /// Parsed criterion of a [`Matcher::Equals`].
    Equals(fn(&E) -> u64, Option<u64>),

    /// Parsed criterion of a [`Matcher::AtLeast`].
    AtLeast(fn(&E) -> Option<Decimal>, Option<Decimal>),

    /// Parsed criterion of a [`Matcher::AtMost`].
    AtMost(fn(&E) -> Option<Decimal>, Option<Decimal>),
}

impl<E> Prepared<E> {
    /// Parses the `raw` criterion for the provided [`Criterion`].
    fn new(criterion: &Criterion<E>, raw: &str) -> Self {
        let raw = raw.trim();
        let field = criterion.field;
        match criterion.matcher {
            Matcher::Contains(get) => Self::Contains(get, raw.to_lowercase()),
            Matcher::Equals(get) => Self::Equals(get, parse(raw, field)),
            Matcher::AtLeast(get) => Self::AtLeast(get, parse(raw, field)),
            Matcher::AtMost(get) => Self::AtMost(get, parse(raw, field)),
        }
    }

    /// Checks whether the provided `entity` matches.
    fn matches(&self, entity: &E) -> bool {
        match self {
            Self::Contains(get, needle) => {
                get(entity).to_lowercase().contains(needle.as_str())
            }
            Self::Equals(get, value) => value.is_some_and(|v| get(entity) == v),
            Self::AtLeast(get, min) => {
                min.is_some_and(|min| get(entity).is_some_and(|v| v >= min))
            }
            Self::AtMost(get, max) => {
                max.is_some_and(|max| get(entity).is_none_or(|v| v <= max))
            }
        }
    }
}

/// Parses a numeric criterion of the provided `field`.
///
/// Returns [`None`] if it's unparsable, so nothing matches it.
fn parse<T: FromStr>(raw: &str, field: &str) -> Option<T> {
    let value = raw.parse().ok();
    if value.is_none() {
        log::debug!("unparsable `{field}` criterion `{raw}`, nothing matches");
    }
    value
}

/// Filters the provided `entities` by the [`SearchParams`].
///
/// All the non-blank criteria must match. Unknown fields are ignored. The
/// relative order of `entities` is preserved.
#[must_use]
pub fn filter<E>(entities: &[E], params: &SearchParams) -> Vec<E>
where
    E: Clone + Searchable,
{
    let active = E::CRITERIA
        .iter()
        .filter_map(|c| {
            let raw = params.get(c.field);
            (!raw.trim().is_empty()).then(|| Prepared::new(c, raw))
        })
        .collect::<Vec<_>>();

    entities
        .iter()
        .filter(|e| active.iter().all(|p| p.matches(e)))
        .cloned()
        .collect()
}
