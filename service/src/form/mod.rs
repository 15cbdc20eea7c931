//! Form validation and payload assembly.

mod apartment;
pub mod rule;
mod room;
pub mod schema;

use std::{collections::BTreeMap, fmt, str::FromStr};

use derive_more::Error;
use itertools::Itertools as _;
use rust_decimal::{prelude::ToPrimitive as _, Decimal};
use serde::de::DeserializeOwned;
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as Json};

pub use self::{
    rule::{validate, Rule, RuleSet, ValidationResult},
    schema::{Field, FieldKind, Schema},
};

/// Raw values entered into a form, in the order they were entered.
///
/// A field may have several values, like a multi-select.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FormInput(Vec<(String, String)>);

impl FormInput {
    /// Creates a new empty [`FormInput`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `value` of the provided field.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Appends a `value` of the provided field, if there is any.
    pub fn push_opt(&mut self, name: &str, value: Option<impl ToString>) {
        if let Some(v) = value {
            self.push(name, v.to_string());
        }
    }

    /// Returns the first value of the provided field.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over all the values of the provided field.
    pub fn all<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s str> {
        self.0
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the values of every field present in the `overrides` with
    /// the ones from there.
    pub fn merge(&mut self, overrides: Self) {
        self.0.retain(|(n, _)| !overrides.0.iter().any(|(o, _)| o == n));
        self.0.extend(overrides.0);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Value of a [`Payload`] field coerced according to its [`FieldKind`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    /// Trimmed non-empty text.
    Text(String),

    /// Decimal number.
    Number(Decimal),

    /// Checked or unchecked checkbox.
    Flag(bool),

    /// Integer code.
    Choice(i64),

    /// Set of selected options.
    Set(Vec<String>),
}

impl Value {
    /// Coerces the raw values of a field of the provided [`FieldKind`].
    ///
    /// Returns [`None`] if the field has no usable value.
    fn coerce<'a>(
        kind: FieldKind,
        mut values: impl Iterator<Item = &'a str>,
    ) -> Option<Self> {
        let first = values.next().map(str::trim).unwrap_or_default();
        match kind {
            FieldKind::Text => {
                (!first.is_empty()).then(|| Self::Text(first.to_owned()))
            }
            FieldKind::Number => {
                Decimal::from_str(first).ok().map(Self::Number)
            }
            FieldKind::Boolean => Some(Self::Flag(matches!(
                first.to_ascii_lowercase().as_str(),
                "1" | "on" | "true" | "yes",
            ))),
            FieldKind::Enum => first.parse().ok().map(Self::Choice),
            FieldKind::MultiSelect => Some(Self::Set(
                std::iter::once(first)
                    .chain(values)
                    .flat_map(|v| v.split(','))
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(ToOwned::to_owned)
                    .unique()
                    .collect(),
            )),
        }
    }

    /// Converts this [`Value`] into its JSON representation.
    fn into_json(self) -> Json {
        match self {
            Self::Text(s) => Json::String(s),
            Self::Number(n) => decimal_to_json(n),
            Self::Flag(f) => Json::from(u8::from(f)),
            Self::Choice(c) => Json::from(c),
            Self::Set(s) => Json::from(s),
        }
    }
}

/// Converts a [`Decimal`] into a JSON number, keeping integers integral.
fn decimal_to_json(n: Decimal) -> Json {
    if n.fract().is_zero() {
        if let Some(i) = n.to_i64() {
            return Json::from(i);
        }
    }
    n.to_f64()
        .and_then(JsonNumber::from_f64)
        .map_or(Json::Null, Json::Number)
}

/// Typed values of a form, assembled according to a [`Schema`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Payload(BTreeMap<&'static str, Value>);

impl Payload {
    /// Builds a new [`Payload`] out of the provided [`FormInput`] according
    /// to the [`Field`]s of a [`Schema`].
    ///
    /// Fields without a usable value are omitted.
    #[must_use]
    pub fn build(fields: &[Field], input: &FormInput) -> Self {
        Self(
            fields
                .iter()
                .filter_map(|f| {
                    Value::coerce(f.kind, input.all(f.name))
                        .map(|v| (f.name, v))
                })
                .collect(),
        )
    }

    /// Returns the [`Value`] of the provided field, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Converts this [`Payload`] into a JSON object.
    #[must_use]
    pub fn into_json(self) -> Json {
        Json::Object(
            self.0
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.into_json()))
                .collect::<JsonMap<_, _>>(),
        )
    }

    /// Converts this [`Payload`] into a typed draft.
    ///
    /// # Errors
    ///
    /// If the values don't fit the draft, like a number out of its range.
    pub fn into_draft<D>(self) -> Result<D, serde_json::Error>
    where
        D: DeserializeOwned,
    {
        serde_json::from_value(self.into_json())
    }
}

/// Validates every [`Field`] of the provided [`FormInput`].
///
/// Returns the [`ValidationResult`] of every field, along with the
/// [`Violations`] collected over them.
#[must_use]
pub fn validate_all(
    fields: &[Field],
    input: &FormInput,
) -> (Vec<(&'static str, ValidationResult)>, Violations) {
    let results = fields
        .iter()
        .map(|f| {
            let raw = input.first(f.name).unwrap_or_default();
            (f.name, validate(f.name, raw, &f.rules))
        })
        .collect::<Vec<_>>();
    let violations = results
        .iter()
        .filter_map(|(name, res)| {
            res.message().map(|msg| (*name, msg.to_owned()))
        })
        .collect();
    (results, Violations(violations))
}

/// Form fields that failed validation, along with their messages.
#[derive(Clone, Debug, Default, Eq, Error, PartialEq)]
pub struct Violations(#[error(not(source))] Vec<(&'static str, String)>);

impl Violations {
    /// Indicates whether there are no [`Violations`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the invalid fields and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(f, msg)| (*f, msg.as_str()))
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .iter()
                .format_with("; ", |(field, msg), f| {
                    f(&format_args!("`{field}`: {msg}"))
                }),
        )
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::domain::{room, Apartment, Room};

    use super::{validate_all, FormInput, Payload, Schema as _, Value};

    fn room_input() -> FormInput {
        [
            ("apartmentId", "1"),
            ("roomNumber", " A-301 "),
            ("floor", "3"),
            ("area", "25.5"),
            ("rent", "2800"),
            ("deposit", ""),
            ("status", "1"),
            ("facilities", "wifi"),
            ("facilities", "desk, wifi"),
            ("images", ""),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn reads_first_value_past_field_name() {
        let input = room_input();

        let value = {
            let field = String::from("facilities");
            input.first(&field)
        };

        assert_eq!(value, Some("wifi"));
        assert_eq!(input.all("facilities").count(), 2);
    }

    #[test]
    fn coerces_by_field_kind() {
        let payload = Payload::build(Room::FIELDS, &room_input());

        assert_eq!(payload.get("apartmentId"), Some(&Value::Choice(1)));
        assert_eq!(
            payload.get("roomNumber"),
            Some(&Value::Text("A-301".into())),
        );
        assert_eq!(
            payload.get("area"),
            Some(&Value::Number(Decimal::new(255, 1))),
        );
        assert_eq!(payload.get("deposit"), None);
        assert_eq!(payload.get("images"), None);
        assert_eq!(
            payload.get("facilities"),
            Some(&Value::Set(vec!["wifi".into(), "desk".into()])),
        );
    }

    #[test]
    fn coerces_checkboxes() {
        let checked = Payload::build(
            Apartment::FIELDS,
            &[("hasElevator", "on")].into_iter().collect(),
        );
        let unchecked = Payload::build(Apartment::FIELDS, &FormInput::new());

        assert_eq!(checked.get("hasElevator"), Some(&Value::Flag(true)));
        assert_eq!(unchecked.get("hasElevator"), Some(&Value::Flag(false)));
        assert_eq!(checked.into_json()["hasElevator"], 1);
    }

    #[test]
    fn converts_into_draft() {
        let draft: room::Details = Payload::build(Room::FIELDS, &room_input())
            .into_draft()
            .unwrap();

        assert_eq!(draft.floor, 3);
        assert_eq!(draft.room_number.to_string(), "A-301");
        assert_eq!(draft.rent.to_string(), "¥2800.00");
        assert_eq!(draft.deposit, None);
        assert_eq!(draft.status, room::Status::Available);
        assert_eq!(draft.facilities.len(), 2);
    }

    #[test]
    fn collects_violations() {
        let mut input = room_input();
        input.merge(
            [("roomNumber", ""), ("floor", "0")].into_iter().collect(),
        );

        let (results, violations) = validate_all(Room::FIELDS, &input);

        assert_eq!(results.len(), Room::FIELDS.len());
        assert_eq!(
            violations.iter().collect::<Vec<_>>(),
            [
                ("roomNumber", "This field is required"),
                ("floor", "Floor must be a number greater than 0"),
            ],
        );
        assert_eq!(
            violations.to_string(),
            "`roomNumber`: This field is required; \
             `floor`: Floor must be a number greater than 0",
        );
    }

    #[test]
    fn merges_overrides() {
        let mut input: FormInput =
            [("name", "Old"), ("facilities", "a"), ("facilities", "b")]
                .into_iter()
                .collect();

        input.merge([("facilities", "c")].into_iter().collect());

        assert_eq!(input.first("name"), Some("Old"));
        assert_eq!(input.all("facilities").collect::<Vec<_>>(), ["c"]);
    }
}
