//! Field [`Rule`]s and their validation.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing as log;

/// Single validation rule of a form field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rule {
    /// Value must not be empty.
    Required,

    /// Value must contain at least this number of characters.
    MinLength(usize),

    /// Value must be a decimal number.
    Numeric,

    /// Value must be an integer number.
    Integer,

    /// Value must be a number greater than zero.
    Positive,

    /// Value must be one of these integer codes.
    OneOf(&'static [u8]),
}

impl Rule {
    /// Checks the provided non-empty `value` against this [`Rule`], returning
    /// the error message if it doesn't pass.
    fn check(self, label: &str, value: &str) -> Option<String> {
        let passes = match self {
            Self::Required => !value.is_empty(),
            Self::MinLength(n) => value.chars().count() >= n,
            Self::Numeric => Decimal::from_str(value).is_ok(),
            Self::Integer => value.parse::<i64>().is_ok(),
            Self::Positive => {
                Decimal::from_str(value).is_ok_and(|v| v > Decimal::ZERO)
            }
            Self::OneOf(codes) => {
                value.parse::<u8>().is_ok_and(|v| codes.contains(&v))
            }
        };
        (!passes).then(|| self.message(label))
    }

    /// Returns the message shown when this [`Rule`] fails.
    fn message(self, label: &str) -> String {
        match self {
            Self::Required => "This field is required".into(),
            Self::MinLength(n) => {
                format!("{label} must be at least {n} characters")
            }
            Self::Numeric => format!("{label} must be a number"),
            Self::Integer => format!("{label} must be a whole number"),
            Self::Positive => {
                format!("{label} must be a number greater than 0")
            }
            Self::OneOf(_) => format!("{label} has an unsupported value"),
        }
    }
}

/// Ordered [`Rule`]s of a form field along with its human-readable label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RuleSet {
    /// Label of the field used in messages.
    pub label: &'static str,

    /// [`Rule`]s to check, in order.
    pub rules: &'static [Rule],
}

impl RuleSet {
    /// Creates a new [`RuleSet`].
    #[must_use]
    pub const fn new(label: &'static str, rules: &'static [Rule]) -> Self {
        Self { label, rules }
    }

    /// Indicates whether the field must have a value.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }
}

/// Outcome of validating a single form field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationResult {
    /// Field value is acceptable.
    Valid,

    /// Field value is rejected with this message.
    Invalid(String),
}

impl ValidationResult {
    /// Indicates whether this is a [`ValidationResult::Valid`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the message of a [`ValidationResult::Invalid`].
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(msg) => Some(msg),
        }
    }
}

/// Validates the `raw` value of the provided form `field`.
///
/// The value is trimmed first. [`Rule::Required`] is checked before any
/// other rule, and an empty optional value is valid. Otherwise, the first
/// failing [`Rule`] supplies the message.
#[must_use]
pub fn validate(field: &str, raw: &str, rules: &RuleSet) -> ValidationResult {
    let value = raw.trim();

    if value.is_empty() {
        return if rules.is_required() {
            log::trace!("`{field}` field is empty but required");
            ValidationResult::Invalid(Rule::Required.message(rules.label))
        } else {
            ValidationResult::Valid
        };
    }

    rules
        .rules
        .iter()
        .find_map(|r| r.check(rules.label, value))
        .map_or(ValidationResult::Valid, |msg| {
            log::trace!("`{field}` field is invalid: {msg}");
            ValidationResult::Invalid(msg)
        })
}
