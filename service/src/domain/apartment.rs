//! [`Apartment`] definitions.

use std::str::FromStr;

use common::{define_kind, unit, DateTime, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Entity, EntityDraft};

/// Apartment building offering rooms for rent.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Apartment {
    /// ID of this [`Apartment`].
    pub id: Id,

    /// Editable [`Details`] of this [`Apartment`].
    #[serde(flatten)]
    pub details: Details,

    /// [`DateTime`] when this [`Apartment`] was created.
    #[serde(
        alias = "create_time",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub create_time: Option<CreationDateTime>,

    /// [`DateTime`] when this [`Apartment`] was last modified.
    #[serde(
        alias = "update_time",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub update_time: Option<ModificationDateTime>,
}

impl Entity for Apartment {
    type Id = Id;
    type Draft = Details;

    const COLLECTION: &'static str = "apartments";

    fn id(&self) -> Id {
        self.id
    }

    fn from_draft(id: Id, details: Details, now: DateTime) -> Self {
        Self {
            id,
            details,
            create_time: Some(now.coerce()),
            update_time: Some(now.coerce()),
        }
    }

    fn apply(&mut self, details: Details, now: DateTime) {
        self.details = details;
        self.update_time = Some(now.coerce());
    }
}

/// Editable details of an [`Apartment`].
///
/// Doubles as the payload of creating or updating an [`Apartment`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    /// District this [`Apartment`] is located in.
    #[serde(default)]
    pub district: String,

    /// [`Name`] of this [`Apartment`].
    pub name: Name,

    /// [`Address`] of this [`Apartment`].
    pub address: Address,

    /// Geographic longitude of this [`Apartment`].
    #[serde(default)]
    pub longitude: Option<Decimal>,

    /// Geographic latitude of this [`Apartment`].
    #[serde(default)]
    pub latitude: Option<Decimal>,

    /// Lowest monthly rent among the rooms of this [`Apartment`].
    #[serde(alias = "rent_min", default)]
    pub rent_min: Option<Money>,

    /// Highest monthly rent among the rooms of this [`Apartment`].
    #[serde(alias = "rent_max", default)]
    pub rent_max: Option<Money>,

    /// Monthly [`Fees`] charged on top of the rent.
    #[serde(flatten)]
    pub fees: Fees,

    /// Whether this [`Apartment`] has an [`Elevator`].
    #[serde(alias = "has_elevator", default)]
    pub has_elevator: Elevator,

    /// Free-form description of the facilities.
    #[serde(default)]
    pub facilities: String,

    /// Free-form description of the nearby transportation.
    #[serde(default)]
    pub transportation: String,

    /// Current promotion, if any.
    #[serde(default)]
    pub promotion: String,

    /// [`Status`] of this [`Apartment`].
    #[serde(default)]
    pub status: Status,
}

impl EntityDraft for Details {
    type Entity = Apartment;
}

/// Monthly fees of an [`Apartment`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fees {
    /// Property management fee.
    #[serde(alias = "property_fee", default)]
    pub property_fee: Option<Money>,

    /// Water fee.
    #[serde(alias = "water_fee", default)]
    pub water_fee: Option<Money>,

    /// Electricity fee.
    #[serde(alias = "electricity_fee", default)]
    pub electricity_fee: Option<Money>,

    /// Heating fee.
    #[serde(alias = "heating_fee", default)]
    pub heating_fee: Option<Money>,

    /// Internet fee.
    #[serde(alias = "internet_fee", default)]
    pub internet_fee: Option<Money>,

    /// Parking fee.
    #[serde(alias = "parking_fee", default)]
    pub parking_fee: Option<Money>,
}

/// ID of an [`Apartment`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(u64);

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| "invalid `apartment::Id`")
    }
}

/// Name of an [`Apartment`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `apartment::Name`")
    }
}

/// Street address of an [`Apartment`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address
            && !address.is_empty()
            && address.len() <= 1024
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `apartment::Address`")
    }
}

define_kind! {
    #[doc = "Status of an [`Apartment`]."]
    enum Status {
        #[doc = "[`Apartment`] is hidden from tenants."]
        Disabled = 0,

        #[doc = "[`Apartment`] is listed for tenants."]
        Enabled = 1,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Enabled
    }
}

define_kind! {
    #[doc = "Presence of an elevator in an [`Apartment`]."]
    enum Elevator {
        #[doc = "No elevator."]
        Absent = 0,

        #[doc = "Elevator is available."]
        Present = 1,
    }
}

impl Default for Elevator {
    fn default() -> Self {
        Self::Absent
    }
}

/// [`DateTime`] when an [`Apartment`] was created.
pub type CreationDateTime = DateTimeOf<(Apartment, unit::Creation)>;

/// [`DateTime`] when an [`Apartment`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Apartment, unit::Modification)>;

#[cfg(test)]
mod spec {
    use super::{Apartment, Elevator, Status};

    #[test]
    fn deserializes_wire_format() {
        let apartment: Apartment = serde_json::from_value(serde_json::json!({
            "id": 7,
            "district": "Chaoyang",
            "name": "Sun Residence",
            "address": "12 Sunny Road",
            "rentMin": 1500,
            "waterFee": 3.5,
            "hasElevator": 1,
            "status": 0,
            "createTime": "2024-01-15 10:30:00",
        }))
        .unwrap();

        assert_eq!(apartment.id.to_string(), "7");
        assert_eq!(apartment.details.name.to_string(), "Sun Residence");
        assert_eq!(apartment.details.status, Status::Disabled);
        assert_eq!(apartment.details.has_elevator, Elevator::Present);
        assert_eq!(
            apartment.details.rent_min.map(|m| m.to_string()),
            Some("¥1500.00".to_owned()),
        );
        assert_eq!(
            apartment.details.fees.water_fee.map(|m| m.to_string()),
            Some("¥3.50".to_owned()),
        );
        assert_eq!(apartment.details.rent_max, None);
        assert!(apartment.create_time.is_some());
        assert!(apartment.update_time.is_none());
    }

    #[test]
    fn defaults_missing_optional_fields() {
        let apartment: Apartment = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Lake View",
            "address": "1 Lake Street",
        }))
        .unwrap();

        assert_eq!(apartment.details.district, "");
        assert_eq!(apartment.details.status, Status::Enabled);
        assert_eq!(apartment.details.has_elevator, Elevator::Absent);
    }

    #[test]
    fn rejects_unknown_status() {
        let res = serde_json::from_value::<Apartment>(serde_json::json!({
            "id": 1,
            "name": "Lake View",
            "address": "1 Lake Street",
            "status": 5,
        }));

        assert!(res.is_err(), "status 5 must be rejected");
    }

    #[test]
    fn checks_names() {
        assert!(super::Name::new("Sun").is_some());
        assert!(super::Name::new(" Sun").is_none());
        assert!(super::Name::new("").is_none());
    }
}
