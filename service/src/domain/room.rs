//! [`Room`] definitions.

use std::{collections::BTreeSet, str::FromStr};

use common::{define_kind, unit, DateTime, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{apartment, Entity, EntityDraft};

/// Room for rent inside an [`Apartment`].
///
/// [`Apartment`]: super::Apartment
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// ID of this [`Room`].
    pub id: Id,

    /// Editable [`Details`] of this [`Room`].
    #[serde(flatten)]
    pub details: Details,

    /// [`DateTime`] when this [`Room`] was created.
    #[serde(
        alias = "create_time",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub create_time: Option<CreationDateTime>,

    /// [`DateTime`] when this [`Room`] was last modified.
    #[serde(
        alias = "update_time",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub update_time: Option<ModificationDateTime>,
}

impl Room {
    /// Returns the image URLs of this [`Room`].
    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.details
            .images
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Entity for Room {
    type Id = Id;
    type Draft = Details;

    const COLLECTION: &'static str = "rooms";

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

/// Editable details of a [`Room`].
///
/// Doubles as the payload of creating or updating a [`Room`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    /// ID of the [`Apartment`] this [`Room`] belongs to.
    ///
    /// [`Apartment`]: super::Apartment
    #[serde(alias = "apartment_id")]
    pub apartment_id: apartment::Id,

    /// [`Number`] of this [`Room`] inside its [`Apartment`].
    ///
    /// [`Apartment`]: super::Apartment
    #[serde(alias = "room_number")]
    pub room_number: Number,

    /// Floor this [`Room`] is located on.
    pub floor: u16,

    /// Area of this [`Room`] in square meters.
    pub area: Decimal,

    /// Monthly rent of this [`Room`].
    #[serde(alias = "price")]
    pub rent: Money,

    /// Deposit required to rent this [`Room`].
    #[serde(default)]
    pub deposit: Option<Money>,

    /// [`Status`] of this [`Room`].
    #[serde(default)]
    pub status: Status,

    /// Free-form description of this [`Room`].
    #[serde(default)]
    pub description: String,

    /// Facilities available in this [`Room`].
    #[serde(default)]
    pub facilities: BTreeSet<String>,

    /// Comma-separated image URLs of this [`Room`].
    #[serde(default)]
    pub images: Option<String>,

    /// Video URL of this [`Room`].
    #[serde(alias = "video_url", default)]
    pub video_url: Option<String>,
}

impl EntityDraft for Details {
    type Entity = Room;
}

/// ID of a [`Room`].
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
        s.trim().parse().map(Self).map_err(|_| "invalid `room::Id`")
    }
}

/// Number of a [`Room`] inside its apartment, like `A-301`.
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Number(String);

impl Number {
    /// Creates a new [`Number`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Number`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        number.trim() == number && !number.is_empty() && number.len() <= 64
    }
}

impl FromStr for Number {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `room::Number`")
    }
}

define_kind! {
    #[doc = "Status of a [`Room`]."]
    enum Status {
        #[doc = "[`Room`] is occupied by a tenant."]
        Rented = 0,

        #[doc = "[`Room`] can be rented."]
        Available = 1,

        #[doc = "[`Room`] is under maintenance."]
        Maintenance = 2,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Available
    }
}

/// [`DateTime`] when a [`Room`] was created.
pub type CreationDateTime = DateTimeOf<(Room, unit::Creation)>;

/// [`DateTime`] when a [`Room`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Room, unit::Modification)>;

#[cfg(test)]
mod spec {
    use super::{Room, Status};

    #[test]
    fn accepts_snake_case_aliases() {
        let room: Room = serde_json::from_value(serde_json::json!({
            "id": 2,
            "apartment_id": 1,
            "room_number": "A-301",
            "floor": 3,
            "area": 25.5,
            "price": 2800,
            "status": 2,
            "facilities": ["wifi", "desk"],
            "create_time": "2024-01-15 10:30:00",
        }))
        .unwrap();

        assert_eq!(room.details.apartment_id.to_string(), "1");
        assert_eq!(room.details.room_number.to_string(), "A-301");
        assert_eq!(room.details.rent.to_string(), "¥2800.00");
        assert_eq!(room.details.status, Status::Maintenance);
        assert_eq!(room.details.facilities.len(), 2);
        assert!(room.create_time.is_some());
    }

    #[test]
    fn serializes_camel_case() {
        let room: Room = serde_json::from_value(serde_json::json!({
            "id": 2,
            "apartmentId": 1,
            "roomNumber": "A-301",
            "floor": 3,
            "area": 25.5,
            "rent": 2800,
        }))
        .unwrap();

        let json = serde_json::to_value(&room).unwrap();

        assert_eq!(json["roomNumber"], "A-301");
        assert_eq!(json["apartmentId"], 1);
        assert_eq!(json["status"], 1);
        assert!(json.get("createTime").is_none());
    }

    #[test]
    fn splits_image_urls() {
        let mut room: Room = serde_json::from_value(serde_json::json!({
            "id": 2,
            "apartmentId": 1,
            "roomNumber": "A-301",
            "floor": 3,
            "area": 25.5,
            "rent": 2800,
            "images": "/a.png, /b.png,,",
        }))
        .unwrap();

        assert_eq!(room.image_urls().collect::<Vec<_>>(), ["/a.png", "/b.png"]);

        room.details.images = None;
        assert_eq!(room.image_urls().count(), 0);
    }
}
