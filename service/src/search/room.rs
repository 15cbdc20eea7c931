//! [`Searchable`] implementation of a [`Room`].

use crate::domain::Room;

use super::{Criterion, Matcher, Searchable};

impl Searchable for Room {
    const CRITERIA: &'static [Criterion<Self>] = &[
        Criterion {
            field: "roomNumber",
            matcher: Matcher::Contains(|r| r.details.room_number.as_ref()),
        },
        Criterion {
            field: "apartmentId",
            matcher: Matcher::Equals(|r| r.details.apartment_id.into()),
        },
        Criterion {
            field: "status",
            matcher: Matcher::Equals(|r| r.details.status.u8().into()),
        },
        Criterion {
            field: "rentMin",
            matcher: Matcher::AtLeast(|r| Some(r.details.rent.amount())),
        },
        Criterion {
            field: "rentMax",
            matcher: Matcher::AtMost(|r| Some(r.details.rent.amount())),
        },
    ];
}

#[cfg(test)]
mod spec {
    use crate::{domain::Room, search::filter};

    fn room(
        id: u64,
        apartment: u64,
        number: &str,
        status: u8,
        rent: u32,
    ) -> Room {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "apartmentId": apartment,
            "roomNumber": number,
            "floor": 1,
            "area": 20,
            "rent": rent,
            "status": status,
        }))
        .unwrap()
    }

    fn ids(found: &[Room]) -> Vec<String> {
        found.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn filters_by_apartment_and_status() {
        let list = [
            room(1, 1, "A-101", 1, 1000),
            room(2, 1, "A-102", 0, 1200),
            room(3, 2, "B-101", 1, 1500),
        ];

        let found = filter(
            &list,
            &[("apartmentId", "1"), ("status", "1")].into_iter().collect(),
        );

        assert_eq!(ids(&found), ["1"]);
    }

    #[test]
    fn filters_by_room_number_and_rent() {
        let list = [
            room(1, 1, "A-101", 1, 1000),
            room(2, 1, "A-102", 1, 1200),
            room(3, 2, "B-101", 1, 1500),
        ];

        let found = filter(
            &list,
            &[("roomNumber", "a-"), ("rentMin", "1100"), ("rentMax", "1500")]
                .into_iter()
                .collect(),
        );

        assert_eq!(ids(&found), ["2"]);
    }
}
