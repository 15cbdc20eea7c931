//! [`Searchable`] implementation of an [`Apartment`].

use crate::domain::Apartment;

use super::{Criterion, Matcher, Searchable};

impl Searchable for Apartment {
    const CRITERIA: &'static [Criterion<Self>] = &[
        Criterion {
            field: "district",
            matcher: Matcher::Contains(|a| a.details.district.as_str()),
        },
        Criterion {
            field: "name",
            matcher: Matcher::Contains(|a| a.details.name.as_ref()),
        },
        Criterion {
            field: "status",
            matcher: Matcher::Equals(|a| a.details.status.u8().into()),
        },
        Criterion {
            field: "rentMin",
            matcher: Matcher::AtLeast(|a| {
                a.details.rent_min.map(|m| m.amount())
            }),
        },
        Criterion {
            field: "rentMax",
            // Zero maximum rent means no upper bound.
            matcher: Matcher::AtMost(|a| {
                a.details
                    .rent_max
                    .map(|m| m.amount())
                    .filter(|m| !m.is_zero())
            }),
        },
    ];
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::Apartment,
        search::{filter, SearchParams},
    };

    fn apartment(
        id: u64,
        name: &str,
        status: u8,
        rent: [Option<u32>; 2],
    ) -> Apartment {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "district": "Chaoyang",
            "name": name,
            "address": "1 Some Street",
            "status": status,
            "rentMin": rent[0],
            "rentMax": rent[1],
        }))
        .unwrap()
    }

    fn names(found: &[Apartment]) -> Vec<String> {
        found.iter().map(|a| a.details.name.to_string()).collect()
    }

    #[test]
    fn filters_by_status() {
        let list = [
            apartment(1, "Sun", 1, [None, None]),
            apartment(2, "Lake", 0, [None, None]),
        ];

        let found = filter(&list, &[("status", "1")].into_iter().collect());

        assert_eq!(names(&found), ["Sun"]);
    }

    #[test]
    fn filters_by_name_and_district() {
        let list = [
            apartment(1, "Sun Residence", 1, [None, None]),
            apartment(2, "Lake View", 1, [None, None]),
        ];
        let mut params = SearchParams::new();
        params.set("name", "view");
        params.set("district", "chao");

        assert_eq!(names(&filter(&list, &params)), ["Lake View"]);
    }

    #[test]
    fn filters_by_rent_bounds() {
        let list = [
            apartment(1, "Cheap", 1, [Some(800), Some(1200)]),
            apartment(2, "Open", 1, [Some(2000), None]),
            apartment(3, "Unknown", 1, [None, None]),
            apartment(4, "Unbounded", 1, [Some(900), Some(0)]),
        ];

        let max = filter(&list, &[("rentMax", "1500")].into_iter().collect());
        assert_eq!(names(&max), ["Cheap", "Open", "Unknown", "Unbounded"]);

        let min = filter(&list, &[("rentMin", "1000")].into_iter().collect());
        assert_eq!(names(&min), ["Open"]);

        let none = filter(&list, &[("rentMax", "500")].into_iter().collect());
        assert_eq!(names(&none), ["Open", "Unknown", "Unbounded"]);
    }
}
