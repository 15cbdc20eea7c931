//! Form [`Schema`] of a [`Room`].

use crate::domain::Room;

use super::{Field, FieldKind, FormInput, Rule, RuleSet, Schema};

impl Schema for Room {
    const FIELDS: &'static [Field] = &[
        Field::checked(
            "apartmentId",
            FieldKind::Enum,
            RuleSet::new("Apartment", &[Rule::Required, Rule::Integer]),
        ),
        Field::checked(
            "roomNumber",
            FieldKind::Text,
            RuleSet::new("Room number", &[Rule::Required, Rule::MinLength(2)]),
        ),
        Field::checked(
            "floor",
            FieldKind::Number,
            RuleSet::new(
                "Floor",
                &[Rule::Required, Rule::Integer, Rule::Positive],
            ),
        ),
        Field::checked(
            "area",
            FieldKind::Number,
            RuleSet::new("Area", &[Rule::Required, Rule::Positive]),
        ),
        Field::checked(
            "rent",
            FieldKind::Number,
            RuleSet::new("Rent", &[Rule::Required, Rule::Positive]),
        ),
        Field::checked(
            "deposit",
            FieldKind::Number,
            RuleSet::new("Deposit", &[Rule::Positive]),
        ),
        Field::checked(
            "status",
            FieldKind::Enum,
            RuleSet::new("Status", &[Rule::OneOf(&[0, 1, 2])]),
        ),
        Field::plain("description", FieldKind::Text),
        Field::plain("facilities", FieldKind::MultiSelect),
        Field::plain("images", FieldKind::Text),
        Field::plain("videoUrl", FieldKind::Text),
    ];

    fn fill(&self) -> FormInput {
        let d = &self.details;
        let mut input = FormInput::new();

        input.push("apartmentId", d.apartment_id.to_string());
        input.push("roomNumber", d.room_number.to_string());
        input.push("floor", d.floor.to_string());
        input.push("area", d.area.to_string());
        input.push("rent", d.rent.amount().to_string());
        input.push_opt("deposit", d.deposit.map(|m| m.amount()));
        input.push("status", d.status.u8().to_string());
        input.push("description", &d.description);
        for facility in &d.facilities {
            input.push("facilities", facility);
        }
        input.push_opt("images", d.images.as_deref());
        input.push_opt("videoUrl", d.video_url.as_deref());

        input
    }
}
