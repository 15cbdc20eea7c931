//! Form [`Schema`] of an [`Apartment`].

use crate::domain::Apartment;

use super::{Field, FieldKind, FormInput, Rule, RuleSet, Schema};

impl Schema for Apartment {
    const FIELDS: &'static [Field] = &[
        Field::plain("district", FieldKind::Text),
        Field::checked(
            "name",
            FieldKind::Text,
            RuleSet::new(
                "Apartment name",
                &[Rule::Required, Rule::MinLength(2)],
            ),
        ),
        Field::checked(
            "address",
            FieldKind::Text,
            RuleSet::new("Address", &[Rule::Required, Rule::MinLength(5)]),
        ),
        Field::checked(
            "longitude",
            FieldKind::Number,
            RuleSet::new("Longitude", &[Rule::Numeric]),
        ),
        Field::checked(
            "latitude",
            FieldKind::Number,
            RuleSet::new("Latitude", &[Rule::Numeric]),
        ),
        Field::checked(
            "rentMin",
            FieldKind::Number,
            RuleSet::new("Minimum rent", &[Rule::Positive]),
        ),
        Field::checked(
            "rentMax",
            FieldKind::Number,
            RuleSet::new("Maximum rent", &[Rule::Positive]),
        ),
        Field::checked(
            "propertyFee",
            FieldKind::Number,
            RuleSet::new("Property fee", &[Rule::Numeric]),
        ),
        Field::checked(
            "waterFee",
            FieldKind::Number,
            RuleSet::new("Water fee", &[Rule::Numeric]),
        ),
        Field::checked(
            "electricityFee",
            FieldKind::Number,
            RuleSet::new("Electricity fee", &[Rule::Numeric]),
        ),
        Field::checked(
            "heatingFee",
            FieldKind::Number,
            RuleSet::new("Heating fee", &[Rule::Numeric]),
        ),
        Field::checked(
            "internetFee",
            FieldKind::Number,
            RuleSet::new("Internet fee", &[Rule::Numeric]),
        ),
        Field::checked(
            "parkingFee",
            FieldKind::Number,
            RuleSet::new("Parking fee", &[Rule::Numeric]),
        ),
        Field::plain("hasElevator", FieldKind::Boolean),
        Field::plain("facilities", FieldKind::Text),
        Field::plain("transportation", FieldKind::Text),
        Field::plain("promotion", FieldKind::Text),
        Field::checked(
            "status",
            FieldKind::Enum,
            RuleSet::new("Status", &[Rule::OneOf(&[0, 1])]),
        ),
    ];

    fn fill(&self) -> FormInput {
        let d = &self.details;
        let fees = &d.fees;
        let mut input = FormInput::new();

        input.push("district", &d.district);
        input.push("name", d.name.to_string());
        input.push("address", d.address.to_string());
        input.push_opt("longitude", d.longitude);
        input.push_opt("latitude", d.latitude);
        input.push_opt("rentMin", d.rent_min.map(|m| m.amount()));
        input.push_opt("rentMax", d.rent_max.map(|m| m.amount()));
        input.push_opt("propertyFee", fees.property_fee.map(|m| m.amount()));
        input.push_opt("waterFee", fees.water_fee.map(|m| m.amount()));
        input.push_opt(
            "electricityFee",
            fees.electricity_fee.map(|m| m.amount()),
        );
        input.push_opt("heatingFee", fees.heating_fee.map(|m| m.amount()));
        input.push_opt("internetFee", fees.internet_fee.map(|m| m.amount()));
        input.push_opt("parkingFee", fees.parking_fee.map(|m| m.amount()));
        input.push("hasElevator", d.has_elevator.u8().to_string());
        input.push("facilities", &d.facilities);
        input.push("transportation", &d.transportation);
        input.push("promotion", &d.promotion);
        input.push("status", d.status.u8().to_string());

        input
    }
}
