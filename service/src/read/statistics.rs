//! [`Statistics`] definitions.

use std::collections::HashMap;

use common::Money;

use crate::domain::{apartment, room, Apartment, Room};

/// Aggregate figures shown on the dashboard.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Statistics {
    /// Number of all the [`Apartment`]s.
    pub apartments: usize,

    /// Number of all the [`Room`]s.
    pub rooms: usize,

    /// Number of the [`room::Status::Available`] [`Room`]s.
    pub available_rooms: usize,

    /// Mean rent over the [`Room`]s with a positive rent, rounded to cents.
    ///
    /// [`Money::ZERO`] when there are no such [`Room`]s.
    pub average_rent: Money,
}

impl Statistics {
    /// Computes [`Statistics`] of the provided [`Apartment`]s and [`Room`]s.
    #[must_use]
    pub fn compute(apartments: &[Apartment], rooms: &[Room]) -> Self {
        let available_rooms = rooms
            .iter()
            .filter(|r| r.details.status == room::Status::Available)
            .count();
        let average_rent = Money::mean(
            rooms
                .iter()
                .map(|r| r.details.rent)
                .filter(Money::is_positive),
        )
        .map_or(Money::ZERO, Money::round_to_cents);

        Self {
            apartments: apartments.len(),
            rooms: rooms.len(),
            available_rooms,
            average_rent,
        }
    }
}

/// Counts [`Room`]s per [`Apartment`] they belong to.
///
/// [`Apartment`]s without any [`Room`]s are absent in the result.
#[must_use]
pub fn room_counts(rooms: &[Room]) -> HashMap<apartment::Id, usize> {
    rooms.iter().fold(HashMap::new(), |mut counts, r| {
        *counts.entry(r.details.apartment_id).or_default() += 1;
        counts
    })
}
