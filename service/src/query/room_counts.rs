//! [`Query`] of [`Room`] counts per [`Apartment`].

use std::collections::HashMap;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{apartment, Room},
    infra::{gateway, Gateway},
    read::statistics,
    Service,
};
#[cfg(doc)]
use crate::domain::Apartment;

use super::Query;

/// Queries the number of [`Room`]s in every [`Apartment`] having any.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoomCounts;

impl<Gw> Query<RoomCounts> for Service<Gw>
where
    Gw: Gateway<
        Select<By<Vec<Room>, ()>>,
        Ok = Vec<Room>,
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = HashMap<apartment::Id, usize>;
    type Err = Traced<gateway::Error>;

    async fn execute(&self, _: RoomCounts) -> Result<Self::Ok, Self::Err> {
        let rooms = self
            .gateway()
            .execute(Select(By::<Vec<Room>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(statistics::room_counts(&rooms))
    }
}
