//! [`Query`] of the dashboard [`Statistics`].

use common::operations::{By, Select};
use futures::future;
use tracerr::Traced;

use crate::{
    domain::{Apartment, Room},
    infra::{gateway, Gateway},
    read::Statistics,
    Service,
};

use super::Query;

/// Queries the dashboard [`Statistics`] over all the [`Apartment`]s and
/// [`Room`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dashboard;

impl<Gw> Query<Dashboard> for Service<Gw>
where
    Gw: Gateway<
            Select<By<Vec<Apartment>, ()>>,
            Ok = Vec<Apartment>,
            Err = Traced<gateway::Error>,
        > + Gateway<
            Select<By<Vec<Room>, ()>>,
            Ok = Vec<Room>,
            Err = Traced<gateway::Error>,
        >,
{
    type Ok = Statistics;
    type Err = Traced<gateway::Error>;

    #[tracing::instrument(skip_all)]
    async fn execute(&self, _: Dashboard) -> Result<Self::Ok, Self::Err> {
        let (apartments, rooms) = future::try_join(
            self.gateway()
                .execute(Select(By::<Vec<Apartment>, _>::new(()))),
            self.gateway().execute(Select(By::<Vec<Room>, _>::new(()))),
        )
        .await
        .map_err(tracerr::wrap!())?;

        Ok(Statistics::compute(&apartments, &rooms))
    }
}

#[cfg(test)]
mod spec {
    use common::{Handler as _, Money};
    use rust_decimal::Decimal;

    use crate::command::{test, CreateApartment, CreateRoom};

    use super::Dashboard;

    #[tokio::test]
    async fn computes_statistics() {
        let svc = test::service();
        let sun = svc
            .execute(CreateApartment {
                details: test::apartment("Sun"),
            })
            .await
            .unwrap();
        for (number, rent) in [("A-101", 2000), ("A-102", 3001)] {
            let mut details = test::room(sun.id.into(), number);
            details.rent = Decimal::from(rent).into();
            drop(svc.execute(CreateRoom { details }).await.unwrap());
        }

        let stats = svc.execute(Dashboard).await.unwrap();

        assert_eq!(stats.apartments, 1);
        assert_eq!(stats.rooms, 2);
        assert_eq!(stats.available_rooms, 2);
        assert_eq!(stats.average_rent.to_string(), "¥2500.50");
    }

    #[tokio::test]
    async fn is_zero_when_empty() {
        let svc = test::service();

        let stats = svc.execute(Dashboard).await.unwrap();

        assert_eq!(stats.rooms, 0);
        assert_eq!(stats.average_rent, Money::ZERO);
    }
}
