//! [`Query`] definition.

pub mod apartment;
pub mod dashboard;
pub mod room;
pub mod room_counts;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{gateway, Gateway},
    Service,
};

pub use self::{dashboard::Dashboard, room_counts::RoomCounts};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype through a [`Gateway`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct GatewayQuery<T>(T);

impl<W, B> GatewayQuery<By<W, B>> {
    /// Creates a new [`GatewayQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Gw, W, B> Query<GatewayQuery<By<W, B>>> for Service<Gw>
where
    Gw: Gateway<Select<By<W, B>>, Ok = W, Err = Traced<gateway::Error>>,
{
    type Ok = W;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        GatewayQuery(by): GatewayQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.gateway()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Queries a list of all the `E`ntities.
pub type List<E> = GatewayQuery<By<Vec<E>, ()>>;

/// Queries an `E`ntity by its ID.
pub type ById<E> =
    GatewayQuery<By<Option<E>, <E as crate::domain::Entity>::Id>>;
