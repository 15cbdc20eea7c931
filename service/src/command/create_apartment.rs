//! [`Command`] for creating a new [`Apartment`].

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{apartment, Apartment},
    infra::{gateway, Gateway},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Apartment`].
#[derive(Clone, Debug)]
pub struct CreateApartment {
    /// [`apartment::Details`] of a new [`Apartment`].
    pub details: apartment::Details,
}

impl<Gw> Command<CreateApartment> for Service<Gw>
where
    Gw: Gateway<
        Insert<apartment::Details>,
        Ok = Apartment,
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = Apartment;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all)]
    async fn execute(
        &self,
        cmd: CreateApartment,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateApartment { details } = cmd;

        self.gateway()
            .execute(Insert(details))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`CreateApartment`] [`Command`] execution.
pub type ExecutionError = gateway::Error;
