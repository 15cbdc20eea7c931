//! [`Command`] for deleting a [`Room`].

use common::operations::{By, Delete};
use derive_more::From;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{room, Room},
    infra::{gateway, Gateway},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Room`].
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteRoom {
    /// ID of the [`Room`] to delete.
    pub id: room::Id,
}

impl<Gw> Command<DeleteRoom> for Service<Gw>
where
    Gw: Gateway<
        Delete<By<Room, room::Id>>,
        Ok = (),
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(id = %cmd.id))]
    async fn execute(&self, cmd: DeleteRoom) -> Result<Self::Ok, Self::Err> {
        let DeleteRoom { id } = cmd;

        self.gateway()
            .execute(Delete(By::<Room, _>::new(id)))
            .await
            .map_err(tracerr::wrap!())?;

        log::info!("`Room(id: {id})` deleted");
        Ok(())
    }
}

/// Error of [`DeleteRoom`] [`Command`] execution.
pub type ExecutionError = gateway::Error;
