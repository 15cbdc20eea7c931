//! [`Command`] for deleting an uploaded file.

use common::operations::Delete;
use derive_more::From;
use tracerr::Traced;

use crate::{
    domain::upload,
    infra::{gateway, Gateway},
    Service,
};

use super::Command;

/// [`Command`] for deleting an uploaded file by its [`upload::Url`].
#[derive(Clone, Debug, From)]
pub struct DeleteMedia {
    /// [`upload::Url`] of the file to delete.
    pub url: upload::Url,
}

impl<Gw> Command<DeleteMedia> for Service<Gw>
where
    Gw: Gateway<Delete<upload::Url>, Ok = (), Err = Traced<gateway::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(url = %cmd.url))]
    async fn execute(&self, cmd: DeleteMedia) -> Result<Self::Ok, Self::Err> {
        let DeleteMedia { url } = cmd;

        self.gateway()
            .execute(Delete(url))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`DeleteMedia`] [`Command`] execution.
pub type ExecutionError = gateway::Error;
