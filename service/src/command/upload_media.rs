//! [`Command`] for uploading a single [`Media`] file.

use common::operations::Upload;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::upload::{self, Media},
    infra::{gateway, Gateway},
    Service,
};

use super::Command;

/// [`Command`] for uploading a single [`Media`] file.
///
/// The file is checked against the configured [`upload::Policy`] before
/// anything is sent.
#[derive(Clone, Debug, From)]
pub struct UploadMedia {
    /// [`Media`] to upload.
    pub media: Media,
}

impl<Gw> Command<UploadMedia> for Service<Gw>
where
    Gw: Gateway<
        Upload<Media>,
        Ok = upload::Url,
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = upload::Url;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(kind = %cmd.media.kind))]
    async fn execute(
        &self,
        cmd: UploadMedia,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UploadMedia { media } = cmd;

        self.config()
            .upload
            .check(&media.file, media.kind)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let size = upload::format_size(media.file.size());
        let url = self
            .gateway()
            .execute(Upload(media))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("uploaded {size} to `{url}`");
        Ok(url)
    }
}

/// Error of [`UploadMedia`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),

    /// File violates the [`upload::Policy`].
    #[display("{_0}")]
    FileConstraint(upload::ConstraintError),
}
