//! [`Command`] for uploading multiple images at once.

use common::operations::Upload;
use tracerr::Traced;

use crate::{
    domain::upload::{self, MediaKind},
    infra::{gateway, Gateway},
    Service,
};

use super::{upload_media::ExecutionError, Command};

/// [`Command`] for uploading multiple images at once.
///
/// Nothing is uploaded if any of the [`upload::File`]s violates the
/// configured [`upload::Policy`].
#[derive(Clone, Debug)]
pub struct UploadImages {
    /// Images to upload.
    pub files: Vec<upload::File>,
}

impl<Gw> Command<UploadImages> for Service<Gw>
where
    Gw: Gateway<
        Upload<Vec<upload::File>>,
        Ok = Vec<upload::Url>,
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = Vec<upload::Url>;
    type Err = Traced<ExecutionError>;

    #[tracing::instrument(skip_all, fields(count = cmd.files.len()))]
    async fn execute(
        &self,
        cmd: UploadImages,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UploadImages { files } = cmd;

        for file in &files {
            self.config()
                .upload
                .check(file, MediaKind::Image)
                .map_err(tracerr::from_and_wrap!(=> E))?;
        }

        self.gateway()
            .execute(Upload(files))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}
