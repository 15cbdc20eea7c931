//! Uploading and deleting media files.

use std::{io, path::Path};

use itertools::Itertools as _;
use service::{
    command::{DeleteMedia, UploadImages, UploadMedia},
    domain::upload::{self, Media, MediaKind},
    Command as _,
};
use tokio::fs;
use tracing as log;

use crate::{args, AsError as _, Error, Service, Terminal};

/// Executes the provided [`args::Upload`] operation.
pub(super) async fn run<W: io::Write>(
    service: &Service,
    op: args::Upload,
    term: &mut Terminal<W>,
) -> Result<(), Error> {
    match op {
        args::Upload::Image { path } => {
            upload_one(service, &path, MediaKind::Image, term).await
        }
        args::Upload::Video { path } => {
            upload_one(service, &path, MediaKind::Video, term).await
        }
        args::Upload::Images { paths } => {
            let mut files = Vec::with_capacity(paths.len());
            for path in &paths {
                files.push(read(path).await?);
            }
            let urls = service
                .execute(UploadImages { files })
                .await
                .map_err(|e| e.into_error())?;
            term.show(urls.iter().join("\n"));
            Ok(())
        }
        args::Upload::Delete { url } => {
            service
                .execute(DeleteMedia { url: url.into() })
                .await
                .map_err(|e| e.into_error())?;
            term.show("File deleted");
            Ok(())
        }
    }
}

/// Uploads a single file of the provided [`MediaKind`].
async fn upload_one<W: io::Write>(
    service: &Service,
    path: &Path,
    kind: MediaKind,
    term: &mut Terminal<W>,
) -> Result<(), Error> {
    let file = read(path).await?;
    let url = service
        .execute(UploadMedia {
            media: Media { kind, file },
        })
        .await
        .map_err(|e| e.into_error())?;
    term.show(url.to_string());
    Ok(())
}

/// Reads the file at the provided `path`.
async fn read(path: &Path) -> Result<upload::File, Error> {
    let bytes = fs::read(path).await.map_err(|e| {
        Error::new(
            "FILE_READ",
            format!("Failed to read `{}`: {e}", path.display()),
        )
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = upload::File::new(name, bytes);
    log::debug!(
        "read `{}` of {} as `{}`",
        file.name,
        upload::format_size(file.size()),
        file.content_type,
    );
    Ok(file)
}

#[cfg(test)]
mod spec {
    use std::fs;

    use crate::{args::Upload, cli::test, Terminal};

    use super::run;

    #[tokio::test]
    async fn checks_policy_before_uploading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        fs::write(&path, b"").unwrap();
        let service = test::service(&dir);
        let mut term = Terminal::new(Vec::<u8>::new());

        let err = run(&service, Upload::Image { path }, &mut term)
            .await
            .unwrap_err();

        assert_eq!(err.code, "FILE_CONSTRAINT");
    }

    #[tokio::test]
    async fn local_gateway_does_not_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();
        let service = test::service(&dir);
        let mut term = Terminal::new(Vec::<u8>::new());

        let err = run(&service, Upload::Image { path }, &mut term)
            .await
            .unwrap_err();

        assert_eq!(err.code, "UNSUPPORTED");
    }

    #[tokio::test]
    async fn reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = test::service(&dir);
        let mut term = Terminal::new(Vec::<u8>::new());

        let err = run(
            &service,
            Upload::Video {
                path: dir.path().join("absent.mp4"),
            },
            &mut term,
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, "FILE_READ");
    }
}
