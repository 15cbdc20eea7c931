//! Uploaded media definitions.

use std::path::Path;

use derive_more::{AsRef, Debug, Display, Error, From, Into};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Kind of an uploaded media.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum MediaKind {
    /// Still image.
    #[display("image")]
    Image,

    /// Video clip.
    #[display("video")]
    Video,
}

/// File to be uploaded.
#[derive(Clone, Debug)]
pub struct File {
    /// Name of this [`File`], including its extension.
    pub name: String,

    /// MIME type of this [`File`].
    pub content_type: String,

    /// Contents of this [`File`].
    #[debug("{} bytes", bytes.len())]
    pub bytes: Vec<u8>,
}

impl File {
    /// Creates a new [`File`], inferring its MIME type from the extension of
    /// the provided `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let content_type = content_type_of(&name).to_owned();
        Self {
            name,
            content_type,
            bytes,
        }
    }

    /// Returns the size of this [`File`] in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// [`File`] uploaded as a specific [`MediaKind`].
#[derive(Clone, Debug)]
pub struct Media {
    /// [`MediaKind`] of this [`Media`].
    pub kind: MediaKind,

    /// Uploaded [`File`].
    pub file: File,
}

/// URL of an uploaded [`File`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Url(String);

/// Client-side constraints checked before uploading a [`File`].
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Policy {
    /// Maximum size of an image in bytes.
    #[default(5 * 1024 * 1024)]
    pub max_image_size: u64,

    /// Maximum size of a video in bytes.
    #[default(50 * 1024 * 1024)]
    pub max_video_size: u64,

    /// MIME types accepted for images.
    #[default(vec![
        "image/jpeg".into(),
        "image/png".into(),
        "image/webp".into(),
    ])]
    pub image_types: Vec<String>,

    /// MIME types accepted for videos.
    #[default(vec![
        "video/mp4".into(),
        "video/avi".into(),
        "video/mov".into(),
    ])]
    pub video_types: Vec<String>,
}

impl Policy {
    /// Checks whether the provided [`File`] may be uploaded as the `kind` of
    /// media.
    ///
    /// # Errors
    ///
    /// With a [`ConstraintError`] describing the violated constraint.
    pub fn check(
        &self,
        file: &File,
        kind: MediaKind,
    ) -> Result<(), ConstraintError> {
        if file.bytes.is_empty() {
            return Err(ConstraintError::Empty);
        }

        let (limit, types) = match kind {
            MediaKind::Image => (self.max_image_size, &self.image_types),
            MediaKind::Video => (self.max_video_size, &self.video_types),
        };

        if file.size() > limit {
            return Err(ConstraintError::TooLarge { kind, limit });
        }
        if !types.iter().any(|t| t.eq_ignore_ascii_case(&file.content_type)) {
            return Err(ConstraintError::UnsupportedType {
                kind,
                content_type: file.content_type.clone(),
            });
        }

        Ok(())
    }
}

/// Violation of an upload [`Policy`].
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum ConstraintError {
    /// [`File`] has no contents.
    #[display("File cannot be empty")]
    Empty,

    /// [`File`] exceeds the size limit of its [`MediaKind`].
    #[display("The {kind} size cannot exceed {}", format_size(*limit))]
    TooLarge {
        /// [`MediaKind`] the [`File`] was uploaded as.
        kind: MediaKind,

        /// Size limit in bytes.
        limit: u64,
    },

    /// [`File`] MIME type isn't accepted for its [`MediaKind`].
    #[display("Unsupported {kind} format `{content_type}`")]
    UnsupportedType {
        /// [`MediaKind`] the [`File`] was uploaded as.
        kind: MediaKind,

        /// Rejected MIME type.
        content_type: String,
    },
}

/// Infers the MIME type of a file by the extension of its `name`.
#[must_use]
pub fn content_type_of(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "mp4" => "video/mp4",
        "avi" => "video/avi",
        "mov" => "video/mov",
        _ => "application/octet-stream",
    }
}

/// Formats the provided amount of `bytes` for humans, like `1.5 MB`.
#[expect(clippy::cast_precision_loss, reason = "display only")]
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".into();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let rounded = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{rounded} {}", UNITS[unit])
}

#[cfg(test)]
mod spec {
    use super::{
        content_type_of, format_size, ConstraintError, File, MediaKind, Policy,
    };

    #[test]
    fn formats_sizes() {
        assert_eq!(format_size(0), "0 Bytes");
        assert_eq!(format_size(512), "512 Bytes");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn infers_content_type() {
        assert_eq!(content_type_of("photo.JPG"), "image/jpeg");
        assert_eq!(content_type_of("tour.mov"), "video/mov");
        assert_eq!(content_type_of("notes"), "application/octet-stream");
    }

    #[test]
    fn accepts_valid_image() {
        let file = File::new("room.png", vec![1; 1024]);

        assert_eq!(Policy::default().check(&file, MediaKind::Image), Ok(()));
    }

    #[test]
    fn rejects_empty_file() {
        let file = File::new("room.png", vec![]);

        assert_eq!(
            Policy::default().check(&file, MediaKind::Image),
            Err(ConstraintError::Empty),
        );
    }

    #[test]
    fn rejects_oversized_image() {
        let file = File::new("room.png", vec![0; 5 * 1024 * 1024 + 1]);

        let err = Policy::default()
            .check(&file, MediaKind::Image)
            .unwrap_err();

        assert_eq!(err.to_string(), "The image size cannot exceed 5 MB");
    }

    #[test]
    fn rejects_wrong_type() {
        let file = File::new("tour.mp4", vec![1; 16]);

        assert!(matches!(
            Policy::default().check(&file, MediaKind::Image),
            Err(ConstraintError::UnsupportedType { .. }),
        ));
        assert_eq!(Policy::default().check(&file, MediaKind::Video), Ok(()));
    }
}
