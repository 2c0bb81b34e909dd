//! Media item kinds and the MIME-type rules that decide between them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kind of a media item attached to a memory.
///
/// Serialized as `"IMAGE"` / `"VIDEO"` on the wire and stored the same way
/// in the `media.media_type` column (guarded by a CHECK constraint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => "IMAGE",
            MediaType::Video => "VIDEO",
        }
    }

    /// Classify an upload by its MIME type.
    ///
    /// Anything that is not `image/*` is treated as video, matching the
    /// two upload folders (`images`, `videos`).
    pub fn from_mime(mime: &str) -> Self {
        if mime.to_ascii_lowercase().starts_with("image/") {
            MediaType::Image
        } else {
            MediaType::Video
        }
    }

    /// Upload folder name under `memories/`.
    pub fn folder(self) -> &'static str {
        match self {
            MediaType::Image => "images",
            MediaType::Video => "videos",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for MediaType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "IMAGE" => Ok(MediaType::Image),
            "VIDEO" => Ok(MediaType::Video),
            other => Err(CoreError::Validation(format!(
                "Invalid media type '{other}'. Must be one of: IMAGE, VIDEO"
            ))),
        }
    }
}
