//! Object key codec.
//!
//! Upload keys look like `memories/{images|videos}/{millis}-{32 hex}.{ext}`.
//! Public URLs use the virtual-hosted S3 shape
//! `https://{bucket}.s3.{region}.amazonaws.com/{key}`; [`url_to_key`] also
//! understands the path-style shape `https://s3.{region}.amazonaws.com/{bucket}/{key}`.

use chrono::Utc;
use keepsake_core::media::MediaType;
use regex::Regex;
use url::Url;

use crate::StorageError;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Prefix every upload key starts with.
pub const UPLOAD_ROOT: &str = "memories";

/// MIME type for anything not in the extension table.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

const CONTENT_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("webm", "video/webm"),
];

/// Lower-cased extension of `file_name`, if it has a usable one.
///
/// Only ASCII alphanumeric extensions are kept so generated keys stay
/// URL-safe.
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// MIME type for `file_name` based on its extension.
pub fn content_type_of(file_name: &str) -> &'static str {
    file_extension(file_name)
        .and_then(|ext| {
            CONTENT_TYPES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}

/// Collision-resistant object name that keeps the original extension.
///
/// `{unix millis}-{128 random bits as hex}[.{ext}]`
pub fn generate_unique_key(original_name: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let random: u128 = rand::random();
    match file_extension(original_name) {
        Some(ext) => format!("{millis}-{random:032x}.{ext}"),
        None => format!("{millis}-{random:032x}"),
    }
}

/// Full upload key for a new object of the given kind.
pub fn upload_key(media_type: MediaType, original_name: &str) -> String {
    format!(
        "{UPLOAD_ROOT}/{}/{}",
        media_type.folder(),
        generate_unique_key(original_name)
    )
}

/// Reject keys that cannot address an object in the bucket.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey("key must not be empty".into()));
    }
    if key.starts_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "'{key}' must not start with '/'"
        )));
    }
    if key.split('/').any(|segment| segment == "..") {
        return Err(StorageError::InvalidKey(format!(
            "'{key}' must not contain '..' segments"
        )));
    }
    Ok(())
}

/// Percent-encode every segment of `key`, keeping the `/` separators.
pub fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Virtual-hosted public URL of `key`.
pub fn public_url(bucket: &str, region: &str, key: &str) -> String {
    format!(
        "https://{bucket}.s3.{region}.amazonaws.com/{}",
        encode_key(key)
    )
}

/// Recover the object key from an S3 URL.
///
/// Tries a structured parse of the two known hostname shapes first and
/// falls back to a pattern match on `amazonaws.com/[bucket/]key`.
pub fn url_to_key(url: &str, bucket: &str) -> Result<String, StorageError> {
    if let Some(key) = structured_key(url, bucket) {
        return Ok(key);
    }

    tracing::debug!(url, "Structured S3 URL parse failed, trying pattern match");
    pattern_key(url, bucket).ok_or_else(|| StorageError::InvalidUrl(url.to_string()))
}

fn structured_key(url: &str, bucket: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    if !host.contains("amazonaws.com") {
        return None;
    }

    // `Url` normalizes `.` segments away, so read the path from the raw text.
    let path = raw_path(url)?.strip_prefix('/')?;

    let encoded = if host.starts_with(&format!("{bucket}.s3")) {
        path
    } else if host.starts_with("s3.") {
        let (first, rest) = path.split_once('/')?;
        if first != bucket {
            return None;
        }
        rest
    } else {
        return None;
    };

    decode_key(encoded)
}

/// Path component exactly as written: after the authority, before any
/// query or fragment.
fn raw_path(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let path = &rest[rest.find('/')?..];
    let end = path.find(['?', '#']).unwrap_or(path.len());
    Some(&path[..end])
}

fn pattern_key(url: &str, bucket: &str) -> Option<String> {
    let pattern = format!(
        r"^https://.*?amazonaws\.com/(?:{}/)?([^?#]+)",
        regex::escape(bucket)
    );
    let re = Regex::new(&pattern).ok()?;
    let captures = re.captures(url)?;
    decode_key(captures.get(1)?.as_str())
}

fn decode_key(encoded: &str) -> Option<String> {
    let key = urlencoding::decode(encoded).ok()?.into_owned();
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}
