//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /memories` (`?timelineOnly=`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMemoriesParams {
    #[serde(default)]
    pub timeline_only: bool,
}

/// Query parameters for presigned download URLs (`?expiresIn=`).
///
/// Seconds; defaults to [`PresignParams::DEFAULT_EXPIRES_IN`]. The handler
/// rejects `0` and anything above [`PresignParams::MAX_EXPIRES_IN`] with 400.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignParams {
    pub expires_in: Option<u64>,
}

impl PresignParams {
    /// One hour.
    pub const DEFAULT_EXPIRES_IN: u64 = 3600;
    /// Seven days, the longest lifetime SigV4 presigning allows.
    pub const MAX_EXPIRES_IN: u64 = 7 * 24 * 3600;
}
