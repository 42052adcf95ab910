//! Media item descriptor as received from the remote source of truth.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// One media asset and its processing/display metadata.
///
/// Mirrors the flat wire shape: every optional field is independently
/// absent, and nothing about one field may be inferred from another except
/// the thumbnail-sheet invariant checked by [`MediaItem::validate`].
/// Instances are immutable once constructed; a re-fetch produces a new
/// instance rather than mutating in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Stable opaque identifier, unique per asset.
    pub id: String,
    /// Uploader user id. Paired with `added_by_username` by convention;
    /// both absent means an anonymous upload.
    pub added_by_user_id: Option<String>,
    /// Uploader display name.
    pub added_by_username: Option<String>,
    /// Creation timestamp, seconds since epoch.
    pub added_time: i64,
    /// Post-processing marker. Presence implies a terminal processing state.
    pub recompression_done: Option<String>,
    /// Filename at upload time.
    pub orig_filename: Option<String>,
    /// Total frame count, absent if unknown.
    pub total_frames: Option<u64>,
    /// Duration in seconds, absent if unknown.
    pub duration: Option<f64>,
    /// Frame rate as provided by the server. Kept as a string because
    /// source rates may be non-integer ratios (e.g. "30000/1001").
    pub fps: Option<String>,
    /// Opaque serialized technical metadata.
    pub raw_metadata: Option<String>,
    /// User-facing title.
    pub title: Option<String>,
    /// Thumbnail image reference.
    pub thumb_url: Option<String>,
    /// Thumbnail-sheet image reference.
    pub thumb_sheet_url: Option<String>,
    /// Sheet grid columns. Only meaningful together with `thumb_sheet_url`.
    pub thumb_sheet_cols: Option<u32>,
    /// Sheet grid rows. Only meaningful together with `thumb_sheet_url`.
    pub thumb_sheet_rows: Option<u32>,
}

impl MediaItem {
    /// Check the thumbnail-sheet invariant: grid dimensions must come as a
    /// pair and only alongside a sheet reference.
    ///
    /// Nothing enforces this at construction or store-write time; the remote
    /// authority is responsible for it. Producer test suites call this to
    /// assert they never violate it locally.
    pub fn validate(&self) -> ModelResult<()> {
        let has_dims = self.thumb_sheet_cols.is_some() || self.thumb_sheet_rows.is_some();
        if has_dims && self.thumb_sheet_url.is_none() {
            return Err(ModelError::SheetDimsWithoutSheet {
                media_id: self.id.clone(),
            });
        }
        if self.thumb_sheet_cols.is_some() != self.thumb_sheet_rows.is_some() {
            return Err(ModelError::SheetDimsIncomplete {
                media_id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Title shown in listings: explicit title, else the original filename,
    /// else the bare id.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.orig_filename.as_deref())
            .unwrap_or(&self.id)
    }
}
