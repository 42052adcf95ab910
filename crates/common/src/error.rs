//! Model invariant errors (thiserror-based).

use thiserror::Error;

/// Violation of a documented record invariant.
///
/// The state store never produces these: it stores records verbatim and
/// performs no validation. The `validate` helpers on `MediaItem` and
/// `Comment` exist for producers and test suites that want to assert the
/// invariants the remote authority is supposed to uphold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("media {media_id}: thumbnail sheet grid given without a sheet reference")]
    SheetDimsWithoutSheet { media_id: String },

    #[error("media {media_id}: thumbnail sheet grid must give both columns and rows")]
    SheetDimsIncomplete { media_id: String },

    #[error("comment {comment_id}: edited timestamp {edited} precedes created {created}")]
    EditedBeforeCreated {
        comment_id: i64,
        created: i64,
        edited: i64,
    },
}

/// Convenience Result type for model validation.
pub type ModelResult<T> = Result<T, ModelError>;
