//! Server-to-user messaging shapes.

use serde::{Deserialize, Serialize};

/// Classifies a [`UserMessage`] for display and routing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserMessageKind {
    /// Confirmation of a completed operation.
    Ok,
    /// Something went wrong; shown prominently.
    Error,
    /// Progress notice for a long-running server-side operation.
    Progress,
    /// A media item the user can see was changed.
    MediaUpdated,
    /// A new media item became visible to the user.
    MediaAdded,
}

/// A user-facing notice from the server, shown in the message list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    /// Server-assigned id; absent for transient messages that were never
    /// persisted.
    pub id: Option<String>,
    pub kind: UserMessageKind,
    /// Short human-readable summary.
    pub message: String,
    /// Expanded detail text, shown on demand.
    pub details: Option<String>,
    /// Creation timestamp, seconds since epoch.
    pub created: Option<i64>,
    /// Whether the user has already seen this message.
    pub seen: bool,
    /// Media item this message refers to, if any.
    pub media_id: Option<String>,
    /// Comment this message refers to, if any.
    pub comment_id: Option<String>,
}

/// Transient processing progress for one media item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Media item the work applies to.
    pub media_id: String,
    /// Human-readable status line.
    pub message: String,
    /// Completion fraction in `0.0..=1.0` when the producer reports one.
    pub progress: Option<f32>,
}
