//! `cn-common` — Shared domain types for the Clipnote client core.
//!
//! This crate is the structural contract between the network/event layer
//! that produces data and the state store and rendering layer that consume
//! it. It defines the record shapes, no behavior beyond small helpers:
//!
//! - **Media**: `MediaItem` (one asset's descriptor as fetched from the server)
//! - **Comments**: `Comment`, `IndentedComment`, `indent_comment_tree` (thread flattening)
//! - **Messaging**: `UserMessage`, `UserMessageKind`, `ProgressReport`
//! - **Pages**: `PageItem`, `PageItemBody`, `MenuItem` (browsable listing entries)
//! - **Actions**: `ActionDef`, `ActionUiProps`, `ScriptCall` (server-advertised actions)
//! - **Errors**: `ModelError` (thiserror-based, validation helpers only)
//!
//! All shapes are plain serde-derived data. Anything malformed is rejected
//! or sanitized by the fetch layer before it gets here; nothing in this
//! crate performs I/O.

pub mod action;
pub mod comment;
pub mod error;
pub mod media;
pub mod message;
pub mod page;

// Re-export commonly used items at crate root
pub use action::{ActionDef, ActionUiProps, ScriptCall};
pub use comment::{indent_comment_tree, Comment, IndentedComment};
pub use error::{ModelError, ModelResult};
pub use media::MediaItem;
pub use message::{ProgressReport, UserMessage, UserMessageKind};
pub use page::{MenuItem, PageItem, PageItemBody};
