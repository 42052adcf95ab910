//! `cn-client-state` — Shared reactive state store for the Clipnote client.
//!
//! The single in-memory source of truth for everything the client renders:
//!
//! - `Cell<T>`: one observable slot (get / set / update / subscribe),
//!   synchronous push notification in registration order
//! - `Subscription`: scoped observer registration, unregisters on drop
//! - `ClientState`: the full enumeration of cells (current media, page
//!   content, session/user info, comments, notices, server actions)
//!
//! Everything runs on one thread: cells are `Rc`-based handles with
//! `RefCell` interiors and are neither `Send` nor `Sync`. The network/event
//! layer writes cells, the rendering layer observes them; this crate does
//! no I/O, no parsing, and no validation of the values passing through.

pub mod cell;
pub mod store;

// Re-export commonly used items at crate root
pub use cell::{Cell, Subscription};
pub use store::{ClientState, SharedClientState, NO_MEDIA_TITLE};
