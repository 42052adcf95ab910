//! The shared client state store: every observable cell in one place.

use std::collections::HashMap;
use std::rc::Rc;

use cn_common::{ActionDef, IndentedComment, MenuItem, PageItem, ProgressReport, UserMessage};

use crate::cell::Cell;

/// Placeholder shown as the media title until a real one is loaded.
pub const NO_MEDIA_TITLE: &str = "(no video loaded)";

/// The single in-memory source of truth for everything the client renders.
///
/// One instance is constructed at application start and threaded explicitly
/// (usually as [`SharedClientState`]) to every component. The network/event
/// layer writes server-sourced cells, the rendering layer observes them, and
/// user-driven components write selection and menu state. Each cell is
/// independent: writes replace the value wholesale and notify only that
/// cell's observers.
///
/// There is deliberately no multi-cell transaction primitive. Callers
/// coordinating related cells must order their writes so observers never
/// see an inconsistent combination; the documented cases are noted on the
/// fields below.
#[derive(Debug)]
pub struct ClientState {
    // --- Current media ---
    /// URL the player streams from.
    pub playback_url: Cell<Option<String>>,
    /// Download URL of the original uploaded file.
    pub orig_file_url: Cell<Option<String>>,
    /// Id of the media item on the player page. Caller contract: reset
    /// `media_ready` to `false` before publishing a new id; this store does
    /// not couple the two cells.
    pub cur_media_id: Cell<Option<String>>,
    /// Frame rate of the current media, when known.
    pub cur_media_fps: Cell<Option<f64>>,
    /// Title of the current media. Starts at [`NO_MEDIA_TITLE`], never
    /// empty.
    pub cur_media_title: Cell<String>,
    /// Whether the current media is ready to play. Meaningful only
    /// relative to `cur_media_id`; see the contract there.
    pub media_ready: Cell<bool>,

    // --- Page content ---
    /// Items of the page being browsed, in display order.
    pub page_items: Cell<Vec<PageItem>>,
    /// Id of the page being browsed.
    pub cur_page_id: Cell<Option<String>>,
    /// Tiles the user has multi-selected, keyed by page-item id. Keys are a
    /// subset of `page_items` ids at selection time, but they are not
    /// pruned when `page_items` changes; stale selections persist until a
    /// component clears them.
    pub selected_tiles: Cell<HashMap<String, PageItem>>,

    // --- Session & user ---
    /// Display name of the signed-in user.
    pub cur_username: Cell<Option<String>>,
    /// Id of the signed-in user.
    pub cur_user_id: Cell<Option<String>>,
    /// Whether the signed-in user has admin rights.
    pub cur_user_is_admin: Cell<bool>,
    /// Avatar image reference of the signed-in user.
    pub cur_user_pic: Cell<Option<String>>,
    /// Collaboration session id when co-viewing, unset otherwise.
    pub collab_id: Cell<Option<String>>,
    /// Entries of the user drop-down menu.
    pub user_menu_items: Cell<Vec<MenuItem>>,

    // --- Comments ---
    /// Render-ready comment thread of the current media, indented.
    pub comments: Cell<Vec<IndentedComment>>,

    // --- Notices ---
    /// Recent processing progress, newest last. The producing event layer
    /// maintains the window size.
    pub progress_reports: Cell<Vec<ProgressReport>>,
    /// Messages from the server awaiting the user's attention.
    pub user_messages: Cell<Vec<UserMessage>>,
    /// Connection and server error notices, rendered as a banner list.
    /// This is a sink: the store never interprets the strings.
    pub connection_errors: Cell<Vec<String>>,

    // --- Server-advertised UI ---
    /// Actions the server advertises for the current page, keyed by action
    /// name.
    pub server_actions: Cell<HashMap<String, ActionDef>>,
}

/// How components usually hold the store.
pub type SharedClientState = Rc<ClientState>;

impl ClientState {
    /// Create the store with its documented defaults: every optional cell
    /// unset, sequences and mappings empty, flags false, and the media
    /// title at its placeholder.
    pub fn new() -> Self {
        tracing::debug!("Client state store created");
        Self {
            playback_url: Cell::new("playback_url", None),
            orig_file_url: Cell::new("orig_file_url", None),
            cur_media_id: Cell::new("cur_media_id", None),
            cur_media_fps: Cell::new("cur_media_fps", None),
            cur_media_title: Cell::new("cur_media_title", NO_MEDIA_TITLE.to_string()),
            media_ready: Cell::new("media_ready", false),
            page_items: Cell::new("page_items", Vec::new()),
            cur_page_id: Cell::new("cur_page_id", None),
            selected_tiles: Cell::new("selected_tiles", HashMap::new()),
            cur_username: Cell::new("cur_username", None),
            cur_user_id: Cell::new("cur_user_id", None),
            cur_user_is_admin: Cell::new("cur_user_is_admin", false),
            cur_user_pic: Cell::new("cur_user_pic", None),
            collab_id: Cell::new("collab_id", None),
            user_menu_items: Cell::new("user_menu_items", Vec::new()),
            comments: Cell::new("comments", Vec::new()),
            progress_reports: Cell::new("progress_reports", Vec::new()),
            user_messages: Cell::new("user_messages", Vec::new()),
            connection_errors: Cell::new("connection_errors", Vec::new()),
            server_actions: Cell::new("server_actions", HashMap::new()),
        }
    }

    /// Create the store already wrapped for sharing.
    pub fn new_shared() -> SharedClientState {
        Rc::new(Self::new())
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use cn_common::Comment;

    fn make_comment(id: i64, created: i64, edited: Option<i64>) -> Comment {
        Comment {
            id,
            media_id: "m1".to_string(),
            parent_id: None,
            created,
            edited,
            user_id: "alice".to_string(),
            username: "Alice".to_string(),
            comment: "hi".to_string(),
            timecode: None,
            drawing: None,
        }
    }

    #[test]
    fn initial_state_matches_documented_defaults() {
        let state = ClientState::new();
        assert_eq!(state.cur_media_title.get(), "(no video loaded)");
        assert!(state.selected_tiles.get().is_empty());
        assert_eq!(state.playback_url.get(), None);
        assert_eq!(state.cur_media_id.get(), None);
        assert_eq!(state.cur_media_fps.get(), None);
        assert!(!state.media_ready.get());
        assert!(!state.cur_user_is_admin.get());
        assert!(state.page_items.get().is_empty());
        assert!(state.comments.get().is_empty());
        assert!(state.user_messages.get().is_empty());
        assert!(state.progress_reports.get().is_empty());
        assert!(state.connection_errors.get().is_empty());
        assert!(state.user_menu_items.get().is_empty());
        assert!(state.server_actions.get().is_empty());
        assert_eq!(state.cur_page_id.get(), None);
        assert_eq!(state.cur_username.get(), None);
        assert_eq!(state.cur_user_id.get(), None);
        assert_eq!(state.cur_user_pic.get(), None);
        assert_eq!(state.collab_id.get(), None);
        assert_eq!(state.orig_file_url.get(), None);
    }

    #[test]
    fn default_is_new() {
        let state = ClientState::default();
        assert_eq!(state.cur_media_title.get(), NO_MEDIA_TITLE);
    }

    #[test]
    fn title_write_reads_back_exactly() {
        let state = ClientState::new();
        state.cur_media_title.set("Intro.mp4".to_string());
        assert_eq!(state.cur_media_title.get(), "Intro.mp4");
    }

    #[test]
    fn selections_are_not_pruned_when_page_items_change() {
        let state = ClientState::new();
        let tile = PageItem::folder("vid123", "Reel one");
        state.page_items.set(vec![tile.clone()]);
        state.selected_tiles.update(|sel| {
            sel.insert("vid123".to_string(), tile.clone());
        });

        // The page moves on; the selection deliberately does not.
        state
            .page_items
            .set(vec![PageItem::folder("vid999", "Reel two")]);
        assert!(state.selected_tiles.get().contains_key("vid123"));

        // Until a component clears it explicitly.
        state.selected_tiles.set(HashMap::new());
        assert!(state.selected_tiles.get().is_empty());
    }

    #[test]
    fn store_keeps_invalid_comment_records_verbatim() {
        // edited < created violates the upstream invariant; the store must
        // not re-validate or repair.
        let bad = make_comment(1, 1000, Some(900));
        assert!(bad.validate().is_err());

        let state = ClientState::new();
        state.comments.set(vec![IndentedComment {
            comment: bad.clone(),
            indent: 0,
        }]);
        assert_eq!(state.comments.get()[0].comment, bad);
    }

    #[test]
    fn media_switch_contract_keeps_observers_consistent() {
        let state = Rc::new(ClientState::new());
        state.media_ready.set(true);
        state.cur_media_id.set(Some("old".to_string()));

        // An observer of the media id must never see a new id with stale
        // readiness, provided the caller follows the documented order.
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = state.cur_media_id.subscribe({
            let state = Rc::clone(&state);
            let seen = Rc::clone(&seen);
            move |id: &Option<String>| {
                seen.borrow_mut().push((id.clone(), state.media_ready.get()));
            }
        });

        // Documented order: readiness down first, then the new id.
        state.media_ready.set(false);
        state.cur_media_id.set(Some("new".to_string()));
        state.media_ready.set(true);

        assert_eq!(
            *seen.borrow(),
            vec![
                (Some("old".to_string()), true),  // initial notification
                (Some("new".to_string()), false), // id change with readiness reset
            ]
        );
    }
}
