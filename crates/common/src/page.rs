//! Page content shapes for the browsable media listing.

use serde::{Deserialize, Serialize};

use crate::media::MediaItem;

/// What one page entry displays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PageItemBody {
    /// A media tile backed by a full descriptor.
    Media(MediaItem),
    /// A folder tile grouping further items.
    Folder { title: String },
    /// A free-form HTML block rendered verbatim by the page layer.
    Html(String),
}

/// One entry in the browsable page listing.
///
/// `id` keys the selection mapping; for media tiles it matches the
/// descriptor's id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageItem {
    pub id: String,
    pub body: PageItemBody,
    /// Action name fired when the item is opened, if any.
    pub open_action: Option<String>,
    /// Action names offered in the item's context menu.
    pub popup_actions: Vec<String>,
}

impl PageItem {
    /// Tile for a media descriptor, keyed by the descriptor's id.
    pub fn media(item: MediaItem) -> Self {
        Self {
            id: item.id.clone(),
            body: PageItemBody::Media(item),
            open_action: None,
            popup_actions: Vec::new(),
        }
    }

    /// Folder tile.
    pub fn folder(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: PageItemBody::Folder {
                title: title.into(),
            },
            open_action: None,
            popup_actions: Vec::new(),
        }
    }

    /// Free-form HTML block.
    pub fn html(id: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: PageItemBody::Html(html.into()),
            open_action: None,
            popup_actions: Vec::new(),
        }
    }
}

/// One entry in the user drop-down menu.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    /// Icon class understood by the rendering layer.
    pub icon: Option<String>,
    /// Opaque action name handled by the application shell.
    pub action: Option<String>,
}
