//! Server-advertised action definitions.

use serde::{Deserialize, Serialize};

/// Presentation hints for an action (menu label, icon, shortcut).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionUiProps {
    pub label: Option<String>,
    /// Icon class understood by the rendering layer.
    pub icon: Option<String>,
    pub key_shortcut: Option<String>,
    /// Natural-language description, used for tooltips.
    pub natural_desc: Option<String>,
}

/// Client-executable call attached to an action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptCall {
    /// Script language tag as sent by the server.
    pub lang: String,
    pub code: String,
}

/// A server-advertised user action. Stored opaquely by the client core and
/// dispatched by the shell layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionDef {
    pub ui_props: ActionUiProps,
    pub action: Option<ScriptCall>,
}
