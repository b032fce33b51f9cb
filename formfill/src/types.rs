//! Common types shared by the field elements and the driver contract

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::element::Clipboard;
use crate::errors::FormError;

/// The value a form field holds: text for edits and combos, a flag for
/// check boxes and radio buttons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// How the driver activates an element before acting on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusMode {
    /// Driver default focus.
    #[default]
    Default,
    /// Activate with a mouse click.
    Mouse,
    /// Do not activate the element.
    None,
}

impl FromStr for FocusMode {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(FocusMode::Default),
            "mouse" => Ok(FocusMode::Mouse),
            "none" => Ok(FocusMode::None),
            other => Err(FormError::InvalidArgument(format!(
                "unknown focus mode '{other}', expected one of: default, mouse, none"
            ))),
        }
    }
}

/// Keystroke simulation mode used when typing text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAction {
    HwAltCode,
    HwScanVirtual,
    StandardAltCode,
    StandardScanVirtual,
    #[default]
    WmChar,
}

impl FromStr for TextAction {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hw_alt_code" => Ok(TextAction::HwAltCode),
            "hw_scan_virtual" => Ok(TextAction::HwScanVirtual),
            "standard_alt_code" => Ok(TextAction::StandardAltCode),
            "standard_scan_virtual" => Ok(TextAction::StandardScanVirtual),
            "wm_char" => Ok(TextAction::WmChar),
            other => Err(FormError::InvalidArgument(format!(
                "unknown text action '{other}'"
            ))),
        }
    }
}

/// Keyboard layout identifier handed to the driver, e.g. `00000409` for US English.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardLayout(pub String);

impl Default for KeyboardLayout {
    fn default() -> Self {
        KeyboardLayout("00000409".to_string())
    }
}

impl fmt::Display for KeyboardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mechanism used to deliver a string into a widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendMethod {
    /// Simulated keystrokes.
    #[default]
    Typing,
    /// Put the text on the clipboard and send the paste shortcut.
    Pasting,
    /// Assign the value directly, bypassing simulated input.
    Direct,
}

impl FromStr for SendMethod {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "writing" | "typing" => Ok(SendMethod::Typing),
            "pasting" => Ok(SendMethod::Pasting),
            "direct" => Ok(SendMethod::Direct),
            other => Err(FormError::InvalidArgument(format!(
                "unknown send method '{other}', expected one of: writing, pasting, direct"
            ))),
        }
    }
}

/// Key combination sent after filling the clipboard.
pub const PASTE_KEY: &str = "CTRL+V";

/// Text-input configuration shared by the elements that write strings.
///
/// Everything except the send method is passed to the driver as-is.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub send_method: SendMethod,
    pub action: TextAction,
    pub layout: KeyboardLayout,
    pub clipboard: Option<Arc<dyn Clipboard>>,
}

impl TextInput {
    /// Ensures the configuration is usable: pasting needs a clipboard.
    pub(crate) fn validate(&self) -> Result<(), FormError> {
        if self.send_method == SendMethod::Pasting && self.clipboard.is_none() {
            return Err(FormError::InvalidArgument(
                "send method 'pasting' requires a clipboard".to_string(),
            ));
        }
        Ok(())
    }

    /// Clipboard the text travels through, if this input pastes.
    pub(crate) fn paste_clipboard(&self) -> Option<&Arc<dyn Clipboard>> {
        match self.send_method {
            SendMethod::Pasting => self.clipboard.as_ref(),
            _ => None,
        }
    }
}
