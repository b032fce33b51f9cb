//! Form field elements
//!
//! Each variant bridges one semantic form value to one driver element and
//! turns "set this field to X" into the primitive UI actions the widget
//! needs. Setters never touch the UI when the field already holds the
//! target value.

use std::fmt::Debug;
use std::str::FromStr;
use std::sync::Arc;

use crate::element::{Clipboard, UIElement};
use crate::errors::FormError;
use crate::types::{FieldValue, SendMethod, TextInput, PASTE_KEY};

mod check;
mod combo;
mod edit;
mod password;
mod radio;

pub use check::CheckElement;
pub use combo::{ComboElement, ComboElementBuilder, ComboStrategy};
pub use edit::{EditElement, EditElementBuilder};
pub use password::{PasswordElement, PasswordElementBuilder};
pub use radio::RadioElement;

/// One field of a form.
pub trait FieldElement: Send + Sync + Debug {
    /// Reads the value the widget currently shows.
    fn value(&self) -> Result<FieldValue, FormError>;

    /// Drives the widget to `value`.
    fn set_value(&self, value: &FieldValue) -> Result<(), FormError>;

    /// Whether values of this field may appear in logs.
    fn show_in_log(&self) -> bool;

    /// Whether the form verifies this field after filling.
    fn allow_check(&self) -> bool;

    /// Short widget name used in log lines.
    fn kind(&self) -> &'static str;

    /// Clipboard this field pastes through, if any.
    fn clipboard(&self) -> Option<&Arc<dyn Clipboard>> {
        None
    }
}

/// Where an edit box keeps the value it displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueSource {
    #[default]
    Value,
    Name,
    TextValue,
}

impl FromStr for ValueSource {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "value" => Ok(ValueSource::Value),
            "name" => Ok(ValueSource::Name),
            "text_value" => Ok(ValueSource::TextValue),
            other => Err(FormError::InvalidArgument(format!(
                "unknown value source '{other}', expected one of: value, name, text_value"
            ))),
        }
    }
}

/// How an edit box is emptied before writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearStrategy {
    /// Press each key combination in order.
    Keys(Vec<String>),
    /// Assign the empty string directly.
    SetEmpty,
    /// Leave the content alone.
    Nothing,
}

impl Default for ClearStrategy {
    fn default() -> Self {
        ClearStrategy::Keys(vec!["CTRL+A".to_string(), "DEL".to_string()])
    }
}

impl FromStr for ClearStrategy {
    type Err = FormError;

    /// Accepts `keys`, `set_empty`, `none`, or a comma separated list of
    /// key combinations such as `CTRL+A,BACKSPACE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keys" | "default" => Ok(ClearStrategy::default()),
            "set_empty" => Ok(ClearStrategy::SetEmpty),
            "none" => Ok(ClearStrategy::Nothing),
            "" => Err(FormError::InvalidArgument(
                "clear strategy must not be empty".to_string(),
            )),
            _ => s
                .split(',')
                .map(parse_key_combination)
                .collect::<Option<Vec<_>>>()
                .map(ClearStrategy::Keys)
                .ok_or_else(|| {
                    FormError::InvalidArgument(format!(
                        "unknown clear strategy '{}', expected one of: keys, set_empty, none, \
                         or a list of keys such as CTRL+A,DEL",
                        s.trim()
                    ))
                }),
        }
    }
}

/// Key names accepted in a clear key list, besides single letters, digits
/// and `F1` to `F12`.
const KEY_NAMES: &[&str] = &[
    "CTRL", "ALT", "SHIFT", "WIN", "DEL", "DELETE", "BACKSPACE", "HOME", "END", "LEFT", "RIGHT",
    "UP", "DOWN", "ENTER", "ESC", "TAB", "SPACE",
];

fn is_key_name(key: &str) -> bool {
    let mut chars = key.chars();
    let single = matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if c.is_ascii_alphanumeric()
    );
    let function_key = key
        .strip_prefix('F')
        .and_then(|n| n.parse::<u8>().ok())
        .is_some_and(|n| (1..=12).contains(&n));
    single || function_key || KEY_NAMES.contains(&key)
}

/// Normalizes `ctrl + a` to `CTRL+A`, or `None` when a part is not a key.
fn parse_key_combination(combination: &str) -> Option<String> {
    let keys: Vec<String> = combination
        .split('+')
        .map(|k| k.trim().to_uppercase())
        .collect();
    keys.iter()
        .all(|k| is_key_name(k))
        .then(|| keys.join("+"))
}

pub(crate) fn expect_text<'a>(kind: &str, value: &'a FieldValue) -> Result<&'a str, FormError> {
    value.as_text().ok_or_else(|| {
        FormError::ValueType(format!("Only text values are allowed for {kind}!"))
    })
}

/// Empties a focused text widget.
pub(crate) fn clear(element: &UIElement, strategy: &ClearStrategy) -> Result<(), FormError> {
    match strategy {
        ClearStrategy::Keys(keys) => {
            for key in keys {
                element.press_key(key)?;
            }
        }
        ClearStrategy::SetEmpty => element.set_raw_value("")?,
        ClearStrategy::Nothing => {}
    }
    Ok(())
}

pub(crate) fn write_text(element: &UIElement, input: &TextInput, text: &str) -> Result<(), FormError> {
    match input.send_method {
        SendMethod::Typing => element.type_text(text, input.action, &input.layout)?,
        SendMethod::Pasting => {
            let clipboard = input.clipboard.as_ref().ok_or_else(|| {
                FormError::InvalidArgument("send method 'pasting' requires a clipboard".to_string())
            })?;
            clipboard.set_text(text)?;
            element.press_key(PASTE_KEY)?;
        }
        SendMethod::Direct => element.set_raw_value(text)?,
    }
    Ok(())
}
