//! Declarative form definitions
//!
//! A form can be described in JSON and turned into a ready [`Form`]:
//!
//! ```json
//! {
//!   "form_id": "login",
//!   "attempts": 3,
//!   "delay_ms": 100,
//!   "fields": [
//!     { "element": "user", "kind": "edit", "value": "John Doe" },
//!     { "element": "pass", "kind": "password", "send_method": "pasting", "value": "1234" },
//!     { "element": "date", "kind": "edit", "default_value": "  .  .    ",
//!       "value": ["1.1.2024", "01.01.2024"] }
//!   ]
//! }
//! ```
//!
//! `value` is either a single string or boolean, or an array holding the
//! value to write followed by an optional value to verify against.
//! Locating the elements is left to the caller through a resolver.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::element::{Clipboard, UIElement};
use crate::errors::{AutomationError, FormError};
use crate::fields::{
    CheckElement, ClearStrategy, ComboElement, ComboStrategy, EditElement, FieldElement,
    PasswordElement, RadioElement, ValueSource,
};
use crate::form::{Binding, Form, DEFAULT_ATTEMPTS, DEFAULT_FORM_ID};
use crate::types::{FieldValue, FocusMode, KeyboardLayout, SendMethod, TextAction};

fn default_form_id() -> String {
    DEFAULT_FORM_ID.to_string()
}

fn default_attempts() -> u32 {
    DEFAULT_ATTEMPTS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormConfig {
    #[serde(default = "default_form_id")]
    pub form_id: String,
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// One field of a [`FormConfig`]. Options that do not apply to the field
/// kind are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    /// Key handed to the resolver to obtain the driver element.
    pub element: String,
    /// One of `edit`, `password`, `check`, `radio`, `combo`.
    pub kind: String,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_in_log: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_check: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyboard_layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

/// Widget kinds a field can be declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Edit,
    Password,
    Check,
    Radio,
    Combo,
}

impl FromStr for FieldKind {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "edit" => Ok(FieldKind::Edit),
            "password" => Ok(FieldKind::Password),
            "check" => Ok(FieldKind::Check),
            "radio" => Ok(FieldKind::Radio),
            "combo" => Ok(FieldKind::Combo),
            other => Err(FormError::InvalidArgument(format!(
                "unknown field kind '{other}', expected one of: edit, password, check, radio, combo"
            ))),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Edit => "edit",
            FieldKind::Password => "password",
            FieldKind::Check => "check",
            FieldKind::Radio => "radio",
            FieldKind::Combo => "combo",
        };
        f.write_str(name)
    }
}

fn parse<T: FromStr<Err = FormError>>(option: &Option<String>) -> Result<Option<T>, FormError> {
    option.as_deref().map(str::parse).transpose()
}

impl FormConfig {
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Builds the form, asking `resolve` for the driver element of each field.
    ///
    /// `clipboard` is required only by fields that paste.
    pub fn build<R>(
        &self,
        mut resolve: R,
        clipboard: Option<Arc<dyn Clipboard>>,
    ) -> Result<Form, FormError>
    where
        R: FnMut(&str) -> Result<UIElement, AutomationError>,
    {
        let mut form = Form::new(self.form_id.clone())
            .with_attempts(self.attempts)
            .with_delay(Duration::from_millis(self.delay_ms));

        for field in &self.fields {
            let element = resolve(&field.element)?;
            let values = field.values()?;
            let built = field.build_element(element, clipboard.clone())?;
            debug!(element = %field.element, kind = %field.kind, "Built form field");
            form.add(Binding::from_values(built, values)?);
        }
        Ok(form)
    }
}

impl FieldConfig {
    pub fn kind(&self) -> Result<FieldKind, FormError> {
        self.kind.parse()
    }

    /// Write value followed by the optional verify value.
    pub fn values(&self) -> Result<Vec<FieldValue>, FormError> {
        match &self.value {
            Value::Array(items) => items.iter().map(|v| scalar(&self.element, v)).collect(),
            other => Ok(vec![scalar(&self.element, other)?]),
        }
    }

    fn reject(&self, kind: FieldKind, options: &[(&str, bool)]) -> Result<(), FormError> {
        match options.iter().find(|(_, present)| *present) {
            Some((name, _)) => Err(FormError::InvalidArgument(format!(
                "option '{name}' does not apply to {kind} field '{}'",
                self.element
            ))),
            None => Ok(()),
        }
    }

    fn build_element(
        &self,
        element: UIElement,
        clipboard: Option<Arc<dyn Clipboard>>,
    ) -> Result<Box<dyn FieldElement>, FormError> {
        let kind = self.kind()?;
        let focus: FocusMode = parse(&self.focus)?.unwrap_or_default();
        let send_method: SendMethod = parse(&self.send_method)?.unwrap_or_default();
        let text_action: TextAction = parse(&self.text_action)?.unwrap_or_default();
        let layout = self
            .keyboard_layout
            .clone()
            .map(KeyboardLayout)
            .unwrap_or_default();
        let clear: Option<ClearStrategy> = parse(&self.clear)?;

        let field: Box<dyn FieldElement> = match kind {
            FieldKind::Edit => {
                self.reject(kind, &[("strategy", self.strategy.is_some())])?;
                let mut builder = EditElement::builder(element)
                    .show_in_log(self.show_in_log.unwrap_or(true))
                    .allow_check(self.allow_check.unwrap_or(true))
                    .value_source(parse::<ValueSource>(&self.value_source)?.unwrap_or_default())
                    .clear_strategy(clear.unwrap_or_default())
                    .default_value(self.default_value.as_deref().unwrap_or_default())
                    .focus_mode(focus)
                    .send_method(send_method)
                    .text_action(text_action)
                    .keyboard_layout(layout);
                if let Some(clipboard) = clipboard {
                    builder = builder.clipboard(clipboard);
                }
                Box::new(builder.build()?)
            }
            FieldKind::Password => {
                self.reject(
                    kind,
                    &[
                        ("allow_check", self.allow_check.is_some()),
                        ("value_source", self.value_source.is_some()),
                        ("default_value", self.default_value.is_some()),
                        ("strategy", self.strategy.is_some()),
                    ],
                )?;
                let mut builder = PasswordElement::builder(element)
                    .reveal_in_log(self.show_in_log.unwrap_or(false))
                    .clear_strategy(clear.unwrap_or_default())
                    .focus_mode(focus)
                    .send_method(send_method)
                    .text_action(text_action)
                    .keyboard_layout(layout);
                if let Some(clipboard) = clipboard {
                    builder = builder.clipboard(clipboard);
                }
                Box::new(builder.build()?)
            }
            FieldKind::Check | FieldKind::Radio => {
                self.reject(
                    kind,
                    &[
                        ("value_source", self.value_source.is_some()),
                        ("clear", self.clear.is_some()),
                        ("default_value", self.default_value.is_some()),
                        ("send_method", self.send_method.is_some()),
                        ("text_action", self.text_action.is_some()),
                        ("keyboard_layout", self.keyboard_layout.is_some()),
                        ("strategy", self.strategy.is_some()),
                    ],
                )?;
                let show = self.show_in_log.unwrap_or(true);
                let allow = self.allow_check.unwrap_or(true);
                if kind == FieldKind::Check {
                    Box::new(
                        CheckElement::new(element)
                            .show_in_log(show)
                            .allow_check(allow)
                            .focus_mode(focus),
                    )
                } else {
                    Box::new(
                        RadioElement::new(element)
                            .show_in_log(show)
                            .allow_check(allow)
                            .focus_mode(focus),
                    )
                }
            }
            FieldKind::Combo => {
                self.reject(
                    kind,
                    &[
                        ("value_source", self.value_source.is_some()),
                        ("clear", self.clear.is_some()),
                        ("default_value", self.default_value.is_some()),
                        ("send_method", self.send_method.is_some()),
                    ],
                )?;
                Box::new(
                    ComboElement::builder(element)
                        .show_in_log(self.show_in_log.unwrap_or(true))
                        .allow_check(self.allow_check.unwrap_or(true))
                        .strategy(parse::<ComboStrategy>(&self.strategy)?.unwrap_or_default())
                        .focus_mode(focus)
                        .text_action(text_action)
                        .keyboard_layout(layout)
                        .build(),
                )
            }
        };
        Ok(field)
    }
}

fn scalar(element: &str, value: &Value) -> Result<FieldValue, FormError> {
    match value {
        Value::String(s) => Ok(FieldValue::Text(s.clone())),
        Value::Bool(b) => Ok(FieldValue::Flag(*b)),
        Value::Number(n) => Ok(FieldValue::Text(n.to_string())),
        other => Err(FormError::FormArguments(format!(
            "field '{element}' has an unsupported value: {other}"
        ))),
    }
}
