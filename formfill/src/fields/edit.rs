use std::sync::Arc;

use tracing::debug;

use super::{clear, expect_text, write_text, ClearStrategy, FieldElement, ValueSource};
use crate::element::{Clipboard, UIElement};
use crate::errors::FormError;
use crate::types::{FieldValue, FocusMode, KeyboardLayout, SendMethod, TextAction, TextInput};

/// A common edit box.
#[derive(Debug, Clone)]
pub struct EditElement {
    element: UIElement,
    show_in_log: bool,
    allow_check: bool,
    value_source: ValueSource,
    clear_strategy: ClearStrategy,
    default_value: String,
    focus: FocusMode,
    input: TextInput,
}

impl EditElement {
    /// Edit box with default settings: value attribute, cleared with
    /// `CTRL+A` `DEL`, filled by typing.
    pub fn new(element: impl Into<UIElement>) -> Self {
        Self {
            element: element.into(),
            show_in_log: true,
            allow_check: true,
            value_source: ValueSource::default(),
            clear_strategy: ClearStrategy::default(),
            default_value: String::new(),
            focus: FocusMode::default(),
            input: TextInput::default(),
        }
    }

    pub fn builder(element: impl Into<UIElement>) -> EditElementBuilder {
        EditElementBuilder {
            inner: Self::new(element),
        }
    }

    pub fn value_source(&self) -> ValueSource {
        self.value_source
    }

    pub fn send_method(&self) -> SendMethod {
        self.input.send_method
    }

    pub fn clear_strategy(&self) -> &ClearStrategy {
        &self.clear_strategy
    }

    fn read(&self) -> Result<String, FormError> {
        let value = match self.value_source {
            ValueSource::Value => self.element.raw_value()?,
            ValueSource::Name => self.element.name()?,
            ValueSource::TextValue => {
                let mut text = self.element.text_value()?;
                if text.ends_with('\n') {
                    text.pop();
                    if text.ends_with('\r') {
                        text.pop();
                    }
                }
                text
            }
        };
        Ok(value)
    }
}

impl FieldElement for EditElement {
    fn value(&self) -> Result<FieldValue, FormError> {
        self.read().map(FieldValue::Text)
    }

    fn set_value(&self, value: &FieldValue) -> Result<(), FormError> {
        let text = expect_text("EditBox", value)?;
        let current = self.read()?;
        if current == text {
            debug!("Edit box already holds the target value");
            return Ok(());
        }

        self.element.focus(self.focus)?;
        // A pre-filled mask such as date dots cannot be cleared away.
        if current != self.default_value {
            clear(&self.element, &self.clear_strategy)?;
        }
        write_text(&self.element, &self.input, text)
    }

    fn show_in_log(&self) -> bool {
        self.show_in_log
    }

    fn allow_check(&self) -> bool {
        self.allow_check
    }

    fn kind(&self) -> &'static str {
        "EditBox"
    }

    fn clipboard(&self) -> Option<&Arc<dyn Clipboard>> {
        self.input.paste_clipboard()
    }
}

/// Builder for [`EditElement`].
#[derive(Debug)]
pub struct EditElementBuilder {
    inner: EditElement,
}

impl EditElementBuilder {
    pub fn show_in_log(mut self, show: bool) -> Self {
        self.inner.show_in_log = show;
        self
    }

    pub fn allow_check(mut self, allow: bool) -> Self {
        self.inner.allow_check = allow;
        self
    }

    pub fn value_source(mut self, source: ValueSource) -> Self {
        self.inner.value_source = source;
        self
    }

    pub fn clear_strategy(mut self, strategy: ClearStrategy) -> Self {
        self.inner.clear_strategy = strategy;
        self
    }

    /// Content that stays in the box after clearing, e.g. `  .  .    ` for dates.
    pub fn default_value(mut self, value: &str) -> Self {
        self.inner.default_value = value.to_string();
        self
    }

    pub fn focus_mode(mut self, mode: FocusMode) -> Self {
        self.inner.focus = mode;
        self
    }

    pub fn send_method(mut self, method: SendMethod) -> Self {
        self.inner.input.send_method = method;
        self
    }

    pub fn text_action(mut self, action: TextAction) -> Self {
        self.inner.input.action = action;
        self
    }

    pub fn keyboard_layout(mut self, layout: KeyboardLayout) -> Self {
        self.inner.input.layout = layout;
        self
    }

    pub fn clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.inner.input.clipboard = Some(clipboard);
        self
    }

    pub fn build(self) -> Result<EditElement, FormError> {
        self.inner.input.validate()?;
        Ok(self.inner)
    }
}
