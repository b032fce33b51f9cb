use std::sync::Arc;

use super::{clear, expect_text, write_text, ClearStrategy, FieldElement};
use crate::element::{Clipboard, UIElement};
use crate::errors::FormError;
use crate::types::{FieldValue, FocusMode, KeyboardLayout, SendMethod, TextAction, TextInput};

/// A password box. Write-only: it is never read back or verified, and its
/// values stay out of the logs unless explicitly revealed.
#[derive(Debug, Clone)]
pub struct PasswordElement {
    element: UIElement,
    show_in_log: bool,
    clear_strategy: ClearStrategy,
    focus: FocusMode,
    input: TextInput,
}

impl PasswordElement {
    pub fn new(element: impl Into<UIElement>) -> Self {
        Self {
            element: element.into(),
            show_in_log: false,
            clear_strategy: ClearStrategy::default(),
            focus: FocusMode::default(),
            input: TextInput::default(),
        }
    }

    pub fn builder(element: impl Into<UIElement>) -> PasswordElementBuilder {
        PasswordElementBuilder {
            inner: Self::new(element),
        }
    }

    pub fn send_method(&self) -> SendMethod {
        self.input.send_method
    }
}

impl FieldElement for PasswordElement {
    /// Always the empty placeholder; the secret is never read back.
    fn value(&self) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Text(String::new()))
    }

    fn set_value(&self, value: &FieldValue) -> Result<(), FormError> {
        let text = expect_text("PasswordBox", value)?;
        self.element.focus(self.focus)?;
        clear(&self.element, &self.clear_strategy)?;
        write_text(&self.element, &self.input, text)
    }

    fn show_in_log(&self) -> bool {
        self.show_in_log
    }

    fn allow_check(&self) -> bool {
        false
    }

    fn kind(&self) -> &'static str {
        "PasswordBox"
    }

    fn clipboard(&self) -> Option<&Arc<dyn Clipboard>> {
        self.input.paste_clipboard()
    }
}

/// Builder for [`PasswordElement`].
#[derive(Debug)]
pub struct PasswordElementBuilder {
    inner: PasswordElement,
}

impl PasswordElementBuilder {
    /// Lets the password appear in logs. Meant for test credentials only.
    pub fn reveal_in_log(mut self, reveal: bool) -> Self {
        self.inner.show_in_log = reveal;
        self
    }

    /// `ClearStrategy::Nothing` is not accepted: a password box is always
    /// emptied before writing.
    pub fn clear_strategy(mut self, strategy: ClearStrategy) -> Self {
        self.inner.clear_strategy = strategy;
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

    pub fn build(self) -> Result<PasswordElement, FormError> {
        if self.inner.clear_strategy == ClearStrategy::Nothing {
            return Err(FormError::InvalidArgument(
                "a password box must be cleared before writing".to_string(),
            ));
        }
        self.inner.input.validate()?;
        Ok(self.inner)
    }
}
