use crate::errors::AutomationError;
use crate::types::{FocusMode, KeyboardLayout, TextAction};
use std::fmt::Debug;
use tracing::instrument;

/// Represents a UI element owned by the automation driver.
///
/// The handle is cheap to clone; clones refer to the same widget.
#[derive(Debug)]
pub struct UIElement {
    inner: Box<dyn UIElementImpl>,
}

/// Capabilities a driver must provide for an element to take part in a form.
///
/// These are the only primitives the form engine ever calls. Reads never
/// change the UI; every other method is a UI action.
pub trait UIElementImpl: Send + Sync + Debug {
    /// Text content of the element.
    fn get_text_value(&self) -> Result<String, AutomationError>;
    /// Name (label) attribute of the element.
    fn get_name(&self) -> Result<String, AutomationError>;
    /// Value attribute of the element.
    fn get_raw_value(&self) -> Result<String, AutomationError>;
    fn set_raw_value(&self, value: &str) -> Result<(), AutomationError>;
    fn get_toggle_state(&self) -> Result<bool, AutomationError>;
    fn get_selected(&self) -> Result<bool, AutomationError>;
    fn set_focus(&self, mode: FocusMode) -> Result<(), AutomationError>;
    fn send_text(
        &self,
        text: &str,
        action: TextAction,
        layout: &KeyboardLayout,
    ) -> Result<(), AutomationError>;
    /// Press a key combination such as `CTRL+A` or `DOWN`.
    fn send_key(&self, key: &str) -> Result<(), AutomationError>;
    fn click(&self) -> Result<(), AutomationError>;

    /// Boxed copy of this handle, referring to the same widget.
    fn clone_box(&self) -> Box<dyn UIElementImpl>;
}

/// Process-wide clipboard used by the paste send method.
pub trait Clipboard: Send + Sync + Debug {
    fn set_text(&self, text: &str) -> Result<(), AutomationError>;

    /// Empties the clipboard so a pasted value does not linger.
    fn clear(&self) -> Result<(), AutomationError> {
        self.set_text("")
    }
}

impl UIElement {
    /// Create a new UI element from a driver-specific implementation
    pub fn new(impl_: Box<dyn UIElementImpl>) -> Self {
        Self { inner: impl_ }
    }

    pub fn text_value(&self) -> Result<String, AutomationError> {
        self.inner.get_text_value()
    }

    pub fn name(&self) -> Result<String, AutomationError> {
        self.inner.get_name()
    }

    pub fn raw_value(&self) -> Result<String, AutomationError> {
        self.inner.get_raw_value()
    }

    /// Assign the value directly, bypassing simulated input
    #[instrument(level = "debug", skip(self, value))]
    pub fn set_raw_value(&self, value: &str) -> Result<(), AutomationError> {
        self.inner.set_raw_value(value)
    }

    pub fn is_toggled(&self) -> Result<bool, AutomationError> {
        self.inner.get_toggle_state()
    }

    pub fn is_selected(&self) -> Result<bool, AutomationError> {
        self.inner.get_selected()
    }

    /// Focus this element
    #[instrument(level = "debug", skip(self))]
    pub fn focus(&self, mode: FocusMode) -> Result<(), AutomationError> {
        self.inner.set_focus(mode)
    }

    /// Type text into this element
    #[instrument(level = "debug", skip(self, text))]
    pub fn type_text(
        &self,
        text: &str,
        action: TextAction,
        layout: &KeyboardLayout,
    ) -> Result<(), AutomationError> {
        self.inner.send_text(text, action, layout)
    }

    /// Press a key while this element is focused
    #[instrument(level = "debug", skip(self))]
    pub fn press_key(&self, key: &str) -> Result<(), AutomationError> {
        self.inner.send_key(key)
    }

    /// Click on this element
    #[instrument(level = "debug", skip(self))]
    pub fn click(&self) -> Result<(), AutomationError> {
        self.inner.click()
    }
}

impl Clone for UIElement {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_box(),
        }
    }
}
