use super::FieldElement;
use crate::element::UIElement;
use crate::errors::FormError;
use crate::types::{FieldValue, FocusMode};

/// A check box.
#[derive(Debug, Clone)]
pub struct CheckElement {
    element: UIElement,
    show_in_log: bool,
    allow_check: bool,
    focus: FocusMode,
}

impl CheckElement {
    pub fn new(element: impl Into<UIElement>) -> Self {
        Self {
            element: element.into(),
            show_in_log: true,
            allow_check: true,
            focus: FocusMode::default(),
        }
    }

    pub fn show_in_log(mut self, show: bool) -> Self {
        self.show_in_log = show;
        self
    }

    pub fn allow_check(mut self, allow: bool) -> Self {
        self.allow_check = allow;
        self
    }

    pub fn focus_mode(mut self, mode: FocusMode) -> Self {
        self.focus = mode;
        self
    }
}

impl FieldElement for CheckElement {
    fn value(&self) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Flag(self.element.is_toggled()?))
    }

    fn set_value(&self, value: &FieldValue) -> Result<(), FormError> {
        let target = value.as_flag().ok_or_else(|| {
            FormError::ValueType("Only True or False value is allowed for CheckBox!".to_string())
        })?;
        if self.element.is_toggled()? != target {
            self.element.focus(self.focus)?;
            self.element.click()?;
        }
        Ok(())
    }

    fn show_in_log(&self) -> bool {
        self.show_in_log
    }

    fn allow_check(&self) -> bool {
        self.allow_check
    }

    fn kind(&self) -> &'static str {
        "CheckBox"
    }
}
