use std::collections::HashMap;
use std::str::FromStr;

use tracing::{debug, warn};

use super::{expect_text, FieldElement};
use crate::element::UIElement;
use crate::errors::FormError;
use crate::types::{FieldValue, FocusMode, KeyboardLayout, TextAction};

/// Key that jumps to the first option.
pub const FIRST_OPTION_KEY: &str = "HOME";
/// Key that moves to the next option.
pub const NEXT_OPTION_KEY: &str = "DOWN";
/// How often one option may show up before the walk gives up.
const MAX_SIGHTINGS: usize = 3;

/// How a combo box is driven to its target option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComboStrategy {
    /// Type the option text into the box.
    #[default]
    Typing,
    /// Assign the value directly.
    Direct,
    /// Step through the options with `HOME` then `DOWN` until the target shows.
    Walk,
}

impl FromStr for ComboStrategy {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "typing" | "writing" => Ok(ComboStrategy::Typing),
            "direct" => Ok(ComboStrategy::Direct),
            "walk" => Ok(ComboStrategy::Walk),
            other => Err(FormError::InvalidArgument(format!(
                "unknown combo strategy '{other}', expected one of: typing, direct, walk"
            ))),
        }
    }
}

/// A combo box.
#[derive(Debug, Clone)]
pub struct ComboElement {
    element: UIElement,
    show_in_log: bool,
    allow_check: bool,
    strategy: ComboStrategy,
    focus: FocusMode,
    action: TextAction,
    layout: KeyboardLayout,
}

impl ComboElement {
    pub fn new(element: impl Into<UIElement>) -> Self {
        Self {
            element: element.into(),
            show_in_log: true,
            allow_check: true,
            strategy: ComboStrategy::default(),
            focus: FocusMode::default(),
            action: TextAction::default(),
            layout: KeyboardLayout::default(),
        }
    }

    pub fn builder(element: impl Into<UIElement>) -> ComboElementBuilder {
        ComboElementBuilder {
            inner: Self::new(element),
        }
    }

    pub fn strategy(&self) -> ComboStrategy {
        self.strategy
    }

    fn walk_to(&self, target: &str) -> Result<(), FormError> {
        self.element.focus(self.focus)?;
        self.element.press_key(FIRST_OPTION_KEY)?;

        let mut sightings: HashMap<String, usize> = HashMap::new();
        loop {
            let current = self.element.raw_value()?;
            if current == target {
                return Ok(());
            }
            let seen = sightings.entry(current).or_insert(0);
            *seen += 1;
            if *seen >= MAX_SIGHTINGS {
                warn!(
                    options_seen = sightings.len(),
                    "Combo box options exhausted without reaching the target"
                );
                return Err(FormError::UnableToSetValue(
                    "value is not among the combo box options".to_string(),
                ));
            }
            self.element.press_key(NEXT_OPTION_KEY)?;
        }
    }
}

impl FieldElement for ComboElement {
    fn value(&self) -> Result<FieldValue, FormError> {
        Ok(FieldValue::Text(self.element.raw_value()?))
    }

    fn set_value(&self, value: &FieldValue) -> Result<(), FormError> {
        let text = expect_text("ComboBox", value)?;
        if self.element.raw_value()? == text {
            debug!("Combo box already shows the target value");
            return Ok(());
        }

        match self.strategy {
            ComboStrategy::Typing => {
                self.element.focus(self.focus)?;
                self.element.type_text(text, self.action, &self.layout)?;
            }
            ComboStrategy::Direct => {
                self.element.focus(self.focus)?;
                self.element.set_raw_value(text)?;
            }
            ComboStrategy::Walk => self.walk_to(text)?,
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
        "ComboBox"
    }
}

/// Builder for [`ComboElement`].
#[derive(Debug)]
pub struct ComboElementBuilder {
    inner: ComboElement,
}

impl ComboElementBuilder {
    pub fn show_in_log(mut self, show: bool) -> Self {
        self.inner.show_in_log = show;
        self
    }

    pub fn allow_check(mut self, allow: bool) -> Self {
        self.inner.allow_check = allow;
        self
    }

    pub fn strategy(mut self, strategy: ComboStrategy) -> Self {
        self.inner.strategy = strategy;
        self
    }

    pub fn focus_mode(mut self, mode: FocusMode) -> Self {
        self.inner.focus = mode;
        self
    }

    pub fn text_action(mut self, action: TextAction) -> Self {
        self.inner.action = action;
        self
    }

    pub fn keyboard_layout(mut self, layout: KeyboardLayout) -> Self {
        self.inner.layout = layout;
        self
    }

    pub fn build(self) -> ComboElement {
        self.inner
    }
}
