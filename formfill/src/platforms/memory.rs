//! In-memory driver: widgets simulated in-process
//!
//! Every clone of a [`MemoryElement`] shares the same widget state, so a
//! caller can hand one clone to a form and keep another to inspect what the
//! form did. Reads are never recorded; every UI action is.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::element::{Clipboard, UIElement, UIElementImpl};
use crate::errors::AutomationError;
use crate::types::{FocusMode, KeyboardLayout, TextAction, PASTE_KEY};

/// Kind of widget the memory element behaves like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryRole {
    Edit,
    CheckBox,
    RadioButton,
    ComboBox,
}

/// A UI action received by a memory element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryAction {
    Focus(FocusMode),
    SendText(String),
    SendKey(String),
    Click,
    SetRawValue(String),
}

impl MemoryAction {
    /// Action name without its payload, safe to log for secret fields.
    pub fn name(&self) -> &'static str {
        match self {
            MemoryAction::Focus(_) => "focus",
            MemoryAction::SendText(_) => "send_text",
            MemoryAction::SendKey(_) => "send_key",
            MemoryAction::Click => "click",
            MemoryAction::SetRawValue(_) => "set_raw_value",
        }
    }
}

type Normalizer = Arc<dyn Fn(&str) -> String + Send + Sync>;

struct MemoryState {
    role: MemoryRole,
    content: String,
    label: Option<String>,
    toggled: bool,
    selected: bool,
    options: Vec<String>,
    option_index: Option<usize>,
    wrap_options: bool,
    select_all: bool,
    trailing_newline: bool,
    read_only: bool,
    focus_error: Option<AutomationError>,
    normalizer: Option<Normalizer>,
    clipboard: Option<MemoryClipboard>,
    actions: Vec<MemoryAction>,
}

impl MemoryState {
    fn new(role: MemoryRole) -> Self {
        Self {
            role,
            content: String::new(),
            label: None,
            toggled: false,
            selected: false,
            options: Vec::new(),
            option_index: None,
            wrap_options: false,
            select_all: false,
            trailing_newline: false,
            read_only: false,
            focus_error: None,
            normalizer: None,
            clipboard: None,
            actions: Vec::new(),
        }
    }

    fn store(&mut self, content: String) {
        self.content = match &self.normalizer {
            Some(normalize) => normalize(&content),
            None => content,
        };
    }

    fn insert_text(&mut self, text: &str) {
        if self.read_only {
            return;
        }
        let content = if self.role == MemoryRole::ComboBox || self.select_all {
            text.to_string()
        } else {
            format!("{}{}", self.content, text)
        };
        self.select_all = false;
        self.store(content);
    }

    fn select_option(&mut self, index: usize) {
        if let Some(option) = self.options.get(index) {
            self.option_index = Some(index);
            self.content = option.clone();
        }
    }

    fn press(&mut self, key: &str) {
        if self.read_only {
            return;
        }
        match key.to_uppercase().as_str() {
            "CTRL+A" => self.select_all = true,
            "DEL" | "DELETE" => {
                if self.select_all {
                    self.content.clear();
                    self.select_all = false;
                }
            }
            "BACKSPACE" => {
                if self.select_all {
                    self.content.clear();
                    self.select_all = false;
                } else {
                    self.content.pop();
                }
            }
            "HOME" if self.role == MemoryRole::ComboBox => self.select_option(0),
            "DOWN" if self.role == MemoryRole::ComboBox => {
                let next = match self.option_index {
                    None => 0,
                    Some(i) if i + 1 < self.options.len() => i + 1,
                    Some(_) if self.wrap_options => 0,
                    Some(i) => i,
                };
                self.select_option(next);
            }
            _ => {
                if key.eq_ignore_ascii_case(PASTE_KEY) {
                    let pasted = self.clipboard.as_ref().map(MemoryClipboard::text);
                    if let Some(text) = pasted {
                        self.insert_text(&text);
                    }
                }
            }
        }
    }
}

/// A simulated widget that records the actions performed on it.
#[derive(Clone)]
pub struct MemoryElement {
    state: Arc<Mutex<MemoryState>>,
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("MemoryElement")
            .field("role", &state.role)
            .field("content", &state.content)
            .field("toggled", &state.toggled)
            .field("selected", &state.selected)
            .finish()
    }
}

impl MemoryElement {
    fn with_role(role: MemoryRole) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState::new(role))),
        }
    }

    /// An edit box holding `content`.
    pub fn edit(content: &str) -> Self {
        let element = Self::with_role(MemoryRole::Edit);
        element.state().content = content.to_string();
        element
    }

    pub fn check_box(toggled: bool) -> Self {
        let element = Self::with_role(MemoryRole::CheckBox);
        element.state().toggled = toggled;
        element
    }

    pub fn radio_button(selected: bool) -> Self {
        let element = Self::with_role(MemoryRole::RadioButton);
        element.state().selected = selected;
        element
    }

    /// A combo box offering `options`, showing `selected` if given.
    ///
    /// `HOME` jumps to the first option and `DOWN` moves to the next one,
    /// staying on the last option unless [`wrapping`](Self::wrapping) is set.
    pub fn combo_box(options: &[&str], selected: Option<usize>) -> Self {
        let element = Self::with_role(MemoryRole::ComboBox);
        {
            let mut state = element.state();
            state.options = options.iter().map(|o| o.to_string()).collect();
            if let Some(index) = selected {
                state.select_option(index);
            }
        }
        element
    }

    /// Name attribute reported instead of the content.
    pub fn with_label(self, label: &str) -> Self {
        self.state().label = Some(label.to_string());
        self
    }

    /// Text content is reported with a trailing newline, as rich edits do.
    pub fn with_trailing_newline(self) -> Self {
        self.state().trailing_newline = true;
        self
    }

    /// Every write is applied through `normalize`, like an input mask would.
    pub fn with_normalizer<F>(self, normalize: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.state().normalizer = Some(Arc::new(normalize));
        self
    }

    /// Clipboard consulted when the paste shortcut is pressed.
    pub fn with_clipboard(self, clipboard: MemoryClipboard) -> Self {
        self.state().clipboard = Some(clipboard);
        self
    }

    /// Actions are recorded but never change the widget.
    pub fn read_only(self) -> Self {
        self.state().read_only = true;
        self
    }

    /// Moving past the last combo option returns to the first one.
    pub fn wrapping(self) -> Self {
        self.state().wrap_options = true;
        self
    }

    /// Every focus request fails with `error`.
    pub fn failing_focus(self, error: AutomationError) -> Self {
        self.state().focus_error = Some(error);
        self
    }

    pub fn role(&self) -> MemoryRole {
        self.state().role
    }

    pub fn content(&self) -> String {
        self.state().content.clone()
    }

    pub fn toggled(&self) -> bool {
        self.state().toggled
    }

    pub fn selected(&self) -> bool {
        self.state().selected
    }

    /// Replaces the content without recording an action.
    pub fn set_content(&self, content: &str) {
        self.state().content = content.to_string();
    }

    pub fn actions(&self) -> Vec<MemoryAction> {
        self.state().actions.clone()
    }

    pub fn action_count(&self) -> usize {
        self.state().actions.len()
    }

    pub fn clear_actions(&self) {
        self.state().actions.clear();
    }

    /// A driver handle sharing this widget's state.
    pub fn element(&self) -> UIElement {
        UIElement::new(Box::new(self.clone()))
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, action: MemoryAction) -> MutexGuard<'_, MemoryState> {
        match &action {
            MemoryAction::SendKey(key) => {
                debug!(action = action.name(), key = %key, "memory element action")
            }
            _ => debug!(action = action.name(), "memory element action"),
        }
        let mut state = self.state();
        state.actions.push(action);
        state
    }
}

impl From<MemoryElement> for UIElement {
    fn from(element: MemoryElement) -> Self {
        UIElement::new(Box::new(element))
    }
}

impl UIElementImpl for MemoryElement {
    fn get_text_value(&self) -> Result<String, AutomationError> {
        let state = self.state();
        if state.trailing_newline {
            Ok(format!("{}\n", state.content))
        } else {
            Ok(state.content.clone())
        }
    }

    fn get_name(&self) -> Result<String, AutomationError> {
        let state = self.state();
        Ok(state.label.clone().unwrap_or_else(|| state.content.clone()))
    }

    fn get_raw_value(&self) -> Result<String, AutomationError> {
        Ok(self.state().content.clone())
    }

    fn set_raw_value(&self, value: &str) -> Result<(), AutomationError> {
        let mut state = self.record(MemoryAction::SetRawValue(value.to_string()));
        if state.read_only {
            return Ok(());
        }
        if let Some(index) = state.options.iter().position(|o| o == value) {
            state.option_index = Some(index);
        }
        state.store(value.to_string());
        Ok(())
    }

    fn get_toggle_state(&self) -> Result<bool, AutomationError> {
        Ok(self.state().toggled)
    }

    fn get_selected(&self) -> Result<bool, AutomationError> {
        Ok(self.state().selected)
    }

    fn set_focus(&self, mode: FocusMode) -> Result<(), AutomationError> {
        let state = self.record(MemoryAction::Focus(mode));
        match &state.focus_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn send_text(
        &self,
        text: &str,
        _action: TextAction,
        _layout: &KeyboardLayout,
    ) -> Result<(), AutomationError> {
        self.record(MemoryAction::SendText(text.to_string()))
            .insert_text(text);
        Ok(())
    }

    fn send_key(&self, key: &str) -> Result<(), AutomationError> {
        self.record(MemoryAction::SendKey(key.to_string())).press(key);
        Ok(())
    }

    fn click(&self) -> Result<(), AutomationError> {
        let mut state = self.record(MemoryAction::Click);
        if state.read_only {
            return Ok(());
        }
        match state.role {
            MemoryRole::CheckBox => state.toggled = !state.toggled,
            MemoryRole::RadioButton => state.selected = true,
            MemoryRole::Edit | MemoryRole::ComboBox => {}
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn UIElementImpl> {
        Box::new(self.clone())
    }
}

/// Shared in-process clipboard.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    state: Arc<Mutex<ClipboardState>>,
}

#[derive(Debug, Default)]
struct ClipboardState {
    text: String,
    writes: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    /// Number of times the clipboard has been written, clears included.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, ClipboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<(), AutomationError> {
        let mut state = self.lock();
        state.text = text.to_string();
        state.writes += 1;
        Ok(())
    }
}
