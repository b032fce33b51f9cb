//! The fill-and-verify engine
//!
//! A [`Form`] holds an ordered list of bindings between field elements and
//! the values they should hold. [`Form::complete`] writes every value, reads
//! every checkable field back, and starts over when a field does not match,
//! up to the configured number of attempts.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::element::Clipboard;
use crate::errors::FormError;
use crate::fields::FieldElement;
use crate::types::FieldValue;

/// Shown in logs in place of values that must stay hidden.
pub const REDACTED: &str = "****";
pub const DEFAULT_FORM_ID: &str = "default_form_id";
pub const DEFAULT_ATTEMPTS: u32 = 3;

/// A field element together with the value it should be filled with.
pub struct Binding {
    element: Box<dyn FieldElement>,
    value: FieldValue,
    verify: Option<FieldValue>,
}

impl Binding {
    pub fn new(element: impl FieldElement + 'static, value: impl Into<FieldValue>) -> Self {
        Self {
            element: Box::new(element),
            value: value.into(),
            verify: None,
        }
    }

    /// Accept `verify` as the correct read-back value instead of the written one.
    pub fn with_verify(mut self, verify: impl Into<FieldValue>) -> Self {
        self.verify = Some(verify.into());
        self
    }

    /// Builds a binding from a write value optionally followed by a verify value.
    pub fn from_values(
        element: Box<dyn FieldElement>,
        values: Vec<FieldValue>,
    ) -> Result<Self, FormError> {
        let count = values.len();
        let mut values = values.into_iter();
        match (values.next(), values.next(), count) {
            (Some(value), verify, 1..=2) => Ok(Self {
                element,
                value,
                verify,
            }),
            _ => Err(FormError::FormArguments(format!(
                "a binding takes a value and an optional verify value, got {count} values"
            ))),
        }
    }

    pub fn element(&self) -> &dyn FieldElement {
        self.element.as_ref()
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// The value the field must hold after filling.
    pub fn expected(&self) -> &FieldValue {
        self.verify.as_ref().unwrap_or(&self.value)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("element", &self.element.kind())
            .field("value", &log_value(self.element(), &self.value))
            .field(
                "verify",
                &self.verify.as_ref().map(|v| log_value(self.element(), v)),
            )
            .finish()
    }
}

impl<E, V> From<(E, V)> for Binding
where
    E: FieldElement + 'static,
    V: Into<FieldValue>,
{
    fn from((element, value): (E, V)) -> Self {
        Binding::new(element, value)
    }
}

impl<E, V, W> From<(E, V, W)> for Binding
where
    E: FieldElement + 'static,
    V: Into<FieldValue>,
    W: Into<FieldValue>,
{
    fn from((element, value, verify): (E, V, W)) -> Self {
        Binding::new(element, value).with_verify(verify)
    }
}

/// Returns `value` for logging, or the mask when the field hides its values.
pub fn log_value(element: &dyn FieldElement, value: &FieldValue) -> String {
    if element.show_in_log() {
        value.to_string()
    } else {
        REDACTED.to_string()
    }
}

/// An ordered set of field bindings filled and verified as a unit.
#[derive(Debug)]
pub struct Form {
    form_id: String,
    bindings: Vec<Binding>,
    attempts: u32,
    delay: Duration,
}

impl Default for Form {
    fn default() -> Self {
        Self::new(DEFAULT_FORM_ID)
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Form: {}", self.form_id)
    }
}

impl Form {
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            bindings: Vec::new(),
            attempts: DEFAULT_ATTEMPTS,
            delay: Duration::ZERO,
        }
    }

    /// Maximum number of fill-and-verify passes; at least one is always made.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Pause between two consecutive field fills.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Appends `(element, value)` or `(element, value, verify_value)`.
    pub fn add(&mut self, binding: impl Into<Binding>) -> &mut Self {
        self.bindings.push(binding.into());
        self
    }

    /// Appends several bindings in order.
    pub fn add_all<I, B>(&mut self, bindings: I) -> &mut Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Binding>,
    {
        self.bindings.extend(bindings.into_iter().map(Into::into));
        self
    }

    /// Fills and verifies every binding, retrying the whole form on mismatch.
    ///
    /// Returns [`FormError::Fatal`] when no attempt verified cleanly. Any
    /// other error aborts immediately.
    #[instrument(level = "debug", skip(self), fields(form_id = %self.form_id))]
    pub fn complete(&self) -> Result<(), FormError> {
        for attempt in 1..=self.attempts {
            info!(
                attempt,
                attempts = self.attempts,
                "This is {}. attempt to complete form: '{}'.",
                attempt,
                self.form_id
            );

            let outcome = self.fill_all().and_then(|()| self.check_all());
            self.clear_clipboards();

            match outcome {
                Ok(()) => {
                    info!("Form: '{}' successfully completed.", self.form_id);
                    return Ok(());
                }
                Err(FormError::VerificationMismatch { .. }) => continue,
                Err(err) => return Err(err),
            }
        }

        error!(
            attempts = self.attempts,
            "Fatal error in form: '{}'!", self.form_id
        );
        Err(FormError::Fatal {
            form_id: self.form_id.clone(),
        })
    }

    pub(crate) fn fill_all(&self) -> Result<(), FormError> {
        let last = self.bindings.len().saturating_sub(1);
        for (index, binding) in self.bindings.iter().enumerate() {
            let element = binding.element();
            info!(
                field = element.kind(),
                "Fill in value: '{}' in form: '{}'.",
                log_value(element, &binding.value),
                self.form_id
            );
            element.set_value(&binding.value)?;

            if !self.delay.is_zero() && index < last {
                thread::sleep(self.delay);
            }
        }
        Ok(())
    }

    pub(crate) fn check_all(&self) -> Result<(), FormError> {
        for binding in &self.bindings {
            let element = binding.element();
            let expected = binding.expected();
            let shown = log_value(element, expected);
            if !element.allow_check() {
                warn!(
                    field = element.kind(),
                    "Checking for value: '{}' in form: '{}' is not allowed!", shown, self.form_id
                );
                continue;
            }

            info!(
                field = element.kind(),
                "Checking value: '{}' in form: '{}'.", shown, self.form_id
            );
            let actual = element.value()?;
            if &actual != expected {
                if element.show_in_log() {
                    error!(
                        field = element.kind(),
                        "Value in form: '{}' is not equal to value: '{}'!", actual, expected
                    );
                } else {
                    error!(field = element.kind(), "Value in form is not equal to value!");
                }
                return Err(FormError::VerificationMismatch {
                    form_id: self.form_id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Empties every clipboard a paste-based field wrote a value to.
    fn clear_clipboards(&self) {
        let mut cleared: Vec<&Arc<dyn Clipboard>> = Vec::new();
        for clipboard in self.bindings.iter().filter_map(|b| b.element.clipboard()) {
            if cleared.iter().any(|c| Arc::ptr_eq(c, clipboard)) {
                continue;
            }
            if let Err(err) = clipboard.clear() {
                warn!("Failed to clear clipboard after filling form '{}': {}", self.form_id, err);
            }
            cleared.push(clipboard);
        }
    }

    /// Runs `body` on this form and completes it exactly once afterwards,
    /// whether `body` succeeded or not.
    ///
    /// A completion error takes precedence over the body's error.
    pub fn scoped<T, E, F>(mut self, body: F) -> Result<T, E>
    where
        F: FnOnce(&mut Form) -> Result<T, E>,
        E: From<FormError>,
    {
        let result = body(&mut self);
        self.complete().map_err(E::from)?;
        result
    }

    /// Wraps the form in a guard that completes it when dropped.
    pub fn guard(self) -> FormGuard {
        FormGuard {
            form: self,
            finished: false,
        }
    }
}

/// Completes the wrapped form exactly once: explicitly through
/// [`finish`](FormGuard::finish), or on drop.
///
/// Errors from a completion triggered by drop can only be logged.
#[derive(Debug)]
pub struct FormGuard {
    form: Form,
    finished: bool,
}

impl FormGuard {
    /// Completes the form and reports the outcome.
    pub fn finish(mut self) -> Result<(), FormError> {
        self.finished = true;
        self.form.complete()
    }
}

impl Deref for FormGuard {
    type Target = Form;

    fn deref(&self) -> &Form {
        &self.form
    }
}

impl DerefMut for FormGuard {
    fn deref_mut(&mut self) -> &mut Form {
        &mut self.form
    }
}

impl Drop for FormGuard {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        if let Err(err) = self.form.complete() {
            error!("Form '{}' failed to complete on drop: {}", self.form.form_id, err);
        }
    }
}
