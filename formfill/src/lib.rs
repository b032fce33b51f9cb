//! Fill desktop UI forms through automation elements and verify the result
//!
//! Field elements ([`EditElement`], [`PasswordElement`], [`CheckElement`],
//! [`RadioElement`], [`ComboElement`]) translate "set this field to X" into
//! the primitive actions of a UI-automation driver. A [`Form`] fills a set
//! of fields, reads them back, and retries the whole form until every
//! checkable field holds its expected value.
//!
//! ```
//! use formfill::platforms::MemoryElement;
//! use formfill::{CheckElement, EditElement, Form};
//!
//! let name = MemoryElement::edit("");
//! let terms = MemoryElement::check_box(false);
//!
//! let mut form = Form::new("signup");
//! form.add((EditElement::new(name.clone()), "John Doe"))
//!     .add((CheckElement::new(terms.clone()), true));
//! form.complete()?;
//!
//! assert_eq!(name.content(), "John Doe");
//! assert!(terms.toggled());
//! # Ok::<(), formfill::FormError>(())
//! ```

pub mod config;
pub mod element;
pub mod errors;
pub mod fields;
pub mod form;
pub mod logging;
pub mod platforms;
#[cfg(test)]
mod tests;
pub mod types;

pub use config::{FieldConfig, FormConfig};
pub use element::{Clipboard, UIElement, UIElementImpl};
pub use errors::{AutomationError, FormError};
pub use fields::{
    CheckElement, ClearStrategy, ComboElement, ComboStrategy, EditElement, FieldElement,
    PasswordElement, RadioElement, ValueSource,
};
pub use form::{log_value, Binding, Form, FormGuard};
pub use types::{FieldValue, FocusMode, KeyboardLayout, SendMethod, TextAction, TextInput};
