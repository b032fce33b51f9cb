//! Driver implementations of the element capability contract
//!
//! Real desktop drivers live outside this crate and plug in by implementing
//! [`UIElementImpl`](crate::element::UIElementImpl) and
//! [`Clipboard`](crate::element::Clipboard). The in-memory driver simulates
//! widgets in-process and records every UI action it receives.

pub mod memory;

pub use memory::{MemoryAction, MemoryClipboard, MemoryElement, MemoryRole};
