//! Reusable TUI widgets.

pub mod form;

pub use form::{FieldKind, Form, FormField, draw_form};
