//! Helper functions for rendering
//!
//! Date formatting and reading time estimation, shared by the generator
//! and the template filters.

mod date;
mod reading;

pub use date::*;
pub use reading::*;
