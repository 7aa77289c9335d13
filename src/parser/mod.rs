//! Parser module: source scanning and docstring structuring.

pub mod docstring;
pub mod python;
pub mod sections;
