//! Resolution of flat, whitespace-annotated operator segments into
//! nested expression trees.

pub mod error;
pub mod parsing;
