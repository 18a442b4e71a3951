//! Conversion module.
//!
//! - Transformer: the pure row-level operations (check, project, normalize)
//! - Pipeline: parse → check → transform → serialize

pub mod pipeline;
pub mod transformer;

pub use pipeline::*;
pub use transformer::*;
