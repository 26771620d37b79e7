#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]
pub mod ml_analysis;

pub use ml_analysis::*;
