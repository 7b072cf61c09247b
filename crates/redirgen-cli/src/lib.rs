//! CLI library components for the redirect generator.

pub mod logging;
pub mod run;
