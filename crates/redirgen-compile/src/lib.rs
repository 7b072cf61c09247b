//! Compiles redirect rules into responder action/policy/bind command text.
//!
//! The pipeline is pure string construction: no network, no filesystem.
//! `batch::compile_batch` is the entry point; the submodules are the
//! individual compilers it drives.

pub mod batch;
pub mod command;
pub mod matcher;
pub mod rollback;
pub mod rule;
pub mod target;

pub use batch::{BatchOutput, compile_batch};
pub use matcher::{PathMatch, compile_path_matcher, is_fallback_path};
pub use rollback::rollback_commands;
pub use rule::{compile_rule, rule_commands};
pub use target::{QUERY_FORWARD_EXPR, build_redirect_target};
