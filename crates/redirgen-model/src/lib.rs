pub mod options;
pub mod rule;

pub use options::{CompileOptions, NumberingOptions};
pub use rule::{CompiledRule, RedirectRule, RuleKind, action_name, policy_name};
