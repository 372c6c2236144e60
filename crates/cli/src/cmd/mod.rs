mod eval;
mod rules;

pub use eval::cmd_eval;
pub use rules::cmd_rules;
