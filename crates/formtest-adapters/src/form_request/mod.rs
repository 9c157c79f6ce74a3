//! Form request adapters.

mod rule;

pub use rule::{RuleFormRequest, RuleFormRequestBuilder};
