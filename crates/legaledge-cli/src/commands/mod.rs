//! Command implementations.

pub mod analyze;
pub mod profile;

pub use self::analyze::{build_assistant, execute_analyze, Assistant};
pub use self::profile::execute_profile;
