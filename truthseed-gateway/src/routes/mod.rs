//! Route handlers

pub mod health;
pub mod prefs;
pub mod truths;
pub mod verse;

pub use health::{health_check, readiness_check, version_info};
pub use prefs::{handle_prefs_get, handle_set_translation};
pub use truths::{handle_truths_list, handle_truths_random};
pub use verse::handle_verse;
