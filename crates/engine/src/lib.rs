//! Placement filter & excluder engine: term classification, exclusion
//! application, and the per-run orchestrator.

pub mod apply;
pub mod classify;
pub mod run;

pub use apply::{apply_exclusion, get_or_create_list};
pub use classify::{classify, should_exclude, Decision};
pub use run::run;
