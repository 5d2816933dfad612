//! Presswatch core: statistical validation and anomaly alerting for
//! per-publication news volume counts.
//!
//! Pure decision logic only. Storage, alert delivery and request validation
//! belong to external collaborators; every call recomputes from the history
//! snapshot it is handed.

mod alert;
mod models;
mod register;
mod report;
mod validate;

pub mod stats;

pub use alert::{should_alert, AlertDecision};
pub use models::{Publication, VolumeEvent};
pub use register::{register_event, RegisterOutcome};
pub use report::{summarize, weekly_slice, Summary};
pub use validate::{validate, Verdict, CV_THRESHOLD, MIN_HISTORY};
