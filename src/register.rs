//! Registration flow for a newly reported event: merge-or-validate, append,
//! then run the anomaly trigger.
//!
//! This is the glue the caller wraps with persistence and notification
//! dispatch; the core only mutates the in-memory publication it was handed.

use crate::alert::{should_alert, AlertDecision};
use crate::models::{Publication, VolumeEvent};
use crate::validate::{validate, Verdict};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

/// What happened to a reported event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RegisterOutcome {
    /// Appended as a new event after passing validation.
    Recorded { alert: AlertDecision },
    /// Added onto an existing event with the same date; validation skipped.
    Merged { amount: i64, alert: AlertDecision },
    /// History left untouched.
    Rejected { reason: String },
}

/// Record `amount` for `date` on `publication`.
///
/// A duplicate date merges by addition and skips validation; a new date is
/// validated against the historical amounts first. The anomaly trigger runs
/// on recorded and merged events, never on rejections. The caller is
/// responsible for persisting the mutated publication and for dispatching
/// the alert decision.
pub fn register_event(
    publication: &mut Publication,
    date: NaiveDate,
    amount: i64,
    as_of: NaiveDate,
) -> RegisterOutcome {
    if let Some(index) = publication.events.iter().position(|e| e.date == date) {
        publication.events[index].amount += amount;
        let merged = publication.events[index].amount;
        debug!(publication = %publication.name, %date, merged, "Merged duplicate-date event");
        let alert = should_alert(publication, date, merged, as_of);
        return RegisterOutcome::Merged {
            amount: merged,
            alert,
        };
    }

    match validate(amount, &publication.amounts()) {
        Verdict::Rejected { reason } => {
            info!(publication = %publication.name, %date, amount, reason, "Event rejected");
            RegisterOutcome::Rejected { reason }
        }
        Verdict::Accepted => {
            publication.events.push(VolumeEvent { date, amount });
            debug!(publication = %publication.name, %date, amount, "Event recorded");
            let alert = should_alert(publication, date, amount, as_of);
            RegisterOutcome::Recorded { alert }
        }
    }
}
