//! Lifecycle planning for tasks.
//!
//! Two independent entry points, one per store. Each classifies a task's
//! current state and retention eligibility and emits a [`Plan`]: a terminal
//! disposition, or an ordered modifier list that brings the task to its next
//! consistent state. Planning is pure; applying the plan is the processor's
//! job.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::modifier::Modifier;
use crate::task::Task;
use crate::vault::Vault;

/// Retention thresholds for completed tasks.
#[derive(Debug, Clone, Copy)]
pub struct RetentionConfig {
    /// How long a completed non-project task stays in the completed store.
    pub empty_task: Duration,
    /// How long a completed project stays before it is archived.
    pub project: Duration,
}

/// What to do with a task this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Leave the task as it is; no re-write.
    Retain,
    /// Apply the plan's modifiers.
    Update,
    /// Convert to an archival record, then delete the task file.
    Archive,
    /// Delete the task file.
    Delete,
}

/// Planner output: a disposition, plus the ordered modifiers when the
/// disposition is [`Disposition::Update`].
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub disposition: Disposition,
    pub modifiers: Vec<Modifier>,
}

impl Plan {
    fn retain() -> Self {
        Self {
            disposition: Disposition::Retain,
            modifiers: Vec::new(),
        }
    }

    fn update(modifiers: Vec<Modifier>) -> Self {
        Self {
            disposition: Disposition::Update,
            modifiers,
        }
    }

    fn terminal(disposition: Disposition) -> Self {
        Self {
            disposition,
            modifiers: Vec::new(),
        }
    }
}

/// Whether a completed task is still within its retention window.
///
/// Incomplete tasks are never eligible for removal, so this is true for any
/// task that is not fully completed, for all `now`.
pub fn should_retain(task: &Task, now: DateTime<Utc>, retention: &RetentionConfig) -> bool {
    let completed_at = match task.completed_at {
        Some(completed_at) if task.done => completed_at,
        _ => return true,
    };

    let completed_age = now - completed_at;
    if task.is_project {
        completed_age <= retention.project
    } else {
        completed_age <= retention.empty_task
    }
}

/// Plan the next transition for a task in the completed store.
pub fn plan_completed(
    task: &Task,
    now: DateTime<Utc>,
    retention: &RetentionConfig,
    vault: &Vault,
) -> Plan {
    if !task.is_completed() {
        // done without a completion stamp: repair in place
        if task.done {
            return Plan::update(vec![Modifier::Complete(now)]);
        }
        // a completion stamp without done: the task was uncompleted
        if task.completed_at.is_some() {
            return Plan::update(vec![
                Modifier::Uncomplete,
                Modifier::Relocate {
                    from: vault.completed_dir().to_path_buf(),
                    to: vault.active_dir().to_path_buf(),
                },
            ]);
        }
        // neither marker set: not eligible for removal, leave it alone
        return Plan::retain();
    }

    if !should_retain(task, now, retention) {
        if task.is_project {
            return Plan::terminal(Disposition::Archive);
        }
        return Plan::terminal(Disposition::Delete);
    }

    Plan::retain()
}

/// Plan the next transition for a task in the active store.
pub fn plan_active(task: &Task, now: DateTime<Utc>, vault: &Vault) -> Plan {
    let mut modifiers = Vec::new();

    if task.content.is_some() && !task.is_project {
        modifiers.push(Modifier::Project);
    }
    if task.content.is_none() && task.is_project {
        modifiers.push(Modifier::Unproject);
    }

    if do_date_overdue(&task.do_date, now) {
        modifiers.push(Modifier::DoDateToday);
    }

    if task.done {
        modifiers.push(Modifier::Complete(now));
        modifiers.push(Modifier::Relocate {
            from: vault.active_dir().to_path_buf(),
            to: vault.completed_dir().to_path_buf(),
        });
    }

    if modifiers.is_empty() {
        return Plan::retain();
    }
    Plan::update(modifiers)
}

/// Calendar-day comparison, not wall-clock: a do-date is overdue only when
/// its day is strictly before the reference time's day. Unparseable values
/// are left alone.
fn do_date_overdue(do_date: &str, now: DateTime<Utc>) -> bool {
    match NaiveDate::parse_from_str(do_date, "%Y-%m-%d") {
        Ok(date) => date < now.date_naive(),
        Err(_) => false,
    }
}
