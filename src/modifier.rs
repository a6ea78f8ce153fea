//! Task modifiers and their composition.
//!
//! A modifier is a first-class value describing one state transition over a
//! task. Most modifiers are pure field updates; `Delete` and `Relocate` own
//! the filesystem side effect that retires or transfers the backing file.
//! Every modifier stamps `updated_at` with the processing reference time.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::document::render_document;
use crate::error::{Error, Result};
use crate::task::{task_to_document, Task};
use crate::vault;

/// A single state transition over a task.
#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    /// Mark the task completed at the given time. First completion wins:
    /// applied to an already-completed task, only `updated_at` advances.
    Complete(DateTime<Utc>),
    /// Clear both completion markers.
    Uncomplete,
    /// Flag the task as a project.
    Project,
    /// Clear the project flag.
    Unproject,
    /// Reset `do_date` to the reference time's calendar date.
    DoDateToday,
    /// Flag the task as high priority.
    HighPriority,
    /// Remove the task's backing file under `dir`.
    Delete { dir: PathBuf },
    /// Transfer ownership of the task file between stores. The destination
    /// receives the task's current serialized state before the source file
    /// is removed.
    Relocate { from: PathBuf, to: PathBuf },
}

/// Result of applying a modifier: the updated task, or nothing when the
/// backing file was removed or transferred.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Task(Task),
    Removed,
}

impl Modifier {
    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Complete(_) => "complete",
            Modifier::Uncomplete => "uncomplete",
            Modifier::Project => "project",
            Modifier::Unproject => "unproject",
            Modifier::DoDateToday => "do_date_today",
            Modifier::HighPriority => "high_priority",
            Modifier::Delete { .. } => "delete",
            Modifier::Relocate { .. } => "relocate",
        }
    }

    /// Apply this modifier to a task at the given reference time.
    pub fn apply(&self, task: Task, now: DateTime<Utc>) -> Result<Outcome> {
        match self {
            Modifier::Complete(completion_time) => {
                if task.is_completed() {
                    // completed_at is untouched, only the update stamp moves
                    return Ok(Outcome::Task(Task {
                        updated_at: now,
                        ..task
                    }));
                }
                Ok(Outcome::Task(Task {
                    done: true,
                    completed_at: Some(*completion_time),
                    updated_at: now,
                    ..task
                }))
            }

            Modifier::Uncomplete => Ok(Outcome::Task(Task {
                done: false,
                completed_at: None,
                updated_at: now,
                ..task
            })),

            Modifier::Project => Ok(Outcome::Task(Task {
                is_project: true,
                updated_at: now,
                ..task
            })),

            Modifier::Unproject => Ok(Outcome::Task(Task {
                is_project: false,
                updated_at: now,
                ..task
            })),

            Modifier::DoDateToday => Ok(Outcome::Task(Task {
                do_date: now.date_naive().format("%Y-%m-%d").to_string(),
                updated_at: now,
                ..task
            })),

            Modifier::HighPriority => Ok(Outcome::Task(Task {
                is_high_priority: true,
                updated_at: now,
                ..task
            })),

            Modifier::Delete { dir } => {
                vault::remove_task_file(dir, &task.title)?;
                Ok(Outcome::Removed)
            }

            Modifier::Relocate { from, to } => {
                let rendered = render_document(&task_to_document(&task))?;
                vault::write_atomic(&vault::task_path(to, &task.title), rendered.as_bytes())?;
                vault::remove_task_file(from, &task.title)?;
                Ok(Outcome::Removed)
            }
        }
    }
}

/// Apply modifiers strictly in list order, each step consuming the previous
/// step's task.
///
/// A failing step aborts the sequence, naming the step and its index. A step
/// that removes the backing file terminates the sequence; trailing modifiers
/// are not applied.
pub fn compose(modifiers: &[Modifier], task: Task, now: DateTime<Utc>) -> Result<Outcome> {
    let mut current = task;
    for (index, modifier) in modifiers.iter().enumerate() {
        let applied = modifier
            .apply(current, now)
            .map_err(|source| Error::ModifierFailed {
                index,
                name: modifier.name(),
                source: Box::new(source),
            })?;
        match applied {
            Outcome::Task(task) => current = task,
            Outcome::Removed => return Ok(Outcome::Removed),
        }
    }
    Ok(Outcome::Task(current))
}
