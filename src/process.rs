//! Batch processing passes over the vault stores.
//!
//! One run is two passes: the completed store first, then the active store.
//! Each file goes through read, parse, decode, plan, apply; a file that
//! fails is recorded and the pass moves on. There are no cross-file
//! transactions, so a crash mid-run leaves every untouched task in its
//! prior, still-valid state and the next run re-plans from scratch.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::document::{parse_document, render_document, title_from_path};
use crate::error::{Error, Result};
use crate::lifecycle::{plan_active, plan_completed, Disposition, Plan, RetentionConfig};
use crate::modifier::{compose, Outcome};
use crate::task::{document_to_task, record_to_document, task_to_document, Record, Task};
use crate::vault::{self, Vault};

/// A file that could not be processed this run.
#[derive(Debug, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Counters and failures accumulated over one run.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub processed: usize,
    pub retained: usize,
    pub updated: usize,
    pub relocated: usize,
    pub deleted: usize,
    pub archived: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
}

impl RunReport {
    fn record_failure(&mut self, path: &Path, source: Error) {
        let wrapped = Error::FileProcessing {
            path: path.to_path_buf(),
            source: Box::new(source),
        };
        warn!(error = %wrapped, "file failed");
        self.failures.push(FileFailure {
            path: path.to_path_buf(),
            error: wrapped.to_string(),
        });
    }
}

/// Run both store passes and return the accumulated report.
///
/// The report lists every per-file failure; callers treat a non-empty
/// failure list as a failed run.
pub fn run(
    vault: &Vault,
    now: DateTime<Utc>,
    retention: &RetentionConfig,
    dry_run: bool,
) -> Result<RunReport> {
    let mut report = RunReport::default();
    process_completed_store(vault, now, retention, dry_run, &mut report)?;
    process_active_store(vault, now, dry_run, &mut report)?;
    info!(
        processed = report.processed,
        retained = report.retained,
        updated = report.updated,
        relocated = report.relocated,
        deleted = report.deleted,
        archived = report.archived,
        failures = report.failures.len(),
        "run finished"
    );
    Ok(report)
}

/// One pass over the completed store.
///
/// An unreadable store directory aborts the pass; per-file errors do not.
pub fn process_completed_store(
    vault: &Vault,
    now: DateTime<Utc>,
    retention: &RetentionConfig,
    dry_run: bool,
    report: &mut RunReport,
) -> Result<()> {
    for path in vault.list_task_files(vault.completed_dir())? {
        report.processed += 1;
        let task = match load_task(&path) {
            Ok(task) => task,
            Err(err) => {
                report.record_failure(&path, err);
                continue;
            }
        };

        let plan = plan_completed(&task, now, retention, vault);
        debug!(title = %task.title, disposition = ?plan.disposition, "planned completed task");
        if let Err(err) = apply_plan(vault, vault.completed_dir(), task, &plan, now, dry_run, report)
        {
            report.record_failure(&path, err);
        }
    }
    Ok(())
}

/// One pass over the active store.
pub fn process_active_store(
    vault: &Vault,
    now: DateTime<Utc>,
    dry_run: bool,
    report: &mut RunReport,
) -> Result<()> {
    for path in vault.list_task_files(vault.active_dir())? {
        report.processed += 1;
        let task = match load_task(&path) {
            Ok(task) => task,
            Err(err) => {
                report.record_failure(&path, err);
                continue;
            }
        };

        let plan = plan_active(&task, now, vault);
        debug!(title = %task.title, disposition = ?plan.disposition, "planned active task");
        if let Err(err) = apply_plan(vault, vault.active_dir(), task, &plan, now, dry_run, report) {
            report.record_failure(&path, err);
        }
    }
    Ok(())
}

/// Read and decode one task file.
fn load_task(path: &Path) -> Result<Task> {
    let source = vault::read_file(path)?;
    let doc = parse_document(title_from_path(path), &source)?;
    document_to_task(&doc)
}

fn apply_plan(
    vault: &Vault,
    store_dir: &Path,
    task: Task,
    plan: &Plan,
    now: DateTime<Utc>,
    dry_run: bool,
    report: &mut RunReport,
) -> Result<()> {
    match plan.disposition {
        Disposition::Retain => {
            report.retained += 1;
        }

        Disposition::Delete => {
            if !dry_run {
                vault::remove_task_file(store_dir, &task.title)?;
            }
            report.deleted += 1;
        }

        Disposition::Archive => {
            if !dry_run {
                archive_task(vault, store_dir, &task, now)?;
            }
            report.archived += 1;
        }

        Disposition::Update => {
            if dry_run {
                report.updated += 1;
                return Ok(());
            }
            match compose(&plan.modifiers, task, now)? {
                Outcome::Task(updated) => {
                    let rendered = render_document(&task_to_document(&updated))?;
                    vault::write_atomic(
                        &vault::task_path(store_dir, &updated.title),
                        rendered.as_bytes(),
                    )?;
                    report.updated += 1;
                }
                // a relocate took the file with it; nothing left to rewrite
                Outcome::Removed => {
                    report.relocated += 1;
                }
            }
        }
    }
    Ok(())
}

/// Convert a retired project into an archive record, then delete the task.
///
/// The record is written before the task file is removed, so a crash in
/// between leaves both copies rather than neither.
fn archive_task(vault: &Vault, store_dir: &Path, task: &Task, now: DateTime<Utc>) -> Result<()> {
    let record = Record::from_task(task, now);
    let rendered = render_document(&record_to_document(&record))?;
    vault::write_atomic(
        &vault::task_path(vault.archive_dir(), &record.title),
        rendered.as_bytes(),
    )?;
    vault::remove_task_file(store_dir, &task.title)
}

/// Per-file validity produced by [`check`].
#[derive(Debug, Serialize)]
pub struct FileCheck {
    pub path: PathBuf,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Validation report over both task stores.
#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    pub files: Vec<FileCheck>,
    pub invalid: usize,
}

/// Parse and decode every task file without planning or applying anything.
///
/// A task that is done without a completion stamp decodes, but must not
/// pass validation silently; `run` is what repairs it.
pub fn check(vault: &Vault) -> Result<CheckReport> {
    let mut report = CheckReport::default();
    for dir in [vault.completed_dir(), vault.active_dir()] {
        for path in vault.list_task_files(dir)? {
            let outcome = load_task(&path).and_then(|task| {
                if task.done && task.completed_at.is_none() {
                    Err(Error::InconsistentCompletion(task.title))
                } else {
                    Ok(())
                }
            });
            match outcome {
                Ok(()) => report.files.push(FileCheck {
                    path,
                    ok: true,
                    error: None,
                }),
                Err(err) => {
                    let wrapped = Error::FileProcessing {
                        path: path.clone(),
                        source: Box::new(err),
                    };
                    report.invalid += 1;
                    report.files.push(FileCheck {
                        path,
                        ok: false,
                        error: Some(wrapped.to_string()),
                    });
                }
            }
        }
    }
    Ok(report)
}
