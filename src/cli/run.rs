//! `tend run` - one batch pass over both stores.

use chrono::Utc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::process;

pub fn execute(config: &Config, dry_run: bool, options: OutputOptions) -> Result<()> {
    let vault = config.vault();
    let retention = config.retention()?;
    let now = Utc::now();

    let report = process::run(&vault, now, &retention, dry_run)?;

    let header = if dry_run { "Run (dry)" } else { "Run" };
    let mut human = HumanOutput::new(header);
    human.push_summary("processed", report.processed.to_string());
    human.push_summary("retained", report.retained.to_string());
    human.push_summary("updated", report.updated.to_string());
    human.push_summary("relocated", report.relocated.to_string());
    human.push_summary("deleted", report.deleted.to_string());
    human.push_summary("archived", report.archived.to_string());
    for failure in &report.failures {
        human.push_warning(failure.error.clone());
    }

    let failures = report.failures.len();
    emit_success(options, "run", &report, Some(&human))?;

    if failures > 0 {
        return Err(Error::RunFailed(failures));
    }
    Ok(())
}
