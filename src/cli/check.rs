//! `tend check` - validate every task file, change nothing.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::process;

pub fn execute(config: &Config, options: OutputOptions) -> Result<()> {
    let vault = config.vault();
    let report = process::check(&vault)?;

    let mut human = HumanOutput::new("Vault check");
    human.push_summary("files", report.files.len().to_string());
    human.push_summary("invalid", report.invalid.to_string());
    for file in &report.files {
        if let Some(error) = &file.error {
            human.push_warning(error.clone());
        }
    }

    let invalid = report.invalid;
    emit_success(options, "check", &report, Some(&human))?;

    if invalid > 0 {
        return Err(Error::RunFailed(invalid));
    }
    Ok(())
}
