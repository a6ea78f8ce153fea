//! `tend init` - create the vault skeleton and a starter configuration.

use std::path::{Path, PathBuf};

use crate::config::{Config, CONFIG_FILE};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

#[derive(serde::Serialize)]
struct InitData {
    config_path: PathBuf,
    root: PathBuf,
    created_config: bool,
}

pub fn execute(
    config_path: Option<&Path>,
    root: Option<PathBuf>,
    options: OutputOptions,
) -> Result<()> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

    let (config, created_config) = if config_path.exists() {
        (Config::load(&config_path)?, false)
    } else {
        let mut config = Config::default();
        if let Some(root) = root {
            config.root = root;
        }
        config.save(&config_path)?;
        (config, true)
    };

    let vault = config.vault();
    vault.init()?;

    let mut human = HumanOutput::new("Vault initialized");
    human.push_summary("root", config.root.display().to_string());
    human.push_summary("config", config_path.display().to_string());
    if !created_config {
        human.push_detail("existing configuration kept");
    }

    emit_success(
        options,
        "init",
        &InitData {
            config_path,
            root: config.root.clone(),
            created_config,
        },
        Some(&human),
    )
}
