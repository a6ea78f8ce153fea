use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tend::vault::{task_path, Vault};

pub struct TestVault {
    dir: TempDir,
    vault: Vault,
}

impl TestVault {
    pub fn init() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let vault = Vault::new(dir.path(), "tasks", "tasks/completed", "archive");
        vault.init().expect("failed to init vault");
        Self { dir, vault }
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn write_active(&self, title: &str, contents: &str) -> PathBuf {
        let path = task_path(self.vault.active_dir(), title);
        fs::write(&path, contents).expect("failed to write active task");
        path
    }

    pub fn write_completed(&self, title: &str, contents: &str) -> PathBuf {
        let path = task_path(self.vault.completed_dir(), title);
        fs::write(&path, contents).expect("failed to write completed task");
        path
    }

    pub fn active_path(&self, title: &str) -> PathBuf {
        task_path(self.vault.active_dir(), title)
    }

    pub fn completed_path(&self, title: &str) -> PathBuf {
        task_path(self.vault.completed_dir(), title)
    }

    pub fn archive_path(&self, title: &str) -> PathBuf {
        task_path(self.vault.archive_dir(), title)
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("failed to read file")
    }

    /// Write a `tend.toml` pointing at this vault, for CLI tests.
    pub fn write_config(&self) -> PathBuf {
        let path = self.dir.path().join("tend.toml");
        let contents = format!(
            "root = {:?}\n\n[paths]\nactive = \"tasks\"\ncompleted = \"tasks/completed\"\narchive = \"archive\"\n\n[retention]\nempty_task = \"7d\"\nproject_before_archive = \"30d\"\n",
            self.dir.path().display().to_string()
        );
        fs::write(&path, contents).expect("failed to write config");
        path
    }
}
