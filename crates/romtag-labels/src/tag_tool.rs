//! Label backend driving the `tag` command-line tool
//!
//! `tag --list --no-name FILE` prints the labels comma-joined;
//! `tag --add A,B FILE` and `tag --remove A,B FILE` mutate them.

use crate::error::{LabelError, LabelResult};
use crate::traits::{join_batch, split_batch, LabelStore};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Output;
use tokio::process::Command;

/// `tag` tool backend
pub struct TagTool {
    program: String,
}

impl TagTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check the tool can be started
    pub async fn probe(&self) -> LabelResult<()> {
        match Command::new(&self.program).arg("--version").output().await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(LabelError::ToolMissing {
                program: self.program.clone(),
            }),
            Err(e) => Err(LabelError::Spawn {
                program: self.program.clone(),
                source: e,
            }),
        }
    }

    async fn run(&self, args: &[&str], file: &Path) -> LabelResult<Output> {
        if !file.exists() {
            return Err(LabelError::FileNotFound {
                path: file.display().to_string(),
            });
        }

        let output = Command::new(&self.program)
            .args(args)
            .arg(file)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => LabelError::ToolMissing {
                    program: self.program.clone(),
                },
                _ => LabelError::Spawn {
                    program: self.program.clone(),
                    source: e,
                },
            })?;

        if !output.status.success() {
            return Err(LabelError::CommandFailed {
                program: self.program.clone(),
                args: format!("{} {}", args.join(" "), file.display()),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

#[async_trait]
impl LabelStore for TagTool {
    async fn get_labels(&self, file: &Path) -> LabelResult<BTreeSet<String>> {
        let output = self.run(&["--list", "--no-name"], file).await?;
        Ok(split_batch(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn remove_labels(&self, file: &Path, labels: &BTreeSet<String>) -> LabelResult<()> {
        if labels.is_empty() {
            return Ok(());
        }
        let batch = join_batch(labels)?;
        self.run(&["--remove", &batch], file).await?;
        Ok(())
    }

    async fn add_labels(&self, file: &Path, labels: &BTreeSet<String>) -> LabelResult<()> {
        if labels.is_empty() {
            return Ok(());
        }
        let batch = join_batch(labels)?;
        self.run(&["--add", &batch], file).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "tag"
    }
}
