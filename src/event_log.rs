// src/event_log.rs
//
// JSONL session log: one line per dispatched command, flushed immediately
// so a crash mid-session loses nothing already flown.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::types::CommandRecord;

pub struct CommandLog {
    file: File,
    path: PathBuf,
}

impl CommandLog {
    pub fn create(output_dir: &str, session_name: &str) -> Result<Self> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("creating output directory {output_dir}"))?;
        let path = Path::new(output_dir).join(format!("{session_name}_commands.jsonl"));
        let file =
            File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        info!("💾 Command log: {}", path.display());
        Ok(Self { file, path })
    }

    pub fn append(&mut self, record: &CommandRecord) -> Result<()> {
        let line = serde_json::to_string(record)?;
        writeln!(self.file, "{line}")?;
        self.file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
