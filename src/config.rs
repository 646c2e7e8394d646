//! Run configuration: which files and columns to process, and how

use crate::cell::SubstitutionMode;
use crate::delimited::read_headers;
use crate::error::{NameSwapError, Result};
use crate::session::Session;
use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::PathBuf;

pub const DEFAULT_PREFIX: &str = "renamed";

/// Columns used when none are given or detected
pub const DEFAULT_COLUMNS: [&str; 4] = ["First Name", "Last Name", "Preferred Name", "Camper"];

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub files: BTreeSet<PathBuf>,
    pub columns: BTreeSet<String>,
    pub prefix: Option<String>,
    pub seed: Option<String>,
    pub mode: SubstitutionMode,
    pub skip_confirmation: bool,
    /// Always add [`DEFAULT_COLUMNS`], not only when no columns are set
    pub default_columns: bool,
    /// Add every header containing "name"
    pub auto_columns: bool,
    pub warn_max_attempts: bool,
    pub session: Option<PathBuf>,
    applied_default_columns: bool,
    /// Mapping count of the session being resumed, if any
    resumed_mappings: Option<usize>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    pub fn applied_default_columns(&self) -> bool {
        self.applied_default_columns
    }

    /// Files in processing order
    pub fn file_list(&self) -> Vec<PathBuf> {
        self.files.iter().cloned().collect()
    }

    pub fn column_list(&self) -> Vec<String> {
        self.columns.iter().cloned().collect()
    }

    /// Drop unreadable files and fill in columns and prefix defaults
    pub fn finish_setup(&mut self) {
        self.files.retain(|path| match File::open(path) {
            Ok(_) => true,
            Err(e) => {
                match e.kind() {
                    io::ErrorKind::NotFound => {
                        log::warn!("File not found, skipping: {}", path.display())
                    }
                    io::ErrorKind::PermissionDenied => {
                        log::warn!("Permission denied, skipping: {}", path.display())
                    }
                    _ => log::warn!("Cannot read file, skipping: {} ({})", path.display(), e),
                }
                false
            }
        });

        if self.auto_columns {
            let detected = self.detect_columns();
            if !detected.is_empty() {
                println!("Auto-detected columns: {:?}", detected);
                self.columns.extend(detected);
            }
        }

        if self.default_columns || self.columns.is_empty() {
            if self.columns.is_empty() {
                println!("No columns specified, applying default columns");
            }
            self.apply_default_columns();
        }

        if self.prefix.is_none() {
            println!("No prefix specified, applying default prefix '{}'", DEFAULT_PREFIX);
            self.prefix = Some(DEFAULT_PREFIX.to_string());
        }
    }

    fn apply_default_columns(&mut self) {
        self.columns.extend(DEFAULT_COLUMNS.iter().map(|c| c.to_string()));
        self.applied_default_columns = true;
    }

    /// Take seed and mode from a saved session. They override the command
    /// line; the returned warnings name each value that was overridden.
    pub fn resume_from(&mut self, saved: &Session) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(seed) = &self.seed {
            if *seed != saved.seed {
                warnings.push(format!(
                    "session seed '{}' overrides requested seed '{}'",
                    saved.seed, seed
                ));
            }
        }
        if self.mode != saved.mode() {
            warnings.push(format!(
                "session was saved in {} mode; continuing in that mode",
                mode_name(saved.mode())
            ));
        }

        self.seed = Some(saved.seed.clone());
        self.mode = saved.mode();
        self.resumed_mappings = Some(saved.mappings.len());
        warnings
    }

    /// Headers of the configured files that look like they hold names.
    ///
    /// This is a plain substring check, so headers like "Tournament" match too.
    fn detect_columns(&self) -> BTreeSet<String> {
        let mut detected = BTreeSet::new();
        for path in &self.files {
            match read_headers(path) {
                Ok(headers) => detected.extend(
                    headers
                        .into_iter()
                        .filter(|h| h.to_lowercase().contains("name")),
                ),
                Err(e) => log::warn!(
                    "Error reading '{}' for column detection: {}",
                    path.display(),
                    e
                ),
            }
        }
        detected
    }

    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(NameSwapError::Config(
                "No valid files specified. Use -f <file> to add files.".to_string(),
            ));
        }
        if self.columns.is_empty() {
            return Err(NameSwapError::Config(
                "No columns specified or detected. Use -c <column> to add columns.".to_string(),
            ));
        }
        Ok(())
    }

    /// Human-readable summary shown before processing starts
    pub fn report(&self) -> String {
        let files: Vec<String> = self.files.iter().map(|p| p.display().to_string()).collect();
        let mut columns = format!("Columns: {:?}", self.column_list());
        if self.applied_default_columns {
            columns.push_str(" (defaults applied)");
        }

        let mut lines = vec![
            "Ready to start with the following configuration:".to_string(),
            format!("Files: {:?}", files),
            columns,
            format!("Prefix: {}", self.prefix()),
        ];
        if let Some(seed) = &self.seed {
            lines.push(format!("Seed: {}", seed));
        }
        lines.push(format!("Mode: {}", mode_name(self.mode)));
        if let Some(session) = &self.session {
            match self.resumed_mappings {
                Some(count) => lines.push(format!(
                    "Session: {} (resuming {} mappings)",
                    session.display(),
                    count
                )),
                None => lines.push(format!("Session: {} (new)", session.display())),
            }
        }
        lines.join("\n")
    }
}

fn mode_name(mode: SubstitutionMode) -> &'static str {
    if mode.is_whole_cell() {
        "whole-cell"
    } else {
        "segment"
    }
}
