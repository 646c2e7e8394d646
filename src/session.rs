//! Persisted mapping sessions
//!
//! A session file keeps the seed, the substitution mode and every mapping
//! issued so far, so a later run over the same (or extended) data hands out
//! the same substitutes:
//!
//! ```json
//! {
//!   "seed": "1234",
//!   "rename_whole_cells": false,
//!   "mappings": {
//!     "Smith": "Olivia"
//!   }
//! }
//! ```

use crate::cell::SubstitutionMode;
use crate::error::{NameSwapError, Result};
use crate::names::MappingTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub seed: String,
    pub rename_whole_cells: bool,
    pub mappings: MappingTable,
}

impl Session {
    pub fn new(seed: &str, mode: SubstitutionMode, mappings: MappingTable) -> Self {
        Self {
            seed: seed.to_string(),
            rename_whole_cells: mode.is_whole_cell(),
            mappings,
        }
    }

    pub fn mode(&self) -> SubstitutionMode {
        SubstitutionMode::from_whole_cell_flag(self.rename_whole_cells)
    }

    /// Parse session JSON, checking that the mappings can seed a table
    pub fn from_json(path: &Path, content: &str) -> Result<Self> {
        let session: Session =
            serde_json::from_str(content).map_err(|e| NameSwapError::SessionMalformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        session.check_mappings(path)?;
        Ok(session)
    }

    fn check_mappings(&self, path: &Path) -> Result<()> {
        let malformed = |reason: String| NameSwapError::SessionMalformed {
            path: path.to_path_buf(),
            reason,
        };

        let mut owners: HashMap<&str, &str> = HashMap::new();
        for (original, substitute) in self.mappings.iter() {
            if original.trim().is_empty() || original.trim() != original {
                return Err(malformed(format!("invalid original name '{}'", original)));
            }
            if substitute.trim().is_empty() {
                return Err(malformed(format!("blank substitute for '{}'", original)));
            }
            if let Some(other) = owners.insert(substitute, original) {
                return Err(malformed(format!(
                    "'{}' and '{}' share substitute '{}'",
                    other, original, substitute
                )));
            }
        }
        Ok(())
    }
}

/// Read a session file.
///
/// A missing file yields [`NameSwapError::SessionNotFound`], which callers
/// treat as "start fresh". Anything else is fatal.
pub fn load(path: &Path) -> Result<Session> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => NameSwapError::SessionNotFound(path.to_path_buf()),
        _ => NameSwapError::Io(e),
    })?;
    let content =
        String::from_utf8(bytes).map_err(|_| NameSwapError::SessionEncoding(path.to_path_buf()))?;
    let session = Session::from_json(path, &content)?;
    log::info!(
        "Loaded session {} ({} mappings)",
        path.display(),
        session.mappings.len()
    );
    Ok(session)
}

/// Like [`load`], but a missing file is `Ok(None)`
pub fn load_optional(path: &Path) -> Result<Option<Session>> {
    match load(path) {
        Ok(session) => Ok(Some(session)),
        Err(NameSwapError::SessionNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write a session file.
///
/// The document is written to a sibling temp file and renamed over `path`,
/// so a failure leaves any previous session untouched.
pub fn save(
    path: &Path,
    seed: &str,
    mode: SubstitutionMode,
    mappings: &MappingTable,
) -> Result<()> {
    let session = Session::new(seed, mode, mappings.clone());
    let json = serde_json::to_string_pretty(&session).map_err(|e| NameSwapError::SessionWrite {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })?;

    let tmp = temp_path(path);
    let write_err = |source| NameSwapError::SessionWrite {
        path: path.to_path_buf(),
        source,
    };

    let written = fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }

    log::info!("Saved session {} ({} mappings)", path.display(), mappings.len());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
