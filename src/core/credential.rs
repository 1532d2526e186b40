//! # Credential Store
//!
//! Keeps the API key in a single plain-text file, `~/.pybuddy/api_key`.
//! Read once at startup, rewritten on every edit of the key field, removed
//! when the user clears it. No encryption and no expiry.
//!
//! Writes go through a `.tmp` file and `rename()` so a crash mid-write
//! never leaves a half-written key behind. On unix the key file is created
//! owner-only (0600) inside an owner-only (0700) directory.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

const FILE_NAME: &str = "api_key";

pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.pybuddy/api_key`, or `None` when there is no home directory.
    pub fn default_location() -> Option<Self> {
        dirs::home_dir().map(|h| Self::new(h.join(".pybuddy").join(FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored key. Missing, unreadable, or blank files all read as `None`.
    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let key = contents.trim_end_matches(['\n', '\r']);
                if key.trim().is_empty() {
                    None
                } else {
                    debug!("Loaded API key from {}", self.path.display());
                    Some(key.to_string())
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read API key file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn set(&self, key: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            create_private_dir(parent)?;
        }
        let tmp_path = self.path.with_extension("tmp");
        // A leftover .tmp from a crashed write may carry looser permissions
        let _ = fs::remove_file(&tmp_path);
        let mut file = private_file_options().open(&tmp_path)?;
        file.write_all(key.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Removes the stored key. Clearing an already-empty store is fine.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

fn private_file_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
}

fn create_private_dir(dir: &Path) -> io::Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}
