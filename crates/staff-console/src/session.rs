//! # Session Store
//!
//! The console keeps a handful of values between runs: the bearer token, the selected
//! navigation entry, and the email address a password reset was requested for. They live
//! in one small JSON file.
//!
//! - A missing file is an empty session.
//! - Every change is written straight away, through a temp file in the same directory
//!   that is then renamed over the old one. A crash mid-write leaves the previous file.
//! - A change takes effect in memory even if the write fails; the caller gets the error.
//!
//! The store is shared (`Arc<SessionStore>`) between the API client, which reads the token
//! on every request, and the CLI, which updates it on login and logout.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read session file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Session file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to write session file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Navigation entries, in the order the persisted index counts them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Ready,
    Kitchen,
    Shifts,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Ready, Screen::Kitchen, Screen::Shifts];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Unknown indices fall back to the first entry.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(default, rename = "selectedIndex")]
    selected_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email_to_reset: Option<String>,
}

#[derive(Debug)]
pub struct SessionStore {
    /// `None` for a store that lives only in memory.
    path: Option<PathBuf>,
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Opens the session persisted at `path`, or an empty one if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let state = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| SessionError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionState::default(),
            Err(source) => return Err(SessionError::Read { path, source }),
        };
        debug!(path = %path.display(), "Session opened");
        Ok(Self {
            path: Some(path),
            state: Mutex::new(state),
        })
    }

    /// A session that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn auth_token(&self) -> Option<String> {
        self.lock().auth_token.clone()
    }

    /// True when a non-empty token is stored. Screens behind login check this first.
    pub fn is_authenticated(&self) -> bool {
        self.lock()
            .auth_token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }

    pub fn set_auth_token(&self, token: impl Into<String>) -> Result<(), SessionError> {
        self.update(|s| s.auth_token = Some(token.into()))
    }

    pub fn clear_auth_token(&self) -> Result<(), SessionError> {
        self.update(|s| s.auth_token = None)
    }

    pub fn selected_index(&self) -> usize {
        self.lock().selected_index
    }

    pub fn set_selected_index(&self, index: usize) -> Result<(), SessionError> {
        self.update(|s| s.selected_index = index)
    }

    /// The screen the persisted index points at.
    pub fn selected_screen(&self) -> Screen {
        Screen::from_index(self.selected_index())
    }

    pub fn select_screen(&self, screen: Screen) -> Result<(), SessionError> {
        self.set_selected_index(screen.index())
    }

    pub fn email_to_reset(&self) -> Option<String> {
        self.lock().email_to_reset.clone()
    }

    pub fn set_email_to_reset(&self, email: impl Into<String>) -> Result<(), SessionError> {
        self.update(|s| s.email_to_reset = Some(email.into()))
    }

    pub fn clear_email_to_reset(&self) -> Result<(), SessionError> {
        self.update(|s| s.email_to_reset = None)
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `change` in memory, then writes the file. The in-memory value stands even
    /// when the write fails.
    fn update(&self, change: impl FnOnce(&mut SessionState)) -> Result<(), SessionError> {
        let mut state = self.lock();
        change(&mut state);
        match &self.path {
            Some(path) => persist(path, &state),
            None => Ok(()),
        }
    }
}

fn persist(path: &Path, state: &SessionState) -> Result<(), SessionError> {
    let write_err = |source| SessionError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let contents = serde_json::to_vec_pretty(state).map_err(|e| write_err(e.into()))?;
    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    temp.write_all(&contents).map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
