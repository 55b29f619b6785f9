//! Directory creation and executable lookup

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};

/// Outcome of [`makedir`]
#[derive(Debug)]
pub enum MakeDir {
    /// The directory was already there
    Existed,
    /// The directory (and any missing parents) was created
    Created,
    /// Creation failed; the error is handed back instead of raised
    Failed(io::Error),
}

impl MakeDir {
    /// True if the directory exists after the call
    pub fn exists(&self) -> bool {
        !matches!(self, MakeDir::Failed(_))
    }
}

/// Create a directory, including missing parents, where it doesn't exist
///
/// Never returns an error: failures come back as [`MakeDir::Failed`].
pub fn makedir(path: impl AsRef<Path>) -> MakeDir {
    let path = path.as_ref();
    if path.is_dir() {
        return MakeDir::Existed;
    }

    match fs::create_dir_all(path) {
        Ok(()) => {
            debug!("Created directory {}", path.display());
            MakeDir::Created
        }
        Err(e) => {
            warn!("Could not create directory {}: {}", path.display(), e);
            MakeDir::Failed(e)
        }
    }
}

/// Check whether `name` is on `PATH` and marked as executable
///
/// Names that contain a path separator are checked directly instead of
/// being searched for.
pub fn is_tool(name: impl AsRef<OsStr>) -> bool {
    let name = Path::new(name.as_ref());
    if name.as_os_str().is_empty() {
        return false;
    }

    if name.components().count() > 1 {
        return is_executable(name);
    }

    let Some(search_path) = env::var_os("PATH") else {
        return false;
    };

    env::split_paths(&search_path).any(|dir| {
        let candidate = dir.join(name);
        is_executable(&candidate) || has_executable_extension(&candidate)
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Windows resolves `foo` to `foo.exe`, `foo.bat`, ... via `PATHEXT`
#[cfg(windows)]
fn has_executable_extension(candidate: &Path) -> bool {
    let exts = env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    exts.split(';').filter(|e| !e.is_empty()).any(|ext| {
        let mut with_ext = candidate.as_os_str().to_owned();
        with_ext.push(ext);
        Path::new(&with_ext).is_file()
    })
}

#[cfg(not(windows))]
fn has_executable_extension(_candidate: &Path) -> bool {
    false
}
