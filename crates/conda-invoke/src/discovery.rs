//! Conda executable discovery
//!
//! An explicit executable path wins when it names an existing file.
//! Otherwise `PATH` is searched: first for the explicit value when it is a
//! bare command name (e.g. `mamba`), then for the default `conda`.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Executable searched for on `PATH` when nothing else resolves
pub const DEFAULT_EXECUTABLE: &str = "conda";

/// Resolve the conda executable to run.
pub fn find_executable(explicit: Option<&Path>) -> Result<PathBuf> {
    let path_var = std::env::var_os("PATH");
    find_executable_in(explicit, path_var.as_deref())
}

/// [`find_executable`] against an explicit `PATH` value.
pub fn find_executable_in(explicit: Option<&Path>, path_var: Option<&OsStr>) -> Result<PathBuf> {
    let explicit = explicit.filter(|p| !p.as_os_str().is_empty());

    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        tracing::debug!(path = %path.display(), "explicit conda executable not found, searching PATH");
    }

    let mut searched = Vec::new();
    if let Some(name) = explicit.filter(|p| is_bare_name(p)) {
        searched.push(name.to_path_buf());
    }
    searched.push(PathBuf::from(DEFAULT_EXECUTABLE));
    searched.dedup();

    for name in &searched {
        if let Some(found) = search_path(name, path_var) {
            tracing::debug!(path = %found.display(), "resolved conda executable");
            return Ok(found);
        }
    }

    let mut names: Vec<String> = Vec::new();
    if let Some(path) = explicit.filter(|p| !is_bare_name(p)) {
        names.push(path.display().to_string());
    }
    names.extend(searched.iter().map(|p| p.display().to_string()));

    Err(Error::ExecutableNotFound {
        searched: names.join(", "),
    })
}

/// A single path component with no directory part
fn is_bare_name(path: &Path) -> bool {
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Look `name` up in every directory of `path_var`, honoring `PATHEXT` on Windows.
fn search_path(name: &Path, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let path_var = path_var?;

    let extensions: Vec<String> = if cfg!(windows) {
        std::env::var("PATHEXT")
            .unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string())
            .split(';')
            .map(|s| s.to_ascii_lowercase())
            .collect()
    } else {
        vec![String::new()]
    };

    for dir in std::env::split_paths(path_var) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        for ext in &extensions {
            let candidate = if ext.is_empty() {
                dir.join(name)
            } else {
                let mut file_name = name.as_os_str().to_os_string();
                file_name.push(ext);
                dir.join(file_name)
            };
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }

    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
