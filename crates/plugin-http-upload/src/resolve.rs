//! Locates the uploadable artifact for a finished build.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Whether a file looks like a distributable executable.
///
/// Windows builds are recognized by extension. On Unix the execute bit
/// decides, since packaged binaries carry no extension there.
pub fn is_executable(path: &Path) -> bool {
    if path.extension().and_then(|e| e.to_str()) == Some("exe") {
        return true;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = path.metadata() {
            return metadata.is_file() && metadata.permissions().mode() & 0o111 != 0;
        }
    }
    false
}

/// Finds the artifact to upload.
///
/// A file output is taken as-is when it looks executable. For a directory
/// output only direct children are considered, and the newest executable
/// wins; packaging backends drop one binary per build, so the newest one
/// is the build that just finished.
pub fn find_artifact(output: &Path) -> Option<PathBuf> {
    if output.is_file() {
        return is_executable(output).then(|| output.to_path_buf());
    }
    if !output.is_dir() {
        return None;
    }

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in std::fs::read_dir(output).ok()?.flatten() {
        let path = entry.path();
        if !path.is_file() || !is_executable(&path) {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let replace = match &newest {
            Some((best, _)) => modified > *best,
            None => true,
        };
        if replace {
            newest = Some((modified, path));
        }
    }
    newest.map(|(_, path)| path)
}
