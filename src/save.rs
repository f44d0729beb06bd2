use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use directories::BaseDirs;
use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to set permissions on {path}: {source}")]
    Permissions {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecIssue {
    #[error("executable file does not exist: {0}")]
    Missing(PathBuf),
    #[error("path is not a regular file: {0}")]
    NotRegular(PathBuf),
    #[error("file is not executable: {0}")]
    NotExecutable(PathBuf),
}

/// Where the generated file should be written.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    pub desktop: bool,
    pub local_apps: bool,
    pub custom_dir: Option<PathBuf>,
}

/// Result of one save target; failures on one target never stop the others.
#[derive(Debug)]
pub struct TargetOutcome {
    pub path: PathBuf,
    pub result: Result<(), SaveError>,
}

pub fn desktop_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join("Desktop"))
}

pub fn applications_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.data_dir().join("applications"))
}

/// Turn a display name into a safe `.desktop` file stem. Spaces and
/// filesystem-hostile characters become underscores.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();

    if sanitized.is_empty() {
        "my_application".to_string()
    } else {
        sanitized
    }
}

/// Custom directories must not climb out of where the user pointed.
pub fn validate_custom_dir(dir: &Path) -> Result<(), String> {
    if dir
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(format!("path traversal not allowed: {}", dir.display()));
    }
    Ok(())
}

/// Full paths the entry would be written to, in a fixed order.
pub fn resolve_targets(options: &SaveOptions, filename: &str) -> Vec<PathBuf> {
    let mut targets = Vec::new();

    if options.desktop {
        if let Some(dir) = desktop_dir() {
            targets.push(dir.join(filename));
        }
    }
    if options.local_apps {
        if let Some(dir) = applications_dir() {
            targets.push(dir.join(filename));
        }
    }
    if let Some(dir) = &options.custom_dir {
        targets.push(dir.join(filename));
    }

    targets
}

/// Targets that already exist on disk. The caller decides whether overwriting
/// is acceptable before anything is written.
pub fn existing_targets(targets: &[PathBuf]) -> Vec<PathBuf> {
    targets.iter().filter(|p| p.exists()).cloned().collect()
}

/// Write the content to every target. Each target gets its directory created,
/// the file written, the executable bit set, and a best-effort trust mark.
pub fn save_to_targets(content: &str, targets: &[PathBuf]) -> Vec<TargetOutcome> {
    targets
        .iter()
        .map(|target| TargetOutcome {
            path: target.clone(),
            result: save_one(content, target),
        })
        .collect()
}

fn save_one(content: &str, target: &Path) -> Result<(), SaveError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| SaveError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(target, content).map_err(|source| SaveError::Write {
        path: target.to_path_buf(),
        source,
    })?;

    set_executable(target)?;

    // Desktop shells ignore launchers they do not trust; marking is
    // best-effort and failure only warrants a warning.
    if let Err(err) = mark_trusted(target) {
        warn!("could not mark {} as trusted: {}", target.display(), err);
    }

    debug!("wrote desktop entry to {}", target.display());
    Ok(())
}

fn set_executable(path: &Path) -> Result<(), SaveError> {
    let metadata = fs::metadata(path).map_err(|source| SaveError::Permissions {
        path: path.to_path_buf(),
        source,
    })?;
    let mut perms = metadata.permissions();
    perms.set_mode(perms.mode() | 0o111);
    fs::set_permissions(path, perms).map_err(|source| SaveError::Permissions {
        path: path.to_path_buf(),
        source,
    })
}

/// Ask gio to flag the launcher as trusted so the shell runs it without
/// prompting.
fn mark_trusted(path: &Path) -> Result<(), String> {
    let status = Command::new("gio")
        .args(["set"])
        .arg(path)
        .args(["metadata::trusted", "true"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| format!("failed to run gio: {}", e))?;

    if !status.success() {
        return Err(format!("gio exited with {}", status));
    }
    Ok(())
}

/// Non-fatal sanity check on the configured executable. Callers warn on a
/// failure but still generate.
pub fn check_executable(path: &Path) -> Result<(), ExecIssue> {
    if !path.exists() {
        return Err(ExecIssue::Missing(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ExecIssue::NotRegular(path.to_path_buf()));
    }
    let executable = fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false);
    if !executable {
        return Err(ExecIssue::NotExecutable(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn sanitize_replaces_spaces_and_reserved_characters() {
        assert_eq!(sanitize_filename("My Tool"), "My_Tool");
        assert_eq!(sanitize_filename("a/b\\c:d*e?f\"g<h>i|j"), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize_filename("plain-name"), "plain-name");
    }

    #[test]
    fn sanitize_empty_name_falls_back() {
        assert_eq!(sanitize_filename(""), "my_application");
    }

    #[test]
    fn custom_dir_rejects_traversal() {
        assert!(validate_custom_dir(Path::new("launchers/../../etc")).is_err());
        assert!(validate_custom_dir(Path::new("/tmp/launchers")).is_ok());
        assert!(validate_custom_dir(Path::new("launchers")).is_ok());
    }

    #[test]
    fn resolve_targets_uses_custom_dir() {
        let options = SaveOptions {
            desktop: false,
            local_apps: false,
            custom_dir: Some(PathBuf::from("/tmp/launchers")),
        };
        let targets = resolve_targets(&options, "app.desktop");
        assert_eq!(targets, vec![PathBuf::from("/tmp/launchers/app.desktop")]);
    }

    #[test]
    fn saved_file_is_executable() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("sub").join("app.desktop");

        let outcomes = save_to_targets("[Desktop Entry]\n", &[target.clone()]);
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].result.is_ok());
        assert_eq!(fs::read_to_string(&target).unwrap(), "[Desktop Entry]\n");

        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_ne!(mode & 0o111, 0);
    }

    #[test]
    fn one_failing_target_does_not_stop_the_rest() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("app.desktop");
        // Parent is a regular file, so create_dir_all fails underneath it.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let bad = blocker.join("app.desktop");

        let outcomes = save_to_targets("[Desktop Entry]\n", &[bad, good.clone()]);
        assert!(outcomes[0].result.is_err());
        assert!(outcomes[1].result.is_ok());
        assert!(good.exists());
    }

    #[test]
    fn existing_targets_reports_only_present_files() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("there.desktop");
        fs::write(&present, "x").unwrap();
        let absent = dir.path().join("missing.desktop");

        let existing = existing_targets(&[present.clone(), absent]);
        assert_eq!(existing, vec![present]);
    }

    #[test]
    fn check_executable_distinguishes_issues() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("nope");
        assert_eq!(
            check_executable(&missing),
            Err(ExecIssue::Missing(missing.clone()))
        );

        assert!(matches!(
            check_executable(dir.path()),
            Err(ExecIssue::NotRegular(_))
        ));

        let plain = dir.path().join("plain");
        let mut file = fs::File::create(&plain).unwrap();
        file.write_all(b"data").unwrap();
        let mut perms = fs::metadata(&plain).unwrap().permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&plain, perms).unwrap();
        assert_eq!(
            check_executable(&plain),
            Err(ExecIssue::NotExecutable(plain.clone()))
        );

        let mut perms = fs::metadata(&plain).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&plain, perms).unwrap();
        assert_eq!(check_executable(&plain), Ok(()));
    }
}
