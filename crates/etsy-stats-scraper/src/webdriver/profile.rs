//! Temporary copy of the Chrome profile a session runs against.

use std::fs;
use std::io;
use std::path::Path;

use tempfile::TempDir;

use crate::error::ScraperError;

const LOCAL_STATE: &str = "Local State";

/// Copies `<user_data_root>/<profile>` and the root `Local State` file into a
/// fresh temp dir laid out as a user-data root. The dir is removed on drop.
pub(crate) fn copy_profile(user_data_root: &Path, profile: &str) -> Result<TempDir, ScraperError> {
    let source = user_data_root.join(profile);
    if !source.is_dir() {
        return Err(ScraperError::Session(format!(
            "chrome profile directory {} does not exist",
            source.display()
        )));
    }

    let temp = tempfile::Builder::new()
        .prefix("etsy-stats-profile-")
        .tempdir()
        .map_err(|e| copy_error(&source, &e))?;

    copy_dir_recursive(&source, &temp.path().join(profile)).map_err(|e| copy_error(&source, &e))?;

    let local_state = user_data_root.join(LOCAL_STATE);
    if local_state.is_file() {
        fs::copy(&local_state, temp.path().join(LOCAL_STATE))
            .map_err(|e| copy_error(&local_state, &e))?;
    }

    tracing::debug!(
        source = %source.display(),
        copy = %temp.path().display(),
        "copied chrome profile"
    );
    Ok(temp)
}

/// Regular files and directories only; symlinks (Chrome's singleton locks)
/// are left behind.
fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let target = dst.join(entry.file_name());
        if file_type.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn copy_error(path: &Path, err: &io::Error) -> ScraperError {
    ScraperError::Session(format!(
        "failed to copy chrome profile from {}: {err}",
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_user_data(root: &Path) {
        let profile = root.join("Profile 1");
        fs::create_dir_all(profile.join("Local Storage").join("leveldb")).unwrap();
        fs::write(profile.join("Preferences"), "{}").unwrap();
        fs::write(profile.join("Local Storage").join("leveldb").join("000003.log"), "x").unwrap();
        fs::write(root.join(LOCAL_STATE), "{\"profile\":{}}").unwrap();
        fs::create_dir_all(root.join("Other Profile")).unwrap();
    }

    #[test]
    fn copies_profile_tree_and_local_state() {
        let root = tempfile::tempdir().unwrap();
        seed_user_data(root.path());

        let copy = copy_profile(root.path(), "Profile 1").unwrap();
        let copied = copy.path();
        assert!(copied.join("Profile 1").join("Preferences").is_file());
        assert!(copied
            .join("Profile 1")
            .join("Local Storage")
            .join("leveldb")
            .join("000003.log")
            .is_file());
        assert!(copied.join(LOCAL_STATE).is_file());
        assert!(!copied.join("Other Profile").exists());
    }

    #[test]
    fn copy_is_removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        seed_user_data(root.path());

        let copy = copy_profile(root.path(), "Profile 1").unwrap();
        let path = copy.path().to_path_buf();
        drop(copy);
        assert!(!path.exists());
    }

    #[test]
    fn source_profile_is_untouched() {
        let root = tempfile::tempdir().unwrap();
        seed_user_data(root.path());

        let copy = copy_profile(root.path(), "Profile 1").unwrap();
        fs::write(copy.path().join("Profile 1").join("Preferences"), "changed").unwrap();
        let original = fs::read_to_string(root.path().join("Profile 1").join("Preferences")).unwrap();
        assert_eq!(original, "{}");
    }

    #[test]
    fn missing_profile_is_session_error() {
        let root = tempfile::tempdir().unwrap();
        let err = copy_profile(root.path(), "Nope").unwrap_err();
        assert!(matches!(err, ScraperError::Session(_)));
    }
}
