//! Small idempotent filesystem operations.

use std::io;
use std::path::Path;

/// Creates an empty file at `path`, creating missing parent directories.
/// Succeeds if the file already exists, leaving its contents untouched.
pub fn touch(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(())
}

/// Like [`touch`] but relaxes the file mode so every account on a shared
/// machine can read and append to it. Failing to change the mode is not an
/// error; the file may have been created by another user.
pub fn touch_shared(path: &Path) -> io::Result<()> {
    touch(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs_err::set_permissions(path, std::fs::Permissions::from_mode(0o666));
    }
    Ok(())
}

/// Removes a file or directory tree. Removing an already-absent path
/// succeeds.
pub fn rm_rf(path: &Path) -> io::Result<()> {
    let metadata = match fs_err::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };
    if metadata.is_dir() {
        fs_err::remove_dir_all(path)
    } else {
        fs_err::remove_file(path)
    }
}
