use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info};

use crate::Error;

/// Directory every output lands in. It must already exist.
pub const OUTPUT_DIR: &str = "./temp/";
pub const OUTPUT_SUFFIX: &str = ".json";

/// Derives the output location from the raw input string. No normalization
/// happens, so `dir/a.yaml` becomes `./temp/dir/a.yaml.json`.
pub fn output_path(input: &str) -> PathBuf {
    PathBuf::from(format!("{}{}{}", OUTPUT_DIR, input, OUTPUT_SUFFIX))
}

/// Replaces `path` with `contents` through a sibling temporary file and a
/// rename, so readers see either the old file or the complete new one.
///
/// A replaced file keeps its permissions; a new one gets the same mode
/// `File::create` would give it.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = stage(dir).map_err(|e| Error::write(path, e))?;
    debug!(temp = %file.path().display(), "staging output");
    if let Ok(existing) = fs::metadata(path) {
        file.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| Error::write(path, e))?;
    }
    file.write_all(contents.as_bytes())
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| Error::write(path, e))?;
    file.persist(path).map_err(|e| Error::write(path, e.error))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

#[cfg(unix)]
fn stage(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    // Subject to the umask, like a plain create.
    Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn stage(dir: &Path) -> io::Result<NamedTempFile> {
    Builder::new().tempfile_in(dir)
}

/// Removes an output left over from an earlier run. Returns whether a file
/// was actually removed.
pub fn discard_stale(path: &Path) -> Result<bool, Error> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "removed stale output");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::write(path, e)),
    }
}
