use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    document::{decode, encode},
    output::{discard_stale, write_atomic},
    Config, Error,
};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub input: String,
    pub output: PathBuf,
    /// An earlier output existed and was replaced.
    pub replaced: bool,
}

/// Converts `config.input` to JSON at `config.output`.
///
/// On success the previous output is swapped out atomically. On any failure
/// the previous output is removed as well, so a stale file never outlives a
/// run that could not reproduce it.
pub fn convert(config: &Config) -> Result<Conversion, Error> {
    debug!(input = %config.input, output = %config.output.display(), "converting");
    let replaced = config.output.is_file();
    match render(Path::new(&config.input)).and_then(|json| write_atomic(&config.output, &json)) {
        Ok(()) => Ok(Conversion {
            input: config.input.clone(),
            output: config.output.clone(),
            replaced,
        }),
        Err(err) => {
            if let Err(cleanup) = discard_stale(&config.output) {
                warn!(error = %cleanup, "could not remove stale output");
            }
            Err(err)
        }
    }
}

fn render(input: &Path) -> Result<String, Error> {
    let text = fs::read_to_string(input).map_err(|e| Error::read(input, e))?;
    debug!(bytes = text.len(), "read input");
    let value = decode(&text)?;
    encode(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests run from the crate root, so every path here is absolute inside a
    // temporary directory instead of relying on ./temp/.
    fn config(input: &Path, output: &Path) -> Config {
        Config {
            input: input.display().to_string(),
            output: output.to_path_buf(),
            verbosity: 0,
            quiet: true,
        }
    }

    #[test]
    fn writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.yaml");
        let output = dir.path().join("a.yaml.json");
        fs::write(&input, "key: value\n").unwrap();

        let done = convert(&config(&input, &output)).unwrap();

        assert!(!done.replaced);
        assert_eq!(done.output, output);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "{\n  \"key\": \"value\"\n}"
        );
    }

    #[test]
    fn replaces_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.yaml");
        let output = dir.path().join("a.yaml.json");
        fs::write(&input, "- 1\n- 2\n- 3\n").unwrap();
        fs::write(&output, "SENTINEL").unwrap();

        let done = convert(&config(&input, &output)).unwrap();

        assert!(done.replaced);
        assert_eq!(fs::read_to_string(&output).unwrap(), "[\n  1,\n  2,\n  3\n]");
    }

    #[test]
    fn missing_input_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("nope.yaml");
        let output = dir.path().join("nope.yaml.json");

        let err = convert(&config(&input, &output)).unwrap_err();

        assert!(matches!(err, Error::FileNotFound(_)));
        assert!(!output.exists());
    }

    #[test]
    fn parse_failure_removes_stale_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.yaml");
        let output = dir.path().join("bad.yaml.json");
        fs::write(&input, "key: {unclosed\n").unwrap();
        fs::write(&output, "SENTINEL").unwrap();

        let err = convert(&config(&input, &output)).unwrap_err();

        assert!(matches!(err, Error::Parse(_)));
        assert!(!output.exists());
    }

    #[test]
    fn missing_output_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.yaml");
        let output = dir.path().join("absent").join("a.yaml.json");
        fs::write(&input, "key: value\n").unwrap();

        let err = convert(&config(&input, &output)).unwrap_err();

        assert!(matches!(err, Error::DirectoryNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_input_is_a_permission_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("locked.yaml");
        let output = dir.path().join("locked.yaml.json");
        fs::write(&input, "key: value\n").unwrap();
        fs::set_permissions(&input, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read(&input).is_ok() {
            // root ignores file modes
            return;
        }

        let err = convert(&config(&input, &output)).unwrap_err();

        assert!(matches!(err, Error::Permission(_)));
        assert!(!output.exists());
    }

    #[test]
    fn invalid_utf8_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("binary.yaml");
        let output = dir.path().join("binary.yaml.json");
        fs::write(&input, [0xff, 0xfe, 0x00]).unwrap();

        let err = convert(&config(&input, &output)).unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(!output.exists());
    }
}
