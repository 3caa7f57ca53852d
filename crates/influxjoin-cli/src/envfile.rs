//! Env-file persistence
//!
//! The directive is the entire contents of the file influxd's startup
//! script sources; every run replaces the file wholesale.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Replace `path` with `contents`.
///
/// The new contents are staged in a temporary file next to the target and
/// renamed over it, so a crash mid-write never leaves a truncated file
/// behind. An empty directive writes an empty file; influxd then starts
/// with no join options, which is what a node that found no peers gets.
pub fn write_env_file(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("unable to stage env file in {}", dir.display()))?;
    staged
        .write_all(contents.as_bytes())
        .context("unable to write env file contents")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .context("unable to set env file permissions")?;
    }

    staged
        .persist(path)
        .with_context(|| format!("unable to replace {}", path.display()))?;

    info!(path = %path.display(), bytes = contents.len(), "Wrote env file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_contents_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("influxdb");

        let directive = r#"INFLUXD_OPTS="-join 10.0.0.2:8091,10.0.0.3:8091""#;
        write_env_file(&path, directive).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), directive);
    }

    #[test]
    fn test_replaces_previous_contents_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("influxdb");

        write_env_file(&path, r#"INFLUXD_OPTS="-join 10.0.0.2:8091""#).unwrap();
        write_env_file(&path, r#"INFLUXD_OPTS="-join 10.0.0.9:8091""#).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"INFLUXD_OPTS="-join 10.0.0.9:8091""#
        );
    }

    #[test]
    fn test_empty_directive_writes_empty_file() {
        // A node with no peers still rewrites the file, leaving it empty,
        // rather than skipping the write and keeping stale options around.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("influxdb");

        write_env_file(&path, r#"INFLUXD_OPTS="-join 10.0.0.2:8091""#).unwrap();
        write_env_file(&path, "").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("influxdb");

        write_env_file(&path, "INFLUXD_OPTS=\"\"").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
