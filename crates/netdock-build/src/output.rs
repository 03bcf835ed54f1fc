use std::path::Path;

/// Conventional Dockerfile name in the app root.
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// Refuse to generate when a Dockerfile already exists.
///
/// Both the conventional `root/Dockerfile` and the requested output path
/// are checked; an existing file is never merged or overwritten.
pub fn ensure_no_dockerfile(root: &Path, output: &Path) -> Result<(), OutputError> {
    let conventional = root.join(DOCKERFILE_NAME);
    for path in [conventional.as_path(), output] {
        if path.exists() {
            return Err(OutputError::AlreadyExists(path.to_path_buf()));
        }
    }
    Ok(())
}

/// Write a rendered Dockerfile to `output` in a single write.
pub fn write_dockerfile(output: &Path, content: &str) -> Result<(), OutputError> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(output, content).map_err(|e| OutputError::Write {
        path: output.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %output.display(), bytes = content.len(), "Dockerfile written");
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error(
        "a Dockerfile already exists at {0}; generated Dockerfiles never replace an existing one"
    )]
    AlreadyExists(std::path::PathBuf),
    #[error("failed to create directory {path}")]
    CreateDir {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn existing_root_dockerfile_blocks_generation() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("Dockerfile"), "FROM scratch\n").unwrap();

        let err = ensure_no_dockerfile(tmp.path(), &tmp.path().join("out/Dockerfile")).unwrap_err();
        assert!(matches!(err, OutputError::AlreadyExists(_)));
    }

    #[test]
    fn existing_output_blocks_generation() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("generated.Dockerfile");
        std::fs::write(&output, "FROM scratch\n").unwrap();

        assert!(ensure_no_dockerfile(tmp.path(), &output).is_err());
    }

    #[test]
    fn write_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("nested/dir/Dockerfile");

        write_dockerfile(&output, "FROM scratch\n").unwrap();
        assert_eq!(std::fs::read_to_string(output).unwrap(), "FROM scratch\n");
    }
}
