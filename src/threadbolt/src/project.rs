use std::path::{Path, PathBuf};

use snafu::prelude::*;
use tracing::debug;

/// The directories and files a project must contain before it can boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    directories: Vec<PathBuf>,
    files: Vec<PathBuf>,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::new()
            .directory("controllers")
            .directory("models")
            .directory("config")
            .directory("routes")
            .directory("internal/middleware")
            .directory("internal/services")
            .directory("migrations")
            .directory("templates")
            .directory("public")
            .directory("tests")
            .file("config/config.yaml")
    }
}

impl ProjectLayout {
    /// A layout with no requirements.
    pub fn new() -> Self {
        Self {
            directories: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.directories.push(path.into());
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Checks `root` against the layout.
    ///
    /// Directories are checked before files, each in the order they were
    /// added. The first missing entry is reported.
    pub fn validate(&self, root: impl AsRef<Path>) -> Result<(), ProjectError> {
        let root = root.as_ref();

        for dir in &self.directories {
            ensure!(
                root.join(dir).is_dir(),
                MissingDirectorySnafu { path: dir.clone() }
            );
        }
        for file in &self.files {
            ensure!(
                root.join(file).is_file(),
                MissingFileSnafu { path: file.clone() }
            );
        }

        debug!(root = %root.display(), "Project structure is valid");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn scaffold(&self, root: &Path) {
        for dir in &self.directories {
            std::fs::create_dir_all(root.join(dir)).unwrap();
        }
        for file in &self.files {
            std::fs::write(root.join(file), "").unwrap();
        }
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ProjectError {
    #[snafu(display("required directory '{}' is missing", path.display()))]
    #[non_exhaustive]
    MissingDirectory { path: PathBuf },
    #[snafu(display("required file '{}' is missing", path.display()))]
    #[non_exhaustive]
    MissingFile { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn validate_accepts_a_complete_project() {
        let root = TempDir::new().unwrap();
        ProjectLayout::default().scaffold(root.path());

        ProjectLayout::default().validate(root.path()).unwrap();
    }

    #[test]
    fn validate_reports_the_first_missing_directory() {
        let root = TempDir::new().unwrap();
        ProjectLayout::default().scaffold(root.path());
        fs::remove_dir_all(root.path().join("internal/services")).unwrap();
        fs::remove_dir_all(root.path().join("public")).unwrap();

        let err = ProjectLayout::default().validate(root.path()).unwrap_err();
        assert!(matches!(
            err,
            ProjectError::MissingDirectory { ref path } if path == Path::new("internal/services")
        ));
        assert_eq!(
            err.to_string(),
            "required directory 'internal/services' is missing"
        );
    }

    #[test]
    fn validate_reports_a_missing_file() {
        let root = TempDir::new().unwrap();
        ProjectLayout::default().scaffold(root.path());
        fs::remove_file(root.path().join("config/config.yaml")).unwrap();

        let err = ProjectLayout::default().validate(root.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "required file 'config/config.yaml' is missing"
        );
    }

    #[test]
    fn validate_rejects_a_file_where_a_directory_is_required() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("migrations"), "").unwrap();

        let layout = ProjectLayout::new().directory("migrations");
        let err = layout.validate(root.path()).unwrap_err();
        assert!(matches!(err, ProjectError::MissingDirectory { .. }));
    }

    #[test]
    fn empty_layout_accepts_any_root() {
        let root = TempDir::new().unwrap();
        ProjectLayout::new().validate(root.path()).unwrap();
    }
}
