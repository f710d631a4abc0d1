//! Output tree access.
//!
//! The tree has two levels: one directory per project under the schemas
//! root, and one artifact file per type inside it. Project names are used
//! as-is; artifact stems are already sanitized by the caller.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory under the output path that holds the artifact tree.
pub const SCHEMAS_DIR: &str = "schemas";

/// Extension of every artifact file.
pub const ARTIFACT_EXTENSION: &str = "h";

pub trait ArtifactStore {
    /// Human-readable location of the schemas root, for logs and errors.
    fn location(&self) -> String;

    fn ensure_root(&mut self) -> io::Result<()>;

    fn ensure_project(&mut self, project: &str) -> io::Result<()>;

    /// Create or replace `<project>/<stem>.h`.
    fn write_artifact(&mut self, project: &str, stem: &str, contents: &str) -> io::Result<()>;

    /// Names of the project directories currently under the root.
    fn list_projects(&self) -> io::Result<Vec<String>>;

    /// File names (with extension) currently inside a project directory.
    fn list_artifacts(&self, project: &str) -> io::Result<Vec<String>>;

    /// Delete a project directory and everything in it.
    fn remove_project(&mut self, project: &str) -> io::Result<()>;

    fn remove_artifact(&mut self, project: &str, file_name: &str) -> io::Result<()>;
}

/// File name of the artifact for a sanitized type name.
pub fn artifact_file_name(stem: &str) -> String {
    format!("{stem}.{ARTIFACT_EXTENSION}")
}

/// File name with its extension stripped.
pub fn artifact_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
}

/// Artifact tree on the real filesystem, rooted at `<output>/schemas`.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Store for `<output_dir>/schemas`.
    pub fn new(output_dir: &Path) -> Self {
        Self {
            root: output_dir.join(SCHEMAS_DIR),
        }
    }

    /// Store rooted directly at `root`.
    pub fn at_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn project_dir(&self, project: &str) -> PathBuf {
        self.root.join(project)
    }
}

impl ArtifactStore for FsStore {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn ensure_root(&mut self) -> io::Result<()> {
        if self.root.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.root)
    }

    fn ensure_project(&mut self, project: &str) -> io::Result<()> {
        let dir = self.project_dir(project);
        if dir.is_dir() {
            return Ok(());
        }
        fs::create_dir(&dir)
    }

    fn write_artifact(&mut self, project: &str, stem: &str, contents: &str) -> io::Result<()> {
        let path = self.project_dir(project).join(artifact_file_name(stem));
        fs::write(path, contents)
    }

    fn list_projects(&self) -> io::Result<Vec<String>> {
        let mut projects = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            projects.push(entry.file_name().to_string_lossy().into_owned());
        }
        projects.sort();
        Ok(projects)
    }

    fn list_artifacts(&self, project: &str) -> io::Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(self.project_dir(project))? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
        files.sort();
        Ok(files)
    }

    fn remove_project(&mut self, project: &str) -> io::Result<()> {
        fs::remove_dir_all(self.project_dir(project))
    }

    fn remove_artifact(&mut self, project: &str, file_name: &str) -> io::Result<()> {
        fs::remove_file(self.project_dir(project).join(file_name))
    }
}

/// In-memory artifact tree for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    root_created: bool,
    projects: BTreeMap<String, BTreeMap<String, String>>,
    failing_projects: BTreeSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `ensure_project` fail for `project`.
    #[must_use]
    pub fn with_failing_project(mut self, project: impl Into<String>) -> Self {
        self.failing_projects.insert(project.into());
        self
    }

    /// Seed an artifact as if left behind by an earlier run.
    pub fn insert(&mut self, project: &str, file_name: &str, contents: &str) {
        self.projects
            .entry(project.to_string())
            .or_default()
            .insert(file_name.to_string(), contents.to_string());
    }

    /// Contents of `<project>/<stem>.h`.
    pub fn artifact(&self, project: &str, stem: &str) -> Option<&str> {
        self.projects
            .get(project)?
            .get(&artifact_file_name(stem))
            .map(String::as_str)
    }

    pub fn has_project(&self, project: &str) -> bool {
        self.projects.contains_key(project)
    }

    pub fn root_created(&self) -> bool {
        self.root_created
    }

    /// Every `(project, file name)` pair, sorted.
    pub fn files(&self) -> Vec<(String, String)> {
        self.projects
            .iter()
            .flat_map(|(project, files)| {
                files
                    .keys()
                    .map(move |file| (project.clone(), file.clone()))
            })
            .collect()
    }
}

impl ArtifactStore for MemoryStore {
    fn location(&self) -> String {
        format!("memory:/{SCHEMAS_DIR}")
    }

    fn ensure_root(&mut self) -> io::Result<()> {
        self.root_created = true;
        Ok(())
    }

    fn ensure_project(&mut self, project: &str) -> io::Result<()> {
        if self.failing_projects.contains(project) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot create {project}"),
            ));
        }
        self.projects.entry(project.to_string()).or_default();
        Ok(())
    }

    fn write_artifact(&mut self, project: &str, stem: &str, contents: &str) -> io::Result<()> {
        let files = self
            .projects
            .get_mut(project)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, project.to_string()))?;
        files.insert(artifact_file_name(stem), contents.to_string());
        Ok(())
    }

    fn list_projects(&self) -> io::Result<Vec<String>> {
        Ok(self.projects.keys().cloned().collect())
    }

    fn list_artifacts(&self, project: &str) -> io::Result<Vec<String>> {
        self.projects
            .get(project)
            .map(|files| files.keys().cloned().collect())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, project.to_string()))
    }

    fn remove_project(&mut self, project: &str) -> io::Result<()> {
        self.projects
            .remove(project)
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, project.to_string()))
    }

    fn remove_artifact(&mut self, project: &str, file_name: &str) -> io::Result<()> {
        self.projects
            .get_mut(project)
            .and_then(|files| files.remove(file_name))
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, file_name.to_string()))
    }
}
