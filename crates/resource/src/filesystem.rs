//! Filesystem-backed resource provider.
//!
//! Report templates reference fonts, logos and cover images by relative
//! path. This provider resolves them against a base directory and refuses
//! paths that would escape it, so a template file cannot be used to read
//! arbitrary files.

use qrydoc_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonicalized base for escape checks; `None` until the base exists.
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    /// A provider rooted at `base_path`. All resource paths are resolved
    /// relative to it.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self { base_path: base, canonical_base: canonical }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a relative path inside the base directory, or `None` when
    /// the path is absolute or would traverse outside it.
    fn resolve_safe(&self, path: &str) -> Option<PathBuf> {
        if Path::new(path).is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(path);
        if let (Ok(canonical), Some(base)) = (full_path.canonicalize(), &self.canonical_base) {
            return canonical.starts_with(base).then_some(canonical);
        }

        // The file may not exist yet; fall back to rejecting any `..`
        // component outright.
        if Path::new(path)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }
        Some(full_path)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self
            .resolve_safe(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{path} (outside base directory)")))?;

        log::debug!("loading resource {}", full_path.display());
        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed { path: path.to_string(), message: e.to_string() }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_safe(path).map(|p| p.exists()).unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_existing_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("logo.png"), b"fake png").unwrap();

        let provider = FilesystemResourceProvider::new(dir.path());
        assert!(provider.exists("logo.png"));
        assert_eq!(&*provider.load("logo.png").unwrap(), b"fake png");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());

        assert!(!provider.exists("missing.ttf"));
        assert!(matches!(
            provider.load("missing.ttf"),
            Err(ResourceError::NotFound(_))
        ));
    }

    #[test]
    fn blocks_traversal_and_absolute_paths() {
        let dir = tempdir().unwrap();
        let provider = FilesystemResourceProvider::new(dir.path());

        assert!(provider.load("../../../etc/passwd").is_err());
        assert!(provider.load("/etc/passwd").is_err());
        assert!(!provider.exists("fonts/../../secret.ttf"));
    }

    #[test]
    fn allows_nested_relative_paths() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("fonts")).unwrap();
        fs::write(dir.path().join("fonts/body.ttf"), b"ttf").unwrap();

        let provider = FilesystemResourceProvider::new(dir.path());
        assert_eq!(&*provider.load("fonts/body.ttf").unwrap(), b"ttf");
    }
}
