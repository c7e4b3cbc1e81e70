//! Resource loading abstraction.
//!
//! Fonts, footer logos, cover images and any other file-like inputs reach
//! the engine through a [`ResourceProvider`]. Optional resources that fail
//! to load degrade to documented defaults; the provider itself only reports
//! what happened.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Reference-counted resource bytes, shared between blocks without copying.
pub type SharedResourceData = Arc<Vec<u8>>;

#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },
    #[error("invalid resource format: {0}")]
    InvalidFormat(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::LoadFailed {
            path: String::new(),
            message: err.to_string(),
        }
    }
}

/// Loads resources by path. Implementations must be safe to share between
/// concurrent, independent builds.
pub trait ResourceProvider: Send + Sync + Debug {
    /// Load a resource fully into memory.
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    /// Whether a resource exists without loading it.
    fn exists(&self, path: &str) -> bool;

    /// Human-readable provider name for log messages.
    fn name(&self) -> &'static str;
}

/// A provider backed by a pre-populated in-memory map. Useful in tests and
/// in environments without filesystem access.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource under the given path, replacing any previous
    /// entry.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) {
        if let Ok(mut resources) = self.resources.write() {
            resources.insert(path.into(), Arc::new(data));
        }
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let resources = self
            .resources
            .read()
            .map_err(|_| ResourceError::LoadFailed {
                path: path.to_string(),
                message: "resource store lock poisoned".to_string(),
            })?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.resources
            .read()
            .map(|r| r.contains_key(path))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}
