//! Filesystem-backed template resources.
//!
//! Every resource name is resolved relative to a template root directory.
//! Names that would escape the root (absolute paths, `..` components,
//! symlinks pointing outside) are reported as not found.

use offerpress_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemResourceProvider {
    root: PathBuf,
    root_display: Option<String>,
    /// Canonicalized root for containment checks, if the root exists.
    canonical_root: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let canonical_root = root.canonicalize().ok();
        if canonical_root.is_none() {
            log::warn!("Template root '{}' does not exist yet", root.display());
        }
        Self {
            root_display: root.to_str().map(str::to_string),
            root,
            canonical_root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, ResourceError> {
        let blocked = || ResourceError::NotFound(format!("{} (outside template root)", name));
        let relative = Path::new(name);

        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(blocked());
        }

        let joined = self.root.join(relative);
        match (joined.canonicalize(), &self.canonical_root) {
            (Ok(canonical), Some(root)) if canonical.starts_with(root) => Ok(canonical),
            (Ok(_), Some(_)) => Err(blocked()),
            _ => Ok(joined),
        }
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self.resolve(path)?;
        std::fs::read(&full_path).map(Arc::new).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ResourceError::NotFound(path.to_string()),
            _ => ResourceError::LoadFailed {
                path: path.to_string(),
                message: e.to_string(),
            },
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn base_path(&self) -> Option<&str> {
        self.root_display.as_deref()
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
