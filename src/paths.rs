//! Typed paths into the content system's data directory.
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE_NAME: &str = "manifest.json";
pub const PAGE_TYPES_FILE_NAME: &str = "page-types.json";

#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the `manifest.json` path.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE_NAME)
    }

    /// Return the `page-types.json` path.
    pub fn page_types_path(&self) -> PathBuf {
        self.root.join(PAGE_TYPES_FILE_NAME)
    }
}
