//! Image resource store
//!
//! Products carry an image reference; the store turns a reference into
//! bytes. The pipeline only needs read-by-reference, so the storage
//! technology stays behind this trait.

pub mod validate;

use async_trait::async_trait;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Read-by-reference capability for product images
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Read the binary resource behind a product image reference
    async fn read(&self, reference: &str) -> io::Result<Vec<u8>>;
}

/// Filesystem-backed image store rooted at a static assets directory
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, reference: &str) -> io::Result<PathBuf> {
        let relative = Path::new(reference.trim_start_matches('/'));

        // References are served paths like "/products/x.png"; anything
        // escaping the root is rejected.
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid image reference: {reference}"),
            ));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn read(&self, reference: &str) -> io::Result<Vec<u8>> {
        let path = self.resolve(reference)?;
        tokio::fs::read(path).await
    }
}
