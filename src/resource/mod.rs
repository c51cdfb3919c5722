//! Text resources addressed by dotted identifiers.
//!
//! A [`ResourceProvider`] maps a [`ResourceId`] to the raw bytes of a query
//! file. How identifiers map to storage is up to the provider:
//! - `memory`    : an in-memory table, typically filled from `include_bytes!`.
//! - `directory` : a directory tree whose relative paths become dotted names.
//!
//! Everything above the provider only ever deals in decoded, BOM-free text via
//! [`ResourceProvider::text`].

pub mod directory;
pub mod id;
pub mod memory;

pub use directory::DirectoryProvider;
pub use id::ResourceId;
pub use memory::MemoryProvider;

use crate::*;

/// UTF-8 encoding of U+FEFF.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Source of raw query text.
pub trait ResourceProvider: Send + Sync {
    /// Raw bytes of the resource, or `None` when the provider has no such resource.
    fn load(&self, id: &ResourceId) -> Result<Option<Vec<u8>>>;

    /// Decoded text of the resource with any leading UTF-8 BOM removed.
    fn text(&self, id: &ResourceId) -> Result<String> {
        let bytes = self
            .load(id)?
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        decode(id, bytes)
    }
}

impl<P: ResourceProvider + ?Sized> ResourceProvider for std::sync::Arc<P> {
    fn load(&self, id: &ResourceId) -> Result<Option<Vec<u8>>> {
        (**self).load(id)
    }
}

impl<P: ResourceProvider + ?Sized> ResourceProvider for Box<P> {
    fn load(&self, id: &ResourceId) -> Result<Option<Vec<u8>>> {
        (**self).load(id)
    }
}

fn decode(id: &ResourceId, mut bytes: Vec<u8>) -> Result<String> {
    if bytes.starts_with(UTF8_BOM) {
        trace!("Stripping byte order mark from {id}");
        bytes.drain(..UTF8_BOM.len());
    }
    String::from_utf8(bytes).map_err(|source| Error::InvalidEncoding {
        id: id.clone(),
        source,
    })
}
