//! Catalog artifact codec: zstd-compressed JSON

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use super::{Catalog, LoadError};
use crate::models::CatalogBundle;

const COMPRESSION_LEVEL: i32 = 3;

/// Reads, decompresses and decodes the artifact at `path`
pub fn read_bundle(path: &Path) -> Result<CatalogBundle, LoadError> {
    let compressed = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_bundle(&compressed)
}

/// Decompresses and decodes an in-memory artifact
pub fn decode_bundle(compressed: &[u8]) -> Result<CatalogBundle, LoadError> {
    let json = zstd::decode_all(compressed).map_err(LoadError::Decompress)?;
    Ok(serde_json::from_slice(&json)?)
}

/// Reads the artifact at `path` and validates it into a [`Catalog`]
pub fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    Catalog::from_bundle(read_bundle(path)?)
}

/// Encodes `bundle` and writes it to `path` in the format [`read_bundle`] expects
pub fn write_bundle(path: &Path, bundle: &CatalogBundle) -> io::Result<()> {
    let file = BufWriter::new(File::create(path)?);
    let mut encoder = zstd::Encoder::new(file, COMPRESSION_LEVEL)?.auto_finish();
    serde_json::to_writer(&mut encoder, bundle)?;
    Ok(())
}
