//! Loading and saving message catalogs.
//!
//! The file format is chosen by extension (`.json`, `.yaml`/`.yml`, `.toml`,
//! any case). Loading a file that does not exist yields an empty catalog so
//! that a first run can start from nothing; every other read failure is an
//! error. Each call is a fresh round trip to disk; nothing is cached and no
//! locking is done.

use std::{io::ErrorKind, path::Path, str::FromStr};

use crate::{
    error::Error,
    formats::{CatalogFormat, JsonFormat, TomlFormat, YamlFormat},
    traits::Parser,
    types::MessageCatalog,
};

/// Infers a [`CatalogFormat`] from the path's extension.
pub fn infer_format_from_extension<P: AsRef<Path>>(path: P) -> Option<CatalogFormat> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(CatalogFormat::from_extension)
}

fn unsupported(path: &Path) -> Error {
    Error::UnsupportedFormat(format!(
        "{:?} ({})",
        path.extension().unwrap_or_default(),
        path.display()
    ))
}

/// Reads the catalog at `path`.
///
/// # Errors
///
/// - [`Error::UnsupportedFormat`] for an extension outside the supported set,
///   checked before touching the filesystem.
/// - [`Error::Io`] for read failures other than a missing file.
/// - A format error when the content is not a flat string-to-string mapping.
pub fn load<P: AsRef<Path>>(path: P) -> Result<MessageCatalog, Error> {
    let path = path.as_ref();
    let loaded = match infer_format_from_extension(path).ok_or_else(|| unsupported(path))? {
        CatalogFormat::Json => read::<JsonFormat>(path),
        CatalogFormat::Yaml => read::<YamlFormat>(path),
        CatalogFormat::Toml => read::<TomlFormat>(path),
    };

    match loaded {
        Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "catalog not found, starting empty");
            Ok(MessageCatalog::new())
        }
        other => other,
    }
}

fn read<F: Parser>(path: &Path) -> Result<MessageCatalog, Error> {
    let catalog: MessageCatalog = F::read_from(path)?.into();
    tracing::debug!(path = %path.display(), format = %F::FORMAT, messages = catalog.len(), "loaded catalog");
    Ok(catalog)
}

fn write<F: Parser>(catalog: &MessageCatalog, path: &Path) -> Result<(), Error> {
    F::from(catalog.clone()).write_to(path)?;
    tracing::debug!(path = %path.display(), format = %F::FORMAT, messages = catalog.len(), "saved catalog");
    Ok(())
}

/// Decodes catalog bytes in the given format.
pub fn decode(bytes: &[u8], format: CatalogFormat) -> Result<MessageCatalog, Error> {
    fn decode_as<F: Parser>(bytes: &[u8]) -> Result<MessageCatalog, Error> {
        Ok(F::from_bytes(bytes)?.into())
    }

    match format {
        CatalogFormat::Json => decode_as::<JsonFormat>(bytes),
        CatalogFormat::Yaml => decode_as::<YamlFormat>(bytes),
        CatalogFormat::Toml => decode_as::<TomlFormat>(bytes),
    }
}

/// Serializes `catalog` in the format named by `format` (`"json"`, `"yaml"`,
/// `"toml"`).
pub fn save(catalog: &MessageCatalog, format: &str) -> Result<Vec<u8>, Error> {
    save_as(catalog, CatalogFormat::from_str(format)?)
}

/// Serializes `catalog` in `format`.
pub fn save_as(catalog: &MessageCatalog, format: CatalogFormat) -> Result<Vec<u8>, Error> {
    match format {
        CatalogFormat::Json => JsonFormat::from(catalog.clone()).to_bytes(),
        CatalogFormat::Yaml => YamlFormat::from(catalog.clone()).to_bytes(),
        CatalogFormat::Toml => TomlFormat::from(catalog.clone()).to_bytes(),
    }
}

/// Writes `catalog` to `path`, choosing the format from its extension.
pub fn save_to_file<P: AsRef<Path>>(catalog: &MessageCatalog, path: P) -> Result<(), Error> {
    let path = path.as_ref();
    match infer_format_from_extension(path).ok_or_else(|| unsupported(path))? {
        CatalogFormat::Json => write::<JsonFormat>(catalog, path),
        CatalogFormat::Yaml => write::<YamlFormat>(catalog, path),
        CatalogFormat::Toml => write::<TomlFormat>(catalog, path),
    }
}
