//! The codec seam shared by every catalog file format.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{error::Error, formats::CatalogFormat, types::MessageCatalog};

/// One on-disk representation of a [`MessageCatalog`].
///
/// Implementors only decode from a reader and encode to a writer; file,
/// string and byte-buffer access come for free.
///
/// ```rust,no_run
/// use localefmt::{formats::JsonFormat, traits::Parser};
///
/// let format = JsonFormat::read_from("locales/en.json")?;
/// format.write_to("locales/en.copy.json")?;
/// # Ok::<(), localefmt::Error>(())
/// ```
pub trait Parser: Sized + From<MessageCatalog> + Into<MessageCatalog> {
    /// The format this codec reads and writes.
    const FORMAT: CatalogFormat;

    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>;

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Decodes the file at `path`. A missing file surfaces as [`Error::Io`]
    /// with [`std::io::ErrorKind::NotFound`].
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Encodes into the file at `path`, creating or truncating it.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::from_reader(Cursor::new(s))
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_reader(Cursor::new(bytes))
    }

    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut buffer = Vec::new();
        self.to_writer(&mut buffer)?;
        Ok(buffer)
    }
}
