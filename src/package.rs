use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::error::Error;

/// Read-only view over a zip container. Entries are addressed by exact path.
pub struct Package<R> {
    zip: ZipArchive<R>,
}

impl Package<File> {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
                std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
            ),
            _ => Error::Io(e),
        })?;
        Self::new(file)
    }
}

impl Package<Cursor<Vec<u8>>> {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Error> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> Package<R> {
    pub fn new(reader: R) -> Result<Self, Error> {
        let zip = ZipArchive::new(reader)
            .map_err(|e| Error::Container(format!("file is not a ZIP archive ({e})")))?;
        Ok(Self { zip })
    }

    /// Entry names in central-directory order.
    pub fn entries(&self) -> Vec<String> {
        (0..self.zip.len())
            .filter_map(|i| self.zip.name_for_index(i))
            .map(String::from)
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.zip.index_for_name(name).is_some()
    }

    pub fn read(&mut self, name: &str) -> Result<Vec<u8>, Error> {
        let mut entry = self.zip.by_name(name).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => Error::NotFound(name.to_string()),
            other => Error::from(other),
        })?;
        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data)?;
        Ok(data)
    }

    pub fn read_text(&mut self, name: &str) -> Result<String, Error> {
        let data = self.read(name)?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}
