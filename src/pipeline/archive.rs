use std::io::{Cursor, Read};

use flate2::read::GzDecoder;

use crate::error::DecodeError;
use crate::types::activity::FileFormat;

/// One recording taken from an upload, still possibly gzip-wrapped.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub compressed: bool,
    pub bytes: Vec<u8>,
    /// Why the member could not be read out of its archive, if it could not.
    pub unreadable: Option<String>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, compressed: bool, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            compressed,
            bytes,
            unreadable: None,
        }
    }

    fn unreadable(name: String, compressed: bool, reason: String) -> Self {
        Self {
            name,
            compressed,
            bytes: Vec::new(),
            unreadable: Some(reason),
        }
    }

    /// Raw FIT bytes, inflated if the entry was gzip-wrapped.
    pub fn fit_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        if let Some(reason) = &self.unreadable {
            return Err(DecodeError::InvalidZip(format!("{}: {}", self.name, reason)));
        }
        if !self.compressed {
            return Ok(self.bytes.clone());
        }
        let mut inflated = Vec::new();
        GzDecoder::new(self.bytes.as_slice())
            .read_to_end(&mut inflated)
            .map_err(|e| DecodeError::InvalidGzip(format!("{}: {}", self.name, e)))?;
        Ok(inflated)
    }
}

/// Splits an upload into the recordings it holds. Zip members that are
/// neither `.fit` nor `.gz` are skipped.
pub fn unpack(filename: &str, bytes: Vec<u8>) -> Result<Vec<ArchiveEntry>, DecodeError> {
    let format = FileFormat::from_filename(filename)
        .ok_or_else(|| DecodeError::UnsupportedFormat(filename.to_string()))?;

    match format {
        FileFormat::Fit | FileFormat::Gzip => Ok(vec![ArchiveEntry::new(
            filename,
            format == FileFormat::Gzip,
            bytes,
        )]),
        FileFormat::Zip => unpack_zip(bytes),
    }
}

fn unpack_zip(bytes: Vec<u8>) -> Result<Vec<ArchiveEntry>, DecodeError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| DecodeError::InvalidZip(e.to_string()))?;

    let mut entries = Vec::new();
    for idx in 0..archive.len() {
        let Some(name) = archive.name_for_index(idx).map(str::to_string) else {
            continue;
        };
        if name.ends_with('/') {
            continue;
        }
        let compressed = match FileFormat::from_filename(&name) {
            Some(FileFormat::Fit) => false,
            Some(FileFormat::Gzip) => true,
            _ => continue,
        };

        // A member that cannot be read fails on its own once it is processed.
        match read_member(&mut archive, idx) {
            Ok(data) => entries.push(ArchiveEntry::new(name, compressed, data)),
            Err(reason) => {
                tracing::warn!("Cannot read {} from zip archive: {}", name, reason);
                entries.push(ArchiveEntry::unreadable(name, compressed, reason));
            }
        }
    }

    tracing::info!("Zip archive with {} 'fit'-files", entries.len());
    Ok(entries)
}

fn read_member(
    archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>,
    idx: usize,
) -> Result<Vec<u8>, String> {
    let mut member = archive.by_index(idx).map_err(|e| e.to_string())?;
    let mut data = Vec::new();
    member.read_to_end(&mut data).map_err(|e| e.to_string())?;
    Ok(data)
}
