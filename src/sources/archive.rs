//! Source archive download, verification and extraction.

use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use url::Url;

use crate::core::errors::RecipeError;
use crate::util::hash::sha256_bytes;

/// Something that can download an archive.
pub trait SourceFetcher {
    fn download(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Blocking HTTP download.
#[derive(Debug, Default, Clone)]
pub struct HttpFetcher;

impl SourceFetcher for HttpFetcher {
    fn download(&self, url: &Url) -> Result<Vec<u8>> {
        tracing::info!("Fetching {}", url);

        let response = reqwest::blocking::get(url.as_str())
            .with_context(|| format!("failed to download {}", url))?;

        if !response.status().is_success() {
            bail!("failed to download {}: HTTP {}", url, response.status());
        }

        let bytes = response
            .bytes()
            .with_context(|| format!("failed to read response body from {}", url))?;

        Ok(bytes.to_vec())
    }
}

/// Compression of a tar archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarGz,
    TarBz2,
}

impl ArchiveFormat {
    /// Pick the format from the URL's file name.
    pub fn from_url(url: &Url) -> Result<Self> {
        let path = url.path();
        if path.ends_with(".tar.bz2") || path.ends_with(".tbz2") {
            Ok(ArchiveFormat::TarBz2)
        } else if path.ends_with(".tar.gz") || path.ends_with(".tgz") {
            Ok(ArchiveFormat::TarGz)
        } else {
            bail!("unsupported archive format: {}", url)
        }
    }
}

/// Check downloaded bytes against the pinned SHA256.
pub fn verify_sha256(url: &Url, data: &[u8], expected: &str) -> Result<(), RecipeError> {
    let actual = sha256_bytes(data);
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(RecipeError::Integrity {
            url: url.to_string(),
            expected: expected.to_string(),
            actual,
        });
    }
    tracing::debug!("Archive hash verified: {}", &actual[..16]);
    Ok(())
}

/// Extract a tar archive into `dest`.
pub fn extract_archive(data: &[u8], format: ArchiveFormat, dest: &Path) -> Result<()> {
    let cursor = Cursor::new(data);
    let reader: Box<dyn Read + '_> = match format {
        ArchiveFormat::TarGz => Box::new(flate2::read::GzDecoder::new(cursor)),
        ArchiveFormat::TarBz2 => Box::new(bzip2::read::BzDecoder::new(cursor)),
    };
    unpack_tar(reader, dest)
}

fn unpack_tar(reader: impl Read, dest: &Path) -> Result<()> {
    let mut archive = tar::Archive::new(reader);

    std::fs::create_dir_all(dest)
        .with_context(|| format!("failed to create destination directory: {}", dest.display()))?;

    for entry in archive.entries().context("failed to read archive entries")? {
        let mut entry = entry.context("failed to read archive entry")?;
        let entry_path = entry
            .path()
            .context("failed to get entry path")?
            .into_owned();

        // unpack_in refuses entries that would land outside `dest`
        let unpacked = entry
            .unpack_in(dest)
            .with_context(|| format!("failed to extract {}", entry_path.display()))?;

        if !unpacked {
            bail!(
                "archive entry escapes destination directory: {}",
                entry_path.display()
            );
        }
    }

    Ok(())
}
