//! Plain-text export of generated results.
//!
//! Filenames are fixed per format category, never derived from content:
//! whole conversational replies export as
//! [`REPLY_EXPORT_FILENAME`](crate::formats::REPLY_EXPORT_FILENAME), each
//! campaign asset under its own fixed name.

use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::campaign::Campaign;
use crate::formats::{ContentFormat, REPLY_EXPORT_FILENAME};

/// Writes a whole conversational reply into `dir`.
///
/// Creates the directory if needed; overwrites any previous export.
pub fn export_reply(dir: &Path, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(REPLY_EXPORT_FILENAME);
    fs::write(&path, content)?;

    Ok(path)
}

/// Writes one format's content under its fixed per-category filename.
pub fn export_format(dir: &Path, format: ContentFormat, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format.export_filename());
    fs::write(&path, content)?;

    Ok(path)
}

/// Writes all four campaign assets into `dir`, returning the paths written.
pub fn export_campaign(dir: &Path, campaign: &Campaign) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(4);
    for (filename, content) in campaign.assets() {
        let path = dir.join(filename);
        fs::write(&path, content)?;
        written.push(path);
    }

    Ok(written)
}
