//  SPDX-License-Identifier: GPL-3.0-only
/*
 *  Copyright (C) 2026  craftnut
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, version 3 of the License.
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

//! Downloading a release archive and replacing the tracked files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use log::{debug, error, info};
use zip::ZipArchive;

use crate::config::UpdateConfig;
use crate::error::UpdateError;
use crate::http::HttpClient;

/// Name of the downloaded archive inside the workspace.
const ARCHIVE_NAME: &str = "temp.zip";

/// Ephemeral directory owning the downloaded archive and its extracted
/// contents. Removed when the guard drops, so neither a completed nor a
/// failed update leaves the workspace behind.
#[derive(Debug)]
struct TempWorkspace {
    path: PathBuf,
}

impl TempWorkspace {
    /// Creates the workspace directory. A leftover directory from an
    /// earlier run is an error, not something to reuse.
    fn create(path: PathBuf) -> Result<Self, UpdateError> {
        fs::create_dir(&path)
            .with_context(|| format!("failed to create {}", path.display()))
            .map_err(UpdateError::Filesystem)?;
        debug!("created workspace {}", path.display());
        Ok(TempWorkspace { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn archive_path(&self) -> PathBuf {
        self.path.join(ARCHIVE_NAME)
    }

    /// Finds the single top-level directory produced by extraction,
    /// skipping the downloaded archive itself. Anything other than exactly
    /// one directory means the archive does not look like a release
    /// snapshot.
    fn extracted_root(&self) -> anyhow::Result<PathBuf> {
        let mut entries = Vec::new();
        let listing = fs::read_dir(&self.path)
            .with_context(|| format!("failed to list {}", self.path.display()))?;
        for entry in listing {
            let path = entry
                .with_context(|| format!("failed to list {}", self.path.display()))?
                .path();
            if path.file_name().is_some_and(|name| name == ARCHIVE_NAME) {
                continue;
            }
            entries.push(path);
        }

        match entries.as_slice() {
            [single] if single.is_dir() => Ok(single.clone()),
            [] => Err(anyhow!("archive contained no top-level directory")),
            [single] => Err(anyhow!(
                "archive top-level entry {} is not a directory",
                single.display()
            )),
            rest => Err(anyhow!(
                "expected exactly one top-level directory in the archive, found {} entries",
                rest.len()
            )),
        }
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.path) {
            let error_msg = format!("Failed to remove {}: {}", self.path.display(), e);
            eprintln!("{error_msg}");
            error!("{error_msg}");
        }
    }
}

/// Downloads the archive at `archive_url`, extracts it, and moves the
/// tracked files over the installed copies.
///
/// Both tracked files are verified present in the extracted tree before
/// anything in the installation is touched. The replacement itself is not
/// transactional: a crash between the two renames leaves the installation
/// half-updated.
pub fn apply_update(
    http: &dyn HttpClient,
    config: &UpdateConfig,
    archive_url: &str,
) -> Result<(), UpdateError> {
    let workspace = TempWorkspace::create(config.temp_path())?;

    println!("Downloading...");
    let archive_path = workspace.archive_path();
    http.download(archive_url, &archive_path)
        .map_err(UpdateError::Network)?;

    println!("Extracting");
    extract_archive(&archive_path, workspace.path()).map_err(UpdateError::Archive)?;

    let root = workspace.extracted_root().map_err(UpdateError::Archive)?;
    debug!("extracted release root: {}", root.display());

    let tracked = [config.entry_file.as_str(), config.launcher_file.as_str()];
    for name in tracked {
        if !root.join(name).is_file() {
            return Err(UpdateError::Archive(anyhow!(
                "archive is missing tracked file {name}"
            )));
        }
    }

    for name in tracked {
        replace_file(&root.join(name), &config.install_dir.join(name))
            .map_err(UpdateError::Filesystem)?;
    }

    info!("tracked files replaced");
    Ok(())
}

fn extract_archive(archive: &Path, dest: &Path) -> anyhow::Result<()> {
    let file = fs::File::open(archive)
        .with_context(|| format!("failed to open {}", archive.display()))?;
    let mut zip = ZipArchive::new(file).context("failed to read release archive")?;
    zip.extract(dest).context("failed to extract release archive")?;
    Ok(())
}

/// Removes the installed copy, then moves the staged replacement into
/// place.
fn replace_file(staged: &Path, installed: &Path) -> anyhow::Result<()> {
    if installed.exists() {
        fs::remove_file(installed)
            .with_context(|| format!("failed to remove {}", installed.display()))?;
    }
    fs::rename(staged, installed).with_context(|| {
        format!(
            "failed to move {} to {}",
            staged.display(),
            installed.display()
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn workspace_is_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let temp = dir.path().join("temp");

        let workspace = TempWorkspace::create(temp.clone()).unwrap();
        assert!(temp.is_dir());
        drop(workspace);
        assert!(!temp.exists());
    }

    #[test]
    fn workspace_creation_fails_when_dir_exists() {
        let dir = TempDir::new().unwrap();
        let temp = dir.path().join("temp");
        fs::create_dir(&temp).unwrap();

        let err = TempWorkspace::create(temp.clone()).unwrap_err();
        assert!(matches!(err, UpdateError::Filesystem(_)));
        // No guard was handed out, so the stale directory stays.
        assert!(temp.is_dir());
    }

    #[test]
    fn extracted_root_requires_exactly_one_directory() {
        let dir = TempDir::new().unwrap();
        let workspace = TempWorkspace::create(dir.path().join("temp")).unwrap();
        fs::write(workspace.archive_path(), b"zip bytes").unwrap();

        // Only the archive: nothing was extracted.
        assert!(workspace.extracted_root().is_err());

        fs::create_dir(workspace.path().join("release-a")).unwrap();
        assert!(workspace.extracted_root().unwrap().ends_with("release-a"));

        fs::create_dir(workspace.path().join("release-b")).unwrap();
        assert!(workspace.extracted_root().is_err());
    }

    #[test]
    fn extracted_root_rejects_a_plain_file() {
        let dir = TempDir::new().unwrap();
        let workspace = TempWorkspace::create(dir.path().join("temp")).unwrap();
        fs::write(workspace.path().join("README"), b"not a directory").unwrap();

        assert!(workspace.extracted_root().is_err());
    }

    #[test]
    fn replace_file_overwrites_and_moves() {
        let dir = TempDir::new().unwrap();
        let staged = dir.path().join("staged");
        let installed = dir.path().join("installed");
        fs::write(&staged, b"new bytes").unwrap();
        fs::write(&installed, b"old bytes").unwrap();

        replace_file(&staged, &installed).unwrap();

        assert_eq!(fs::read(&installed).unwrap(), b"new bytes");
        assert!(!staged.exists());
    }

    #[test]
    fn replace_file_works_without_an_existing_copy() {
        let dir = TempDir::new().unwrap();
        let staged = dir.path().join("staged");
        let installed = dir.path().join("installed");
        fs::write(&staged, b"new bytes").unwrap();

        replace_file(&staged, &installed).unwrap();
        assert_eq!(fs::read(&installed).unwrap(), b"new bytes");
    }
}
