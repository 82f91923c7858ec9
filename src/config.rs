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

//! Runtime configuration for the update flow.

use std::path::PathBuf;

/// Local version value that means "always launch, never check for updates".
pub const DEV_VERSION: &str = "dev";

/// Tags endpoint of the GZLauncher repository.
pub const DEFAULT_TAGS_URL: &str = "https://api.github.com/repos/craftnut/GZLauncher/tags";

/// Everything the flow needs to know about its surroundings: where the tag
/// list lives, which files are tracked, and what version is installed.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Endpoint returning the JSON tag list.
    pub tags_url: String,
    /// Directory holding the tracked files. Also the parent of the
    /// ephemeral temp directory.
    pub install_dir: PathBuf,
    /// Entry script, relaunched after a successful update.
    pub entry_file: String,
    /// Launcher script, spawned on every non-updating path.
    pub launcher_file: String,
    /// Name of the ephemeral workspace directory inside `install_dir`.
    pub temp_dir: String,
    /// Version string embedded at build time, or the [`DEV_VERSION`]
    /// sentinel.
    pub local_version: String,
    /// Interpreter to run the launch target with. `None` executes the
    /// target directly.
    pub runtime: Option<PathBuf>,
}

impl UpdateConfig {
    pub fn new() -> Self {
        UpdateConfig {
            tags_url: DEFAULT_TAGS_URL.to_string(),
            install_dir: PathBuf::from("."),
            entry_file: "main".to_string(),
            launcher_file: "gzlauncher".to_string(),
            temp_dir: "temp".to_string(),
            local_version: env!("CARGO_PKG_VERSION").to_string(),
            runtime: None,
        }
    }

    pub fn with_tags_url(mut self, url: &str) -> Self {
        self.tags_url = url.to_string();
        self
    }

    pub fn with_install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = dir.into();
        self
    }

    pub fn with_local_version(mut self, version: &str) -> Self {
        self.local_version = version.to_string();
        self
    }

    pub fn with_runtime(mut self, runtime: impl Into<PathBuf>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    /// Path of the installed entry script.
    pub fn entry_path(&self) -> PathBuf {
        self.install_dir.join(&self.entry_file)
    }

    /// Path of the installed launcher script.
    pub fn launcher_path(&self) -> PathBuf {
        self.install_dir.join(&self.launcher_file)
    }

    /// Path of the ephemeral workspace directory.
    pub fn temp_path(&self) -> PathBuf {
        self.install_dir.join(&self.temp_dir)
    }
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_relative_to_install_dir() {
        let config = UpdateConfig::new().with_install_dir("/opt/gzlauncher");
        assert_eq!(config.entry_path(), PathBuf::from("/opt/gzlauncher/main"));
        assert_eq!(
            config.launcher_path(),
            PathBuf::from("/opt/gzlauncher/gzlauncher")
        );
        assert_eq!(config.temp_path(), PathBuf::from("/opt/gzlauncher/temp"));
    }

    #[test]
    fn defaults_match_the_installed_layout() {
        let config = UpdateConfig::new();
        assert_eq!(config.tags_url, DEFAULT_TAGS_URL);
        assert_eq!(config.entry_file, "main");
        assert_eq!(config.launcher_file, "gzlauncher");
        assert_eq!(config.temp_dir, "temp");
        assert!(config.runtime.is_none());
    }
}
