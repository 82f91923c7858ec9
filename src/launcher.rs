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

//! Fire-and-forget handoff to the launch target.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use log::debug;

use crate::config::UpdateConfig;
use crate::error::UpdateError;

/// Capability to start the launch target as an independent process.
pub trait ProcessSpawner {
    /// Starts `target` and returns without waiting for it. No exit-code
    /// propagation, no supervision.
    fn spawn(&self, target: &Path) -> Result<()>;
}

/// Spawner backed by `std::process::Command`. With a configured runtime the
/// target is passed as that interpreter's single argument; without one the
/// target is executed directly.
pub struct SystemSpawner {
    runtime: Option<PathBuf>,
}

impl SystemSpawner {
    pub fn new(config: &UpdateConfig) -> Self {
        SystemSpawner {
            runtime: config.runtime.clone(),
        }
    }
}

impl ProcessSpawner for SystemSpawner {
    fn spawn(&self, target: &Path) -> Result<()> {
        let mut command = match &self.runtime {
            Some(runtime) => {
                let mut cmd = Command::new(runtime);
                cmd.arg(target);
                cmd
            }
            None => Command::new(target),
        };

        command
            .spawn()
            .with_context(|| format!("failed to launch {}", target.display()))?;
        Ok(())
    }
}

/// Spawns `target` through the given spawner. The caller exits right after;
/// a spawn failure is the only thing that can still stop the handoff.
pub fn launch(spawner: &dyn ProcessSpawner, target: &Path) -> Result<(), UpdateError> {
    debug!("launching {}", target.display());
    spawner.spawn(target).map_err(UpdateError::Filesystem)
}
