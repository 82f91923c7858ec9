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

//! Failure categories of the update flow.
//!
//! Every failure is fatal; the binary maps each category to its own exit
//! code. The inner `anyhow::Error` carries the cause chain.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpdateError {
    /// Unreachable endpoint, bad HTTP status, malformed tag list, or a
    /// failed download.
    #[error("network error: {0:#}")]
    Network(anyhow::Error),

    /// Temp directory collisions, permission problems, or a failed removal
    /// or rename of a tracked file.
    #[error("filesystem error: {0:#}")]
    Filesystem(anyhow::Error),

    /// Corrupt archive or an extracted tree that does not look like a
    /// release snapshot.
    #[error("archive error: {0:#}")]
    Archive(anyhow::Error),
}

impl UpdateError {
    /// Process exit code for this category.
    pub fn exit_code(&self) -> i32 {
        match self {
            UpdateError::Network(_) => 2,
            UpdateError::Filesystem(_) => 3,
            UpdateError::Archive(_) => 4,
        }
    }
}
