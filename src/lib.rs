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

//! Self-updating launcher for GZLauncher.
//!
//! On startup the flow fetches the published tag list, compares the latest
//! tag against the locally embedded version, optionally downloads and
//! unpacks a release archive over the current installation, then spawns the
//! launch target and returns so the caller can exit.
//!
//! The network client, process spawner, and operator confirmation are all
//! injectable, so the whole flow can run against fakes in tests.

use std::io;

use log::{debug, info};

pub mod config;
pub mod error;
pub mod http;
pub mod launcher;
pub mod tags;
pub mod updater;

pub use config::{UpdateConfig, DEV_VERSION};
pub use error::UpdateError;
pub use http::{HttpClient, ReqwestClient};
pub use launcher::{ProcessSpawner, SystemSpawner};
pub use tags::ReleaseTag;

pub const GZUPDATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How a run of the flow ended. Every variant means a child process was
/// spawned and the current process should exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Local version is the development sentinel; launched without any
    /// version comparison.
    DevLaunch,
    /// Local version matches the latest published tag; launched as-is.
    UpToDate,
    /// Operator declined the update; launched the existing installation.
    Declined,
    /// Update applied; launched the freshly replaced entry file.
    Updated { version: String },
}

/// Runs the whole update-and-relaunch flow once.
///
/// Fetches the tag list, decides whether to update, applies the update when
/// the operator confirms, and finally spawns the launch target. When
/// `user_confirm` is `None` a default console prompt is used.
pub fn run_launcher<F>(
    config: &UpdateConfig,
    http: &dyn HttpClient,
    spawner: &dyn ProcessSpawner,
    user_confirm: Option<F>,
) -> Result<Outcome, UpdateError>
where
    F: FnMut(&str) -> bool + 'static,
{
    let latest = tags::fetch_latest_tag(http, config)?;
    info!("latest published tag: {}", latest.name);

    if config.local_version == DEV_VERSION {
        debug!("development version, skipping update check");
        launcher::launch(spawner, &config.launcher_path())?;
        return Ok(Outcome::DevLaunch);
    }

    if config.local_version == latest.name {
        println!("Launching GZLauncher.");
        launcher::launch(spawner, &config.launcher_path())?;
        return Ok(Outcome::UpToDate);
    }

    let mut confirm_fn: Box<dyn FnMut(&str) -> bool> =
        if let Some(mut custom_confirm) = user_confirm {
            Box::new(move |version| custom_confirm(version))
        } else {
            Box::new(default_user_confirm)
        };

    if confirm_fn(&latest.name) {
        updater::apply_update(http, config, &latest.archive_url)?;
        launcher::launch(spawner, &config.entry_path())?;
        Ok(Outcome::Updated {
            version: latest.name,
        })
    } else {
        info!("You chose not to update.");
        println!("Launching GZLauncher.");
        launcher::launch(spawner, &config.launcher_path())?;
        Ok(Outcome::Declined)
    }
}

/// Default confirmation prompt, reading one line from stdin.
fn default_user_confirm(version: &str) -> bool {
    println!("New version {version} available, would you like to update? (Y, n)");

    let mut response = String::new();
    if io::stdin().read_line(&mut response).is_err() {
        return false;
    }
    is_affirmative(&response)
}

/// An empty response or a `y`/`yes` token (case-insensitive) counts as yes;
/// anything else is no.
pub fn is_affirmative(response: &str) -> bool {
    let response = response.trim().to_lowercase();
    response.is_empty() || response == "y" || response == "yes"
}
