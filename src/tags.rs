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

//! Fetching the remote tag list and selecting the latest release.

use anyhow::{anyhow, Context};
use log::{debug, info};
use serde::Deserialize;

use crate::config::UpdateConfig;
use crate::error::UpdateError;
use crate::http::HttpClient;

/// Index into the tag list treated as the latest release.
///
/// The launcher has always taken the second entry of the list, not the
/// first. Do not change this without confirming how the repository orders
/// its tags.
pub const LATEST_TAG_INDEX: usize = 1;

/// One entry of the remote tag list.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReleaseTag {
    /// Tag name, e.g. `1.0-3`.
    pub name: String,
    /// URL of the zip snapshot for this tag.
    #[serde(rename = "zipball_url")]
    pub archive_url: String,
}

/// Fetches the tag list from the configured endpoint and returns the entry
/// considered latest. Any transport or parse failure is a
/// [`UpdateError::Network`]; there is no retry.
pub fn fetch_latest_tag(
    http: &dyn HttpClient,
    config: &UpdateConfig,
) -> Result<ReleaseTag, UpdateError> {
    fetch_latest_inner(http, &config.tags_url).map_err(UpdateError::Network)
}

fn fetch_latest_inner(http: &dyn HttpClient, url: &str) -> anyhow::Result<ReleaseTag> {
    let body = http.get_text(url)?;
    debug!("tag list body: {}", body);

    let tags = parse_tags(&body)?;
    info!("fetched {} tags from {}", tags.len(), url);

    Ok(select_latest(&tags)?.clone())
}

/// Parses the JSON tag list. Unknown keys are ignored.
pub fn parse_tags(body: &str) -> anyhow::Result<Vec<ReleaseTag>> {
    serde_json::from_str(body).context("failed to parse tag list JSON")
}

/// Picks the entry at [`LATEST_TAG_INDEX`]; a shorter list is malformed
/// remote data.
pub fn select_latest(tags: &[ReleaseTag]) -> anyhow::Result<&ReleaseTag> {
    tags.get(LATEST_TAG_INDEX).ok_or_else(|| {
        anyhow!(
            "tag list has {} entries, expected at least {}",
            tags.len(),
            LATEST_TAG_INDEX + 1
        )
    })
}
