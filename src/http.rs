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

//! Blocking HTTP access, behind a trait so tests can substitute fakes.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};

const USER_AGENT: &str = concat!(
    "gzupdate/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/craftnut/GZLauncher)"
);

/// The two network operations the flow performs.
pub trait HttpClient {
    /// GET `url` and return the response body as text.
    fn get_text(&self, url: &str) -> Result<String>;

    /// GET `url` and stream the response body into the file at `dest`.
    fn download(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Production client backed by `reqwest::blocking`. No timeouts, no
/// retries: any transfer failure is fatal upstream.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        ReqwestClient {
            client: reqwest::blocking::Client::new(),
        }
    }

    fn send(&self, url: &str) -> Result<reqwest::blocking::Response> {
        info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .with_context(|| format!("failed to reach {url}"))?;

        let status = response.status();
        debug!("response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("request to {url} failed: HTTP {status}");
        }

        Ok(response)
    }
}

impl HttpClient for ReqwestClient {
    fn get_text(&self, url: &str) -> Result<String> {
        self.send(url)?
            .text()
            .context("failed to read response body")
    }

    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let mut response = self.send(url)?;
        let mut file = File::create(dest)
            .with_context(|| format!("failed to create {}", dest.display()))?;
        io::copy(&mut response, &mut file)
            .with_context(|| format!("failed to write {}", dest.display()))?;
        Ok(())
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}
