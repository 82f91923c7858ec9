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
use std::io;
use std::process::exit;

use gzupdate::{is_affirmative, run_launcher, ReqwestClient, SystemSpawner, UpdateConfig};
use log::error;

fn init_logger() {
    use env_logger::Env;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

fn main() {
    init_logger();

    let config = UpdateConfig::new();
    let http = ReqwestClient::new();
    let spawner = SystemSpawner::new(&config);

    let confirm = |version: &str| {
        println!("New version {version} available, would you like to update? (Y, n)");

        let mut response = String::new();
        if io::stdin().read_line(&mut response).is_err() {
            return false;
        }
        is_affirmative(&response)
    };

    match run_launcher(&config, &http, &spawner, Some(confirm)) {
        Ok(outcome) => {
            log::debug!("handoff complete: {outcome:?}");
            exit(0);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            error!("{e}");
            exit(e.exit_code());
        }
    }
}
