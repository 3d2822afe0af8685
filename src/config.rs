// SPDX-License-Identifier: GPL-3.0-or-later
//
// masterpass
// Copyright (C) 2025  Nikita Podvirnyi <krypt0nn@vk.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::Context;
use url::Url;

/// Default algod server of the algokit localnet.
pub const DEFAULT_ALGOD_SERVER: &str = "http://localhost";

/// Default algod port of the algokit localnet.
pub const DEFAULT_ALGOD_PORT: u16 = 4001;

/// Default algod network name.
pub const DEFAULT_ALGOD_NETWORK: &str = "localnet";

/// Amount of rounds to wait for a transaction confirmation.
pub const DEFAULT_WAIT_ROUNDS: u64 = 5;

lazy_static::lazy_static! {
    /// API token of the algokit localnet.
    pub static ref DEFAULT_ALGOD_TOKEN: String = "a".repeat(64);
}

/// Algod node connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgodConfig {
    pub server: String,
    pub port: Option<u16>,
    pub token: String,
    pub network: String,
    pub wait_rounds: u64
}

impl Default for AlgodConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_ALGOD_SERVER.to_string(),
            port: Some(DEFAULT_ALGOD_PORT),
            token: DEFAULT_ALGOD_TOKEN.clone(),
            network: DEFAULT_ALGOD_NETWORK.to_string(),
            wait_rounds: DEFAULT_WAIT_ROUNDS
        }
    }
}

impl AlgodConfig {
    /// Read config from the environment variables:
    ///
    /// - `ALGOD_SERVER` (default `http://localhost`).
    /// - `ALGOD_PORT` (default `4001`, empty value means no port).
    /// - `ALGOD_TOKEN` (default localnet token).
    /// - `ALGOD_NETWORK` (default `localnet`).
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Read config from the variables provided by the `var` lookup function.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(server) = var("ALGOD_SERVER") {
            config.server = server;
        }

        if let Some(port) = var("ALGOD_PORT") {
            config.port = if port.trim().is_empty() {
                None
            } else {
                Some(port.trim().parse().context("invalid ALGOD_PORT value")?)
            };
        }

        if let Some(token) = var("ALGOD_TOKEN") {
            config.token = token;
        }

        if let Some(network) = var("ALGOD_NETWORK") {
            config.network = network;
        }

        config.validate()?;

        Ok(config)
    }

    /// Verify the server URL and that at least one round is awaited for
    /// the transactions confirmation.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.url()?;

        if self.wait_rounds == 0 {
            anyhow::bail!("amount of rounds to wait for confirmation must be positive");
        }

        Ok(())
    }

    /// Full URL of the algod node.
    pub fn url(&self) -> anyhow::Result<Url> {
        if !validate_url(&self.server) {
            anyhow::bail!("invalid algod server URL: {}", self.server);
        }

        let mut url = Url::parse(&self.server)
            .context("failed to parse algod server URL")?;

        if let Some(port) = self.port {
            url.set_port(Some(port))
                .map_err(|_| anyhow::anyhow!("failed to set algod server port"))?;
        }

        Ok(url)
    }
}

/// Validate that a URL is well-formed and uses HTTP or HTTPS.
pub fn validate_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();

            (scheme == "http" || scheme == "https") && parsed.host().is_some()
        }

        Err(_) => false
    }
}

#[test]
fn test_defaults() -> anyhow::Result<()> {
    let config = AlgodConfig::from_vars(|_| None)?;

    assert_eq!(config, AlgodConfig::default());
    assert_eq!(config.url()?.as_str(), "http://localhost:4001/");
    assert_eq!(config.token.len(), 64);

    Ok(())
}

#[test]
fn test_from_vars() -> anyhow::Result<()> {
    let config = AlgodConfig::from_vars(|name| match name {
        "ALGOD_SERVER" => Some(String::from("https://testnet-api.algonode.cloud")),
        "ALGOD_PORT" => Some(String::new()),
        "ALGOD_TOKEN" => Some(String::new()),
        "ALGOD_NETWORK" => Some(String::from("testnet")),
        _ => None
    })?;

    assert_eq!(config.port, None);
    assert_eq!(config.network, "testnet");
    assert!(config.token.is_empty());
    assert_eq!(config.url()?.as_str(), "https://testnet-api.algonode.cloud/");

    Ok(())
}

#[test]
fn test_invalid_vars() {
    assert!(AlgodConfig::from_vars(|name| (name == "ALGOD_PORT").then(|| String::from("port"))).is_err());
    assert!(AlgodConfig::from_vars(|name| (name == "ALGOD_SERVER").then(|| String::from("localhost"))).is_err());
    assert!(AlgodConfig::from_vars(|name| (name == "ALGOD_SERVER").then(|| String::from("ftp://node.example"))).is_err());
}

#[test]
fn test_zero_wait_rounds() {
    let config = AlgodConfig {
        wait_rounds: 0,
        ..AlgodConfig::default()
    };

    assert!(config.validate().is_err());
    assert!(crate::algod::AlgodClient::new(&config).is_err());

    assert!(AlgodConfig::default().validate().is_ok());
}
