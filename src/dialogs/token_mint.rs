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

use std::sync::Arc;

use anyhow::Context;

use masterpass_protocol::prelude::*;
use masterpass_protocol::amount::parse_integer;

use crate::algod::AssetCreateParams;

use super::{Form, Request};

/// Fungible token minting form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMintForm {
    pub asset_name: String,
    pub unit_name: String,

    /// Human-readable supply, scaled by `10^decimals` on-chain.
    pub total_supply: String,

    pub decimals: String
}

impl Default for TokenMintForm {
    fn default() -> Self {
        Self {
            asset_name: String::new(),
            unit_name: String::new(),
            total_supply: String::new(),
            decimals: String::from("0")
        }
    }
}

impl Form for TokenMintForm {
    const TITLE: &'static str = "Mint a Fungible Token";
    const SUBMIT: &'static str = "mint";

    const FIELDS: &'static [&'static str] = &[
        "asset name (e.g. MasterPass Token)",
        "unit name (e.g. MPT)",
        "total supply",
        "decimals"
    ];

    const MISSING_FIELDS: &'static str = "Please fill out all fields";
    const PENDING: &'static str = "Minting Token...";
    const FAILURE: &'static str = "Failed to mint token";

    fn success_notice(tx_id: &str) -> String {
        format!("Token minted successfully! TX ID: {tx_id}")
    }

    fn field(&self, index: usize) -> Option<&String> {
        match index {
            0 => Some(&self.asset_name),
            1 => Some(&self.unit_name),
            2 => Some(&self.total_supply),
            3 => Some(&self.decimals),
            _ => None
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.asset_name),
            1 => Some(&mut self.unit_name),
            2 => Some(&mut self.total_supply),
            3 => Some(&mut self.decimals),
            _ => None
        }
    }

    fn request(
        &self,
        sender: Address,
        signer: Arc<dyn TransactionSigner>
    ) -> anyhow::Result<Request> {
        let supply = parse_integer(&self.total_supply)
            .context("invalid total supply")?;

        let decimals = u32::try_from(parse_integer(&self.decimals).context("invalid decimals")?)
            .context("invalid decimals")?;

        let params = AssetParams::fungible(&self.asset_name, &self.unit_name, supply, decimals)?;

        params.validate()?;

        Ok(Request::AssetCreate(AssetCreateParams::new(sender, signer, params)))
    }
}

#[cfg(test)]
use {
    spin::RwLock,
    crate::notifications::Variant,
    super::{Dialog, Outcome, submit, mock::*}
};

#[cfg(test)]
fn token_dialog(supply: &str, decimals: &str) -> RwLock<Dialog<TokenMintForm>> {
    RwLock::new(Dialog {
        open: true,
        form: TokenMintForm {
            asset_name: String::from("MasterPass Token"),
            unit_name: String::from("MPT"),
            total_supply: supply.to_string(),
            decimals: decimals.to_string()
        },
        ..Dialog::default()
    })
}

#[tokio::test]
async fn test_mint() {
    let client = MockClient::default();
    let notifier = Recorder::default();
    let dialog = token_dialog("1000000", "2");

    let outcome = submit(&dialog, &connected_session(), &client, &notifier).await;

    assert!(matches!(outcome, Outcome::Sent(_)));

    let requests = client.asset_creates.lock();

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].total, 100_000_000);
    assert_eq!(requests[0].decimals, 2);
    assert_eq!(requests[0].asset_name, "MasterPass Token");
    assert_eq!(requests[0].unit_name, "MPT");
    assert_eq!(requests[0].url, None);
    assert_eq!(requests[0].metadata_hash, None);
    assert!(!requests[0].default_frozen);

    assert_eq!(notifier.notices(), [
        (String::from("Minting Token..."), Variant::Info),
        (format!("Token minted successfully! TX ID: {MOCK_TX_ID}"), Variant::Success)
    ]);

    let dialog = dialog.read();

    assert!(!dialog.loading);
    assert_eq!(dialog.form, TokenMintForm::default());
    assert_eq!(dialog.form.decimals, "0");
}

#[tokio::test]
async fn test_missing_fields() {
    let client = MockClient::default();
    let notifier = Recorder::default();
    let dialog = token_dialog("", "0");

    let outcome = submit(&dialog, &connected_session(), &client, &notifier).await;

    assert_eq!(outcome, Outcome::MissingFields);
    assert_eq!(client.calls(), 0);

    assert_eq!(notifier.notices(), [
        (String::from("Please fill out all fields"), Variant::Warning)
    ]);
}

#[tokio::test]
async fn test_invalid_numbers() {
    for (supply, decimals) in [("ten", "0"), ("10", "-1"), ("10", "20"), ("18446744073709551615", "1")] {
        let client = MockClient::default();
        let notifier = Recorder::default();
        let dialog = token_dialog(supply, decimals);

        let outcome = submit(&dialog, &connected_session(), &client, &notifier).await;

        // Parsing errors are failures of the call, not precondition warnings.
        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(client.calls(), 0);
        assert_eq!(notifier.last(), Some((String::from("Failed to mint token"), Variant::Error)));

        let dialog = dialog.read();

        assert!(!dialog.loading);
        assert_eq!(dialog.form.total_supply, supply);
    }
}

#[tokio::test]
async fn test_zero_supply() {
    let client = MockClient::default();
    let notifier = Recorder::default();
    let dialog = token_dialog("0", "2");

    let outcome = submit(&dialog, &connected_session(), &client, &notifier).await;

    // Zero supply is sent as is.
    assert!(matches!(outcome, Outcome::Sent(_)));
    assert_eq!(client.calls(), 1);

    let requests = client.asset_creates.lock();

    assert_eq!(requests[0].total, 0);
    assert_eq!(requests[0].decimals, 2);
}

#[test]
fn test_default() {
    let form = TokenMintForm::default();

    assert_eq!(form.decimals, "0");
    assert!(!form.is_filled());
}
