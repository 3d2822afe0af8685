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

use masterpass_protocol::prelude::*;

use crate::algod::AssetCreateParams;

use super::{Form, Request};

/// MasterPass ticket minting form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NftMintForm {
    pub metadata_url: String
}

impl Form for NftMintForm {
    const TITLE: &'static str = "Mint MasterPass NFT";
    const SUBMIT: &'static str = "mint";
    const FIELDS: &'static [&'static str] = &["metadata url (ipfs://...#arc3)"];

    const MISSING_FIELDS: &'static str = "Please paste a metadata URL";
    const PENDING: &'static str = "Minting NFT...";
    const FAILURE: &'static str = "Failed to mint NFT";

    fn success_notice(tx_id: &str) -> String {
        format!("NFT minted! TX ID: {tx_id}")
    }

    fn field(&self, index: usize) -> Option<&String> {
        match index {
            0 => Some(&self.metadata_url),
            _ => None
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.metadata_url),
            _ => None
        }
    }

    fn request(
        &self,
        sender: Address,
        signer: Arc<dyn TransactionSigner>
    ) -> anyhow::Result<Request> {
        let params = AssetParams::masterpass_ticket(&self.metadata_url);

        params.validate()?;

        Ok(Request::AssetCreate(AssetCreateParams::new(sender, signer, params)))
    }
}

#[cfg(test)]
use {
    spin::RwLock,
    masterpass_protocol::crypto::metadata_hash,
    crate::notifications::Variant,
    crate::wallet::WalletSession,
    super::{Dialog, Outcome, submit, mock::*}
};

#[cfg(test)]
const TICKET_URL: &str = "ipfs://bafkreih5aznjvttude6c3wbvqeebb6rlx5wkbzyppv7garjiubll2ceym4#arc3";

#[cfg(test)]
fn filled_dialog() -> RwLock<Dialog<NftMintForm>> {
    RwLock::new(Dialog {
        open: true,
        form: NftMintForm {
            metadata_url: String::from(TICKET_URL)
        },
        ..Dialog::default()
    })
}

#[tokio::test]
async fn test_mint() {
    let client = MockClient::default();
    let notifier = Recorder::default();
    let session = connected_session();
    let dialog = filled_dialog();

    let outcome = submit(&dialog, &session, &client, &notifier).await;

    assert!(matches!(outcome, Outcome::Sent(_)));

    let requests = client.asset_creates.lock();

    assert_eq!(requests.len(), 1);
    assert_eq!(Some(&requests[0].sender), session.active_address());
    assert_eq!(requests[0].total, 1);
    assert_eq!(requests[0].decimals, 0);
    assert_eq!(requests[0].asset_name, "MasterPass Ticket");
    assert_eq!(requests[0].unit_name, "MTK");
    assert_eq!(requests[0].url.as_deref(), Some(TICKET_URL));
    assert_eq!(requests[0].metadata_hash, Some(metadata_hash(TICKET_URL)));
    assert!(!requests[0].default_frozen);

    assert_eq!(notifier.notices(), [
        (String::from("Minting NFT..."), Variant::Info),
        (format!("NFT minted! TX ID: {MOCK_TX_ID}"), Variant::Success)
    ]);

    let dialog = dialog.read();

    assert!(dialog.open);
    assert!(!dialog.loading);
    assert_eq!(dialog.form, NftMintForm::default());
}

#[tokio::test]
async fn test_missing_url() {
    let client = MockClient::default();
    let notifier = Recorder::default();
    let dialog = RwLock::new(Dialog::<NftMintForm>::default());

    let outcome = submit(&dialog, &connected_session(), &client, &notifier).await;

    assert_eq!(outcome, Outcome::MissingFields);
    assert_eq!(client.calls(), 0);
    assert!(!dialog.read().loading);

    assert_eq!(notifier.last(), Some((String::from("Please paste a metadata URL"), Variant::Warning)));
}

#[tokio::test]
async fn test_wallet_checked_first() {
    let client = MockClient::default();
    let notifier = Recorder::default();
    let dialog = RwLock::new(Dialog::<NftMintForm>::default());

    let outcome = submit(&dialog, &WalletSession::default(), &client, &notifier).await;

    assert_eq!(outcome, Outcome::NotConnected);
    assert_eq!(notifier.notices().len(), 1);
}

#[tokio::test]
async fn test_failure_keeps_form() {
    let client = MockClient::failing();
    let notifier = Recorder::default();
    let dialog = filled_dialog();

    let outcome = submit(&dialog, &connected_session(), &client, &notifier).await;

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(client.calls(), 1);

    assert_eq!(notifier.last(), Some((String::from("Failed to mint NFT"), Variant::Error)));

    let dialog = dialog.read();

    assert!(!dialog.loading);
    assert_eq!(dialog.form.metadata_url, TICKET_URL);
}

#[tokio::test]
async fn test_url_too_long() {
    let client = MockClient::default();
    let notifier = Recorder::default();

    let url = format!("ipfs://{}#arc3", "a".repeat(100));

    let dialog = RwLock::new(Dialog {
        open: true,
        form: NftMintForm {
            metadata_url: url.clone()
        },
        ..Dialog::default()
    });

    let outcome = submit(&dialog, &connected_session(), &client, &notifier).await;

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(client.calls(), 0);
    assert_eq!(notifier.last(), Some((String::from("Failed to mint NFT"), Variant::Error)));

    let dialog = dialog.read();

    assert!(!dialog.loading);
    assert_eq!(dialog.form.metadata_url, url);
}
