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

use std::path::PathBuf;
use std::sync::Arc;

use spin::RwLock;

use crate::accounts::Account;
use crate::algod::AlgorandClient;
use crate::dialogs::*;
use crate::notifications::Snackbar;
use crate::wallet::WalletSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveDialog {
    Payment,
    NftMint,
    TokenMint
}

/// State shared between the render loop and the submission tasks.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<WalletSession>>,

    pub payment: SharedDialog<PaymentForm>,
    pub nft_mint: SharedDialog<NftMintForm>,
    pub token_mint: SharedDialog<TokenMintForm>,

    pub snackbar: Snackbar,
    pub client: Arc<dyn AlgorandClient>,

    /// Name of the algod network shown in the header.
    pub network: String,

    pub accounts_path: PathBuf
}

impl AppState {
    pub fn new(
        client: Arc<dyn AlgorandClient>,
        network: impl ToString,
        accounts_path: impl Into<PathBuf>
    ) -> Self {
        Self {
            session: Arc::new(RwLock::new(WalletSession::default())),
            payment: Arc::new(RwLock::new(Dialog::default())),
            nft_mint: Arc::new(RwLock::new(Dialog::default())),
            token_mint: Arc::new(RwLock::new(Dialog::default())),
            snackbar: Snackbar::default(),
            client,
            network: network.to_string(),
            accounts_path: accounts_path.into()
        }
    }

    /// Get the open dialog. Only one dialog is shown at a time.
    pub fn active_dialog(&self) -> Option<ActiveDialog> {
        if self.payment.read().open {
            Some(ActiveDialog::Payment)
        }

        else if self.nft_mint.read().open {
            Some(ActiveDialog::NftMint)
        }

        else if self.token_mint.read().open {
            Some(ActiveDialog::TokenMint)
        }

        else {
            None
        }
    }

    pub fn connect(&self, account: &Account) {
        self.session.write().connect(account);
    }

    /// Disconnect the wallet and close the dialogs which need it.
    pub fn disconnect(&self) {
        self.session.write().disconnect();

        self.payment.write().open = false;
        self.nft_mint.write().open = false;
        self.token_mint.write().open = false;
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("session", &self.session)
            .field("network", &self.network)
            .field("accounts_path", &self.accounts_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
use masterpass_protocol::prelude::*;

#[test]
fn test_disconnect_closes_dialogs() {
    let state = AppState::new(
        Arc::new(crate::dialogs::mock::MockClient::default()),
        "localnet",
        "accounts.json"
    );

    state.connect(&Account::new("main", SecretKey::from_bytes(&[7; 32])));

    assert!(state.active_dialog().is_none());

    state.token_mint.write().toggle();
    state.nft_mint.write().toggle();

    assert_eq!(state.active_dialog(), Some(ActiveDialog::NftMint));

    state.disconnect();

    assert!(state.active_dialog().is_none());
    assert!(!state.session.read().is_connected());
}
