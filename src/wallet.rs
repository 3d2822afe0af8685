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

use crate::accounts::Account;

/// Currently connected wallet. Dialogs only read it; the wallet connector
/// screen is the only place which changes it.
#[derive(Default, Clone)]
pub struct WalletSession {
    active_address: Option<Address>,
    signer: Option<Arc<dyn TransactionSigner>>,
    title: Option<String>
}

impl WalletSession {
    /// Connect a local account.
    pub fn connect(&mut self, account: &Account) {
        tracing::info!(address = %account.address(), title = %account.title(), "wallet connected");

        self.connect_signer(
            account.title(),
            Arc::new(account.secret_key().clone())
        );
    }

    /// Connect arbitrary transaction signer.
    pub fn connect_signer(
        &mut self,
        title: impl ToString,
        signer: Arc<dyn TransactionSigner>
    ) {
        self.active_address = Some(signer.address());
        self.signer = Some(signer);
        self.title = Some(title.to_string());
    }

    pub fn disconnect(&mut self) {
        if let Some(address) = self.active_address.take() {
            tracing::info!(%address, "wallet disconnected");
        }

        self.signer = None;
        self.title = None;
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.active_address.is_some() && self.signer.is_some()
    }

    #[inline(always)]
    pub const fn active_address(&self) -> Option<&Address> {
        self.active_address.as_ref()
    }

    #[inline]
    pub fn signer(&self) -> Option<Arc<dyn TransactionSigner>> {
        self.signer.clone()
    }

    #[inline]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl std::fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("active_address", &self.active_address)
            .field("signer", &self.signer.as_ref().map(|signer| signer.address()))
            .field("title", &self.title)
            .finish()
    }
}

#[test]
fn test_session() {
    let account = Account::new("main", SecretKey::from_bytes(&[7; 32]));

    let mut session = WalletSession::default();

    assert!(!session.is_connected());
    assert!(session.signer().is_none());

    session.connect(&account);

    assert!(session.is_connected());
    assert_eq!(session.active_address(), Some(&account.address()));
    assert_eq!(session.signer().map(|signer| signer.address()), Some(account.address()));
    assert_eq!(session.title(), Some("main"));

    session.disconnect();

    assert!(!session.is_connected());
    assert!(session.active_address().is_none());
    assert!(session.title().is_none());
}
