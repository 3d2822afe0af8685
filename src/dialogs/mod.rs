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

use spin::RwLock;

use masterpass_protocol::prelude::*;

use crate::algod::{AlgorandClient, AssetCreateParams, PaymentParams, SendResult};
use crate::notifications::{Notifier, Variant};
use crate::wallet::WalletSession;

pub mod nft_mint;
pub mod token_mint;
pub mod payment;

pub use nft_mint::NftMintForm;
pub use token_mint::TokenMintForm;
pub use payment::PaymentForm;

/// Warning shown when a dialog is submitted without a connected wallet.
pub const WALLET_NOT_CONNECTED: &str = "Please connect your wallet first";

/// Input state of a dialog.
pub trait Form: Default + Clone + Send + Sync + 'static {
    /// Dialog header.
    const TITLE: &'static str;

    /// Label of the submit button.
    const SUBMIT: &'static str;

    /// Labels of the text fields, in display order.
    const FIELDS: &'static [&'static str];

    /// Warning shown when some required field is empty.
    const MISSING_FIELDS: &'static str;

    /// Info notice shown when the request is sent.
    const PENDING: &'static str;

    /// Error notice shown when the request has failed.
    const FAILURE: &'static str;

    fn success_notice(tx_id: &str) -> String;

    fn field(&self, index: usize) -> Option<&String>;

    fn field_mut(&mut self, index: usize) -> Option<&mut String>;

    /// Check that all the required fields are not empty.
    fn is_filled(&self) -> bool {
        (0..Self::FIELDS.len()).all(|index| {
            self.field(index).is_some_and(|value| !value.is_empty())
        })
    }

    /// Build the client request from the form values.
    fn request(
        &self,
        sender: Address,
        signer: Arc<dyn TransactionSigner>
    ) -> anyhow::Result<Request>;
}

/// Client call performed by a dialog.
#[derive(Debug, Clone)]
pub enum Request {
    AssetCreate(AssetCreateParams),
    Payment(PaymentParams)
}

impl Request {
    pub async fn send(self, client: &dyn AlgorandClient) -> anyhow::Result<SendResult> {
        match self {
            Self::AssetCreate(params) => client.send_asset_create(params).await,
            Self::Payment(params) => client.send_payment(params).await
        }
    }
}

/// Modal dialog state shared between the TUI and the submission tasks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Dialog<F> {
    pub open: bool,

    /// Submission is in flight.
    pub loading: bool,

    /// Index of the focused field. `F::FIELDS.len()` means the submit
    /// button and the next one is the close button.
    pub focus: usize,

    pub form: F
}

impl<F: Form> Dialog<F> {
    /// Amount of focusable elements: fields, submit and close buttons.
    #[inline]
    pub const fn focusable() -> usize {
        F::FIELDS.len() + 2
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.focus = 0;
    }
}

pub type SharedDialog<F> = Arc<RwLock<Dialog<F>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No wallet connected, nothing was sent.
    NotConnected,

    /// Some required field is empty, nothing was sent.
    MissingFields,

    /// Another submission of the same dialog is in flight.
    Busy,

    Sent(SendResult),
    Failed
}

/// Submit the dialog's form.
///
/// At most one client call is made. The loading flag is set for the call's
/// duration and always cleared afterwards. The form is reset only when the
/// call succeeded. Locks are never held across awaits.
pub async fn submit<F: Form>(
    dialog: &RwLock<Dialog<F>>,
    session: &WalletSession,
    client: &dyn AlgorandClient,
    notifier: &dyn Notifier
) -> Outcome {
    let (Some(sender), Some(signer)) = (session.active_address().copied(), session.signer()) else {
        notifier.enqueue(WALLET_NOT_CONNECTED.to_string(), Variant::Warning);

        return Outcome::NotConnected;
    };

    let form = {
        let mut lock = dialog.write();

        if !lock.form.is_filled() {
            None
        }

        else if lock.loading {
            return Outcome::Busy;
        }

        else {
            lock.loading = true;

            Some(lock.form.clone())
        }
    };

    let Some(form) = form else {
        notifier.enqueue(F::MISSING_FIELDS.to_string(), Variant::Warning);

        return Outcome::MissingFields;
    };

    notifier.enqueue(F::PENDING.to_string(), Variant::Info);

    let result = match form.request(sender, signer) {
        Ok(request) => request.send(client).await,
        Err(err) => Err(err)
    };

    match result {
        Ok(result) => {
            tracing::info!(
                dialog = F::TITLE,
                tx_id = result.tx_id(),
                confirmed_round = ?result.confirmed_round,
                asset_id = ?result.asset_id,
                "request succeeded"
            );

            notifier.enqueue(F::success_notice(result.tx_id()), Variant::Success);

            let mut lock = dialog.write();

            lock.form = F::default();
            lock.loading = false;

            Outcome::Sent(result)
        }

        Err(err) => {
            tracing::error!(dialog = F::TITLE, "request failed: {err:#}");

            notifier.enqueue(F::FAILURE.to_string(), Variant::Error);

            dialog.write().loading = false;

            Outcome::Failed
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Arc;

    use async_trait::async_trait;
    use spin::Mutex;
    use tokio::sync::Notify;

    use masterpass_protocol::prelude::*;

    use crate::accounts::Account;
    use crate::algod::*;
    use crate::notifications::{Notifier, Variant};
    use crate::wallet::WalletSession;

    pub const MOCK_TX_ID: &str = "FTQHRERDNW4NLJXW7JBN45BWNFYG5EURSVP4726YQZABTKCR7MWQ";

    /// In-memory client which records all the requests.
    #[derive(Default)]
    pub struct MockClient {
        pub asset_creates: Mutex<Vec<AssetCreateParams>>,
        pub payments: Mutex<Vec<PaymentParams>>,

        /// Fail all the requests.
        pub fail: bool,

        /// Hold requests until notified.
        pub gate: Option<Arc<Notify>>
    }

    impl MockClient {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn gated(gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::default()
            }
        }

        pub fn calls(&self) -> usize {
            self.asset_creates.lock().len() + self.payments.lock().len()
        }

        async fn respond(&self) -> anyhow::Result<SendResult> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            if self.fail {
                anyhow::bail!("node is unreachable");
            }

            Ok(SendResult {
                tx_ids: vec![MOCK_TX_ID.to_string()],
                confirmed_round: Some(12),
                asset_id: Some(1001)
            })
        }
    }

    #[async_trait]
    impl AlgorandClient for MockClient {
        async fn send_asset_create(&self, params: AssetCreateParams) -> anyhow::Result<SendResult> {
            self.asset_creates.lock().push(params);

            self.respond().await
        }

        async fn send_payment(&self, params: PaymentParams) -> anyhow::Result<SendResult> {
            self.payments.lock().push(params);

            self.respond().await
        }
    }

    /// Notifier which remembers all the notices.
    #[derive(Default)]
    pub struct Recorder(Mutex<Vec<(String, Variant)>>);

    impl Recorder {
        pub fn notices(&self) -> Vec<(String, Variant)> {
            self.0.lock().clone()
        }

        pub fn last(&self) -> Option<(String, Variant)> {
            self.0.lock().last().cloned()
        }
    }

    impl Notifier for Recorder {
        fn enqueue(&self, message: String, variant: Variant) {
            self.0.lock().push((message, variant));
        }
    }

    pub fn connected_session() -> WalletSession {
        let mut session = WalletSession::default();

        session.connect(&Account::new("main", SecretKey::from_bytes(&[7; 32])));

        session
    }
}

#[cfg(test)]
use mock::*;

#[tokio::test]
async fn test_not_connected() {
    let client = MockClient::default();
    let notifier = Recorder::default();

    let dialog = RwLock::new(Dialog {
        form: NftMintForm {
            metadata_url: String::from("ipfs://ticket")
        },
        ..Dialog::default()
    });

    let outcome = submit(&dialog, &WalletSession::default(), &client, &notifier).await;

    assert_eq!(outcome, Outcome::NotConnected);
    assert_eq!(client.calls(), 0);
    assert!(!dialog.read().loading);

    assert_eq!(notifier.notices(), [
        (String::from(WALLET_NOT_CONNECTED), Variant::Warning)
    ]);
}

#[tokio::test]
async fn test_busy() -> anyhow::Result<()> {
    let gate = Arc::new(tokio::sync::Notify::new());

    let client = Arc::new(MockClient::gated(gate.clone()));
    let notifier = Arc::new(Recorder::default());
    let session = Arc::new(mock::connected_session());

    let dialog = Arc::new(RwLock::new(Dialog {
        form: NftMintForm {
            metadata_url: String::from("ipfs://ticket")
        },
        ..Dialog::default()
    }));

    let task = tokio::spawn({
        let client = client.clone();
        let notifier = notifier.clone();
        let session = session.clone();
        let dialog = dialog.clone();

        async move {
            submit(dialog.as_ref(), &session, client.as_ref(), notifier.as_ref()).await
        }
    });

    while !dialog.read().loading {
        tokio::task::yield_now().await;
    }

    // Second press while the first one is in flight.
    let outcome = submit(dialog.as_ref(), &session, client.as_ref(), notifier.as_ref()).await;

    assert_eq!(outcome, Outcome::Busy);

    gate.notify_one();

    assert!(matches!(task.await?, Outcome::Sent(_)));
    assert_eq!(client.calls(), 1);
    assert!(!dialog.read().loading);

    Ok(())
}

#[test]
fn test_dialog_toggle() {
    let mut dialog = Dialog::<PaymentForm>::default();

    dialog.focus = 2;
    dialog.toggle();

    assert!(dialog.open);
    assert_eq!(dialog.focus, 0);
    assert_eq!(Dialog::<PaymentForm>::focusable(), 4);
}
