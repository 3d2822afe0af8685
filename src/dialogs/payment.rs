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
use masterpass_protocol::amount::{parse_decimal, ALGO_DECIMALS};

use crate::algod::PaymentParams;

use super::{Form, Request};

/// Algo transfer form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PaymentForm {
    pub receiver: String,

    /// Amount in Algos, at most 6 fraction digits.
    pub amount: String
}

impl Form for PaymentForm {
    const TITLE: &'static str = "Send payment transaction";
    const SUBMIT: &'static str = "send";

    const FIELDS: &'static [&'static str] = &[
        "receiver address",
        "amount (algos)"
    ];

    const MISSING_FIELDS: &'static str = "Please fill out all fields";
    const PENDING: &'static str = "Sending payment...";
    const FAILURE: &'static str = "Failed to send payment";

    fn success_notice(tx_id: &str) -> String {
        format!("Payment sent! TX ID: {tx_id}")
    }

    fn field(&self, index: usize) -> Option<&String> {
        match index {
            0 => Some(&self.receiver),
            1 => Some(&self.amount),
            _ => None
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.receiver),
            1 => Some(&mut self.amount),
            _ => None
        }
    }

    fn request(
        &self,
        sender: Address,
        signer: Arc<dyn TransactionSigner>
    ) -> anyhow::Result<Request> {
        let receiver = Address::decode(self.receiver.trim())
            .context("invalid receiver address")?;

        let amount = parse_decimal(&self.amount, ALGO_DECIMALS)
            .context("invalid payment amount")?;

        Ok(Request::Payment(PaymentParams {
            sender,
            signer,
            receiver,
            amount
        }))
    }
}

#[cfg(test)]
use {
    spin::RwLock,
    crate::notifications::Variant,
    super::{Dialog, Outcome, submit, mock::*}
};

#[cfg(test)]
const RECEIVER: &str = "RKEOHXLUBHYZL7KS3MWTZOS5OLFGOCN7DWKBEG7TOSEADNAPN5OOTUNSLE";

#[cfg(test)]
fn payment_dialog(receiver: &str, amount: &str) -> RwLock<Dialog<PaymentForm>> {
    RwLock::new(Dialog {
        open: true,
        form: PaymentForm {
            receiver: receiver.to_string(),
            amount: amount.to_string()
        },
        ..Dialog::default()
    })
}

#[tokio::test]
async fn test_send() -> anyhow::Result<()> {
    let client = MockClient::default();
    let notifier = Recorder::default();
    let dialog = payment_dialog(RECEIVER, "1.5");

    let outcome = submit(&dialog, &connected_session(), &client, &notifier).await;

    assert!(matches!(outcome, Outcome::Sent(_)));

    let payments = client.payments.lock();

    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].receiver, RECEIVER.parse::<Address>()?);
    assert_eq!(payments[0].amount, 1_500_000);

    assert_eq!(notifier.notices(), [
        (String::from("Sending payment..."), Variant::Info),
        (format!("Payment sent! TX ID: {MOCK_TX_ID}"), Variant::Success)
    ]);

    assert_eq!(dialog.read().form, PaymentForm::default());

    Ok(())
}

#[tokio::test]
async fn test_invalid_input() {
    let broken_receiver = RECEIVER.replace('R', "A");

    for (receiver, amount) in [(broken_receiver.as_str(), "1"), (RECEIVER, "0.0000001"), (RECEIVER, "one")] {
        let client = MockClient::default();
        let notifier = Recorder::default();
        let dialog = payment_dialog(receiver, amount);

        let outcome = submit(&dialog, &connected_session(), &client, &notifier).await;

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(client.calls(), 0);
        assert_eq!(notifier.last(), Some((String::from("Failed to send payment"), Variant::Error)));
        assert_eq!(dialog.read().form.amount, amount);
    }
}

#[tokio::test]
async fn test_missing_amount() {
    let client = MockClient::default();
    let notifier = Recorder::default();
    let dialog = payment_dialog(RECEIVER, "");

    let outcome = submit(&dialog, &connected_session(), &client, &notifier).await;

    assert_eq!(outcome, Outcome::MissingFields);
    assert_eq!(client.calls(), 0);
    assert_eq!(notifier.last(), Some((String::from("Please fill out all fields"), Variant::Warning)));
}
