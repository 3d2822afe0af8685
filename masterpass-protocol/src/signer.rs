// SPDX-License-Identifier: GPL-3.0-or-later
//
// masterpass-protocol
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

use crate::address::Address;
use crate::crypto::SecretKey;
use crate::transaction::{Transaction, SignedTransaction};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("signer of {signer} can't authorize transaction sent by {sender}")]
    WrongSender {
        signer: Address,
        sender: Address
    }
}

/// Capability to authorize transactions on behalf of an address.
pub trait TransactionSigner: Send + Sync {
    /// Address whose transactions can be signed.
    fn address(&self) -> Address;

    fn sign(&self, transaction: Transaction) -> Result<SignedTransaction, Error>;
}

impl TransactionSigner for SecretKey {
    #[inline]
    fn address(&self) -> Address {
        SecretKey::address(self)
    }

    fn sign(&self, transaction: Transaction) -> Result<SignedTransaction, Error> {
        let signer = SecretKey::address(self);

        if transaction.sender != signer {
            return Err(Error::WrongSender {
                signer,
                sender: transaction.sender
            });
        }

        Ok(SignedTransaction {
            signature: SecretKey::sign(self, transaction.bytes_to_sign()),
            transaction
        })
    }
}

#[test]
fn test() {
    use crate::transaction::{SuggestedParams, TransactionKind};

    let secret_key = SecretKey::from_bytes(&[7; 32]);

    let params = SuggestedParams {
        fee: 0,
        min_fee: 1000,
        first_valid: 1,
        last_valid: 1001,
        genesis_id: String::from("dockernet-v1"),
        genesis_hash: [1; 32]
    };

    let kind = TransactionKind::Payment {
        receiver: Address::ZERO,
        amount: 1
    };

    let transaction = Transaction::new(secret_key.address(), &params, kind.clone());

    let signed = TransactionSigner::sign(&secret_key, transaction.clone()).unwrap();

    assert!(signed.verify());
    assert_eq!(signed.id(), transaction.id());

    let foreign = Transaction::new(Address::ZERO, &params, kind);

    assert_eq!(
        TransactionSigner::sign(&secret_key, foreign),
        Err(Error::WrongSender {
            signer: secret_key.address(),
            sender: Address::ZERO
        })
    );
}
