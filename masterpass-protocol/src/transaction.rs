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

use data_encoding::BASE32_NOPAD;

use crate::address::Address;
use crate::asset::AssetParams;
use crate::crypto::sha512_256;
use crate::msgpack::Map;

/// Prefix of the bytes which are hashed and signed for a transaction.
pub const TRANSACTION_DOMAIN: &[u8] = b"TX";

/// Amount of bytes added to an encoded transaction by the signature
/// envelope: map header, `sig` key, 64 bytes signature and `txn` key.
pub const SIGNATURE_OVERHEAD: usize = 75;

/// Transaction parameters suggested by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedParams {
    /// Fee per byte of the signed transaction, in microAlgos.
    pub fee: u64,

    /// Minimal fee of a transaction, in microAlgos.
    pub min_fee: u64,

    pub first_valid: u64,
    pub last_valid: u64,

    pub genesis_id: String,
    pub genesis_hash: [u8; 32]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    /// Transfer Algos to another account.
    Payment {
        receiver: Address,

        /// Amount in microAlgos.
        amount: u64
    },

    /// Create new asset (`asset_id == 0`) or reconfigure an existing one.
    AssetConfig {
        asset_id: u64,
        params: AssetParams
    }
}

impl TransactionKind {
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Payment { .. } => "pay",
            Self::AssetConfig { .. } => "acfg"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub sender: Address,

    /// Flat fee of the transaction, in microAlgos.
    pub fee: u64,

    pub first_valid: u64,
    pub last_valid: u64,

    pub genesis_id: String,
    pub genesis_hash: [u8; 32],

    pub kind: TransactionKind
}

impl Transaction {
    /// Build new transaction using node-suggested params. The fee is set to
    /// `max(min_fee, fee * estimated_size)`.
    pub fn new(
        sender: Address,
        params: &SuggestedParams,
        kind: TransactionKind
    ) -> Self {
        let mut transaction = Self {
            sender,
            fee: 0,
            first_valid: params.first_valid,
            last_valid: params.last_valid,
            genesis_id: params.genesis_id.clone(),
            genesis_hash: params.genesis_hash,
            kind
        };

        let fee = params.fee.saturating_mul(transaction.estimate_size() as u64);

        transaction.fee = fee.max(params.min_fee);

        transaction
    }

    pub fn to_map(&self) -> Map {
        let mut map = Map::new();

        map.insert("type", self.kind.type_name())
            .insert("snd", self.sender.as_bytes().as_slice())
            .insert("fee", self.fee)
            .insert("fv", self.first_valid)
            .insert("lv", self.last_valid)
            .insert("gen", self.genesis_id.as_str())
            .insert("gh", self.genesis_hash.as_slice());

        match &self.kind {
            TransactionKind::Payment { receiver, amount } => {
                map.insert("rcv", receiver.as_bytes().as_slice())
                    .insert("amt", *amount);
            }

            TransactionKind::AssetConfig { asset_id, params } => {
                map.insert("caid", *asset_id)
                    .insert("apar", params.to_map());
            }
        }

        map
    }

    /// Canonical msgpack encoding of the transaction.
    #[inline]
    pub fn encode(&self) -> Vec<u8> {
        self.to_map().to_bytes()
    }

    /// Bytes which are signed by the sender: `"TX" || encode()`.
    pub fn bytes_to_sign(&self) -> Vec<u8> {
        let mut bytes = TRANSACTION_DOMAIN.to_vec();

        bytes.extend(self.encode());

        bytes
    }

    /// Raw transaction id: SHA-512/256 hash of the signed bytes.
    #[inline]
    pub fn raw_id(&self) -> [u8; 32] {
        sha512_256(self.bytes_to_sign())
    }

    /// Transaction id in its standard base32 text representation.
    #[inline]
    pub fn id(&self) -> String {
        BASE32_NOPAD.encode(&self.raw_id())
    }

    /// Estimated size of the signed transaction in bytes.
    #[inline]
    pub fn estimate_size(&self) -> usize {
        self.encode().len() + SIGNATURE_OVERHEAD
    }
}

/// Transaction with an ed25519 signature of its sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: [u8; 64]
}

impl SignedTransaction {
    #[inline]
    pub fn id(&self) -> String {
        self.transaction.id()
    }

    /// Verify that the signature is made by the transaction's sender.
    #[inline]
    pub fn verify(&self) -> bool {
        self.transaction.sender.verify(self.transaction.bytes_to_sign(), &self.signature)
    }

    /// Canonical msgpack encoding accepted by the node's
    /// `POST /v2/transactions` endpoint.
    pub fn encode(&self) -> Vec<u8> {
        let mut map = Map::new();

        map.insert("sig", self.signature.as_slice())
            .insert("txn", self.transaction.to_map());

        map.to_bytes()
    }
}

#[cfg(test)]
fn test_params() -> SuggestedParams {
    use crate::crypto::base64_decode;

    let genesis_hash = base64_decode("SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=").unwrap();

    SuggestedParams {
        fee: 0,
        min_fee: 1000,
        first_valid: 1000,
        last_valid: 2000,
        genesis_id: String::from("testnet-v1.0"),
        genesis_hash: genesis_hash.try_into().unwrap()
    }
}

#[test]
fn test_asset_create() {
    use crate::crypto::SecretKey;

    let secret_key = SecretKey::from_bytes(&[7; 32]);

    let transaction = Transaction::new(
        secret_key.address(),
        &test_params(),
        TransactionKind::AssetConfig {
            asset_id: 0,
            params: AssetParams::masterpass_ticket(
                "ipfs://bafkreih5aznjvttude6c3wbvqeebb6rlx5wkbzyppv7garjiubll2ceym4#arc3"
            )
        }
    );

    assert_eq!(transaction.fee, 1000);
    assert_eq!(transaction.encode().len(), 272);
    assert_eq!(transaction.id(), "U474Y7XPGVM5FBIQTM3ZJRXZSGWGM4JY5FVWHOT6RCHTRCUOXQJA");

    let signed = SignedTransaction {
        signature: secret_key.sign(transaction.bytes_to_sign()),
        transaction
    };

    assert!(signed.verify());
    assert_eq!(signed.encode().len(), 272 + SIGNATURE_OVERHEAD);
}

#[test]
fn test_fungible_create() {
    use crate::crypto::SecretKey;

    let transaction = Transaction::new(
        SecretKey::from_bytes(&[7; 32]).address(),
        &test_params(),
        TransactionKind::AssetConfig {
            asset_id: 0,
            params: AssetParams::fungible("MasterPass Token", "MPT", 1_000_000, 2).unwrap()
        }
    );

    assert_eq!(transaction.id(), "YFEYU3XSOF5PT44ZAHXXA6WEOFHMGENYDI6UUXURE5T3PNB7QS5A");
}

#[test]
fn test_payment() {
    use crate::crypto::SecretKey;

    let transaction = Transaction::new(
        SecretKey::from_bytes(&[7; 32]).address(),
        &test_params(),
        TransactionKind::Payment {
            receiver: SecretKey::from_bytes(&[1; 32]).address(),
            amount: 1_500_000
        }
    );

    assert_eq!(transaction.encode().len(), 168);
    assert_eq!(transaction.id(), "FTQHRERDNW4NLJXW7JBN45BWNFYG5EURSVP4726YQZABTKCR7MWQ");
}

#[test]
fn test_fee() {
    let mut params = test_params();

    params.fee = 10;

    let transaction = Transaction::new(
        Address::ZERO,
        &params,
        TransactionKind::Payment {
            receiver: Address::ZERO,
            amount: 1
        }
    );

    let mut unpriced = transaction.clone();

    unpriced.fee = 0;

    // Per-byte fee is larger than the minimal one here.
    assert!(transaction.fee > params.min_fee);
    assert_eq!(transaction.fee, 10 * unpriced.estimate_size() as u64);
}
