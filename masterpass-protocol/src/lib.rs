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

/// `masterpass-protocol` crate version.
pub const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod crypto;
pub mod address;
pub mod msgpack;
pub mod amount;
pub mod asset;
pub mod transaction;
pub mod signer;

pub mod prelude {
    pub use super::crypto::{SecretKey, sha512_256};
    pub use super::address::Address;
    pub use super::asset::AssetParams;
    pub use super::transaction::{
        SuggestedParams,
        Transaction,
        TransactionKind,
        SignedTransaction
    };
    pub use super::signer::TransactionSigner;
}
