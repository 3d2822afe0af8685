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
use ed25519_dalek::{Signature, VerifyingKey};

use crate::crypto::sha512_256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid address length: {0} characters, {len} expected", len = Address::LENGTH)]
    InvalidLength(usize),

    #[error("invalid base32 address encoding")]
    Base32,

    #[error("address checksum mismatch")]
    Checksum
}

/// Algorand account address: the account's ed25519 public key.
///
/// Text representation is the base32 encoding (no padding) of the public key
/// followed by the last 4 bytes of its SHA-512/256 hash.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// Length of the address text representation.
    pub const LENGTH: usize = 58;

    /// Address of the all-zeros public key.
    pub const ZERO: Self = Self([0; 32]);

    #[inline(always)]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Last 4 bytes of the public key's SHA-512/256 hash.
    pub fn checksum(&self) -> [u8; 4] {
        let hash = sha512_256(self.0);

        let mut checksum = [0; 4];

        checksum.copy_from_slice(&hash[28..]);

        checksum
    }

    pub fn encode(&self) -> String {
        let mut bytes = [0; 36];

        bytes[..32].copy_from_slice(&self.0);
        bytes[32..].copy_from_slice(&self.checksum());

        BASE32_NOPAD.encode(&bytes)
    }

    pub fn decode(address: impl AsRef<str>) -> Result<Self, Error> {
        let address = address.as_ref().trim();

        if address.len() != Self::LENGTH {
            return Err(Error::InvalidLength(address.len()));
        }

        let bytes = BASE32_NOPAD.decode(address.as_bytes())
            .map_err(|_| Error::Base32)?;

        if bytes.len() != 36 {
            return Err(Error::Base32);
        }

        let mut public_key = [0; 32];

        public_key.copy_from_slice(&bytes[..32]);

        let address = Self(public_key);

        if address.checksum() != bytes[32..] {
            return Err(Error::Checksum);
        }

        Ok(address)
    }

    /// Verify ed25519 signature of the given message made by the owner of
    /// the current address.
    pub fn verify(&self, message: impl AsRef<[u8]>, signature: &[u8; 64]) -> bool {
        let Ok(public_key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };

        public_key.verify_strict(message.as_ref(), &Signature::from_bytes(signature))
            .is_ok()
    }
}

impl From<[u8; 32]> for Address {
    #[inline(always)]
    fn from(value: [u8; 32]) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for Address {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl std::fmt::Display for Address {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

impl std::fmt::Debug for Address {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.encode())
    }
}

#[test]
fn test_encode() {
    assert_eq!(
        Address::ZERO.to_string(),
        "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ"
    );

    let address = "RKEOHXLUBHYZL7KS3MWTZOS5OLFGOCN7DWKBEG7TOSEADNAPN5OOTUNSLE";

    assert_eq!(Address::decode(address).map(|address| address.to_string()).as_deref(), Ok(address));
}

#[test]
fn test_decode_errors() {
    assert_eq!(Address::decode(""), Err(Error::InvalidLength(0)));
    assert_eq!(Address::decode("ABC"), Err(Error::InvalidLength(3)));

    // Lowercase letters are not a part of the base32 alphabet.
    assert_eq!(
        Address::decode("rkeohxlubhyzl7ks3mwtzos5olfgocn7dwkbeg7toseadnapn5ootunsle"),
        Err(Error::Base32)
    );

    // Last character changed.
    assert_eq!(
        Address::decode("RKEOHXLUBHYZL7KS3MWTZOS5OLFGOCN7DWKBEG7TOSEADNAPN5OOTUNSLA"),
        Err(Error::Checksum)
    );
}
