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

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use ed25519_dalek::{Signer, SigningKey};
use rand_chacha::rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha512_256};

use crate::address::Address;

/// Calculate SHA-512/256 digest of the given bytes. This is the hash function
/// used by Algorand for addresses checksums, transaction ids and (by
/// convention) asset metadata hashes.
pub fn sha512_256(data: impl AsRef<[u8]>) -> [u8; 32] {
    let hash = Sha512_256::digest(data.as_ref());

    let mut digest = [0; 32];

    digest.copy_from_slice(&hash);

    digest
}

/// Calculate the 32 bytes metadata hash of an asset from its metadata URL.
#[inline]
pub fn metadata_hash(url: impl AsRef<str>) -> [u8; 32] {
    sha512_256(url.as_ref().as_bytes())
}

#[inline]
pub fn base64_encode(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

#[inline]
pub fn base64_decode(text: impl AsRef<[u8]>) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(text)
}

/// Ed25519 secret key (32 bytes seed) of an Algorand account.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(SigningKey);

impl SecretKey {
    /// Generate new random secret key.
    pub fn random(rng: &mut (impl RngCore + CryptoRng)) -> Self {
        let mut seed = [0; 32];

        rng.fill_bytes(&mut seed);

        Self(SigningKey::from_bytes(&seed))
    }

    #[inline]
    pub fn from_bytes(seed: &[u8; 32]) -> Self {
        Self(SigningKey::from_bytes(seed))
    }

    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Decode secret key from a base64 string. Return `None` if the string
    /// is not a valid base64 or doesn't contain exactly 32 bytes.
    pub fn from_base64(text: impl AsRef<[u8]>) -> Option<Self> {
        let bytes = base64_decode(text).ok()?;
        let seed = <[u8; 32]>::try_from(bytes.as_slice()).ok()?;

        Some(Self::from_bytes(&seed))
    }

    #[inline]
    pub fn to_base64(&self) -> String {
        base64_encode(self.to_bytes())
    }

    /// Ed25519 public key of the current secret key.
    #[inline]
    pub fn public_key(&self) -> [u8; 32] {
        self.0.verifying_key().to_bytes()
    }

    /// Algorand address of the current secret key.
    #[inline]
    pub fn address(&self) -> Address {
        Address::from(self.public_key())
    }

    /// Sign arbitrary message.
    #[inline]
    pub fn sign(&self, message: impl AsRef<[u8]>) -> [u8; 64] {
        self.0.sign(message.as_ref()).to_bytes()
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SecretKey")
            .field(&self.address())
            .finish()
    }
}

#[test]
fn test_sha512_256() {
    assert_eq!(
        sha512_256(b"abc"),
        [
            0x53, 0x04, 0x8e, 0x26, 0x81, 0x94, 0x1e, 0xf9,
            0x9b, 0x2e, 0x29, 0xb7, 0x6b, 0x4c, 0x7d, 0xab,
            0xe4, 0xc2, 0xd0, 0xc6, 0x34, 0xfc, 0x6d, 0x46,
            0xe0, 0xe2, 0xf1, 0x31, 0x07, 0xe7, 0xaf, 0x23
        ]
    );
}

#[test]
fn test_secret_key() {
    use rand_chacha::ChaCha20Rng;
    use rand_chacha::rand_core::SeedableRng;

    let secret_key = SecretKey::from_bytes(&[7; 32]);

    assert_eq!(
        secret_key.address().to_string(),
        "5JFGYY7CTRJAVPXVKB5RGLWF7GKUO5VOX27HXESCD3VGSFCG2IWAKDM5YU"
    );

    assert_eq!(SecretKey::from_base64(secret_key.to_base64()), Some(secret_key.clone()));
    assert_eq!(SecretKey::from_base64("aGVsbG8="), None);
    assert_eq!(SecretKey::from_base64("not base64!"), None);

    let signature = secret_key.sign(b"hello");

    assert!(secret_key.address().verify(b"hello", &signature));
    assert!(!secret_key.address().verify(b"world", &signature));

    let mut rng = ChaCha20Rng::seed_from_u64(123);

    assert_ne!(SecretKey::random(&mut rng), SecretKey::random(&mut rng));
}
