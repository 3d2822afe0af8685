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

use crate::amount::scale_supply;
use crate::crypto::metadata_hash;
use crate::msgpack::Map;

/// Asset name of the MasterPass ticket NFT.
pub const MASTERPASS_ASSET_NAME: &str = "MasterPass Ticket";

/// Unit name of the MasterPass ticket NFT.
pub const MASTERPASS_UNIT_NAME: &str = "MTK";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("asset name is {0} bytes long, at most {max} allowed", max = AssetParams::MAX_ASSET_NAME_LEN)]
    AssetNameTooLong(usize),

    #[error("unit name is {0} bytes long, at most {max} allowed", max = AssetParams::MAX_UNIT_NAME_LEN)]
    UnitNameTooLong(usize),

    #[error("asset url is {0} bytes long, at most {max} allowed", max = AssetParams::MAX_URL_LEN)]
    UrlTooLong(usize),

    #[error("asset can't have {0} decimals, at most {max} allowed", max = AssetParams::MAX_DECIMALS)]
    TooManyDecimals(u32),

    #[error("total supply {supply} with {decimals} decimals doesn't fit into 64 bits")]
    SupplyOverflow {
        supply: u64,
        decimals: u32
    }
}

/// Parameters of a newly created Algorand Standard Asset.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct AssetParams {
    /// Total amount of base units.
    pub total: u64,

    /// Amount of digits after the decimal point for display purposes.
    pub decimals: u32,

    /// Whether accounts holding this asset are frozen by default.
    pub default_frozen: bool,

    pub unit_name: String,
    pub asset_name: String,

    /// URL of the off-chain asset metadata.
    pub url: Option<String>,

    /// 32 bytes commitment to the off-chain asset metadata.
    pub metadata_hash: Option<[u8; 32]>
}

impl AssetParams {
    pub const MAX_ASSET_NAME_LEN: usize = 32;
    pub const MAX_UNIT_NAME_LEN: usize = 8;
    pub const MAX_URL_LEN: usize = 96;
    pub const MAX_DECIMALS: u32 = 19;

    /// Parameters of a single MasterPass ticket: 1 unit, 0 decimals, the
    /// given metadata URL and the SHA-512/256 hash of this URL.
    pub fn masterpass_ticket(url: impl ToString) -> Self {
        let url = url.to_string();

        Self {
            total: 1,
            decimals: 0,
            default_frozen: false,
            unit_name: MASTERPASS_UNIT_NAME.to_string(),
            asset_name: MASTERPASS_ASSET_NAME.to_string(),
            metadata_hash: Some(metadata_hash(&url)),
            url: Some(url),
            ..Self::default()
        }
    }

    /// Parameters of a fungible token with human-readable `supply` which is
    /// scaled by `10^decimals` to get the on-chain total.
    pub fn fungible(
        asset_name: impl ToString,
        unit_name: impl ToString,
        supply: u64,
        decimals: u32
    ) -> Result<Self, Error> {
        if decimals > Self::MAX_DECIMALS {
            return Err(Error::TooManyDecimals(decimals));
        }

        let total = scale_supply(supply, decimals)
            .ok_or(Error::SupplyOverflow { supply, decimals })?;

        Ok(Self {
            total,
            decimals,
            default_frozen: false,
            unit_name: unit_name.to_string(),
            asset_name: asset_name.to_string(),
            ..Self::default()
        })
    }

    /// Verify protocol limits of the asset parameters.
    pub fn validate(&self) -> Result<(), Error> {
        if self.decimals > Self::MAX_DECIMALS {
            return Err(Error::TooManyDecimals(self.decimals));
        }

        if self.asset_name.len() > Self::MAX_ASSET_NAME_LEN {
            return Err(Error::AssetNameTooLong(self.asset_name.len()));
        }

        if self.unit_name.len() > Self::MAX_UNIT_NAME_LEN {
            return Err(Error::UnitNameTooLong(self.unit_name.len()));
        }

        if let Some(url) = &self.url && url.len() > Self::MAX_URL_LEN {
            return Err(Error::UrlTooLong(url.len()));
        }

        Ok(())
    }

    /// Encode parameters as the `apar` field of an asset config transaction.
    pub fn to_map(&self) -> Map {
        let mut map = Map::new();

        map.insert("t", self.total)
            .insert("dc", self.decimals)
            .insert("df", self.default_frozen)
            .insert("un", self.unit_name.as_str())
            .insert("an", self.asset_name.as_str())
            .insert_opt("au", self.url.as_deref())
            .insert_opt("am", self.metadata_hash.as_ref().map(|hash| hash.as_slice()));

        map
    }
}

#[test]
fn test_masterpass_ticket() {
    let url = "ipfs://bafkreih5aznjvttude6c3wbvqeebb6rlx5wkbzyppv7garjiubll2ceym4#arc3";

    let params = AssetParams::masterpass_ticket(url);

    assert_eq!(params.total, 1);
    assert_eq!(params.decimals, 0);
    assert!(!params.default_frozen);
    assert_eq!(params.asset_name, MASTERPASS_ASSET_NAME);
    assert_eq!(params.unit_name, MASTERPASS_UNIT_NAME);
    assert_eq!(params.url.as_deref(), Some(url));
    assert_eq!(params.metadata_hash, Some(metadata_hash(url)));
    assert_eq!(params.validate(), Ok(()));

    // Zero decimals and false flags are not encoded.
    let map = params.to_map();

    assert!(map.get("dc").is_none());
    assert!(map.get("df").is_none());
    assert_eq!(map.len(), 5);
}

#[test]
fn test_fungible() {
    let params = AssetParams::fungible("MasterPass Token", "MPT", 1_000_000, 2).unwrap();

    assert_eq!(params.total, 100_000_000);
    assert_eq!(params.decimals, 2);
    assert!(params.url.is_none());
    assert!(params.metadata_hash.is_none());

    assert_eq!(
        AssetParams::fungible("Big", "BIG", u64::MAX, 1),
        Err(Error::SupplyOverflow { supply: u64::MAX, decimals: 1 })
    );

    assert_eq!(
        AssetParams::fungible("Precise", "PRC", 1, 20),
        Err(Error::TooManyDecimals(20))
    );
}

#[test]
fn test_validate() {
    let params = AssetParams::fungible("a".repeat(33), "MPT", 1, 0).unwrap();

    assert_eq!(params.validate(), Err(Error::AssetNameTooLong(33)));

    let params = AssetParams::fungible("Token", "TOOLONGUNIT", 1, 0).unwrap();

    assert_eq!(params.validate(), Err(Error::UnitNameTooLong(11)));

    // Zero supply is left for the network to judge.
    let params = AssetParams::fungible("Token", "TKN", 0, 2).unwrap();

    assert_eq!(params.total, 0);
    assert_eq!(params.validate(), Ok(()));

    let params = AssetParams::masterpass_ticket(format!("https://{}", "a".repeat(100)));

    assert_eq!(params.validate(), Err(Error::UrlTooLong(108)));
}
