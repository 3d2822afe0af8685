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

use std::path::Path;

use anyhow::Context;
use time::UtcDateTime;
use serde_json::{json, Value as Json};

use masterpass_protocol::prelude::*;

use crate::consts::ACCOUNTS_PATH;
use crate::utils::{bytes_to_emoji, bytes_to_shortname};

/// Read accounts list from the data folder.
#[inline]
pub fn read() -> anyhow::Result<Vec<Account>> {
    read_from(ACCOUNTS_PATH.as_path())
}

/// Write accounts list to the data folder.
#[inline]
pub fn write(accounts: impl IntoIterator<Item = Account>) -> anyhow::Result<()> {
    write_to(ACCOUNTS_PATH.as_path(), accounts)
}

/// Read accounts list from the given file. Missing file means no accounts.
pub fn read_from(path: impl AsRef<Path>) -> anyhow::Result<Vec<Account>> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(vec![]);
    }

    let accounts = std::fs::read(path)?;
    let accounts = serde_json::from_slice::<Vec<Json>>(&accounts)?;

    let mut accounts = accounts.into_iter()
        .map(|account| {
            Account::from_json(&account)
                .context("failed to read accounts list")
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut unique = Vec::with_capacity(accounts.len());

    for account in accounts {
        insert(&mut unique, account);
    }

    Ok(unique)
}

/// Append account to the list unless an account with the same secret key is
/// already there. Return index of the stored account and whether it is new.
pub fn insert(accounts: &mut Vec<Account>, account: Account) -> (usize, bool) {
    let existing = accounts.iter()
        .position(|stored| stored.secret_key() == account.secret_key());

    match existing {
        Some(index) => (index, false),
        None => {
            accounts.push(account);

            (accounts.len() - 1, true)
        }
    }
}

/// Write accounts list to the given file.
pub fn write_to(
    path: impl AsRef<Path>,
    accounts: impl IntoIterator<Item = Account>
) -> anyhow::Result<()> {
    let accounts = accounts.into_iter()
        .map(|account| account.to_json())
        .collect::<Vec<_>>();

    std::fs::write(
        path.as_ref(),
        serde_json::to_vec_pretty(&json!(accounts))?
    )?;

    Ok(())
}

/// Find account by its title or address.
pub fn find<'a>(
    accounts: &'a [Account],
    query: impl AsRef<str>
) -> Option<&'a Account> {
    let query = query.as_ref().trim();

    accounts.iter().find(|account| {
        account.title() == query || account.address().to_string() == query
    })
}

/// Wallet account stored locally. It has a user-defined title for easier
/// navigation and an ed25519 secret key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    title: String,
    secret_key: SecretKey,
    created_at: UtcDateTime
}

impl Account {
    pub fn new(
        title: impl ToString,
        secret_key: impl Into<SecretKey>
    ) -> Self {
        Self {
            title: title.to_string(),
            secret_key: secret_key.into(),
            created_at: UtcDateTime::now()
        }
    }

    #[inline(always)]
    pub const fn title(&self) -> &String {
        &self.title
    }

    #[inline(always)]
    pub const fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    #[inline(always)]
    pub const fn created_at(&self) -> &UtcDateTime {
        &self.created_at
    }

    #[inline]
    pub fn address(&self) -> Address {
        self.secret_key.address()
    }

    /// Get emoji representing the current account.
    #[inline]
    pub fn emoji(&self) -> &'static str {
        bytes_to_emoji(self.secret_key.public_key())
    }

    /// Get shortname representation of the current account.
    #[inline]
    pub fn shortname(&self) -> String {
        bytes_to_shortname(self.secret_key.public_key())
    }

    pub fn to_json(&self) -> Json {
        json!({
            "title": self.title.as_str(),
            "secret_key": self.secret_key.to_base64(),
            "created_at": self.created_at.unix_timestamp()
        })
    }

    pub fn from_json(json: &Json) -> anyhow::Result<Self> {
        Ok(Self {
            title: json.get("title")
                .and_then(Json::as_str)
                .map(String::from)
                .ok_or_else(|| anyhow::anyhow!("account field 'title' is missing"))?,

            secret_key: json.get("secret_key")
                .and_then(Json::as_str)
                .and_then(SecretKey::from_base64)
                .ok_or_else(|| anyhow::anyhow!("account field 'secret_key' is invalid"))?,

            created_at: json.get("created_at")
                .and_then(Json::as_i64)
                .map(UtcDateTime::from_unix_timestamp)
                .ok_or_else(|| anyhow::anyhow!("account field 'created_at' is missing"))??
        })
    }
}

#[test]
fn test_json() -> anyhow::Result<()> {
    let account = Account::new("main", SecretKey::from_bytes(&[7; 32]));

    let restored = Account::from_json(&account.to_json())?;

    assert_eq!(restored.title(), "main");
    assert_eq!(restored.secret_key(), account.secret_key());
    assert_eq!(restored.created_at().unix_timestamp(), account.created_at().unix_timestamp());

    assert!(Account::from_json(&json!({ "title": "broken" })).is_err());

    Ok(())
}

#[test]
fn test_read_write() -> anyhow::Result<()> {
    let folder = tempfile::tempdir()?;
    let path = folder.path().join("accounts.json");

    assert!(read_from(&path)?.is_empty());

    let main = Account::new("main", SecretKey::from_bytes(&[7; 32]));
    let backup = Account::new("backup", SecretKey::from_bytes(&[1; 32]));

    let renamed = Account::new("renamed", main.secret_key().clone());

    write_to(&path, [main.clone(), backup.clone(), renamed])?;

    let accounts = read_from(&path)?;

    // Duplicated keys are removed wherever they are, the first title wins.
    assert_eq!(accounts.len(), 2);
    assert!(find(&accounts, "renamed").is_none());

    assert_eq!(find(&accounts, "backup").map(Account::address), Some(backup.address()));
    assert_eq!(find(&accounts, main.address().to_string()).map(Account::title), Some(main.title()));
    assert!(find(&accounts, "unknown").is_none());

    Ok(())
}

#[test]
fn test_insert() {
    let main = Account::new("main", SecretKey::from_bytes(&[7; 32]));
    let backup = Account::new("backup", SecretKey::from_bytes(&[1; 32]));

    let mut accounts = vec![];

    assert_eq!(insert(&mut accounts, main.clone()), (0, true));
    assert_eq!(insert(&mut accounts, backup.clone()), (1, true));

    // Importing the first key again keeps the stored account.
    let imported = Account::new("imported", main.secret_key().clone());

    assert_eq!(insert(&mut accounts, imported), (0, false));
    assert_eq!(accounts, [main, backup]);
}
