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

//! Canonical MessagePack encoding as required by the Algorand protocol.
//!
//! Only the subset used by transactions is supported: maps with string keys,
//! unsigned integers, booleans, strings and byte arrays. Canonical form means:
//!
//! 1. Map keys are sorted lexicographically.
//! 2. Zero, empty and `false` values are omitted.
//! 3. Integers, strings and binaries use the smallest possible header.

use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Uint(u64),
    Bool(bool),
    Str(String),
    Bin(Vec<u8>),
    Map(Map)
}

impl Value {
    /// Check if the value is omitted from the canonical encoding.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Uint(value) => *value == 0,
            Self::Bool(value) => !value,
            Self::Str(value) => value.is_empty(),
            Self::Bin(value) => value.is_empty(),
            Self::Map(value) => value.is_empty()
        }
    }

    pub fn encode(&self, out_buf: &mut impl Write) -> std::io::Result<()> {
        match self {
            Self::Uint(value) => write_uint(out_buf, *value),
            Self::Bool(value) => write_bool(out_buf, *value),
            Self::Str(value) => write_str(out_buf, value),
            Self::Bin(value) => write_bin(out_buf, value),
            Self::Map(value) => value.encode(out_buf)
        }
    }
}

impl From<u64> for Value {
    #[inline(always)]
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<u32> for Value {
    #[inline(always)]
    fn from(value: u32) -> Self {
        Self::Uint(value as u64)
    }
}

impl From<bool> for Value {
    #[inline(always)]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    #[inline(always)]
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    #[inline(always)]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&[u8]> for Value {
    #[inline(always)]
    fn from(value: &[u8]) -> Self {
        Self::Bin(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    #[inline(always)]
    fn from(value: Vec<u8>) -> Self {
        Self::Bin(value)
    }
}

impl From<Map> for Value {
    #[inline(always)]
    fn from(value: Map) -> Self {
        Self::Map(value)
    }
}

/// Map with sorted keys which drops empty values on insertion.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Map(BTreeMap<&'static str, Value>);

impl Map {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert value to the map. Empty values are not stored.
    pub fn insert(&mut self, key: &'static str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();

        if value.is_empty() {
            self.0.remove(key);
        } else {
            self.0.insert(key, value);
        }

        self
    }

    /// Insert value if it's available.
    pub fn insert_opt(&mut self, key: &'static str, value: Option<impl Into<Value>>) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }

        self
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn encode(&self, out_buf: &mut impl Write) -> std::io::Result<()> {
        write_map_len(out_buf, self.0.len())?;

        for (key, value) in &self.0 {
            write_str(out_buf, key)?;

            value.encode(out_buf)?;
        }

        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        // Writing to a vector can't fail.
        let _ = self.encode(&mut bytes);

        bytes
    }
}

fn too_long(len: usize) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("value is too long for msgpack encoding: {len} bytes")
    )
}

pub fn write_uint(out_buf: &mut impl Write, value: u64) -> std::io::Result<()> {
    if value < 0x80 {
        out_buf.write_all(&[value as u8])
    }

    else if value <= u8::MAX as u64 {
        out_buf.write_all(&[0xcc, value as u8])
    }

    else if value <= u16::MAX as u64 {
        out_buf.write_all(&[0xcd])?;
        out_buf.write_all(&(value as u16).to_be_bytes())
    }

    else if value <= u32::MAX as u64 {
        out_buf.write_all(&[0xce])?;
        out_buf.write_all(&(value as u32).to_be_bytes())
    }

    else {
        out_buf.write_all(&[0xcf])?;
        out_buf.write_all(&value.to_be_bytes())
    }
}

#[inline]
pub fn write_bool(out_buf: &mut impl Write, value: bool) -> std::io::Result<()> {
    out_buf.write_all(&[if value { 0xc3 } else { 0xc2 }])
}

pub fn write_str(out_buf: &mut impl Write, value: &str) -> std::io::Result<()> {
    let len = value.len();

    if len < 32 {
        out_buf.write_all(&[0xa0 | len as u8])?;
    }

    else if len <= u8::MAX as usize {
        out_buf.write_all(&[0xd9, len as u8])?;
    }

    else if len <= u16::MAX as usize {
        out_buf.write_all(&[0xda])?;
        out_buf.write_all(&(len as u16).to_be_bytes())?;
    }

    else if len <= u32::MAX as usize {
        out_buf.write_all(&[0xdb])?;
        out_buf.write_all(&(len as u32).to_be_bytes())?;
    }

    else {
        return Err(too_long(len));
    }

    out_buf.write_all(value.as_bytes())
}

pub fn write_bin(out_buf: &mut impl Write, value: &[u8]) -> std::io::Result<()> {
    let len = value.len();

    if len <= u8::MAX as usize {
        out_buf.write_all(&[0xc4, len as u8])?;
    }

    else if len <= u16::MAX as usize {
        out_buf.write_all(&[0xc5])?;
        out_buf.write_all(&(len as u16).to_be_bytes())?;
    }

    else if len <= u32::MAX as usize {
        out_buf.write_all(&[0xc6])?;
        out_buf.write_all(&(len as u32).to_be_bytes())?;
    }

    else {
        return Err(too_long(len));
    }

    out_buf.write_all(value)
}

pub fn write_map_len(out_buf: &mut impl Write, len: usize) -> std::io::Result<()> {
    if len < 16 {
        out_buf.write_all(&[0x80 | len as u8])
    }

    else if len <= u16::MAX as usize {
        out_buf.write_all(&[0xde])?;
        out_buf.write_all(&(len as u16).to_be_bytes())
    }

    else if len <= u32::MAX as usize {
        out_buf.write_all(&[0xdf])?;
        out_buf.write_all(&(len as u32).to_be_bytes())
    }

    else {
        Err(too_long(len))
    }
}

#[test]
fn test_uint() {
    fn encode(value: u64) -> Vec<u8> {
        let mut bytes = Vec::new();

        write_uint(&mut bytes, value).unwrap();

        bytes
    }

    assert_eq!(encode(0), [0x00]);
    assert_eq!(encode(127), [0x7f]);
    assert_eq!(encode(128), [0xcc, 0x80]);
    assert_eq!(encode(1000), [0xcd, 0x03, 0xe8]);
    assert_eq!(encode(100_000_000), [0xce, 0x05, 0xf5, 0xe1, 0x00]);
    assert_eq!(encode(u64::MAX), [0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
}

#[test]
fn test_map() {
    let mut map = Map::new();

    map.insert("type", "pay")
        .insert("amt", 5_u64)
        .insert("close", Vec::new())
        .insert("df", false)
        .insert("fee", 0_u64)
        .insert_opt("note", None::<&str>);

    assert_eq!(map.len(), 2);

    assert_eq!(map.to_bytes(), [
        0x82,
        0xa3, b'a', b'm', b't', 0x05,
        0xa4, b't', b'y', b'p', b'e', 0xa3, b'p', b'a', b'y'
    ]);

    // Overwriting with an empty value removes the key.
    map.insert("amt", 0_u64);

    assert!(map.get("amt").is_none());
}

#[test]
fn test_str_and_bin() {
    let mut bytes = Vec::new();

    write_str(&mut bytes, &"a".repeat(40)).unwrap();

    assert_eq!(&bytes[..2], [0xd9, 40]);
    assert_eq!(bytes.len(), 42);

    bytes.clear();

    write_bin(&mut bytes, &[1, 2, 3]).unwrap();

    assert_eq!(bytes, [0xc4, 3, 1, 2, 3]);
}
