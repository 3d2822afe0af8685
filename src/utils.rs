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

use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;

/// Get new entropy-seeded cryptographically secure random numbers generator.
#[inline]
pub fn get_rng() -> ChaCha20Rng {
    ChaCha20Rng::from_entropy()
}

/// Cast bytes slice into a unicode emoji.
pub fn bytes_to_emoji(bytes: impl AsRef<[u8]>) -> &'static str {
    const EMOJIS: &[&str] = &[
        // Tickets & events
        "🎟️", "🎫", "🎪", "🎭", "🎨", "🎬", "🎤", "🎧", "🎼", "🎹",
        "🥁", "🎷", "🎺", "🎸", "🎻", "🎲", "🎯", "🎳", "🎮", "🧩",

        // Network & places
        "📡", "📶", "🛰️", "🌍", "🌎", "🌏", "🗺️", "🏔️", "🏝️", "🏜️",
        "🌋", "🏕️", "🏠", "🏙️", "🌉", "🌆", "🌅", "🌄", "🌌", "🌈",

        // Plants & animals
        "🌸", "🌼", "🌷", "🌹", "🌺", "🌻", "🌵", "🌲", "🌳", "🌴",
        "🍀", "🍁", "🍄", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐸",
        "🦉", "🦄", "🐝", "🦋", "🐢", "🐙", "🐬", "🐳", "🦒", "🦓"
    ];

    let hash = crc32fast::hash(bytes.as_ref());

    EMOJIS[(hash % EMOJIS.len() as u32) as usize]
}

/// Cast bytes slice into a short name.
pub fn bytes_to_shortname(bytes: impl AsRef<[u8]>) -> String {
    const CHARS: &[char] = &[
        'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J',
        'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T',
        'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3',
        '4', '5', '6', '7', '8', '9'
    ];

    let hash = crc32fast::hash(bytes.as_ref())
        .to_le_bytes();

    let n = CHARS.len();

    let mut name = String::with_capacity(4);

    name.push(CHARS[hash[0] as usize % n]);
    name.push(CHARS[hash[1] as usize % n]);
    name.push(CHARS[hash[2] as usize % n]);
    name.push(CHARS[hash[3] as usize % n]);

    name
}

/// Shorten long identifier (address, transaction id) for narrow widgets:
/// `ABCDEF...UVWXYZ`.
pub fn shorten(text: impl AsRef<str>, side: usize) -> String {
    let text = text.as_ref();

    if text.len() <= side * 2 + 3 || !text.is_ascii() {
        return text.to_string();
    }

    format!("{}...{}", &text[..side], &text[text.len() - side..])
}

/// Format a plain text table with left-aligned columns.
pub fn make_table<const N: usize>(
    header: [&str; N],
    rows: impl IntoIterator<Item = [String; N]>
) -> String {
    let rows = rows.into_iter().collect::<Vec<_>>();

    let mut widths = header.map(|column| column.chars().count());

    for row in &rows {
        for (width, column) in widths.iter_mut().zip(row) {
            *width = (*width).max(column.chars().count());
        }
    }

    let format_row = |row: [&str; N]| -> String {
        row.iter()
            .zip(widths.iter())
            .map(|(column, width)| format!("{column:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut table = format_row(header);

    table.push('\n');
    table.push_str(&widths.iter().map(|width| "-".repeat(*width)).collect::<Vec<_>>().join("-+-"));

    for row in &rows {
        table.push('\n');
        table.push_str(&format_row(row.each_ref().map(String::as_str)));
    }

    table
}

#[test]
fn test_shorten() {
    assert_eq!(shorten("ABCDEFGHIJKLMNOPQRSTUVWXYZ", 4), "ABCD...WXYZ");
    assert_eq!(shorten("ABCDEFGHIJK", 4), "ABCDEFGHIJK");
}

#[test]
fn test_make_table() {
    let table = make_table(["#", "Title"], [
        [String::from("1"), String::from("main")],
        [String::from("22"), String::from("backup")]
    ]);

    assert_eq!(table, "#  | Title\n---+-------\n1  | main\n22 | backup");
}

#[test]
fn test_shortname() {
    assert_eq!(bytes_to_shortname(b"hello").len(), 4);
    assert_eq!(bytes_to_shortname(b"hello"), bytes_to_shortname(b"hello"));
}
