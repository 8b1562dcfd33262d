// This file is part of password.
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

use crate::error::{PasswordError, Result};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

const WORDLIST_DATA: &str = include_str!("../assets/wordlist.txt");

#[cfg(test)]
const EXPECTED_SHA256: &str = "16d9af4b270901eb40e5ab8c0d6cf6707d98984cddfe389811425aace5d85d25";

const BUILTIN_SIZE: usize = 1024;

static WORDLIST: OnceLock<Vec<&'static str>> = OnceLock::new();

pub fn get_wordlist() -> &'static [&'static str] {
    WORDLIST.get_or_init(|| {
        let words: Vec<&'static str> = parse_words(WORDLIST_DATA).collect();

        assert_eq!(
            words.len(),
            BUILTIN_SIZE,
            "Wordlist must contain exactly {} words",
            BUILTIN_SIZE
        );
        words
    })
}

pub const fn wordlist_size() -> usize {
    BUILTIN_SIZE
}

/// Reads a dictionary file: one word per line, with an optional leading
/// dice index column (`11111\tabacus`) as used by diceware lists.
pub fn load_dictionary(path: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(path).map_err(|source| PasswordError::Dictionary {
        path: path.to_path_buf(),
        source,
    })?;

    let words: Vec<String> = parse_words(&data).map(str::to_string).collect();
    if words.is_empty() {
        return Err(PasswordError::EmptyDictionary(path.to_path_buf()));
    }

    debug!(path = %path.display(), words = words.len(), "dictionary loaded");
    Ok(words)
}

fn parse_words(data: &str) -> impl Iterator<Item = &str> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(['\t', ' ']) {
            Some((index, word)) if index.chars().all(|c| c.is_ascii_digit()) => word.trim(),
            _ => line,
        })
        .filter(|word| !word.is_empty())
}
