/*
Copyright 2019 ETCDEV GmbH
Copyright 2020 EmeraldPay, Inc

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/
//! # Module to work with mnemonic codes
//!
//! A 32 byte key is written as 25 words: 24 words carry the key as 11 bit values packed
//! little-endian (the first byte goes to the lowest bits), the 25th word is the checksum,
//! the first 11 bits of `SHA-512/256(key)`. This is not BIP-39, even though it uses the
//! same English word list.

mod error;
mod language;

pub use self::{
    error::Error,
    language::{Language, ENGLISH_WORDLIST, WORDLIST_SIZE},
};
use crate::{crypto::sha512_256, util::to_arr};
use itertools::Itertools;

/// Key size in bytes
pub const KEY_BYTES: usize = 32;
/// Size of mnemonic in words, including the checksum word
pub const MNEMONIC_WORDS: usize = 25;
/// word index size in bits
const INDEX_BIT_SIZE: u32 = 11;
const INDEX_MASK: u32 = (1 << INDEX_BIT_SIZE) - 1;

/// Mnemonic phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mnemonic {
    language: Language,
    words: Vec<&'static str>,
}

impl Mnemonic {
    /// Create mnemonic phrase for a key
    ///
    /// # Arguments:
    ///
    /// * lang - language for words selection
    /// * key - 32 byte key
    ///
    pub fn from_key(lang: Language, key: &[u8]) -> Result<Mnemonic, Error> {
        if key.len() != KEY_BYTES {
            return Err(Error::InvalidKeyLength(key.len()));
        }
        let mut words: Vec<&'static str> = to_indexes(key)
            .into_iter()
            .map(|i| lang.wordlist()[i as usize])
            .collect();
        words.push(lang.wordlist()[checksum(key) as usize]);

        Ok(Mnemonic {
            language: lang,
            words,
        })
    }

    /// Parse and validate a mnemonic sentence
    ///
    /// # Arguments
    ///
    /// * `lang` - A mnemonic language
    /// * `src` - A mnemonic sentence with `MNEMONIC_WORDS` words
    ///
    pub fn try_from(lang: Language, src: &str) -> Result<Self, Error> {
        let parts: Vec<&str> = src.split_whitespace().collect();
        if parts.len() != MNEMONIC_WORDS {
            return Err(Error::InvalidWordCount(parts.len()));
        }
        let mut words = Vec::with_capacity(MNEMONIC_WORDS);
        for w in parts {
            let index = lang
                .index_of(w)
                .ok_or_else(|| Error::UnknownWord(w.to_string()))?;
            words.push(lang.wordlist()[index as usize]);
        }
        let mnemonic = Mnemonic {
            language: lang,
            words,
        };
        // validates checksum and padding
        mnemonic.to_key()?;
        Ok(mnemonic)
    }

    /// Convert mnemonic to single string
    pub fn sentence(&self) -> String {
        self.words.iter().join(" ")
    }

    /// Words of the phrase
    pub fn words(&self) -> &[&'static str] {
        &self.words
    }

    /// Decode the key
    pub fn to_key(&self) -> Result<[u8; KEY_BYTES], Error> {
        let mut indexes = Vec::with_capacity(MNEMONIC_WORDS);
        for w in &self.words {
            let index = self
                .language
                .index_of(w)
                .ok_or_else(|| Error::UnknownWord(w.to_string()))?;
            indexes.push(index);
        }
        let (checksum_word, key_words) = indexes.split_last().ok_or(Error::InvalidWordCount(0))?;

        let bytes = from_indexes(key_words);
        // 24 * 11 bits make 33 bytes, the last one must be empty
        if bytes.len() != KEY_BYTES + 1 {
            return Err(Error::InvalidWordCount(indexes.len()));
        }
        if bytes[KEY_BYTES] != 0 {
            return Err(Error::NonZeroPadding);
        }
        let key: [u8; KEY_BYTES] = to_arr(&bytes[..KEY_BYTES]);
        if checksum(&key) != *checksum_word {
            warn!("Mnemonic checksum mismatch");
            return Err(Error::InvalidChecksum);
        }
        Ok(key)
    }
}

/// Encode a 32 byte key as a 25 word phrase
pub fn from_key(key: &[u8; KEY_BYTES]) -> String {
    let words: Vec<&str> = to_indexes(key)
        .into_iter()
        .chain(std::iter::once(checksum(key)))
        .map(|i| ENGLISH_WORDLIST[i as usize])
        .collect();
    words.join(" ")
}

/// Decode a 25 word phrase into the 32 byte key
pub fn to_key(phrase: &str) -> Result<[u8; KEY_BYTES], Error> {
    Mnemonic::try_from(Language::English, phrase)?.to_key()
}

/// Check if the phrase decodes into a key
pub fn is_valid(phrase: &str) -> bool {
    to_key(phrase).is_ok()
}

/// Checksum word index, the first 11 bit value of the first two hash bytes
fn checksum(key: &[u8]) -> u16 {
    let hash = sha512_256(key);
    to_indexes(&hash[..2])[0]
}

/// Split bytes into 11 bit values, little-endian. A partial group at the end is emitted
/// as well, so 32 bytes give 24 values.
fn to_indexes(data: &[u8]) -> Vec<u16> {
    let mut out = Vec::with_capacity((data.len() * 8 + 10) / 11);
    let mut buf: u32 = 0;
    let mut bits = 0;
    for b in data {
        buf |= (*b as u32) << bits;
        bits += 8;
        if bits >= INDEX_BIT_SIZE {
            out.push((buf & INDEX_MASK) as u16);
            buf >>= INDEX_BIT_SIZE;
            bits -= INDEX_BIT_SIZE;
        }
    }
    if bits > 0 {
        out.push((buf & INDEX_MASK) as u16);
    }
    out
}

/// Join 11 bit values back into bytes, inverse of `to_indexes`
fn from_indexes(indexes: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity((indexes.len() * 11 + 7) / 8);
    let mut buf: u32 = 0;
    let mut bits = 0;
    for i in indexes {
        buf |= (*i as u32 & INDEX_MASK) << bits;
        bits += INDEX_BIT_SIZE;
        while bits >= 8 {
            out.push((buf & 0xff) as u8);
            buf >>= 8;
            bits -= 8;
        }
    }
    if bits > 0 {
        out.push((buf & 0xff) as u8);
    }
    out
}
