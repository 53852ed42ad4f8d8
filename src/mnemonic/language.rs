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
//! # `Language` for mnemonic codes
//!

static ENGLISH: &str = include_str!("english.txt");

lazy_static! {
    /// The 2048 words of the English list, in index order
    pub static ref ENGLISH_WORDLIST: Vec<&'static str> = gen_wordlist(ENGLISH);
}

/// Number of words in a list, one per 11 bit value
pub const WORDLIST_SIZE: usize = 2048;

/// Word list language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// English, same list as BIP-39
    #[default]
    English,
}

impl Language {
    /// Full list of words
    pub fn wordlist(&self) -> &'static [&'static str] {
        match *self {
            Language::English => ENGLISH_WORDLIST.as_slice(),
        }
    }

    /// Word at the index
    pub fn word(&self, index: u16) -> Option<&'static str> {
        self.wordlist().get(index as usize).copied()
    }

    /// Index of a word. The list is sorted, so it's a binary search.
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.wordlist()
            .binary_search_by(|w| (*w).cmp(word))
            .ok()
            .map(|i| i as u16)
    }
}

fn gen_wordlist(lang_words: &'static str) -> Vec<&'static str> {
    lang_words.split_whitespace().collect()
}
