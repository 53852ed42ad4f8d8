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
//! # Mnemonic phrase errors

use std::{error, fmt};

/// `Mnemonic` encoding and decoding errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Phrase doesn't have exactly 25 words
    InvalidWordCount(usize),

    /// Word is not in the list
    UnknownWord(String),

    /// Last word doesn't match the checksum of the key
    InvalidChecksum,

    /// Bits after the key are not zero
    NonZeroPadding,

    /// Key to encode is not 32 bytes
    InvalidKeyLength(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidWordCount(n) => {
                write!(f, "Mnemonic must have {} words, got {}", super::MNEMONIC_WORDS, n)
            }
            Error::UnknownWord(ref w) => write!(f, "Mnemonic word is not in the list: {}", w),
            Error::InvalidChecksum => write!(f, "Mnemonic checksum mismatch"),
            Error::NonZeroPadding => write!(f, "Mnemonic has non-zero padding bits"),
            Error::InvalidKeyLength(n) => {
                write!(f, "Mnemonic key must be {} bytes, got {}", super::KEY_BYTES, n)
            }
        }
    }
}

impl error::Error for Error {}
