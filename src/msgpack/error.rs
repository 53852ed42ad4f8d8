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
//! # Canonical MessagePack errors

use std::{error, fmt};

/// Encoding and decoding errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Value needs a size class the canonical form doesn't support
    EncodingTooLarge {
        /// What was being encoded (`map`, `array`, `string`, `bytes`)
        kind: &'static str,
        /// Requested length
        len: usize,
    },

    /// Input ended in the middle of a value
    UnexpectedEnd,

    /// Marker byte outside of the supported subset
    UnsupportedMarker(u8),

    /// Value is well-formed but not in canonical form
    NonCanonical(String),

    /// String payload is not valid UTF-8
    InvalidUtf8,

    /// Extra bytes after a complete value
    TrailingBytes(usize),

    /// Maps and arrays nested deeper than the limit
    TooDeep(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EncodingTooLarge { kind, len } => {
                write!(f, "Encoding too large: {} with {} entries/bytes", kind, len)
            }
            Error::UnexpectedEnd => write!(f, "Unexpected end of input"),
            Error::UnsupportedMarker(m) => write!(f, "Unsupported marker: 0x{:02x}", m),
            Error::NonCanonical(ref s) => write!(f, "Non-canonical encoding: {}", s),
            Error::InvalidUtf8 => write!(f, "String is not valid UTF-8"),
            Error::TrailingBytes(n) => write!(f, "{} trailing bytes after value", n),
            Error::TooDeep(max) => write!(f, "Nesting deeper than {} levels", max),
        }
    }
}

impl error::Error for Error {}
