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
//! # Transaction errors

use crate::{crypto::CryptoError, msgpack};
use std::{error, fmt};

/// Errors of building, encoding and signing transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Transaction value is structurally invalid
    InvalidTransaction(String),

    /// Atomic group can't be formed or signed
    InvalidGroup(String),

    /// Canonical encoding failed
    Encoding(msgpack::Error),

    /// Signing or verification failed
    Crypto(CryptoError),
}

impl From<msgpack::Error> for Error {
    fn from(err: msgpack::Error) -> Self {
        Error::Encoding(err)
    }
}

impl From<CryptoError> for Error {
    fn from(err: CryptoError) -> Self {
        Error::Crypto(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidTransaction(ref str) => write!(f, "Invalid transaction: {}", str),
            Error::InvalidGroup(ref str) => write!(f, "Invalid group: {}", str),
            Error::Encoding(ref err) => write!(f, "Encoding error: {}", err),
            Error::Crypto(ref err) => write!(f, "Crypto error: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Encoding(ref err) => Some(err),
            Error::Crypto(ref err) => Some(err),
            _ => None,
        }
    }
}
