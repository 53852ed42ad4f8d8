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
//! # Key material and signature errors

use std::{error, fmt};

/// Signing and verification errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Secret or public key has wrong length or isn't a valid curve point
    InvalidKey(String),

    /// Signature primitive rejected the operation
    SigningFailure(String),

    /// Signature doesn't match the message and public key
    InvalidSignature,

    /// Random source is unavailable
    NoEntropy,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CryptoError::InvalidKey(ref s) => write!(f, "Invalid key: {}", s),
            CryptoError::SigningFailure(ref s) => write!(f, "Signing failed: {}", s),
            CryptoError::InvalidSignature => write!(f, "Signature verification failed"),
            CryptoError::NoEntropy => write!(f, "No entropy available"),
        }
    }
}

impl error::Error for CryptoError {}

impl From<ed25519_dalek::SignatureError> for CryptoError {
    fn from(err: ed25519_dalek::SignatureError) -> Self {
        CryptoError::SigningFailure(err.to_string())
    }
}

impl From<rand::Error> for CryptoError {
    fn from(_: rand::Error) -> Self {
        CryptoError::NoEntropy
    }
}
