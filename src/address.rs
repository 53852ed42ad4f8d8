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
//! # Account address (32 bytes)
//!
//! Text form is `base32(public_key ++ checksum)` without padding, where the checksum is
//! the last 4 bytes of `SHA-512/256(public_key)`. That's always 58 characters.

use crate::{
    crypto::sha512_256,
    util::{base32_decode, base32_encode, is_zero, to_arr},
};
use std::{error, fmt, ops, str::FromStr};

/// Fixed bytes number to represent `Address`
pub const ADDRESS_BYTES: usize = 32;

/// Checksum length in bytes
pub const CHECKSUM_BYTES: usize = 4;

/// Length of the text form
pub const ADDRESS_TEXT_LENGTH: usize = 58;

/// Address parsing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Raw address is not 32 bytes, or text is not 58 characters
    InvalidLength(usize),

    /// Text is not valid base-32
    InvalidEncoding,

    /// Text decodes to something other than 36 bytes
    InvalidDecodedLength(usize),

    /// Embedded checksum doesn't match the address bytes
    ChecksumMismatch,
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AddressError::InvalidLength(len) => write!(
                f,
                "Invalid address length: {} (expected {} bytes or {} characters)",
                len, ADDRESS_BYTES, ADDRESS_TEXT_LENGTH
            ),
            AddressError::InvalidEncoding => write!(f, "Address is not valid base32"),
            AddressError::InvalidDecodedLength(len) => write!(
                f,
                "Address decoded length is not {} bytes: {}",
                ADDRESS_BYTES + CHECKSUM_BYTES,
                len
            ),
            AddressError::ChecksumMismatch => write!(f, "Address checksum mismatch"),
        }
    }
}

impl error::Error for AddressError {}

/// Account address, the Ed25519 public key of the account
#[derive(Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Address(pub [u8; ADDRESS_BYTES]);

impl Address {
    /// Try to convert a byte slice to `Address`.
    ///
    /// # Arguments
    ///
    /// * `data` - A byte slice with `ADDRESS_BYTES` length
    ///
    /// # Example
    ///
    /// ```
    /// let addr = algo_txn::Address::try_from(&[0u8; algo_txn::ADDRESS_BYTES]).unwrap();
    /// assert_eq!(addr.to_string(), "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ");
    /// ```
    pub fn try_from(data: &[u8]) -> Result<Self, AddressError> {
        if data.len() != ADDRESS_BYTES {
            return Err(AddressError::InvalidLength(data.len()));
        }

        Ok(Address(to_arr(data)))
    }

    /// The all-zero address
    pub fn zero() -> Self {
        Address([0u8; ADDRESS_BYTES])
    }

    /// Check if it's the all-zero address, which the canonical encoding leaves out
    pub fn is_zero(&self) -> bool {
        is_zero(&self.0)
    }

    /// 4 byte checksum appended to the text form
    pub fn checksum(&self) -> [u8; CHECKSUM_BYTES] {
        let hash = sha512_256(&self.0);
        to_arr(&hash[hash.len() - CHECKSUM_BYTES..])
    }

    /// Encode as 58 character base32 text
    pub fn encode_string(&self) -> String {
        let mut buf = Vec::with_capacity(ADDRESS_BYTES + CHECKSUM_BYTES);
        buf.extend_from_slice(&self.0);
        buf.extend_from_slice(&self.checksum());
        base32_encode(&buf)
    }

    /// Parse the 58 character text form, verifying the checksum
    pub fn decode_string(s: &str) -> Result<Self, AddressError> {
        if s.len() != ADDRESS_TEXT_LENGTH {
            return Err(AddressError::InvalidLength(s.len()));
        }
        let decoded = base32_decode(s).ok_or(AddressError::InvalidEncoding)?;
        if decoded.len() != ADDRESS_BYTES + CHECKSUM_BYTES {
            return Err(AddressError::InvalidDecodedLength(decoded.len()));
        }
        let (key, checksum) = decoded.split_at(ADDRESS_BYTES);
        let address = Address(to_arr(key));
        if address.checksum() != checksum {
            warn!("Address checksum mismatch for {}", s);
            return Err(AddressError::ChecksumMismatch);
        }
        Ok(address)
    }
}

impl ops::Deref for Address {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<[u8; ADDRESS_BYTES]> for Address {
    fn from(bytes: [u8; ADDRESS_BYTES]) -> Self {
        Address(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::decode_string(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode_string())
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::decode_string(&s).map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.encode_string())
    }
}
