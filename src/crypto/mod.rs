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
//! # Hashing and Ed25519 key material

pub mod error;
mod keypair;
mod sha512_256;

pub use self::error::CryptoError;
pub use self::keypair::{
    verify_data,
    verify_signature,
    KeyPair,
    SecretKey,
    Signature,
    PUBLIC_KEY_BYTES,
    SECRET_KEY_BYTES,
    SIGNATURE_BYTES,
};
pub use self::sha512_256::{
    sha512_256,
    sha512_256_prefixed,
    RawDigest,
    Sha512Trunc256,
    DIGEST_BYTES,
};

/// Domain separation prefix for transactions, hashed and signed as `"TX" ++ msgpack(txn)`
pub const TX_PREFIX: &[u8; 2] = b"TX";

/// Domain separation prefix for transaction groups
pub const GROUP_PREFIX: &[u8; 2] = b"TG";

/// Domain separation prefix for arbitrary data signed by an account
pub const DATA_PREFIX: &[u8; 2] = b"MX";
