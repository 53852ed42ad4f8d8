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
//! # Ed25519 account keys
//!
//! A `KeyPair` is the only owner of the 32 byte seed. The seed is wiped with a volatile
//! write when the key pair is dropped, the signing key expanded for each signature is
//! wiped the same way by `ed25519-dalek`.

use super::{CryptoError, DATA_PREFIX};
use crate::{address::Address, mnemonic, util::to_arr};
use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::{rngs::OsRng, RngCore};
use std::{fmt, ops};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Seed length in bytes
pub const SECRET_KEY_BYTES: usize = 32;

/// Public key length in bytes
pub const PUBLIC_KEY_BYTES: usize = 32;

/// Ed25519 signature length in bytes
pub const SIGNATURE_BYTES: usize = 64;

/// Ed25519 seed
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SECRET_KEY_BYTES]);

impl SecretKey {
    /// Try to convert a byte slice into a seed.
    ///
    /// # Arguments
    ///
    /// * `data` - A byte slice with `SECRET_KEY_BYTES` length
    pub fn try_from(data: &[u8]) -> Result<Self, CryptoError> {
        if data.len() != SECRET_KEY_BYTES {
            return Err(CryptoError::InvalidKey(format!(
                "secret key must be {} bytes, got {}",
                SECRET_KEY_BYTES,
                data.len()
            )));
        }
        Ok(SecretKey(to_arr(data)))
    }

    fn signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SecretKey(***)")
    }
}

/// Ed25519 signature (64 bytes)
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_BYTES]);

impl Signature {
    /// Try to convert a byte slice into a `Signature`
    pub fn try_from(data: &[u8]) -> Result<Self, CryptoError> {
        if data.len() != SIGNATURE_BYTES {
            return Err(CryptoError::InvalidKey(format!(
                "signature must be {} bytes, got {}",
                SIGNATURE_BYTES,
                data.len()
            )));
        }
        let mut buf = [0u8; SIGNATURE_BYTES];
        buf.copy_from_slice(data);
        Ok(Signature(buf))
    }
}

impl ops::Deref for Signature {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(self.0))
    }
}

/// Account key pair: the seed plus the derived public key and address
pub struct KeyPair {
    secret: SecretKey,
    public: [u8; PUBLIC_KEY_BYTES],
    address: Address,
}

impl KeyPair {
    /// Generate a new key pair from `OsRng`
    pub fn generate() -> Result<Self, CryptoError> {
        let mut seed = [0u8; SECRET_KEY_BYTES];
        OsRng.try_fill_bytes(&mut seed)?;
        let result = KeyPair::from_secret(&seed);
        seed.zeroize();
        result
    }

    /// Import a raw 32 byte seed
    pub fn from_secret(seed: &[u8]) -> Result<Self, CryptoError> {
        let secret = SecretKey::try_from(seed)?;
        let public = secret.signing_key().verifying_key().to_bytes();
        let address = Address::from(public);
        debug!("Key pair loaded for {}", address);
        Ok(KeyPair {
            secret,
            public,
            address,
        })
    }

    /// Restore from a 25 word mnemonic phrase
    pub fn from_mnemonic(phrase: &str) -> Result<Self, crate::Error> {
        let mut seed = mnemonic::to_key(phrase)?;
        let result = KeyPair::from_secret(&seed);
        seed.zeroize();
        Ok(result?)
    }

    /// Export the seed as a 25 word mnemonic phrase
    pub fn to_mnemonic(&self) -> String {
        mnemonic::from_key(&self.secret.0)
    }

    /// Public key bytes
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_BYTES] {
        self.public
    }

    /// Account address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a message as is, without any prefix
    pub fn sign(&self, msg: &[u8]) -> Result<Signature, CryptoError> {
        let key = self.secret.signing_key();
        let sig = key.try_sign(msg)?;
        Ok(Signature(sig.to_bytes()))
    }

    /// Sign arbitrary data. The data is prefixed with `"MX"` so it can't be replayed as a
    /// transaction signature.
    pub fn sign_data(&self, data: &[u8]) -> Result<Signature, CryptoError> {
        let mut msg = Vec::with_capacity(DATA_PREFIX.len() + data.len());
        msg.extend_from_slice(DATA_PREFIX);
        msg.extend_from_slice(data);
        self.sign(&msg)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("address", &self.address)
            .finish()
    }
}

/// Verify a signature over `msg` made by the key behind `address`
pub fn verify_signature(address: &Address, msg: &[u8], sig: &Signature) -> Result<(), CryptoError> {
    let key = VerifyingKey::from_bytes(&address.0)
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    key.verify(msg, &DalekSignature::from_bytes(&sig.0))
        .map_err(|_| CryptoError::InvalidSignature)
}

/// Verify a signature made with `KeyPair::sign_data`
pub fn verify_data(address: &Address, data: &[u8], sig: &Signature) -> Result<(), CryptoError> {
    let mut msg = Vec::with_capacity(DATA_PREFIX.len() + data.len());
    msg.extend_from_slice(DATA_PREFIX);
    msg.extend_from_slice(data);
    verify_signature(address, &msg, sig)
}
