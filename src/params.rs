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
//! # Network parameters
//!
//! Values a node reports through its transaction-parameters endpoint. They're the only
//! network input a transaction needs, fetching them is up to the caller.

use crate::{address::Address, amount::MicroAlgos, transaction::Header};

/// Default number of rounds a transaction stays valid
pub const DEFAULT_VALIDITY_WINDOW: u64 = 1000;

/// Minimum fee a transaction pays, in microalgos
pub const MIN_TXN_FEE: u64 = 1000;

/// Parameters of the network a transaction is built for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkParams {
    /// Genesis ID, e.g. `mainnet-v1.0`
    pub genesis_id: String,

    /// Genesis block hash, base64 in JSON
    #[serde(with = "base64_hash")]
    pub genesis_hash: [u8; 32],

    /// Minimum fee for a single transaction
    #[serde(default = "default_min_fee")]
    pub min_fee: u64,

    /// Suggested fee per byte
    #[serde(default)]
    pub fee: u64,

    /// Latest round known to the node
    pub last_round: u64,
}

fn default_min_fee() -> u64 {
    MIN_TXN_FEE
}

mod base64_hash {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&base64::encode(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let v = base64::decode(&s).map_err(D::Error::custom)?;
        if v.len() != 32 {
            return Err(D::Error::custom(format!(
                "Genesis hash invalid length: {}",
                v.len()
            )));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&v);
        Ok(bytes)
    }
}

impl NetworkParams {
    /// First round the transaction is valid in
    pub fn first_valid(&self) -> u64 {
        self.last_round
    }

    /// Last round the transaction is valid in
    pub fn last_valid(&self) -> u64 {
        self.last_round.saturating_add(DEFAULT_VALIDITY_WINDOW)
    }

    /// Flat fee to use, never below the network minimum
    pub fn flat_fee(&self) -> MicroAlgos {
        MicroAlgos(std::cmp::max(self.min_fee, MIN_TXN_FEE))
    }

    /// Common transaction fields for a transaction sent by `sender`
    pub fn header(&self, sender: Address) -> Header {
        Header {
            sender,
            fee: self.flat_fee(),
            first_valid: self.first_valid(),
            last_valid: self.last_valid(),
            genesis_id: self.genesis_id.clone(),
            genesis_hash: self.genesis_hash,
            note: None,
            lease: None,
            rekey_to: None,
        }
    }
}
