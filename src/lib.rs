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
//! # Algorand transaction library
//!
//! Builds, canonically encodes, identifies and signs ledger transactions, and binds them
//! into atomic groups. Everything here is pure computation over plain values: network
//! parameters come in as input, encoded bytes go out, submission is up to the caller.
//!
//! ```
//! use algo_txn::{KeyPair, MicroAlgos, Payment, Header, Transaction};
//!
//! let key = KeyPair::from_secret(&[1u8; 32]).unwrap();
//! let header = Header::new(key.address(), MicroAlgos(1000), 1000, 2000, "testnet-v1.0", [1u8; 32]);
//! let tx = Transaction::new(header, Payment::new(key.address(), MicroAlgos::from_algos(1))).unwrap();
//! let signed = tx.sign(&key).unwrap();
//! assert_eq!(signed.id(), tx.id().unwrap());
//! ```

#[macro_use]
extern crate log;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_derive;

pub mod address;
pub mod amount;
pub mod crypto;
mod error;
pub mod group;
pub mod mnemonic;
pub mod msgpack;
pub mod params;
pub mod transaction;
pub mod util;

pub use self::address::{Address, AddressError, ADDRESS_BYTES};
pub use self::amount::MicroAlgos;
pub use self::crypto::{KeyPair, RawDigest, Signature};
pub use self::error::Error;
pub use self::group::{AtomicTransactionGroup, SignedAtomicTransactionGroup, MAX_GROUP_SIZE};
pub use self::params::NetworkParams;
pub use self::transaction::{
    ApplicationCall,
    AssetConfig,
    AssetCreate,
    AssetFreeze,
    AssetTransfer,
    Header,
    KeyRegistration,
    Payment,
    SignedTransaction,
    Transaction,
    TransactionKind,
};

#[cfg(test)]
mod tests {
    pub use crate::util::*;
}
