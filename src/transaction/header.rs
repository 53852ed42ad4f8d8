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
//! Fields shared by all transaction kinds

use super::{fields::Fields, Error};
use crate::{address::Address, amount::MicroAlgos, crypto::RawDigest};

/// Largest note a transaction may carry, in bytes
pub const MAX_NOTE_BYTES: usize = 1024;

/// Common transaction fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Account sending the transaction
    pub sender: Address,

    /// Fee paid by the sender
    pub fee: MicroAlgos,

    /// First round the transaction is valid in
    pub first_valid: u64,

    /// Last round the transaction is valid in
    pub last_valid: u64,

    /// Genesis ID of the target network
    pub genesis_id: String,

    /// Genesis hash of the target network
    pub genesis_hash: [u8; 32],

    /// Free form note
    pub note: Option<Vec<u8>>,

    /// Lease, mutually excludes transactions with the same sender and lease
    pub lease: Option<[u8; 32]>,

    /// New authorized signer of the sender account
    pub rekey_to: Option<Address>,
}

impl Header {
    /// Header with the required fields, optional ones unset
    pub fn new(
        sender: Address,
        fee: MicroAlgos,
        first_valid: u64,
        last_valid: u64,
        genesis_id: &str,
        genesis_hash: [u8; 32],
    ) -> Self {
        Header {
            sender,
            fee,
            first_valid,
            last_valid,
            genesis_id: genesis_id.to_string(),
            genesis_hash,
            note: None,
            lease: None,
            rekey_to: None,
        }
    }

    /// Set note
    pub fn with_note(mut self, note: &[u8]) -> Self {
        self.note = Some(note.to_vec());
        self
    }

    /// Set lease
    pub fn with_lease(mut self, lease: [u8; 32]) -> Self {
        self.lease = Some(lease);
        self
    }

    /// Set rekey target
    pub fn with_rekey_to(mut self, to: Address) -> Self {
        self.rekey_to = Some(to);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.first_valid > self.last_valid {
            return Err(Error::InvalidTransaction(format!(
                "first valid round {} is after last valid round {}",
                self.first_valid, self.last_valid
            )));
        }
        if let Some(ref note) = self.note {
            if note.len() > MAX_NOTE_BYTES {
                return Err(Error::InvalidTransaction(format!(
                    "note is {} bytes, max {}",
                    note.len(),
                    MAX_NOTE_BYTES
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn push_fields(&self, fields: &mut Fields, group: Option<&RawDigest>) {
        fields
            .address("snd", &self.sender)
            .amount("fee", self.fee)
            .uint("fv", self.first_valid)
            .uint("lv", self.last_valid)
            .string("gen", &self.genesis_id)
            .digest("gh", &self.genesis_hash)
            .opt_bytes("note", self.note.as_deref())
            .opt_digest("lx", self.lease.as_ref().map(|l| &l[..]))
            .opt_address("rekey", self.rekey_to.as_ref())
            .opt_digest("grp", group.map(|g| &g.0[..]));
    }
}
