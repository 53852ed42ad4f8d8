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
//! Signed transaction

use super::{Error, Transaction};
use crate::{
    address::Address,
    crypto::{sha512_256_prefixed, verify_signature, RawDigest, Signature, TX_PREFIX},
    msgpack::{encode_map, Map, Value},
    util::base32_encode,
};

/// Transaction with its signature, ready to be submitted.
///
/// Encoded as a map of `sig` (64 byte signature) and `txn`, the transaction's own
/// canonical encoding embedded as is. When the signing key isn't the sender's own key
/// (a rekeyed account) the signer address goes into `sgnr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    transaction: Transaction,
    signature: Signature,
    group_id: Option<RawDigest>,
    auth_address: Option<Address>,
    encoded: Vec<u8>,
}

impl SignedTransaction {
    pub(crate) fn new(
        transaction: Transaction,
        signature: Signature,
        group_id: Option<RawDigest>,
        auth_address: Option<Address>,
        encoded: Vec<u8>,
    ) -> Self {
        SignedTransaction {
            transaction,
            signature,
            group_id,
            auth_address,
            encoded,
        }
    }

    /// Signed transaction
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Ed25519 signature
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Group the transaction was signed in, if any
    pub fn group_id(&self) -> Option<&RawDigest> {
        self.group_id.as_ref()
    }

    /// Signer address when it differs from the sender
    pub fn auth_address(&self) -> Option<&Address> {
        self.auth_address.as_ref()
    }

    /// Address whose key made the signature
    pub fn signer(&self) -> Address {
        self.auth_address
            .unwrap_or(self.transaction.header().sender)
    }

    /// Encoding of the transaction exactly as it was signed
    pub fn encoded_transaction(&self) -> &[u8] {
        &self.encoded
    }

    /// Wire encoding
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        let mut map = Map::new();
        map.insert("sig".to_string(), Value::Bytes(self.signature.0.to_vec()));
        if let Some(ref auth) = self.auth_address {
            map.insert("sgnr".to_string(), Value::Bytes(auth.0.to_vec()));
        }
        map.insert("txn".to_string(), Value::Encoded(self.encoded.clone()));
        Ok(encode_map(&map)?)
    }

    /// Hash of the signed bytes. Same as `Transaction::raw_id` for a standalone
    /// transaction, includes the group id for a group member.
    pub fn raw_id(&self) -> RawDigest {
        sha512_256_prefixed(TX_PREFIX, &self.encoded)
    }

    /// Transaction ID as seen by the ledger
    pub fn id(&self) -> String {
        let id = base32_encode(&self.raw_id());
        debug!("Signed transaction id {}", id);
        id
    }

    /// Check the signature against the signer's public key
    pub fn verify(&self) -> Result<(), Error> {
        let mut msg = Vec::with_capacity(TX_PREFIX.len() + self.encoded.len());
        msg.extend_from_slice(TX_PREFIX);
        msg.extend_from_slice(&self.encoded);
        verify_signature(&self.signer(), &msg, &self.signature)?;
        Ok(())
    }
}
