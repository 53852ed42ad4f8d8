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
//! # Atomic transaction groups
//!
//! Up to 16 transactions bound by a shared group id, executed all or nothing. The group
//! id commits to every member and to their order: it's the hash of the `"TG"`-prefixed
//! encoding of `{"txlist": [id_0, .., id_n]}`, where each `id_i` is the raw ID of a member
//! encoded without a group id. Every member is then signed with the group id embedded.
//!
//! On the wire a signed group is the plain concatenation of the members' signed
//! encodings.

use crate::{
    crypto::{sha512_256_prefixed, KeyPair, RawDigest, GROUP_PREFIX},
    msgpack::{decode_prefix, encode_map, Map, Value},
    transaction::{Error, SignedTransaction, Transaction},
    util::base32_encode,
};
use std::collections::HashMap;

/// Most transactions in one group
pub const MAX_GROUP_SIZE: usize = 16;

/// Calculate the group id of transactions in the given order
pub fn compute_group_id(transactions: &[Transaction]) -> Result<RawDigest, Error> {
    let mut ids = Vec::with_capacity(transactions.len());
    for tx in transactions {
        ids.push(Value::Bytes(tx.raw_id()?.0.to_vec()));
    }
    let mut map = Map::new();
    map.insert("txlist".to_string(), Value::Array(ids));
    let encoded = encode_map(&map)?;
    Ok(sha512_256_prefixed(GROUP_PREFIX, &encoded))
}

/// Split a concatenated group blob into the encodings of its members
pub fn split_wire(data: &[u8]) -> Result<Vec<Vec<u8>>, Error> {
    let mut members = Vec::new();
    let mut pos = 0;
    while pos < data.len() {
        let (_, len) = decode_prefix(&data[pos..])?;
        members.push(data[pos..pos + len].to_vec());
        pos += len;
    }
    Ok(members)
}

/// Ordered group of unsigned transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicTransactionGroup {
    transactions: Vec<Transaction>,
    group_id: RawDigest,
}

impl AtomicTransactionGroup {
    /// Form a group, fails for an empty list or more than `MAX_GROUP_SIZE` transactions
    pub fn new(transactions: Vec<Transaction>) -> Result<Self, Error> {
        if transactions.is_empty() {
            return Err(Error::InvalidGroup("group is empty".to_string()));
        }
        if transactions.len() > MAX_GROUP_SIZE {
            return Err(Error::InvalidGroup(format!(
                "group exceeds {} transactions: {}",
                MAX_GROUP_SIZE,
                transactions.len()
            )));
        }
        let group_id = compute_group_id(&transactions)?;
        debug!(
            "Group {} of {} transactions",
            base32_encode(&group_id),
            transactions.len()
        );
        Ok(AtomicTransactionGroup {
            transactions,
            group_id,
        })
    }

    /// Members in group order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Always false, an empty group can't be formed
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Group id
    pub fn group_id(&self) -> &RawDigest {
        &self.group_id
    }

    /// Group id as base-32 text
    pub fn group_id_text(&self) -> String {
        base32_encode(&self.group_id)
    }

    /// Sign every member with the key mapped to its index
    ///
    /// # Arguments
    ///
    /// * `signers` - key for each index `0..len()`, extra indexes are ignored
    ///
    pub fn sign(
        &self,
        signers: &HashMap<usize, &KeyPair>,
    ) -> Result<SignedAtomicTransactionGroup, Error> {
        let mut signed = Vec::with_capacity(self.transactions.len());
        for (i, tx) in self.transactions.iter().enumerate() {
            let key = signers.get(&i).ok_or_else(|| {
                Error::InvalidGroup(format!("missing signer for index {}", i))
            })?;
            signed.push(tx.sign_in_group(key, Some(self.group_id))?);
        }
        Ok(SignedAtomicTransactionGroup {
            transactions: signed,
            group_id: self.group_id,
        })
    }

    /// Sign with keys given in group order
    pub fn sign_with(&self, keys: &[&KeyPair]) -> Result<SignedAtomicTransactionGroup, Error> {
        let signers: HashMap<usize, &KeyPair> = keys.iter().cloned().enumerate().collect();
        self.sign(&signers)
    }
}

/// Group with every member signed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedAtomicTransactionGroup {
    transactions: Vec<SignedTransaction>,
    group_id: RawDigest,
}

impl SignedAtomicTransactionGroup {
    /// Signed members in group order
    pub fn transactions(&self) -> &[SignedTransaction] {
        &self.transactions
    }

    /// Group id
    pub fn group_id(&self) -> &RawDigest {
        &self.group_id
    }

    /// Wire encoding, members concatenated
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        for tx in &self.transactions {
            buf.extend_from_slice(&tx.encode()?);
        }
        Ok(buf)
    }

    /// Transaction IDs of the members, as seen by the ledger
    pub fn ids(&self) -> Vec<String> {
        self.transactions.iter().map(|tx| tx.id()).collect()
    }

    /// Check every signature and that every member carries this group id
    pub fn verify(&self) -> Result<(), Error> {
        for (i, tx) in self.transactions.iter().enumerate() {
            if tx.group_id() != Some(&self.group_id) {
                return Err(Error::InvalidGroup(format!(
                    "transaction at index {} is not signed for the group",
                    i
                )));
            }
            tx.verify()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        address::Address,
        amount::MicroAlgos,
        msgpack::{self, decode},
        tests::*,
        transaction::{Header, Payment},
    };

    const SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
    const GENESIS_HASH: &str = "4863b518a4b3c84ec810f22d4f1081cb0f71f059a7ac20dec62f7f70e5093a22";

    fn key() -> KeyPair {
        KeyPair::from_secret(&to_32bytes(SEED)).unwrap()
    }

    fn payment(amount: u64, receiver: u8) -> Transaction {
        Transaction::new(
            Header::new(
                key().address(),
                MicroAlgos(1000),
                1000,
                2000,
                "testnet-v1.0",
                to_32bytes(GENESIS_HASH),
            ),
            Payment::new(Address([receiver; 32]), MicroAlgos(amount)),
        )
        .unwrap()
    }

    fn pair() -> AtomicTransactionGroup {
        AtomicTransactionGroup::new(vec![payment(1000, 0x11), payment(2000, 0x22)]).unwrap()
    }

    fn message(err: Error) -> String {
        match err {
            Error::InvalidGroup(msg) => msg,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn should_compute_group_id() {
        let group = pair();
        assert_eq!(
            group.group_id().to_string(),
            "183daec1a9ef4fb2a1dfb5e5c84e0bfdaa1e1db6b47f11889b6b1be9e1c808e8"
        );
        assert_eq!(
            group.group_id_text(),
            "DA625QNJ55H3FIO7WXS4QTQL7WVB4HNWWR7RDCE3NMN6TYOIBDUA"
        );
    }

    #[test]
    fn should_depend_on_order() {
        let reversed =
            AtomicTransactionGroup::new(vec![payment(2000, 0x22), payment(1000, 0x11)]).unwrap();
        assert_ne!(reversed.group_id(), pair().group_id());
        assert_eq!(
            reversed.group_id().to_string(),
            "6ee1dad39801e7dd71123f41d2608835d6508c52d2d46ac99dc5e920e15c8173"
        );
    }

    #[test]
    fn should_reject_empty_group() {
        let err = AtomicTransactionGroup::new(vec![]).unwrap_err();
        assert!(message(err).contains("empty"));
    }

    #[test]
    fn should_accept_max_size() {
        let txs: Vec<Transaction> = (1..=16).map(|i| payment(i, 0x11)).collect();
        let group = AtomicTransactionGroup::new(txs).unwrap();
        assert_eq!(group.len(), 16);
        assert_eq!(group.group_id().len(), 32);
    }

    #[test]
    fn should_reject_oversized_group() {
        let txs: Vec<Transaction> = (1..=17).map(|i| payment(i, 0x11)).collect();
        let err = AtomicTransactionGroup::new(txs).unwrap_err();
        assert!(message(err).contains("16"));
    }

    #[test]
    fn should_require_signer_for_each_index() {
        let key = key();
        let mut signers = HashMap::new();
        signers.insert(0, &key);
        let err = pair().sign(&signers).unwrap_err();
        assert!(message(err).contains("index 1"));
    }

    #[test]
    fn should_sign_members_with_group_id() {
        let key = key();
        let group = pair();
        let signed = group.sign_with(&[&key, &key]).unwrap();
        assert_eq!(signed.transactions().len(), 2);
        assert!(signed.verify().is_ok());
        for tx in signed.transactions() {
            assert_eq!(tx.group_id(), Some(group.group_id()));
            let txn = decode(tx.encoded_transaction()).unwrap();
            assert_eq!(
                txn.as_map().unwrap().get("grp"),
                Some(&Value::Bytes(group.group_id().0.to_vec()))
            );
        }
        assert_eq!(
            signed.ids(),
            vec![
                "MSNV55B2P3TB4F3TP2H7M7NSAPCZPPT34PTT7JOSXJYSRCQVCB6Q".to_string(),
                "W6NVHCO3OL5ST5CQ3B7KYGJKDCBSK2RGHOJOWHH5CNR3DQTMZMAA".to_string(),
            ]
        );
    }

    #[test]
    fn should_concatenate_wire_form() {
        let key = key();
        let signed = pair().sign_with(&[&key, &key]).unwrap();
        let wire = signed.encode().unwrap();
        assert_eq!(wire.len(), 279 * 2);
        let members = split_wire(&wire).unwrap();
        assert_eq!(members.len(), 2);
        for (member, tx) in members.iter().zip(signed.transactions()) {
            assert_eq!(member, &tx.encode().unwrap());
        }
    }

    #[test]
    fn should_fail_split_on_truncated_wire() {
        let key = key();
        let wire = pair().sign_with(&[&key, &key]).unwrap().encode().unwrap();
        assert!(split_wire(&wire[..wire.len() - 1]).is_err());
    }

    #[test]
    fn should_fail_split_on_deep_nesting() {
        let key = key();
        let mut wire = pair().sign_with(&[&key, &key]).unwrap().encode().unwrap();
        wire.extend(vec![0x91u8; 100_000]);
        wire.push(0x00);
        assert_eq!(
            split_wire(&wire),
            Err(Error::Encoding(msgpack::Error::TooDeep(msgpack::MAX_DEPTH)))
        );
    }
}
