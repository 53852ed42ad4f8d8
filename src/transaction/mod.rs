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
//! # Transactions
//!
//! A transaction is the common `Header` plus one kind-specific body. It's encoded as a
//! single canonical MessagePack map: common and kind fields share the top level, `type`
//! names the kind, and any zero, empty or false field is left out. The same bytes,
//! prefixed with `"TX"`, are hashed for the transaction ID and signed.

mod application;
mod asset;
mod error;
mod fields;
mod header;
mod keyreg;
mod payment;
mod signed;

pub use self::application::{
    ApplicationCall,
    BoxReference,
    OnCompletion,
    StateSchema,
    MAX_APP_ARGS,
    MAX_APP_REFERENCES,
    MAX_EXTRA_PAGES,
};
pub use self::asset::{
    AssetConfig,
    AssetControl,
    AssetCreate,
    AssetFreeze,
    AssetParams,
    AssetTransfer,
    MAX_ASSET_NAME_BYTES,
    MAX_DECIMALS,
    MAX_UNIT_NAME_BYTES,
    MAX_URL_BYTES,
};
pub use self::error::Error;
pub use self::header::{Header, MAX_NOTE_BYTES};
pub use self::keyreg::{KeyRegistration, Participation};
pub use self::payment::Payment;
pub use self::signed::SignedTransaction;

use self::fields::Fields;
use crate::{
    amount::MicroAlgos,
    crypto::{sha512_256_prefixed, KeyPair, RawDigest, TX_PREFIX},
    msgpack::{encode_map, Map, Value},
    util::base32_encode,
};

/// Kind-specific part of a transaction
pub(crate) trait TxFields {
    /// Value of the `type` field
    fn tx_type(&self) -> &'static str;

    /// Check the fields are consistent
    fn validate(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Add non-empty fields to the map
    fn push_fields(&self, fields: &mut Fields);
}

/// Body of a transaction, one variant per kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    /// `pay`
    Payment(Payment),
    /// `acfg` without an asset id
    AssetCreate(AssetCreate),
    /// `acfg` of an existing asset
    AssetConfig(AssetConfig),
    /// `axfer`
    AssetTransfer(AssetTransfer),
    /// `afrz`
    AssetFreeze(AssetFreeze),
    /// `appl`
    ApplicationCall(ApplicationCall),
    /// `keyreg`
    KeyRegistration(KeyRegistration),
}

impl TransactionKind {
    fn fields(&self) -> &dyn TxFields {
        match self {
            TransactionKind::Payment(tx) => tx,
            TransactionKind::AssetCreate(tx) => tx,
            TransactionKind::AssetConfig(tx) => tx,
            TransactionKind::AssetTransfer(tx) => tx,
            TransactionKind::AssetFreeze(tx) => tx,
            TransactionKind::ApplicationCall(tx) => tx,
            TransactionKind::KeyRegistration(tx) => tx,
        }
    }

    /// Value of the `type` field
    pub fn tx_type(&self) -> &'static str {
        self.fields().tx_type()
    }
}

macro_rules! impl_from_kind {
    ($($kind:ident),*) => {
        $(
            impl From<$kind> for TransactionKind {
                fn from(tx: $kind) -> Self {
                    TransactionKind::$kind(tx)
                }
            }
        )*
    };
}

impl_from_kind!(
    Payment,
    AssetCreate,
    AssetConfig,
    AssetTransfer,
    AssetFreeze,
    ApplicationCall,
    KeyRegistration
);

/// Unsigned transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    header: Header,
    kind: TransactionKind,
}

impl Transaction {
    /// Validate and build a transaction
    ///
    /// # Arguments
    ///
    /// * `header` - common fields
    /// * `kind` - kind-specific body, e.g. a `Payment`
    ///
    pub fn new<K: Into<TransactionKind>>(header: Header, kind: K) -> Result<Self, Error> {
        let kind = kind.into();
        header.validate()?;
        kind.fields().validate()?;
        Ok(Transaction { header, kind })
    }

    /// Common fields
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Kind-specific body
    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    /// Value of the `type` field
    pub fn tx_type(&self) -> &'static str {
        self.kind.tx_type()
    }

    /// Replace the fee
    pub fn with_flat_fee(mut self, fee: MicroAlgos) -> Self {
        self.header.fee = fee;
        self
    }

    /// Field map as it's encoded, with the group id when given
    pub fn to_map(&self, group: Option<&RawDigest>) -> Map {
        let mut fields = Fields::new();
        self.header.push_fields(&mut fields, group);
        self.kind.fields().push_fields(&mut fields);
        let mut map = fields.into_map();
        map.insert("type".to_string(), Value::Str(self.tx_type().to_string()));
        map
    }

    /// Canonical encoding of the transaction alone, without a group id
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        self.encode_with_group(None)
    }

    /// Canonical encoding as a member of the group `group`
    pub fn encode_with_group(&self, group: Option<&RawDigest>) -> Result<Vec<u8>, Error> {
        Ok(encode_map(&self.to_map(group))?)
    }

    /// Bytes a signature is made over: `"TX"` followed by the encoding
    pub fn bytes_to_sign(&self, group: Option<&RawDigest>) -> Result<Vec<u8>, Error> {
        let encoded = self.encode_with_group(group)?;
        let mut msg = Vec::with_capacity(TX_PREFIX.len() + encoded.len());
        msg.extend_from_slice(TX_PREFIX);
        msg.extend_from_slice(&encoded);
        Ok(msg)
    }

    /// SHA-512/256 of the prefixed encoding, without a group id
    pub fn raw_id(&self) -> Result<RawDigest, Error> {
        Ok(sha512_256_prefixed(TX_PREFIX, &self.encode()?))
    }

    /// Transaction ID, the base-32 text of `raw_id`
    pub fn id(&self) -> Result<String, Error> {
        let id = base32_encode(&self.raw_id()?);
        debug!("Transaction {} id {}", self.tx_type(), id);
        Ok(id)
    }

    /// Sign as a standalone transaction
    pub fn sign(&self, key: &KeyPair) -> Result<SignedTransaction, Error> {
        self.sign_in_group(key, None)
    }

    /// Sign as a member of the group `group`. The signature covers the group id.
    pub fn sign_in_group(
        &self,
        key: &KeyPair,
        group: Option<RawDigest>,
    ) -> Result<SignedTransaction, Error> {
        let msg = self.bytes_to_sign(group.as_ref())?;
        let signature = key.sign(&msg)?;
        let signer = key.address();
        let auth = if signer != self.header.sender {
            debug!("Signing for {} with rekeyed key {}", self.header.sender, signer);
            Some(signer)
        } else {
            None
        };
        let signed = SignedTransaction::new(
            self.clone(),
            signature,
            group,
            auth,
            msg[TX_PREFIX.len()..].to_vec(),
        );
        debug!(
            "Signed {} transaction {} from {}",
            self.tx_type(),
            signed.id(),
            self.header.sender
        );
        Ok(signed)
    }
}
