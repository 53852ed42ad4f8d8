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
//! Field map builder. Every setter drops the entry when the value is zero, empty,
//! false or an all-zero address, so a field is present on the wire only when it carries
//! information.

use crate::{
    address::Address,
    amount::MicroAlgos,
    msgpack::{Map, Value},
    util::is_zero,
};

#[derive(Debug, Default, Clone)]
pub(crate) struct Fields(Map);

impl Fields {
    pub fn new() -> Self {
        Fields::default()
    }

    pub fn uint(&mut self, key: &str, value: u64) -> &mut Self {
        if value != 0 {
            self.0.insert(key.to_string(), Value::Uint(value));
        }
        self
    }

    pub fn amount(&mut self, key: &str, value: MicroAlgos) -> &mut Self {
        self.uint(key, value.0)
    }

    pub fn string(&mut self, key: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.0.insert(key.to_string(), Value::Str(value.to_string()));
        }
        self
    }

    /// Variable length bytes, dropped when empty
    pub fn bytes(&mut self, key: &str, value: &[u8]) -> &mut Self {
        if !value.is_empty() {
            self.0.insert(key.to_string(), Value::Bytes(value.to_vec()));
        }
        self
    }

    pub fn opt_bytes(&mut self, key: &str, value: Option<&[u8]>) -> &mut Self {
        match value {
            Some(v) => self.bytes(key, v),
            None => self,
        }
    }

    /// Fixed length bytes (hashes, keys), dropped when all zero
    pub fn digest(&mut self, key: &str, value: &[u8]) -> &mut Self {
        if !is_zero(value) {
            self.0.insert(key.to_string(), Value::Bytes(value.to_vec()));
        }
        self
    }

    pub fn opt_digest(&mut self, key: &str, value: Option<&[u8]>) -> &mut Self {
        match value {
            Some(v) => self.digest(key, v),
            None => self,
        }
    }

    pub fn address(&mut self, key: &str, value: &Address) -> &mut Self {
        self.digest(key, &value.0)
    }

    pub fn opt_address(&mut self, key: &str, value: Option<&Address>) -> &mut Self {
        match value {
            Some(v) => self.address(key, v),
            None => self,
        }
    }

    pub fn flag(&mut self, key: &str, value: bool) -> &mut Self {
        if value {
            self.0.insert(key.to_string(), Value::Bool(true));
        }
        self
    }

    pub fn map(&mut self, key: &str, value: Map) -> &mut Self {
        if !value.is_empty() {
            self.0.insert(key.to_string(), Value::Map(value));
        }
        self
    }

    pub fn array(&mut self, key: &str, value: Vec<Value>) -> &mut Self {
        if !value.is_empty() {
            self.0.insert(key.to_string(), Value::Array(value));
        }
        self
    }

    pub fn into_map(self) -> Map {
        self.0
    }
}
