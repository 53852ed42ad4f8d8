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
//! # Canonical MessagePack
//!
//! Deterministic writer for the subset of MessagePack the ledger signs over: unsigned
//! integers, UTF-8 strings, byte strings, booleans, string-keyed maps and arrays. Map
//! entries are always written in ascending byte order of their keys and every header
//! uses the smallest size class that can hold the value, so a logical value has exactly
//! one encoding.
//!
//! Dropping zero/empty fields is left to the caller, the writer encodes whatever it gets.
//!
//! See [MessagePack spec](https://github.com/msgpack/msgpack/blob/master/spec.md)

mod error;
mod reader;
mod value;
mod writer;

pub use self::error::Error;
pub use self::reader::{decode, decode_prefix, Reader, MAX_DEPTH};
pub use self::value::{Map, Value};
pub use self::writer::{encode, encode_map, WriteMsgpack};

/// Largest number of entries a map header can announce
pub const MAX_MAP_ENTRIES: usize = 0xffff;
