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
//! # Canonical MessagePack reader
//!
//! Reads back the subset produced by the writer. Anything the writer would never emit
//! (non-minimal headers, unsorted or duplicate map keys, negative integers, floats) is
//! rejected, so a successful decode also proves the input was canonical.

use super::{Error, Map, Value};
use byteorder::{BigEndian, ByteOrder};

/// Deepest nesting of maps and arrays the reader accepts
pub const MAX_DEPTH: usize = 16;

/// Cursor over encoded bytes
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Reader<'a> {
    /// Start reading at the beginning of `data`
    pub fn new(data: &'a [u8]) -> Reader<'a> {
        Reader {
            data,
            pos: 0,
            depth: 0,
        }
    }

    /// Current position
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], Error> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEnd);
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        Ok(())
    }

    fn byte(&mut self) -> Result<u8, Error> {
        Ok(self.take(1)?[0])
    }

    fn be16(&mut self) -> Result<usize, Error> {
        Ok(BigEndian::read_u16(self.take(2)?) as usize)
    }

    fn be32(&mut self) -> Result<usize, Error> {
        Ok(BigEndian::read_u32(self.take(4)?) as usize)
    }

    /// Read the next complete value
    pub fn read_value(&mut self) -> Result<Value, Error> {
        let marker = self.byte()?;
        match marker {
            0x00..=0x7f => Ok(Value::Uint(marker as u64)),
            0x80..=0x8f => self.read_map((marker & 0x0f) as usize),
            0x90..=0x9f => self.read_array((marker & 0x0f) as usize),
            0xa0..=0xbf => self.read_str((marker & 0x1f) as usize),
            0xc2 => Ok(Value::Bool(false)),
            0xc3 => Ok(Value::Bool(true)),
            0xc4 => {
                let len = self.byte()? as usize;
                self.read_bin(len)
            }
            0xc5 => {
                let len = self.be16()?;
                minimal(len > 0xff, "bin16 header for short byte string")?;
                self.read_bin(len)
            }
            0xc6 => {
                let len = self.be32()?;
                minimal(len > 0xffff, "bin32 header for short byte string")?;
                self.read_bin(len)
            }
            0xcc => {
                let v = self.byte()? as u64;
                minimal(v > 0x7f, "uint8 header for small integer")?;
                Ok(Value::Uint(v))
            }
            0xcd => {
                let v = BigEndian::read_u16(self.take(2)?) as u64;
                minimal(v > 0xff, "uint16 header for small integer")?;
                Ok(Value::Uint(v))
            }
            0xce => {
                let v = BigEndian::read_u32(self.take(4)?) as u64;
                minimal(v > 0xffff, "uint32 header for small integer")?;
                Ok(Value::Uint(v))
            }
            0xcf => {
                let v = BigEndian::read_u64(self.take(8)?);
                minimal(v > 0xffff_ffff, "uint64 header for small integer")?;
                Ok(Value::Uint(v))
            }
            0xd9 => {
                let len = self.byte()? as usize;
                minimal(len > 31, "str8 header for short string")?;
                self.read_str(len)
            }
            0xda => {
                let len = self.be16()?;
                minimal(len > 0xff, "str16 header for short string")?;
                self.read_str(len)
            }
            0xdb => {
                let len = self.be32()?;
                minimal(len > 0xffff, "str32 header for short string")?;
                self.read_str(len)
            }
            0xdc => {
                let len = self.be16()?;
                minimal(len > 15, "array16 header for short array")?;
                self.read_array(len)
            }
            0xdd => {
                let len = self.be32()?;
                minimal(len > 0xffff, "array32 header for short array")?;
                self.read_array(len)
            }
            0xde => {
                let len = self.be16()?;
                minimal(len > 15, "map16 header for short map")?;
                self.read_map(len)
            }
            m => Err(Error::UnsupportedMarker(m)),
        }
    }

    fn read_bin(&mut self, len: usize) -> Result<Value, Error> {
        Ok(Value::Bytes(self.take(len)?.to_vec()))
    }

    fn read_str(&mut self, len: usize) -> Result<Value, Error> {
        let raw = self.take(len)?;
        let s = std::str::from_utf8(raw).map_err(|_| Error::InvalidUtf8)?;
        Ok(Value::Str(s.to_string()))
    }

    fn read_array(&mut self, len: usize) -> Result<Value, Error> {
        // each item is at least one byte
        if len > self.remaining() {
            return Err(Error::UnexpectedEnd);
        }
        self.enter()?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.read_value()?);
        }
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn read_map(&mut self, len: usize) -> Result<Value, Error> {
        self.enter()?;
        let mut map = Map::new();
        let mut prev: Option<String> = None;
        for _ in 0..len {
            let key = match self.read_value()? {
                Value::Str(s) => s,
                _ => return Err(Error::NonCanonical("map key is not a string".to_string())),
            };
            if let Some(p) = &prev {
                if p.as_bytes() >= key.as_bytes() {
                    return Err(Error::NonCanonical(format!(
                        "map key '{}' is not after '{}'",
                        key, p
                    )));
                }
            }
            let value = self.read_value()?;
            prev = Some(key.clone());
            map.insert(key, value);
        }
        self.depth -= 1;
        Ok(Value::Map(map))
    }
}

fn minimal(ok: bool, msg: &str) -> Result<(), Error> {
    if ok {
        Ok(())
    } else {
        Err(Error::NonCanonical(msg.to_string()))
    }
}

/// Decode a single value, requiring that it spans the whole input
pub fn decode(data: &[u8]) -> Result<Value, Error> {
    let (value, used) = decode_prefix(data)?;
    if used != data.len() {
        return Err(Error::TrailingBytes(data.len() - used));
    }
    Ok(value)
}

/// Decode the first value of the input, returning it with the number of bytes it occupies
pub fn decode_prefix(data: &[u8]) -> Result<(Value, usize), Error> {
    let mut reader = Reader::new(data);
    let value = reader.read_value()?;
    Ok((value, reader.position()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msgpack::encode;

    #[test]
    fn decode_what_was_encoded() {
        let mut inner = Map::new();
        inner.insert("nui".to_string(), Value::Uint(3));
        let mut map = Map::new();
        map.insert("apgs".to_string(), Value::Map(inner));
        map.insert("amt".to_string(), Value::Uint(5_000_000));
        map.insert("note".to_string(), Value::Bytes(vec![1u8; 300]));
        map.insert("gen".to_string(), Value::from("testnet-v1.0"));
        map.insert("nonpart".to_string(), Value::Bool(true));
        map.insert(
            "apaa".to_string(),
            Value::Array((0..20).map(|i| Value::Bytes(vec![i])).collect()),
        );
        let value = Value::Map(map);

        let bytes = encode(&value).unwrap();
        assert_eq!(decode(&bytes).unwrap(), value);
    }

    #[test]
    fn reject_unsorted_keys() {
        let data = vec![0x82, 0xa1, b'b', 0x01, 0xa1, b'a', 0x02];
        assert!(matches!(decode(&data), Err(Error::NonCanonical(_))));
    }

    #[test]
    fn reject_duplicate_keys() {
        let data = vec![0x82, 0xa1, b'a', 0x01, 0xa1, b'a', 0x02];
        assert!(matches!(decode(&data), Err(Error::NonCanonical(_))));
    }

    #[test]
    fn reject_non_minimal_int() {
        assert!(matches!(decode(&[0xcc, 0x05]), Err(Error::NonCanonical(_))));
        assert!(matches!(decode(&[0xcd, 0x00, 0xff]), Err(Error::NonCanonical(_))));
    }

    #[test]
    fn reject_truncated() {
        assert_eq!(decode(&[0xcd, 0x01]), Err(Error::UnexpectedEnd));
        assert_eq!(decode(&[0x92, 0x01]), Err(Error::UnexpectedEnd));
        assert_eq!(decode(&[]), Err(Error::UnexpectedEnd));
    }

    #[test]
    fn reject_deep_nesting() {
        let mut data = vec![0x91u8; 200_000];
        data.push(0x00);
        assert_eq!(decode(&data), Err(Error::TooDeep(MAX_DEPTH)));

        let mut data = vec![0x81u8, 0xa1, b'a'];
        for _ in 0..100_000 {
            data.extend_from_slice(&[0x81, 0xa1, b'a']);
        }
        data.push(0x00);
        assert_eq!(decode(&data), Err(Error::TooDeep(MAX_DEPTH)));
    }

    #[test]
    fn accept_nesting_up_to_limit() {
        let mut data = vec![0x91u8; MAX_DEPTH];
        data.push(0x00);
        assert!(decode(&data).is_ok());
        let mut data = vec![0x91u8; MAX_DEPTH + 1];
        data.push(0x00);
        assert_eq!(decode(&data), Err(Error::TooDeep(MAX_DEPTH)));
    }

    #[test]
    fn reject_trailing() {
        assert_eq!(decode(&[0x01, 0x02]), Err(Error::TrailingBytes(1)));
    }

    #[test]
    fn reject_unsupported() {
        assert_eq!(decode(&[0xcb]), Err(Error::UnsupportedMarker(0xcb)));
        assert_eq!(decode(&[0xff]), Err(Error::UnsupportedMarker(0xff)));
    }

    #[test]
    fn split_concatenated_values() {
        let data = vec![0x81, 0xa1, b'a', 0x01, 0x81, 0xa1, b'b', 0x02];
        let (first, used) = decode_prefix(&data).unwrap();
        assert_eq!(used, 4);
        assert_eq!(first.as_map().unwrap()["a"], Value::Uint(1));
        let (second, used2) = decode_prefix(&data[used..]).unwrap();
        assert_eq!(used2, 4);
        assert_eq!(second.as_map().unwrap()["b"], Value::Uint(2));
    }
}
