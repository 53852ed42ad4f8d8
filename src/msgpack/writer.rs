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
//! # Canonical MessagePack writer

use super::{Error, Map, Value, MAX_MAP_ENTRIES};
use byteorder::{BigEndian, ByteOrder};

/// The `WriteMsgpack` trait is used to specify functionality of serializing data to
/// canonical MessagePack bytes
pub trait WriteMsgpack {
    /// Writes itself as MessagePack bytes into specified buffer
    fn write_msgpack(&self, buf: &mut Vec<u8>) -> Result<(), Error>;
}

fn write_u16(buf: &mut Vec<u8>, v: u16) {
    let mut b = [0u8; 2];
    BigEndian::write_u16(&mut b, v);
    buf.extend_from_slice(&b);
}

fn write_u32(buf: &mut Vec<u8>, v: u32) {
    let mut b = [0u8; 4];
    BigEndian::write_u32(&mut b, v);
    buf.extend_from_slice(&b);
}

fn write_u64(buf: &mut Vec<u8>, v: u64) {
    let mut b = [0u8; 8];
    BigEndian::write_u64(&mut b, v);
    buf.extend_from_slice(&b);
}

pub(crate) fn write_uint(v: u64, buf: &mut Vec<u8>) {
    if v <= 0x7f {
        buf.push(v as u8);
    } else if v <= 0xff {
        buf.push(0xcc);
        buf.push(v as u8);
    } else if v <= 0xffff {
        buf.push(0xcd);
        write_u16(buf, v as u16);
    } else if v <= 0xffff_ffff {
        buf.push(0xce);
        write_u32(buf, v as u32);
    } else {
        buf.push(0xcf);
        write_u64(buf, v);
    }
}

pub(crate) fn write_str(s: &str, buf: &mut Vec<u8>) -> Result<(), Error> {
    let len = s.len();
    if len <= 31 {
        buf.push(0xa0 | len as u8);
    } else if len <= 0xff {
        buf.push(0xd9);
        buf.push(len as u8);
    } else if len <= 0xffff {
        buf.push(0xda);
        write_u16(buf, len as u16);
    } else if len <= 0xffff_ffff {
        buf.push(0xdb);
        write_u32(buf, len as u32);
    } else {
        return Err(Error::EncodingTooLarge { kind: "string", len });
    }
    buf.extend_from_slice(s.as_bytes());
    Ok(())
}

pub(crate) fn write_bin(data: &[u8], buf: &mut Vec<u8>) -> Result<(), Error> {
    let len = data.len();
    if len <= 0xff {
        buf.push(0xc4);
        buf.push(len as u8);
    } else if len <= 0xffff {
        buf.push(0xc5);
        write_u16(buf, len as u16);
    } else if len <= 0xffff_ffff {
        buf.push(0xc6);
        write_u32(buf, len as u32);
    } else {
        return Err(Error::EncodingTooLarge { kind: "bytes", len });
    }
    buf.extend_from_slice(data);
    Ok(())
}

pub(crate) fn write_map_header(len: usize, buf: &mut Vec<u8>) -> Result<(), Error> {
    if len <= 15 {
        buf.push(0x80 | len as u8);
    } else if len <= MAX_MAP_ENTRIES {
        buf.push(0xde);
        write_u16(buf, len as u16);
    } else {
        return Err(Error::EncodingTooLarge { kind: "map", len });
    }
    Ok(())
}

pub(crate) fn write_array_header(len: usize, buf: &mut Vec<u8>) -> Result<(), Error> {
    if len <= 15 {
        buf.push(0x90 | len as u8);
    } else if len <= 0xffff {
        buf.push(0xdc);
        write_u16(buf, len as u16);
    } else if len <= 0xffff_ffff {
        buf.push(0xdd);
        write_u32(buf, len as u32);
    } else {
        return Err(Error::EncodingTooLarge { kind: "array", len });
    }
    Ok(())
}

impl WriteMsgpack for u64 {
    fn write_msgpack(&self, buf: &mut Vec<u8>) -> Result<(), Error> {
        write_uint(*self, buf);
        Ok(())
    }
}

impl WriteMsgpack for bool {
    fn write_msgpack(&self, buf: &mut Vec<u8>) -> Result<(), Error> {
        buf.push(if *self { 0xc3 } else { 0xc2 });
        Ok(())
    }
}

impl WriteMsgpack for str {
    fn write_msgpack(&self, buf: &mut Vec<u8>) -> Result<(), Error> {
        write_str(self, buf)
    }
}

impl WriteMsgpack for String {
    fn write_msgpack(&self, buf: &mut Vec<u8>) -> Result<(), Error> {
        write_str(self, buf)
    }
}

impl WriteMsgpack for [u8] {
    fn write_msgpack(&self, buf: &mut Vec<u8>) -> Result<(), Error> {
        write_bin(self, buf)
    }
}

impl WriteMsgpack for Map {
    fn write_msgpack(&self, buf: &mut Vec<u8>) -> Result<(), Error> {
        write_map_header(self.len(), buf)?;
        // BTreeMap iterates in ascending key order
        for (key, value) in self {
            write_str(key, buf)?;
            value.write_msgpack(buf)?;
        }
        Ok(())
    }
}

impl WriteMsgpack for [Value] {
    fn write_msgpack(&self, buf: &mut Vec<u8>) -> Result<(), Error> {
        write_array_header(self.len(), buf)?;
        for item in self {
            item.write_msgpack(buf)?;
        }
        Ok(())
    }
}

impl WriteMsgpack for Value {
    fn write_msgpack(&self, buf: &mut Vec<u8>) -> Result<(), Error> {
        match self {
            Value::Uint(v) => v.write_msgpack(buf),
            Value::Str(s) => s.write_msgpack(buf),
            Value::Bytes(b) => b.as_slice().write_msgpack(buf),
            Value::Bool(b) => b.write_msgpack(buf),
            Value::Map(m) => m.write_msgpack(buf),
            Value::Array(a) => a.as_slice().write_msgpack(buf),
            Value::Encoded(raw) => {
                buf.extend_from_slice(raw);
                Ok(())
            }
        }
    }
}

/// Encode a map into canonical bytes
pub fn encode_map(entries: &Map) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    entries.write_msgpack(&mut buf)?;
    Ok(buf)
}

/// Encode any value into canonical bytes
pub fn encode(value: &Value) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    value.write_msgpack(&mut buf)?;
    Ok(buf)
}
