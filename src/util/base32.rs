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
//! # Base-32 text encoding (RFC 4648 alphabet, no padding)

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

fn symbol_value(c: u8) -> Option<u32> {
    match c {
        b'A'..=b'Z' => Some((c - b'A') as u32),
        b'2'..=b'7' => Some((c - b'2') as u32 + 26),
        _ => None,
    }
}

/// Encode bytes as unpadded base-32 text
pub fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8 + 4) / 5);
    let mut buf: u32 = 0;
    let mut bits = 0;
    for b in data {
        buf = (buf << 8) | (*b as u32);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buf >> bits) & 0x1f) as usize] as char);
        }
        buf &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push(ALPHABET[((buf << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

/// Decode unpadded base-32 text.
///
/// Returns `None` for characters outside the alphabet (padding included), for
/// lengths no byte sequence can produce, and when the unused trailing bits are not zero.
pub fn base32_decode(text: &str) -> Option<Vec<u8>> {
    match text.len() % 8 {
        1 | 3 | 6 => return None,
        _ => {}
    }
    let mut out = Vec::with_capacity(text.len() * 5 / 8);
    let mut buf: u32 = 0;
    let mut bits = 0;
    for c in text.bytes() {
        buf = (buf << 5) | symbol_value(c)?;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push(((buf >> bits) & 0xff) as u8);
        }
        buf &= (1 << bits) - 1;
    }
    if buf != 0 {
        return None;
    }
    Some(out)
}
