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
//! # SHA-512/256
//!
//! SHA-512 compression with the SHA-512/256 initial hash value, output truncated to the
//! first 256 bits. Described in FIPS 180-4, section 5.3.6.2.

use byteorder::{BigEndian, ByteOrder};
use std::{fmt, ops};

/// Digest length in bytes
pub const DIGEST_BYTES: usize = 32;

const BLOCK_BYTES: usize = 128;

const IV: [u64; 8] = [
    0x22312194fc2bf72c,
    0x9f555fa3c84c64c2,
    0x2393b86b6f53b151,
    0x963877195940eabd,
    0x96283ee2a88effe3,
    0xbe5e1e2553863992,
    0x2b0199fc2c85b8aa,
    0x0eb72ddc81c52ca2,
];

const K: [u64; 80] = [
    0x428a2f98d728ae22, 0x7137449123ef65cd, 0xb5c0fbcfec4d3b2f, 0xe9b5dba58189dbbc,
    0x3956c25bf348b538, 0x59f111f1b605d019, 0x923f82a4af194f9b, 0xab1c5ed5da6d8118,
    0xd807aa98a3030242, 0x12835b0145706fbe, 0x243185be4ee4b28c, 0x550c7dc3d5ffb4e2,
    0x72be5d74f27b896f, 0x80deb1fe3b1696b1, 0x9bdc06a725c71235, 0xc19bf174cf692694,
    0xe49b69c19ef14ad2, 0xefbe4786384f25e3, 0x0fc19dc68b8cd5b5, 0x240ca1cc77ac9c65,
    0x2de92c6f592b0275, 0x4a7484aa6ea6e483, 0x5cb0a9dcbd41fbd4, 0x76f988da831153b5,
    0x983e5152ee66dfab, 0xa831c66d2db43210, 0xb00327c898fb213f, 0xbf597fc7beef0ee4,
    0xc6e00bf33da88fc2, 0xd5a79147930aa725, 0x06ca6351e003826f, 0x142929670a0e6e70,
    0x27b70a8546d22ffc, 0x2e1b21385c26c926, 0x4d2c6dfc5ac42aed, 0x53380d139d95b3df,
    0x650a73548baf63de, 0x766a0abb3c77b2a8, 0x81c2c92e47edaee6, 0x92722c851482353b,
    0xa2bfe8a14cf10364, 0xa81a664bbc423001, 0xc24b8b70d0f89791, 0xc76c51a30654be30,
    0xd192e819d6ef5218, 0xd69906245565a910, 0xf40e35855771202a, 0x106aa07032bbd1b8,
    0x19a4c116b8d2d0c8, 0x1e376c085141ab53, 0x2748774cdf8eeb99, 0x34b0bcb5e19b48a8,
    0x391c0cb3c5c95a63, 0x4ed8aa4ae3418acb, 0x5b9cca4f7763e373, 0x682e6ff3d6b2b8a3,
    0x748f82ee5defb2fc, 0x78a5636f43172f60, 0x84c87814a1f0ab72, 0x8cc702081a6439ec,
    0x90befffa23631e28, 0xa4506cebde82bde9, 0xbef9a3f7b2c67915, 0xc67178f2e372532b,
    0xca273eceea26619c, 0xd186b8c721c0c207, 0xeada7dd6cde0eb1e, 0xf57d4f7fee6ed178,
    0x06f067aa72176fba, 0x0a637dc5a2c898a6, 0x113f9804bef90dae, 0x1b710b35131c471b,
    0x28db77f523047d84, 0x32caab7b40c72493, 0x3c9ebe0a15c9bebc, 0x431d67c49c100d4c,
    0x4cc5d4becb3e42b6, 0x597f299cfc657e2a, 0x5fcb6fab3ad6faec, 0x6c44198c4a475817,
];

/// 32 byte output of the hash function
#[derive(Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct RawDigest(pub [u8; DIGEST_BYTES]);

impl RawDigest {
    /// Digest bytes
    pub fn into_bytes(self) -> [u8; DIGEST_BYTES] {
        self.0
    }
}

impl ops::Deref for RawDigest {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for RawDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_BYTES]> for RawDigest {
    fn from(bytes: [u8; DIGEST_BYTES]) -> Self {
        RawDigest(bytes)
    }
}

impl fmt::Display for RawDigest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for RawDigest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RawDigest({})", hex::encode(self.0))
    }
}

/// Incremental SHA-512/256 hasher
#[derive(Clone)]
pub struct Sha512Trunc256 {
    state: [u64; 8],
    buffer: [u8; BLOCK_BYTES],
    buffered: usize,
    length: u128,
}

impl Default for Sha512Trunc256 {
    fn default() -> Self {
        Sha512Trunc256::new()
    }
}

impl Sha512Trunc256 {
    /// Create a hasher with empty input
    pub fn new() -> Self {
        Sha512Trunc256 {
            state: IV,
            buffer: [0u8; BLOCK_BYTES],
            buffered: 0,
            length: 0,
        }
    }

    /// Append input
    pub fn update(&mut self, data: &[u8]) {
        self.length = self.length.wrapping_add(data.len() as u128);
        let mut input = data;

        if self.buffered > 0 {
            let n = std::cmp::min(BLOCK_BYTES - self.buffered, input.len());
            self.buffer[self.buffered..self.buffered + n].copy_from_slice(&input[..n]);
            self.buffered += n;
            input = &input[n..];
            if self.buffered < BLOCK_BYTES {
                return;
            }
            let block = self.buffer;
            compress(&mut self.state, &block);
            self.buffered = 0;
        }

        let mut blocks = input.chunks_exact(BLOCK_BYTES);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }
        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Apply padding and produce the digest
    pub fn finalize(mut self) -> RawDigest {
        let bit_len = self.length.wrapping_mul(8);

        let mut tail = [0u8; BLOCK_BYTES * 2];
        tail[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        tail[self.buffered] = 0x80;
        // 16 bytes at the end of the last block are reserved for the length
        let total = if self.buffered + 1 + 16 <= BLOCK_BYTES {
            BLOCK_BYTES
        } else {
            BLOCK_BYTES * 2
        };
        BigEndian::write_u128(&mut tail[total - 16..total], bit_len);
        for block in tail[..total].chunks_exact(BLOCK_BYTES) {
            compress(&mut self.state, block);
        }

        let mut out = [0u8; DIGEST_BYTES];
        BigEndian::write_u64_into(&self.state[..4], &mut out);
        RawDigest(out)
    }
}

fn compress(state: &mut [u64; 8], block: &[u8]) {
    let mut w = [0u64; 80];
    BigEndian::read_u64_into(block, &mut w[..16]);
    for t in 16..80 {
        let s0 = w[t - 15].rotate_right(1) ^ w[t - 15].rotate_right(8) ^ (w[t - 15] >> 7);
        let s1 = w[t - 2].rotate_right(19) ^ w[t - 2].rotate_right(61) ^ (w[t - 2] >> 6);
        w[t] = w[t - 16]
            .wrapping_add(s0)
            .wrapping_add(w[t - 7])
            .wrapping_add(s1);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;
    for t in 0..80 {
        let s1 = e.rotate_right(14) ^ e.rotate_right(18) ^ e.rotate_right(41);
        let ch = (e & f) ^ (!e & g);
        let t1 = h
            .wrapping_add(s1)
            .wrapping_add(ch)
            .wrapping_add(K[t])
            .wrapping_add(w[t]);
        let s0 = a.rotate_right(28) ^ a.rotate_right(34) ^ a.rotate_right(39);
        let maj = (a & b) ^ (a & c) ^ (b & c);
        let t2 = s0.wrapping_add(maj);

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
    state[5] = state[5].wrapping_add(f);
    state[6] = state[6].wrapping_add(g);
    state[7] = state[7].wrapping_add(h);
}

/// Calculate SHA-512/256 hash
pub fn sha512_256(data: &[u8]) -> RawDigest {
    let mut hasher = Sha512Trunc256::new();
    hasher.update(data);
    hasher.finalize()
}

/// Calculate SHA-512/256 hash of `prefix ++ data`, the form used for domain separated hashing
pub fn sha512_256_prefixed(prefix: &[u8], data: &[u8]) -> RawDigest {
    let mut hasher = Sha512Trunc256::new();
    hasher.update(prefix);
    hasher.update(data);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;
    use sha2::Digest;

    fn reference(data: &[u8]) -> [u8; 32] {
        let mut hasher = sha2::Sha512_256::new();
        hasher.update(data);
        to_arr(hasher.finalize().as_slice())
    }

    #[test]
    fn should_calculate_empty() {
        assert_eq!(
            sha512_256(b"").0,
            to_32bytes("c672b8d1ef56ed28ab87c3622c5114069bdd3ad7b8f9737498d0c01ecef0967a")
        );
    }

    #[test]
    fn should_calculate_abc() {
        assert_eq!(
            sha512_256(b"abc").0,
            to_32bytes("53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23")
        );
    }

    #[test]
    fn should_calculate_two_block_message() {
        let msg = b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmn\
                    hijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu";
        assert_eq!(msg.len(), 112);
        assert_eq!(
            sha512_256(msg).0,
            to_32bytes("3928e184fb8690f840da3988121d31be65cb9d3ef83ee6146feac861e19b563a")
        );
    }

    #[test]
    fn should_calculate_million_a() {
        let msg = vec![b'a'; 1_000_000];
        assert_eq!(
            sha512_256(&msg).0,
            to_32bytes("9a59a052930187a97038cae692f30708aa6491923ef5194394dc68d56c74fb21")
        );
    }

    #[test]
    fn should_calculate_binary() {
        let data: Vec<u8> = (0..=255u8).cycle().take(768).collect();
        assert_eq!(
            sha512_256(&data).0,
            to_32bytes("88f84a27d653b407bc4c1a06b66cff888558af2700f32bb39ee65ee2675688a9")
        );
    }

    #[test]
    fn should_match_reference_around_block_boundaries() {
        for len in [0usize, 1, 111, 112, 113, 127, 128, 129, 239, 240, 255, 256, 257, 1000] {
            let data: Vec<u8> = (0..len).map(|i| (i * 31 + 7) as u8).collect();
            assert_eq!(sha512_256(&data).0, reference(&data), "length {}", len);
        }
    }

    #[test]
    fn should_hash_same_incrementally() {
        let data: Vec<u8> = (0..1000).map(|i| (i % 251) as u8).collect();
        for split in [0usize, 1, 64, 127, 128, 129, 500, 999, 1000] {
            let mut hasher = Sha512Trunc256::new();
            hasher.update(&data[..split]);
            hasher.update(&data[split..]);
            assert_eq!(hasher.finalize(), sha512_256(&data), "split at {}", split);
        }

        let mut hasher = Sha512Trunc256::new();
        for b in &data {
            hasher.update(&[*b]);
        }
        assert_eq!(hasher.finalize(), sha512_256(&data));
    }

    #[test]
    fn should_hash_prefixed() {
        assert_eq!(sha512_256_prefixed(b"TX", b"data"), sha512_256(b"TXdata"));
    }

    #[test]
    fn should_not_collide_on_short_inputs() {
        let inputs: Vec<&[u8]> = vec![b"", b"a", b"b", b"ab", b"ba", b"\x00", b"\x00\x00"];
        let digests: Vec<RawDigest> = inputs.iter().map(|p| sha512_256(p)).collect();
        for i in 0..digests.len() {
            for j in (i + 1)..digests.len() {
                assert_ne!(digests[i], digests[j]);
            }
        }
    }

    #[test]
    fn quickcheck_matches_reference() {
        fn prop(data: Vec<u8>) -> bool {
            sha512_256(&data).0 == reference(&data)
        }
        quickcheck::quickcheck(prop as fn(Vec<u8>) -> bool);
    }
}
