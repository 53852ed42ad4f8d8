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
//! # Util functions module

mod base32;

pub use self::base32::{base32_decode, base32_encode};

/// Convert a slice into array
pub fn to_arr<A, T>(slice: &[T]) -> A
where
    A: AsMut<[T]> + Default,
    T: Clone,
{
    let mut arr = Default::default();
    <A as AsMut<[T]>>::as_mut(&mut arr).clone_from_slice(slice);
    arr
}

/// Check that every byte of the slice is zero
pub fn is_zero(data: &[u8]) -> bool {
    data.iter().all(|b| *b == 0)
}

#[cfg(test)]
pub use self::tests::*;

#[cfg(test)]
mod tests {
    use super::*;

    pub fn to_32bytes(hex: &str) -> [u8; 32] {
        to_arr(&hex::decode(hex).unwrap())
    }

    pub fn to_64bytes(hex: &str) -> [u8; 64] {
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&hex::decode(hex).unwrap());
        arr
    }

    #[test]
    fn should_convert_key_into_32bytes() {
        assert_eq!(
            to_32bytes("fa384e6fe915747cd13faa1022044b0def5e6bec4238bec53166487a5cca569f"),
            [
                0xfa, 0x38, 0x4e, 0x6f, 0xe9, 0x15, 0x74, 0x7c, 0xd1, 0x3f, 0xaa, 0x10, 0x22,
                0x04, 0x4b, 0x0d, 0xef, 0x5e, 0x6b, 0xec, 0x42, 0x38, 0xbe, 0xc5, 0x31, 0x66,
                0x48, 0x7a, 0x5c, 0xca, 0x56, 0x9f
            ]
        );
    }

    #[test]
    fn should_detect_zero_bytes() {
        assert!(is_zero(&[]));
        assert!(is_zero(&[0u8; 32]));
        assert!(!is_zero(&[0, 0, 1]));
    }
}
