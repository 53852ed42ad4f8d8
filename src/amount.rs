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
//! # Native currency amounts
//!
//! Amounts are counted in microalgos, the smallest unit. Arithmetic wraps like the
//! underlying `u64`, validating against balances is left to the caller.

use std::{fmt, ops};

/// Microalgos in one algo
pub const MICROALGOS_PER_ALGO: u64 = 1_000_000;

/// Amount of the native currency, in microalgos
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MicroAlgos(pub u64);

impl MicroAlgos {
    /// Amount of whole algos
    pub fn from_algos(algos: u64) -> Self {
        MicroAlgos(algos.wrapping_mul(MICROALGOS_PER_ALGO))
    }

    /// Amount in algos, for display
    pub fn to_algos(&self) -> f64 {
        self.0 as f64 / MICROALGOS_PER_ALGO as f64
    }

    /// Raw value in microalgos
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Check if it's zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for MicroAlgos {
    fn from(v: u64) -> Self {
        MicroAlgos(v)
    }
}

impl From<MicroAlgos> for u64 {
    fn from(v: MicroAlgos) -> Self {
        v.0
    }
}

impl ops::Add for MicroAlgos {
    type Output = MicroAlgos;

    fn add(self, rhs: MicroAlgos) -> MicroAlgos {
        MicroAlgos(self.0.wrapping_add(rhs.0))
    }
}

impl ops::Sub for MicroAlgos {
    type Output = MicroAlgos;

    fn sub(self, rhs: MicroAlgos) -> MicroAlgos {
        MicroAlgos(self.0.wrapping_sub(rhs.0))
    }
}

impl ops::Mul<u64> for MicroAlgos {
    type Output = MicroAlgos;

    fn mul(self, rhs: u64) -> MicroAlgos {
        MicroAlgos(self.0.wrapping_mul(rhs))
    }
}

/// Panics on division by zero, same as `u64`
impl ops::Div<u64> for MicroAlgos {
    type Output = MicroAlgos;

    fn div(self, rhs: u64) -> MicroAlgos {
        MicroAlgos(self.0 / rhs)
    }
}

impl fmt::Display for MicroAlgos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.{:06}",
            self.0 / MICROALGOS_PER_ALGO,
            self.0 % MICROALGOS_PER_ALGO
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_algos() {
        assert_eq!(MicroAlgos::from_algos(5), MicroAlgos(5_000_000));
        assert_eq!(MicroAlgos(2_500_000).to_algos(), 2.5);
        assert_eq!(MicroAlgos(1).to_algos(), 0.000001);
    }

    #[test]
    fn should_do_arithmetic() {
        let a = MicroAlgos(1000);
        let b = MicroAlgos(250);
        assert_eq!(a + b, MicroAlgos(1250));
        assert_eq!(a - b, MicroAlgos(750));
        assert_eq!(a * 3, MicroAlgos(3000));
        assert_eq!(a / 4, MicroAlgos(250));
    }

    #[test]
    fn should_wrap_around() {
        assert_eq!(MicroAlgos(0) - MicroAlgos(1), MicroAlgos(u64::MAX));
        assert_eq!(MicroAlgos(u64::MAX) + MicroAlgos(1), MicroAlgos(0));
    }

    #[test]
    fn should_display_as_algos() {
        assert_eq!(MicroAlgos(5_000_000).to_string(), "5.000000");
        assert_eq!(MicroAlgos(1_234_567).to_string(), "1.234567");
        assert_eq!(MicroAlgos(1).to_string(), "0.000001");
    }
}
