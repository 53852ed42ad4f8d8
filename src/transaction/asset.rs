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
//! Asset transactions: creation and reconfiguration (`acfg`), transfers (`axfer`) and
//! freezing (`afrz`)

use super::{fields::Fields, Error, TxFields};
use crate::{address::Address, msgpack::Map};

/// Longest unit name, in bytes
pub const MAX_UNIT_NAME_BYTES: usize = 8;

/// Longest asset name, in bytes
pub const MAX_ASSET_NAME_BYTES: usize = 32;

/// Longest asset URL, in bytes
pub const MAX_URL_BYTES: usize = 96;

/// Most decimals an asset may declare
pub const MAX_DECIMALS: u32 = 19;

/// Addresses that control an asset after creation. An absent address can never be set
/// later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetControl {
    /// Can reconfigure or destroy the asset
    pub manager: Option<Address>,
    /// Holds non-minted units
    pub reserve: Option<Address>,
    /// Can freeze holdings
    pub freeze: Option<Address>,
    /// Can revoke holdings
    pub clawback: Option<Address>,
}

impl AssetControl {
    /// All four roles given to one account
    pub fn all(address: Address) -> Self {
        AssetControl {
            manager: Some(address),
            reserve: Some(address),
            freeze: Some(address),
            clawback: Some(address),
        }
    }

    /// True when no role has a (non-zero) address, so nothing would be written
    pub fn is_empty(&self) -> bool {
        [&self.manager, &self.reserve, &self.freeze, &self.clawback]
            .iter()
            .all(|a| a.map_or(true, |a| a.is_zero()))
    }

    fn push_fields(&self, fields: &mut Fields) {
        fields
            .opt_address("m", self.manager.as_ref())
            .opt_address("r", self.reserve.as_ref())
            .opt_address("f", self.freeze.as_ref())
            .opt_address("c", self.clawback.as_ref());
    }
}

/// Parameters of a new asset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetParams {
    /// Total units
    pub total: u64,
    /// Digits after the decimal point when displaying units
    pub decimals: u32,
    /// Whether holdings start frozen
    pub default_frozen: bool,
    /// Unit name, e.g. `USDC`
    pub unit_name: String,
    /// Asset name
    pub asset_name: String,
    /// URL with more information
    pub url: String,
    /// Hash of metadata
    pub metadata_hash: Option<[u8; 32]>,
    /// Control addresses
    pub control: AssetControl,
}

impl AssetParams {
    fn validate(&self) -> Result<(), Error> {
        if self.decimals > MAX_DECIMALS {
            return Err(Error::InvalidTransaction(format!(
                "asset decimals {} above {}",
                self.decimals, MAX_DECIMALS
            )));
        }
        let limits = [
            ("unit name", &self.unit_name, MAX_UNIT_NAME_BYTES),
            ("asset name", &self.asset_name, MAX_ASSET_NAME_BYTES),
            ("url", &self.url, MAX_URL_BYTES),
        ];
        for (name, value, max) in limits.iter() {
            if value.len() > *max {
                return Err(Error::InvalidTransaction(format!(
                    "asset {} is {} bytes, max {}",
                    name,
                    value.len(),
                    max
                )));
            }
        }
        Ok(())
    }

    fn to_map(&self) -> Map {
        let mut fields = Fields::new();
        fields
            .uint("t", self.total)
            .uint("dc", self.decimals as u64)
            .flag("df", self.default_frozen)
            .string("un", &self.unit_name)
            .string("an", &self.asset_name)
            .string("au", &self.url)
            .opt_digest("am", self.metadata_hash.as_ref().map(|h| &h[..]));
        self.control.push_fields(&mut fields);
        fields.into_map()
    }
}

/// Creation of a new asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCreate {
    /// Asset parameters
    pub params: AssetParams,
}

impl AssetCreate {
    /// Create an asset with the given parameters
    pub fn new(params: AssetParams) -> Self {
        AssetCreate { params }
    }
}

impl TxFields for AssetCreate {
    fn tx_type(&self) -> &'static str {
        "acfg"
    }

    fn validate(&self) -> Result<(), Error> {
        self.params.validate()
    }

    fn push_fields(&self, fields: &mut Fields) {
        fields.map("apar", self.params.to_map());
    }
}

/// Reconfiguration or destruction of an existing asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Asset to change
    pub asset_id: u64,
    /// New control addresses, `None` destroys the asset
    pub control: Option<AssetControl>,
}

impl AssetConfig {
    /// Replace the control addresses. Addresses left `None` are cleared for good.
    pub fn update(asset_id: u64, control: AssetControl) -> Self {
        AssetConfig {
            asset_id,
            control: Some(control),
        }
    }

    /// Destroy the asset. Only valid when the creator holds all units.
    pub fn destroy(asset_id: u64) -> Self {
        AssetConfig {
            asset_id,
            control: None,
        }
    }
}

impl TxFields for AssetConfig {
    fn tx_type(&self) -> &'static str {
        "acfg"
    }

    fn validate(&self) -> Result<(), Error> {
        if self.asset_id == 0 {
            return Err(Error::InvalidTransaction(
                "asset config requires an asset id".to_string(),
            ));
        }
        // an empty parameter map is dropped, which reads as destroy on the wire
        if let Some(ref control) = self.control {
            if control.is_empty() {
                return Err(Error::InvalidTransaction(
                    "asset config update without any control address, use destroy".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn push_fields(&self, fields: &mut Fields) {
        fields.uint("caid", self.asset_id);
        if let Some(ref control) = self.control {
            let mut apar = Fields::new();
            control.push_fields(&mut apar);
            fields.map("apar", apar.into_map());
        }
    }
}

/// Transfer of asset units. Also used to opt in, opt out, and by the clawback account
/// to revoke units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTransfer {
    /// Asset to transfer
    pub asset_id: u64,
    /// Units to transfer
    pub amount: u64,
    /// Receiver of the units
    pub receiver: Address,
    /// Remove the holding from the sender and send the remaining units here
    pub close_to: Option<Address>,
    /// Account units are taken from, set only by the clawback account
    pub revocation_target: Option<Address>,
}

impl AssetTransfer {
    /// Send units
    pub fn new(asset_id: u64, amount: u64, receiver: Address) -> Self {
        AssetTransfer {
            asset_id,
            amount,
            receiver,
            close_to: None,
            revocation_target: None,
        }
    }

    /// Opt the account in, i.e. zero transfer to itself. `account` must be the sender.
    pub fn opt_in(asset_id: u64, account: Address) -> Self {
        AssetTransfer::new(asset_id, 0, account)
    }

    /// Opt out, sending all remaining units to `close_to`
    pub fn opt_out(asset_id: u64, close_to: Address) -> Self {
        AssetTransfer {
            close_to: Some(close_to),
            ..AssetTransfer::new(asset_id, 0, close_to)
        }
    }

    /// Revoke units from `target`, sent by the clawback account
    pub fn revoke(asset_id: u64, amount: u64, target: Address, receiver: Address) -> Self {
        AssetTransfer {
            revocation_target: Some(target),
            ..AssetTransfer::new(asset_id, amount, receiver)
        }
    }
}

impl TxFields for AssetTransfer {
    fn tx_type(&self) -> &'static str {
        "axfer"
    }

    fn validate(&self) -> Result<(), Error> {
        if self.asset_id == 0 {
            return Err(Error::InvalidTransaction(
                "asset transfer requires an asset id".to_string(),
            ));
        }
        Ok(())
    }

    fn push_fields(&self, fields: &mut Fields) {
        fields
            .uint("xaid", self.asset_id)
            .uint("aamt", self.amount)
            .address("arcv", &self.receiver)
            .opt_address("aclose", self.close_to.as_ref())
            .opt_address("asnd", self.revocation_target.as_ref());
    }
}

/// Freeze or unfreeze the holding of an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFreeze {
    /// Asset to freeze
    pub asset_id: u64,
    /// Account whose holding changes
    pub target: Address,
    /// New frozen state
    pub frozen: bool,
}

impl AssetFreeze {
    pub fn new(asset_id: u64, target: Address, frozen: bool) -> Self {
        AssetFreeze {
            asset_id,
            target,
            frozen,
        }
    }
}

impl TxFields for AssetFreeze {
    fn tx_type(&self) -> &'static str {
        "afrz"
    }

    fn validate(&self) -> Result<(), Error> {
        if self.asset_id == 0 || self.target.is_zero() {
            return Err(Error::InvalidTransaction(
                "asset freeze requires an asset id and a target".to_string(),
            ));
        }
        Ok(())
    }

    fn push_fields(&self, fields: &mut Fields) {
        fields
            .uint("faid", self.asset_id)
            .address("fadd", &self.target)
            .flag("afrz", self.frozen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msgpack::Value;

    fn map_of<T: TxFields>(tx: &T) -> Map {
        let mut f = Fields::new();
        tx.push_fields(&mut f);
        f.into_map()
    }

    #[test]
    fn should_encode_create_params() {
        let creator = Address([5u8; 32]);
        let tx = AssetCreate::new(AssetParams {
            total: 1_000_000,
            decimals: 2,
            unit_name: "TST".to_string(),
            asset_name: "Test".to_string(),
            control: AssetControl {
                manager: Some(creator),
                ..AssetControl::default()
            },
            ..AssetParams::default()
        });
        let map = map_of(&tx);
        let apar = map.get("apar").and_then(|v| v.as_map()).unwrap();
        let keys: Vec<&str> = apar.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["an", "dc", "m", "t", "un"]);
        assert_eq!(apar.get("t"), Some(&Value::Uint(1_000_000)));
    }

    #[test]
    fn should_not_default_controls_to_sender() {
        let tx = AssetCreate::new(AssetParams {
            total: 10,
            ..AssetParams::default()
        });
        let apar = map_of(&tx).get("apar").cloned().unwrap();
        let apar = apar.as_map().unwrap();
        for key in &["m", "r", "f", "c"] {
            assert!(!apar.contains_key(*key));
        }
    }

    #[test]
    fn should_reject_long_unit_name() {
        let tx = AssetCreate::new(AssetParams {
            unit_name: "TOOLONGNAME".to_string(),
            ..AssetParams::default()
        });
        assert!(tx.validate().is_err());
    }

    #[test]
    fn should_reject_too_many_decimals() {
        let tx = AssetCreate::new(AssetParams {
            decimals: 20,
            ..AssetParams::default()
        });
        assert!(tx.validate().is_err());
    }

    #[test]
    fn should_encode_destroy_without_params() {
        let map = map_of(&AssetConfig::destroy(42));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("caid"), Some(&Value::Uint(42)));
    }

    #[test]
    fn should_encode_config_update() {
        let map = map_of(&AssetConfig::update(42, AssetControl::all(Address([1u8; 32]))));
        let apar = map.get("apar").and_then(|v| v.as_map()).unwrap();
        assert_eq!(apar.len(), 4);
    }

    #[test]
    fn should_reject_update_without_addresses() {
        let update = AssetConfig::update(42, AssetControl::default());
        assert!(matches!(update.validate(), Err(Error::InvalidTransaction(_))));

        let zero = AssetConfig::update(
            42,
            AssetControl {
                manager: Some(Address::zero()),
                ..AssetControl::default()
            },
        );
        assert!(zero.validate().is_err());

        let manager_only = AssetConfig::update(
            42,
            AssetControl {
                manager: Some(Address([1u8; 32])),
                ..AssetControl::default()
            },
        );
        assert!(manager_only.validate().is_ok());
        assert!(AssetConfig::destroy(42).validate().is_ok());
    }

    #[test]
    fn should_encode_opt_in_as_zero_transfer() {
        let account = Address([3u8; 32]);
        let map = map_of(&AssetTransfer::opt_in(7, account));
        let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["arcv", "xaid"]);
    }

    #[test]
    fn should_encode_revocation_target() {
        let map = map_of(&AssetTransfer::revoke(
            7,
            5,
            Address([3u8; 32]),
            Address([4u8; 32]),
        ));
        assert!(map.contains_key("asnd"));
        assert_eq!(map.get("aamt"), Some(&Value::Uint(5)));
    }

    #[test]
    fn should_encode_opt_out() {
        let map = map_of(&AssetTransfer::opt_out(7, Address([4u8; 32])));
        assert!(map.contains_key("aclose"));
        assert!(!map.contains_key("aamt"));
    }

    #[test]
    fn should_omit_unfreeze_flag() {
        let frozen = map_of(&AssetFreeze::new(7, Address([3u8; 32]), true));
        assert_eq!(frozen.get("afrz"), Some(&Value::Bool(true)));
        let unfrozen = map_of(&AssetFreeze::new(7, Address([3u8; 32]), false));
        assert!(!unfrozen.contains_key("afrz"));
    }

    #[test]
    fn should_require_asset_id() {
        assert!(AssetTransfer::new(0, 1, Address([1u8; 32])).validate().is_err());
        assert!(AssetConfig::destroy(0).validate().is_err());
        assert!(AssetFreeze::new(0, Address([1u8; 32]), true).validate().is_err());
    }
}
