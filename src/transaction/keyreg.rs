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
//! Participation key registration, `keyreg`

use super::{fields::Fields, Error, TxFields};

/// Participation keys of an online account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participation {
    /// Root voting key
    pub vote_key: [u8; 32],
    /// VRF selection key
    pub selection_key: [u8; 32],
    /// State proof key
    pub state_proof_key: Option<[u8; 64]>,
    /// First round the keys are valid
    pub vote_first: u64,
    /// Last round the keys are valid
    pub vote_last: u64,
    /// Dilution of the two-level voting key
    pub key_dilution: u64,
}

/// Registration of participation keys, or going offline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRegistration {
    /// Keys to register, `None` marks the account offline
    pub participation: Option<Participation>,
    /// Opt out of rewards and participation for good
    pub nonparticipation: bool,
}

impl KeyRegistration {
    /// Mark the account online with the given keys
    pub fn online(participation: Participation) -> Self {
        KeyRegistration {
            participation: Some(participation),
            nonparticipation: false,
        }
    }

    /// Mark the account offline
    pub fn offline() -> Self {
        KeyRegistration::default()
    }

    /// Mark the account as never participating again
    pub fn nonparticipating() -> Self {
        KeyRegistration {
            participation: None,
            nonparticipation: true,
        }
    }
}

impl TxFields for KeyRegistration {
    fn tx_type(&self) -> &'static str {
        "keyreg"
    }

    fn validate(&self) -> Result<(), Error> {
        if let Some(ref p) = self.participation {
            if self.nonparticipation {
                return Err(Error::InvalidTransaction(
                    "nonparticipating account can't register keys".to_string(),
                ));
            }
            if p.vote_first > p.vote_last {
                return Err(Error::InvalidTransaction(format!(
                    "vote first round {} is after vote last round {}",
                    p.vote_first, p.vote_last
                )));
            }
        }
        Ok(())
    }

    fn push_fields(&self, fields: &mut Fields) {
        if let Some(ref p) = self.participation {
            fields
                .digest("votekey", &p.vote_key)
                .digest("selkey", &p.selection_key)
                .opt_digest("sprfkey", p.state_proof_key.as_ref().map(|k| &k[..]))
                .uint("votefst", p.vote_first)
                .uint("votelst", p.vote_last)
                .uint("votekd", p.key_dilution);
        }
        fields.flag("nonpart", self.nonparticipation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msgpack::{Map, Value};

    fn participation() -> Participation {
        Participation {
            vote_key: [1u8; 32],
            selection_key: [2u8; 32],
            state_proof_key: Some([3u8; 64]),
            vote_first: 100,
            vote_last: 200,
            key_dilution: 10,
        }
    }

    fn map_of(tx: &KeyRegistration) -> Map {
        let mut f = Fields::new();
        tx.push_fields(&mut f);
        f.into_map()
    }

    #[test]
    fn should_encode_online() {
        let map = map_of(&KeyRegistration::online(participation()));
        let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["selkey", "sprfkey", "votefst", "votekd", "votekey", "votelst"]
        );
        assert_eq!(map.get("sprfkey").and_then(|v| v.as_bytes()).map(|b| b.len()), Some(64));
    }

    #[test]
    fn should_encode_offline_as_empty() {
        assert!(map_of(&KeyRegistration::offline()).is_empty());
    }

    #[test]
    fn should_encode_nonparticipation() {
        let map = map_of(&KeyRegistration::nonparticipating());
        assert_eq!(map.get("nonpart"), Some(&Value::Bool(true)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn should_validate_vote_rounds() {
        let mut p = participation();
        p.vote_first = 300;
        assert!(KeyRegistration::online(p).validate().is_err());
        assert!(KeyRegistration::online(participation()).validate().is_ok());
    }
}
