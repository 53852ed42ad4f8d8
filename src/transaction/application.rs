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
//! Application (smart contract) calls, `appl`

use super::{fields::Fields, Error, TxFields};
use crate::{
    address::Address,
    msgpack::{Map, Value},
};

/// Most arguments an application call may pass
pub const MAX_APP_ARGS: usize = 16;

/// Most accounts, applications, assets and boxes referenced together
pub const MAX_APP_REFERENCES: usize = 8;

/// Most extra program pages
pub const MAX_EXTRA_PAGES: u32 = 3;

/// What happens to the application after the call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnCompletion {
    /// Nothing besides running the approval program
    #[default]
    NoOp = 0,
    /// Allocate local state for the sender
    OptIn = 1,
    /// Remove local state of the sender
    CloseOut = 2,
    /// Remove local state even when the program rejects
    ClearState = 3,
    /// Replace the programs
    UpdateApplication = 4,
    /// Delete the application
    DeleteApplication = 5,
}

impl OnCompletion {
    /// Value on the wire
    pub fn code(&self) -> u64 {
        *self as u64
    }
}

/// Storage reserved for application state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateSchema {
    /// Number of integer values
    pub num_uint: u64,
    /// Number of byte-slice values
    pub num_byte_slice: u64,
}

impl StateSchema {
    pub fn new(num_uint: u64, num_byte_slice: u64) -> Self {
        StateSchema {
            num_uint,
            num_byte_slice,
        }
    }

    fn to_map(&self) -> Map {
        let mut fields = Fields::new();
        fields
            .uint("nui", self.num_uint)
            .uint("nbs", self.num_byte_slice);
        fields.into_map()
    }
}

/// Box the call may access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxReference {
    /// Index into foreign applications, `0` is the called application
    pub app_index: u64,
    /// Box name
    pub name: Vec<u8>,
}

impl BoxReference {
    fn to_value(&self) -> Value {
        let mut fields = Fields::new();
        fields.uint("i", self.app_index).bytes("n", &self.name);
        Value::Map(fields.into_map())
    }
}

/// Call of an application, or its creation when `app_id` is `0`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationCall {
    /// Application to call, `0` to create
    pub app_id: u64,
    /// Action after the call
    pub on_complete: OnCompletion,
    /// Approval program, on create and update
    pub approval_program: Option<Vec<u8>>,
    /// Clear-state program, on create and update
    pub clear_program: Option<Vec<u8>>,
    /// Global state schema, on create
    pub global_schema: Option<StateSchema>,
    /// Local state schema, on create
    pub local_schema: Option<StateSchema>,
    /// Arguments
    pub args: Vec<Vec<u8>>,
    /// Accounts the program may access
    pub accounts: Vec<Address>,
    /// Applications the program may access
    pub foreign_apps: Vec<u64>,
    /// Assets the program may access
    pub foreign_assets: Vec<u64>,
    /// Boxes the program may access
    pub boxes: Vec<BoxReference>,
    /// Extra program pages, on create
    pub extra_pages: u32,
}

impl ApplicationCall {
    /// Create a new application
    pub fn create(
        approval_program: Vec<u8>,
        clear_program: Vec<u8>,
        global_schema: StateSchema,
        local_schema: StateSchema,
    ) -> Self {
        ApplicationCall {
            approval_program: Some(approval_program),
            clear_program: Some(clear_program),
            global_schema: Some(global_schema),
            local_schema: Some(local_schema),
            ..ApplicationCall::default()
        }
    }

    /// Call an existing application
    pub fn call(app_id: u64, args: Vec<Vec<u8>>) -> Self {
        ApplicationCall {
            app_id,
            args,
            ..ApplicationCall::default()
        }
    }

    fn with_completion(app_id: u64, on_complete: OnCompletion) -> Self {
        ApplicationCall {
            app_id,
            on_complete,
            ..ApplicationCall::default()
        }
    }

    pub fn opt_in(app_id: u64) -> Self {
        ApplicationCall::with_completion(app_id, OnCompletion::OptIn)
    }

    pub fn close_out(app_id: u64) -> Self {
        ApplicationCall::with_completion(app_id, OnCompletion::CloseOut)
    }

    pub fn clear_state(app_id: u64) -> Self {
        ApplicationCall::with_completion(app_id, OnCompletion::ClearState)
    }

    pub fn delete(app_id: u64) -> Self {
        ApplicationCall::with_completion(app_id, OnCompletion::DeleteApplication)
    }

    /// Replace programs of an existing application
    pub fn update(app_id: u64, approval_program: Vec<u8>, clear_program: Vec<u8>) -> Self {
        ApplicationCall {
            approval_program: Some(approval_program),
            clear_program: Some(clear_program),
            ..ApplicationCall::with_completion(app_id, OnCompletion::UpdateApplication)
        }
    }

    fn invalid(msg: &str) -> Error {
        Error::InvalidTransaction(msg.to_string())
    }
}

impl TxFields for ApplicationCall {
    fn tx_type(&self) -> &'static str {
        "appl"
    }

    fn validate(&self) -> Result<(), Error> {
        let has_programs = self.approval_program.is_some() && self.clear_program.is_some();
        if self.app_id == 0 && !has_programs {
            return Err(ApplicationCall::invalid(
                "application create requires both programs",
            ));
        }
        if self.on_complete == OnCompletion::UpdateApplication && !has_programs {
            return Err(ApplicationCall::invalid(
                "application update requires both programs",
            ));
        }
        if self.app_id != 0
            && self.on_complete != OnCompletion::UpdateApplication
            && (self.approval_program.is_some() || self.clear_program.is_some())
        {
            return Err(ApplicationCall::invalid(
                "programs can be set only on create or update",
            ));
        }
        if self.app_id != 0
            && (self.global_schema.is_some() || self.local_schema.is_some() || self.extra_pages != 0)
        {
            return Err(ApplicationCall::invalid(
                "schema and extra pages can be set only on create",
            ));
        }
        if self.args.len() > MAX_APP_ARGS {
            return Err(Error::InvalidTransaction(format!(
                "{} application args, max {}",
                self.args.len(),
                MAX_APP_ARGS
            )));
        }
        let refs = self.accounts.len()
            + self.foreign_apps.len()
            + self.foreign_assets.len()
            + self.boxes.len();
        if refs > MAX_APP_REFERENCES {
            return Err(Error::InvalidTransaction(format!(
                "{} application references, max {}",
                refs, MAX_APP_REFERENCES
            )));
        }
        if self.extra_pages > MAX_EXTRA_PAGES {
            return Err(Error::InvalidTransaction(format!(
                "{} extra pages, max {}",
                self.extra_pages, MAX_EXTRA_PAGES
            )));
        }
        Ok(())
    }

    fn push_fields(&self, fields: &mut Fields) {
        fields
            .uint("apid", self.app_id)
            .uint("apan", self.on_complete.code())
            .opt_bytes("apap", self.approval_program.as_deref())
            .opt_bytes("apsu", self.clear_program.as_deref())
            .map(
                "apgs",
                self.global_schema.map(|s| s.to_map()).unwrap_or_default(),
            )
            .map(
                "apls",
                self.local_schema.map(|s| s.to_map()).unwrap_or_default(),
            )
            .array(
                "apaa",
                self.args.iter().map(|a| Value::Bytes(a.clone())).collect(),
            )
            .array(
                "apat",
                self.accounts.iter().map(|a| Value::Bytes(a.0.to_vec())).collect(),
            )
            .array(
                "apfa",
                self.foreign_apps.iter().map(|id| Value::Uint(*id)).collect(),
            )
            .array(
                "apas",
                self.foreign_assets.iter().map(|id| Value::Uint(*id)).collect(),
            )
            .array("apbx", self.boxes.iter().map(|b| b.to_value()).collect())
            .uint("apep", self.extra_pages as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(tx: &ApplicationCall) -> Map {
        let mut f = Fields::new();
        tx.push_fields(&mut f);
        f.into_map()
    }

    #[test]
    fn should_encode_create() {
        let tx = ApplicationCall::create(
            vec![0x06, 0x81, 0x01],
            vec![0x06, 0x81, 0x01],
            StateSchema::new(1, 0),
            StateSchema::default(),
        );
        assert!(tx.validate().is_ok());
        let map = map_of(&tx);
        let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["apap", "apgs", "apsu"]);
        let apgs = map.get("apgs").and_then(|v| v.as_map()).unwrap();
        assert_eq!(apgs.get("nui"), Some(&Value::Uint(1)));
        assert!(!apgs.contains_key("nbs"));
    }

    #[test]
    fn should_encode_completion_codes() {
        assert_eq!(OnCompletion::NoOp.code(), 0);
        assert_eq!(OnCompletion::DeleteApplication.code(), 5);
        let map = map_of(&ApplicationCall::opt_in(12));
        assert_eq!(map.get("apan"), Some(&Value::Uint(1)));
        let map = map_of(&ApplicationCall::call(12, vec![]));
        assert!(!map.contains_key("apan"));
    }

    #[test]
    fn should_encode_references() {
        let tx = ApplicationCall {
            accounts: vec![Address([1u8; 32])],
            foreign_apps: vec![99],
            boxes: vec![BoxReference {
                app_index: 0,
                name: b"box".to_vec(),
            }],
            ..ApplicationCall::call(12, vec![b"arg".to_vec(), vec![]])
        };
        assert!(tx.validate().is_ok());
        let map = map_of(&tx);
        assert_eq!(
            map.get("apaa"),
            Some(&Value::Array(vec![
                Value::Bytes(b"arg".to_vec()),
                Value::Bytes(vec![])
            ]))
        );
        assert_eq!(map.get("apfa"), Some(&Value::Array(vec![Value::Uint(99)])));
        let boxes = map.get("apbx").and_then(|v| v.as_array()).unwrap();
        let entry = boxes[0].as_map().unwrap();
        assert!(!entry.contains_key("i"));
        assert_eq!(entry.get("n"), Some(&Value::Bytes(b"box".to_vec())));
    }

    #[test]
    fn should_require_programs_on_create() {
        let tx = ApplicationCall {
            approval_program: Some(vec![1]),
            ..ApplicationCall::default()
        };
        assert!(tx.validate().is_err());
    }

    #[test]
    fn should_reject_programs_on_plain_call() {
        let tx = ApplicationCall {
            approval_program: Some(vec![1]),
            ..ApplicationCall::call(5, vec![])
        };
        assert!(tx.validate().is_err());
        assert!(ApplicationCall::update(5, vec![1], vec![1]).validate().is_ok());
    }

    #[test]
    fn should_limit_references() {
        let tx = ApplicationCall {
            foreign_assets: (1..=9).collect(),
            ..ApplicationCall::call(5, vec![])
        };
        assert!(tx.validate().is_err());
    }

    #[test]
    fn should_limit_args() {
        let tx = ApplicationCall::call(5, vec![vec![1]; MAX_APP_ARGS + 1]);
        assert!(tx.validate().is_err());
    }
}
