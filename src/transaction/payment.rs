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
//! Native currency payment (`pay`)

use super::{fields::Fields, TxFields};
use crate::{address::Address, amount::MicroAlgos};

/// Payment of microalgos to another account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    /// Receiver of the amount
    pub receiver: Address,

    /// Amount to send
    pub amount: MicroAlgos,

    /// Close the sender account and send the remaining balance here
    pub close_remainder_to: Option<Address>,
}

impl Payment {
    /// Plain payment
    pub fn new(receiver: Address, amount: MicroAlgos) -> Self {
        Payment {
            receiver,
            amount,
            close_remainder_to: None,
        }
    }

    /// Close the sender account after paying `amount`
    pub fn with_close_to(mut self, close_to: Address) -> Self {
        self.close_remainder_to = Some(close_to);
        self
    }
}

impl TxFields for Payment {
    fn tx_type(&self) -> &'static str {
        "pay"
    }

    fn push_fields(&self, fields: &mut Fields) {
        fields
            .address("rcv", &self.receiver)
            .amount("amt", self.amount)
            .opt_address("close", self.close_remainder_to.as_ref());
    }
}
