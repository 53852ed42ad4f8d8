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
use crate::{
    address::AddressError,
    crypto::error::CryptoError,
    mnemonic,
    msgpack,
    transaction,
};
use std::{error, fmt};

/// Any error of the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidAddress(AddressError),
    InvalidMnemonic(mnemonic::Error),
    InvalidTransaction(transaction::Error),
    EncodingFailed(msgpack::Error),
    CryptoFailed(CryptoError),
}

impl std::convert::From<AddressError> for Error {
    fn from(err: AddressError) -> Self {
        Error::InvalidAddress(err)
    }
}

impl std::convert::From<mnemonic::Error> for Error {
    fn from(err: mnemonic::Error) -> Self {
        Error::InvalidMnemonic(err)
    }
}

impl std::convert::From<transaction::Error> for Error {
    fn from(err: transaction::Error) -> Self {
        match err {
            transaction::Error::Encoding(e) => Error::EncodingFailed(e),
            transaction::Error::Crypto(e) => Error::CryptoFailed(e),
            _ => Error::InvalidTransaction(err),
        }
    }
}

impl std::convert::From<msgpack::Error> for Error {
    fn from(err: msgpack::Error) -> Self {
        Error::EncodingFailed(err)
    }
}

impl std::convert::From<CryptoError> for Error {
    fn from(err: CryptoError) -> Self {
        Error::CryptoFailed(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidAddress(ref err) => write!(f, "Invalid address: {}", err),
            Error::InvalidMnemonic(ref err) => write!(f, "Invalid mnemonic: {}", err),
            Error::InvalidTransaction(ref err) => write!(f, "{}", err),
            Error::EncodingFailed(ref err) => write!(f, "Encoding failed: {}", err),
            Error::CryptoFailed(ref err) => write!(f, "Crypto failed: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::InvalidAddress(ref err) => Some(err),
            Error::InvalidMnemonic(ref err) => Some(err),
            Error::InvalidTransaction(ref err) => Some(err),
            Error::EncodingFailed(ref err) => Some(err),
            Error::CryptoFailed(ref err) => Some(err),
        }
    }
}
