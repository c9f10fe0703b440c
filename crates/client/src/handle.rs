// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Error, FheType};
use alloy::primitives::{keccak256, B256};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const HANDLE_VERSION: u8 = 0;

const CHAIN_ID_RANGE: std::ops::Range<usize> = 22..30;
const TYPE_BYTE: usize = 30;
const VERSION_BYTE: usize = 31;

/// 32 byte reference to a ciphertext held by a contract.
///
/// Layout: `keccak256(ciphertext)[0..22] | chain id (u64 BE) | fhe type id | version`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CiphertextHandle(B256);

impl CiphertextHandle {
    pub fn derive(ciphertext: &[u8], fhe_type: FheType, chain_id: u64) -> Self {
        let mut bytes = keccak256(ciphertext).0;
        bytes[CHAIN_ID_RANGE].copy_from_slice(&chain_id.to_be_bytes());
        bytes[TYPE_BYTE] = fhe_type.id();
        bytes[VERSION_BYTE] = HANDLE_VERSION;
        Self(B256::from(bytes))
    }

    /// The type the handle was created for. `None` for handles that do not follow this layout.
    pub fn fhe_type(&self) -> Option<FheType> {
        FheType::from_id(self.0[TYPE_BYTE])
    }

    pub fn chain_id(&self) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.0[CHAIN_ID_RANGE]);
        u64::from_be_bytes(buf)
    }

    pub fn version(&self) -> u8 {
        self.0[VERSION_BYTE]
    }

    pub fn as_b256(&self) -> B256 {
        self.0
    }
}

impl From<B256> for CiphertextHandle {
    fn from(value: B256) -> Self {
        Self(value)
    }
}

impl From<[u8; 32]> for CiphertextHandle {
    fn from(value: [u8; 32]) -> Self {
        Self(B256::from(value))
    }
}

impl From<CiphertextHandle> for B256 {
    fn from(value: CiphertextHandle) -> Self {
        value.0
    }
}

impl FromStr for CiphertextHandle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        B256::from_str(s)
            .map(Self)
            .map_err(|e| Error::MalformedValue(format!("invalid handle '{s}': {e}")))
    }
}

impl fmt::Display for CiphertextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for CiphertextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CiphertextHandle({})", self.0)
    }
}
