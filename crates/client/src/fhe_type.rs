// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Encrypted types a contract can receive. The numeric ids are wire values and are embedded
/// in every ciphertext handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum FheType {
    Bool = 0,
    Uint8 = 1,
    Uint16 = 2,
    Uint32 = 3,
    Uint64 = 4,
    Uint128 = 5,
    Uint256 = 6,
    Address = 7,
    Bytes = 8,
}

impl FheType {
    pub const ALL: [FheType; 9] = [
        FheType::Bool,
        FheType::Uint8,
        FheType::Uint16,
        FheType::Uint32,
        FheType::Uint64,
        FheType::Uint128,
        FheType::Uint256,
        FheType::Address,
        FheType::Bytes,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Width in bits of the unsigned integer types
    pub fn bit_width(self) -> Option<usize> {
        match self {
            FheType::Uint8 => Some(8),
            FheType::Uint16 => Some(16),
            FheType::Uint32 => Some(32),
            FheType::Uint64 => Some(64),
            FheType::Uint128 => Some(128),
            FheType::Uint256 => Some(256),
            FheType::Bool | FheType::Address | FheType::Bytes => None,
        }
    }

    /// Length of the canonical encoding, `None` for variable length byte strings
    pub fn encoded_len(self) -> Option<usize> {
        match self {
            FheType::Bool => Some(1),
            FheType::Address => Some(20),
            FheType::Bytes => None,
            _ => Some(32),
        }
    }

    pub fn is_numeric(self) -> bool {
        self.bit_width().is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            FheType::Bool => "bool",
            FheType::Uint8 => "uint8",
            FheType::Uint16 => "uint16",
            FheType::Uint32 => "uint32",
            FheType::Uint64 => "uint64",
            FheType::Uint128 => "uint128",
            FheType::Uint256 => "uint256",
            FheType::Address => "address",
            FheType::Bytes => "bytes",
        }
    }
}

impl fmt::Display for FheType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable() {
        for (id, fhe_type) in FheType::ALL.iter().enumerate() {
            assert_eq!(fhe_type.id() as usize, id);
            assert_eq!(FheType::from_id(id as u8), Some(*fhe_type));
        }
        assert_eq!(FheType::from_id(9), None);
        assert_eq!(FheType::from_id(u8::MAX), None);
    }

    #[test]
    fn test_widths() {
        assert_eq!(FheType::Uint8.bit_width(), Some(8));
        assert_eq!(FheType::Uint256.bit_width(), Some(256));
        assert_eq!(FheType::Bool.bit_width(), None);
        assert_eq!(FheType::Uint16.encoded_len(), Some(32));
        assert_eq!(FheType::Address.encoded_len(), Some(20));
        assert_eq!(FheType::Bytes.encoded_len(), None);
    }

    #[test]
    fn test_serde_names() -> anyhow::Result<()> {
        assert_eq!(serde_json::to_string(&FheType::Uint64)?, "\"uint64\"");
        assert_eq!(
            serde_json::from_str::<FheType>("\"address\"")?,
            FheType::Address
        );
        Ok(())
    }
}
