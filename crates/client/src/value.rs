// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Error, FheType};
use alloy::{
    hex,
    primitives::{Address, U256},
};
use std::str::FromStr;

/// A plaintext that goes into an encryption or comes out of a decryption.
///
/// The value carries no width of its own, the [`FheType`] it is encoded as decides whether
/// it fits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FheValue {
    Bool(bool),
    Uint(U256),
    Address(Address),
    Bytes(Vec<u8>),
}

impl FheValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FheValue::Bool(_) => "bool",
            FheValue::Uint(_) => "uint",
            FheValue::Address(_) => "address",
            FheValue::Bytes(_) => "bytes",
        }
    }

    /// Numeric view of the value. Byte strings up to 32 bytes read as big-endian integers.
    pub fn to_u256(&self) -> Option<U256> {
        match self {
            FheValue::Bool(b) => Some(U256::from(*b as u8)),
            FheValue::Uint(v) => Some(*v),
            FheValue::Address(a) => Some(U256::from_be_slice(a.as_slice())),
            FheValue::Bytes(b) => U256::try_from_be_slice(b),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FheValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            FheValue::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FheValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// True when the value can be encoded as `fhe_type`
    pub fn fits(&self, fhe_type: FheType) -> bool {
        crate::codec::encode(self, fhe_type).is_ok()
    }
}

impl From<bool> for FheValue {
    fn from(value: bool) -> Self {
        FheValue::Bool(value)
    }
}

macro_rules! impl_from_uint {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FheValue {
                fn from(value: $t) -> Self {
                    FheValue::Uint(U256::from(value))
                }
            }
        )*
    };
}

impl_from_uint!(u8, u16, u32, u64, u128);

impl From<U256> for FheValue {
    fn from(value: U256) -> Self {
        FheValue::Uint(value)
    }
}

impl From<Address> for FheValue {
    fn from(value: Address) -> Self {
        FheValue::Address(value)
    }
}

impl From<Vec<u8>> for FheValue {
    fn from(value: Vec<u8>) -> Self {
        FheValue::Bytes(value)
    }
}

impl From<&[u8]> for FheValue {
    fn from(value: &[u8]) -> Self {
        FheValue::Bytes(value.to_vec())
    }
}

/// Hex strings, with or without `0x`, parse into [`FheValue::Bytes`]
impl FromStr for FheValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s.trim())
            .map(FheValue::Bytes)
            .map_err(|e| Error::MalformedValue(format!("'{s}' is not a hex string: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_conversions() {
        assert_eq!(FheValue::from(true), FheValue::Bool(true));
        assert_eq!(FheValue::from(42u32), FheValue::Uint(U256::from(42)));
        assert_eq!(
            FheValue::from(u128::MAX).to_u256(),
            Some(U256::from(u128::MAX))
        );
        assert_eq!(
            FheValue::from(&[1u8, 2][..]),
            FheValue::Bytes(vec![1, 2])
        );
    }

    #[test]
    fn test_parse_hex() -> anyhow::Result<()> {
        let value: FheValue = "deadbeef".parse()?;
        assert_eq!(value, FheValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef]));
        assert_eq!("0xDEADBEEF".parse::<FheValue>()?, value);
        assert_eq!(value.to_u256(), Some(U256::from(0xdeadbeefu64)));

        let err = "not hex".parse::<FheValue>().unwrap_err();
        assert!(matches!(err, Error::MalformedValue(_)));
        Ok(())
    }

    #[test]
    fn test_numeric_view() {
        let addr = address!("0x0000000000000000000000000000000000000101");
        assert_eq!(FheValue::Address(addr).to_u256(), Some(U256::from(257)));
        assert_eq!(FheValue::Bool(true).to_u256(), Some(U256::from(1)));
        assert_eq!(FheValue::Bytes(vec![0xff; 33]).to_u256(), None);
        assert!(FheValue::from(255u16).fits(FheType::Uint8));
        assert!(!FheValue::from(256u16).fits(FheType::Uint8));
    }
}
