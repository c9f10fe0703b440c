// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Canonical byte encoding of plaintexts before encryption.
//!
//! Booleans take one byte, unsigned integers of every width take 32 big-endian bytes,
//! addresses their 20 raw bytes and byte strings pass through untouched.

use crate::{Error, FheType, FheValue, Result};
use alloy::primitives::{Address, U256};

pub const UINT_ENCODED_LEN: usize = 32;

pub fn encode(value: &FheValue, fhe_type: FheType) -> Result<Vec<u8>> {
    if let Some(bits) = fhe_type.bit_width() {
        let number = match value {
            FheValue::Uint(v) => *v,
            FheValue::Bytes(b) if b.is_empty() => {
                return Err(Error::InvalidLength {
                    fhe_type,
                    expected: UINT_ENCODED_LEN,
                    actual: 0,
                })
            }
            FheValue::Bytes(b) => {
                U256::try_from_be_slice(b).ok_or(Error::Overflow(fhe_type))?
            }
            other => return Err(mismatch(fhe_type, other)),
        };
        ensure_fits(number, bits, fhe_type)?;
        return Ok(number.to_be_bytes::<UINT_ENCODED_LEN>().to_vec());
    }

    match (fhe_type, value) {
        (FheType::Bool, FheValue::Bool(b)) => Ok(vec![*b as u8]),
        (FheType::Address, FheValue::Address(a)) => Ok(a.to_vec()),
        (FheType::Address, FheValue::Bytes(b)) => {
            expect_len(b, 20, fhe_type)?;
            Ok(b.clone())
        }
        (FheType::Bytes, FheValue::Bytes(b)) => Ok(b.clone()),
        (_, other) => Err(mismatch(fhe_type, other)),
    }
}

pub fn decode(bytes: &[u8], fhe_type: FheType) -> Result<FheValue> {
    if let Some(bits) = fhe_type.bit_width() {
        expect_len(bytes, UINT_ENCODED_LEN, fhe_type)?;
        let number = U256::from_be_slice(bytes);
        ensure_fits(number, bits, fhe_type)?;
        return Ok(FheValue::Uint(number));
    }

    match fhe_type {
        FheType::Bool => {
            expect_len(bytes, 1, fhe_type)?;
            match bytes[0] {
                0 => Ok(FheValue::Bool(false)),
                1 => Ok(FheValue::Bool(true)),
                other => Err(Error::MalformedValue(format!(
                    "bool must be encoded as 0 or 1, got {other}"
                ))),
            }
        }
        FheType::Address => {
            expect_len(bytes, 20, fhe_type)?;
            Ok(FheValue::Address(Address::from_slice(bytes)))
        }
        _ => Ok(FheValue::Bytes(bytes.to_vec())),
    }
}

fn ensure_fits(number: U256, bits: usize, fhe_type: FheType) -> Result<()> {
    if number.bit_len() > bits {
        return Err(Error::Overflow(fhe_type));
    }
    Ok(())
}

fn expect_len(bytes: &[u8], expected: usize, fhe_type: FheType) -> Result<()> {
    if bytes.len() != expected {
        return Err(Error::InvalidLength {
            fhe_type,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

fn mismatch(expected: FheType, found: &FheValue) -> Error {
    Error::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const NUMERIC: [FheType; 6] = [
        FheType::Uint8,
        FheType::Uint16,
        FheType::Uint32,
        FheType::Uint64,
        FheType::Uint128,
        FheType::Uint256,
    ];

    #[test]
    fn test_uint_is_32_bytes_big_endian() -> anyhow::Result<()> {
        let encoded = encode(&FheValue::from(0x0102u16), FheType::Uint16)?;
        assert_eq!(encoded.len(), 32);
        assert_eq!(&encoded[30..], &[0x01, 0x02]);
        assert!(encoded[..30].iter().all(|b| *b == 0));
        Ok(())
    }

    #[test]
    fn test_overflow_for_every_width() {
        for fhe_type in NUMERIC {
            let Some(bits) = fhe_type.bit_width() else {
                continue;
            };
            if bits == 256 {
                continue;
            }
            let max = (U256::from(1) << bits) - U256::from(1);
            assert!(encode(&FheValue::Uint(max), fhe_type).is_ok());
            assert!(matches!(
                encode(&FheValue::Uint(max + U256::from(1)), fhe_type),
                Err(Error::Overflow(t)) if t == fhe_type
            ));

            // decoding checks the high bits as well
            let wide = (max + U256::from(1)).to_be_bytes::<32>();
            assert!(matches!(
                decode(&wide, fhe_type),
                Err(Error::Overflow(_))
            ));
        }
    }

    #[test]
    fn test_hex_bytes_as_integer() -> anyhow::Result<()> {
        let value: FheValue = "deadbeef".parse()?;
        assert!(matches!(
            encode(&value, FheType::Uint8),
            Err(Error::Overflow(FheType::Uint8))
        ));
        assert_eq!(
            decode(&encode(&value, FheType::Uint32)?, FheType::Uint32)?,
            FheValue::from(0xdeadbeefu32)
        );
        assert!(matches!(
            encode(&FheValue::Bytes(vec![1; 33]), FheType::Uint256),
            Err(Error::Overflow(FheType::Uint256))
        ));
        Ok(())
    }

    #[test]
    fn test_empty_bytes_are_not_zero() -> anyhow::Result<()> {
        for input in ["0x", ""] {
            let value: FheValue = input.parse()?;
            for fhe_type in NUMERIC {
                assert!(matches!(
                    encode(&value, fhe_type),
                    Err(Error::InvalidLength {
                        fhe_type: t,
                        expected: 32,
                        actual: 0,
                    }) if t == fhe_type
                ));
            }
        }
        Ok(())
    }

    #[test]
    fn test_bool() -> anyhow::Result<()> {
        assert_eq!(encode(&FheValue::Bool(true), FheType::Bool)?, vec![1]);
        assert_eq!(decode(&[0], FheType::Bool)?, FheValue::Bool(false));
        assert!(matches!(
            decode(&[2], FheType::Bool),
            Err(Error::MalformedValue(_))
        ));
        assert!(matches!(
            decode(&[], FheType::Bool),
            Err(Error::InvalidLength { expected: 1, .. })
        ));
        assert!(matches!(
            encode(&FheValue::from(1u8), FheType::Bool),
            Err(Error::TypeMismatch {
                expected: FheType::Bool,
                found: "uint"
            })
        ));
        Ok(())
    }

    #[test]
    fn test_address() -> anyhow::Result<()> {
        let addr = address!("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0");
        let encoded = encode(&FheValue::Address(addr), FheType::Address)?;
        assert_eq!(encoded, addr.to_vec());
        assert_eq!(decode(&encoded, FheType::Address)?, FheValue::Address(addr));
        assert!(matches!(
            encode(&FheValue::Bytes(vec![0; 19]), FheType::Address),
            Err(Error::InvalidLength {
                expected: 20,
                actual: 19,
                ..
            })
        ));
        assert!(matches!(
            decode(&[0; 21], FheType::Address),
            Err(Error::InvalidLength { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_uint_length_checked() {
        assert!(matches!(
            decode(&[0; 31], FheType::Uint64),
            Err(Error::InvalidLength {
                expected: 32,
                actual: 31,
                ..
            })
        ));
    }

    #[test]
    fn test_bytes_passthrough() -> anyhow::Result<()> {
        let raw = vec![0u8, 255, 7];
        assert_eq!(encode(&FheValue::Bytes(raw.clone()), FheType::Bytes)?, raw);
        assert_eq!(decode(&raw, FheType::Bytes)?, FheValue::Bytes(raw));
        assert!(matches!(
            encode(&FheValue::Bool(true), FheType::Bytes),
            Err(Error::TypeMismatch { .. })
        ));
        Ok(())
    }
}
