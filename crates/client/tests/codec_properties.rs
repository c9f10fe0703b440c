// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    hex,
    primitives::{Address, U256},
};
use fhevm_client::{codec, CiphertextHandle, Error, FheType, FheValue};
use proptest::prelude::*;

fn numeric_type() -> impl Strategy<Value = FheType> {
    prop::sample::select(vec![
        FheType::Uint8,
        FheType::Uint16,
        FheType::Uint32,
        FheType::Uint64,
        FheType::Uint128,
        FheType::Uint256,
    ])
}

fn narrow_type() -> impl Strategy<Value = FheType> {
    prop::sample::select(vec![
        FheType::Uint8,
        FheType::Uint16,
        FheType::Uint32,
        FheType::Uint64,
        FheType::Uint128,
    ])
}

fn mask(value: U256, bits: usize) -> U256 {
    if bits >= 256 {
        value
    } else {
        value & ((U256::from(1) << bits) - U256::from(1))
    }
}

proptest! {
    #[test]
    fn uint_round_trip(fhe_type in numeric_type(), raw in any::<[u8; 32]>()) {
        let bits = fhe_type.bit_width().unwrap();
        let value = FheValue::Uint(mask(U256::from_be_bytes(raw), bits));

        let encoded = codec::encode(&value, fhe_type).unwrap();
        prop_assert_eq!(encoded.len(), 32);
        prop_assert_eq!(codec::decode(&encoded, fhe_type).unwrap(), value);
    }

    #[test]
    fn uint_overflow_rejected(fhe_type in narrow_type(), raw in any::<[u8; 32]>()) {
        let bits = fhe_type.bit_width().unwrap();
        let value = U256::from_be_bytes(raw) | (U256::from(1) << bits);

        let encoded = codec::encode(&FheValue::Uint(value), fhe_type);
        prop_assert!(matches!(encoded, Err(Error::Overflow(t)) if t == fhe_type));
        prop_assert!(matches!(
            codec::decode(&value.to_be_bytes::<32>(), fhe_type),
            Err(Error::Overflow(_))
        ));
    }

    #[test]
    fn bool_round_trip(b in any::<bool>()) {
        let encoded = codec::encode(&FheValue::Bool(b), FheType::Bool).unwrap();
        prop_assert_eq!(codec::decode(&encoded, FheType::Bool).unwrap(), FheValue::Bool(b));
    }

    #[test]
    fn address_round_trip(raw in any::<[u8; 20]>()) {
        let value = FheValue::Address(Address::from(raw));
        let encoded = codec::encode(&value, FheType::Address).unwrap();
        prop_assert_eq!(codec::decode(&encoded, FheType::Address).unwrap(), value);
    }

    #[test]
    fn bytes_round_trip(raw in prop::collection::vec(any::<u8>(), 0..256)) {
        let value = FheValue::Bytes(raw);
        let encoded = codec::encode(&value, FheType::Bytes).unwrap();
        prop_assert_eq!(codec::decode(&encoded, FheType::Bytes).unwrap(), value);
    }

    #[test]
    fn hex_strings_parse_to_bytes(raw in prop::collection::vec(any::<u8>(), 0..64)) {
        let plain: FheValue = hex::encode(&raw).parse().unwrap();
        let prefixed: FheValue = hex::encode_prefixed(&raw).parse().unwrap();
        prop_assert_eq!(&plain, &FheValue::Bytes(raw));
        prop_assert_eq!(plain, prefixed);
    }

    #[test]
    fn handle_carries_type_and_chain(
        ciphertext in prop::collection::vec(any::<u8>(), 1..128),
        type_id in 0u8..9,
        chain_id in any::<u64>(),
    ) {
        let fhe_type = FheType::from_id(type_id).unwrap();
        let handle = CiphertextHandle::derive(&ciphertext, fhe_type, chain_id);
        prop_assert_eq!(handle.fhe_type(), Some(fhe_type));
        prop_assert_eq!(handle.chain_id(), chain_id);
        prop_assert_eq!(handle.version(), 0);
    }
}
