// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod common;

use alloy::{hex, primitives::U256};
use anyhow::Result;
use common::{config, CHAIN_ID};
use fhevm_client::{
    BfvPrimitive, DecryptionRequest, DecryptionSigner, FheType, FheValue, FhevmClient,
};
use fhevm_fhe_params::BfvPreset;
use fhevm_test_helpers::{shared_key_pair, MockGateway, MockSigner};
use tracing_test::traced_test;

fn bfv() -> BfvPrimitive {
    BfvPrimitive::new(BfvPreset::Insecure512)
}

#[tokio::test]
async fn test_bfv_encrypt_and_user_decrypt() -> Result<()> {
    let (key_pair, secret) = shared_key_pair(&bfv(), [9u8; 32])?;
    let gateway = MockGateway::new(bfv(), secret);
    let client = FhevmClient::builder(
        config()
            .with_fhe_preset(BfvPreset::Insecure512)
            .with_gateway_signer(gateway.signer_address()),
    )
    .gateway(gateway.clone())
    .build()?;
    client.init(Some(key_pair))?;

    let signer = MockSigner::approving();
    let payload = client.encrypt(42u32, FheType::Uint32)?;
    gateway.register(&payload).await;

    let request = DecryptionRequest::new(
        alloy::primitives::Address::repeat_byte(1),
        payload.handle(),
        signer.address(),
    );
    let result = client.user_decrypt(request, &signer).await?;
    assert_eq!(result.value.to_u256(), Some(U256::from(42)));
    assert_eq!(result.handle.chain_id(), CHAIN_ID);
    Ok(())
}

#[test]
fn test_bfv_public_decrypt_with_generated_keys() -> Result<()> {
    let client = FhevmClient::new(config().with_fhe_preset(BfvPreset::Insecure512))?;
    client.init(None)?;

    let address = alloy::primitives::address!("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0");
    let cases = [
        (FheValue::Bool(false), FheType::Bool),
        (FheValue::from(u128::MAX), FheType::Uint128),
        (FheValue::Address(address), FheType::Address),
        (FheValue::Bytes(vec![0, 1, 2, 254, 255]), FheType::Bytes),
    ];
    for (value, fhe_type) in cases {
        let payload = client.encrypt(value.clone(), fhe_type)?;
        assert_eq!(client.public_decrypt(payload.ciphertext(), fhe_type)?, value);
    }
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn test_key_material_and_plaintexts_stay_out_of_logs() -> Result<()> {
    let (key_pair, secret) = shared_key_pair(&bfv(), [11u8; 32])?;
    let secret_hex = hex::encode(&secret[64..96]);
    let gateway = MockGateway::new(bfv(), secret);
    let client = FhevmClient::builder(config().with_fhe_preset(BfvPreset::Insecure512))
        .gateway(gateway.clone())
        .build()?;
    client.init(Some(key_pair))?;

    let signer = MockSigner::approving();
    let payload = client.encrypt(0xC0FFEEu32, FheType::Uint32)?;
    gateway.register(&payload).await;
    let request = DecryptionRequest::new(
        alloy::primitives::Address::repeat_byte(2),
        payload.handle(),
        signer.address(),
    );
    client.user_decrypt(request, &signer).await?;

    assert!(logs_contain("Client initialized"));
    assert!(logs_contain("Decryption resolved"));
    assert!(!logs_contain(&secret_hex));
    assert!(!logs_contain("c0ffee"));
    assert!(!logs_contain("12648430"));
    Ok(())
}
