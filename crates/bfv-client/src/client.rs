// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::secret_key::SecretKeySerializer;
use crate::{
    decode_coefficients_to_bytes, decode_plaintext_to_vec_u64, encode_bytes_to_coefficients,
};
use anyhow::{anyhow, Result};
use fhe::bfv::{Ciphertext, Encoding, Plaintext, PublicKey, SecretKey};
use fhe::Error as FheError;
use fhe_traits::{DeserializeParametrized, FheDecrypter, FheEncoder, FheEncrypter, Serialize};
use fhevm_fhe_params::BfvParamSet;
use rand::thread_rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use zeroize::Zeroizing;

/// Generate a BFV key pair from a 32 byte seed
///
/// # Arguments
/// * `param_set` - BFV parameters the keys are generated under
/// * `seed` - Seed for the ChaCha20 generator, callers must take it from a CSPRNG
///
/// # Returns
/// * `Result<(Vec<u8>, Zeroizing<Vec<u8>>)>` - Serialized public key and secret key
pub fn bfv_generate_keys(
    param_set: BfvParamSet,
    seed: [u8; 32],
) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
    let params = param_set.build_arc()?;
    let mut rng = ChaCha20Rng::from_seed(seed);

    let sk = SecretKey::random(&params, &mut rng);
    let pk = PublicKey::new(&sk, &mut rng);

    Ok((pk.to_bytes(), SecretKeySerializer::to_bytes(&sk)?))
}

/// Encrypt some bytes using BFV homomorphic encryption
///
/// # Arguments
/// * `data` - The bytes to encrypt
/// * `public_key` - Serialized BFV public key bytes
/// * `param_set` - BFV parameters the public key was generated under
///
/// # Returns
/// * `Result<Vec<u8>>` - Serialized BFV ciphertext bytes
///
/// # Errors
/// Returns error if:
/// - The input is longer than the parameters can carry
/// - Public key deserialization fails
/// - Plaintext encoding fails
/// - Encryption fails
pub fn bfv_encrypt(data: &[u8], public_key: &[u8], param_set: BfvParamSet) -> Result<Vec<u8>> {
    let params = param_set.build_arc()?;
    let coefficients = encode_bytes_to_coefficients(data, param_set.max_input_len())?;

    let pk = PublicKey::from_bytes(public_key, &params)
        .map_err(|e| anyhow!("Error deserializing public key: {e}"))?;

    let pt = Plaintext::try_encode(&coefficients, Encoding::poly(), &params)
        .map_err(|e: FheError| anyhow!("Error encoding plaintext: {e}"))?;

    let ct = pk
        .try_encrypt(&pt, &mut thread_rng())
        .map_err(|e| anyhow!("Error encrypting data: {e}"))?;

    Ok(ct.to_bytes())
}

/// Decrypt a ciphertext produced by [`bfv_encrypt`]
///
/// # Arguments
/// * `ciphertext` - Serialized BFV ciphertext bytes
/// * `secret_key` - Secret key bytes as produced by [`bfv_generate_keys`]
/// * `param_set` - BFV parameters the key was generated under
///
/// # Returns
/// * `Result<Zeroizing<Vec<u8>>>` - The decrypted bytes
pub fn bfv_decrypt(
    ciphertext: &[u8],
    secret_key: &[u8],
    param_set: BfvParamSet,
) -> Result<Zeroizing<Vec<u8>>> {
    let params = param_set.build_arc()?;

    let sk = SecretKeySerializer::from_bytes(secret_key, &params)
        .map_err(|e| anyhow!("Error deserializing secret key: {e}"))?;

    let ct = Ciphertext::from_bytes(ciphertext, &params)
        .map_err(|e| anyhow!("Error deserializing ciphertext: {e}"))?;

    let pt = sk
        .try_decrypt(&ct)
        .map_err(|e| anyhow!("Error decrypting data: {e}"))?;

    let coefficients = Zeroizing::new(decode_plaintext_to_vec_u64(&pt)?);
    Ok(Zeroizing::new(decode_coefficients_to_bytes(&coefficients)?))
}
