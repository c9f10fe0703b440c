// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

pub mod client;
mod secret_key;

use fhe::bfv::{Encoding, Plaintext};
use fhe_traits::FheDecoder;
use thiserror::Error as ThisError;

pub use client::{bfv_decrypt, bfv_encrypt, bfv_generate_keys};

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Plaintext decoding failed")]
    PlaintextDecodeFailed,
    #[error("Input was not encoded correctly")]
    BadEncoding,
    #[error("Input of {len} bytes exceeds the {max} bytes a ciphertext can carry")]
    InputTooLong { len: usize, max: usize },
}

/// Result that returns a type T or a BfvClientError
type Result<T> = std::result::Result<T, Error>;

/// Spread bytes over polynomial coefficients, one byte per coefficient, behind a length
/// prefix held in the first coefficient.
pub fn encode_bytes_to_coefficients(bytes: &[u8], max_len: usize) -> Result<Vec<u64>> {
    if bytes.len() > max_len {
        return Err(Error::InputTooLong {
            len: bytes.len(),
            max: max_len,
        });
    }

    let mut coefficients = Vec::with_capacity(bytes.len() + 1);
    coefficients.push(bytes.len() as u64);
    coefficients.extend(bytes.iter().map(|b| *b as u64));
    Ok(coefficients)
}

/// Inverse of [`encode_bytes_to_coefficients`]
pub fn decode_coefficients_to_bytes(coefficients: &[u64]) -> Result<Vec<u8>> {
    let (len, rest) = coefficients.split_first().ok_or(Error::BadEncoding)?;
    let len = usize::try_from(*len).map_err(|_| Error::BadEncoding)?;
    if len > rest.len() {
        return Err(Error::BadEncoding);
    }

    rest[..len]
        .iter()
        .map(|c| u8::try_from(*c).map_err(|_| Error::BadEncoding))
        .collect()
}

/// Decode Plaintext to a Vec<u64>
pub fn decode_plaintext_to_vec_u64(value: &Plaintext) -> Result<Vec<u64>> {
    let decoded = Vec::<u64>::try_decode(value, Encoding::poly())
        .map_err(|_| Error::PlaintextDecodeFailed)?;

    Ok(decoded)
}
