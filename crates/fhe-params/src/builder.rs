// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::presets::{BfvParamSet, PresetError};
use fhe::bfv::{BfvParameters, BfvParametersBuilder};
use std::sync::Arc;

pub fn build_bfv_params_from_set_arc(
    param_set: BfvParamSet,
) -> Result<Arc<BfvParameters>, PresetError> {
    build_bfv_params_arc(param_set.degree, param_set.plaintext_modulus, param_set.moduli)
}

pub fn build_bfv_params(
    degree: usize,
    plaintext_modulus: u64,
    moduli: &[u64],
) -> Result<BfvParameters, PresetError> {
    BfvParametersBuilder::new()
        .set_degree(degree)
        .set_plaintext_modulus(plaintext_modulus)
        .set_moduli(moduli)
        .build()
        .map_err(|e| PresetError::InvalidParameters(e.to_string()))
}

/// Same as [`build_bfv_params`] but shares the parameters behind an `Arc`, which is what the
/// key and ciphertext constructors of the `fhe` crate expect.
pub fn build_bfv_params_arc(
    degree: usize,
    plaintext_modulus: u64,
    moduli: &[u64],
) -> Result<Arc<BfvParameters>, PresetError> {
    BfvParametersBuilder::new()
        .set_degree(degree)
        .set_plaintext_modulus(plaintext_modulus)
        .set_moduli(moduli)
        .build_arc()
        .map_err(|e| PresetError::InvalidParameters(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{insecure_512, standard_2048};
    use crate::presets::BfvPreset;

    #[test]
    fn test_build_insecure_params() {
        let params = build_bfv_params(
            insecure_512::DEGREE,
            insecure_512::PLAINTEXT_MODULUS,
            insecure_512::MODULI,
        )
        .unwrap();
        assert_eq!(params.degree(), insecure_512::DEGREE);
        assert_eq!(params.plaintext(), insecure_512::PLAINTEXT_MODULUS);
        assert_eq!(params.moduli(), insecure_512::MODULI);
    }

    #[test]
    fn test_build_standard_params_from_set_arc() {
        let params = build_bfv_params_from_set_arc(BfvPreset::Standard2048.into()).unwrap();
        assert_eq!(params.degree(), standard_2048::DEGREE);
        assert_eq!(params.plaintext(), standard_2048::PLAINTEXT_MODULUS);
        assert_eq!(params.moduli(), standard_2048::MODULI);
    }

    #[test]
    fn test_invalid_degree_is_an_error() {
        let result = build_bfv_params(1000, 1032193, standard_2048::MODULI);
        assert!(matches!(result, Err(PresetError::InvalidParameters(_))));
    }
}
