// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::builder::build_bfv_params_from_set_arc;
use crate::constants::{insecure_512, standard_2048};
use fhe::bfv::BfvParameters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error as ThisError;

pub const DEFAULT_BFV_PRESET: BfvPreset = BfvPreset::Standard2048;

/// BFV presets a client can encrypt its inputs under
///
/// The preset has to match the one the key holder (the decryption gateway) generated its
/// keys with, otherwise public keys and ciphertexts will fail to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BfvPreset {
    /// Insecure parameters (degree 512) - DO NOT USE IN PRODUCTION
    ///
    /// Small and fast, meant for tests and local development networks.
    #[serde(rename = "INSECURE_BFV_512")]
    Insecure512,
    /// Standard parameters (degree 2048, single 54 bit modulus)
    #[default]
    #[serde(rename = "STANDARD_BFV_2048")]
    Standard2048,
}

#[derive(ThisError, Debug)]
pub enum PresetError {
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
    #[error("Could not build BFV parameters: {0}")]
    InvalidParameters(String),
}

/// A complete BFV parameter set definition
///
/// Holds every value needed to construct a `BfvParameters` instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BfvParamSet {
    /// Degree of the polynomial ring, must be a power of 2
    pub degree: usize,
    /// Modulus of the plaintext space
    pub plaintext_modulus: u64,
    /// NTT friendly primes making up the ciphertext modulus
    pub moduli: &'static [u64],
}

impl BfvParamSet {
    pub fn build_arc(self) -> Result<Arc<BfvParameters>, PresetError> {
        build_bfv_params_from_set_arc(self)
    }

    /// Longest byte string a single ciphertext can carry.
    ///
    /// One coefficient is reserved for the length prefix.
    pub fn max_input_len(&self) -> usize {
        self.degree - 1
    }
}

impl BfvPreset {
    pub const ALL: [BfvPreset; 2] = [BfvPreset::Insecure512, BfvPreset::Standard2048];

    pub fn from_name(name: &str) -> Result<Self, PresetError> {
        let normalized = name.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "INSECURE_BFV_512" => Ok(Self::Insecure512),
            "STANDARD_BFV_2048" => Ok(Self::Standard2048),
            _ => Err(PresetError::UnknownPreset(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BfvPreset::Insecure512 => "INSECURE_BFV_512",
            BfvPreset::Standard2048 => "STANDARD_BFV_2048",
        }
    }

    pub fn list() -> Vec<&'static str> {
        Self::ALL.iter().map(BfvPreset::name).collect()
    }

    pub fn param_set(&self) -> BfvParamSet {
        (*self).into()
    }
}

impl From<BfvPreset> for BfvParamSet {
    fn from(value: BfvPreset) -> Self {
        match value {
            BfvPreset::Insecure512 => BfvParamSet {
                degree: insecure_512::DEGREE,
                plaintext_modulus: insecure_512::PLAINTEXT_MODULUS,
                moduli: insecure_512::MODULI,
            },
            BfvPreset::Standard2048 => BfvParamSet {
                degree: standard_2048::DEGREE,
                plaintext_modulus: standard_2048::PLAINTEXT_MODULUS,
                moduli: standard_2048::MODULI,
            },
        }
    }
}
