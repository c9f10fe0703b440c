//! Constants for BFV presets
//!
//! Every preset encodes one plaintext byte per polynomial coefficient, so the plaintext
//! modulus must exceed 255 and the degree bounds the longest input a ciphertext can carry.

/// Insecure preset constants (degree 512) - DO NOT USE IN PRODUCTION
pub mod insecure_512 {
    pub const DEGREE: usize = 512;
    pub const PLAINTEXT_MODULUS: u64 = 0xffffee001;
    pub const MODULI: &[u64] = &[0x7fffffffe0001];
}

/// Standard preset constants (degree 2048)
pub mod standard_2048 {
    pub const DEGREE: usize = 2048;
    pub const PLAINTEXT_MODULUS: u64 = 1032193;
    pub const MODULI: &[u64] = &[0x3FFFFFFF000001];
}

/// Largest byte value a coefficient has to hold
pub const MAX_COEFFICIENT_VALUE: u64 = u8::MAX as u64;
