// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

pub use fhevm_client::*;

#[cfg(feature = "config")]
pub use fhevm_config as config;

#[cfg(feature = "bfv")]
pub use fhevm_bfv_client as bfv_client;

#[cfg(feature = "bfv")]
pub use fhevm_fhe_params as fhe_params;
