// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod client_config;
pub mod load_config;
pub mod rpc;

pub use client_config::*;
pub use load_config::load_config;
pub use rpc::*;
