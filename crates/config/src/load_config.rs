// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::ClientConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use path_clean::clean;
use std::{env, fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "fhevm.config.yaml";
pub const ENV_PREFIX: &str = "FHEVM_";
/// Keys `FHEVM_*` variables may override, anything else under the prefix is ignored
pub const ENV_KEYS: [&str; 6] = [
    "provider_url",
    "chain_id",
    "gateway_url",
    "acl_address",
    "gateway_signer",
    "fhe_preset",
];

pub type FindInParent = fn(&PathBuf, &str) -> Option<PathBuf>;

pub fn find_in_parent(path: &PathBuf, filename: &str) -> Option<PathBuf> {
    let mut current = PathBuf::from(path);

    loop {
        let file_path = current.join(filename);
        if file_path.exists() {
            return Some(file_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Work out which file to read: an explicit file wins, then the closest file walking up from
/// the cwd, then the OS config dir.
pub fn resolve_config_path(
    find_in_parent: FindInParent,
    cwd: PathBuf,
    default_config_dir: PathBuf,
    cli_file: Option<PathBuf>,
) -> PathBuf {
    if let Some(cli_file) = cli_file {
        if cli_file.is_absolute() {
            return cli_file;
        }
        return clean(cwd.join(cli_file));
    }

    if let Some(found) = find_in_parent(&cwd, DEFAULT_CONFIG_NAME) {
        return found;
    }

    clean(default_config_dir.join(DEFAULT_CONFIG_NAME))
}

pub struct OsDirs;
impl OsDirs {
    /// `~/.config/fhevm` on linux, falls back to the cwd on platforms without a config dir
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("fhevm"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Load the client configuration from yaml, letting `FHEVM_*` environment variables override
/// individual keys (eg. `FHEVM_CHAIN_ID=11155111`).
pub fn load_config(config_file: Option<String>) -> Result<ClientConfig> {
    let resolved_config_path = resolve_config_path(
        find_in_parent,
        env::current_dir()?,
        OsDirs::config_dir(),
        config_file.map(PathBuf::from),
    );
    debug!(path = %resolved_config_path.display(), "Loading client configuration");

    let yaml = fs::read_to_string(&resolved_config_path).with_context(|| {
        format!(
            "Configuration file not found at {}",
            resolved_config_path.display()
        )
    })?;

    let config: ClientConfig = Figment::new()
        .merge(Yaml::string(&yaml))
        .merge(Env::prefixed(ENV_PREFIX).only(&ENV_KEYS))
        .extract()
        .context("Could not parse configuration")?;

    config.validate()?;
    Ok(config)
}
