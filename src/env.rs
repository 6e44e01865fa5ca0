//! Environment constants and path utilities for promptx.
//!
//! Centralizes configuration file names, discovery locations and the
//! environment variables the binary reads.

use std::path::{Path, PathBuf};

/// Hidden per-directory / per-user configuration directory
pub const PROMPTX_DIR_NAME: &str = ".promptx";

/// Configuration file name inside [`PROMPTX_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Stand-alone configuration file in the working directory
pub const LOCAL_CONFIG_FILE_NAME: &str = "promptx.toml";

/// System-wide configuration file (Unix-like systems)
pub const SYSTEM_CONFIG_PATH: &str = "/etc/promptx/config.toml";

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "promptx=info";

/// Build the `.promptx` directory path under `root`
pub fn promptx_dir_path(root: &Path) -> PathBuf {
    root.join(PROMPTX_DIR_NAME)
}

/// Build the `promptx.toml` path in the current directory
pub fn local_config_file_path(current_dir: &Path) -> PathBuf {
    current_dir.join(LOCAL_CONFIG_FILE_NAME)
}

/// Build the `.promptx/config.toml` path in the current directory
pub fn local_dir_config_file_path(current_dir: &Path) -> PathBuf {
    promptx_dir_path(current_dir).join(CONFIG_FILE_NAME)
}

/// Build config file path in user's home directory
pub fn user_config_file_path(home_dir: &Path) -> PathBuf {
    promptx_dir_path(home_dir).join(CONFIG_FILE_NAME)
}
