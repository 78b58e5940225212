//! Configuration module.
//!
//! Settings are resolved with the precedence Defaults → File → Env → CLI.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_copy_path,
    default_log_path, load_config_file, load_config_with_precedence, merge_config, CliOverrides,
    ConfigError, ConfigFile, ResolvedConfig,
};
