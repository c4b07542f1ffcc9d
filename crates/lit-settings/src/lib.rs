//! # lit-settings
//!
//! Connection settings for the LIT node client, loaded from three layers
//! (in priority order):
//! 1. **Compiled defaults**: [`ClientSettings::default()`]
//! 2. **User file**: `~/.lit/client.json` (deep-merged over defaults)
//! 3. **Environment variables**: `LIT_*` overrides (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use lit_settings::load_settings;
//!
//! let settings = load_settings().unwrap_or_default();
//! println!("RPC endpoint: {}", settings.ws_url());
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::ClientSettings;
