//! YAML switch manifests for flipswitch.
//!
//! ```
//! use flipswitch_yaml::SwitchManifest;
//!
//! let manifest = SwitchManifest::from_yaml("switches:\n  - id: compass\n    on: true\n").unwrap();
//! let config = manifest.get("compass").unwrap().drag_config();
//! assert!(config.initial_on);
//! assert_eq!(config.track_length, 20.0);
//! ```

mod error;
mod manifest;

pub use error::ParseError;
pub use manifest::{ColorOverrides, SwitchEntry, SwitchManifest};
