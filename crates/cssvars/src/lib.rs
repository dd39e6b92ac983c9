//! # cssvars - Runtime CSS Custom Properties
//!
//! `cssvars` manages CSS custom properties at runtime: binding values,
//! deriving light/dark shades from a base color, and importing whole variable
//! collections from a JSON manifest.
//!
//! ## Core Concepts
//!
//! - [`VariableManager`]: owns a style root and the shade bookkeeping
//! - [`StyleRoot`]: where properties live; [`MemoryRoot`] is the built-in one
//! - [`ColorVariable`]: a tagged color with an optional shade count
//! - [`Manifest`]: the JSON import format
//! - [`ManifestSource`]: where a manifest comes from ([`HttpSource`], [`StaticSource`])
//! - [`ColorScheme`]: the user's light/dark preference
//!
//! ## Quick Start
//!
//! ```rust
//! use cssvars::{ColorVariable, MemoryRoot, VariableManager};
//!
//! let mut vars = VariableManager::new(MemoryRoot::new());
//!
//! vars.set_variable(&ColorVariable::new("--brand", "#3366CC").with_shades(2)).unwrap();
//! vars.set_plain_value("--radius", "6px");
//!
//! assert_eq!(vars.get_variable("--brand-light-1").as_deref(), Some("#5588EE"));
//! assert_eq!(vars.get_variable("--brand-dark-2").as_deref(), Some("#002288"));
//!
//! // Rebinding the base color regenerates every registered shade.
//! vars.update_variable("--brand", "#CC6633").unwrap();
//! assert_eq!(vars.get_variable("--brand-light-1").as_deref(), Some("#EE8855"));
//! ```
//!
//! ## Shading
//!
//! Shades are computed per hex digit by [`cssvars_shade`]: level `i` adds or
//! subtracts `2 * i` (configurable through [`ManagerConfig::shade_step`]) from
//! each of the six digits, saturating at `0` and `F`.
//!
//! ## Importing Collections
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), cssvars::ImportError> {
//! use cssvars::{HttpSource, MemoryRoot, VariableManager};
//!
//! let mut vars = VariableManager::new(MemoryRoot::new());
//! let summary = vars
//!     .import_collection(&HttpSource::new("https://example.com/theme.json"))
//!     .await?;
//! println!("bound {} properties", summary.total());
//! # Ok(())
//! # }
//! ```
//!
//! A failed import is logged and returned; nothing already bound changes.

pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod manager;
pub mod registry;
pub mod root;
pub mod scheme;
pub mod variable;

pub use config::{ManagerConfig, UpdateMode, DEFAULT_LOG_PREFIX, DEFAULT_SHADE_STEP};
pub use error::{ImportError, VariableError};
pub use import::{HttpSource, ImportSummary, ManifestSource, StaticSource};
pub use manager::VariableManager;
pub use registry::{derive_shades, shade_name, shades, DerivedShade, ShadeRegistry, ShadeTone};
pub use root::{MemoryRoot, RootBinder, RootHandle, StyleRoot};
pub use scheme::{
    detect_color_scheme, init_color_scheme, reset_scheme_detector, set_scheme_detector,
    ColorScheme, SchemeWatcher,
};
pub use variable::{ColorVariable, Manifest, PropertyMap, VariableDescriptor, MAX_SHADE_COUNT};

// Shader types, re-exported so callers need a single dependency.
pub use cssvars_shade::{darken, lighten, shade_from, HexColor, ShadeError};
