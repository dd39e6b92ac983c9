//! The variable manager: bindings, shade regeneration and import.
//!
//! [`VariableManager`] owns a style root, a [`ShadeRegistry`] and a
//! [`ManagerConfig`]. It is the only place where custom properties are
//! written, so the registry always matches what was last bound.
//!
//! # Shades
//!
//! Setting a [`ColorVariable`] with a shade count records the count and binds
//! `2 * count` derived variables next to the base:
//!
//! ```rust
//! use cssvars::{ColorVariable, MemoryRoot, VariableManager};
//!
//! let mut vars = VariableManager::new(MemoryRoot::new());
//! vars.set_variable(&ColorVariable::new("--a", "#808080").with_shades(2)).unwrap();
//!
//! assert_eq!(vars.get_variable("--a-light-1").as_deref(), Some("#A2A2A2"));
//! assert_eq!(vars.get_variable("--a-dark-2").as_deref(), Some("#404040"));
//!
//! // Later updates reuse the recorded count.
//! vars.update_variable("--a", "#404040").unwrap();
//! assert_eq!(vars.get_variable("--a-light-2").as_deref(), Some("#848484"));
//! ```
//!
//! # Unavailable Roots
//!
//! A manager created with [`VariableManager::lazy`] retries its binder on every
//! call until it succeeds. Until then reads return `None` and writes are
//! skipped.

use cssvars_shade::{shade_from, HexColor, ShadeError};
use tracing::{debug, error};

use crate::config::{ManagerConfig, UpdateMode};
use crate::error::{ImportError, VariableError};
use crate::import::{ImportSummary, ManifestSource};
use crate::registry::{shades, ShadeRegistry};
use crate::root::{RootHandle, StyleRoot};
use crate::variable::{parse_color, Binding, ColorVariable, Manifest};

/// Manages custom properties on one style root.
#[derive(Debug)]
pub struct VariableManager<R: StyleRoot> {
    root: RootHandle<R>,
    registry: ShadeRegistry,
    config: ManagerConfig,
}

impl<R: StyleRoot> VariableManager<R> {
    /// A manager bound to `root` from the start.
    pub fn new(root: R) -> Self {
        Self::from_handle(RootHandle::bound(root))
    }

    /// A manager that binds its root on the first call where `binder` succeeds.
    pub fn lazy<F>(binder: F) -> Self
    where
        F: FnMut() -> Option<R> + Send + 'static,
    {
        Self::from_handle(RootHandle::lazy(binder))
    }

    fn from_handle(root: RootHandle<R>) -> Self {
        Self {
            root,
            registry: ShadeRegistry::new(),
            config: ManagerConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ManagerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn registry(&self) -> &ShadeRegistry {
        &self.registry
    }

    /// Returns true once the style root is bound.
    pub fn is_bound(&self) -> bool {
        self.root.is_bound()
    }

    /// The bound root, without attempting to bind.
    pub fn root(&self) -> Option<&R> {
        self.root.peek()
    }

    /// Consumes the manager, returning the root if bound.
    pub fn into_root(self) -> Option<R> {
        self.root.into_inner()
    }

    /// Binds a color variable and, with a shade count, its derived shades.
    ///
    /// The color and shade count are validated before anything is written.
    /// Counts above [`MAX_SHADE_COUNT`](crate::variable::MAX_SHADE_COUNT) are
    /// rejected. With a shade count
    /// the count is recorded (replacing any earlier one) and every
    /// `{tag}-light-{i}` / `{tag}-dark-{i}` is regenerated. Without one, shades
    /// bound earlier for the tag are left as they are.
    pub fn set_variable(&mut self, variable: &ColorVariable) -> Result<(), VariableError> {
        let parsed = variable.validate()?;
        self.bind_color(variable, parsed);
        Ok(())
    }

    /// Binds a variable to an arbitrary value. Never touches the registry.
    pub fn set_plain_value(&mut self, tag: &str, value: &str) {
        match self.root.get() {
            Some(root) => {
                root.set_property(tag, value);
                debug!(tag, value, "bound plain value");
            }
            None => debug!(tag, "style root unavailable, skipping write"),
        }
    }

    /// Updates the base color of a tag and regenerates its tracked shades.
    ///
    /// If `tag` has a recorded shade count, its shades are rederived from
    /// `color`. Whether the base tag itself is rebound depends on
    /// [`ManagerConfig::update_mode`]. Untracked tags never gain shade
    /// variables.
    pub fn update_variable(&mut self, tag: &str, color: &str) -> Result<(), VariableError> {
        let parsed = parse_color(tag, color)?;
        let count = self.registry.get(tag);
        let step = self.config.shade_step;
        let mode = self.config.update_mode;

        let Some(root) = self.root.get() else {
            debug!(tag, "style root unavailable, skipping update");
            return Ok(());
        };

        if mode == UpdateMode::RebindBase {
            root.set_property(tag, color);
        }
        if let Some(count) = count {
            write_shades(root, tag, parsed, count, step);
        }
        debug!(tag, color, tracked = count.is_some(), ?mode, "updated variable");
        Ok(())
    }

    /// Current value of `tag`, or `None` if unset or the root is unavailable.
    pub fn get_variable(&mut self, tag: &str) -> Option<String> {
        self.root.get()?.property(tag)
    }

    /// Binds every variable in `variables`, in order.
    ///
    /// Every variable is validated first; one invalid color or shade count
    /// leaves every binding untouched.
    pub fn set_collection(&mut self, variables: &[ColorVariable]) -> Result<(), VariableError> {
        let parsed = variables
            .iter()
            .map(ColorVariable::validate)
            .collect::<Result<Vec<_>, _>>()?;
        for (variable, color) in variables.iter().zip(parsed) {
            self.bind_color(variable, color);
        }
        Ok(())
    }

    /// Validates and binds a parsed manifest.
    pub fn apply_manifest(&mut self, manifest: Manifest) -> Result<ImportSummary, VariableError> {
        let bindings = manifest.into_bindings()?;
        Ok(self.apply_bindings(bindings))
    }

    /// Fetches a manifest from `source` and binds its entries.
    ///
    /// The document is fetched, parsed and validated before anything is
    /// written, so on failure every existing binding is unchanged. Failures
    /// are logged with the configured prefix and returned.
    pub async fn import_collection<S>(&mut self, source: &S) -> Result<ImportSummary, ImportError>
    where
        S: ManifestSource + ?Sized,
    {
        let result = self.try_import(source).await;
        match &result {
            Ok(summary) => debug!(
                source = %source.describe(),
                plain = summary.plain,
                colors = summary.colors,
                shades = summary.shades,
                "imported variable collection"
            ),
            Err(err) => error!(
                source = %source.describe(),
                "{} {}",
                self.config.log_prefix,
                err
            ),
        }
        result
    }

    async fn try_import<S>(&mut self, source: &S) -> Result<ImportSummary, ImportError>
    where
        S: ManifestSource + ?Sized,
    {
        // Bind early so a lazily available root is ready when the body arrives.
        self.root.get();

        let text = source.fetch().await?;
        let bindings = Manifest::parse(&text)?.into_bindings()?;
        if self.root.get().is_none() {
            return Err(ImportError::RootUnavailable);
        }
        Ok(self.apply_bindings(bindings))
    }

    /// Shades a hex color: negative darkens, positive lightens, zero is identity.
    pub fn get_shade_from_hex(&self, hex: &str, power: i32) -> Result<String, ShadeError> {
        shade_from(hex, power)
    }

    /// Shades the current value of `tag`.
    ///
    /// Returns `Ok(None)` when the root is unavailable or `tag` is unset.
    pub fn get_shade_from_var(
        &mut self,
        tag: &str,
        power: i32,
    ) -> Result<Option<String>, ShadeError> {
        match self.get_variable(tag) {
            Some(value) => shade_from(value.trim(), power).map(Some),
            None => Ok(None),
        }
    }

    /// Recorded shade count for `tag`.
    pub fn shade_count(&self, tag: &str) -> Option<u32> {
        self.registry.get(tag)
    }

    /// Tags with a recorded shade count, sorted.
    pub fn tracked_tags(&self) -> Vec<&str> {
        self.registry.tags()
    }

    fn bind_color(&mut self, variable: &ColorVariable, parsed: HexColor) -> usize {
        let step = self.config.shade_step;
        let Some(root) = self.root.get() else {
            debug!(tag = %variable.tag, "style root unavailable, skipping write");
            return 0;
        };

        root.set_property(&variable.tag, &variable.color);
        let Some(count) = variable.shade_count else {
            debug!(tag = %variable.tag, color = %variable.color, "bound color");
            return 0;
        };

        let written = write_shades(root, &variable.tag, parsed, count, step);
        self.registry.record(&variable.tag, count);
        debug!(
            tag = %variable.tag,
            color = %variable.color,
            shades = written,
            "bound color with shades"
        );
        written
    }

    fn apply_bindings(&mut self, bindings: Vec<Binding>) -> ImportSummary {
        let mut summary = ImportSummary::default();
        for binding in bindings {
            match binding {
                Binding::Color { variable, parsed } => {
                    summary.shades += self.bind_color(&variable, parsed);
                    summary.colors += 1;
                }
                Binding::Plain { tag, value } => {
                    self.set_plain_value(&tag, &value);
                    summary.plain += 1;
                }
            }
        }
        summary
    }
}

fn write_shades<R: StyleRoot>(
    root: &mut R,
    tag: &str,
    color: HexColor,
    count: u32,
    step: u8,
) -> usize {
    let mut written = 0;
    for shade in shades(tag, color, count, step) {
        root.set_property(&shade.name, &shade.value);
        written += 1;
    }
    written
}
