//! Shade-count bookkeeping and derived shade naming.
//!
//! [`ShadeRegistry`] remembers how many shade levels each tag was registered
//! with, so a later color update can regenerate exactly the same set of
//! derived variables. Entries are overwritten on re-registration and never
//! removed.
//!
//! Derived variables are named `{tag}-light-{level}` and `{tag}-dark-{level}`
//! for `level` in `1..=count`, shaded by `step * level`.

use std::collections::HashMap;

use cssvars_shade::HexColor;

/// Tag to shade-count mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadeRegistry {
    counts: HashMap<String, u32>,
}

impl ShadeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `count` for `tag`, returning the previous count.
    pub fn record(&mut self, tag: &str, count: u32) -> Option<u32> {
        self.counts.insert(tag.to_string(), count)
    }

    /// Shade count registered for `tag`.
    pub fn get(&self, tag: &str) -> Option<u32> {
        self.counts.get(tag).copied()
    }

    /// Returns true if `tag` has a registered shade count.
    pub fn contains(&self, tag: &str) -> bool {
        self.counts.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.counts.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Whether a derived variable is lighter or darker than its base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadeTone {
    Light,
    Dark,
}

impl ShadeTone {
    fn infix(self) -> &'static str {
        match self {
            ShadeTone::Light => "light",
            ShadeTone::Dark => "dark",
        }
    }
}

/// A derived shade variable ready to be bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedShade {
    pub name: String,
    pub value: String,
    pub tone: ShadeTone,
    pub level: u32,
}

/// Name of the derived variable for `tag` at `level`.
pub fn shade_name(tag: &str, tone: ShadeTone, level: u32) -> String {
    format!("{}-{}-{}", tag, tone.infix(), level)
}

/// Lazily yields every derived shade for `tag`.
///
/// Levels run from 1 to `count`; each level yields its light variant followed
/// by its dark variant, shaded by `step * level`.
pub fn shades<'a>(
    tag: &'a str,
    color: HexColor,
    count: u32,
    step: u8,
) -> impl Iterator<Item = DerivedShade> + 'a {
    (1..=count).flat_map(move |level| {
        let power = u32::from(step).saturating_mul(level);
        [
            (ShadeTone::Light, color.lighten(power)),
            (ShadeTone::Dark, color.darken(power)),
        ]
        .into_iter()
        .map(move |(tone, shaded)| DerivedShade {
            name: shade_name(tag, tone, level),
            value: shaded.to_string(),
            tone,
            level,
        })
    })
}

/// Collects [`shades`] into a vector.
pub fn derive_shades(tag: &str, color: HexColor, count: u32, step: u8) -> Vec<DerivedShade> {
    shades(tag, color, count, step).collect()
}
