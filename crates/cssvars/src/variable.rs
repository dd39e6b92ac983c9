//! Variable definitions and the manifest document format.
//!
//! A manifest is the JSON document a variable collection is imported from.
//! Two shapes are accepted:
//!
//! ```json
//! { "--gap": "4px", "--brand": "#3366CC" }
//! ```
//!
//! where every entry is bound verbatim, and
//!
//! ```json
//! [
//!   { "tag": "--brand", "color": "#3366CC", "shadeCount": 3 },
//!   { "tag": "--gap", "value": "4px" }
//! ]
//! ```
//!
//! where each descriptor is either a color variable (with optional shades) or
//! a plain value. When a descriptor has both `color` and `value`, the color
//! wins. Object entries are bound in document order.
//!
//! A shade count above [`MAX_SHADE_COUNT`] is rejected.

use std::fmt;

use cssvars_shade::HexColor;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::VariableError;

/// Largest shade count a variable may carry.
///
/// At the default step of 2 every digit saturates by level 8, so higher
/// levels only repeat `#FFFFFF` / `#000000`.
pub const MAX_SHADE_COUNT: u32 = 64;

/// A tagged color variable, optionally with derived shades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorVariable {
    pub tag: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "shade_count")]
    pub shade_count: Option<u32>,
}

impl ColorVariable {
    /// A color variable without derived shades.
    pub fn new(tag: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            color: color.into(),
            shade_count: None,
        }
    }

    /// Sets how many light/dark levels to derive.
    pub fn with_shades(mut self, count: u32) -> Self {
        self.shade_count = Some(count);
        self
    }

    /// Checks the shade count and parses the color.
    pub(crate) fn validate(&self) -> Result<HexColor, VariableError> {
        if let Some(count) = self.shade_count {
            check_shade_count(&self.tag, count)?;
        }
        parse_color(&self.tag, &self.color)
    }
}

fn check_shade_count(tag: &str, count: u32) -> Result<(), VariableError> {
    if count > MAX_SHADE_COUNT {
        return Err(VariableError::TooManyShades {
            tag: tag.to_string(),
            count,
            max: MAX_SHADE_COUNT,
        });
    }
    Ok(())
}

pub(crate) fn parse_color(tag: &str, color: &str) -> Result<HexColor, VariableError> {
    color
        .parse::<HexColor>()
        .map_err(|source| VariableError::InvalidColor {
            tag: tag.to_string(),
            color: color.to_string(),
            source,
        })
}

/// One element of an array-shaped manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDescriptor {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "shade_count")]
    pub shade_count: Option<u32>,
}

/// Property name to literal value, in document order.
///
/// A repeated name keeps both entries; the later one wins when bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap(Vec<(String, String)>);

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(name, value)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<Vec<(String, String)>> for PropertyMap {
    fn from(entries: Vec<(String, String)>) -> Self {
        Self(entries)
    }
}

impl IntoIterator for PropertyMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PropertyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertyMapVisitor;

        impl<'de> Visitor<'de> for PropertyMapVisitor {
            type Value = PropertyMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0).min(256));
                while let Some(entry) = access.next_entry::<String, String>()? {
                    entries.push(entry);
                }
                Ok(PropertyMap(entries))
            }
        }

        deserializer.deserialize_map(PropertyMapVisitor)
    }
}

/// A parsed manifest document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Manifest {
    /// Property name to literal value.
    Map(PropertyMap),
    /// Variable descriptors, applied in order.
    List(Vec<VariableDescriptor>),
}

/// A validated write, produced from a manifest before anything is bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Binding {
    Color {
        variable: ColorVariable,
        parsed: HexColor,
    },
    Plain {
        tag: String,
        value: String,
    },
}

impl Manifest {
    /// Parses a manifest from JSON text.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        match self {
            Manifest::Map(map) => map.len(),
            Manifest::List(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates every entry, failing on the first bad one.
    pub(crate) fn into_bindings(self) -> Result<Vec<Binding>, VariableError> {
        match self {
            Manifest::Map(map) => Ok(map
                .into_iter()
                .map(|(tag, value)| Binding::Plain { tag, value })
                .collect()),
            Manifest::List(list) => list.into_iter().map(Binding::try_from).collect(),
        }
    }
}

impl TryFrom<VariableDescriptor> for Binding {
    type Error = VariableError;

    fn try_from(desc: VariableDescriptor) -> Result<Self, Self::Error> {
        match (desc.color, desc.value) {
            (Some(color), _) => {
                let variable = ColorVariable {
                    tag: desc.tag,
                    color,
                    shade_count: desc.shade_count,
                };
                let parsed = variable.validate()?;
                Ok(Binding::Color { variable, parsed })
            }
            (None, Some(value)) => Ok(Binding::Plain {
                tag: desc.tag,
                value,
            }),
            (None, None) => Err(VariableError::EmptyDescriptor { tag: desc.tag }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_map_manifest() {
        let manifest = Manifest::parse(r##"{"--gap": "4px", "--brand": "#3366CC"}"##).unwrap();
        assert!(matches!(manifest, Manifest::Map(_)));
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn test_map_manifest_keeps_document_order() {
        let manifest = Manifest::parse(r#"{"--z": "1", "--a": "2", "--m": "3"}"#).unwrap();
        let Manifest::Map(map) = manifest else {
            panic!("expected map manifest");
        };
        let names: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["--z", "--a", "--m"]);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"--z":"1","--a":"2","--m":"3"}"#);
    }

    #[test]
    fn test_parse_list_manifest() {
        let manifest = Manifest::parse(
            r##"[
                {"tag": "--brand", "color": "#3366CC", "shadeCount": 3},
                {"tag": "--gap", "value": "4px"}
            ]"##,
        )
        .unwrap();

        let Manifest::List(list) = manifest else {
            panic!("expected list manifest");
        };
        assert_eq!(list[0].shade_count, Some(3));
        assert_eq!(list[1].value.as_deref(), Some("4px"));
    }

    #[test]
    fn test_snake_case_shade_count_alias() {
        let var: ColorVariable =
            serde_json::from_str(r##"{"tag": "--a", "color": "#000000", "shade_count": 1}"##)
                .unwrap();
        assert_eq!(var.shade_count, Some(1));
    }

    #[test]
    fn test_rejects_scalar_document() {
        assert!(Manifest::parse("42").is_err());
        assert!(Manifest::parse("not json").is_err());
    }

    #[test]
    fn test_rejects_non_string_map_values() {
        assert!(Manifest::parse(r#"{"--gap": 4}"#).is_err());
    }

    #[test]
    fn test_color_wins_over_value() {
        let binding = Binding::try_from(VariableDescriptor {
            tag: "--a".into(),
            color: Some("#000000".into()),
            value: Some("ignored".into()),
            shade_count: None,
        })
        .unwrap();
        assert!(matches!(binding, Binding::Color { .. }));
    }

    #[test]
    fn test_empty_descriptor_rejected() {
        let err = Binding::try_from(VariableDescriptor {
            tag: "--a".into(),
            color: None,
            value: None,
            shade_count: Some(2),
        })
        .unwrap_err();
        assert_eq!(err, VariableError::EmptyDescriptor { tag: "--a".into() });
    }

    #[test]
    fn test_invalid_color_in_list_fails_whole_manifest() {
        let manifest = Manifest::parse(
            r##"[
                {"tag": "--ok", "value": "1"},
                {"tag": "--bad", "color": "#zzzzzz"}
            ]"##,
        )
        .unwrap();
        let err = manifest.into_bindings().unwrap_err();
        assert!(matches!(err, VariableError::InvalidColor { ref tag, .. } if tag == "--bad"));
    }

    #[test]
    fn test_serialize_skips_absent_shades() {
        let json = serde_json::to_string(&ColorVariable::new("--a", "#000000")).unwrap();
        assert_eq!(json, r##"{"tag":"--a","color":"#000000"}"##);

        let json =
            serde_json::to_string(&ColorVariable::new("--a", "#000000").with_shades(2)).unwrap();
        assert!(json.contains(r#""shadeCount":2"#));
    }

    #[test]
    fn test_shade_count_limit() {
        let at_limit = ColorVariable::new("--a", "#808080").with_shades(MAX_SHADE_COUNT);
        assert!(at_limit.validate().is_ok());

        let err = ColorVariable::new("--a", "#808080")
            .with_shades(MAX_SHADE_COUNT + 1)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            VariableError::TooManyShades {
                tag: "--a".into(),
                count: MAX_SHADE_COUNT + 1,
                max: MAX_SHADE_COUNT,
            }
        );
    }

    #[test]
    fn test_huge_shade_count_in_list_fails_whole_manifest() {
        let manifest = Manifest::parse(
            r##"[
                {"tag": "--ok", "value": "1"},
                {"tag": "--huge", "color": "#808080", "shadeCount": 4294967295}
            ]"##,
        )
        .unwrap();
        let err = manifest.into_bindings().unwrap_err();
        assert!(matches!(
            err,
            VariableError::TooManyShades { ref tag, count: u32::MAX, .. } if tag == "--huge"
        ));
    }
}
