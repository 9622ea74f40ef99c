//! Per-field mask configuration.
//!
//! Options are plain data, deserializable from the same declarative form
//! definitions collaborators already ship (YAML or JSON), and resolved into
//! a compiled program by the engine.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::mask::alphabet;

pub const DEFAULT_FILL_CHAR: char = '_';

/// Logical type of the host field. Masking only applies to text-like kinds;
/// the rest degrade to pass-through because their platform widgets do not
/// expose caret selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Search,
    Url,
    Tel,
    Password,
    Email,
    Number,
}

impl FieldKind {
    pub fn is_text_like(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Textarea | Self::Search | Self::Url | Self::Tel | Self::Password
        )
    }
}

/// Fill-mode switch: off, on with the default fill char, or on with the
/// first char of a custom string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FillMask {
    Enabled(bool),
    Custom(String),
}

impl Default for FillMask {
    fn default() -> Self {
        Self::Enabled(false)
    }
}

impl FillMask {
    pub fn is_on(&self) -> bool {
        match self {
            Self::Enabled(on) => *on,
            Self::Custom(_) => true,
        }
    }

    /// The fill char also keys extraction, so it resolves even when fill
    /// mode is off.
    pub fn fill_char(&self) -> char {
        match self {
            Self::Custom(text) => text.chars().next().unwrap_or(DEFAULT_FILL_CHAR),
            Self::Enabled(_) => DEFAULT_FILL_CHAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskOptions {
    /// Pattern string or named-pattern key. Empty disables masking.
    pub mask: String,
    pub fill_mask: FillMask,
    /// Report the unmasked form as the logical value instead of the masked
    /// text.
    pub unmasked_value: bool,
    pub field_kind: FieldKind,
    /// Extra named patterns, checked before the built-in table.
    pub patterns: IndexMap<String, String>,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            mask: String::new(),
            fill_mask: FillMask::default(),
            unmasked_value: false,
            field_kind: FieldKind::Text,
            patterns: IndexMap::new(),
        }
    }
}

impl MaskOptions {
    pub fn new(mask: impl Into<String>) -> Self {
        Self {
            mask: mask.into(),
            ..Self::default()
        }
    }

    pub fn with_fill_mask(mut self, fill_mask: FillMask) -> Self {
        self.fill_mask = fill_mask;
        self
    }

    pub fn with_unmasked_value(mut self, unmasked_value: bool) -> Self {
        self.unmasked_value = unmasked_value;
        self
    }

    pub fn with_field_kind(mut self, field_kind: FieldKind) -> Self {
        self.field_kind = field_kind;
        self
    }

    pub fn with_pattern(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.patterns.insert(name.into(), pattern.into());
        self
    }

    /// Named-pattern substitution: per-field table first, then built-ins,
    /// else the mask string is the pattern itself.
    pub fn resolve_pattern(&self) -> &str {
        if let Some(pattern) = self.patterns.get(self.mask.as_str()) {
            return pattern;
        }
        alphabet::named_pattern(&self.mask).unwrap_or(&self.mask)
    }

    pub fn masking_enabled(&self) -> bool {
        !self.mask.is_empty() && self.field_kind.is_text_like()
    }

    pub fn from_yaml(source: &str) -> Result<Self, OptionsError> {
        serde_yaml::from_str(source).map_err(OptionsError::Yaml)
    }

    pub fn from_json(source: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(source).map_err(OptionsError::Json)
    }
}

#[derive(Debug)]
pub enum OptionsError {
    Yaml(serde_yaml::Error),
    Json(serde_json::Error),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml(err) => write!(f, "invalid mask options (yaml): {err}"),
            Self::Json(err) => write!(f, "invalid mask options (json): {err}"),
        }
    }
}

impl std::error::Error for OptionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Yaml(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_options_parse_with_defaults() {
        let options = MaskOptions::from_yaml("mask: phone\n").expect("options should parse");
        assert_eq!(options.mask, "phone");
        assert_eq!(options.fill_mask, FillMask::Enabled(false));
        assert!(!options.unmasked_value);
        assert_eq!(options.field_kind, FieldKind::Text);
    }

    #[test]
    fn yaml_fill_mask_accepts_bool_or_string() {
        let on = MaskOptions::from_yaml("mask: '##'\nfill_mask: true\n").expect("options");
        assert!(on.fill_mask.is_on());
        assert_eq!(on.fill_mask.fill_char(), '_');

        let custom =
            MaskOptions::from_yaml("mask: '##'\nfill_mask: '*#'\n").expect("options");
        assert!(custom.fill_mask.is_on());
        assert_eq!(custom.fill_mask.fill_char(), '*');
    }

    #[test]
    fn json_options_parse_field_kind() {
        let options = MaskOptions::from_json(
            "{ \"mask\": \"##:##\", \"field_kind\": \"tel\", \"unmasked_value\": true }",
        )
        .expect("options should parse");
        assert_eq!(options.field_kind, FieldKind::Tel);
        assert!(options.unmasked_value);
    }

    #[test]
    fn invalid_yaml_reports_an_error() {
        let err = MaskOptions::from_yaml("mask: [unclosed").expect_err("should fail");
        assert!(err.to_string().contains("yaml"));
    }

    #[test]
    fn custom_patterns_shadow_builtins() {
        let options = MaskOptions::new("phone").with_pattern("phone", "###-####");
        assert_eq!(options.resolve_pattern(), "###-####");

        let builtin = MaskOptions::new("phone");
        assert_eq!(builtin.resolve_pattern(), "(###) ### - ####");

        let raw = MaskOptions::new("##/##");
        assert_eq!(raw.resolve_pattern(), "##/##");
    }

    #[test]
    fn masking_disabled_for_empty_mask_or_non_text_kinds() {
        assert!(!MaskOptions::new("").masking_enabled());
        assert!(
            !MaskOptions::new("##")
                .with_field_kind(FieldKind::Number)
                .masking_enabled()
        );
        assert!(MaskOptions::new("##").masking_enabled());
        assert!(
            MaskOptions::new("##")
                .with_field_kind(FieldKind::Password)
                .masking_enabled()
        );
    }

    #[test]
    fn empty_custom_fill_string_falls_back_to_default() {
        assert_eq!(FillMask::Custom(String::new()).fill_char(), '_');
    }
}
