//! Defines the configuration surface of the fragmentation engine.

use super::error::FragmentError;
use super::rules::Rule;
use serde::Deserialize;
use std::path::Path;

/// The pH fragmentation runs at unless a caller overrides it.
pub const PHYSIOLOGICAL_PH: f64 = 7.4;

/// Options controlling a fragmentation run.
///
/// A default config applies every known rule at physiological pH. Configs can
/// also be loaded from a TOML file, where unknown keys and unknown rule names
/// are rejected at parse time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FragmentConfig {
    /// The rules to apply, in order. Duplicate pattern coverage is collapsed;
    /// listing both carbonyl rules matches their shared site once.
    pub rules: Vec<Rule>,
    /// Restrict output to structurally unique fragment sets.
    pub uniq: bool,
    /// The pH used when normalizing protonation state before matching.
    pub ph: f64,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            rules: Rule::ALL.to_vec(),
            uniq: false,
            ph: PHYSIOLOGICAL_PH,
        }
    }
}

impl FragmentConfig {
    /// Creates a config applying only the given rules, with default options.
    pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Loads a config from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::ConfigIo`] if the file cannot be read, or
    /// [`FragmentError::ConfigParse`] if it is not valid TOML, names an
    /// unknown rule, or contains unknown keys.
    pub fn load(path: &Path) -> Result<Self, FragmentError> {
        let content = std::fs::read_to_string(path).map_err(|e| FragmentError::ConfigIo {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| FragmentError::ConfigParse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Whether any selected rule uses the carbonyl-site matcher.
    pub fn wants_carbonyl_pattern(&self) -> bool {
        self.rules.iter().any(|rule| {
            matches!(
                rule,
                Rule::CarbonylOxygenDump | Rule::CarbonylOxygenDumpVariant
            )
        })
    }

    /// Whether any selected rule uses the ether-linkage matcher.
    pub fn wants_ether_pattern(&self) -> bool {
        self.rules.contains(&Rule::OxidizedEther)
    }
}
