//! Defines the closed set of fragmentation rules the engine understands.

use super::error::FragmentError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A bond-breaking rule the engine can apply to a molecule.
///
/// The set is closed: every rule the engine knows how to apply has a variant
/// here, and an unrecognized name is rejected at parse time rather than
/// silently ignored at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// Heterolytic loss of the group attached through a carbonyl-forming
    /// carbon-oxygen site (alcohols, ethers, esters, acids).
    CarbonylOxygenDump,
    /// Same match as [`CarbonylOxygenDump`](Rule::CarbonylOxygenDump); kept as
    /// a distinct name so rule lists from older workflows stay loadable.
    CarbonylOxygenDumpVariant,
    /// Charge-separated cleavage of a carbon-oxygen bond inside an ether or
    /// ester linkage.
    OxidizedEther,
}

impl Rule {
    /// Every known rule, in application order.
    pub const ALL: [Rule; 3] = [
        Rule::CarbonylOxygenDump,
        Rule::CarbonylOxygenDumpVariant,
        Rule::OxidizedEther,
    ];

    /// Returns the canonical kebab-case name of the rule.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Rule::CarbonylOxygenDump => "carbonyl-oxygen-dump",
            Rule::CarbonylOxygenDumpVariant => "carbonyl-oxygen-dump-variant",
            Rule::OxidizedEther => "oxidized-ether",
        }
    }
}

impl FromStr for Rule {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| FragmentError::UnknownRule {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for rule in Rule::ALL {
            assert_eq!(rule.as_str().parse::<Rule>().unwrap(), rule);
            assert_eq!(rule.to_string(), rule.as_str());
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = "retro-diels-alder".parse::<Rule>().unwrap_err();
        assert!(matches!(
            err,
            FragmentError::UnknownRule { name } if name == "retro-diels-alder"
        ));
    }

    #[test]
    fn deserializes_from_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            rule: Rule,
        }
        let wrapper: Wrapper = toml::from_str(r#"rule = "oxidized-ether""#).unwrap();
        assert_eq!(wrapper.rule, Rule::OxidizedEther);
        assert!(toml::from_str::<Wrapper>(r#"rule = "oxidised-ether""#).is_err());
    }
}
