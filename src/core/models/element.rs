use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Chemical elements covered by the fragmentation rules (the organic subset).
///
/// The engine only reasons about bond rearrangements between these elements;
/// anything outside the set is rejected at construction time rather than
/// carried around as an opaque atomic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    H,
    C,
    N,
    O,
    F,
    P,
    S,
    Cl,
    Br,
    I,
}

static ELEMENT_SYMBOLS: Map<&'static str, Element> = phf_map! {
    "H" => Element::H,
    "C" => Element::C,
    "N" => Element::N,
    "O" => Element::O,
    "F" => Element::F,
    "P" => Element::P,
    "S" => Element::S,
    "Cl" => Element::Cl,
    "Br" => Element::Br,
    "I" => Element::I,
};

impl Element {
    /// Returns the standard bonding valence of the neutral element.
    pub fn default_valence(self) -> u8 {
        match self {
            Element::H => 1,
            Element::C => 4,
            Element::N => 3,
            Element::O => 2,
            Element::F | Element::Cl | Element::Br | Element::I => 1,
            Element::P => 3,
            Element::S => 2,
        }
    }

    /// Returns the expected bonding valence adjusted for a formal charge.
    ///
    /// Carbon loses a bonding site per unit of charge in either direction
    /// (carbocations and carbanions are both trivalent); heteroatoms gain a
    /// site when positively charged and lose one when negatively charged
    /// (e.g. oxidanium O+ binds three, alkoxide O- binds one).
    pub fn valence_with_charge(self, charge: i8) -> u8 {
        let base = self.default_valence() as i16;
        let adjusted = match self {
            Element::C => base - (charge as i16).abs(),
            _ => base + charge as i16,
        };
        adjusted.clamp(0, 8) as u8
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Element::H => "H",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::Br => "Br",
            Element::I => "I",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown element symbol '{0}'")]
pub struct ParseElementError(pub String);

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ELEMENT_SYMBOLS
            .get(s)
            .copied()
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
