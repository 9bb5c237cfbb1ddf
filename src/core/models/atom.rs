use super::element::Element;
use std::str::FromStr;

/// Hybridization tag derived from an atom's incident bond orders.
///
/// The rule matchers use this to recognize sp3 carbons (the "C3" anchors of
/// the elimination mechanisms) without storing perception state on the atom:
/// a triple bond or two double bonds reads as sp, one double bond as sp2,
/// and an all-single-bond environment as sp3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Hybridization {
    Sp,
    Sp2,
    Sp3,
}

/// Represents an atom in a molecule graph.
///
/// An atom carries only its element identity and formal charge. Everything
/// else the engine asks about an atom (implicit hydrogen count, hybridization,
/// heavy-atom degree) is derived from the surrounding graph, so transient
/// bond-order mutation during a feint automatically changes the answers and
/// restoring the bond restores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atom {
    /// The chemical element of the atom.
    pub element: Element,
    /// The formal charge in elementary charge units.
    pub formal_charge: i8,
}

impl Atom {
    /// Creates a neutral atom of the given element.
    pub fn new(element: Element) -> Self {
        Self {
            element,
            formal_charge: 0,
        }
    }

    /// Creates an atom with an explicit formal charge.
    pub fn with_charge(element: Element, formal_charge: i8) -> Self {
        Self {
            element,
            formal_charge,
        }
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element == Element::H
    }
}

impl FromStr for Atom {
    type Err = super::element::ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Atom::new(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_is_neutral() {
        let atom = Atom::new(Element::C);
        assert_eq!(atom.element, Element::C);
        assert_eq!(atom.formal_charge, 0);
        assert!(!atom.is_hydrogen());
    }

    #[test]
    fn with_charge_keeps_the_charge() {
        let atom = Atom::with_charge(Element::O, -1);
        assert_eq!(atom.element, Element::O);
        assert_eq!(atom.formal_charge, -1);
    }

    #[test]
    fn from_str_parses_element_symbols() {
        let atom: Atom = "O".parse().unwrap();
        assert_eq!(atom, Atom::new(Element::O));
        assert!("Zz".parse::<Atom>().is_err());
    }

    #[test]
    fn hydrogen_is_recognized() {
        assert!(Atom::new(Element::H).is_hydrogen());
    }
}
