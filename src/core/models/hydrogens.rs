//! Hydrogen saturation and protonation-state adjustment for [`Molecule`].
//!
//! A molecule can exist in two equivalent representations: a heavy-atom graph
//! whose hydrogens are implicit valence deficits, and a saturated graph where
//! every deficit is materialized as an explicit hydrogen atom. The operations
//! here convert between the two and adjust formal charges to match a target
//! pH, all without changing the heavy-atom skeleton.

use super::element::Element;
use super::ids::AtomId;
use super::molecule::Molecule;
use super::topology::BondOrder;

/// pKa of a carboxylic-acid hydroxyl; above this pH the group loses a proton.
const CARBOXYLIC_ACID_PKA: f64 = 4.8;
/// pKa of a basic amine; below this pH the nitrogen picks up a proton.
const AMINE_PKA: f64 = 10.6;

impl Molecule {
    /// Reports whether the molecule carries explicit hydrogens.
    ///
    /// True after a call to [`add_hydrogens`](Self::add_hydrogens), or
    /// whenever the graph already contains a hydrogen atom from construction.
    pub fn hydrogens_added(&self) -> bool {
        self.hydrogens_added || self.atoms_iter().any(|(_, atom)| atom.is_hydrogen())
    }

    /// Materializes every implicit hydrogen as an explicit atom.
    ///
    /// Each heavy atom gains one single-bonded hydrogen per unit of valence
    /// deficit. Calling this on a saturated molecule is a no-op, so the
    /// operation is idempotent.
    pub fn add_hydrogens(&mut self) {
        let mut heavy: Vec<AtomId> = self
            .atoms_iter()
            .filter(|(_, atom)| !atom.is_hydrogen())
            .map(|(id, _)| id)
            .collect();
        heavy.sort_unstable();

        for atom_id in heavy {
            for _ in 0..self.implicit_hydrogen_count(atom_id) {
                let hydrogen = self.add_atom(Element::H);
                self.add_bond(atom_id, hydrogen, BondOrder::Single);
            }
        }
        self.hydrogens_added = true;
    }

    /// Deletes every explicit hydrogen atom, returning to the heavy-atom graph.
    pub fn remove_hydrogens(&mut self) {
        let hydrogens: Vec<AtomId> = self
            .atoms_iter()
            .filter(|(_, atom)| atom.is_hydrogen())
            .map(|(id, _)| id)
            .collect();
        for id in hydrogens {
            self.remove_atom(id);
        }
        self.hydrogens_added = false;
    }

    /// Deletes one explicit hydrogen bonded to the given atom.
    ///
    /// # Return
    ///
    /// `true` if an explicit hydrogen was found and removed. An atom with no
    /// explicit hydrogens (including one that only has implicit ones) leaves
    /// the molecule unchanged and returns `false`.
    pub fn remove_one_hydrogen(&mut self, atom_id: AtomId) -> bool {
        match self.hydrogen_neighbors(atom_id).first().copied() {
            Some(hydrogen) => {
                self.remove_atom(hydrogen);
                true
            }
            None => false,
        }
    }

    /// Adjusts formal charges to the protonation state at the given pH.
    ///
    /// Carboxylic-acid oxygens deprotonate (charge -1) when the pH is above
    /// their pKa, and amine nitrogens protonate (charge +1) when it is below
    /// theirs; amide nitrogens are left alone. The molecule is saturated with
    /// explicit hydrogens afterwards, matching each atom's new valence.
    pub fn correct_for_ph(&mut self, ph: f64) {
        let mut ids: Vec<AtomId> = self.atoms_iter().map(|(id, _)| id).collect();
        ids.sort_unstable();

        for id in ids {
            let Some(atom) = self.atom(id).copied() else {
                continue;
            };
            if atom.formal_charge != 0 {
                continue;
            }
            let new_charge = match atom.element {
                Element::O if ph > CARBOXYLIC_ACID_PKA && self.is_carboxylic_oxygen(id) => -1,
                Element::N if ph < AMINE_PKA && self.is_basic_amine(id) => 1,
                _ => continue,
            };
            if let Some(atom) = self.atom_mut(id) {
                atom.formal_charge = new_charge;
            }
        }
        self.add_hydrogens();
    }

    /// The hydroxyl oxygen of a carboxylic acid: terminal, single-bonded to a
    /// carbon that also carries a double bond to another oxygen.
    fn is_carboxylic_oxygen(&self, oxygen: AtomId) -> bool {
        if self.heavy_degree(oxygen) != 1 {
            return false;
        }
        let carbon = self.heavy_neighbors(oxygen)[0];
        if self.atom(carbon).map(|a| a.element) != Some(Element::C)
            || self.bond_order_between(oxygen, carbon) != Some(BondOrder::Single)
        {
            return false;
        }
        self.heavy_neighbors(carbon).iter().any(|&other| {
            other != oxygen
                && self.atom(other).map(|a| a.element) == Some(Element::O)
                && self.bond_order_between(carbon, other) == Some(BondOrder::Double)
        })
    }

    /// A protonatable nitrogen: all single bonds, at most three heavy
    /// neighbors, and not the nitrogen of an amide.
    fn is_basic_amine(&self, nitrogen: AtomId) -> bool {
        let neighbors = match self.get_bonded_neighbors(nitrogen) {
            Some(neighbors) => neighbors.to_vec(),
            None => return false,
        };
        if self.heavy_degree(nitrogen) > 3 {
            return false;
        }
        for &neighbor in &neighbors {
            if self.bond_order_between(nitrogen, neighbor) != Some(BondOrder::Single) {
                return false;
            }
            // Amide nitrogen: bonded to a carbonyl carbon.
            if self.atom(neighbor).map(|a| a.element) == Some(Element::C)
                && self.heavy_neighbors(neighbor).iter().any(|&other| {
                    self.atom(other).map(|a| a.element) == Some(Element::O)
                        && self.bond_order_between(neighbor, other) == Some(BondOrder::Double)
                })
            {
                return false;
            }
        }
        true
    }
}
