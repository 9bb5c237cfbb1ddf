//! Defines the molecule capability trait the fragmentation engine works
//! against.
//!
//! The engine never names a concrete molecule type. Everything it needs --
//! topology queries, bond and charge edits, hydrogen bookkeeping, splitting --
//! is expressed through [`MoleculeHandle`], keyed by an opaque atom
//! identifier. The crate's own [`Molecule`] implements the trait, and any
//! other backing representation can plug in by doing the same.

use super::models::atom::Hybridization;
use super::models::element::Element;
use super::models::ids::AtomId;
use super::models::molecule::Molecule;
use super::models::topology::BondOrder;
use std::fmt::Debug;
use std::hash::Hash;

/// Capability interface over an editable molecular graph.
///
/// Atom identifiers must remain stable across [`Clone`]: an ID obtained from
/// one handle addresses the same atom in every clone of it. Mechanisms rely
/// on this to match atoms in a parent molecule and then edit a duplicate.
pub trait MoleculeHandle: Clone {
    /// Opaque, stable identifier of an atom within this molecule.
    type AtomId: Copy + Eq + Ord + Hash + Debug;

    /// Returns all atom identifiers in ascending order.
    fn atom_ids(&self) -> Vec<Self::AtomId>;
    /// Returns the number of explicit atoms.
    fn num_atoms(&self) -> usize;

    /// Returns the element of an atom, or `None` if the ID is stale.
    fn element(&self, id: Self::AtomId) -> Option<Element>;
    /// Returns the formal charge of an atom.
    fn formal_charge(&self, id: Self::AtomId) -> Option<i8>;
    /// Sets the formal charge of an atom. Returns `false` for a stale ID.
    fn set_formal_charge(&mut self, id: Self::AtomId, charge: i8) -> bool;
    /// Derives the hybridization of an atom from its bond orders.
    fn hybridization(&self, id: Self::AtomId) -> Option<Hybridization>;

    /// Number of hydrogens the atom is owed but does not carry explicitly.
    fn implicit_hydrogen_count(&self, id: Self::AtomId) -> u8;
    /// Total hydrogen count, implicit plus explicit.
    fn hydrogen_count(&self, id: Self::AtomId) -> u8;

    /// Returns the atoms directly bonded to the given atom.
    fn neighbors(&self, id: Self::AtomId) -> Vec<Self::AtomId>;
    /// Returns the order of the bond between two atoms, if bonded.
    fn bond_order(&self, a: Self::AtomId, b: Self::AtomId) -> Option<BondOrder>;
    /// Changes the order of an existing bond. Returns `false` if not bonded.
    fn set_bond_order(&mut self, a: Self::AtomId, b: Self::AtomId, order: BondOrder) -> bool;
    /// Adds a bond. Idempotent; returns `false` for stale IDs or self-loops.
    fn add_bond(&mut self, a: Self::AtomId, b: Self::AtomId, order: BondOrder) -> bool;
    /// Deletes the bond between two atoms. Returns `false` if not bonded.
    fn delete_bond(&mut self, a: Self::AtomId, b: Self::AtomId) -> bool;
    /// Exchanges the far ends of the bonds `anchor1`-`mover1` and
    /// `anchor2`-`mover2`; each rewired bond keeps the order of the bond that
    /// previously held its moving atom.
    fn swap_attachments(
        &mut self,
        anchor1: Self::AtomId,
        mover1: Self::AtomId,
        anchor2: Self::AtomId,
        mover2: Self::AtomId,
    ) -> bool;

    /// Whether the molecule carries explicit hydrogens.
    fn hydrogens_added(&self) -> bool;
    /// Materializes every implicit hydrogen as an explicit atom.
    fn add_hydrogens(&mut self);
    /// Deletes every explicit hydrogen atom.
    fn remove_hydrogens(&mut self);
    /// Deletes one explicit hydrogen bonded to the given atom, if any.
    fn remove_one_hydrogen(&mut self, id: Self::AtomId) -> bool;
    /// Adjusts formal charges to the protonation state at the given pH and
    /// saturates the result with explicit hydrogens.
    fn correct_for_ph(&mut self, ph: f64);

    /// Splits the molecule into connected components, preserving atom IDs.
    fn split(&self) -> Vec<Self>;

    /// Returns the non-hydrogen neighbors of an atom.
    fn heavy_neighbors(&self, id: Self::AtomId) -> Vec<Self::AtomId> {
        self.neighbors(id)
            .into_iter()
            .filter(|&n| self.element(n) != Some(Element::H))
            .collect()
    }

    /// Returns the number of non-hydrogen bonds of an atom.
    fn heavy_degree(&self, id: Self::AtomId) -> usize {
        self.heavy_neighbors(id).len()
    }
}

impl MoleculeHandle for Molecule {
    type AtomId = AtomId;

    fn atom_ids(&self) -> Vec<AtomId> {
        let mut ids: Vec<AtomId> = self.atoms_iter().map(|(id, _)| id).collect();
        ids.sort_unstable();
        ids
    }

    fn num_atoms(&self) -> usize {
        Molecule::num_atoms(self)
    }

    fn element(&self, id: AtomId) -> Option<Element> {
        self.atom(id).map(|atom| atom.element)
    }

    fn formal_charge(&self, id: AtomId) -> Option<i8> {
        self.atom(id).map(|atom| atom.formal_charge)
    }

    fn set_formal_charge(&mut self, id: AtomId, charge: i8) -> bool {
        match self.atom_mut(id) {
            Some(atom) => {
                atom.formal_charge = charge;
                true
            }
            None => false,
        }
    }

    fn hybridization(&self, id: AtomId) -> Option<Hybridization> {
        Molecule::hybridization(self, id)
    }

    fn implicit_hydrogen_count(&self, id: AtomId) -> u8 {
        Molecule::implicit_hydrogen_count(self, id)
    }

    fn hydrogen_count(&self, id: AtomId) -> u8 {
        Molecule::hydrogen_count(self, id)
    }

    fn neighbors(&self, id: AtomId) -> Vec<AtomId> {
        self.get_bonded_neighbors(id)
            .map(|slice| slice.to_vec())
            .unwrap_or_default()
    }

    fn bond_order(&self, a: AtomId, b: AtomId) -> Option<BondOrder> {
        self.bond_order_between(a, b)
    }

    fn set_bond_order(&mut self, a: AtomId, b: AtomId, order: BondOrder) -> bool {
        self.set_bond_order_between(a, b, order)
    }

    fn add_bond(&mut self, a: AtomId, b: AtomId, order: BondOrder) -> bool {
        Molecule::add_bond(self, a, b, order).is_some()
    }

    fn delete_bond(&mut self, a: AtomId, b: AtomId) -> bool {
        Molecule::delete_bond(self, a, b).is_some()
    }

    fn swap_attachments(
        &mut self,
        anchor1: AtomId,
        mover1: AtomId,
        anchor2: AtomId,
        mover2: AtomId,
    ) -> bool {
        Molecule::swap_attachments(self, anchor1, mover1, anchor2, mover2)
    }

    fn hydrogens_added(&self) -> bool {
        Molecule::hydrogens_added(self)
    }

    fn add_hydrogens(&mut self) {
        Molecule::add_hydrogens(self)
    }

    fn remove_hydrogens(&mut self) {
        Molecule::remove_hydrogens(self)
    }

    fn remove_one_hydrogen(&mut self, id: AtomId) -> bool {
        Molecule::remove_one_hydrogen(self, id)
    }

    fn correct_for_ph(&mut self, ph: f64) {
        Molecule::correct_for_ph(self, ph)
    }

    fn split(&self) -> Vec<Molecule> {
        Molecule::split(self)
    }

    fn heavy_neighbors(&self, id: AtomId) -> Vec<AtomId> {
        Molecule::heavy_neighbors(self, id)
    }

    fn heavy_degree(&self, id: AtomId) -> usize {
        Molecule::heavy_degree(self, id)
    }
}
