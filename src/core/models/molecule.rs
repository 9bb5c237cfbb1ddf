use super::atom::{Atom, Hybridization};
use super::element::Element;
use super::ids::AtomId;
use super::topology::{Bond, BondOrder};
use slotmap::{SecondaryMap, SlotMap};
use std::collections::VecDeque;

/// Represents a small-molecule graph of atoms and bonds.
///
/// This struct is the central data structure of the crate. It owns its atoms
/// and bonds, maintains an adjacency cache for neighbor queries, and supports
/// the operations the fragmentation engine is built on: duplication with
/// stable atom identifiers, connected-component splitting, and transient
/// bond/charge editing.
///
/// Atom identifiers are slot-map keys, so cloning a molecule preserves every
/// identifier. An `AtomId` obtained from a molecule addresses the
/// corresponding atom in any clone of it, which is what lets a mechanism work
/// on an independent copy while anchoring on atoms matched in the original.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    /// Primary storage for atoms using a slot map for stable ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// List of all bonds in the molecule.
    bonds: Vec<Bond>,
    /// Cached adjacency list for bond connectivity, indexed by atom ID.
    bond_adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
    /// Whether explicit hydrogens have been materialized on this molecule.
    pub(super) hydrogens_added: bool,
}

impl Molecule {
    /// Creates a new, empty molecule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a mutable reference to an atom by its ID.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Returns an iterator over all atoms in the molecule.
    ///
    /// # Return
    ///
    /// An iterator yielding `(AtomId, &Atom)` pairs.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Returns the number of explicit atoms in the molecule.
    ///
    /// Implicit hydrogens are not counted; see
    /// [`implicit_hydrogen_count`](Self::implicit_hydrogen_count).
    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Returns a slice of all bonds in the molecule.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Adds a neutral atom of the given element.
    ///
    /// # Return
    ///
    /// The stable ID of the new atom.
    pub fn add_atom(&mut self, element: Element) -> AtomId {
        self.add_atom_with_charge(element, 0)
    }

    /// Adds an atom with an explicit formal charge.
    pub fn add_atom_with_charge(&mut self, element: Element, formal_charge: i8) -> AtomId {
        let id = self.atoms.insert(Atom::with_charge(element, formal_charge));
        self.bond_adjacency.insert(id, Vec::new());
        id
    }

    /// Adds a bond between two atoms.
    ///
    /// This method creates a bond between the specified atoms and updates
    /// the adjacency cache. It is idempotent; adding an existing bond
    /// succeeds without creating duplicates.
    ///
    /// # Return
    ///
    /// Returns `Some(())` if successful, otherwise `None` (e.g., if atoms don't exist).
    pub fn add_bond(&mut self, atom1_id: AtomId, atom2_id: AtomId, order: BondOrder) -> Option<()> {
        if atom1_id == atom2_id {
            return None;
        }
        if !self.atoms.contains_key(atom1_id) || !self.atoms.contains_key(atom2_id) {
            return None;
        }

        if let Some(neighbors) = self.bond_adjacency.get(atom1_id) {
            if neighbors.contains(&atom2_id) {
                // Bond already exists, operation is successful (idempotent)
                return Some(());
            }
        }

        self.bonds.push(Bond::new(atom1_id, atom2_id, order));
        self.bond_adjacency[atom1_id].push(atom2_id);
        self.bond_adjacency[atom2_id].push(atom1_id);
        Some(())
    }

    /// Removes an atom from the molecule.
    ///
    /// This method removes the atom and all associated data, including
    /// bonds and adjacency information.
    ///
    /// # Return
    ///
    /// Returns `Some(Atom)` if the atom existed and was removed, otherwise `None`.
    pub fn remove_atom(&mut self, atom_id: AtomId) -> Option<Atom> {
        let atom = self.atoms.remove(atom_id)?;

        // 1. Remove all bonds connected to this atom
        let original_bonds = std::mem::take(&mut self.bonds);
        self.bonds = original_bonds
            .into_iter()
            .filter(|bond| !bond.contains(atom_id))
            .collect();

        // 2. Clean up adjacency list
        let neighbors = self.bond_adjacency.remove(atom_id).unwrap_or_default();
        for neighbor_id in neighbors {
            if let Some(adjacency) = self.bond_adjacency.get_mut(neighbor_id) {
                adjacency.retain(|&id| id != atom_id);
            }
        }

        Some(atom)
    }

    /// Deletes the bond between two atoms.
    ///
    /// # Return
    ///
    /// Returns the removed `Bond` if one connected the pair, otherwise `None`.
    pub fn delete_bond(&mut self, atom1_id: AtomId, atom2_id: AtomId) -> Option<Bond> {
        let position = self
            .bonds
            .iter()
            .position(|bond| bond.connects(atom1_id, atom2_id))?;
        let bond = self.bonds.remove(position);

        if let Some(adjacency) = self.bond_adjacency.get_mut(atom1_id) {
            adjacency.retain(|&id| id != atom2_id);
        }
        if let Some(adjacency) = self.bond_adjacency.get_mut(atom2_id) {
            adjacency.retain(|&id| id != atom1_id);
        }

        Some(bond)
    }

    /// Finds the bond connecting two atoms, in either orientation.
    pub fn bond_between(&self, atom1_id: AtomId, atom2_id: AtomId) -> Option<&Bond> {
        self.bonds
            .iter()
            .find(|bond| bond.connects(atom1_id, atom2_id))
    }

    /// Returns the order of the bond between two atoms, if they are bonded.
    pub fn bond_order_between(&self, atom1_id: AtomId, atom2_id: AtomId) -> Option<BondOrder> {
        self.bond_between(atom1_id, atom2_id).map(|bond| bond.order)
    }

    /// Sets the order of the bond between two atoms.
    ///
    /// # Return
    ///
    /// `true` if a bond connected the pair and its order was updated.
    pub fn set_bond_order_between(
        &mut self,
        atom1_id: AtomId,
        atom2_id: AtomId,
        order: BondOrder,
    ) -> bool {
        match self
            .bonds
            .iter_mut()
            .find(|bond| bond.connects(atom1_id, atom2_id))
        {
            Some(bond) => {
                bond.order = order;
                true
            }
            None => false,
        }
    }

    /// Retrieves the bonded neighbors of an atom.
    ///
    /// This method returns the list of atoms directly bonded to the given atom,
    /// using the cached adjacency information.
    ///
    /// # Return
    ///
    /// Returns `Some(&[AtomId])` if the atom exists, otherwise `None`.
    pub fn get_bonded_neighbors(&self, atom_id: AtomId) -> Option<&[AtomId]> {
        self.bond_adjacency.get(atom_id).map(|v| v.as_slice())
    }

    /// Returns the non-hydrogen neighbors of an atom.
    pub fn heavy_neighbors(&self, atom_id: AtomId) -> Vec<AtomId> {
        self.get_bonded_neighbors(atom_id)
            .map(|neighbors| {
                neighbors
                    .iter()
                    .copied()
                    .filter(|&n| self.atoms.get(n).is_some_and(|a| !a.is_hydrogen()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the number of non-hydrogen bonds of an atom.
    pub fn heavy_degree(&self, atom_id: AtomId) -> usize {
        self.heavy_neighbors(atom_id).len()
    }

    /// Returns the explicit hydrogen atoms bonded to an atom.
    pub fn hydrogen_neighbors(&self, atom_id: AtomId) -> Vec<AtomId> {
        self.get_bonded_neighbors(atom_id)
            .map(|neighbors| {
                neighbors
                    .iter()
                    .copied()
                    .filter(|&n| self.atoms.get(n).is_some_and(|a| a.is_hydrogen()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sum of the bond orders incident on an atom.
    pub(super) fn bond_order_sum(&self, atom_id: AtomId) -> u8 {
        self.bonds
            .iter()
            .filter(|bond| bond.contains(atom_id))
            .map(|bond| bond.order.order())
            .sum()
    }

    /// Returns the number of implicit (not materialized) hydrogens on an atom.
    ///
    /// The count is the atom's charge-adjusted valence deficit: the expected
    /// valence of its element at its formal charge, minus the bond orders it
    /// already carries. Hydrogen atoms themselves always report zero. Because
    /// the count is derived from the live graph, a feinted double bond lowers
    /// it and restoring the bond restores it.
    pub fn implicit_hydrogen_count(&self, atom_id: AtomId) -> u8 {
        let Some(atom) = self.atoms.get(atom_id) else {
            return 0;
        };
        if atom.is_hydrogen() {
            return 0;
        }
        let expected = atom.element.valence_with_charge(atom.formal_charge);
        expected.saturating_sub(self.bond_order_sum(atom_id))
    }

    /// Returns the total hydrogen count of an atom, implicit plus explicit.
    pub fn hydrogen_count(&self, atom_id: AtomId) -> u8 {
        self.implicit_hydrogen_count(atom_id) + self.hydrogen_neighbors(atom_id).len() as u8
    }

    /// Derives the hybridization tag of an atom from its bond orders.
    ///
    /// # Return
    ///
    /// Returns `Some(Hybridization)` if the atom exists, otherwise `None`.
    pub fn hybridization(&self, atom_id: AtomId) -> Option<Hybridization> {
        if !self.atoms.contains_key(atom_id) {
            return None;
        }
        let mut doubles = 0usize;
        let mut triples = 0usize;
        for bond in self.bonds.iter().filter(|bond| bond.contains(atom_id)) {
            match bond.order {
                BondOrder::Double => doubles += 1,
                BondOrder::Triple => triples += 1,
                BondOrder::Single => {}
            }
        }
        Some(if triples > 0 || doubles >= 2 {
            Hybridization::Sp
        } else if doubles == 1 {
            Hybridization::Sp2
        } else {
            Hybridization::Sp3
        })
    }

    /// Groups the molecule's atoms into connected components.
    ///
    /// # Return
    ///
    /// One sorted ID list per component, ordered by their smallest member.
    pub fn connected_components(&self) -> Vec<Vec<AtomId>> {
        let mut ids: Vec<AtomId> = self.atoms.keys().collect();
        ids.sort_unstable();

        let mut visited: SecondaryMap<AtomId, ()> = SecondaryMap::new();
        let mut components = Vec::new();
        for &start in &ids {
            if visited.contains_key(start) {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = VecDeque::from([start]);
            visited.insert(start, ());
            while let Some(id) = queue.pop_front() {
                component.push(id);
                if let Some(neighbors) = self.bond_adjacency.get(id) {
                    for &neighbor in neighbors {
                        if !visited.contains_key(neighbor) {
                            visited.insert(neighbor, ());
                            queue.push_back(neighbor);
                        }
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        components
    }

    /// Splits the molecule into its connected components.
    ///
    /// Each component becomes an independent `Molecule`. Atom identifiers are
    /// preserved: an atom keeps the same `AtomId` in the component molecule
    /// that it had in the parent, upholding the cross-reference invariant the
    /// mechanism appliers rely on.
    pub fn split(&self) -> Vec<Molecule> {
        let components = self.connected_components();
        if components.len() <= 1 {
            return vec![self.clone()];
        }
        components
            .into_iter()
            .map(|component| {
                let mut fragment = self.clone();
                let stray: Vec<AtomId> = fragment
                    .atoms
                    .keys()
                    .filter(|id| !component.contains(id))
                    .collect();
                for id in stray {
                    fragment.remove_atom(id);
                }
                fragment
            })
            .collect()
    }

    /// Exchanges the far ends of two bonds.
    ///
    /// The bond `anchor1`–`mover1` becomes `anchor1`–`mover2` and the bond
    /// `anchor2`–`mover2` becomes `anchor2`–`mover1`; each rewired bond keeps
    /// the order of the bond that previously held its moving atom. This is the
    /// split-site repositioning primitive of the peroxide mechanism.
    ///
    /// # Return
    ///
    /// `true` if both bonds existed and were rewired; `false` leaves the
    /// molecule unchanged.
    pub fn swap_attachments(
        &mut self,
        anchor1: AtomId,
        mover1: AtomId,
        anchor2: AtomId,
        mover2: AtomId,
    ) -> bool {
        if self.bond_between(anchor1, mover1).is_none()
            || self.bond_between(anchor2, mover2).is_none()
        {
            return false;
        }
        let first = self
            .delete_bond(anchor1, mover1)
            .map(|bond| bond.order)
            .unwrap_or_default();
        let second = self
            .delete_bond(anchor2, mover2)
            .map(|bond| bond.order)
            .unwrap_or_default();
        self.add_bond(anchor1, mover2, second);
        self.add_bond(anchor2, mover1, first);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EthanolRefs {
        c1: AtomId,
        c2: AtomId,
        o: AtomId,
    }

    /// CH3-CH2-OH as a heavy-atom graph (hydrogens implicit).
    fn create_ethanol() -> (Molecule, EthanolRefs) {
        let mut mol = Molecule::new();
        let c1 = mol.add_atom(Element::C);
        let c2 = mol.add_atom(Element::C);
        let o = mol.add_atom(Element::O);
        mol.add_bond(c1, c2, BondOrder::Single).unwrap();
        mol.add_bond(c2, o, BondOrder::Single).unwrap();
        (mol, EthanolRefs { c1, c2, o })
    }

    mod core_functionality {
        use super::*;

        #[test]
        fn molecule_creation_and_access() {
            let (mol, refs) = create_ethanol();

            assert_eq!(mol.num_atoms(), 3);
            assert_eq!(mol.bonds().len(), 2);
            assert_eq!(mol.atom(refs.o).unwrap().element, Element::O);
            assert_eq!(mol.atom(refs.c1).unwrap().formal_charge, 0);
            assert_eq!(
                mol.bond_order_between(refs.c1, refs.c2),
                Some(BondOrder::Single)
            );
            assert!(mol.bond_order_between(refs.c1, refs.o).is_none());
        }

        #[test]
        fn add_bond_rejects_missing_and_self_pairs() {
            let (mut mol, refs) = create_ethanol();
            let ghost = {
                let mut other = Molecule::new();
                other.add_atom(Element::N)
            };

            assert!(mol.add_bond(refs.c1, refs.c1, BondOrder::Single).is_none());
            assert!(mol.add_bond(refs.c1, ghost, BondOrder::Single).is_none());
        }

        #[test]
        fn idempotent_add_bond_does_not_create_duplicates() {
            let (mut mol, refs) = create_ethanol();
            mol.add_bond(refs.c2, refs.o, BondOrder::Single).unwrap();
            mol.add_bond(refs.o, refs.c2, BondOrder::Single).unwrap();

            assert_eq!(mol.bonds().len(), 2);
            assert_eq!(mol.get_bonded_neighbors(refs.o).unwrap().len(), 1);
        }

        #[test]
        fn atom_removal_updates_molecule_correctly() {
            let (mut mol, refs) = create_ethanol();

            let removed = mol.remove_atom(refs.c2).unwrap();

            assert_eq!(removed.element, Element::C);
            assert_eq!(mol.num_atoms(), 2);
            assert!(mol.atom(refs.c2).is_none());
            assert!(mol.bonds().is_empty());
            assert!(mol.get_bonded_neighbors(refs.c2).is_none());
            assert!(mol.get_bonded_neighbors(refs.c1).unwrap().is_empty());
        }

        #[test]
        fn delete_bond_removes_exactly_one_pair() {
            let (mut mol, refs) = create_ethanol();

            let bond = mol.delete_bond(refs.o, refs.c2).unwrap();
            assert!(bond.connects(refs.c2, refs.o));
            assert_eq!(mol.bonds().len(), 1);
            assert!(mol.delete_bond(refs.o, refs.c2).is_none());
            assert!(
                mol.get_bonded_neighbors(refs.c2)
                    .unwrap()
                    .contains(&refs.c1)
            );
        }

        #[test]
        fn set_bond_order_between_updates_in_place() {
            let (mut mol, refs) = create_ethanol();

            assert!(mol.set_bond_order_between(refs.c2, refs.o, BondOrder::Double));
            assert_eq!(
                mol.bond_order_between(refs.o, refs.c2),
                Some(BondOrder::Double)
            );
            assert!(!mol.set_bond_order_between(refs.c1, refs.o, BondOrder::Double));
        }
    }

    mod derived_chemistry {
        use super::*;

        #[test]
        fn implicit_hydrogens_follow_valence_deficit() {
            let (mol, refs) = create_ethanol();

            assert_eq!(mol.implicit_hydrogen_count(refs.c1), 3);
            assert_eq!(mol.implicit_hydrogen_count(refs.c2), 2);
            assert_eq!(mol.implicit_hydrogen_count(refs.o), 1);
            assert_eq!(mol.hydrogen_count(refs.o), 1);
        }

        #[test]
        fn charge_shifts_the_implicit_hydrogen_count() {
            let (mut mol, refs) = create_ethanol();
            mol.atom_mut(refs.o).unwrap().formal_charge = -1;

            // Alkoxide oxygen binds one: its single bond satisfies it.
            assert_eq!(mol.implicit_hydrogen_count(refs.o), 0);
        }

        #[test]
        fn feinted_double_bond_lowers_the_count_until_restored() {
            let (mut mol, refs) = create_ethanol();

            mol.set_bond_order_between(refs.c2, refs.o, BondOrder::Double);
            assert_eq!(mol.implicit_hydrogen_count(refs.c2), 1);
            assert_eq!(mol.implicit_hydrogen_count(refs.o), 0);

            mol.set_bond_order_between(refs.c2, refs.o, BondOrder::Single);
            assert_eq!(mol.implicit_hydrogen_count(refs.c2), 2);
            assert_eq!(mol.implicit_hydrogen_count(refs.o), 1);
        }

        #[test]
        fn hybridization_tracks_bond_orders() {
            let (mut mol, refs) = create_ethanol();

            assert_eq!(mol.hybridization(refs.c2), Some(Hybridization::Sp3));
            mol.set_bond_order_between(refs.c2, refs.o, BondOrder::Double);
            assert_eq!(mol.hybridization(refs.c2), Some(Hybridization::Sp2));
            assert_eq!(mol.hybridization(refs.o), Some(Hybridization::Sp2));
            mol.set_bond_order_between(refs.c2, refs.o, BondOrder::Triple);
            assert_eq!(mol.hybridization(refs.c2), Some(Hybridization::Sp));
        }

        #[test]
        fn heavy_queries_exclude_hydrogens() {
            let (mut mol, refs) = create_ethanol();
            let h = mol.add_atom(Element::H);
            mol.add_bond(refs.o, h, BondOrder::Single).unwrap();

            assert_eq!(mol.heavy_degree(refs.o), 1);
            assert_eq!(mol.heavy_neighbors(refs.o), vec![refs.c2]);
            assert_eq!(mol.hydrogen_neighbors(refs.o), vec![h]);
            assert_eq!(mol.hydrogen_count(refs.o), 1);
            assert_eq!(mol.implicit_hydrogen_count(refs.o), 0);
        }
    }

    mod duplication_and_splitting {
        use super::*;

        #[test]
        fn clone_preserves_atom_identifiers() {
            let (mol, refs) = create_ethanol();
            let copy = mol.clone();

            assert_eq!(copy.atom(refs.o).unwrap().element, Element::O);
            assert_eq!(
                copy.bond_order_between(refs.c1, refs.c2),
                Some(BondOrder::Single)
            );
            assert_eq!(copy.num_atoms(), mol.num_atoms());
        }

        #[test]
        fn edits_to_a_clone_leave_the_original_untouched() {
            let (mol, refs) = create_ethanol();
            let mut copy = mol.clone();
            copy.delete_bond(refs.c1, refs.c2).unwrap();
            copy.atom_mut(refs.o).unwrap().formal_charge = -1;

            assert_eq!(mol.bonds().len(), 2);
            assert_eq!(mol.atom(refs.o).unwrap().formal_charge, 0);
        }

        #[test]
        fn split_of_a_connected_molecule_returns_one_copy() {
            let (mol, _) = create_ethanol();
            let parts = mol.split();
            assert_eq!(parts.len(), 1);
            assert_eq!(parts[0].num_atoms(), 3);
        }

        #[test]
        fn split_separates_components_and_keeps_ids() {
            let (mut mol, refs) = create_ethanol();
            mol.delete_bond(refs.c2, refs.o).unwrap();

            let parts = mol.split();
            assert_eq!(parts.len(), 2);

            let ethyl = parts.iter().find(|p| p.atom(refs.c1).is_some()).unwrap();
            let hydroxyl = parts.iter().find(|p| p.atom(refs.o).is_some()).unwrap();
            assert_eq!(ethyl.num_atoms(), 2);
            assert!(ethyl.atom(refs.o).is_none());
            assert_eq!(hydroxyl.num_atoms(), 1);
            assert_eq!(hydroxyl.atom(refs.o).unwrap().element, Element::O);
        }

        #[test]
        fn connected_components_cover_every_atom_once() {
            let (mut mol, _) = create_ethanol();
            let lone = mol.add_atom(Element::N);

            let components = mol.connected_components();
            assert_eq!(components.len(), 2);
            let total: usize = components.iter().map(|c| c.len()).sum();
            assert_eq!(total, mol.num_atoms());
            assert!(components.iter().any(|c| c == &vec![lone]));
        }
    }

    mod attachment_swapping {
        use super::*;

        #[test]
        fn swap_attachments_rewires_both_bonds() {
            // C1-C2-O1-O2 (a peroxide chain).
            let mut mol = Molecule::new();
            let c1 = mol.add_atom(Element::C);
            let c2 = mol.add_atom(Element::C);
            let o1 = mol.add_atom(Element::O);
            let o2 = mol.add_atom(Element::O);
            mol.add_bond(c1, c2, BondOrder::Single).unwrap();
            mol.add_bond(c2, o1, BondOrder::Single).unwrap();
            mol.add_bond(o1, o2, BondOrder::Single).unwrap();

            assert!(mol.swap_attachments(c2, c1, o1, o2));

            assert!(mol.bond_between(c2, o2).is_some());
            assert!(mol.bond_between(o1, c1).is_some());
            assert!(mol.bond_between(c2, c1).is_none());
            assert!(mol.bond_between(o1, o2).is_none());
            assert_eq!(mol.bonds().len(), 3);
        }

        #[test]
        fn swap_attachments_round_trips() {
            let mut mol = Molecule::new();
            let c1 = mol.add_atom(Element::C);
            let c2 = mol.add_atom(Element::C);
            let o1 = mol.add_atom(Element::O);
            let o2 = mol.add_atom(Element::O);
            mol.add_bond(c1, c2, BondOrder::Single).unwrap();
            mol.add_bond(c2, o1, BondOrder::Single).unwrap();
            mol.add_bond(o1, o2, BondOrder::Single).unwrap();

            assert!(mol.swap_attachments(c2, c1, o1, o2));
            assert!(mol.swap_attachments(c2, o2, o1, c1));

            assert!(mol.bond_between(c1, c2).is_some());
            assert!(mol.bond_between(c2, o1).is_some());
            assert!(mol.bond_between(o1, o2).is_some());
        }

        #[test]
        fn swap_attachments_fails_without_touching_anything() {
            let (mut mol, refs) = create_ethanol();

            assert!(!mol.swap_attachments(refs.c1, refs.o, refs.c2, refs.o));
            assert_eq!(mol.bonds().len(), 2);
            assert!(mol.bond_between(refs.c1, refs.c2).is_some());
        }
    }
}
