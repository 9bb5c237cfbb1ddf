//! Atom-conservation filtering of candidate fragment sets.
//!
//! A fragment set is only physically plausible if it accounts for every atom
//! of the parent, hydrogens included. Comparing explicit atom counts alone
//! would mis-score fragments whose hydrogens are still implicit, so the check
//! runs on the saturated count: explicit atoms plus the hydrogens each atom
//! is still owed. That measure is representation-independent, and it
//! tolerates the one-proton debt a charge-separated cleavage leaves behind.

use super::mechanisms::FragmentSet;
use crate::core::handle::MoleculeHandle;

/// Number of atoms the molecule would have if fully saturated: explicit atoms
/// plus every implicit hydrogen.
pub fn saturated_atom_count<M: MoleculeHandle>(mol: &M) -> usize {
    let implicit: usize = mol
        .atom_ids()
        .into_iter()
        .map(|id| mol.implicit_hydrogen_count(id) as usize)
        .sum();
    mol.num_atoms() + implicit
}

/// Checks that a fragment set conserves the parent's atoms.
///
/// # Return
///
/// `true` when the saturated atom counts of the fragments sum to the
/// parent's.
pub fn allowable_fragmentation<M: MoleculeHandle>(parent: &M, frags: &[M]) -> bool {
    let total: usize = frags.iter().map(saturated_atom_count).sum();
    saturated_atom_count(parent) == total
}

/// Retains the fragment sets that conserve the parent's atoms.
///
/// The parent is saturated with explicit hydrogens first, so callers see it
/// in the same representation the surviving fragments were generated from.
pub fn allowable_fragment_sets<M: MoleculeHandle>(
    parent: &mut M,
    sets: Vec<FragmentSet<M>>,
) -> Vec<FragmentSet<M>> {
    parent.add_hydrogens();
    sets.into_iter()
        .filter(|set| allowable_fragmentation(parent, set))
        .collect()
}
