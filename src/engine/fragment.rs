//! The fragmentation orchestrator.
//!
//! [`fragment`] ties the engine together: it normalizes the molecule's
//! protonation state, finds every site the configured rules can act on,
//! applies the mechanisms, and returns the atom-conserving fragment sets with
//! their hydrogen state matching the caller's.

use super::config::FragmentConfig;
use super::error::FragmentError;
use super::filter::allowable_fragment_sets;
use super::matcher::{carbonyl_anchor_matches, ether_anchor_matches};
use super::mechanisms::{FragmentSet, carbon_oxygen_esteal, carbonyl_oxygen_dump};
use crate::core::handle::MoleculeHandle;
use crate::core::models::element::Element;

/// Fragments a molecule under the given configuration.
///
/// Matching runs on the heavy-atom graph, so explicit hydrogens are stripped
/// for the duration of the call. A molecule arriving without explicit
/// hydrogens is first charge-corrected for `config.ph` and is returned
/// without explicit hydrogens; a molecule arriving saturated keeps its
/// protonation state and is returned saturated, as are its fragments. Apart
/// from that hydrogen-state side effect the molecule is unchanged.
///
/// # Return
///
/// One [`FragmentSet`] per applicable cleavage. A molecule no rule matches
/// yields `Ok(vec![])`.
///
/// # Errors
///
/// Returns [`FragmentError::NotImplemented`] when `config.uniq` is set; the
/// molecule is untouched in that case.
pub fn fragment<M: MoleculeHandle>(
    mol: &mut M,
    config: &FragmentConfig,
) -> Result<Vec<FragmentSet<M>>, FragmentError> {
    if config.uniq {
        return Err(FragmentError::NotImplemented {
            feature: "unique fragment-set filtering",
        });
    }

    let had_hydrogens = mol.hydrogens_added();
    if !had_hydrogens {
        mol.correct_for_ph(config.ph);
    }
    mol.remove_hydrogens();

    let mut fragment_sets: Vec<FragmentSet<M>> = Vec::new();

    if config.wants_carbonyl_pattern() {
        for (carbon, oxygen) in carbonyl_anchor_matches(mol, true) {
            let carbon_nbrs: Vec<M::AtomId> = mol
                .heavy_neighbors(carbon)
                .into_iter()
                .filter(|&n| mol.element(n) == Some(Element::C))
                .collect();
            for carbon_nbr in carbon_nbrs {
                fragment_sets.push(carbonyl_oxygen_dump(mol, carbon, oxygen, carbon_nbr)?);
            }
        }
    }
    if config.wants_ether_pattern() {
        for (carbon, oxygen) in ether_anchor_matches(mol, true) {
            fragment_sets.push(carbon_oxygen_esteal(mol, carbon, oxygen)?);
        }
    }

    let mut fragment_sets = allowable_fragment_sets(mol, fragment_sets);

    if had_hydrogens {
        for set in &mut fragment_sets {
            for frag in set {
                frag.add_hydrogens();
            }
        }
    } else {
        for set in &mut fragment_sets {
            for frag in set {
                frag.remove_hydrogens();
            }
        }
        mol.remove_hydrogens();
    }

    Ok(fragment_sets)
}
