//! Structural pattern matching for fragmentation sites.
//!
//! Two anchor patterns cover every rule the engine knows. The carbonyl
//! pattern finds a carbon single-bonded to an oxygen that either carries
//! exactly one hydrogen or carries a formal charge (hydroxyls, alkoxides,
//! protonated ethers). The ether pattern finds a carbon single-bonded to a
//! neutral oxygen with two heavy neighbors (ether and ester linkages).
//!
//! Symmetric duplicate sites are collapsed with Morgan-style iterated atom
//! invariants, so a symmetric molecule yields each distinct site once.

use crate::core::handle::MoleculeHandle;
use crate::core::models::element::Element;
use crate::core::models::topology::BondOrder;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// How many neighborhood-refinement rounds the invariants go through. Three
/// rounds separate atoms up to three bonds apart, enough for the local
/// patterns matched here.
const INVARIANT_ROUNDS: usize = 3;

/// Computes an equivalence-class invariant for every atom.
///
/// Atoms that are structurally interchangeable receive equal invariants.
/// Distinct invariants do not guarantee distinct environments in pathological
/// graphs, but equal ones are what the matchers rely on to collapse symmetric
/// sites.
pub(super) fn atom_invariants<M: MoleculeHandle>(mol: &M) -> HashMap<M::AtomId, u64> {
    let ids = mol.atom_ids();

    let mut invariants: HashMap<M::AtomId, u64> = HashMap::with_capacity(ids.len());
    for &id in &ids {
        let mut hasher = DefaultHasher::new();
        mol.element(id).hash(&mut hasher);
        mol.formal_charge(id).hash(&mut hasher);
        mol.hydrogen_count(id).hash(&mut hasher);
        mol.heavy_degree(id).hash(&mut hasher);
        invariants.insert(id, hasher.finish());
    }

    for _ in 0..INVARIANT_ROUNDS {
        let mut refined: HashMap<M::AtomId, u64> = HashMap::with_capacity(ids.len());
        for &id in &ids {
            let mut environment: Vec<(BondOrder, u64)> = mol
                .neighbors(id)
                .into_iter()
                .filter_map(|n| Some((mol.bond_order(id, n)?, invariants[&n])))
                .collect();
            environment.sort_unstable();

            let mut hasher = DefaultHasher::new();
            invariants[&id].hash(&mut hasher);
            environment.hash(&mut hasher);
            refined.insert(id, hasher.finish());
        }
        invariants = refined;
    }
    invariants
}

/// Finds carbonyl-forming sites: each `(carbon, oxygen)` pair where the
/// carbon is single-bonded to an oxygen that carries exactly one hydrogen or
/// a formal charge.
///
/// Pairs are returned in ascending atom-ID order; with `unique_only`,
/// symmetric duplicates are collapsed. The output is deterministic for a
/// given molecule.
pub(super) fn carbonyl_anchor_matches<M: MoleculeHandle>(
    mol: &M,
    unique_only: bool,
) -> Vec<(M::AtomId, M::AtomId)> {
    anchor_matches(mol, unique_only, |mol, oxygen| {
        mol.hydrogen_count(oxygen) == 1 || mol.formal_charge(oxygen) != Some(0)
    })
}

/// Finds ether-linkage sites: each `(carbon, oxygen)` pair where the carbon
/// is single-bonded to a neutral oxygen bridging two heavy atoms.
pub(super) fn ether_anchor_matches<M: MoleculeHandle>(
    mol: &M,
    unique_only: bool,
) -> Vec<(M::AtomId, M::AtomId)> {
    anchor_matches(mol, unique_only, |mol, oxygen| {
        mol.formal_charge(oxygen) == Some(0) && mol.heavy_degree(oxygen) == 2
    })
}

fn anchor_matches<M, P>(mol: &M, unique_only: bool, oxygen_predicate: P) -> Vec<(M::AtomId, M::AtomId)>
where
    M: MoleculeHandle,
    P: Fn(&M, M::AtomId) -> bool,
{
    let invariants = atom_invariants(mol);
    let mut seen: Vec<(u64, u64)> = Vec::new();
    let mut matches = Vec::new();

    for carbon in mol.atom_ids() {
        if mol.element(carbon) != Some(Element::C) {
            continue;
        }
        let mut oxygens: Vec<M::AtomId> = mol
            .neighbors(carbon)
            .into_iter()
            .filter(|&n| {
                mol.element(n) == Some(Element::O)
                    && mol.bond_order(carbon, n) == Some(BondOrder::Single)
            })
            .collect();
        oxygens.sort_unstable();

        for oxygen in oxygens {
            if !oxygen_predicate(mol, oxygen) {
                continue;
            }
            if unique_only {
                let key = (invariants[&carbon], invariants[&oxygen]);
                if seen.contains(&key) {
                    continue;
                }
                seen.push(key);
            }
            matches.push((carbon, oxygen));
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::AtomId;
    use crate::core::models::molecule::Molecule;

    /// CH3-O-CH3 as a heavy-atom graph.
    fn create_dimethyl_ether() -> (Molecule, AtomId, AtomId, AtomId) {
        let mut mol = Molecule::new();
        let c1 = mol.add_atom(Element::C);
        let o = mol.add_atom(Element::O);
        let c2 = mol.add_atom(Element::C);
        mol.add_bond(c1, o, BondOrder::Single).unwrap();
        mol.add_bond(o, c2, BondOrder::Single).unwrap();
        (mol, c1, o, c2)
    }

    #[test]
    fn invariants_distinguish_inequivalent_atoms() {
        // CH3-CH2-OH: every heavy atom sits in a different environment.
        let mut mol = Molecule::new();
        let c1 = mol.add_atom(Element::C);
        let c2 = mol.add_atom(Element::C);
        let o = mol.add_atom(Element::O);
        mol.add_bond(c1, c2, BondOrder::Single).unwrap();
        mol.add_bond(c2, o, BondOrder::Single).unwrap();

        let inv = atom_invariants(&mol);
        assert_ne!(inv[&c1], inv[&c2]);
        assert_ne!(inv[&c2], inv[&o]);
        assert_ne!(inv[&c1], inv[&o]);
    }

    #[test]
    fn invariants_equate_symmetric_atoms() {
        let (mol, c1, o, c2) = create_dimethyl_ether();

        let inv = atom_invariants(&mol);
        assert_eq!(inv[&c1], inv[&c2]);
        assert_ne!(inv[&c1], inv[&o]);
    }

    #[test]
    fn invariants_see_through_charge_differences() {
        let (mut mol, c1, _, c2) = create_dimethyl_ether();
        mol.atom_mut(c1).unwrap().formal_charge = 1;

        let inv = atom_invariants(&mol);
        assert_ne!(inv[&c1], inv[&c2]);
    }

    #[test]
    fn carbonyl_pattern_matches_a_hydroxyl() {
        // CH3-OH
        let mut mol = Molecule::new();
        let c = mol.add_atom(Element::C);
        let o = mol.add_atom(Element::O);
        mol.add_bond(c, o, BondOrder::Single).unwrap();

        assert_eq!(carbonyl_anchor_matches(&mol, true), vec![(c, o)]);
    }

    #[test]
    fn carbonyl_pattern_matches_a_charged_oxygen() {
        // CH3-O(-): no hydrogen, but a formal charge.
        let mut mol = Molecule::new();
        let c = mol.add_atom(Element::C);
        let o = mol.add_atom_with_charge(Element::O, -1);
        mol.add_bond(c, o, BondOrder::Single).unwrap();

        assert_eq!(carbonyl_anchor_matches(&mol, true), vec![(c, o)]);
    }

    #[test]
    fn carbonyl_pattern_skips_neutral_ether_oxygen() {
        let (mol, _, _, _) = create_dimethyl_ether();
        // The bridging oxygen has no hydrogen and no charge.
        assert!(carbonyl_anchor_matches(&mol, true).is_empty());
    }

    #[test]
    fn carbonyl_pattern_skips_double_bonded_oxygen() {
        // CH2=O
        let mut mol = Molecule::new();
        let c = mol.add_atom(Element::C);
        let o = mol.add_atom(Element::O);
        mol.add_bond(c, o, BondOrder::Double).unwrap();

        assert!(carbonyl_anchor_matches(&mol, true).is_empty());
    }

    #[test]
    fn ether_pattern_collapses_symmetric_sites() {
        let (mol, c1, o, c2) = create_dimethyl_ether();

        let matches = ether_anchor_matches(&mol, true);
        assert_eq!(matches.len(), 1);
        let (carbon, oxygen) = matches[0];
        assert!(carbon == c1 || carbon == c2);
        assert_eq!(oxygen, o);
    }

    #[test]
    fn exhaustive_matching_reports_symmetric_sites_twice() {
        let (mol, c1, o, c2) = create_dimethyl_ether();

        let matches = ether_anchor_matches(&mol, false);
        assert_eq!(matches, vec![(c1, o), (c2, o)]);
    }

    #[test]
    fn ether_pattern_keeps_inequivalent_sites_apart() {
        // CH3-O-CH2-CH3: the two linkage carbons differ.
        let mut mol = Molecule::new();
        let c_methyl = mol.add_atom(Element::C);
        let o = mol.add_atom(Element::O);
        let c_methylene = mol.add_atom(Element::C);
        let c_tail = mol.add_atom(Element::C);
        mol.add_bond(c_methyl, o, BondOrder::Single).unwrap();
        mol.add_bond(o, c_methylene, BondOrder::Single).unwrap();
        mol.add_bond(c_methylene, c_tail, BondOrder::Single).unwrap();

        let matches = ether_anchor_matches(&mol, true);
        assert_eq!(matches, vec![(c_methyl, o), (c_methylene, o)]);
    }

    #[test]
    fn ether_pattern_skips_terminal_and_charged_oxygens() {
        // CH3-OH (terminal) and CH3-[O+](H)-CH3 (charged).
        let mut methanol = Molecule::new();
        let c = methanol.add_atom(Element::C);
        let o = methanol.add_atom(Element::O);
        methanol.add_bond(c, o, BondOrder::Single).unwrap();
        assert!(ether_anchor_matches(&methanol, true).is_empty());

        let (mut charged, _, o, _) = create_dimethyl_ether();
        charged.atom_mut(o).unwrap().formal_charge = 1;
        assert!(ether_anchor_matches(&charged, true).is_empty());
    }

    #[test]
    fn matching_ignores_explicit_hydrogens() {
        let mut mol = Molecule::new();
        let c = mol.add_atom(Element::C);
        let o = mol.add_atom(Element::O);
        mol.add_bond(c, o, BondOrder::Single).unwrap();
        let bare = carbonyl_anchor_matches(&mol, true);

        mol.add_hydrogens();
        assert_eq!(carbonyl_anchor_matches(&mol, true), bare);
    }
}
