//! Bond-breaking mechanisms.
//!
//! Each function here applies one electron-pushing mechanism to a molecule
//! and returns the resulting fragments. The dump and esteal mechanisms work
//! on an independent clone of the parent, leaning on stable atom IDs to
//! address matched atoms inside the copy. The feint-based mechanisms edit the
//! parent transiently through the guards in [`super::feint`], clone it while
//! the edit is live, and let the guards restore the parent afterwards; their
//! results are pre-filtered for atom conservation.

use super::error::FragmentError;
use super::feint::{SwapGuard, feint_double_bond};
use super::filter::allowable_fragment_sets;
use crate::core::handle::MoleculeHandle;
use crate::core::models::atom::Hybridization;
use crate::core::models::element::Element;
use crate::core::models::topology::BondOrder;

/// One outcome of a fragmentation: the pieces a single cleavage produced.
pub type FragmentSet<M> = Vec<M>;

fn is_sp3_carbon<M: MoleculeHandle>(mol: &M, id: M::AtomId) -> bool {
    mol.element(id) == Some(Element::C) && mol.hybridization(id) == Some(Hybridization::Sp3)
}

/// Splits off one neighbor of the carbon while its oxygen collapses into a
/// carbonyl.
///
/// The bond `carbon`-`carbon_nbr` is broken and the `carbon`-`oxygen` bond
/// becomes a double bond. Whatever the oxygen carried moves to the departing
/// neighbor: a non-carbon appendage (such as an explicit hydrogen) is rewired
/// onto `carbon_nbr`, and a formal charge is transferred to it. The parent is
/// left untouched.
///
/// # Errors
///
/// Returns [`FragmentError::MissingBond`] if `carbon` is not bonded to both
/// `carbon_nbr` and `oxygen`.
pub fn carbonyl_oxygen_dump<M: MoleculeHandle>(
    mol: &M,
    carbon: M::AtomId,
    oxygen: M::AtomId,
    carbon_nbr: M::AtomId,
) -> Result<FragmentSet<M>, FragmentError> {
    let mut appendages: Vec<M::AtomId> = mol
        .neighbors(oxygen)
        .into_iter()
        .filter(|&n| mol.element(n) != Some(Element::C))
        .collect();
    appendages.sort_unstable();
    let appendage = appendages.first().copied();

    let oxygen_charge = mol
        .formal_charge(oxygen)
        .ok_or_else(|| FragmentError::missing_atom(oxygen))?;

    let mut nmol = mol.clone();
    if !nmol.delete_bond(carbon, carbon_nbr) {
        return Err(FragmentError::missing_bond(carbon, carbon_nbr));
    }
    if let Some(appendage) = appendage {
        let order = nmol
            .bond_order(oxygen, appendage)
            .ok_or_else(|| FragmentError::missing_bond(oxygen, appendage))?;
        nmol.delete_bond(oxygen, appendage);
        nmol.add_bond(carbon_nbr, appendage, order);
    }
    if oxygen_charge != 0 {
        let nbr_charge = nmol
            .formal_charge(carbon_nbr)
            .ok_or_else(|| FragmentError::missing_atom(carbon_nbr))?;
        nmol.set_formal_charge(carbon_nbr, nbr_charge + oxygen_charge);
        nmol.set_formal_charge(oxygen, 0);
    }
    if !nmol.set_bond_order(carbon, oxygen, BondOrder::Double) {
        return Err(FragmentError::missing_bond(carbon, oxygen));
    }
    Ok(nmol.split())
}

/// Breaks the carbon-oxygen bond heterolytically, the oxygen keeping both
/// electrons.
///
/// Works on a saturated clone of the parent: the carbon ends up at +1 having
/// also surrendered one explicit hydrogen (when it has one to give), the
/// oxygen at -1. The parent is left untouched.
///
/// # Errors
///
/// Returns [`FragmentError::MissingBond`] if the atoms are not bonded.
pub fn carbon_oxygen_esteal<M: MoleculeHandle>(
    mol: &M,
    carbon: M::AtomId,
    oxygen: M::AtomId,
) -> Result<FragmentSet<M>, FragmentError> {
    let mut nmol = mol.clone();
    nmol.add_hydrogens();
    if !nmol.delete_bond(carbon, oxygen) {
        return Err(FragmentError::missing_bond(carbon, oxygen));
    }
    let carbon_charge = nmol
        .formal_charge(carbon)
        .ok_or_else(|| FragmentError::missing_atom(carbon))?;
    let oxygen_charge = nmol
        .formal_charge(oxygen)
        .ok_or_else(|| FragmentError::missing_atom(oxygen))?;
    nmol.set_formal_charge(carbon, carbon_charge + 1);
    nmol.set_formal_charge(oxygen, oxygen_charge - 1);
    // A quaternary carbon has no hydrogen to give up; the cation keeps its
    // valence debt instead.
    nmol.remove_one_hydrogen(carbon);
    Ok(nmol.split())
}

/// Releases one alkyl group from an alcohol carbon, leaving a carbonyl.
///
/// For every sp3 carbon in `carbon_nbrs`, the `carbon`-`oxygen` bond is
/// feinted into a double bond and the neighbor split off. Saturates the
/// parent and returns only the atom-conserving sets.
pub fn alcohol_to_aldehyde<M: MoleculeHandle>(
    mol: &mut M,
    carbon: M::AtomId,
    oxygen: M::AtomId,
    carbon_nbrs: &[M::AtomId],
) -> Result<Vec<FragmentSet<M>>, FragmentError> {
    let mut sets = Vec::new();
    for &nbr in carbon_nbrs {
        if !is_sp3_carbon(mol, nbr) {
            continue;
        }
        let frags = feint_double_bond(mol, carbon, oxygen, None, None, |m| {
            split_saturated(m, carbon, nbr)
        })?;
        sets.push(frags);
    }
    Ok(allowable_fragment_sets(mol, sets))
}

/// Ejects a neutral carbon-dioxide unit from a carboxyl carbon.
///
/// The `carbon`-`oxygen` bond is feinted into a double bond with an electron
/// pair moving from the oxygen to `c3_nbr`, then the `carbon`-`c3_nbr` bond is
/// split. The departing group keeps the negative charge. Saturates the parent
/// and returns only the atom-conserving sets.
pub fn co2_loss<M: MoleculeHandle>(
    mol: &mut M,
    carbon: M::AtomId,
    oxygen: M::AtomId,
    c3_nbr: M::AtomId,
) -> Result<Vec<FragmentSet<M>>, FragmentError> {
    let frags = feint_double_bond(mol, carbon, oxygen, Some(oxygen), Some(c3_nbr), |m| {
        split_saturated(m, c3_nbr, carbon)
    })?;
    Ok(allowable_fragment_sets(mol, vec![frags]))
}

/// Rearranges a peroxide into a carboxyl while releasing an alkyl group.
///
/// Only fires when `oxygen_nbr` is a terminal oxygen, i.e. the matched site
/// is a peroxy group. For every sp3 carbon in `carbon_nbrs`, the neighbor is
/// swapped with the distal oxygen, the `carbon`-`oxygen` bond feinted double,
/// and the relocated neighbor split off the oxygen; guards restore the swap
/// and the bond order afterwards. Saturates the parent and returns only the
/// atom-conserving sets.
pub fn peroxy_to_carboxy<M: MoleculeHandle>(
    mol: &mut M,
    carbon: M::AtomId,
    oxygen: M::AtomId,
    carbon_nbrs: &[M::AtomId],
    oxygen_nbr: M::AtomId,
) -> Result<Vec<FragmentSet<M>>, FragmentError> {
    if mol.element(oxygen_nbr) != Some(Element::O) || mol.heavy_degree(oxygen_nbr) != 1 {
        return Ok(Vec::new());
    }
    let distal_oxygen = oxygen_nbr;

    let mut sets = Vec::new();
    for &nbr in carbon_nbrs {
        if !is_sp3_carbon(mol, nbr) {
            continue;
        }
        let mut swap = SwapGuard::new(mol, carbon, nbr, oxygen, distal_oxygen)?;
        // The swap moved the neighbor onto the oxygen, so the bond to split
        // now hangs off the oxygen.
        let frags = feint_double_bond(swap.molecule(), carbon, oxygen, None, None, |m| {
            split_saturated(m, oxygen, nbr)
        })?;
        drop(swap);
        sets.push(frags);
    }
    Ok(allowable_fragment_sets(mol, sets))
}

/// Splits off the electrophile with water-loss-style double bond formation.
///
/// For every sp3 carbon neighbor of `carbon`, that bond is feinted into a
/// double bond and the `carbon`-`electrophile` bond split. Saturates the
/// parent and returns only the atom-conserving sets.
pub fn near_side_double_bond_break<M: MoleculeHandle>(
    mol: &mut M,
    carbon: M::AtomId,
    electrophile: M::AtomId,
) -> Result<Vec<FragmentSet<M>>, FragmentError> {
    let near_sp3: Vec<M::AtomId> = mol
        .neighbors(carbon)
        .into_iter()
        .filter(|&n| is_sp3_carbon(mol, n))
        .collect();

    let mut sets = Vec::new();
    for near in near_sp3 {
        let frags = feint_double_bond(mol, carbon, near, None, None, |m| {
            split_saturated(m, carbon, electrophile)
        })?;
        sets.push(frags);
    }
    Ok(allowable_fragment_sets(mol, sets))
}

/// Asymmetric cleavage where the electrophile takes both bonding electrons
/// outright.
///
/// # Errors
///
/// Always returns [`FragmentError::NotImplemented`]; the mechanism is part of
/// the rule surface but its charge bookkeeping is not settled yet.
pub fn electrophile_snatches_electrons<M: MoleculeHandle>(
    _mol: &mut M,
    _carbon: M::AtomId,
    _electrophile: M::AtomId,
) -> Result<Vec<FragmentSet<M>>, FragmentError> {
    Err(FragmentError::NotImplemented {
        feature: "electrophile electron snatching",
    })
}

/// Clones the molecule, breaks the bond `a`-`b`, and returns the saturated
/// fragments.
fn split_saturated<M: MoleculeHandle>(
    mol: &M,
    a: M::AtomId,
    b: M::AtomId,
) -> Result<FragmentSet<M>, FragmentError> {
    let mut copy = mol.clone();
    if !copy.delete_bond(a, b) {
        return Err(FragmentError::missing_bond(a, b));
    }
    let mut frags = copy.split();
    for frag in &mut frags {
        frag.add_hydrogens();
    }
    Ok(frags)
}
