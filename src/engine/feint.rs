//! Transient molecule edits with guaranteed rollback.
//!
//! Several mechanisms need to ask "what would this molecule look like if this
//! bond were a double bond, or if this electron had moved" without committing
//! the edit. Each guard here applies one such edit on construction and
//! reverses it in [`Drop`], so the molecule is restored on every exit path,
//! early returns and panics included. The [`feint_double_bond`] and
//! [`feint_electron_transfer`] helpers stack the guards in the right order and
//! hand the edited molecule to a closure.

use super::error::FragmentError;
use crate::core::handle::MoleculeHandle;
use crate::core::models::topology::BondOrder;

/// Temporarily overrides the order of one bond.
#[derive(Debug)]
pub struct BondOrderGuard<'m, M: MoleculeHandle> {
    mol: &'m mut M,
    a: M::AtomId,
    b: M::AtomId,
    original: BondOrder,
}

impl<'m, M: MoleculeHandle> BondOrderGuard<'m, M> {
    /// Sets the bond `a`-`b` to `order`, remembering the original.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::MissingBond`] if the atoms are not bonded; the
    /// molecule is untouched in that case.
    pub fn new(
        mol: &'m mut M,
        a: M::AtomId,
        b: M::AtomId,
        order: BondOrder,
    ) -> Result<Self, FragmentError> {
        let original = mol
            .bond_order(a, b)
            .ok_or_else(|| FragmentError::missing_bond(a, b))?;
        mol.set_bond_order(a, b, order);
        Ok(Self { mol, a, b, original })
    }

    /// Gives access to the molecule while the override is in place.
    pub fn molecule(&mut self) -> &mut M {
        self.mol
    }
}

impl<M: MoleculeHandle> Drop for BondOrderGuard<'_, M> {
    fn drop(&mut self) {
        self.mol.set_bond_order(self.a, self.b, self.original);
    }
}

/// Temporarily shifts formal charges by per-atom deltas.
#[derive(Debug)]
pub struct ChargeTransferGuard<'m, M: MoleculeHandle> {
    mol: &'m mut M,
    applied: Vec<(M::AtomId, i8)>,
}

impl<'m, M: MoleculeHandle> ChargeTransferGuard<'m, M> {
    /// Applies each `(atom, delta)` shift in order.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::MissingAtom`] if any atom is absent; no shift
    /// is applied in that case.
    pub fn new(mol: &'m mut M, shifts: &[(M::AtomId, i8)]) -> Result<Self, FragmentError> {
        let mut charges = Vec::with_capacity(shifts.len());
        for &(id, delta) in shifts {
            let charge = mol
                .formal_charge(id)
                .ok_or_else(|| FragmentError::missing_atom(id))?;
            charges.push((id, delta, charge));
        }
        let mut applied = Vec::with_capacity(shifts.len());
        for (id, delta, charge) in charges {
            mol.set_formal_charge(id, charge + delta);
            applied.push((id, delta));
        }
        Ok(Self { mol, applied })
    }

    /// Gives access to the molecule while the shifts are in place.
    pub fn molecule(&mut self) -> &mut M {
        self.mol
    }
}

impl<M: MoleculeHandle> Drop for ChargeTransferGuard<'_, M> {
    fn drop(&mut self) {
        // Undo in reverse application order.
        for &(id, delta) in self.applied.iter().rev() {
            if let Some(charge) = self.mol.formal_charge(id) {
                self.mol.set_formal_charge(id, charge - delta);
            }
        }
    }
}

/// Temporarily exchanges the far ends of two bonds.
pub struct SwapGuard<'m, M: MoleculeHandle> {
    mol: &'m mut M,
    anchor1: M::AtomId,
    mover1: M::AtomId,
    anchor2: M::AtomId,
    mover2: M::AtomId,
}

impl<'m, M: MoleculeHandle> SwapGuard<'m, M> {
    /// Swaps `anchor1`-`mover1` with `anchor2`-`mover2`.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::MissingBond`] if either bond is absent; the
    /// molecule is untouched in that case.
    pub fn new(
        mol: &'m mut M,
        anchor1: M::AtomId,
        mover1: M::AtomId,
        anchor2: M::AtomId,
        mover2: M::AtomId,
    ) -> Result<Self, FragmentError> {
        if !mol.swap_attachments(anchor1, mover1, anchor2, mover2) {
            return Err(FragmentError::missing_bond(anchor1, mover1));
        }
        Ok(Self {
            mol,
            anchor1,
            mover1,
            anchor2,
            mover2,
        })
    }

    /// Gives access to the molecule while the swap is in place.
    pub fn molecule(&mut self) -> &mut M {
        self.mol
    }
}

impl<M: MoleculeHandle> Drop for SwapGuard<'_, M> {
    fn drop(&mut self) {
        // A swap is undone by swapping the movers back.
        self.mol
            .swap_attachments(self.anchor1, self.mover2, self.anchor2, self.mover1);
    }
}

/// Runs a closure on the molecule with one formal charge moved.
///
/// The giver's charge rises by one and the receiver's drops by one for the
/// duration of the closure.
pub fn feint_electron_transfer<M, T, F>(
    mol: &mut M,
    giver: M::AtomId,
    receiver: M::AtomId,
    f: F,
) -> Result<T, FragmentError>
where
    M: MoleculeHandle,
    F: FnOnce(&mut M) -> Result<T, FragmentError>,
{
    let mut guard = ChargeTransferGuard::new(mol, &[(giver, 1), (receiver, -1)])?;
    f(guard.molecule())
}

/// Runs a closure on the molecule with the bond `a`-`b` raised to a double
/// bond, optionally combined with an electron transfer.
///
/// With `give` and `get` present, the given atom's charge rises by one and the
/// getting atom's drops by one while the double bond is in place. The charge
/// shift is undone before the bond order, mirroring the order they were
/// applied in.
pub fn feint_double_bond<M, T, F>(
    mol: &mut M,
    a: M::AtomId,
    b: M::AtomId,
    give: Option<M::AtomId>,
    get: Option<M::AtomId>,
    f: F,
) -> Result<T, FragmentError>
where
    M: MoleculeHandle,
    F: FnOnce(&mut M) -> Result<T, FragmentError>,
{
    let mut bond_guard = BondOrderGuard::new(mol, a, b, BondOrder::Double)?;

    let mut shifts = Vec::new();
    if let Some(giver) = give {
        shifts.push((giver, 1));
    }
    if let Some(receiver) = get {
        shifts.push((receiver, -1));
    }
    if shifts.is_empty() {
        return f(bond_guard.molecule());
    }
    let mut charge_guard = ChargeTransferGuard::new(bond_guard.molecule(), &shifts)?;
    f(charge_guard.molecule())
}
