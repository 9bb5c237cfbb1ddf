//! # molfrag
//!
//! A rule-based bond-breaking engine for predicting the fragments a small
//! molecule decomposes into, as seen in collision-induced dissociation.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict dependency direction,
//! keeping the chemistry rules separate from the graph bookkeeping.
//!
//! - **[`core`]: The Foundation.** Contains the stateless data model: the
//!   [`Molecule`] graph with stable atom identifiers, the element table with
//!   charge-aware valences, implicit/explicit hydrogen bookkeeping, and the
//!   [`MoleculeHandle`] capability trait that decouples the engine from the
//!   concrete graph type.
//!
//! - **[`engine`]: The Logic Core.** Implements fragmentation on top of any
//!   `MoleculeHandle`: the closed [`Rule`] set and its [`FragmentConfig`],
//!   structural site matching, scoped-edit guards for transient bond and
//!   charge changes, the electron-pushing mechanisms, the atom-conservation
//!   filter, and the [`fragment`] orchestrator that ties them together.
//!
//! ## Example
//!
//! ```
//! use molfrag::{Element, BondOrder, FragmentConfig, Molecule, fragment};
//!
//! // Build 2-propanol as a heavy-atom graph; hydrogens stay implicit.
//! let mut mol = Molecule::new();
//! let c_a = mol.add_atom(Element::C);
//! let c_center = mol.add_atom(Element::C);
//! let c_b = mol.add_atom(Element::C);
//! let o = mol.add_atom(Element::O);
//! mol.add_bond(c_a, c_center, BondOrder::Single).unwrap();
//! mol.add_bond(c_center, c_b, BondOrder::Single).unwrap();
//! mol.add_bond(c_center, o, BondOrder::Single).unwrap();
//!
//! // One fragment set per releasable methyl group.
//! let sets = fragment(&mut mol, &FragmentConfig::default()).unwrap();
//! assert_eq!(sets.len(), 2);
//! ```

pub mod core;
pub mod engine;

pub use crate::core::handle::MoleculeHandle;
pub use crate::core::models::atom::{Atom, Hybridization};
pub use crate::core::models::element::Element;
pub use crate::core::models::ids::AtomId;
pub use crate::core::models::molecule::Molecule;
pub use crate::core::models::topology::{Bond, BondOrder};
pub use crate::engine::config::{FragmentConfig, PHYSIOLOGICAL_PH};
pub use crate::engine::error::FragmentError;
pub use crate::engine::filter::{allowable_fragment_sets, allowable_fragmentation};
pub use crate::engine::fragment::fragment;
pub use crate::engine::mechanisms::FragmentSet;
pub use crate::engine::rules::Rule;
