//! The fragmentation engine.
//!
//! This layer turns the core data model into a rule-driven bond-breaking
//! engine. [`rules`] names the closed set of supported cleavages and
//! [`config`] selects among them; [`matcher`] finds the sites a rule can act
//! on; [`mechanisms`] applies the electron pushing, using the scoped-edit
//! guards in [`feint`]; [`filter`] enforces atom conservation; and
//! [`fragment`] orchestrates a whole run. Everything is generic over
//! [`crate::core::handle::MoleculeHandle`].

pub mod config;
pub mod error;
pub mod feint;
pub mod filter;
pub mod fragment;
mod matcher;
pub mod mechanisms;
pub mod rules;
