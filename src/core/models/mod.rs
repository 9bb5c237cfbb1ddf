//! Defines the core data structures for molecular representation.
//!
//! This module contains the fundamental building blocks of the crate: the
//! element table, atoms, bonds, and the [`molecule::Molecule`] graph that ties
//! them together. The [`hydrogens`] module extends `Molecule` with hydrogen
//! saturation and pH handling, so it exports no items of its own.

pub mod atom;
pub mod element;
pub mod hydrogens;
pub mod ids;
pub mod molecule;
pub mod topology;
