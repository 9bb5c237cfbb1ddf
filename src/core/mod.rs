//! The foundational layer of the crate.
//!
//! This module holds the domain-agnostic building blocks: the molecular data
//! model under [`models`] and the [`handle::MoleculeHandle`] capability trait
//! the engine layer is written against. Nothing here knows about
//! fragmentation rules.

pub mod handle;
pub mod models;
