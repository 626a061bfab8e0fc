//! Materials calculators.
//!
//! - [`fermi`] - Free-electron Fermi energy of contact metals
//! - [`ions`] - Nernst potentials and Nernst-Planck membrane flux
//! - [`lattice`] - Born-Landé lattice energy of ionic crystals
//! - [`thermoelectric`] - ZT and body-heat harvest power

pub mod fermi;
pub mod ions;
pub mod lattice;
pub mod thermoelectric;
