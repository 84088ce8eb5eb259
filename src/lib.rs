//! CoTalib binary support: the beta-signup relay and process bootstrap.

pub mod api;
pub mod bootstrap;
