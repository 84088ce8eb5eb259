//! CoTalib Application Orchestration Layer
//!
//! Form Wizard Controllers for the account flows and the beta-signup use case.
//! Controllers own their form state and drive the pure state machines from
//! `ct-core`, executing the resulting actions against ports.

pub mod app_paths;
pub mod deps;
pub mod usecase_factory;
pub mod usecases;

pub use deps::AppDeps;
