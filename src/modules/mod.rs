//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the persistence backends the feature services talk to.

pub mod persistence;
