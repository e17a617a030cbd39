//! # Engine Module
//!
//! Internal storage engine implementation.
//!
//! This module contains all core building blocks:
//! - Component model and signatures
//! - Dense single-type storage
//! - Archetype (component-set) storage
//! - World, entity handles, and migration
//! - Query views
//!
//! Public API exposure is controlled by `lib.rs`.

pub mod types;
pub mod error;
pub mod component;
pub mod storage;
pub mod archetype;
pub mod world;
pub mod query;
