//! Step definitions for task status behaviour tests.

pub mod when;
pub mod world;
