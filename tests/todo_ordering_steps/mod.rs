//! Step definitions for to-do ordering behaviour tests.

pub mod when;
