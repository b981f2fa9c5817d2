//! Task lifecycle and to-do ordering for Taskwell.
//!
//! Statuses are reconciled against the calendar so overdue open work becomes
//! `Missed`, checkbox changes move tasks in and out of `Done`, and the to-do
//! board orders tasks manually or by status rank and due date. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
