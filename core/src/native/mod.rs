//! Native computation module boundary.
//!
//! This module resolves entry points from shared libraries at runtime and
//! exposes them behind the [`ComputationModule`] and [`ModuleLoader`] traits,
//! so callers never touch the platform loading mechanism.

mod ffi;
mod module;

pub use ffi::{EntrySignature, StatusEntryFn, VoidEntryFn};
pub use module::{open_library, ComputationModule, ModuleLoader, NativeLoader, NativeModule};
