//! # tarn-rt
//!
//! Invocation boundary of the Tarn runtime: resolve a function inside an
//! opaque compiled module by name, query its arities, and invoke it with an
//! array of tagged [`Value`](tarn_core::Value)s.
//!
//! Two operations, both stateless and synchronous:
//! - [`get_metadata`] — descriptive lookup, never executes code
//! - [`invoke`] — blocking execution of one compiled function
//!
//! Arity is bounded by [`MAX_ARITY`] so the calling convention can stage
//! arguments in fixed-capacity stack storage.

pub mod invoke;
pub mod module;

pub use invoke::{get_metadata, invoke};
pub use module::{
    FunctionMetadata, ModuleBuilder, ModuleDescriptor, ModuleError, MAX_ARITY,
};
