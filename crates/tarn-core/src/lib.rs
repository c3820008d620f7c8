//! # tarn-core
//!
//! Value representation for the Tarn runtime — the layer a caller shares with
//! modules produced by the Tarn ahead-of-time tensor compiler.
//!
//! Provides:
//! - `ElementType`: the closed set of tensor element types
//! - `Tensor` / `TensorRef`: dense variable-rank arrays under atomic
//!   reference counting
//! - `Value`: the tagged generic value passed across the invocation boundary
//!
//! This crate is deliberately firewalled from the compiler: no IR types, no
//! module formats, just the in-memory contract.

pub mod dtype;
pub mod error;
pub mod tensor;
pub mod value;

pub use dtype::ElementType;
pub use error::CoreError;
pub use tensor::{Tensor, TensorRef};
pub use value::Value;

pub type Result<T> = std::result::Result<T, CoreError>;
