use thiserror::Error;

use crate::dtype::ElementType;

/// Errors from the value-representation layer.
///
/// Contract violations (wrong-tag access, out-of-range dimension indices)
/// panic instead; only conditions fed by external data are recoverable.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("expected {expected} bytes for {numel} {dtype} elements, got {got}")]
    DataSizeMismatch {
        expected: usize,
        got: usize,
        numel: usize,
        dtype: ElementType,
    },
}
