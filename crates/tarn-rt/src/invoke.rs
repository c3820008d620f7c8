//! The two operations against a compiled module: metadata lookup and
//! synchronous invocation.

use smallvec::SmallVec;
use tarn_core::Value;

use crate::module::{FunctionMetadata, ModuleDescriptor, ModuleError, MAX_ARITY};

/// Look up the input/output arities of `function_name`.
///
/// Exact, case-sensitive match. Purely descriptive — never executes code.
/// Unknown names come from outside the runtime and are reported as
/// [`ModuleError::FunctionNotFound`] rather than asserted.
pub fn get_metadata(
    module: &ModuleDescriptor,
    function_name: &str,
) -> Result<FunctionMetadata, ModuleError> {
    match module.get(function_name) {
        Some(entry) => Ok(entry.metadata),
        None => {
            tracing::debug!("metadata lookup miss for '{}'", function_name);
            Err(ModuleError::FunctionNotFound {
                name: function_name.to_string(),
            })
        }
    }
}

/// Invoke `function_name` synchronously, blocking until it has fully
/// executed.
///
/// `inputs.len()` and `outputs.len()` must match the arities reported by
/// [`get_metadata`] for that name; a mismatch or an unknown name is a
/// contract violation and panics. Inputs are borrowed — the callee receives
/// clones, so the caller's references stay valid and a tensor reference
/// copied in contributes one additional owning reference for the duration of
/// the call. Each output slot is overwritten with a newly produced value the
/// caller owns and must eventually drop.
pub fn invoke(
    module: &ModuleDescriptor,
    function_name: &str,
    inputs: &[Value],
    outputs: &mut [Value],
) {
    let entry = module
        .get(function_name)
        .unwrap_or_else(|| panic!("invoke: no function named '{function_name}' in module"));
    debug_assert_eq!(
        inputs.len(),
        entry.metadata.num_inputs as usize,
        "invoke '{function_name}': input arity mismatch"
    );
    debug_assert_eq!(
        outputs.len(),
        entry.metadata.num_outputs as usize,
        "invoke '{function_name}': output arity mismatch"
    );

    tracing::trace!(
        "invoke '{}' ({} in, {} out)",
        function_name,
        inputs.len(),
        outputs.len()
    );

    // Stage both sides in fixed-capacity inline storage; the trampoline never
    // sees the caller's slices directly.
    let staged_inputs: SmallVec<[Value; MAX_ARITY]> = inputs.iter().cloned().collect();
    let mut staged_outputs: SmallVec<[Value; MAX_ARITY]> =
        (0..outputs.len()).map(|_| Value::None).collect();

    (entry.body)(&staged_inputs, &mut staged_outputs);

    for (slot, produced) in outputs.iter_mut().zip(staged_outputs.iter_mut()) {
        *slot = produced.take();
    }
}
