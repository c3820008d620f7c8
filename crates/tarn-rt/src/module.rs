//! Compiled-module descriptors and their function tables.
//!
//! A [`ModuleDescriptor`] is the opaque handle the compiler backend hands to
//! callers. The runtime never looks past its name → function table;
//! everything else about the module stays with the compiler.

use std::collections::HashMap;
use std::fmt;

use tarn_core::Value;

/// Maximum input or output arity of any compiled function.
///
/// Hard boundary constant, not configurable at runtime: it lets the calling
/// convention use fixed-capacity stack storage instead of allocating per
/// call.
pub const MAX_ARITY: usize = 20;

/// Input/output counts for one compiled function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionMetadata {
    pub num_inputs: u32,
    pub num_outputs: u32,
}

/// Trampoline signature the compiler backend emits for each function.
///
/// Inputs are borrowed: a callee that wants to keep a tensor past the call
/// clones the reference and pays for it. Output slots arrive as
/// `Value::None` and are overwritten with values the caller will own.
pub type CompiledFn = Box<dyn Fn(&[Value], &mut [Value]) + Send + Sync>;

pub(crate) struct FunctionEntry {
    pub(crate) metadata: FunctionMetadata,
    pub(crate) body: CompiledFn,
}

/// Opaque handle to a compiled module.
pub struct ModuleDescriptor {
    functions: HashMap<String, FunctionEntry>,
}

impl ModuleDescriptor {
    pub(crate) fn get(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions.get(name)
    }

    /// Names of all functions in the module, in no particular order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Number of functions in the module.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleDescriptor({} functions)", self.functions.len())
    }
}

/// Assembles a [`ModuleDescriptor`].
///
/// This is the compiler backend's (and the test suite's) way of producing a
/// descriptor; callers only ever consume the built result.
#[derive(Default)]
pub struct ModuleBuilder {
    functions: HashMap<String, FunctionEntry>,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a compiled function under `name`.
    ///
    /// # Panics
    /// Panics if either arity exceeds [`MAX_ARITY`] or the name is already
    /// taken — both are compiler bugs, not runtime conditions.
    pub fn add_function<F>(&mut self, name: &str, num_inputs: u32, num_outputs: u32, body: F)
    where
        F: Fn(&[Value], &mut [Value]) + Send + Sync + 'static,
    {
        assert!(
            num_inputs as usize <= MAX_ARITY && num_outputs as usize <= MAX_ARITY,
            "function '{}' exceeds MAX_ARITY ({}): {} inputs, {} outputs",
            name,
            MAX_ARITY,
            num_inputs,
            num_outputs
        );
        let prev = self.functions.insert(
            name.to_string(),
            FunctionEntry {
                metadata: FunctionMetadata {
                    num_inputs,
                    num_outputs,
                },
                body: Box::new(body),
            },
        );
        assert!(prev.is_none(), "duplicate function name '{name}'");
    }

    pub fn build(self) -> ModuleDescriptor {
        ModuleDescriptor {
            functions: self.functions,
        }
    }
}

/// Errors from module function resolution.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    #[error("no function named '{name}' in module")]
    FunctionNotFound { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_module() {
        let module = ModuleBuilder::new().build();
        assert!(module.is_empty());
        assert_eq!(module.len(), 0);
    }

    #[test]
    fn test_builder_registers_functions() {
        let mut builder = ModuleBuilder::new();
        builder.add_function("identity", 1, 1, |inputs, outputs| {
            outputs[0] = inputs[0].clone();
        });
        builder.add_function("nop", 0, 0, |_, _| {});
        let module = builder.build();

        assert_eq!(module.len(), 2);
        let mut names: Vec<&str> = module.function_names().collect();
        names.sort_unstable();
        assert_eq!(names, ["identity", "nop"]);
    }

    #[test]
    #[should_panic(expected = "exceeds MAX_ARITY")]
    fn test_arity_bound() {
        let mut builder = ModuleBuilder::new();
        builder.add_function("wide", 21, 1, |_, _| {});
    }

    #[test]
    #[should_panic(expected = "duplicate function name")]
    fn test_duplicate_name() {
        let mut builder = ModuleBuilder::new();
        builder.add_function("f", 0, 0, |_, _| {});
        builder.add_function("f", 1, 1, |_, _| {});
    }
}
