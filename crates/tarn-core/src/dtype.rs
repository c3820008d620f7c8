use std::fmt;

/// Element types storable in a runtime tensor.
///
/// Closed for now — the compiler only lowers f32 programs — but expected to
/// grow. `#[non_exhaustive]` keeps downstream matches honest about that:
/// callers outside this crate must carry a defensive arm for members added
/// later.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// 32-bit IEEE 754 single-precision float
    F32,
}

impl ElementType {
    /// Size in bytes of a single element.
    pub fn byte_size(&self) -> usize {
        match self {
            ElementType::F32 => 4,
        }
    }

    /// String tag for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::F32 => "f32",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
