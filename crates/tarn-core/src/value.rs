use std::fmt;

use crate::tensor::TensorRef;

/// Generic tagged value passed across the invocation boundary.
///
/// One closed sum type covers everything a compiled function can receive or
/// produce. The tags partition into trivial (`None`, `Bool`, `Int`,
/// `Double` — plain value copies) and reference-bearing (`Tensor` — holds an
/// owning [`TensorRef`]). `Clone` and `Drop` are derived, so the refcount
/// bookkeeping for reference-bearing tags is maintained by the compiler: a
/// clone increments the referenced tensor's count, a drop decrements it, and
/// adding a variant forces every dispatch site to handle it.
///
/// Moving a `Value` transfers the payload without touching any count. For an
/// explicit transfer out of a slot, [`Value::take`] leaves `None` behind so
/// the vacated slot's drop is a no-op.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Absent value; also the state a taken-from slot is left in.
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Double(f64),
    /// An owning reference to a tensor.
    Tensor(TensorRef),
}

impl Value {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// The held boolean.
    ///
    /// # Panics
    /// Panics if the active tag is not `Bool`.
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            other => panic!("expected Bool value, got {}", other.tag_name()),
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// The held integer.
    ///
    /// # Panics
    /// Panics if the active tag is not `Int`.
    pub fn as_int(&self) -> i64 {
        match self {
            Value::Int(i) => *i,
            other => panic!("expected Int value, got {}", other.tag_name()),
        }
    }

    pub fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    /// The held double.
    ///
    /// # Panics
    /// Panics if the active tag is not `Double`.
    pub fn as_double(&self) -> f64 {
        match self {
            Value::Double(d) => *d,
            other => panic!("expected Double value, got {}", other.tag_name()),
        }
    }

    pub fn is_tensor(&self) -> bool {
        matches!(self, Value::Tensor(_))
    }

    /// Borrow the held tensor reference without touching its count.
    ///
    /// # Panics
    /// Panics if the active tag is not `Tensor`.
    pub fn as_tensor(&self) -> &TensorRef {
        match self {
            Value::Tensor(t) => t,
            other => panic!("expected Tensor value, got {}", other.tag_name()),
        }
    }

    /// Clone out an owning reference to the held tensor (count +1).
    ///
    /// # Panics
    /// Panics if the active tag is not `Tensor`.
    pub fn to_tensor(&self) -> TensorRef {
        TensorRef::clone(self.as_tensor())
    }

    /// Whether the active tag carries an owning reference.
    pub fn is_ref(&self) -> bool {
        match self {
            Value::None | Value::Bool(_) | Value::Int(_) | Value::Double(_) => false,
            Value::Tensor(_) => true,
        }
    }

    /// Symbolic name of the active tag.
    pub fn tag_name(&self) -> &'static str {
        match self {
            Value::None => "None",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Double(_) => "Double",
            Value::Tensor(_) => "Tensor",
        }
    }

    /// Transfer the payload out, leaving `None` behind.
    ///
    /// No refcount traffic for reference-bearing tags: ownership moves to the
    /// returned value, and the vacated slot's drop is guaranteed inert.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<TensorRef> for Value {
    fn from(t: TensorRef) -> Self {
        Value::Tensor(t)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::Tensor(t) => write!(f, "{t}"),
        }
    }
}
