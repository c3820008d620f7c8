use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::dtype::ElementType;
use crate::error::CoreError;
use crate::Result;

/// Shared owning reference to a [`Tensor`].
///
/// Tensor lifetime across the compiled-code boundary is managed by atomic
/// reference counting, and `Arc` carries that contract exactly: cloning
/// increments the count, moving transfers ownership without touching it, and
/// the drop whose atomic decrement observes a prior count of one is the
/// unique thread that frees — so the tensor is destroyed exactly once even
/// under concurrent drops.
pub type TensorRef = Arc<Tensor>;

/// A dense array with runtime-determined rank.
///
/// Extents live inline for rank ≤ 4 (the overwhelmingly common case), so a
/// tensor costs one data allocation plus its shared header. Tensors are
/// created only through the factory functions and handed out as
/// [`TensorRef`]s; there is no public bare constructor, so every live tensor
/// is reference-counted from birth.
///
/// Invariant: `byte_size() == numel() * element_type().byte_size()`.
pub struct Tensor {
    dtype: ElementType,
    extents: SmallVec<[u32; 4]>,
    data: Vec<u8>,
}

impl Tensor {
    /// Create a tensor with the given extents and element type, holding a
    /// copy of `data`. The new reference's count starts at one.
    ///
    /// Fails if the buffer length does not match
    /// `product(extents) * element_type.byte_size()`.
    pub fn from_bytes(extents: &[u32], dtype: ElementType, data: &[u8]) -> Result<TensorRef> {
        let numel = numel_of(extents);
        let expected = numel * dtype.byte_size();
        if data.len() != expected {
            return Err(CoreError::DataSizeMismatch {
                expected,
                got: data.len(),
                numel,
                dtype,
            });
        }
        Ok(Arc::new(Self {
            dtype,
            extents: SmallVec::from_slice(extents),
            data: data.to_vec(),
        }))
    }

    /// Create an f32 tensor from a typed slice.
    ///
    /// # Panics
    /// Panics if `data.len()` does not equal the product of `extents`.
    pub fn from_f32(extents: &[u32], data: &[f32]) -> TensorRef {
        let numel = numel_of(extents);
        assert_eq!(
            numel,
            data.len(),
            "extents {:?} require {} elements, got {}",
            extents,
            numel,
            data.len()
        );
        Arc::new(Self {
            dtype: ElementType::F32,
            extents: SmallVec::from_slice(extents),
            data: bytemuck::cast_slice(data).to_vec(),
        })
    }

    /// Element type.
    pub fn element_type(&self) -> ElementType {
        self.dtype
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    /// Extent of a single dimension.
    ///
    /// # Panics
    /// Panics if `dim >= rank()`.
    pub fn extent(&self, dim: usize) -> u32 {
        self.extents[dim]
    }

    /// All extents, in dimension order. Length always equals `rank()`.
    pub fn extents(&self) -> &[u32] {
        &self.extents
    }

    /// Total number of elements (1 for a rank-0 scalar).
    pub fn numel(&self) -> usize {
        numel_of(&self.extents)
    }

    /// Number of bytes occupied by the element data.
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// Raw element bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Typed f32 view of the data. `None` if the element type is not F32.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match self.dtype {
            ElementType::F32 => Some(bytemuck::cast_slice(&self.data)),
        }
    }
}

fn numel_of(extents: &[u32]) -> usize {
    extents.iter().map(|&e| e as usize).product()
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tensor(dtype={}, extents={:?}, bytes={})",
            self.dtype,
            self.extents.as_slice(),
            self.data.len(),
        )
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_f32() {
            Some(data) if data.len() <= 16 => {
                write!(f, "tensor({:?}, extents={:?})", data, self.extents.as_slice())
            }
            _ => write!(
                f,
                "tensor(dtype={}, extents={:?})",
                self.dtype,
                self.extents.as_slice()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f32() {
        let t = Tensor::from_f32(&[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(t.rank(), 2);
        assert_eq!(t.extent(0), 2);
        assert_eq!(t.extent(1), 3);
        assert_eq!(t.extents(), &[2, 3]);
        assert_eq!(t.numel(), 6);
        assert_eq!(t.byte_size(), 24);
        assert_eq!(t.element_type(), ElementType::F32);
        assert_eq!(t.as_f32().unwrap(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_from_bytes_copies() {
        let src: Vec<u8> = [1.0f32, 2.0, 3.0]
            .iter()
            .flat_map(|v| v.to_ne_bytes())
            .collect();
        let t = Tensor::from_bytes(&[3], ElementType::F32, &src).unwrap();
        assert_eq!(t.data(), src.as_slice());
        assert_eq!(t.as_f32().unwrap(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_from_bytes_validation() {
        let err = Tensor::from_bytes(&[2, 3], ElementType::F32, &[0u8; 23]).unwrap_err();
        assert!(err.to_string().contains("expected 24 bytes"));

        assert!(Tensor::from_bytes(&[2, 3], ElementType::F32, &[0u8; 24]).is_ok());
    }

    #[test]
    fn test_scalar() {
        let t = Tensor::from_f32(&[], &[3.5]);
        assert_eq!(t.rank(), 0);
        assert_eq!(t.numel(), 1);
        assert_eq!(t.byte_size(), 4);
    }

    #[test]
    fn test_zero_extent() {
        let t = Tensor::from_f32(&[0, 4], &[]);
        assert_eq!(t.numel(), 0);
        assert_eq!(t.byte_size(), 0);
        assert_eq!(t.rank(), 2);
    }

    #[test]
    #[should_panic(expected = "require 6 elements")]
    fn test_from_f32_wrong_length() {
        Tensor::from_f32(&[2, 3], &[1.0, 2.0]);
    }

    #[test]
    fn test_refcount_lifecycle() {
        let t = Tensor::from_f32(&[2], &[1.0, 2.0]);
        assert_eq!(Arc::strong_count(&t), 1);

        let t2 = t.clone();
        assert_eq!(Arc::strong_count(&t), 2);

        let t3 = t2; // move: no count change
        assert_eq!(Arc::strong_count(&t), 2);

        drop(t3);
        assert_eq!(Arc::strong_count(&t), 1);
    }

    #[test]
    fn test_concurrent_clone_drop() {
        let t = Tensor::from_f32(&[4], &[1.0, 2.0, 3.0, 4.0]);
        std::thread::scope(|s| {
            for _ in 0..8 {
                let local = t.clone();
                s.spawn(move || {
                    for _ in 0..1000 {
                        let extra = local.clone();
                        assert_eq!(extra.as_f32().unwrap()[3], 4.0);
                        drop(extra);
                    }
                });
            }
        });
        // All thread-held references released; the block was freed by no one.
        assert_eq!(Arc::strong_count(&t), 1);
        assert_eq!(t.as_f32().unwrap(), &[1.0, 2.0, 3.0, 4.0]);
    }
}
