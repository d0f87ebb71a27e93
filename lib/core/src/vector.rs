use serde::{Deserialize, Serialize};

/// A dense vector of floating point numbers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn into_inner(self) -> Vec<f32> {
        self.data
    }

    /// Dot product with another vector.
    ///
    /// Index rows and query embeddings are unit-norm, so this is numerically
    /// equal to cosine similarity with no per-call normalization.
    #[inline]
    pub fn dot(&self, other: &Vector) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }
        dot_product(&self.data, &other.data)
    }

    /// Normalize the vector to unit length
    #[inline]
    pub fn normalize(&mut self) {
        let norm = self.data.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            let inv_norm = 1.0 / norm;
            for x in &mut self.data {
                *x *= inv_norm;
            }
        }
    }

    /// Get normalized copy
    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }
}

/// Dot product over two equal-length slices.
///
/// Two accumulators over 8-wide chunks for better pipelining.
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot0 = 0.0f32;
    let mut dot1 = 0.0f32;

    let chunks = a.chunks_exact(8);
    let remainder = chunks.remainder();
    let b_chunks = b.chunks_exact(8);
    let b_remainder = b_chunks.remainder();

    for (a_chunk, b_chunk) in chunks.zip(b_chunks) {
        dot0 += a_chunk[0] * b_chunk[0]
            + a_chunk[1] * b_chunk[1]
            + a_chunk[2] * b_chunk[2]
            + a_chunk[3] * b_chunk[3];

        dot1 += a_chunk[4] * b_chunk[4]
            + a_chunk[5] * b_chunk[5]
            + a_chunk[6] * b_chunk[6]
            + a_chunk[7] * b_chunk[7];
    }

    for (x, y) in remainder.iter().zip(b_remainder.iter()) {
        dot0 += x * y;
    }

    dot0 + dot1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_unit_vectors() {
        let v1 = Vector::new(vec![1.0, 0.0]);
        let v2 = Vector::new(vec![1.0, 0.0]);
        assert!((v1.dot(&v2) - 1.0).abs() < 1e-6);

        let v3 = Vector::new(vec![1.0, 0.0]);
        let v4 = Vector::new(vec![0.0, 1.0]);
        assert!((v3.dot(&v4) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_dimension_mismatch() {
        let v1 = Vector::new(vec![1.0, 0.0, 0.0]);
        let v2 = Vector::new(vec![1.0, 0.0]);
        assert_eq!(v1.dot(&v2), 0.0);
    }

    #[test]
    fn test_normalize() {
        let mut v = Vector::new(vec![3.0, 4.0]);
        v.normalize();
        assert!((v.as_slice()[0] - 0.6).abs() < 1e-6);
        assert!((v.as_slice()[1] - 0.8).abs() < 1e-6);

        let norm = v.as_slice().iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector() {
        let mut v = Vector::new(vec![0.0, 0.0, 0.0]);
        v.normalize();
        assert_eq!(v.as_slice(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_dot_product_long() {
        // Long enough to exercise both chunked lanes and the remainder
        let a: Vec<f32> = (0..19).map(|i| i as f32).collect();
        let b: Vec<f32> = (0..19).map(|_| 1.0).collect();
        let expected: f32 = (0..19).map(|i| i as f32).sum();
        assert!((dot_product(&a, &b) - expected).abs() < 1e-4);
    }
}
