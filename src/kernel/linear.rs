//! Linear kernel implementation

use crate::kernel::Kernel;

/// Linear kernel: K(x, y) = x^T * y
///
/// The only kernel for which a trained model can be projected back into a
/// primal weight vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearKernel;

impl LinearKernel {
    /// Create a new linear kernel
    pub fn new() -> Self {
        Self
    }
}

impl Kernel for LinearKernel {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        dot_product(x, y)
    }
}

/// Dot product of two dense vectors of equal length
pub(crate) fn dot_product(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_kernel_basic() {
        let kernel = LinearKernel::new();

        let x = [1.0, 0.0, 2.0];
        let y = [0.0, 1.0, 2.0];

        // Only index 2 contributes: 2.0 * 2.0 = 4.0
        assert_eq!(kernel.compute(&x, &y), 4.0);
    }

    #[test]
    fn test_linear_kernel_identical() {
        let kernel = LinearKernel::new();
        let x = [1.0, 2.0, 3.0];

        // x^T * x = 1^2 + 2^2 + 3^2 = 14
        assert_eq!(kernel.compute(&x, &x), 14.0);
    }

    #[test]
    fn test_linear_kernel_symmetric() {
        let kernel = LinearKernel::new();
        let x = [2.0, 3.0];
        let y = [-1.0, 0.5];

        assert_eq!(kernel.compute(&x, &y), kernel.compute(&y, &x));
        assert_eq!(kernel.compute(&x, &y), -0.5);
    }

    #[test]
    fn test_dot_product_orthogonal() {
        assert_eq!(dot_product(&[1.0, 0.0], &[0.0, 5.0]), 0.0);
    }
}
