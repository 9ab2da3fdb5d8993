//! Kernel trait definition

/// Kernel function trait
///
/// A kernel function K(x, y) is a symmetric similarity measure between two
/// dense feature vectors of equal length. The optimizer only ever calls
/// `compute`, so any implementation can be substituted for the dot product.
pub trait Kernel: Send + Sync {
    /// Compute kernel value K(x, y)
    fn compute(&self, x: &[f64], y: &[f64]) -> f64;
}

impl<K: Kernel + ?Sized> Kernel for &K {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        (**self).compute(x, y)
    }
}

/// Adapter turning a plain function or closure into a [`Kernel`]
///
/// ```rust
/// use rsmo::kernel::{FnKernel, Kernel};
///
/// let shifted = FnKernel::new(|x: &[f64], y: &[f64]| {
///     x.iter().zip(y).map(|(a, b)| a * b).sum::<f64>() + 1.0
/// });
/// assert_eq!(shifted.compute(&[1.0, 2.0], &[3.0, 4.0]), 12.0);
/// ```
#[derive(Clone, Copy)]
pub struct FnKernel<F>(F);

impl<F> FnKernel<F>
where
    F: Fn(&[f64], &[f64]) -> f64 + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Kernel for FnKernel<F>
where
    F: Fn(&[f64], &[f64]) -> f64 + Send + Sync,
{
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        (self.0)(x, y)
    }
}

impl<F> std::fmt::Debug for FnKernel<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnKernel")
    }
}
