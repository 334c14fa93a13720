/// Floating point type used for profile samples.
pub type Real = f64;

/// Absolute/relative tolerance pair for comparing samples.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Tolerances matching single precision storage (summary `REAL` blocks).
    pub fn single_precision() -> Self {
        Self {
            abs: 1e-6,
            rel: 1e-6,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn single_precision_accepts_f32_rounding() {
        let x = 1234.5678_f64;
        let rounded = x as f32 as f64;
        assert!(nearly_equal(x, rounded, Tolerances::single_precision()));
        assert!(!nearly_equal(x, rounded, Tolerances::default()));
    }
}
