//! # Table Interpolation
//!
//! Shared helpers for looking values up in sorted 1-D axes. Used by the
//! Roark plate coefficient table and the interlayer shear-modulus grid.

/// Position of `x` on a sorted axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisPosition {
    /// `x` coincides with `axis[i]`
    Exact(usize),
    /// `axis[lo] < x < axis[lo + 1]`, `t` is the fraction from `lo` to `lo + 1`
    Between { lo: usize, t: f64 },
    /// `x` lies outside `[axis[0], axis[n-1]]`
    OutOfBounds,
}

/// Relative tolerance for treating a value as sitting on a grid point
const EXACT_TOLERANCE: f64 = 1e-9;

/// Locate `x` on an ascending axis.
///
/// Returns [`AxisPosition::OutOfBounds`] for an empty axis.
pub fn locate(axis: &[f64], x: f64) -> AxisPosition {
    let (first, last) = match (axis.first(), axis.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return AxisPosition::OutOfBounds,
    };

    if let Some(i) = axis.iter().position(|&v| is_close(v, x)) {
        return AxisPosition::Exact(i);
    }
    if x < first || x > last {
        return AxisPosition::OutOfBounds;
    }

    // x is strictly inside and not on a point, so a bracketing pair exists
    let hi = axis.iter().position(|&v| v > x).unwrap_or(axis.len() - 1);
    let lo = hi - 1;
    let t = (x - axis[lo]) / (axis[hi] - axis[lo]);
    AxisPosition::Between { lo, t }
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Linearly interpolate `values` (aligned with `axis`) at `x`.
///
/// Returns `None` outside the axis range.
pub fn interpolate(axis: &[f64], values: &[f64], x: f64) -> Option<f64> {
    match locate(axis, x) {
        AxisPosition::Exact(i) => values.get(i).copied(),
        AxisPosition::Between { lo, t } => Some(lerp(*values.get(lo)?, *values.get(lo + 1)?, t)),
        AxisPosition::OutOfBounds => None,
    }
}

fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= EXACT_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AXIS: [f64; 4] = [1.0, 2.0, 4.0, 8.0];

    #[test]
    fn test_locate_exact() {
        assert_eq!(locate(&AXIS, 4.0), AxisPosition::Exact(2));
        assert_eq!(locate(&AXIS, 1.0), AxisPosition::Exact(0));
        assert_eq!(locate(&AXIS, 8.0), AxisPosition::Exact(3));
    }

    #[test]
    fn test_locate_between() {
        match locate(&AXIS, 3.0) {
            AxisPosition::Between { lo, t } => {
                assert_eq!(lo, 1);
                assert!((t - 0.5).abs() < 1e-12);
            }
            other => panic!("expected Between, got {:?}", other),
        }
    }

    #[test]
    fn test_locate_out_of_bounds() {
        assert_eq!(locate(&AXIS, 0.5), AxisPosition::OutOfBounds);
        assert_eq!(locate(&AXIS, 8.5), AxisPosition::OutOfBounds);
        assert_eq!(locate(&[], 1.0), AxisPosition::OutOfBounds);
    }

    #[test]
    fn test_interpolate() {
        let values = [10.0, 20.0, 40.0, 80.0];
        assert_eq!(interpolate(&AXIS, &values, 2.0), Some(20.0));
        assert!((interpolate(&AXIS, &values, 6.0).unwrap() - 60.0).abs() < 1e-12);
        assert_eq!(interpolate(&AXIS, &values, 9.0), None);
    }
}
