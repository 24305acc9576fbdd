/// Clamped linear interpolation.
///
/// Returns `y0` for `x <= x0`, `y1` for `x >= x1` and a linear blend in
/// between. Callers guarantee `x0 < x1`.
pub fn interpolate(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    if x <= x0 {
        return y0;
    }
    if x >= x1 {
        return y1;
    }
    y0 + (y1 - y0) * ((x - x0) / (x1 - x0))
}

/// [`interpolate`] over a pair of anchors.
pub fn interpolate_anchors(x: f64, xs: [f64; 2], ys: [f64; 2]) -> f64 {
    interpolate(x, xs[0], xs[1], ys[0], ys[1])
}

/// Round half away from zero to the given number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_below_and_above() {
        assert_eq!(interpolate(0.5, 1.0, 10.0, 100.0, 220.0), 100.0);
        assert_eq!(interpolate(1.0, 1.0, 10.0, 100.0, 220.0), 100.0);
        assert_eq!(interpolate(10.0, 1.0, 10.0, 100.0, 220.0), 220.0);
        assert_eq!(interpolate(40.0, 1.0, 10.0, 100.0, 220.0), 220.0);
    }

    #[test]
    fn test_midpoint() {
        assert!((interpolate(5.5, 1.0, 10.0, 100.0, 220.0) - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_strictly_inside_and_monotonic() {
        let mut previous = 100.0;
        for step in 1..90 {
            let x = 1.0 + step as f64 * 0.1;
            let y = interpolate(x, 1.0, 10.0, 100.0, 220.0);
            assert!(y > 100.0 && y < 220.0, "x={} gave {}", x, y);
            assert!(y > previous, "not monotonic at x={}", x);
            previous = y;
        }
    }

    #[test]
    fn test_descending_targets() {
        // Travel speed falls as current rises.
        let speed = interpolate_anchors(160.0, [100.0, 220.0], [400.0, 250.0]);
        assert!((speed - 325.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(24.8312, 1), 24.8);
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(round_to(224.4, 0), 224.0);
    }
}
