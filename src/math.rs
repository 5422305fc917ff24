use num::Float;

/// Evaluates the piecewise-linear function through `coords` at `x`, similar
/// to numpy.interp for a single point.
///
/// A breakpoint within `tolerance` of `x` wins outright, and values outside the
/// breakpoints take the degree of the nearest end (flat, not zero). `coords`
/// must be non-empty and strictly increasing in x.
pub(crate) fn interp<F, I>(x: F, coords: I, tolerance: F) -> F
where
    F: Float,
    I: IntoIterator<Item = (F, F)> + Clone,
{
    if let Some((_, y)) = coords
        .clone()
        .into_iter()
        .find(|&(xp, _)| xp - tolerance <= x && x <= xp + tolerance)
    {
        return y;
    }

    let mut iter = coords.into_iter().enumerate().peekable();

    while let Some((i, (x1, y1))) = iter.next() {
        // Base cases
        if i == 0 && x < x1 {
            return y1;
        }

        let Some(&(_, (x2, y2))) = iter.peek() else {
            return y1;
        };

        // Actual interpolation
        if x1 < x && x < x2 {
            return y1 + (y2 - y1) * ((x - x1) / (x2 - x1));
        }
    }

    unreachable!("interpolating over no breakpoints")
}

#[test]
fn test_interp() {
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];
    let coords: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();

    let got: Vec<f64> = [0., 1., 1.5, 2.72, 3.24]
        .into_iter()
        .map(|x| interp(x, coords.iter().copied(), 0.001))
        .collect();

    assert_eq!(got[..2], [3., 3.]);
    approx::assert_abs_diff_eq!(got[2], 2.5, epsilon = 1e-12);
    approx::assert_abs_diff_eq!(got[3], 0.56, epsilon = 1e-12);
    assert_eq!(got[4], 0.);

    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];
    let coords: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();

    approx::assert_abs_diff_eq!(interp(2.5, coords.iter().copied(), 0.001), 4., epsilon = 1e-12);
    assert_eq!(interp(-1., coords.iter().copied(), 0.001), 0.);
    assert_eq!(interp(7.5, coords.iter().copied(), 0.001), 2.);
}

#[test]
fn test_interp_snaps_to_breakpoint_within_tolerance() {
    let coords = [(10.0f64, 0.), (30., 1.)];

    assert_eq!(interp(30.0009, coords, 0.001), 1.);
    assert_eq!(interp(9.9995, coords, 0.001), 0.);
    assert!(interp(29.99, coords, 0.001) < 1.);
}

#[test]
fn test_interp_single_breakpoint() {
    let coords = [(5.0f32, 0.4)];

    assert_eq!(interp(-3., coords, 0.001), 0.4);
    assert_eq!(interp(5., coords, 0.001), 0.4);
    assert_eq!(interp(90., coords, 0.001), 0.4);
}
