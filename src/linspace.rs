/// Absorbs float noise so that an end which is a whole number of steps away is
/// still sampled.
const END_EPSILON: f64 = 0.001;

/// Samples `start, start + step, ...` up to and including `end`.
///
/// Each sample is computed from its index rather than by repeated addition,
/// so long ranges do not drift.
pub struct Linspace {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    /// `None` when `step` is not positive or the sample count overflows `usize`.
    pub fn stepped(start: f64, end: f64, step: f64) -> Option<Self> {
        if !(step > 0.) {
            return None;
        }

        let len = if end >= start {
            let last = ((end - start + END_EPSILON) / step).floor();

            // `as` saturates, so anything at or past usize::MAX is rejected here
            if !last.is_finite() || last >= usize::MAX as f64 {
                return None;
            }

            (last as usize).checked_add(1)?
        } else {
            0
        };

        Some(Linspace {
            start,
            step,
            index: 0,
            len,
        })
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            let i = self.index;
            self.index += 1;
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}
