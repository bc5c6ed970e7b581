//! Linear mapping of a scalar from a source domain onto a target range.
//!
//! Every camera parameter of the scene is derived from one animated scalar
//! through an [`Interpolation`], so both endpoints must be hit exactly:
//! a settled transition has to land on the configured camera value, not on
//! a value one rounding step away from it.

use serde::{Deserialize, Serialize};

/// Maps `value` from `domain` onto `range` without clamping.
///
/// `lerp(d0, [d0, d1], [r0, r1]) == r0` and `lerp(d1, [d0, d1], [r0, r1]) == r1`
/// hold exactly for finite inputs with `d0 != d1`.
pub fn lerp(value: f32, domain: [f32; 2], range: [f32; 2]) -> f32 {
    let [d0, d1] = domain.map(f64::from);
    let [r0, r1] = range.map(f64::from);
    let t = (f64::from(value) - d0) / (d1 - d0);
    // Weighted form keeps both endpoints exact; `r0 + t * (r1 - r0)` drifts
    // for ranges like [1e8, 10].
    (r0 * (1.0 - t) + r1 * t) as f32
}

/// A domain → range mapping, optionally clamped to the domain.
///
/// The domain must have non-zero width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interpolation {
    pub domain: [f32; 2],
    pub range: [f32; 2],
}

impl Interpolation {
    pub const fn new(domain: [f32; 2], range: [f32; 2]) -> Self {
        Self { domain, range }
    }

    /// Unclamped linear map.
    pub fn apply(&self, value: f32) -> f32 {
        lerp(value, self.domain, self.range)
    }

    /// Linear map with the input clamped into the domain first.
    pub fn apply_clamped(&self, value: f32) -> f32 {
        let [d0, d1] = self.domain;
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        self.apply(value.clamp(lo, hi))
    }
}
