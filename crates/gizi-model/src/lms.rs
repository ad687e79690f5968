use serde::{Deserialize, Serialize};

/// Box-Cox power-normal parameters for one reference row.
///
/// `l` is the skewness (lambda), `m` the median (mu), `s` the coefficient of
/// variation (sigma).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lms {
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

impl Lms {
    pub const fn new(l: f64, m: f64, s: f64) -> Self {
        Self { l, m, s }
    }

    /// True when the row can be used for scoring: all finite, `m > 0`, `s > 0`.
    pub fn is_valid(&self) -> bool {
        self.l.is_finite()
            && self.m.is_finite()
            && self.s.is_finite()
            && self.m > 0.0
            && self.s > 0.0
    }

    /// Component-wise linear interpolation; `fraction` 0 yields `self`, 1 yields `upper`.
    pub fn lerp(&self, upper: &Lms, fraction: f64) -> Lms {
        Lms {
            l: self.l + (upper.l - self.l) * fraction,
            m: self.m + (upper.m - self.m) * fraction,
            s: self.s + (upper.s - self.s) * fraction,
        }
    }
}
