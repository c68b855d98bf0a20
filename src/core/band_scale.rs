use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Ordinal scale splitting a pixel range into equal bands, one per domain
/// entry, in domain order.
///
/// Outer padding is zero and leftover space is centered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: Vec<String>,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    step: f64,
    bandwidth: f64,
    positions: Vec<f64>,
}

impl BandScale {
    /// `padding_inner` is the fraction of each step left empty between bands.
    pub fn new(
        domain: Vec<String>,
        range_start: f64,
        range_end: f64,
        padding_inner: f64,
    ) -> ChartResult<Self> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "band scale range must be finite".to_owned(),
            ));
        }
        if !padding_inner.is_finite() || !(0.0..=1.0).contains(&padding_inner) {
            return Err(ChartError::InvalidData(
                "band scale inner padding must be in [0, 1]".to_owned(),
            ));
        }

        let count = domain.len();
        let reversed = range_end < range_start;
        let (start, stop) = if reversed {
            (range_end, range_start)
        } else {
            (range_start, range_end)
        };
        let slots = (count as f64 - padding_inner).max(1.0);
        let step = (stop - start) / slots;
        let offset = start + (stop - start - step * (count as f64 - padding_inner)) * 0.5;
        let bandwidth = step * (1.0 - padding_inner);

        let mut positions: Vec<f64> = (0..count).map(|i| offset + step * i as f64).collect();
        if reversed {
            positions.reverse();
        }

        Ok(Self {
            domain,
            range_start,
            range_end,
            padding_inner,
            step,
            bandwidth,
            positions,
        })
    }

    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn padding_inner(&self) -> f64 {
        self.padding_inner
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Start coordinate of the band at `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<f64> {
        self.positions.get(index).copied()
    }

    /// Center coordinate of the band at `index`.
    #[must_use]
    pub fn center(&self, index: usize) -> Option<f64> {
        self.position(index).map(|start| start + self.bandwidth * 0.5)
    }

    /// Start coordinate of the band for `name`.
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|entry| entry == name)
            .and_then(|index| self.position(index))
    }
}
