use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;
const NICE_MAX_ITERATIONS: usize = 10;

/// Continuous linear mapping from a value domain to a pixel range.
///
/// A zero-width domain is accepted: every value maps to the middle of the
/// range and `nice` leaves the domain untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !(domain_end - domain_start).is_finite() {
            return Err(ChartError::InvalidData(format!(
                "scale domain span overflows: [{domain_start}, {domain_end}]"
            )));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: 0.0,
            range_end: 1.0,
        })
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(self)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Extends the domain outward to round tick boundaries.
    #[must_use]
    pub fn nice(mut self, tick_count: usize) -> Self {
        let reversed = self.domain_end < self.domain_start;
        let (mut start, mut stop) = if reversed {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };

        if start == stop {
            return self;
        }

        let mut previous_step = None;
        for _ in 0..NICE_MAX_ITERATIONS {
            let step = tick_increment(start, stop, tick_count);
            if previous_step == Some(step) {
                break;
            }
            let (niced_start, niced_stop) = if step > 0.0 {
                ((start / step).floor() * step, (stop / step).ceil() * step)
            } else if step < 0.0 {
                ((start * step).ceil() / step, (stop * step).floor() / step)
            } else {
                return self;
            };
            // Rounding outward can step past f64::MAX; keep the last finite domain.
            if !(niced_stop - niced_start).is_finite() {
                break;
            }
            start = niced_start;
            stop = niced_stop;
            previous_step = Some(step);
        }

        if reversed {
            self.domain_start = stop;
            self.domain_end = start;
        } else {
            self.domain_start = start;
            self.domain_end = stop;
        }
        self
    }

    /// Returns round tick values covering the domain, in domain order.
    #[must_use]
    pub fn ticks(self, tick_count: usize) -> Vec<f64> {
        if tick_count == 0 {
            return Vec::new();
        }
        if self.domain_start == self.domain_end {
            return vec![self.domain_start];
        }

        let reversed = self.domain_end < self.domain_start;
        let (start, stop) = if reversed {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };
        let Some((i1, i2, increment)) = tick_spec(start, stop, tick_count as f64) else {
            return Vec::new();
        };
        if i2 < i1 {
            return Vec::new();
        }

        let mut ticks: Vec<f64> = (i1..=i2)
            .map(|i| {
                let i = i as f64;
                if increment < 0.0 {
                    i / -increment
                } else {
                    i * increment
                }
            })
            .collect();
        if reversed {
            ticks.reverse();
        }
        ticks
    }

    /// Absolute spacing between consecutive ticks for `tick_count`.
    #[must_use]
    pub fn tick_step(self, tick_count: usize) -> f64 {
        let (start, stop) = if self.domain_end < self.domain_start {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };
        let increment = tick_increment(start, stop, tick_count);
        if !increment.is_finite() || increment == 0.0 {
            return 0.0;
        }
        if increment < 0.0 {
            1.0 / -increment
        } else {
            increment
        }
    }

    pub fn map(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return Ok(self.domain_start);
        }
        let normalized = (pixel - self.range_start) / range_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = nice_factor(error);
    if power < 0.0 {
        -10f64.powf(-power) / factor
    } else {
        factor * 10f64.powf(power)
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = nice_factor(error);

    let (i1, i2, increment) = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut i1 = (start * inc).round() as i64;
        let mut i2 = (stop * inc).round() as i64;
        if (i1 as f64) / inc < start {
            i1 += 1;
        }
        if (i2 as f64) / inc > stop {
            i2 -= 1;
        }
        (i1, i2, -inc)
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut i1 = (start / inc).round() as i64;
        let mut i2 = (stop / inc).round() as i64;
        if (i1 as f64) * inc < start {
            i1 += 1;
        }
        if (i2 as f64) * inc > stop {
            i2 -= 1;
        }
        (i1, i2, inc)
    };

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, increment))
}

fn nice_factor(error: f64) -> f64 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}
