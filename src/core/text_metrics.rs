use std::cell::RefCell;
use std::collections::HashMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::TextSize;
use crate::error::{ChartError, ChartResult};

const POINTS_TO_PIXELS: f64 = 4.0 / 3.0;
const LINE_HEIGHT_RATIO: f64 = 1.2;

/// Font used to measure and draw a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f64,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
        }
    }

    /// Builds a font from a size expressed in typographic points.
    #[must_use]
    pub fn from_points(family: impl Into<String>, size_pt: f64) -> Self {
        Self::new(family, size_pt * POINTS_TO_PIXELS)
    }
}

/// Measures rendered text.
///
/// Returns `MeasurementUnavailable` when the backing service cannot answer;
/// callers decide how to degrade.
pub trait TextMetricsProvider {
    fn measure(&self, text: &str, font: &FontSpec) -> ChartResult<TextSize>;
}

/// Deterministic, backend-independent width estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMetrics;

impl TextMetricsProvider for HeuristicTextMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> ChartResult<TextSize> {
        if !font.size_px.is_finite() || font.size_px <= 0.0 {
            return Err(ChartError::MeasurementUnavailable(format!(
                "font size must be finite and > 0, got {}",
                font.size_px
            )));
        }
        if text.is_empty() {
            return Ok(TextSize::new(0.0, font.size_px * LINE_HEIGHT_RATIO));
        }

        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                'i' | 'l' | 'j' | 'I' | '!' | '|' => 0.28,
                'm' | 'w' | 'M' | 'W' => 0.86,
                ch if ch.is_uppercase() => 0.68,
                _ => 0.56,
            }
        });
        Ok(TextSize::new(
            units * font.size_px,
            font.size_px * LINE_HEIGHT_RATIO,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MeasureKey {
    text: String,
    family: String,
    size_px: OrderedFloat<f64>,
}

/// Runtime metrics exposed by `CachedTextMetrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextMetricsCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

#[derive(Debug, Default)]
struct MeasureCache {
    entries: HashMap<MeasureKey, TextSize>,
    hits: u64,
    misses: u64,
}

/// Memoizes successful measurements of an inner provider.
///
/// Failures are not cached so a recovering backend is asked again.
#[derive(Debug)]
pub struct CachedTextMetrics<P> {
    inner: P,
    cache: RefCell<MeasureCache>,
}

impl<P: TextMetricsProvider> CachedTextMetrics<P> {
    #[must_use]
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: RefCell::new(MeasureCache::default()),
        }
    }

    #[must_use]
    pub fn stats(&self) -> TextMetricsCacheStats {
        let cache = self.cache.borrow();
        TextMetricsCacheStats {
            hits: cache.hits,
            misses: cache.misses,
            size: cache.entries.len(),
        }
    }

    pub fn clear(&self) {
        let mut cache = self.cache.borrow_mut();
        cache.entries.clear();
        cache.hits = 0;
        cache.misses = 0;
    }
}

impl<P: TextMetricsProvider> TextMetricsProvider for CachedTextMetrics<P> {
    fn measure(&self, text: &str, font: &FontSpec) -> ChartResult<TextSize> {
        let key = MeasureKey {
            text: text.to_owned(),
            family: font.family.clone(),
            size_px: OrderedFloat(font.size_px),
        };
        let mut cache = self.cache.borrow_mut();
        if let Some(size) = cache.entries.get(&key).copied() {
            cache.hits += 1;
            return Ok(size);
        }

        let size = self.inner.measure(text, font)?;
        cache.misses += 1;
        cache.entries.insert(key, size);
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CachedTextMetrics, FontSpec, HeuristicTextMetrics, TextMetricsProvider,
    };

    #[test]
    fn longer_text_measures_wider() {
        let font = FontSpec::new("Segoe UI", 12.0);
        let short = HeuristicTextMetrics.measure("ab", &font).expect("short");
        let long = HeuristicTextMetrics.measure("abcdef", &font).expect("long");
        assert!(long.width > short.width);
        assert_eq!(short.height, long.height);
    }

    #[test]
    fn points_convert_to_pixels() {
        let font = FontSpec::from_points("Segoe UI", 9.0);
        assert!((font.size_px - 12.0).abs() <= 1e-12);
    }

    #[test]
    fn cache_counts_hits_and_misses() {
        let metrics = CachedTextMetrics::new(HeuristicTextMetrics);
        let font = FontSpec::new("Segoe UI", 12.0);
        let first = metrics.measure("North", &font).expect("first");
        let second = metrics.measure("North", &font).expect("second");
        assert_eq!(first, second);
        let stats = metrics.stats();
        assert_eq!((stats.hits, stats.misses, stats.size), (1, 1, 1));
    }

    #[test]
    fn invalid_font_size_reports_unavailable_measurement() {
        let font = FontSpec::new("Segoe UI", 0.0);
        assert!(HeuristicTextMetrics.measure("x", &font).is_err());
    }
}
