use serde::{Deserialize, Serialize};

/// Locale preset used by value formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FormatLocale {
    #[default]
    EnUs,
    EsEs,
}

impl FormatLocale {
    #[must_use]
    pub fn decimal_separator(self) -> char {
        match self {
            Self::EnUs => '.',
            Self::EsEs => ',',
        }
    }

    #[must_use]
    pub fn group_separator(self) -> char {
        match self {
            Self::EnUs => ',',
            Self::EsEs => '.',
        }
    }
}

/// Scaling applied to values before formatting (`1500` -> `1.5K`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DisplayUnits {
    /// Pick a unit from a reference magnitude.
    #[default]
    Auto,
    None,
    Thousands,
    Millions,
    Billions,
    Trillions,
}

impl DisplayUnits {
    /// Resolves `Auto` against the largest absolute value that will be shown.
    #[must_use]
    pub fn resolve(self, reference_abs: f64) -> Self {
        if self != Self::Auto {
            return self;
        }
        let reference_abs = if reference_abs.is_finite() {
            reference_abs.abs()
        } else {
            0.0
        };
        if reference_abs >= 1e12 {
            Self::Trillions
        } else if reference_abs >= 1e9 {
            Self::Billions
        } else if reference_abs >= 1e6 {
            Self::Millions
        } else if reference_abs >= 1e3 {
            Self::Thousands
        } else {
            Self::None
        }
    }

    #[must_use]
    pub fn divisor(self) -> f64 {
        match self {
            Self::Auto | Self::None => 1.0,
            Self::Thousands => 1e3,
            Self::Millions => 1e6,
            Self::Billions => 1e9,
            Self::Trillions => 1e12,
        }
    }

    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Auto | Self::None => "",
            Self::Thousands => "K",
            Self::Millions => "M",
            Self::Billions => "bn",
            Self::Trillions => "T",
        }
    }
}

/// Per-call formatting request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FormatOptions<'a> {
    /// Number pattern such as `#,0.00`, `0%` or `$#,0`.
    pub format_string: Option<&'a str>,
    pub display_units: DisplayUnits,
    /// Overrides the decimal count implied by the pattern.
    pub precision: Option<u8>,
    pub locale: FormatLocale,
}

impl<'a> FormatOptions<'a> {
    #[must_use]
    pub fn with_format_string(format_string: &'a str) -> Self {
        Self {
            format_string: Some(format_string),
            display_units: DisplayUnits::None,
            ..Self::default()
        }
    }
}

/// Formats numbers for labels and tooltips.
pub trait ValueFormatter {
    fn format(&self, value: f64, options: &FormatOptions<'_>) -> String;
}

/// Built-in formatter understanding a practical subset of number patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValueFormatter;

impl ValueFormatter for DefaultValueFormatter {
    fn format(&self, value: f64, options: &FormatOptions<'_>) -> String {
        if !value.is_finite() {
            return "nan".to_owned();
        }

        let number_format = options.format_string.and_then(NumberFormat::parse);
        let Some(number_format) = number_format else {
            let units = options.display_units.resolve(value);
            let scaled = value / units.divisor();
            let text = match options.precision {
                Some(precision) => {
                    format_grouped(scaled, usize::from(precision), false, options.locale)
                }
                None => trim_decimal(
                    format_grouped(scaled, GENERAL_PRECISION, false, options.locale),
                    options.locale,
                ),
            };
            return format!("{text}{}", units.suffix());
        };

        let (pattern, magnitude) = number_format.section_for(value);
        let decimals = options
            .precision
            .map_or(pattern.decimals, usize::from);
        let (text, units_suffix) = if pattern.percent {
            let text = format_grouped(magnitude * 100.0, decimals, pattern.grouping, options.locale);
            (format!("{text}%"), "")
        } else {
            let units = options.display_units.resolve(magnitude);
            let scaled = magnitude / units.divisor();
            let text = format_grouped(scaled, decimals, pattern.grouping, options.locale);
            (text, units.suffix())
        };
        // The sign goes ahead of literal prefixes such as currency symbols.
        let (sign, text) = match text.strip_prefix('-') {
            Some(unsigned) => ("-", unsigned),
            None => ("", text.as_str()),
        };
        format!(
            "{sign}{}{text}{units_suffix}{}",
            pattern.prefix, pattern.suffix
        )
    }
}

const GENERAL_PRECISION: usize = 10;

/// `positive;negative;zero` sections of a number format string.
///
/// The negative section receives the absolute value, so its literals carry
/// the sign (`(#,0)` or `-0.0`). Missing or empty sections fall back to the
/// positive one.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NumberFormat {
    positive: NumberPattern,
    negative: Option<NumberPattern>,
    zero: Option<NumberPattern>,
}

impl NumberFormat {
    /// `None` means "use general formatting": the string is `General`, has
    /// more than three sections, or a section is not a number pattern.
    fn parse(format_string: &str) -> Option<Self> {
        if format_string.eq_ignore_ascii_case("general") {
            return None;
        }
        let mut sections = format_string.split(';');
        let positive = NumberPattern::parse(sections.next()?)?;
        let negative = optional_section(sections.next())?;
        let zero = optional_section(sections.next())?;
        if sections.next().is_some() {
            return None;
        }
        Some(Self {
            positive,
            negative,
            zero,
        })
    }

    fn section_for(&self, value: f64) -> (&NumberPattern, f64) {
        match (&self.negative, &self.zero) {
            (_, Some(zero)) if value == 0.0 => (zero, 0.0),
            (Some(negative), _) if value < 0.0 => (negative, -value),
            _ => (&self.positive, value),
        }
    }
}

fn optional_section(section: Option<&str>) -> Option<Option<NumberPattern>> {
    match section {
        None | Some("") => Some(None),
        Some(section) => NumberPattern::parse(section).map(Some),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NumberPattern {
    prefix: String,
    suffix: String,
    decimals: usize,
    grouping: bool,
    percent: bool,
}

impl NumberPattern {
    fn parse(format_string: &str) -> Option<Self> {
        let start = format_string.find(|ch: char| matches!(ch, '#' | '0'))?;
        let end = format_string[start..]
            .find(|ch: char| !matches!(ch, '#' | '0' | ',' | '.'))
            .map_or(format_string.len(), |offset| start + offset);
        let core = &format_string[start..end];
        let mut suffix = &format_string[end..];
        let percent = suffix.starts_with('%');
        if percent {
            suffix = &suffix[1..];
        }
        // A second run of digit placeholders is not something we can render.
        if suffix.contains(['#', '0']) {
            return None;
        }

        let (integer, fraction) = core.split_once('.').unwrap_or((core, ""));
        Some(Self {
            prefix: format_string[..start].to_owned(),
            suffix: suffix.to_owned(),
            decimals: fraction.chars().filter(|ch| matches!(ch, '0' | '#')).count(),
            grouping: integer.contains(','),
            percent,
        })
    }
}

/// Number of decimals needed to tell apart values `step` apart.
#[must_use]
pub fn precision_from_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let text = format!("{:.12}", step.abs());
    let Some((_, fraction)) = text.split_once('.') else {
        return 0;
    };
    fraction.trim_end_matches('0').len().clamp(0, 12)
}

fn format_grouped(value: f64, precision: usize, grouping: bool, locale: FormatLocale) -> String {
    let text = format!("{:.precision$}", value.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut out = String::with_capacity(text.len() + integer.len() / 3 + 1);
    let negative = value < 0.0 && text.chars().any(|ch| matches!(ch, '1'..='9'));
    if negative {
        out.push('-');
    }
    if grouping {
        let digits = integer.len();
        for (index, ch) in integer.chars().enumerate() {
            if index > 0 && (digits - index) % 3 == 0 {
                out.push(locale.group_separator());
            }
            out.push(ch);
        }
    } else {
        out.push_str(integer);
    }
    if !fraction.is_empty() {
        out.push(locale.decimal_separator());
        out.push_str(fraction);
    }
    out
}

fn trim_decimal(mut text: String, locale: FormatLocale) -> String {
    let separator = locale.decimal_separator();
    if text.contains(separator) {
        let trimmed_len = text.trim_end_matches('0').len();
        text.truncate(trimmed_len);
        if text.ends_with(separator) {
            text.pop();
        }
    }
    if text == "-0" { "0".to_owned() } else { text }
}
