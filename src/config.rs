//! Chart configuration shared by the adapter and the chart renderers.
//!
//! A single [ChartConfig] is built once and passed explicitly to every call
//! that needs a colour or a currency string.

use std::fmt;

use charming::element::JsFunction;
use numfmt::{Formatter, Precision};

use crate::Error;

/// The default series colours, assigned in order and reused cyclically.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
];

/// The default colour for single-series charts and the calendar heatmap.
pub const DEFAULT_PRIMARY_COLOR: &str = "#36A2EB";

/// The default currency symbol.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// An ordered, non-empty list of colours assigned cyclically to series.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette(Vec<String>);

impl Palette {
    /// Create a palette from a list of CSS colours.
    ///
    /// # Errors
    /// Returns [Error::EmptyPalette] if `colors` is empty.
    pub fn new(colors: Vec<String>) -> Result<Self, Error> {
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }

        Ok(Self(colors))
    }

    /// The colour for the series at `index`, wrapping around the palette.
    pub fn color_at(&self, index: usize) -> &str {
        &self.0[index % self.0.len()]
    }

    /// The number of distinct colours.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, a palette holds at least one colour.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(DEFAULT_PALETTE.iter().map(|&color| color.to_owned()).collect())
    }
}

/// A `#RRGGBB` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl HexColor {
    /// Parse a colour in the form `#RRGGBB`.
    ///
    /// # Errors
    /// Returns [Error::InvalidColor] for any other format.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidColor(text.to_owned());

        let digits = text.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |start: usize| {
            u8::from_str_radix(&digits[start..start + 2], 16).map_err(|_| invalid())
        };

        Ok(Self {
            red: channel(0)?,
            green: channel(2)?,
            blue: channel(4)?,
        })
    }

    /// This colour as a CSS `rgba()` string with the given opacity.
    ///
    /// `alpha` is clamped to `[0, 1]`.
    pub fn with_alpha(&self, alpha: f64) -> String {
        let alpha = alpha.clamp(0.0, 1.0);
        format!("rgba({}, {}, {}, {alpha})", self.red, self.green, self.blue)
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self {
            red: 0x36,
            green: 0xA2,
            blue: 0xEB,
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Formats amounts as currency strings with a configurable symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyFormat {
    symbol: String,
}

impl CurrencyFormat {
    /// Create a currency format that prefixes amounts with `symbol`.
    ///
    /// # Errors
    /// Returns [Error::InvalidCurrencySymbol] if `symbol` is empty or cannot be
    /// used as a number prefix.
    pub fn new(symbol: &str) -> Result<Self, Error> {
        if symbol.is_empty() || Formatter::currency(&format!("-{symbol}")).is_err() {
            return Err(Error::InvalidCurrencySymbol(symbol.to_owned()));
        }

        Ok(Self {
            symbol: symbol.to_owned(),
        })
    }

    /// The currency symbol, e.g. "$".
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Format `amount` with the currency symbol, thousands separators and two
    /// decimal places, e.g. "$1,050.00" or "-$12.30".
    ///
    /// Amounts are rounded to the nearest cent, so anything that rounds to
    /// zero is shown as zero without a sign.
    pub fn format(&self, amount: f64) -> String {
        let cents = (amount.abs() * 100.0).round() as u64;

        if cents == 0 {
            return format!("{}0.00", self.symbol);
        }

        let prefix = if amount < 0.0 {
            format!("-{}", self.symbol)
        } else {
            self.symbol.clone()
        };

        // numfmt only formats the whole part, it truncates fractions and uses
        // scientific notation for small numbers.
        let whole = cents / 100;
        let whole = if whole == 0 {
            // Zero is hardcoded as "0" without the prefix
            format!("{prefix}0")
        } else {
            match Formatter::currency(&prefix) {
                Ok(formatter) => formatter
                    .precision(Precision::Decimals(0))
                    .fmt_string(whole as f64),
                Err(_) => format!("{prefix}{whole}"),
            }
        };

        format!("{whole}.{:02}", cents % 100)
    }

    /// A JavaScript function that formats a number the same way as
    /// [CurrencyFormat::format], for use as an axis label or tooltip formatter.
    pub fn js_formatter(&self) -> JsFunction {
        JsFunction::new_with_args("value", &self.js_body())
    }

    /// The body of [CurrencyFormat::js_formatter], taking its input from a
    /// variable named `value`.
    pub(crate) fn js_body(&self) -> String {
        format!(
            "const amount = Number(value) || 0;
            const digits = Math.abs(amount).toLocaleString('en-US', {{
                minimumFractionDigits: 2,
                maximumFractionDigits: 2
            }});
            return (amount < 0 ? '-' : '') + {} + digits;",
            js_string_literal(&self.symbol)
        )
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_CURRENCY_SYMBOL.to_owned(),
        }
    }
}

/// Quote `text` as a single-quoted JavaScript string literal.
pub(crate) fn js_string_literal(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('<', "\\u003c");
    format!("'{escaped}'")
}

/// Easing curves understood by ECharts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start and end.
    QuarticInOut,
    /// Decelerating to a stop.
    CubicOut,
}

impl Easing {
    /// The ECharts name for this easing curve.
    pub fn as_str(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuarticInOut => "quarticInOut",
            Easing::CubicOut => "cubicOut",
        }
    }
}

/// How a chart animates when it is first drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    /// Length of the animation in milliseconds.
    pub duration_ms: u32,
    /// The easing curve.
    pub easing: Easing,
}

impl Animation {
    /// An animation of `duration_ms` milliseconds with quartic in-out easing.
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            easing: Easing::QuarticInOut,
        }
    }
}

/// Presentation settings injected into the chart adapter and renderers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartConfig {
    /// Colours for multi-series and per-slice charts.
    pub palette: Palette,
    /// Colour for single-series charts and the calendar heatmap.
    pub primary_color: HexColor,
    /// Formatting for currency amounts on axes and tooltips.
    pub currency: CurrencyFormat,
    /// Whether charts animate when first drawn.
    pub animate: bool,
}
