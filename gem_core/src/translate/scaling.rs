//! Unit conversion and percentage scaling of raw stat values

use crate::config::{IndexHandler, ValueFormat};
use std::fmt;

/// A stat value ready to be written into a template
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaledValue {
    Whole(i64),
    /// One decimal place, produced by any dividing handler
    Fractional(f64),
}

impl ScaledValue {
    pub fn as_f64(self) -> f64 {
        match self {
            ScaledValue::Whole(v) => v as f64,
            ScaledValue::Fractional(v) => v,
        }
    }

    /// Text for a template slot; `Ignore` yields nothing
    pub fn render(self, format: ValueFormat) -> String {
        match format {
            ValueFormat::Ignore => String::new(),
            ValueFormat::Plain => self.to_string(),
            ValueFormat::Signed if self.as_f64() < 0.0 => self.to_string(),
            ValueFormat::Signed => format!("+{}", self),
        }
    }
}

impl fmt::Display for ScaledValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ScaledValue::Whole(v) => write!(f, "{}", v),
            ScaledValue::Fractional(v) if v.fract() == 0.0 => write!(f, "{:.1}", v),
            ScaledValue::Fractional(v) => write!(f, "{}", v),
        }
    }
}

/// Apply `handlers` in order, then scale by `(1 + factor / 100)`
///
/// Fractional results round to one decimal, whole ones truncate toward zero.
pub fn scale_value(value: i64, factor: i64, handlers: &[IndexHandler]) -> ScaledValue {
    let mut scaled = value as f64;
    let mut fractional = false;
    for handler in handlers {
        match handler.divisor() {
            Some(divisor) => {
                scaled /= divisor;
                fractional = true;
            }
            None => scaled = -scaled,
        }
    }

    scaled *= 1.0 + factor as f64 / 100.0;
    if fractional {
        ScaledValue::Fractional((scaled * 10.0).round_ties_even() / 10.0)
    } else {
        ScaledValue::Whole(scaled.trunc() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_whole_values_truncate() {
        assert_eq!(scale_value(32, 50, &[]), ScaledValue::Whole(48));
        assert_eq!(scale_value(33, 78, &[]), ScaledValue::Whole(58));
        assert_eq!(scale_value(-25, -7, &[]), ScaledValue::Whole(-23));
    }

    #[test]
    fn test_per_minute_handler() {
        let value = scale_value(84, 0, &[IndexHandler::PerMinuteToPerSecond]);
        assert_eq!(value, ScaledValue::Fractional(1.4));
        assert_eq!(value.to_string(), "1.4");
    }

    #[test]
    fn test_integral_fraction_keeps_decimal() {
        let value = scale_value(3000, 0, &[IndexHandler::MillisecondsToSeconds]);
        assert_eq!(value.to_string(), "3.0");
    }

    #[test]
    fn test_negate_stays_whole() {
        assert_eq!(scale_value(10, 0, &[IndexHandler::Negate]), ScaledValue::Whole(-10));
    }

    #[test]
    fn test_render_formats() {
        assert_eq!(ScaledValue::Whole(5).render(ValueFormat::Signed), "+5");
        assert_eq!(ScaledValue::Whole(-5).render(ValueFormat::Signed), "-5");
        assert_eq!(ScaledValue::Whole(5).render(ValueFormat::Plain), "5");
        assert_eq!(ScaledValue::Whole(5).render(ValueFormat::Ignore), "");
        assert_eq!(ScaledValue::Fractional(0.5).render(ValueFormat::Signed), "+0.5");
    }

    proptest! {
        #[test]
        fn prop_scaling_monotonic_in_bonus(
            value in 0i64..100_000,
            low in -100i64..500,
            extra in 0i64..500,
            divide in any::<bool>(),
        ) {
            let handlers: &[IndexHandler] = if divide {
                &[IndexHandler::DivideByOneHundred]
            } else {
                &[]
            };
            let a = scale_value(value, low, handlers).as_f64();
            let b = scale_value(value, low + extra, handlers).as_f64();
            prop_assert!(a <= b);
        }
    }
}
