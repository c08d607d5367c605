//! Won amounts: lenient parsing, guarded arithmetic and display.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Largest magnitude accepted from input. Anything beyond is treated as unparseable.
pub const AMOUNT_LIMIT: Decimal = dec!(1000000000000000000);

/// Parse an amount typed by a person, e.g. `"1,250,000"`.
///
/// Thousands separators are stripped and the longest leading floating-point
/// literal is parsed, so `"12,000원"` is 12000 and `"abc"` is 0. Empty or
/// malformed input is 0, never an error.
pub fn parse_amount(s: &str) -> Decimal {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    let Some(literal) = FloatLiteral::scan(cleaned.trim_start()) else {
        return Decimal::ZERO;
    };
    literal
        .to_decimal()
        .filter(|v| v.abs() <= AMOUNT_LIMIT)
        .map(|v| v.normalize())
        .unwrap_or(Decimal::ZERO)
}

/// Leading `[+-]digits[.digits][e[+-]digits]` of a string
struct FloatLiteral<'a> {
    negative: bool,
    int_digits: &'a str,
    frac_digits: &'a str,
    exponent: Option<&'a str>,
}

impl<'a> FloatLiteral<'a> {
    fn scan(s: &'a str) -> Option<Self> {
        let bytes = s.as_bytes();
        let mut pos = 0;

        let negative = match bytes.first() {
            Some(b'-') => {
                pos += 1;
                true
            }
            Some(b'+') => {
                pos += 1;
                false
            }
            _ => false,
        };

        let int_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let int_digits = &s[int_start..pos];

        let mut frac_digits = "";
        if pos < bytes.len() && bytes[pos] == b'.' {
            let frac_start = pos + 1;
            let mut end = frac_start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            frac_digits = &s[frac_start..end];
            pos = end;
        }

        if int_digits.is_empty() && frac_digits.is_empty() {
            return None;
        }

        // An exponent only counts when at least one digit follows it
        let mut exponent = None;
        if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
            let exp_start = pos + 1;
            let mut end = exp_start;
            if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
                end += 1;
            }
            let digits_start = end;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end > digits_start {
                exponent = Some(&s[exp_start..end]);
            }
        }

        Some(FloatLiteral {
            negative,
            int_digits,
            frac_digits,
            exponent,
        })
    }

    fn to_decimal(&self) -> Option<Decimal> {
        let sign = if self.negative { "-" } else { "" };
        let int_part = if self.int_digits.is_empty() { "0" } else { self.int_digits };
        let mantissa = if self.frac_digits.is_empty() {
            format!("{sign}{int_part}")
        } else {
            format!("{sign}{int_part}.{}", self.frac_digits)
        };

        match self.exponent {
            None => Decimal::from_str(&mantissa).ok(),
            Some(exp) => {
                let exp = exp.strip_prefix('+').unwrap_or(exp);
                Decimal::from_scientific(&format!("{mantissa}e{exp}")).ok()
            }
        }
    }
}

/// Serde adapter: accepts a JSON number, a formatted string or null.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => parse_amount(&n.to_string()),
        Value::String(s) => parse_amount(&s),
        _ => Decimal::ZERO,
    })
}

/// Serde adapter for optional amounts: blank or missing is `None`.
pub fn lenient_optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => Some(parse_amount(&n.to_string())),
        Value::String(s) if !s.trim().is_empty() => Some(parse_amount(&s)),
        _ => None,
    })
}

/// floor(amount × numerator ÷ denominator), or 0 for a zero denominator or overflow.
pub fn prorate(amount: Decimal, numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    amount
        .checked_mul(numerator)
        .and_then(|p| p.checked_div(denominator))
        .or_else(|| {
            numerator
                .checked_div(denominator)
                .and_then(|ratio| amount.checked_mul(ratio))
        })
        .map(|v| v.floor())
        .unwrap_or_else(|| {
            log::warn!(
                "Overflow prorating {} by {}/{}; using 0",
                amount,
                numerator,
                denominator
            );
            Decimal::ZERO
        })
}

/// floor(a × b), or 0 on overflow.
pub fn floor_product(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).map(|v| v.floor()).unwrap_or_else(|| {
        log::warn!("Overflow multiplying {} by {}; using 0", a, b);
        Decimal::ZERO
    })
}

/// floor(a × b × c), or 0 on overflow.
pub fn floor_product3(a: Decimal, b: Decimal, c: Decimal) -> Decimal {
    a.checked_mul(b)
        .and_then(|ab| ab.checked_mul(c))
        .map(|v| v.floor())
        .unwrap_or_else(|| {
            log::warn!("Overflow multiplying {} by {} by {}; using 0", a, b, c);
            Decimal::ZERO
        })
}

/// a + b, or 0 on overflow.
pub fn add_amounts(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        log::warn!("Overflow adding {} and {}; using 0", a, b);
        Decimal::ZERO
    })
}

/// a − b, or 0 on overflow.
pub fn sub_amounts(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or_else(|| {
        log::warn!("Overflow subtracting {} from {}; using 0", b, a);
        Decimal::ZERO
    })
}

/// Format a won amount with thousands separators, e.g. `49,030,000`.
pub fn format_won(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let negative = normalized.is_sign_negative() && !normalized.is_zero();
    let text = normalized.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Format a fractional rate as a percentage, e.g. `0.08` → `8%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * dec!(100)).normalize())
}
