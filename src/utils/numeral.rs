//! Chinese numeral ⇄ integer conversion.
//!
//! Parsing accepts everyday, financial (大写) and colloquial glyphs, so
//! `两千零五`, `贰仟零伍` and `二千零五` all read as 2005. Formatting always
//! emits the canonical glyph for each value: `2005 -> "二千零五"`.
//!
//! ```rust
//! use sheet_numerals::utils::{format_chinese_numeral, parse_chinese_numeral};
//!
//! assert_eq!(parse_chinese_numeral("三万二千一百").unwrap(), 32100);
//! assert_eq!(format_chinese_numeral(108).unwrap(), "一百零八");
//! ```

use phf::phf_map;

use crate::error::{CodecError, Result};

/// Digit glyphs, including financial and colloquial variants.
static DIGITS: phf::Map<char, u8> = phf_map! {
    '零' => 0,
    '〇' => 0,
    '一' => 1,
    '壹' => 1,
    '幺' => 1,
    '二' => 2,
    '贰' => 2,
    '两' => 2,
    '三' => 3,
    '叁' => 3,
    '四' => 4,
    '肆' => 4,
    '五' => 5,
    '伍' => 5,
    '六' => 6,
    '陆' => 6,
    '七' => 7,
    '柒' => 7,
    '八' => 8,
    '捌' => 8,
    '九' => 9,
    '玖' => 9,
};

/// Unit glyphs and the power of ten each one stands for.
static UNITS: phf::Map<char, u128> = phf_map! {
    '十' => 10,
    '拾' => 10,
    '百' => 100,
    '佰' => 100,
    '千' => 1_000,
    '仟' => 1_000,
    '万' => 10_000,
    '亿' => 100_000_000,
};

const ZERO: char = '零';

const CANONICAL_DIGITS: [char; 10] = ['零', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// Canonical unit suffix for each decimal position, ones place first.
const CANONICAL_UNITS: [&str; 14] = [
    "", "十", "百", "千", "万", "十万", "百万", "千万", "亿", "十亿", "百亿", "千亿", "万亿",
    "十万亿",
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    AfterDigit,
    AfterUnit,
}

/// Parses a Chinese numeral (no fractional part) into an integer.
///
/// Glyphs are consumed least significant first while a running weight is
/// kept. A digit adds `digit * weight` and moves the weight up one decimal
/// place. A unit replaces the weight, or multiplies it when the previous glyph
/// was also a unit, which is how `十万` and `万亿` compose. A numeral that
/// starts with a unit (`十五`) reads as if preceded by `一`.
///
/// Runs of digits without units are positional, so `二〇二四` is 2024.
pub fn parse_chinese_numeral(text: &str) -> Result<u64> {
    let chars: Vec<char> = text.chars().collect();
    let Some(first) = chars.first() else {
        return Err(CodecError::EmptyNumeral);
    };

    let mut total: u64 = 0;
    // `None` once the weight no longer fits; only an error if a digit needs it.
    let mut weight: Option<u128> = Some(1);
    let mut state = State::AfterDigit;

    for (position, &c) in chars.iter().enumerate().rev() {
        if let Some(&digit) = DIGITS.get(&c) {
            total = accumulate(total, digit, weight)?;
            weight = weight.and_then(|w| w.checked_mul(10));
            state = State::AfterDigit;
        } else if let Some(&unit) = UNITS.get(&c) {
            weight = match state {
                State::AfterUnit => weight.and_then(|w| w.checked_mul(unit)),
                State::AfterDigit => Some(unit),
            };
            state = State::AfterUnit;
        } else {
            return Err(CodecError::InvalidCharacter {
                position,
                character: c,
            });
        }
    }

    if UNITS.contains_key(first) {
        total = accumulate(total, 1, weight)?;
    }

    Ok(total)
}

fn accumulate(total: u64, digit: u8, weight: Option<u128>) -> Result<u64> {
    if digit == 0 {
        return Ok(total);
    }

    weight
        .and_then(|w| w.checked_mul(u128::from(digit)))
        .and_then(|v| u64::try_from(v).ok())
        .and_then(|v| total.checked_add(v))
        .ok_or(CodecError::MagnitudeOverflow)
}

/// Formats an integer as a Chinese numeral using canonical glyphs.
///
/// Every non-zero digit is written with its full positional unit and zero
/// digits become `零`; runs of `零` then collapse to one and are trimmed from
/// both ends. Values with more decimal digits than the unit table has
/// positions (n ≥ 10¹⁴) fail with [`CodecError::MagnitudeOverflow`].
pub fn format_chinese_numeral(n: u64) -> Result<String> {
    if n == 0 {
        return Ok(ZERO.to_string());
    }

    let digits = n.to_string();
    let len = digits.len();
    if len > CANONICAL_UNITS.len() {
        return Err(CodecError::MagnitudeOverflow);
    }

    let mut out = String::with_capacity(len * 6);
    for (i, b) in digits.bytes().enumerate() {
        let digit = (b - b'0') as usize;
        if digit == 0 {
            out.push(ZERO);
            continue;
        }
        out.push(CANONICAL_DIGITS[digit]);
        out.push_str(CANONICAL_UNITS[len - 1 - i]);
    }

    Ok(collapse_zeros(&out))
}

/// Collapses runs of `零` into one and trims it from both ends.
fn collapse_zeros(s: &str) -> String {
    let mut out = String::with_capacity(s.len());

    for c in s.chars() {
        if c == ZERO && (out.is_empty() || out.ends_with(ZERO)) {
            continue;
        }
        out.push(c);
    }

    if out.ends_with(ZERO) {
        out.pop();
    }

    out
}

/// Largest value [`format_chinese_numeral`] accepts.
pub const MAX_FORMATTABLE: u64 = 99_999_999_999_999;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_forms() {
        let cases = [
            ("十", 10),
            ("十五", 15),
            ("二十三", 23),
            ("一百零八", 108),
            ("两千零五", 2005),
            ("三万二千一百", 32100),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_chinese_numeral(text).unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn parse_synonyms() {
        assert_eq!(parse_chinese_numeral("贰仟零伍").unwrap(), 2005);
        assert_eq!(parse_chinese_numeral("壹佰壹拾").unwrap(), 110);
        assert_eq!(parse_chinese_numeral("幺〇").unwrap(), 10);
    }

    #[test]
    fn parse_stacked_units() {
        assert_eq!(parse_chinese_numeral("十万").unwrap(), 100_000);
        assert_eq!(parse_chinese_numeral("三百万").unwrap(), 3_000_000);
        assert_eq!(parse_chinese_numeral("一万亿").unwrap(), 1_000_000_000_000);
        assert_eq!(parse_chinese_numeral("一亿零五万").unwrap(), 100_050_000);
        assert_eq!(parse_chinese_numeral("亿亿").unwrap(), 10_000_000_000_000_000);
    }

    #[test]
    fn parse_positional_digits() {
        assert_eq!(parse_chinese_numeral("二〇二四").unwrap(), 2024);
        assert_eq!(parse_chinese_numeral("零").unwrap(), 0);
    }

    #[test]
    fn parse_rejects_unknown_character() {
        assert_eq!(
            parse_chinese_numeral("三万a二千"),
            Err(CodecError::InvalidCharacter {
                position: 2,
                character: 'a'
            })
        );
        assert_eq!(
            parse_chinese_numeral("十x"),
            Err(CodecError::InvalidCharacter {
                position: 1,
                character: 'x'
            })
        );
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(parse_chinese_numeral(""), Err(CodecError::EmptyNumeral));
    }

    #[test]
    fn parse_overflow() {
        assert_eq!(
            parse_chinese_numeral("一亿亿亿"),
            Err(CodecError::MagnitudeOverflow)
        );
    }

    #[test]
    fn format_basic() {
        assert_eq!(format_chinese_numeral(0).unwrap(), "零");
        assert_eq!(format_chinese_numeral(10).unwrap(), "一十");
        assert_eq!(format_chinese_numeral(108).unwrap(), "一百零八");
        assert_eq!(format_chinese_numeral(2005).unwrap(), "二千零五");
        assert_eq!(format_chinese_numeral(32100).unwrap(), "三万二千一百");
        assert_eq!(format_chinese_numeral(100_050_000).unwrap(), "一亿零五万");
    }

    #[test]
    fn format_uses_compound_units() {
        assert_eq!(format_chinese_numeral(110_000).unwrap(), "一十万一万");
        assert_eq!(
            format_chinese_numeral(10_000_000_000_000).unwrap(),
            "一十万亿"
        );
    }

    #[test]
    fn format_overflow() {
        assert!(format_chinese_numeral(MAX_FORMATTABLE).is_ok());
        assert_eq!(
            format_chinese_numeral(MAX_FORMATTABLE + 1),
            Err(CodecError::MagnitudeOverflow)
        );
    }

    #[test]
    fn format_then_parse() {
        for n in [1, 9, 10, 11, 20, 101, 1000, 1001, 10010, 99_999, 123_456_789] {
            let text = format_chinese_numeral(n).unwrap();
            assert_eq!(parse_chinese_numeral(&text).unwrap(), n, "{text}");
        }
        let text = format_chinese_numeral(MAX_FORMATTABLE).unwrap();
        assert_eq!(parse_chinese_numeral(&text).unwrap(), MAX_FORMATTABLE);
    }

    #[test]
    fn collapse_zero_runs() {
        assert_eq!(collapse_zeros("零零一百零零零八零"), "一百零八");
        assert_eq!(collapse_zeros("零"), "");
    }
}
