/// Code point ranges of the Unicode `Han` script: ideographs, radicals,
/// and the ideographic marks 々 〇 〡..〩 〸..〻.
const HAN_RANGES: [(u32, u32); 22] = [
    (0x2e80, 0x2e99),
    (0x2e9b, 0x2ef3),
    (0x2f00, 0x2fd5),
    (0x3005, 0x3005),
    (0x3007, 0x3007),
    (0x3021, 0x3029),
    (0x3038, 0x303b),
    (0x3400, 0x4dbf),
    (0x4e00, 0x9fff),
    (0xf900, 0xfa6d),
    (0xfa70, 0xfad9),
    (0x16fe2, 0x16fe3),
    (0x16ff0, 0x16ff1),
    (0x20000, 0x2a6df),
    (0x2a700, 0x2b739),
    (0x2b740, 0x2b81d),
    (0x2b820, 0x2cea1),
    (0x2ceb0, 0x2ebe0),
    (0x2ebf0, 0x2ee5d),
    (0x2f800, 0x2fa1d),
    (0x30000, 0x3134a),
    (0x31350, 0x323af),
];

/// ANSI SGR style codes accepted by [`color_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiStyle {
    Default = 0,
    Bold = 1,
    Underline = 4,
    Blink = 5,
    Reverse = 7,
    Hidden = 8,
}

/// Foreground colors use 30..=37 and backgrounds 40..=47, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl AnsiColor {
    pub fn fg(self) -> u8 {
        30 + self as u8
    }

    pub fn bg(self) -> u8 {
        40 + self as u8
    }
}

/// Returns true when every character has the Unicode `Numeric` property.
///
/// That is wider than decimal digits: superscripts (`²`), vulgar fractions
/// (`½`) and letter numerals (`Ⅷ`) pass too. An empty string is all digits.
#[must_use]
pub fn is_digit(s: &str) -> bool {
    s.chars().all(char::is_numeric)
}

#[must_use]
pub fn is_han(c: char) -> bool {
    let cp = c as u32;
    HAN_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
}

/// Number of Han ideographs in `s`.
#[must_use]
pub fn han_count(s: &str) -> usize {
    s.chars().filter(|&c| is_han(c)).count()
}

/// Wraps `msg` in an ANSI escape sequence: `ESC[style;bg;fgm msg ESC[0m`.
#[must_use]
pub fn color_str(msg: &str, style: AnsiStyle, bg: AnsiColor, fg: AnsiColor) -> String {
    format!(
        "\x1b[{};{};{}m{}\x1b[0m",
        style as u8,
        bg.bg(),
        fg.fg(),
        msg
    )
}
