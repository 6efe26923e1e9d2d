use crate::error::{CodecError, Result};

const BASE: u64 = 26;

/// Converts a 1-based column index to its letter name (`1 -> "A"`, `27 -> "AA"`).
///
/// Column letters form a bijective base-26 system: digits run 1..=26 and
/// there is no zero. Decrementing before taking the remainder makes exact
/// multiples of 26 wrap to `Z` and borrow from the next position.
pub fn column_name_of(index: i64) -> Result<String> {
    if index < 1 {
        return Err(CodecError::InvalidIndex(index));
    }

    let mut letters = Vec::new();
    let mut n = index as u64;

    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % BASE) as u8);
        n /= BASE;
    }

    letters.reverse();
    Ok(letters.into_iter().map(char::from).collect())
}

/// Converts a column name (`"A"`, `"AZ"`, `"XFD"`) back to its 1-based index.
///
/// Only uppercase ASCII letters are accepted.
pub fn column_index_of(name: &str) -> Result<u64> {
    let invalid = || CodecError::InvalidColumnName(name.to_string());

    if name.is_empty() {
        return Err(invalid());
    }

    let mut result: u64 = 0;

    for c in name.chars() {
        if !c.is_ascii_uppercase() {
            return Err(invalid());
        }

        let digit = (c as u8 - b'A' + 1) as u64;
        result = result
            .checked_mul(BASE)
            .and_then(|r| r.checked_add(digit))
            .ok_or_else(invalid)?;
    }

    Ok(result)
}

// Format cell reference (e.g., A1, B2)
#[must_use]
pub fn cell_reference(row: usize, col: usize) -> Option<String> {
    let name = column_name_of(i64::try_from(col).ok()?).ok()?;
    Some(format!("{}{}", name, row))
}

/// Splits an A1-style reference into 1-based `(row, col)`.
///
/// Lowercase letters are accepted here and upper-cased before decoding.
pub fn parse_cell_reference(input: &str) -> Option<(usize, usize)> {
    let col_end = input.find(|c: char| c.is_ascii_digit())?;
    if col_end == 0 {
        return None;
    }

    let (col_part, row_part) = input.split_at(col_end);

    // No letters after the row number ("A1B")
    if !row_part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let col = column_index_of(&col_part.to_ascii_uppercase()).ok()?;
    let row = row_part.parse::<usize>().ok()?;

    if row == 0 {
        return None;
    }

    Some((row, usize::try_from(col).ok()?))
}
