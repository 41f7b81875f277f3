//! Column letter codec.
//!
//! Spreadsheet columns are named in bijective base-26: there is no zero
//! digit, so `A` is 1, `Z` is 26 and `AA` follows as 27.
//!
//! # Examples
//!
//! ```
//! use sheetref_engine::engine::{column_to_index, index_to_column};
//!
//! assert_eq!(column_to_index("AZ").unwrap(), 52);
//! assert_eq!(index_to_column(703).unwrap(), "AAA");
//! ```

use crate::error::{AddressError, Result};

/// Convert column letters to their 1-based index (A -> 1, Z -> 26, AA -> 27).
///
/// Letters are case-insensitive. Empty or non-alphabetic input, and values
/// that overflow `usize`, are rejected with [`AddressError::InvalidColumn`].
pub fn column_to_index(letters: &str) -> Result<usize> {
    if letters.is_empty() {
        return Err(AddressError::InvalidColumn(letters.to_string()));
    }

    let mut acc = 0usize;
    for c in letters.bytes() {
        if !c.is_ascii_alphabetic() {
            return Err(AddressError::InvalidColumn(letters.to_string()));
        }
        // Both 'A' (0x41) and 'a' (0x61) land on 1 once the case bit is masked off.
        let digit = (c & 31) as usize;
        acc = acc
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| AddressError::InvalidColumn(letters.to_string()))?;
    }
    Ok(acc)
}

/// Convert a 1-based column index to letters (1 -> A, 26 -> Z, 27 -> AA).
pub fn index_to_column(index: usize) -> Result<String> {
    if index < 1 {
        return Err(AddressError::InvalidColumn(index.to_string()));
    }

    let mut letters = Vec::new();
    let mut n = index;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    Ok(letters.into_iter().map(char::from).collect())
}

/// 0-based variant used by the resolver: `A` -> 0.
pub(crate) fn column_to_offset(letters: &str) -> Result<usize> {
    Ok(column_to_index(letters)? - 1)
}
