//! A1 address parsing.
//!
//! Accepted shape: `[<sheet>!]<cell>[:<cell>]`, where a cell is column
//! letters followed by row digits, letters alone (a whole column) or digits
//! alone (a whole row). The sheet part may be quoted (`'My Sheet'!A1`).
//!
//! Parsing is purely syntactic. Sheet names are resolved later by the range
//! resolver, and the `A1:5` shorthand is expanded by
//! [`ParsedAddress::with_shorthand`] so it can be checked on its own.

use std::fmt;

use super::sheet_ref::{SheetRef, quote_title};
use crate::error::{AddressError, Result};

/// One end of a range, 1-based, as written. At least one part is present.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct CellToken {
    /// Uppercased column letters, or `None` for an open column.
    pub column: Option<String>,
    /// 1-based row, or `None` for an open row.
    pub row: Option<usize>,
}

impl CellToken {
    pub fn new(column: Option<&str>, row: Option<usize>) -> CellToken {
        CellToken {
            column: column.map(|c| c.to_ascii_uppercase()),
            row,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.column.is_some() && self.row.is_some()
    }
}

impl fmt::Display for CellToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(column) = &self.column {
            write!(f, "{}", column)?;
        }
        if let Some(row) = self.row {
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// An address split into its sheet part and both range ends.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedAddress {
    /// Unquoted sheet part, if the address had a `!`.
    pub sheet: Option<String>,
    /// The sheet part was written in quotes and is always a literal title.
    pub quoted: bool,
    pub start: CellToken,
    /// Equal to `start` when the address named a single cell.
    pub end: CellToken,
}

impl ParsedAddress {
    /// How the sheet part names its sheet, or `None` without a `!`.
    ///
    /// A quoted name is a title even when it reads like an ordinal: `'#1'!A1`
    /// is the sheet titled `#1`, `#1!A1` is the first sheet.
    pub fn sheet_ref(&self) -> Option<SheetRef> {
        let sheet = self.sheet.as_deref()?;
        Some(if self.quoted {
            SheetRef::Title(sheet.to_string())
        } else {
            SheetRef::parse(Some(sheet))
        })
    }

    /// Fill in a missing column from the other end of the range.
    ///
    /// - `A1:5` becomes `A1:A5` (end has only a row).
    /// - `2:C10` becomes `C2:C10` (start has only a row, end is a full cell).
    ///
    /// Pure row ranges (`2:10`) and column ranges (`A:C`, `A1:ZZ`) keep their
    /// open sides.
    pub fn with_shorthand(mut self) -> ParsedAddress {
        if self.end.column.is_none() && self.end.row.is_some() && self.start.column.is_some() {
            self.end.column = self.start.column.clone();
        } else if self.start.column.is_none()
            && self.start.row.is_some()
            && self.end.is_complete()
        {
            self.start.column = self.end.column.clone();
        }
        self
    }

    /// The range part without the sheet (`B2:C10`, or `B2` for one cell).
    pub fn rect(&self) -> String {
        if self.start == self.end {
            self.start.to_string()
        } else {
            format!("{}:{}", self.start, self.end)
        }
    }
}

impl fmt::Display for ParsedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sheet {
            Some(sheet) if self.quoted => write!(f, "{}!", quote_title(sheet))?,
            Some(sheet) => write!(f, "{}!", sheet)?,
            None => {}
        }
        write!(f, "{}", self.rect())
    }
}

/// Parse an address such as `Sheet1!B2:C10`, `#1!A:A` or `3:7`.
pub fn parse_address(address: &str) -> Result<ParsedAddress> {
    let input = address.trim();
    if input.is_empty() {
        return Err(AddressError::malformed(address, "empty address"));
    }

    let (sheet, quoted, rect) = split_sheet(address, input)?;
    if rect.is_empty() {
        return Err(AddressError::malformed(address, "missing cell or range"));
    }

    let (start, end) = match rect.split_once(':') {
        Some((start, end)) => {
            if end.contains(':') {
                return Err(AddressError::malformed(address, "more than one ':'"));
            }
            (parse_cell(address, start)?, parse_cell(address, end)?)
        }
        None => {
            let cell = parse_cell(address, rect)?;
            (cell.clone(), cell)
        }
    };

    Ok(ParsedAddress {
        sheet,
        quoted,
        start,
        end,
    })
}

/// Split off the sheet part at the first `!`, honouring a quoted title.
/// The flag is set when the sheet part was quoted.
fn split_sheet<'a>(address: &str, input: &'a str) -> Result<(Option<String>, bool, &'a str)> {
    if let Some(quoted) = input.strip_prefix('\'') {
        let mut title = String::new();
        let mut chars = quoted.char_indices().peekable();
        while let Some((idx, ch)) = chars.next() {
            if ch != '\'' {
                title.push(ch);
                continue;
            }
            if let Some((_, '\'')) = chars.peek() {
                title.push('\'');
                chars.next();
                continue;
            }
            let rest = &quoted[idx + 1..];
            let Some(rect) = rest.strip_prefix('!') else {
                return Err(AddressError::malformed(
                    address,
                    "quoted sheet name must be followed by '!'",
                ));
            };
            if title.is_empty() {
                return Err(AddressError::malformed(address, "empty sheet name"));
            }
            return Ok((Some(title), true, rect));
        }
        return Err(AddressError::malformed(address, "unterminated quoted sheet name"));
    }

    match input.split_once('!') {
        Some(("", _)) => Err(AddressError::malformed(address, "empty sheet name")),
        Some((sheet, rect)) => Ok((Some(sheet.to_string()), false, rect)),
        None => Ok((None, false, input)),
    }
}

/// Scan `<letters><digits>`, `<letters>` or `<digits>`.
fn parse_cell(address: &str, token: &str) -> Result<CellToken> {
    let token = token.trim();
    let split = token
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(token.len());
    let (letters, digits) = token.split_at(split);

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressError::malformed(
            address,
            format!("unexpected characters in cell {:?}", token),
        ));
    }
    if letters.is_empty() && digits.is_empty() {
        return Err(AddressError::malformed(address, "empty cell reference"));
    }

    let row = if digits.is_empty() {
        None
    } else {
        let row = digits.parse::<usize>().map_err(|_| {
            AddressError::malformed(address, format!("row out of range in {:?}", token))
        })?;
        if row == 0 {
            return Err(AddressError::malformed(address, "rows start at 1"));
        }
        Some(row)
    };
    let column = (!letters.is_empty()).then_some(letters);

    Ok(CellToken::new(column, row))
}
