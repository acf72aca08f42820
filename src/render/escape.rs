//! HTML escaping

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Displays a string with `& < > " '` replaced by HTML entities.
///
/// Safe for both element content and quoted attribute values.
#[derive(Debug, Clone, Copy)]
pub struct Escaped<'a>(pub &'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut rest = self.0;

        while let Some(pos) = rest.find(['&', '<', '>', '"', '\'']) {
            let (plain, tail) = rest.split_at(pos);

            f.write_str(plain)?;

            let mut chars = tail.chars();

            let entity = match chars.next() {
                Some('&') => "&amp;",
                Some('<') => "&lt;",
                Some('>') => "&gt;",
                Some('"') => "&quot;",
                Some('\'') => "&#039;",
                _ => break,
            };

            f.write_str(entity)?;

            rest = chars.as_str();
        }

        f.write_str(rest)
    }
}
