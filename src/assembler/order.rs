//! ORDER BY parsing
//!
//! A requested ordering is parsed into a column and a direction and rendered
//! back from those parts, so nothing from the request is copied into SQL
//! except a column that matched an allow-list entry exactly.

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A single-column ordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy<'a> {
    pub column: &'a str,
    pub direction: Option<SortDirection>,
}

impl<'a> OrderBy<'a> {
    /// Parse `column` or `column ASC|DESC`
    pub fn parse(raw: &'a str) -> Option<Self> {
        let mut parts = raw.split_whitespace();
        let column = parts.next()?;
        let direction = match parts.next() {
            None => None,
            Some(d) if d.eq_ignore_ascii_case("asc") => Some(SortDirection::Ascending),
            Some(d) if d.eq_ignore_ascii_case("desc") => Some(SortDirection::Descending),
            Some(_) => return None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Self { column, direction })
    }

    pub fn to_sql(&self) -> String {
        match self.direction {
            None => self.column.to_string(),
            Some(SortDirection::Ascending) => format!("{} ASC", self.column),
            Some(SortDirection::Descending) => format!("{} DESC", self.column),
        }
    }
}

/// Name a SELECT entry is addressable by: its alias if it has one
///
/// Only a bare identifier after the last ` AS ` counts as an alias, so the
/// `AS` inside `CAST(x AS String)` leaves the entry unaliased.
pub fn output_name(field: &str) -> &str {
    let field = field.trim();
    let lower = field.to_ascii_lowercase();
    match lower.rfind(" as ") {
        Some(pos) if is_identifier(field[pos + 4..].trim()) => field[pos + 4..].trim(),
        _ => field,
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
