//! SQL dialects: identifier quoting and placeholder style.

/// Target database conventions used when rendering a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Backtick identifiers, `?` placeholders.
    #[default]
    MySql,
    /// Double-quoted identifiers, `?` placeholders.
    Sqlite,
    /// Double-quoted identifiers, `$1, $2, ...` placeholders.
    Postgres,
}

impl Dialect {
    /// Identifier quote character.
    #[inline]
    pub fn quote(self) -> char {
        match self {
            Dialect::MySql => '`',
            Dialect::Sqlite | Dialect::Postgres => '"',
        }
    }

    /// Append the placeholder for the 1-based argument index `idx`.
    #[inline]
    pub fn write_placeholder(self, out: &mut String, idx: usize) {
        match self {
            Dialect::MySql | Dialect::Sqlite => out.push('?'),
            Dialect::Postgres => {
                out.push('$');
                out.push_str(&idx.to_string());
            }
        }
    }

    /// Count the placeholders in rendered SQL.
    ///
    /// Text inside quoted identifiers and `'...'` literals is skipped, so a
    /// column named `a?` does not count.
    pub fn count_placeholders(self, sql: &str) -> usize {
        let quote = self.quote();
        let mut open: Option<char> = None;
        let mut count = 0;
        let mut chars = sql.chars().peekable();
        while let Some(ch) = chars.next() {
            if let Some(q) = open {
                if ch == q {
                    open = None;
                }
                continue;
            }
            match ch {
                c if c == quote || c == '\'' => open = Some(c),
                '?' if self != Dialect::Postgres => count += 1,
                '$' if self == Dialect::Postgres
                    && chars.peek().is_some_and(|c| c.is_ascii_digit()) =>
                {
                    count += 1
                }
                _ => {}
            }
        }
        count
    }
}
