//! Aligned Markdown tables.

use indexmap::IndexMap;

/// One table row: column name → cell text, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    cells: IndexMap<String, String>,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style cell setter.
    pub fn cell(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.cells.insert(column.into(), value.to_string());
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

/// Render rows as a Markdown table.
///
/// Columns are the union of all row keys in first-seen order; each column is
/// as wide as its widest cell or header. Returns an empty string when there
/// is nothing to show.
pub fn render(rows: &[TableRow]) -> String {
    let mut widths: IndexMap<String, usize> = IndexMap::new();
    for row in rows {
        for (column, value) in &row.cells {
            let header = table_safe(column);
            let header_len = header.chars().count();
            let len = table_safe(value).chars().count();
            let width = widths.entry(header).or_insert(header_len);
            *width = (*width).max(len);
        }
    }
    if widths.is_empty() {
        return String::new();
    }

    let mut header = String::from("|");
    let mut divider = String::from("|");
    for (column, &width) in &widths {
        header.push_str(&format!(" {:<w$}|", column, w = width + 1));
        divider.push_str(&format!(" {} |", "-".repeat(width)));
    }

    let mut out = String::new();
    out.push_str(&header);
    out.push('\n');
    out.push_str(&divider);
    out.push('\n');

    for row in rows {
        out.push('|');
        for (column, &width) in &widths {
            let value = row
                .cells
                .iter()
                .find(|(c, _)| table_safe(c) == *column)
                .map(|(_, v)| table_safe(v))
                .unwrap_or_default();
            out.push_str(&format!(" {:<w$}|", value, w = width + 1));
        }
        out.push('\n');
    }
    out
}

/// Wrap a value in inline code that is safe inside a table cell.
///
/// Values containing a backtick or a pipe become an HTML `<code>` element
/// with the pipe encoded as `&#124;`. Newlines become spaces.
pub fn code_cell(value: &str) -> String {
    let flat = value.replace("\r\n", " ").replace('\n', " ");
    if flat.contains(['`', '|']) {
        let escaped = html_escape::encode_text(&flat).replace('|', "&#124;");
        return format!("<code>{}</code>", escaped);
    }
    format!("`{}`", flat)
}

/// Keep a cell on one line and stop bare pipes from splitting it.
fn table_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev = None;
    for c in text.chars() {
        match c {
            '\r' => {}
            '\n' => out.push(' '),
            '|' if prev != Some('\\') => out.push_str("\\|"),
            _ => out.push(c),
        }
        prev = Some(c);
    }
    out
}
