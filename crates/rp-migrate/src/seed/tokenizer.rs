//! Line-based statement scanner for seed-data files.

/// Lines starting with this marker are ignored.
pub const COMMENT_MARKER: &str = "--";

/// Ends a statement when it is the last character of a line.
pub const TERMINATOR: char = ';';

/// Split seed file content into INSERT statements, terminators stripped.
///
/// A statement starts on a line beginning with `INSERT INTO` (any case)
/// and ends on the first line ending in `;`. Continuation lines are joined
/// with a single space. Lines outside a statement are ignored, so non-insert
/// statements never reach the store. A new `INSERT INTO` line discards an
/// unterminated statement in progress, as does end of input.
pub fn parse_statements(content: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }

        if starts_insert(line) {
            current.clear();
            current.push_str(line);
        } else if !current.is_empty() {
            current.push(' ');
            current.push_str(line);
        } else {
            continue;
        }

        if line.ends_with(TERMINATOR) {
            let statement = current.strip_suffix(TERMINATOR).unwrap_or(&current);
            statements.push(statement.to_string());
            current.clear();
        }
    }

    statements
}

/// `INSERT`, at least one whitespace character, then `INTO`.
fn starts_insert(line: &str) -> bool {
    let upper = line.to_ascii_uppercase();
    let Some(rest) = upper.strip_prefix("INSERT") else {
        return false;
    };
    let trimmed = rest.trim_start();
    trimmed.len() < rest.len() && trimmed.starts_with("INTO")
}
