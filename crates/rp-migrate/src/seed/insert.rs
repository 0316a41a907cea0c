//! INSERT ... VALUES inspection for the seed idempotency check.

use crate::error::{SeedError, SeedResult};
use sqlparser::ast::{Expr, SetExpr, Statement, UnaryOperator};
use sqlparser::dialect::DuckDbDialect;
use sqlparser::parser::Parser;

/// Parse one seed statement.
pub(crate) fn parse_single(sql: &str) -> SeedResult<Statement> {
    let mut statements =
        Parser::parse_sql(&DuckDbDialect {}, sql).map_err(|e| SeedError::Parse {
            statement: sql.to_string(),
            message: e.to_string(),
        })?;

    if statements.len() != 1 {
        return Err(SeedError::Parse {
            statement: sql.to_string(),
            message: format!("expected one statement, found {}", statements.len()),
        });
    }
    Ok(statements.remove(0))
}

/// Target of an INSERT ... VALUES statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InsertTarget {
    /// Table name as written (quotes preserved)
    pub table: String,
    /// Explicit column list as written, empty when omitted
    pub columns: Vec<String>,
    /// Candidate key of each row: its first value when that is a literal
    pub row_keys: Vec<Option<String>>,
}

/// Inspect `statement`, returning `None` unless it is INSERT ... VALUES.
pub(crate) fn insert_target(statement: &Statement) -> Option<InsertTarget> {
    let Statement::Insert(insert) = statement else {
        return None;
    };
    let rows = values_rows(statement)?;

    Some(InsertTarget {
        table: insert.table.to_string(),
        columns: insert.columns.iter().map(|c| c.to_string()).collect(),
        row_keys: rows
            .iter()
            .map(|row| row.first().and_then(key_literal))
            .collect(),
    })
}

fn values_rows(statement: &Statement) -> Option<&Vec<Vec<Expr>>> {
    let Statement::Insert(insert) = statement else {
        return None;
    };
    match insert.source.as_deref()?.body.as_ref() {
        SetExpr::Values(values) => Some(&values.rows),
        _ => None,
    }
}

fn values_rows_mut(statement: &mut Statement) -> Option<&mut Vec<Vec<Expr>>> {
    let Statement::Insert(insert) = statement else {
        return None;
    };
    match insert.source.as_deref_mut()?.body.as_mut() {
        SetExpr::Values(values) => Some(&mut values.rows),
        _ => None,
    }
}

/// Keep only the rows whose flag in `keep` is true.
///
/// Returns false if `statement` has no VALUES list.
pub(crate) fn retain_rows(statement: &mut Statement, keep: &[bool]) -> bool {
    let Some(rows) = values_rows_mut(statement) else {
        return false;
    };
    let mut flags = keep.iter().copied();
    rows.retain(|_| flags.next().unwrap_or(true));
    true
}

/// SQL text of a literal value usable in an equality check.
///
/// NULL has no key, nor do expressions such as function calls.
fn key_literal(expr: &Expr) -> Option<String> {
    let literal = match expr {
        Expr::Value(_) => expr.to_string(),
        Expr::UnaryOp {
            op: UnaryOperator::Minus,
            expr: inner,
        } if matches!(inner.as_ref(), Expr::Value(_)) => expr.to_string(),
        _ => return None,
    };
    if literal.eq_ignore_ascii_case("NULL") {
        None
    } else {
        Some(literal)
    }
}

#[cfg(test)]
#[path = "insert_test.rs"]
mod tests;
