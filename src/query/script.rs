//! Setup script execution.
//!
//! The Data API runs one statement per call, so schema and seed scripts are
//! split on top-level semicolons and applied statement by statement.

use std::io::{self, Write};
use std::path::Path;

use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::tokenizer::{Token, Tokenizer};
use tracing::{info, warn};

use super::executor::{StatementExecutor, StatementResult};
use crate::error::{Result, SetupError};

/// Longest statement preview shown in script progress lines.
const PREVIEW_CHARS: usize = 72;

/// Splits a SQL script into individual statements.
///
/// Semicolons inside string literals, quoted identifiers, comments and
/// dollar-quoted bodies do not split. Each statement keeps its original text
/// (minus surrounding whitespace); fragments holding only comments are dropped.
pub fn split_statements(sql: &str) -> Result<Vec<String>> {
    let dialect = PostgreSqlDialect {};
    let tokens = Tokenizer::new(&dialect, sql)
        .with_unescape(false)
        .tokenize_with_location()
        .map_err(|e| SetupError::script(format!("Failed to tokenize SQL: {e}")))?;

    let index = LineIndex::new(sql);
    let mut statements = Vec::new();
    let mut start = 0;
    let mut has_content = false;

    for token in &tokens {
        match token.token {
            Token::SemiColon => {
                let end = index.offset(token.location.line, token.location.column);
                push_statement(&mut statements, sql.get(start..end), has_content);
                start = end + ';'.len_utf8();
                has_content = false;
            }
            Token::Whitespace(_) | Token::EOF => {}
            _ => has_content = true,
        }
    }
    push_statement(&mut statements, sql.get(start..), has_content);

    Ok(statements)
}

fn push_statement(statements: &mut Vec<String>, text: Option<&str>, has_content: bool) {
    if !has_content {
        return;
    }
    if let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) {
        statements.push(text.to_string());
    }
}

/// Maps the tokenizer's 1-based line/column (in chars) to byte offsets.
struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    fn offset(&self, line: u64, column: u64) -> usize {
        let Some(&line_start) = self.line_starts.get((line as usize).saturating_sub(1)) else {
            return self.text.len();
        };
        self.text[line_start..]
            .char_indices()
            .nth((column as usize).saturating_sub(1))
            .map(|(i, _)| line_start + i)
            .unwrap_or(self.text.len())
    }
}

/// One executed statement and its outcome.
#[derive(Debug, Clone)]
pub struct StatementOutcome {
    pub sql: String,
    pub result: StatementResult,
}

/// Per-statement results of a script run.
#[derive(Debug, Clone, Default)]
pub struct ScriptReport {
    /// Outcomes in execution order.
    pub outcomes: Vec<StatementOutcome>,

    /// Statements not attempted because an earlier one failed.
    pub skipped: usize,
}

impl ScriptReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// True when every statement ran and succeeded.
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.skipped == 0
    }

    /// Renders one status line per executed statement, then a tally.
    ///
    /// Positions count skipped statements too, so a stopped run reads
    /// `[2/5]` rather than `[2/2]`.
    pub fn lines(&self) -> Vec<String> {
        let total = self.outcomes.len() + self.skipped;
        let mut out = Vec::new();
        for (i, outcome) in self.outcomes.iter().enumerate() {
            let position = i + 1;
            let sql = preview(&outcome.sql);
            match &outcome.result {
                StatementResult::Success(_) => out.push(format!("✅ [{position}/{total}] {sql}")),
                StatementResult::Failure(failure) => {
                    out.push(format!("❌ [{position}/{total}] {sql}"));
                    out.push(format!("   Error executing SQL: {failure}"));
                }
            }
        }
        out.push(format!(
            "{} succeeded, {} failed, {} skipped",
            self.succeeded(),
            self.failed(),
            self.skipped
        ));
        out
    }

    /// Writes the rendered report to `writer`.
    pub fn write_to(&self, mut writer: impl Write) -> io::Result<()> {
        for line in self.lines() {
            writeln!(writer, "{line}")?;
        }
        writer.flush()
    }
}

/// First non-comment line of a statement, shortened for progress output.
pub fn preview(sql: &str) -> String {
    let first = sql
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with("--"))
        .unwrap_or("");
    if first.chars().count() > PREVIEW_CHARS {
        let cut: String = first.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        first.to_string()
    }
}

/// Applies SQL scripts through a [`StatementExecutor`], one statement at a time.
pub struct ScriptRunner<'a> {
    executor: &'a StatementExecutor,
    continue_on_error: bool,
}

impl<'a> ScriptRunner<'a> {
    /// Creates a runner that stops at the first failed statement.
    pub fn new(executor: &'a StatementExecutor) -> Self {
        Self {
            executor,
            continue_on_error: false,
        }
    }

    /// Keep executing after a failed statement instead of stopping.
    pub fn continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Reads and runs the script at `path`.
    pub async fn run_file(&self, path: &Path, database: Option<&str>) -> Result<ScriptReport> {
        let script = std::fs::read_to_string(path).map_err(|e| {
            SetupError::script(format!("Failed to read {}: {e}", path.display()))
        })?;
        self.run(&script, database).await
    }

    /// Splits `script` and executes its statements sequentially.
    pub async fn run(&self, script: &str, database: Option<&str>) -> Result<ScriptReport> {
        let statements = split_statements(script)?;
        let total = statements.len();
        info!(statements = total, "Running SQL script");

        let mut report = ScriptReport::default();
        for (i, sql) in statements.into_iter().enumerate() {
            let result = self.executor.execute(&sql, database).await;
            let failed = !result.is_success();
            report.outcomes.push(StatementOutcome { sql, result });

            if failed && !self.continue_on_error {
                report.skipped = total - (i + 1);
                if report.skipped > 0 {
                    warn!(
                        statement = i + 1,
                        skipped = report.skipped,
                        "Stopping script after failed statement"
                    );
                }
                break;
            }
        }

        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            skipped = report.skipped,
            "SQL script finished"
        );
        Ok(report)
    }
}
