//! Markdown report file

use eyre::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Render one query result as a `##` section holding a Markdown table
///
/// Cells are written verbatim with `None` shown as `NULL`. Each separator
/// cell is two dashes wider than its column name.
///
/// # Example
/// ```
/// use titanic_etl::report::render_section;
///
/// let rows = vec![vec![Some("1".to_string()), None]];
/// let section = render_section("Ages", &["Pclass", "AverageAge"], &rows);
/// assert_eq!(
///     section,
///     "## Ages\n\n| Pclass | AverageAge |\n|--------|------------|\n| 1 | NULL |\n\n"
/// );
/// ```
pub fn render_section(name: &str, columns: &[&str], rows: &[Vec<Option<String>>]) -> String {
    let mut out = format!("## {}\n\n", name);

    out.push_str(&format!("| {} |\n", columns.join(" | ")));

    let separator: Vec<String> = columns.iter().map(|c| "-".repeat(c.len() + 2)).collect();
    out.push_str(&format!("|{}|\n", separator.join("|")));

    for row in rows {
        let cells: Vec<&str> = row
            .iter()
            .map(|cell| cell.as_deref().unwrap_or("NULL"))
            .collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }

    out.push('\n');
    out
}

/// The report file, rebuilt section by section on every run
pub struct MarkdownReport {
    path: PathBuf,
}

impl MarkdownReport {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the previous report. Returns whether one existed.
    pub fn reset(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove old report: {}", self.path.display()))?;
        log::debug!("Removed previous report {}", self.path.display());
        Ok(true)
    }

    /// Append a rendered section, creating the file on first write
    pub fn append_section(
        &self,
        name: &str,
        columns: &[&str],
        rows: &[Vec<Option<String>>],
    ) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open report: {}", self.path.display()))?;

        file.write_all(render_section(name, columns, rows).as_bytes())
            .with_context(|| format!("Failed to write report: {}", self.path.display()))?;

        Ok(())
    }
}
