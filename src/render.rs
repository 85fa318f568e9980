use crate::core::db::students::Student;
use crate::core::Result;

/// Render Module for pgroster
///
/// Formats student rows for terminal output. The default format is one
/// aligned line per row; a JSON export format is available for piping into
/// other tools.

/// Output formats supported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Renders students in the requested format.
pub fn render(students: &[Student], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table(students)),
        OutputFormat::Json => json(students),
    }
}

/// Renders one line per row:
///
/// ```text
/// [  1] Ada Lovelace | ada@example.com | 2024-09-01
/// ```
///
/// An empty result set renders a single placeholder line.
pub fn table(students: &[Student]) -> String {
    if students.is_empty() {
        return "(no rows)".to_string();
    }
    students
        .iter()
        .map(row_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn row_line(student: &Student) -> String {
    let date = student
        .enrollment_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "None".to_string());
    format!(
        "[{:>3}] {} {} | {} | {}",
        student.student_id, student.first_name, student.last_name, student.email, date
    )
}

/// Serializes the rows as pretty-printed JSON.
pub fn json(students: &[Student]) -> Result<String> {
    Ok(serde_json::to_string_pretty(students)?)
}
