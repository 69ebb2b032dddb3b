use crate::report::ReportRow;

pub const REPORT_TABLE_WIDTH: usize = 114;
pub const TASK_TABLE_WIDTH: usize = 100;

const DATE_CELL: usize = 10;
const TIME_CELL: usize = 8;
const MIN_ENTRY_CELL: usize = 10;

// Three columns cost 10 characters of borders and padding:
// `| x | y | z |`. The entry column absorbs whatever the budget leaves.
fn entry_cell(total_width: usize) -> usize {
    let cell = total_width.saturating_sub(DATE_CELL + TIME_CELL + 10);
    if cell < MIN_ENTRY_CELL { MIN_ENTRY_CELL } else { cell }
}

/// Splits a label into non-overlapping chunks of the column's interior width,
/// one table row per chunk. Always yields at least one row.
fn chunk_label(label: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    if chars.is_empty() || width == 0 {
        return vec![String::new()];
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn full_separator(entry_width: usize) -> String {
    format!(
        "+{}+{}+{}+",
        "-".repeat(DATE_CELL + 2),
        "-".repeat(entry_width + 2),
        "-".repeat(TIME_CELL + 2)
    )
}

// Entry/time columns redrawn, date column left open: marks a new entry
// within the same day.
fn light_separator(entry_width: usize) -> String {
    format!(
        "| {} +{}+{}+",
        " ".repeat(DATE_CELL),
        "-".repeat(entry_width + 2),
        "-".repeat(TIME_CELL + 2)
    )
}

fn report_row(date: &str, entry: &str, time: &str, entry_width: usize) -> String {
    format!(
        "| {date:<DATE_CELL$} | {entry:<entry_width$} | {time:<TIME_CELL$} |"
    )
}

/// Renders the date-grouped report table. A full separator marks a date
/// change, a light separator divides entries sharing a date, and a task name
/// wider than its column wraps onto continuation rows with the date and
/// duration left blank.
pub fn render_report(rows: &[ReportRow]) -> String {
    let entry_width = entry_cell(REPORT_TABLE_WIDTH);
    let separator = full_separator(entry_width);

    let mut lines = vec![
        separator.clone(),
        report_row("Date", "Entry", "Time", entry_width),
    ];

    let mut current_date = None;
    for row in rows {
        let date_text = if current_date != Some(row.date) {
            lines.push(separator.clone());
            current_date = Some(row.date);
            row.date.format("%d.%m.%Y").to_string()
        } else {
            lines.push(light_separator(entry_width));
            String::new()
        };

        for (index, chunk) in chunk_label(&row.task_name, entry_width).iter().enumerate() {
            let (date_col, time_col) = if index == 0 {
                (date_text.as_str(), row.duration.to_string())
            } else {
                ("", String::new())
            };
            lines.push(report_row(date_col, chunk, &time_col, entry_width));
        }
    }

    lines.push(separator);
    lines.join("\n") + "\n"
}

/// Renders project tasks as a single full-width column, wrapping overlong
/// names with the same chunking rule as the report table.
pub fn render_task_list(names: &[String]) -> String {
    let cell = TASK_TABLE_WIDTH - 4;
    let separator = format!("+{}+", "-".repeat(TASK_TABLE_WIDTH - 2));

    let mut lines = vec![
        separator.clone(),
        format!("| {:<cell$} |", "Available tasks on project"),
        separator.clone(),
    ];

    for name in names {
        for chunk in chunk_label(name, cell) {
            lines.push(format!("| {chunk:<cell$} |"));
        }
        lines.push(format!("| {:<cell$} |", ""));
        lines.push(separator.clone());
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Hms;
    use chrono::NaiveDate;

    fn row(date: (i32, u32, u32), name: &str, duration: Hms) -> ReportRow {
        ReportRow {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            task_name: name.to_string(),
            duration,
        }
    }

    fn hms(hours: u32, minutes: u32, seconds: u32) -> Hms {
        Hms {
            hours,
            minutes,
            seconds,
        }
    }

    #[test]
    fn entry_cell_absorbs_remaining_budget() {
        assert_eq!(entry_cell(114), 86);
        assert_eq!(114, DATE_CELL + entry_cell(114) + TIME_CELL + 10);
    }

    #[test]
    fn entry_cell_is_clamped_to_minimum() {
        assert_eq!(entry_cell(30), MIN_ENTRY_CELL);
        assert_eq!(entry_cell(0), MIN_ENTRY_CELL);
    }

    #[test]
    fn chunk_label_emits_ceil_of_length_over_width() {
        assert_eq!(chunk_label("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(chunk_label("abcdefgh", 4), vec!["abcd", "efgh"]);
        assert_eq!(chunk_label("abc", 4), vec!["abc"]);
        assert_eq!(chunk_label("", 4), vec![""]);

        let label = "x".repeat(87);
        assert_eq!(chunk_label(&label, 86).len(), 2);
    }

    #[test]
    fn chunk_label_counts_chars_not_bytes() {
        assert_eq!(chunk_label("héllo wörld", 6), vec!["héllo ", "wörld"]);
    }

    #[test]
    fn all_report_lines_share_the_table_width() {
        let rows = vec![
            row((2024, 3, 1), &"n".repeat(200), hms(1, 30, 0)),
            row((2024, 3, 2), "short", hms(0, 5, 0)),
        ];
        let rendered = render_report(&rows);
        for line in rendered.lines() {
            assert_eq!(line.chars().count(), REPORT_TABLE_WIDTH, "line: {line}");
        }
    }

    #[test]
    fn separators_follow_date_changes() {
        let rows = vec![
            row((2024, 1, 1), "a", hms(1, 0, 0)),
            row((2024, 1, 1), "b", hms(2, 0, 0)),
            row((2024, 1, 2), "c", hms(3, 0, 0)),
        ];
        let rendered = render_report(&rows);
        let lines: Vec<&str> = rendered.lines().collect();
        let full = full_separator(entry_cell(REPORT_TABLE_WIDTH));

        // Header block, then a full separator before the first entry.
        assert_eq!(lines[0], full);
        assert_eq!(lines[2], full);
        assert!(lines[3].contains("01.01.2024"));
        // Light separator between the two same-day entries.
        assert!(lines[4].starts_with("| "));
        assert!(lines[4].contains("+-"));
        assert!(lines[5].contains(" b "));
        assert!(!lines[5].contains("01.01.2024"));
        // Full separator again when the date flips.
        assert_eq!(lines[6], full);
        assert!(lines[7].contains("02.01.2024"));
        assert_eq!(lines[8], full);

        for line in lines {
            assert_eq!(line.chars().count(), REPORT_TABLE_WIDTH);
        }
    }

    #[test]
    fn continuation_rows_blank_date_and_duration() {
        let rows = vec![row((2024, 3, 1), &"t".repeat(90), hms(1, 30, 0))];
        let rendered = render_report(&rows);
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[3].contains("01.03.2024"));
        assert!(lines[3].contains("1:30:00"));
        assert!(!lines[4].contains("01.03.2024"));
        assert!(!lines[4].contains("1:30:00"));
        assert!(lines[4].contains("tttt"));
    }

    #[test]
    fn renders_unwrapped_entry_end_to_end() {
        let rows = vec![row((2024, 3, 1), "Write report", hms(1, 30, 0))];
        let rendered = render_report(&rows);
        let entry_width = entry_cell(REPORT_TABLE_WIDTH);
        let expected = report_row("01.03.2024", "Write report", "1:30:00", entry_width);
        assert!(rendered.lines().any(|line| line == expected));
    }

    #[test]
    fn task_list_wraps_and_separates() {
        let names = vec!["short".to_string(), "y".repeat(100)];
        let rendered = render_task_list(&names);
        let lines: Vec<&str> = rendered.lines().collect();
        let separator = format!("+{}+", "-".repeat(TASK_TABLE_WIDTH - 2));

        assert_eq!(lines[0], separator);
        assert!(lines[1].contains("Available tasks on project"));
        assert_eq!(lines[2], separator);
        assert!(lines[3].contains("short"));
        // Blank row then separator closes each task.
        assert_eq!(lines[4], format!("| {:<width$} |", "", width = TASK_TABLE_WIDTH - 4));
        assert_eq!(lines[5], separator);
        // 100 chars over a 96-wide cell wraps onto two rows.
        assert!(lines[6].starts_with("| yyy"));
        assert!(lines[7].starts_with("| yyyy"));
        for line in lines {
            assert_eq!(line.chars().count(), TASK_TABLE_WIDTH);
        }
    }
}
