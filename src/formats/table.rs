use crate::test_result::LineComparison;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 4] = ["No.", "Program output", "Ref file", "Match"];
const MISSING_LINE: &str = "<missing>";
const HEADER_PADDING: usize = 2;
const COLUMN_GAP: &str = "  ";
const TAB: &str = "    ";

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

const ALIGNMENT: [Align; 4] = [Align::Right, Align::Left, Align::Left, Align::Left];

/// Draw the line-by-line comparison as a plain text table
///
/// ```text
///   No.  Program output    Ref file    Match
/// -----  ----------------  ----------  -------
///     0  1                 1           True
/// ```
pub fn draw_table(rows: &[LineComparison]) -> String {
    let cells: Vec<[String; 4]> = rows.iter().map(row_cells).collect();

    let mut widths = HEADERS.map(|header| header.width() + HEADER_PADDING);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut output = String::new();

    output.push_str(&draw_row(&HEADERS.map(String::from), &widths));
    output.push_str(&draw_row(&widths.map(|width| "-".repeat(width)), &widths));
    for row in &cells {
        output.push_str(&draw_row(row, &widths));
    }

    output
}

fn row_cells(row: &LineComparison) -> [String; 4] {
    [
        row.index.to_string(),
        show_line(&row.actual),
        show_line(&row.expected),
        String::from(if row.matches { "True" } else { "False" }),
    ]
}

/// Tabs have no display width of their own, so they would shift the columns
fn show_line(line: &Option<String>) -> String {
    match line {
        Some(line) => line.replace('\t', TAB),
        None => String::from(MISSING_LINE),
    }
}

fn draw_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(ALIGNMENT)
        .map(|((cell, width), align)| pad(cell, *width, align))
        .collect();

    format!("{}\n", padded.join(COLUMN_GAP).trim_end())
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));

    match align {
        Align::Left => format!("{}{}", cell, fill),
        Align::Right => format!("{}{}", fill, cell),
    }
}

// TESTS
