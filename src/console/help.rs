//! Help table.
//!
//! Renders the outcome table as a bordered grid. Rows are the user's move,
//! columns the PC's move, cells the result for the user.

use crate::core::moves::MoveSet;
use crate::game::table::OutcomeTable;

/// Corner cell of the grid.
pub const CORNER: &str = "v User\\PC >";

/// Render the help table for a move set.
pub fn render_help_table(moves: &MoveSet, table: &OutcomeTable) -> String {
    let mut header: Vec<&str> = Vec::with_capacity(moves.len() + 1);
    header.push(CORNER);
    header.extend(moves.iter());

    let rows: Vec<Vec<&str>> = moves
        .iter()
        .zip(table.rows())
        .map(|(label, outcomes)| {
            std::iter::once(label)
                .chain(outcomes.iter().map(|o| o.as_str()))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(rows.iter())
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let divider = divider_line(&widths);
    let mut out = String::new();
    out.push_str(&divider);
    push_row(&mut out, &header, &widths);
    out.push_str(&divider);
    for row in &rows {
        push_row(&mut out, row, &widths);
        out.push_str(&divider);
    }
    out
}

fn divider_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn push_row(out: &mut String, cells: &[&str], widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        out.push_str(&format!(" {:<width$} |", cell, width = width));
    }
    out.push('\n');
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rps_help_table() {
        let moves = MoveSet::new(["Rock", "Paper", "Scissors"]).unwrap();
        let table = OutcomeTable::build(&moves);

        let expected = "\
+-------------+------+-------+----------+
| v User\\PC > | Rock | Paper | Scissors |
+-------------+------+-------+----------+
| Rock        | Draw | Win   | Lose     |
+-------------+------+-------+----------+
| Paper       | Lose | Draw  | Win      |
+-------------+------+-------+----------+
| Scissors    | Win  | Lose  | Draw     |
+-------------+------+-------+----------+
";
        assert_eq!(render_help_table(&moves, &table), expected);
    }

    #[test]
    fn test_wide_labels_set_column_width() {
        let moves = MoveSet::new(["a", "Lightning", "c"]).unwrap();
        let table = OutcomeTable::build(&moves);
        let rendered = render_help_table(&moves, &table);

        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
        assert_eq!(lines.len(), 2 + 2 * moves.len() + 1);
    }
}
