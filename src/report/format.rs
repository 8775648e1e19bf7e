//! Terminal formatting for computed tables.
//!
//! Each level / row is printed as a bracketed list on its own line. A flat
//! (central difference) table prints one value per line.

use crate::domain::{Cell, Table};
use crate::io::export::format_cell;

/// Format the full "Output:" block.
pub fn format_table(table: &Table) -> String {
    let mut out = String::from("Output:\n");

    match table {
        Table::Flat(values) => {
            for v in values {
                out.push_str(&format_cell(Some(&Cell::Float(*v)), None));
                out.push('\n');
            }
        }
        Table::Levels(_) | Table::Triangle(_) => {
            for row in table.rows() {
                out.push_str(&format_row(&row));
                out.push('\n');
            }
        }
    }

    out
}

/// Format one row as `[a, b, c]`.
pub fn format_row(row: &[Cell]) -> String {
    let items: Vec<String> = row.iter().map(|c| format_cell(Some(c), None)).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_print_as_lists() {
        let table = Table::Levels(vec![vec![0.0, 1.0, 4.0], vec![1.0, 3.0], vec![2.0]]);
        assert_eq!(
            format_table(&table),
            "Output:\n[0.0, 1.0, 4.0]\n[1.0, 3.0]\n[2.0]\n"
        );
    }

    #[test]
    fn triangle_prints_integers() {
        let table = Table::Triangle(vec![vec![1], vec![1, 1], vec![1, 2, 1]]);
        assert_eq!(format_table(&table), "Output:\n[1]\n[1, 1]\n[1, 2, 1]\n");
    }

    #[test]
    fn flat_prints_one_value_per_line() {
        let table = Table::Flat(vec![1.5, 2.5]);
        assert_eq!(format_table(&table), "Output:\n1.5\n2.5\n");
    }

    #[test]
    fn empty_level_prints_empty_brackets() {
        assert_eq!(format_row(&[]), "[]");
    }
}
