use std::fmt::Write;

use crate::record::Employee;

const WIDTHS: [usize; 6] = [8, 10, 16, 16, 6, 16];
const HEADERS: [&str; 6] = [
    "emp_no",
    "birth_date",
    "first_name",
    "last_name",
    "gender",
    "hire_date",
];

fn line(cells: &[String]) -> String {
    let mut out = String::from("|");
    for (cell, width) in cells.iter().zip(WIDTHS) {
        let _ = write!(out, "{cell:>width$}|");
    }
    out
}

fn separator() -> String {
    let mut out = String::from("|");
    for width in WIDTHS {
        out.push_str(&"-".repeat(width));
        out.push('|');
    }
    out
}

fn employee_cells(e: &Employee) -> Vec<String> {
    vec![
        e.emp_no.to_string(),
        e.birth_date.to_string(),
        e.first_name.clone(),
        e.last_name.clone(),
        e.gender.clone(),
        e.hire_date.to_string(),
    ]
}

/// Fixed-width table: header, separator, one line per employee.
pub(crate) fn render(employees: &[Employee]) -> String {
    let headers: Vec<String> = HEADERS.iter().map(|h| (*h).to_string()).collect();
    let mut lines = vec![line(&headers), separator()];
    lines.extend(employees.iter().map(|e| line(&employee_cells(e))));
    lines.join("\n")
}
