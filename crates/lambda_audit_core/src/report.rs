//! Sorting, terminal tables and JSON export for scan results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::model::{ReportRow, RoleInventoryRow};

pub const FUNCTION_TABLE_HEADERS: [&str; 4] = ["Region", "Function", "Role Name", "Policies"];
pub const ROLE_TABLE_HEADERS: [&str; 3] = ["Role Name", "Attached Policies", "Inline Policies"];

const EMPTY_CELL: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    #[default]
    Region,
    #[value(alias = "function")]
    FunctionName,
    #[value(alias = "role")]
    RoleName,
}

impl SortKey {
    pub fn key<'a>(&self, row: &'a ReportRow) -> &'a str {
        match self {
            Self::Region => &row.region,
            Self::FunctionName => &row.function_name,
            Self::RoleName => &row.role_name,
        }
    }
}

/// Stable ascending sort; rows with equal keys keep their scan order.
pub fn sort_rows(rows: &mut [ReportRow], sort_key: SortKey) {
    rows.sort_by(|left, right| sort_key.key(left).cmp(sort_key.key(right)));
}

pub fn render_table(rows: &[ReportRow]) -> String {
    let body = rows
        .iter()
        .map(|row| {
            vec![
                row.region.clone(),
                row.function_name.clone(),
                row.role_name.clone(),
                policies_cell(row),
            ]
        })
        .collect::<Vec<_>>();
    render_grid(&FUNCTION_TABLE_HEADERS, &body)
}

pub fn render_role_table(rows: &[RoleInventoryRow]) -> String {
    let body = rows
        .iter()
        .map(|row| {
            vec![
                row.role_name.clone(),
                lines_or_empty(row.attached_policies.iter().map(|p| p.policy_name.as_str())),
                lines_or_empty(row.inline_policies.iter().map(String::as_str)),
            ]
        })
        .collect::<Vec<_>>();
    render_grid(&ROLE_TABLE_HEADERS, &body)
}

fn policies_cell(row: &ReportRow) -> String {
    let labels = row
        .policies
        .iter()
        .map(|policy| format!("{} ({})", policy.policy_name, policy.kind_label()))
        .collect::<Vec<_>>();
    lines_or_empty(labels.iter().map(String::as_str))
}

fn lines_or_empty<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let joined = lines.collect::<Vec<_>>().join("\n");
    if joined.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        joined
    }
}

/// ASCII grid in the `+----+` style; cells may span several lines.
pub fn render_grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (column, cell) in row.iter().enumerate().take(widths.len()) {
            let widest = cell.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            widths[column] = widths[column].max(widest);
        }
    }

    let border = {
        let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+\n", segments.join("+"))
    };

    let mut out = String::new();
    out.push_str(&border);
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header_cells, &widths);
    out.push_str(&border);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    if !rows.is_empty() {
        out.push_str(&border);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let split: Vec<Vec<&str>> = widths
        .iter()
        .enumerate()
        .map(|(column, _)| {
            cells
                .get(column)
                .map(|cell| cell.lines().collect())
                .unwrap_or_default()
        })
        .collect();
    let height = split.iter().map(Vec::len).max().unwrap_or(0).max(1);

    for line in 0..height {
        out.push('|');
        for (column, width) in widths.iter().enumerate() {
            let text = split[column].get(line).copied().unwrap_or("");
            let padding = width - text.chars().count();
            out.push(' ');
            out.push_str(text);
            out.push_str(&" ".repeat(padding + 1));
            out.push('|');
        }
        out.push('\n');
    }
}

pub fn export_to_json(
    rows: &[ReportRow],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    write_pretty_json(rows, path)
}

pub fn export_roles_to_json(
    rows: &[RoleInventoryRow],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    write_pretty_json(rows, path)
}

fn write_pretty_json<T: Serialize + ?Sized>(
    value: &T,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = BufWriter::new(File::create(path)?);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
