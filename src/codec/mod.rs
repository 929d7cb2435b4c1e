//! CSV text codec
//!
//! Reading is deliberately lenient so hand-edited reference files load:
//! quotes only protect commas, one surrounding quote pair is stripped from
//! each cell, and doubled quotes are left as they are. Writing is strict:
//! every value is quoted and inner quotes are doubled, so free-text fields
//! containing commas or quotes survive export.

use crate::core::Ticket;
use crate::error::{DeskError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::collections::HashSet;

/// Split text into lines on `\n` or `\r\n` after trimming the whole input
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.trim()
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Split one line on commas that are outside double quotes
///
/// A comma is a separator when an even number of `"` follow it on the line.
fn split_cells(line: &str) -> Vec<&str> {
    let mut quotes_after = line.bytes().filter(|&b| b == b'"').count();
    let mut cells = Vec::new();
    let mut start = 0;
    for (i, byte) in line.bytes().enumerate() {
        match byte {
            b'"' => quotes_after -= 1,
            b',' if quotes_after % 2 == 0 => {
                cells.push(&line[start..i]);
                start = i + 1;
            },
            _ => {},
        }
    }
    cells.push(&line[start..]);
    cells
}

/// Strip one leading and one trailing double quote, if present
fn unquote(cell: &str) -> String {
    let cell = cell.strip_prefix('"').unwrap_or(cell);
    cell.strip_suffix('"').unwrap_or(cell).to_string()
}

/// Parse CSV text into field-keyed records
///
/// The first line names the fields. Lines shorter than the header get empty
/// strings for the missing trailing fields; extra cells are dropped. Empty
/// or header-only input yields no records.
pub fn parse<R>(text: &str) -> Vec<R>
where
    R: FromIterator<(String, String)>,
{
    let mut lines = split_lines(text);
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let header: Vec<String> = split_cells(header_line).into_iter().map(unquote).collect();

    lines
        .map(|line| {
            let cells = split_cells(line);
            header
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let value = cells.get(i).map(|cell| unquote(cell)).unwrap_or_default();
                    (name.clone(), value)
                })
                .collect()
        })
        .collect()
}

/// Parse CSV text positionally, ignoring quoting
///
/// The header line is dropped; every other line is split on each comma and
/// every cell is trimmed.
pub fn parse_positional(text: &str) -> Vec<Vec<String>> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    split_lines(text)
        .skip(1)
        .map(|line| line.split(',').map(|cell| cell.trim().to_string()).collect())
        .collect()
}

/// Field names across all tickets, in first-seen order
pub fn field_union(tickets: &[Ticket]) -> Vec<&str> {
    let mut seen = HashSet::new();
    tickets
        .iter()
        .flat_map(Ticket::keys)
        .filter(|key| seen.insert(*key))
        .collect()
}

/// Serialize tickets to CSV text for export
///
/// The header is the union of field names, unquoted. Each value is wrapped
/// in double quotes with inner quotes doubled; missing fields are empty.
/// Lines are joined with `\n` and there is no trailing newline.
pub fn serialize(tickets: &[Ticket]) -> Result<String> {
    let fields = field_union(tickets);
    if fields.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);

    for ticket in tickets {
        writer
            .write_record(fields.iter().map(|name| ticket.get_or_empty(name)))
            .map_err(|e| {
                DeskError::SerializationError(format!("Failed to write CSV record: {e}"))
            })?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| DeskError::SerializationError(format!("Failed to flush CSV: {e}")))?;
    let body = String::from_utf8(body)
        .map_err(|e| DeskError::SerializationError(format!("Invalid UTF-8 in CSV: {e}")))?;

    let mut output = fields.join(",");
    if !body.is_empty() {
        output.push('\n');
        output.push_str(body.trim_end_matches('\n'));
    }
    Ok(output)
}
