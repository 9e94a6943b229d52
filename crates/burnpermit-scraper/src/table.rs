//! Grid extraction for HTML `<table>` elements.
//!
//! Every table in the document becomes an [`HtmlTable`] of header names plus
//! data rows. Callers pick the table they want by header membership rather
//! than by position, so layout tables and reordered sections on the page do
//! not matter.

use std::collections::VecDeque;

use scraper::{ElementRef, Html, Selector};

/// Upper bounds from the HTML spec; anything larger is clamped.
const MAX_COLSPAN: usize = 1_000;
const MAX_ROWSPAN: usize = 65_534;

/// A table reduced to its header names and whitespace-normalized cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl HtmlTable {
    /// Index of the first header named exactly `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// First row whose cell at `column` equals `key` (case-sensitive).
    #[must_use]
    pub fn find_row(&self, column: usize, key: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|row| row.get(column).is_some_and(|cell| cell == key))
            .map(Vec::as_slice)
    }
}

/// Parses `html` and returns every table in document order.
///
/// Nested tables are returned as separate entries; their rows are not folded
/// into the enclosing table.
#[must_use]
pub fn parse_tables(html: &str) -> Vec<HtmlTable> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("table").expect("valid table selector");
    document.select(&selector).map(extract_table).collect()
}

struct RawCell {
    text: String,
    colspan: usize,
    rowspan: usize,
}

struct RawRow {
    cells: Vec<RawCell>,
    all_header_cells: bool,
}

/// A cell spilling into later rows through `rowspan`.
struct Carry {
    column: usize,
    text: String,
    remaining: usize,
}

fn extract_table(table: ElementRef<'_>) -> HtmlTable {
    let mut head = Vec::new();
    let mut body = Vec::new();
    let mut foot = Vec::new();

    for section in table.children().filter_map(ElementRef::wrap) {
        match section.value().name() {
            "thead" => head.extend(child_rows(section)),
            "tbody" => body.extend(child_rows(section)),
            "tfoot" => foot.extend(child_rows(section)),
            "tr" => body.push(read_row(section)),
            _ => {}
        }
    }

    let head: Vec<RawRow> = head.into_iter().filter(|row| !row.cells.is_empty()).collect();
    let rest: Vec<RawRow> = body
        .into_iter()
        .chain(foot)
        .filter(|row| !row.cells.is_empty())
        .collect();

    // With a <thead>, all of its rows are header rows. Without one, the
    // leading run of rows made only of <th> cells is.
    let header_count = if head.is_empty() {
        rest.iter().take_while(|row| row.all_header_cells).count()
    } else {
        head.len()
    };

    let cell_rows: Vec<Vec<RawCell>> = head.into_iter().chain(rest).map(|row| row.cells).collect();
    let mut grid = expand_spans(cell_rows);
    let data = grid.split_off(header_count.min(grid.len()));

    let headers = grid.pop().unwrap_or_default();
    let width = headers.len();
    let rows = data
        .into_iter()
        .map(|mut row| {
            if row.len() < width {
                row.resize(width, String::new());
            }
            row
        })
        .collect();

    HtmlTable { headers, rows }
}

fn child_rows(section: ElementRef<'_>) -> impl Iterator<Item = RawRow> + '_ {
    section
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr")
        .map(read_row)
}

fn read_row(tr: ElementRef<'_>) -> RawRow {
    let mut cells = Vec::new();
    let mut all_header_cells = true;

    for cell in tr.children().filter_map(ElementRef::wrap) {
        let name = cell.value().name();
        if name != "td" && name != "th" {
            continue;
        }
        all_header_cells &= name == "th";
        cells.push(RawCell {
            text: cell_text(cell),
            colspan: span_attr(cell, "colspan", MAX_COLSPAN),
            rowspan: span_attr(cell, "rowspan", MAX_ROWSPAN),
        });
    }

    RawRow {
        all_header_cells: all_header_cells && !cells.is_empty(),
        cells,
    }
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn span_attr(cell: ElementRef<'_>, attr: &str, max: usize) -> usize {
    cell.value()
        .attr(attr)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .map_or(1, |n| n.min(max))
}

/// Lays cells out on a grid, repeating `colspan` cells across columns and
/// carrying `rowspan` cells down into the rows below.
fn expand_spans(rows: Vec<Vec<RawCell>>) -> Vec<Vec<String>> {
    let mut grid = Vec::with_capacity(rows.len());
    let mut carried: Vec<Carry> = Vec::new();

    for row in rows {
        let mut pending: VecDeque<Carry> = carried.drain(..).collect();
        let mut out: Vec<String> = Vec::new();

        for cell in row {
            for _ in 0..cell.colspan {
                fill_carried(&mut out, &mut pending, &mut carried);
                if cell.rowspan > 1 {
                    carried.push(Carry {
                        column: out.len(),
                        text: cell.text.clone(),
                        remaining: cell.rowspan - 1,
                    });
                }
                out.push(cell.text.clone());
            }
        }

        // Spans that reach past the last explicit cell of this row.
        while let Some(carry) = pending.pop_front() {
            place_carry(&mut out, carry, &mut carried);
        }

        carried.sort_by_key(|c| c.column);
        grid.push(out);
    }

    grid
}

fn fill_carried(out: &mut Vec<String>, pending: &mut VecDeque<Carry>, next: &mut Vec<Carry>) {
    while pending.front().is_some_and(|c| c.column <= out.len()) {
        if let Some(carry) = pending.pop_front() {
            place_carry(out, carry, next);
        }
    }
}

fn place_carry(out: &mut Vec<String>, carry: Carry, next: &mut Vec<Carry>) {
    let column = out.len();
    out.push(carry.text.clone());
    if carry.remaining > 1 {
        next.push(Carry {
            column,
            text: carry.text,
            remaining: carry.remaining - 1,
        });
    }
}
