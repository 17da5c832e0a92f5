//! Character-grid preview of a marker session.
//!
//! Maps the pixel viewport onto a terminal grid (one cell per 8x16 px) and
//! draws each binding's label at its marker position, followed by a
//! display-width-truncated slice of the element's text. Purely diagnostic:
//! the real marker appearance belongs to the host stylesheet.

use anyhow::Result;
use unicode_width::UnicodeWidthChar;

use keynav_core::controller::Controller;
use keynav_core::dom::Document;
use keynav_core::keys::KEY_TABLE;

const CELL_WIDTH_PX: f64 = 8.0;
const CELL_HEIGHT_PX: f64 = 16.0;

/// Grid caps so a huge fixture viewport cannot allocate an absurd preview.
const MAX_COLS: usize = 200;
const MAX_ROWS: usize = 80;

/// Column budget for the text drawn after each label.
const LABEL_TEXT_COLS: usize = 18;

/// Render the armed session over `doc` as a framed character grid.
pub fn preview(doc: &Document, controller: &Controller) -> Result<String> {
    let viewport = doc.viewport();
    let cols = ((viewport.width / CELL_WIDTH_PX).ceil() as usize).clamp(1, MAX_COLS);
    let rows = ((viewport.height / CELL_HEIGHT_PX).ceil() as usize).clamp(1, MAX_ROWS);

    let mut grid = vec![vec![' '; cols]; rows];

    // Key-table order: on collisions, later (higher) labels overwrite.
    for key in KEY_TABLE {
        let Some(&element) = controller.bindings().get(key.code) else {
            continue;
        };
        let node = doc.node(element)?;
        let rect = node.rect().clamped_to_origin();
        let row = ((rect.top() / CELL_HEIGHT_PX) as usize).min(rows - 1);
        let col = ((rect.left() / CELL_WIDTH_PX) as usize).min(cols - 1);

        let text = node
            .text()
            .filter(|t| !t.is_empty())
            .or_else(|| node.attr("href"))
            .unwrap_or_else(|| node.tag());
        let line = format!("[{}] {}", key.label, truncate_to_width(text, LABEL_TEXT_COLS));
        write_into(&mut grid[row], col, &line);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "viewport {}x{} (1 cell = {}x{} px)\n",
        viewport.width, viewport.height, CELL_WIDTH_PX, CELL_HEIGHT_PX
    ));
    out.push('+');
    out.push_str(&"-".repeat(cols));
    out.push_str("+\n");
    for row in &grid {
        out.push('|');
        out.extend(row.iter());
        out.push_str("|\n");
    }
    out.push('+');
    out.push_str(&"-".repeat(cols));
    out.push_str("+\n");
    Ok(out)
}

/// Write a string into a grid row starting at `col`, clipping at the edge.
///
/// Wide characters occupy their display width; the cells a wide character
/// spills into are left as spaces.
fn write_into(row: &mut [char], col: usize, text: &str) {
    let mut cursor = col;
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if width == 0 {
            continue;
        }
        if cursor + width > row.len() {
            break;
        }
        row[cursor] = ch;
        for cell in row.iter_mut().take(cursor + width).skip(cursor + 1) {
            *cell = ' ';
        }
        cursor += width;
    }
}

/// Truncate to at most `max_cols` display columns, appending `…` when cut.
fn truncate_to_width(text: &str, max_cols: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > max_cols.saturating_sub(1) {
            // Reserve one column for the ellipsis unless the rest fits.
            let rest_width: usize = text[out.len() + ch.len_utf8()..]
                .chars()
                .map(|c| c.width().unwrap_or(0))
                .sum();
            if used + width + rest_width <= max_cols {
                out.push(ch);
                used += width;
                continue;
            }
            out.push('…');
            return out;
        }
        out.push(ch);
        used += width;
    }
    out
}
