#![forbid(unsafe_code)]

//! Cell grid that views draw into.
//!
//! A [`Buffer`] is a `width × height` grid of [`Cell`]s. Each cell holds one
//! grapheme; a wide grapheme occupies its cell plus empty continuation cells
//! to its right. Writes outside the grid are clipped.

use crate::style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// One terminal cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Grapheme shown in the cell. Empty for continuation cells.
    pub content: String,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            content: " ".to_string(),
            style: Style::default(),
        }
    }
}

impl Cell {
    /// True for the trailing half of a wide grapheme.
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        self.content.is_empty()
    }
}

/// Grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Blank buffer of the given size.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Cell at `(x, y)`, if inside the grid.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Replace the cell at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Write `text` starting at `(x, y)`, clipped to the row.
    ///
    /// Returns the column just past the last written grapheme. A wide
    /// grapheme that does not fit entirely is not written.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        if y >= self.height {
            return x;
        }
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let width = match u16::try_from(grapheme.width()) {
                Ok(0) => continue,
                Ok(w) => w,
                Err(_) => break,
            };
            if u32::from(col) + u32::from(width) > u32::from(self.width) {
                break;
            }
            self.set(
                col,
                y,
                Cell {
                    content: grapheme.to_string(),
                    style,
                },
            );
            for offset in 1..width {
                self.set(
                    col + offset,
                    y,
                    Cell {
                        content: String::new(),
                        style,
                    },
                );
            }
            col += width;
        }
        col
    }

    /// Text of row `y` with trailing spaces removed.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let mut line = String::new();
        for x in 0..self.width {
            if let Some(cell) = self.get(x, y) {
                line.push_str(&cell.content);
            }
        }
        line.trim_end().to_string()
    }

    /// Every row as text, trailing blank rows dropped.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = (0..self.height).map(|y| self.row_text(y)).collect();
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        lines
    }

    /// Row index of the first line containing `needle`.
    #[must_use]
    pub fn find_row(&self, needle: &str) -> Option<u16> {
        (0..self.height).find(|&y| self.row_text(y).contains(needle))
    }
}

/// Drawing surface handed to [`Model::view`](crate::Model::view).
#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: Buffer,
    /// Where the terminal cursor should be shown, if anywhere.
    pub cursor: Option<(u16, u16)>,
}

impl Frame {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            cursor: None,
        }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// Write `text` at `(x, y)`; see [`Buffer::set_string`].
    pub fn print(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        self.buffer.set_string(x, y, text, style)
    }

    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor = position;
    }
}
