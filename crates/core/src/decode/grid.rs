use serde::{Serialize, Serializer};

use super::record::PositionRecord;

/// Dense, row-major character grid sized to the largest coordinates seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Grid {
    /// A `0 × 0` grid.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        }
    }

    /// Build a grid from explicit rows. Shorter rows are padded with `blank`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], blank: char) -> Self {
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        if width == 0 {
            return Self::empty();
        }
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            let before = cells.len();
            cells.extend(row.as_ref().chars());
            cells.resize(before + width, blank);
        }
        Self {
            width,
            height: rows.len(),
            cells,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Character at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// Characters in reading order: top to bottom, left to right.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.cells.iter().copied()
    }

    /// Each row rendered as a string, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        // chunks() panics on 0; an empty grid has no cells to chunk anyway.
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect())
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&row)?;
        }
        Ok(())
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

/// Build a grid from position records, filling uncovered cells with a space.
pub fn build_grid(records: &[PositionRecord]) -> Grid {
    build_grid_with_blank(records, ' ')
}

/// Build a grid from position records, filling uncovered cells with `blank`.
///
/// When several records target one cell, the last one in input order wins.
///
/// # Panics
///
/// Panics like [`vec!`] when the grid the records span does not fit in
/// memory; see [`grid_extent`] and [`fits_in_memory`] to check first.
pub fn build_grid_with_blank(records: &[PositionRecord], blank: char) -> Grid {
    build_grid_tracking(records, blank).0
}

/// Build a grid and report the indices of records that overwrote an
/// earlier record's cell.
pub(crate) fn build_grid_tracking(records: &[PositionRecord], blank: char) -> (Grid, Vec<usize>) {
    // Size only once every record is known.
    let Some((width, height)) = grid_extent(records) else {
        return (Grid::empty(), Vec::new());
    };

    let mut cells = vec![blank; width * height];
    let mut filled = vec![false; width * height];
    let mut overwrites = Vec::new();

    for (i, rec) in records.iter().enumerate() {
        let (x, y) = (rec.x as usize, rec.y as usize);
        if x >= width || y >= height {
            continue;
        }
        let idx = y * width + x;
        if filled[idx] {
            overwrites.push(i);
        }
        cells[idx] = rec.glyph;
        filled[idx] = true;
    }

    log::debug!(
        "built {width}x{height} grid from {} records ({} overwrites)",
        records.len(),
        overwrites.len()
    );
    (
        Grid {
            width,
            height,
            cells,
        },
        overwrites,
    )
}

/// Width and height of the grid `records` span, or `None` when there are none.
///
/// Saturates instead of overflowing on targets where `usize` is 32 bits.
pub fn grid_extent(records: &[PositionRecord]) -> Option<(usize, usize)> {
    let max_x = records.iter().map(|r| r.x).max()?;
    let max_y = records.iter().map(|r| r.y).max()?;
    Some((
        (max_x as usize).saturating_add(1),
        (max_y as usize).saturating_add(1),
    ))
}

/// Whether a `width × height` grid can be allocated at all.
pub fn fits_in_memory(width: usize, height: usize) -> bool {
    // Each cell costs one char plus one fill flag while building.
    let per_cell = std::mem::size_of::<char>() + std::mem::size_of::<bool>();
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(per_cell))
        .is_some_and(|bytes| bytes <= isize::MAX as usize)
}
