//! Window management for nc-widgets.
//!
//! A window is a rectangular grid of cells that a posted form draws its
//! fields into. Windows are shared between the embedding screen and the
//! widget set through [`WindowRef`], so the screen can keep drawing its own
//! decorations around the form.

use std::cell::RefCell;
use std::rc::Rc;

use crate::attr::A_NORMAL;
use crate::error::{Error, Result};
use crate::types::{AttrT, Coord};

/// Shared handle to a window.
pub type WindowRef = Rc<RefCell<Window>>;

/// A single character cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// The displayed character.
    pub ch: char,
    /// The video attributes of the cell.
    pub attr: AttrT,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            attr: A_NORMAL,
        }
    }
}

/// A curses-style window.
#[derive(Clone, Debug)]
pub struct Window {
    /// Current cursor Y position (row).
    cury: Coord,
    /// Current cursor X position (column).
    curx: Coord,
    /// Number of rows.
    nlines: Coord,
    /// Number of columns.
    ncols: Coord,
    /// Screen Y coordinate of upper-left corner.
    begy: Coord,
    /// Screen X coordinate of upper-left corner.
    begx: Coord,
    /// Cell contents, row-major.
    cells: Vec<Cell>,
}

impl Window {
    /// Create a new window.
    ///
    /// # Arguments
    ///
    /// * `nlines` - Number of lines (height), must be positive.
    /// * `ncols` - Number of columns (width), must be positive.
    /// * `begy` - Y coordinate of upper-left corner on screen.
    /// * `begx` - X coordinate of upper-left corner on screen.
    pub fn new(nlines: Coord, ncols: Coord, begy: Coord, begx: Coord) -> Result<Self> {
        if nlines <= 0 || ncols <= 0 {
            return Err(Error::InvalidArgument(
                "window dimensions must be positive".into(),
            ));
        }
        if begy < 0 || begx < 0 {
            return Err(Error::InvalidArgument(
                "window position must be non-negative".into(),
            ));
        }

        Ok(Self {
            cury: 0,
            curx: 0,
            nlines,
            ncols,
            begy,
            begx,
            cells: vec![Cell::default(); (nlines * ncols) as usize],
        })
    }

    /// Wrap the window in a shared handle.
    pub fn into_shared(self) -> WindowRef {
        Rc::new(RefCell::new(self))
    }

    /// Create a derived window, positioned relative to this one.
    ///
    /// The derived window must fit inside its parent. Unlike curses, it
    /// does not share cells with the parent.
    pub fn derwin(&self, nlines: Coord, ncols: Coord, begy: Coord, begx: Coord) -> Result<Self> {
        if begy < 0 || begx < 0 || begy + nlines > self.nlines || begx + ncols > self.ncols {
            return Err(Error::OutOfBounds {
                y: begy + nlines,
                x: begx + ncols,
                max_y: self.nlines,
                max_x: self.ncols,
            });
        }
        Self::new(nlines, ncols, self.begy + begy, self.begx + begx)
    }

    /// Number of rows.
    pub fn getmaxy(&self) -> Coord {
        self.nlines
    }

    /// Number of columns.
    pub fn getmaxx(&self) -> Coord {
        self.ncols
    }

    /// Screen row of the upper-left corner.
    pub fn getbegy(&self) -> Coord {
        self.begy
    }

    /// Screen column of the upper-left corner.
    pub fn getbegx(&self) -> Coord {
        self.begx
    }

    /// Cursor row.
    pub fn getcury(&self) -> Coord {
        self.cury
    }

    /// Cursor column.
    pub fn getcurx(&self) -> Coord {
        self.curx
    }

    fn index(&self, y: Coord, x: Coord) -> Option<usize> {
        if y < 0 || x < 0 || y >= self.nlines || x >= self.ncols {
            None
        } else {
            Some((y * self.ncols + x) as usize)
        }
    }

    /// Move the cursor.
    pub fn mv(&mut self, y: Coord, x: Coord) -> Result<()> {
        if self.index(y, x).is_none() {
            return Err(Error::OutOfBounds {
                y,
                x,
                max_y: self.nlines - 1,
                max_x: self.ncols - 1,
            });
        }
        self.cury = y;
        self.curx = x;
        Ok(())
    }

    /// Write a character at the cursor and advance it.
    ///
    /// The cursor wraps to the next line at the right edge and stays on
    /// the last cell once the window is full.
    pub fn addch(&mut self, ch: char, attr: AttrT) -> Result<()> {
        let idx = self.index(self.cury, self.curx).ok_or(Error::OutOfBounds {
            y: self.cury,
            x: self.curx,
            max_y: self.nlines - 1,
            max_x: self.ncols - 1,
        })?;
        self.cells[idx] = Cell { ch, attr };

        if self.curx + 1 < self.ncols {
            self.curx += 1;
        } else if self.cury + 1 < self.nlines {
            self.cury += 1;
            self.curx = 0;
        }
        Ok(())
    }

    /// Move the cursor and write a string.
    pub fn mvaddstr(&mut self, y: Coord, x: Coord, s: &str) -> Result<()> {
        self.mv(y, x)?;
        for ch in s.chars() {
            self.addch(ch, A_NORMAL)?;
        }
        Ok(())
    }

    /// Store a cell without moving the cursor.
    ///
    /// Returns `false` when the position is outside the window; callers
    /// that draw clipped content ignore it.
    pub fn put_cell(&mut self, y: Coord, x: Coord, cell: Cell) -> bool {
        match self.index(y, x) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Get the cell at a position.
    pub fn cell(&self, y: Coord, x: Coord) -> Option<Cell> {
        self.index(y, x).map(|idx| self.cells[idx])
    }

    /// Get the cell under the cursor.
    pub fn inch(&self) -> Cell {
        self.cells[(self.cury * self.ncols + self.curx) as usize]
    }

    /// Read up to `n` characters from a position, stopping at the row end.
    pub fn mvinstr(&self, y: Coord, x: Coord, n: Coord) -> Result<String> {
        let start = self.index(y, x).ok_or(Error::OutOfBounds {
            y,
            x,
            max_y: self.nlines - 1,
            max_x: self.ncols - 1,
        })?;
        let len = n.clamp(0, self.ncols - x) as usize;
        Ok(self.cells[start..start + len].iter().map(|c| c.ch).collect())
    }

    /// Clear every cell and home the cursor.
    pub fn erase(&mut self) {
        self.cells.fill(Cell::default());
        self.cury = 0;
        self.curx = 0;
    }
}
