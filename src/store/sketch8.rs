//! Count-Min-Log sketch (`SKETCH_8`, "CMLS4" with the default depth).
//!
//! Used once even a one-byte-per-context table would be too large (`k >
//! K_MAX_LOG_TABLE8`): a `d x w` grid of 8-bit Morris counters hashed by `d`
//! independent functions of `ctx`, with memory bounded by `w * d` regardless
//! of `k`. `update` finds the row-wise minimum across the `d` candidate
//! cells and applies the Morris increment rule independently to every cell
//! that currently equals that minimum; `query` returns the minimum across
//! the same `d` cells, inverse-mapped through the same logarithmic curve as
//! [`LogTable8`](super::log_table8::LogTable8). Count-min sketches only ever
//! overestimate, never underestimate, which is why `query` takes a min
//! rather than an average.

use std::io::{self, Read, Write};

use crate::config::MORRIS_BASE;
use crate::error::EngineError;
use crate::store::rng::Xorshift64Star;
use crate::store::CounterStore;

/// Cap on sketch depth: large enough for any realistic configuration, small
/// enough to keep per-update row indices on the stack instead of the heap.
const MAX_DEPTH: usize = 16;

pub struct Sketch8 {
    width: u64,
    mask: u64,
    depth: u8,
    cells: Vec<u8>, // depth rows * width columns, row-major
    base: f64,
    inv: [f64; 256],
    rng: Xorshift64Star,
}

/// Murmur3-style 64-bit finalizer, used to derive `depth` independent row
/// hashes from one context integer by mixing in the row index.
fn mix64(mut x: u64) -> u64 {
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    x ^= x >> 33;
    x
}

impl Sketch8 {
    /// Allocate a `depth x width` sketch. `width` must be a power of two and
    /// `depth` must be in `1..=MAX_DEPTH`.
    pub fn new(width: u64, depth: u8, seed: u64) -> Result<Self, EngineError> {
        Self::with_base(width, depth, MORRIS_BASE, seed)
    }

    /// Same as [`Sketch8::new`] but with an explicit Morris base.
    pub fn with_base(width: u64, depth: u8, base: f64, seed: u64) -> Result<Self, EngineError> {
        if width == 0
            || (width & (width - 1)) != 0
            || depth == 0
            || depth as usize > MAX_DEPTH
        {
            return Err(EngineError::InvalidSketchShape { width, depth });
        }
        let cells_count = width
            .checked_mul(depth as u64)
            .ok_or(EngineError::InvalidSketchShape { width, depth })?;
        let cells_len = cells_count as usize;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(cells_len)
            .map_err(|_| EngineError::Allocation { cells: cells_count })?;
        cells.resize(cells_len, 0u8);
        Ok(Sketch8 {
            width,
            mask: width - 1,
            depth,
            cells,
            base,
            inv: super::log_table8::build_inverse_pub(base),
            rng: Xorshift64Star::new(seed),
        })
    }

    /// Row-major cell index for row `row` (`0..depth`) of `ctx`.
    fn cell_index(&self, row: u8, ctx: u64) -> usize {
        let salted = ctx ^ (row as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let col = (mix64(salted) & self.mask) as usize;
        row as usize * self.width as usize + col
    }

    fn row_indices(&self, ctx: u64, buf: &mut [usize; MAX_DEPTH]) -> usize {
        for r in 0..self.depth as usize {
            buf[r] = self.cell_index(r as u8, ctx);
        }
        self.depth as usize
    }
}

impl CounterStore for Sketch8 {
    fn update(&mut self, ctx: u64) {
        let mut idxs = [0usize; MAX_DEPTH];
        let n = self.row_indices(ctx, &mut idxs);
        let min_val = idxs[..n].iter().map(|&i| self.cells[i]).min().unwrap();
        if min_val == u8::MAX {
            return;
        }
        let p_inc = self.base.powi(-(min_val as i32));
        for &i in &idxs[..n] {
            if self.cells[i] == min_val && self.rng.next_f64() < p_inc {
                self.cells[i] += 1;
            }
        }
    }

    fn query(&self, ctx: u64) -> u64 {
        let mut idxs = [0usize; MAX_DEPTH];
        let n = self.row_indices(ctx, &mut idxs);
        let min_val = idxs[..n].iter().map(|&i| self.cells[i]).min().unwrap();
        self.inv[min_val as usize].round() as u64
    }

    fn dump(&self, sink: &mut dyn Write) -> io::Result<()> {
        sink.write_all(&self.cells)
    }

    fn load(&mut self, source: &mut dyn Read) -> io::Result<()> {
        source.read_exact(&mut self.cells)
    }
}
