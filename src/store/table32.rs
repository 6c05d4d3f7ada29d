//! Exact-until-renormalized 32-bit counter table (`TABLE_32`).
//!
//! Same per-context layout as [`Table64`](super::table64::Table64) but with
//! 4-byte cells: a context order that would need too much memory in a 64-bit
//! table (`K_MAX_TABLE64 < k <= K_MAX_TABLE32`) fits here instead, at the
//! cost of periodic renormalization once a cell nears `u32::MAX`.

use std::io::{self, Read, Write};

use crate::error::EngineError;
use crate::store::CounterStore;

pub struct Table32 {
    tbl: Vec<u32>,
    /// Number of renormalization events so far.
    n_renorm: u64,
    /// Total raw `update` calls observed, independent of renormalization.
    tot: u64,
}

impl Table32 {
    /// Allocate a table sized for context order `k`, i.e. `4^(k+1)` cells.
    pub fn new(k: u8) -> Result<Self, EngineError> {
        let len = 4u64 << (k as u32 * 2);
        let cells = len as usize;
        let mut tbl = Vec::new();
        tbl.try_reserve_exact(cells)
            .map_err(|_| EngineError::Allocation { cells: len })?;
        tbl.resize(cells, 0);
        Ok(Table32 {
            tbl,
            n_renorm: 0,
            tot: 0,
        })
    }

    /// Halve every counter, rounding up so a cell that had seen at least one
    /// observation (`c >= 1`) never collapses to zero.
    fn renormalize(&mut self) {
        for c in self.tbl.iter_mut() {
            *c = (*c + 1) >> 1;
        }
        self.n_renorm += 1;
    }

    /// Number of renormalization events so far.
    pub fn n_renorm(&self) -> u64 {
        self.n_renorm
    }

    /// Total raw increments observed across this store's lifetime.
    pub fn total(&self) -> u64 {
        self.tot
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tbl.len()
    }
}

impl CounterStore for Table32 {
    fn update(&mut self, ctx: u64) {
        let idx = ctx as usize;
        if self.tbl[idx] == u32::MAX {
            self.renormalize();
        }
        self.tbl[idx] += 1;
        self.tot += 1;
    }

    fn query(&self, ctx: u64) -> u64 {
        self.tbl[ctx as usize] as u64
    }

    fn dump(&self, sink: &mut dyn Write) -> io::Result<()> {
        for &c in &self.tbl {
            sink.write_all(&c.to_le_bytes())?;
        }
        Ok(())
    }

    fn load(&mut self, source: &mut dyn Read) -> io::Result<()> {
        let mut buf = [0u8; 4];
        for c in self.tbl.iter_mut() {
            source.read_exact(&mut buf)?;
            *c = u32::from_le_bytes(buf);
        }
        Ok(())
    }
}
