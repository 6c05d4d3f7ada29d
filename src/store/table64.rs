//! Exact 64-bit counter table (`TABLE_64`).
//!
//! The simplest variant: one `u64` counter per context, incremented exactly,
//! never renormalized. Appropriate for low context orders where `4^(k+1)`
//! stays small enough that 8 bytes/cell is affordable (`k <= K_MAX_TABLE64`).

use std::io::{self, Read, Write};

use crate::error::EngineError;
use crate::store::CounterStore;

pub struct Table64 {
    tbl: Vec<u64>,
}

impl Table64 {
    /// Allocate a table sized for context order `k`, i.e. `4^(k+1)` cells.
    pub fn new(k: u8) -> Result<Self, EngineError> {
        let len = 4u64 << (k as u32 * 2);
        let cells = len as usize;
        let mut tbl = Vec::new();
        tbl.try_reserve_exact(cells)
            .map_err(|_| EngineError::Allocation { cells: len })?;
        tbl.resize(cells, 0);
        Ok(Table64 { tbl })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tbl.len()
    }
}

impl CounterStore for Table64 {
    fn update(&mut self, ctx: u64) {
        self.tbl[ctx as usize] += 1;
    }

    fn query(&self, ctx: u64) -> u64 {
        self.tbl[ctx as usize]
    }

    fn dump(&self, sink: &mut dyn Write) -> io::Result<()> {
        for &c in &self.tbl {
            sink.write_all(&c.to_le_bytes())?;
        }
        Ok(())
    }

    fn load(&mut self, source: &mut dyn Read) -> io::Result<()> {
        let mut buf = [0u8; 8];
        for c in self.tbl.iter_mut() {
            source.read_exact(&mut buf)?;
            *c = u64::from_le_bytes(buf);
        }
        Ok(())
    }
}
