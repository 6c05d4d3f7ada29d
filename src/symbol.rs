//! Byte -> {A,C,G,T} symbol translation (C1).
//!
//! A fixed 256-entry lookup table, built once at first use and shared by the
//! trainer and compressor. `\n` is not looked up here at all: both streaming
//! loops filter it out before reaching [`map_byte`], since a newline must not
//! touch any context or counter.

/// A nucleotide symbol in `0..=3`, representing `{A=0, C=1, G=2, T=3}`.
pub type Symbol = u8;

const fn build_table() -> [Symbol; 256] {
    let mut table = [0u8; 256]; // default slot: everything non-ACGT maps to 'A' (spec.md §6)
    table[b'A' as usize] = 0;
    table[b'a' as usize] = 0;
    table[b'C' as usize] = 1;
    table[b'c' as usize] = 1;
    table[b'G' as usize] = 2;
    table[b'g' as usize] = 2;
    table[b'T' as usize] = 3;
    table[b't' as usize] = 3;
    table
}

/// The canonical `NUM[256]` mapping (spec.md §6). Callers should go through
/// [`map_byte`] rather than indexing this directly.
pub static NUM: [Symbol; 256] = build_table();

/// Maps one input byte to its symbol. `b'\n'` is accepted here too (mapping
/// to the default slot) but streaming callers must filter newlines out
/// before calling this, since a newline must never update a context or
/// counter (spec.md §4.1).
#[inline]
pub fn map_byte(b: u8) -> Symbol {
    NUM[b as usize]
}

/// The complementary base of a symbol: `3 - s`. Used by the inverted-repeat
/// probe arithmetic in [`crate::context`].
#[inline]
pub fn complement(s: Symbol) -> Symbol {
    3 - s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_upper_and_lower_case() {
        assert_eq!(map_byte(b'A'), 0);
        assert_eq!(map_byte(b'a'), 0);
        assert_eq!(map_byte(b'C'), 1);
        assert_eq!(map_byte(b'c'), 1);
        assert_eq!(map_byte(b'G'), 2);
        assert_eq!(map_byte(b'g'), 2);
        assert_eq!(map_byte(b'T'), 3);
        assert_eq!(map_byte(b't'), 3);
    }

    #[test]
    fn maps_unknown_bytes_to_default_slot() {
        // Non-ACGT bytes are documented to land on the same slot as 'A'.
        assert_eq!(map_byte(b'N'), map_byte(b'A'));
        assert_eq!(map_byte(b'-'), map_byte(b'A'));
        assert_eq!(map_byte(0), map_byte(b'A'));
    }

    #[test]
    fn complement_is_involutive() {
        for s in 0..4 {
            assert_eq!(complement(complement(s)), s);
        }
    }
}
