use rfcm::symbol::{complement, map_byte};

#[test]
fn full_alphabet_round_trips_through_complement() {
    for base in [b'A', b'C', b'G', b'T'] {
        let s = map_byte(base);
        assert_eq!(complement(complement(s)), s);
    }
}

#[test]
fn complement_pairs_match_watson_crick() {
    // A<->T, C<->G.
    assert_eq!(complement(map_byte(b'A')), map_byte(b'T'));
    assert_eq!(complement(map_byte(b'T')), map_byte(b'A'));
    assert_eq!(complement(map_byte(b'C')), map_byte(b'G'));
    assert_eq!(complement(map_byte(b'G')), map_byte(b'C'));
}

#[test]
fn case_is_ignored() {
    assert_eq!(map_byte(b'a'), map_byte(b'A'));
    assert_eq!(map_byte(b'g'), map_byte(b'G'));
}
