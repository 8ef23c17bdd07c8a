mod common;

use torre::attacks::{occupancy_subset, Slider};
use torre::utils::count_bits;
use torre::{AttackTables, MagicNumbers};

use common::tables;

#[test]
fn every_relevant_occupancy_matches_ray_cast() {
    let tables = tables();
    for slider in [Slider::Bishop, Slider::Rook] {
        for sq in 0..64 {
            let mask = slider.relevant_mask(sq);
            for index in 0..(1usize << count_bits(mask)) {
                let occupancy = occupancy_subset(index, mask);
                let looked_up = match slider {
                    Slider::Bishop => tables.bishop_attacks(sq, occupancy),
                    Slider::Rook => tables.rook_attacks(sq, occupancy),
                };
                assert_eq!(
                    looked_up,
                    slider.attacks_for_occupancy(sq, occupancy),
                    "{slider} on square {sq}, subset {index}"
                );
            }
        }
    }
}

#[test]
fn rebuilding_from_the_same_magics_is_identical() {
    let first = AttackTables::from_magics(tables().magics()).unwrap();
    let second = AttackTables::from_magics(tables().magics()).unwrap();
    assert_eq!(first, second);
    assert_eq!(&first, tables());
}

#[test]
fn solver_is_reproducible_for_a_seed() {
    let a = MagicNumbers::with_seed(7).unwrap();
    let b = MagicNumbers::with_seed(7).unwrap();
    assert_eq!(a, b);
    for sq in 0..64 {
        assert_ne!(a.get(Slider::Rook, sq), 0);
        assert_ne!(a.get(Slider::Bishop, sq), 0);
    }
}
