//! Property-based tests for the cipher engine.
//!
//! Permutations are generated as random shuffles and written back out in
//! cycle notation, so every property also exercises the cycle parser.

use std::sync::Arc;

use proptest::prelude::*;

use enigma::{Alphabet, Machine, Permutation, Rotor};

const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Writes the permutation `i -> image[i]` over `symbols` in cycle notation.
fn cycle_notation(symbols: &[char], image: &[usize]) -> String {
    let mut seen = vec![false; image.len()];
    let mut cycles = Vec::new();
    for start in 0..image.len() {
        if seen[start] {
            continue;
        }
        let mut cycle = String::from("(");
        let mut i = start;
        while !seen[i] {
            seen[i] = true;
            cycle.push(symbols[i]);
            i = image[i];
        }
        cycle.push(')');
        cycles.push(cycle);
    }
    cycles.join(" ")
}

/// Pairs up symbols of a shuffled alphabet into a fixed-point-free involution.
fn reflector_notation(symbols: &[char], shuffled: &[usize]) -> String {
    shuffled
        .chunks(2)
        .map(|pair| format!("({}{})", symbols[pair[0]], symbols[pair[1]]))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shuffle(size: usize) -> impl Strategy<Value = Vec<usize>> {
    Just((0..size).collect::<Vec<usize>>()).prop_shuffle()
}

/// A four-slot machine with random wirings, notches, settings and plugboard.
fn random_machine() -> impl Strategy<Value = (Machine, String)> {
    (
        shuffle(26),
        prop::collection::vec(shuffle(26), 3),
        prop::collection::vec(0usize..26, 3),
        prop::collection::vec(0usize..26, 3),
        shuffle(26),
        0usize..=13,
    )
        .prop_map(|(reflector, wheels, notches, start, plugs, pairs)| {
            let symbols: Vec<char> = LETTERS.chars().collect();
            let alpha = Arc::new(Alphabet::default());
            let perm = |cycles: &str| Permutation::new(cycles, alpha.clone()).unwrap();

            let mut rotors = vec![Rotor::reflector(
                "R",
                perm(&reflector_notation(&symbols, &reflector)),
            )];
            for (i, wheel) in wheels.iter().enumerate() {
                let notch = symbols[notches[i]].to_string();
                rotors.push(
                    Rotor::moving(format!("M{}", i), perm(&cycle_notation(&symbols, wheel)), &notch)
                        .unwrap(),
                );
            }

            let mut machine = Machine::new(alpha.clone(), 4, 3, rotors).unwrap();
            machine.insert_rotors(&["R", "M0", "M1", "M2"]).unwrap();
            let setting: String = start.iter().map(|&i| symbols[i]).collect();
            machine.set_rotors(&setting).unwrap();
            let plugboard = reflector_notation(&symbols, &plugs[..pairs * 2]);
            machine.set_plugboard(perm(&plugboard)).unwrap();
            (machine, setting)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn permutation_inverse_laws(image in shuffle(26)) {
        let symbols: Vec<char> = LETTERS.chars().collect();
        let alpha = Arc::new(Alphabet::default());
        let perm = Permutation::new(&cycle_notation(&symbols, &image), alpha).unwrap();

        for (i, &ch) in symbols.iter().enumerate() {
            prop_assert_eq!(perm.permute(i as i64), image[i]);
            prop_assert_eq!(perm.invert_symbol(perm.permute_symbol(ch).unwrap()).unwrap(), ch);
            prop_assert_eq!(perm.permute_symbol(perm.invert_symbol(ch).unwrap()).unwrap(), ch);
        }
    }

    #[test]
    fn permutation_wraps_any_integer(image in shuffle(10), p in any::<i32>()) {
        let symbols: Vec<char> = "0123456789".chars().collect();
        let alpha = Arc::new(Alphabet::new("0123456789").unwrap());
        let perm = Permutation::new(&cycle_notation(&symbols, &image), alpha).unwrap();

        let wrapped = (p as i64).rem_euclid(10);
        prop_assert_eq!(perm.permute(p as i64), perm.permute(wrapped));
        prop_assert_eq!(perm.invert(perm.permute(p as i64) as i64), wrapped as usize);
    }

    #[test]
    fn derangement_iff_no_fixed_point(image in shuffle(8)) {
        let symbols: Vec<char> = "ABCDEFGH".chars().collect();
        let alpha = Arc::new(Alphabet::new("ABCDEFGH").unwrap());
        let perm = Permutation::new(&cycle_notation(&symbols, &image), alpha).unwrap();

        let fixed_point = image.iter().enumerate().any(|(i, &j)| i == j);
        prop_assert_eq!(perm.derangement(), !fixed_point);
    }

    #[test]
    fn alphabet_roundtrip(order in shuffle(26)) {
        let symbols: Vec<char> = LETTERS.chars().collect();
        let chars: String = order.iter().map(|&i| symbols[i]).collect();
        let alpha = Alphabet::new(&chars).unwrap();

        for i in 0..alpha.size() {
            prop_assert_eq!(alpha.to_int(alpha.to_char(i).unwrap()).unwrap(), i);
        }
        for ch in chars.chars() {
            prop_assert_eq!(alpha.to_char(alpha.to_int(ch).unwrap()).unwrap(), ch);
        }
    }

    #[test]
    fn machine_is_reciprocal(
        (machine, _setting) in random_machine(),
        message in "[A-Z ]{0,120}",
    ) {
        let mut sender = machine.clone();
        let mut receiver = machine;
        let cipher = sender.convert_message(&message).unwrap();
        prop_assert_eq!(cipher.len(), message.len());
        prop_assert_eq!(receiver.convert_message(&cipher).unwrap(), message);
    }

    #[test]
    fn machine_never_maps_symbol_to_itself(
        (mut machine, _setting) in random_machine(),
        keys in prop::collection::vec(0usize..26, 1..200),
    ) {
        for key in keys {
            prop_assert_ne!(machine.convert(key).unwrap(), key);
        }
    }

    #[test]
    fn stepping_advances_each_slot_at_most_once(
        (mut machine, _setting) in random_machine(),
        keys in prop::collection::vec(0usize..26, 1..100),
    ) {
        let symbols: Vec<char> = LETTERS.chars().collect();
        let position = |c: char| symbols.iter().position(|&s| s == c).unwrap();
        for key in keys {
            let before: Vec<usize> = machine.settings().chars().map(position).collect();
            machine.convert(key).unwrap();
            let after: Vec<usize> = machine.settings().chars().map(position).collect();
            for (b, a) in before.iter().zip(&after) {
                let delta = (a + 26 - b) % 26;
                prop_assert!(delta <= 1, "slot moved {} positions", delta);
            }
            prop_assert_eq!((after[2] + 26 - before[2]) % 26, 1);
        }
    }
}
