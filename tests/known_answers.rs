//! Known-answer tests against historical rotor machine configurations.
//!
//! All expected ciphertexts are frozen vectors for the standard wirings in
//! `fixtures/naval.conf`: any change in output indicates a regression in the
//! wiring transform, the stepping order or the plugboard handling.

use enigma::{driver, EnigmaError, ErrorKind, Machine, MachineConfig, Setup};

const NAVAL_CONF: &str = include_str!("fixtures/naval.conf");
const HIAWATHA_IN: &str = include_str!("fixtures/hiawatha.in");
const HIAWATHA_OUT: &str = include_str!("fixtures/hiawatha.out");

/// Builds the five-slot naval machine with the given setup line.
fn naval(setup: &str) -> Machine {
    let mut machine = MachineConfig::parse(NAVAL_CONF)
        .unwrap()
        .into_machine()
        .unwrap();
    Setup::parse(setup, machine.num_rotors())
        .unwrap()
        .apply(&mut machine)
        .unwrap();
    machine
}

/// Builds a four-slot Enigma I (three moving rotors) from the same catalog.
fn enigma_i(rotors: &str, setting: &str) -> Machine {
    let conf = NAVAL_CONF.replacen("5 3", "4 3", 1);
    let mut machine = MachineConfig::parse(&conf).unwrap().into_machine().unwrap();
    Setup::parse(&format!("* UKW-B {} {}", rotors, setting), 4)
        .unwrap()
        .apply(&mut machine)
        .unwrap();
    machine
}

// ═══════════════════════════════════════════════════════════════════════
// Enigma I, reflector B, no plugboard
// ═══════════════════════════════════════════════════════════════════════

/// Thirty A's at AAA: the classic test sequence.
#[test]
fn enigma_i_aaa_repeated_a() {
    let mut machine = enigma_i("I II III", "AAA");
    let cipher = machine.convert_message(&"A".repeat(30)).unwrap();
    assert_eq!(cipher, "BDZGOWCXLTKSBTMCDLPBMUQOFXYHCX");
    assert_eq!(machine.settings(), "ABE");
}

#[test]
fn enigma_i_hello_world() {
    let mut machine = enigma_i("I II III", "AAA");
    let cipher = machine.convert_message("HELLO WORLD").unwrap();
    assert_eq!(cipher, "ILBDA AMTAZ");

    let mut machine = enigma_i("I II III", "AAA");
    let plain = machine.convert_message("ILBDA AMTAZ").unwrap();
    assert_eq!(plain, "HELLO WORLD");
}

#[test]
fn enigma_i_reversed_rotor_order() {
    let mut machine = enigma_i("III II I", "AAA");
    assert_eq!(machine.convert_message("A").unwrap(), "F");
    assert_eq!(machine.settings(), "AAB");
}

#[test]
fn enigma_i_with_plugboard() {
    let mut machine = enigma_i("IV V II", "ZDY");
    let alphabet = machine.alphabet().clone();
    let plugboard = enigma::Permutation::new("(AB) (CD)", alphabet).unwrap();
    machine.set_plugboard(plugboard).unwrap();
    assert_eq!(machine.convert_message("ENIGMA").unwrap(), "GUOCPF");
    assert_eq!(machine.settings(), "ZDE");
}

// ═══════════════════════════════════════════════════════════════════════
// Stepping: the double step of the middle rotor
// ═══════════════════════════════════════════════════════════════════════

/// ADU → ADV → AEW → BFX: the middle rotor steps twice in a row, once
/// carried by the right rotor and once by its own notch.
#[test]
fn double_step_sequence() {
    let mut machine = enigma_i("I II III", "ADU");
    let mut seen = Vec::new();
    for _ in 0..3 {
        machine.convert(0).unwrap();
        seen.push(machine.settings());
    }
    assert_eq!(seen, ["ADV", "AEW", "BFX"]);
}

/// Each slot advances at most once per keystroke, however many step
/// triggers reach it.
#[test]
fn double_step_advances_once() {
    // II at its notch E and III at its notch V: both triggers fire at once.
    let mut machine = enigma_i("I II III", "AEV");
    machine.convert(0).unwrap();
    assert_eq!(machine.settings(), "BFW");
}

/// A full cycle of the rightmost rotor carries the middle rotor exactly once.
#[test]
fn right_rotor_turnover_period() {
    let mut machine = enigma_i("I II III", "AAA");
    for _ in 0..26 {
        machine.convert(0).unwrap();
    }
    assert_eq!(machine.settings(), "ABA");
}

/// Rotors VI-VIII carry two notches.
#[test]
fn two_notch_rotor_turnover() {
    let mut machine = naval("* B Beta I II VI AAAL");
    // VI at L reaches M after one key; M is a notch, so II steps on the next.
    machine.convert(0).unwrap();
    assert_eq!(machine.settings(), "AAAM");
    machine.convert(0).unwrap();
    assert_eq!(machine.settings(), "AABN");
}

// ═══════════════════════════════════════════════════════════════════════
// Naval machine: Beta/Gamma thin rotor, thin reflector, plugboard
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn naval_first_line() {
    let mut machine = naval("* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)");
    let plain = "FROM HIS SHOULDER HIAWATHA";
    let cipher = machine.convert_message(plain).unwrap();
    assert_eq!(cipher, "QVPQ SOK OILPUBKJ ZPISFXDW");
    assert_eq!(machine.settings(), "AXMB");
}

#[test]
fn naval_small_plugboard() {
    let mut machine = naval("* B Beta III IV I AXLE (YF) (ZH)");
    assert_eq!(
        machine.convert_message("FROMHISSHOULDERHIAWATHA").unwrap(),
        "AFIZKBKOXLIUFDCQPPSYSZW"
    );
}

#[test]
fn naval_stream_matches_frozen_output() {
    let machine = MachineConfig::parse(NAVAL_CONF)
        .unwrap()
        .into_machine()
        .unwrap();
    let mut output = Vec::new();
    let input = HIAWATHA_IN.as_bytes();
    driver::process(machine, input, &mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), HIAWATHA_OUT);
}

#[test]
fn naval_stream_decrypts() {
    let mut cipher_in = String::new();
    let mut cipher_lines = HIAWATHA_OUT.lines();
    for line in HIAWATHA_IN.lines() {
        if Setup::is_setup_line(line) {
            cipher_in.push_str(line);
        } else {
            cipher_in.push_str(cipher_lines.next().unwrap());
        }
        cipher_in.push('\n');
    }

    let machine = MachineConfig::parse(NAVAL_CONF)
        .unwrap()
        .into_machine()
        .unwrap();
    let mut output = Vec::new();
    let input = cipher_in.as_bytes();
    driver::process(machine, input, &mut output).unwrap();

    let plain: Vec<String> = HIAWATHA_IN
        .lines()
        .filter(|line| !Setup::is_setup_line(line))
        .map(driver::group_five)
        .collect();
    let decrypted = String::from_utf8(output).unwrap();
    assert_eq!(decrypted.lines().collect::<Vec<_>>(), plain);
}

// ═══════════════════════════════════════════════════════════════════════
// Configuration errors against the real catalog
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn naval_configuration_errors() {
    let mut machine = MachineConfig::parse(NAVAL_CONF)
        .unwrap()
        .into_machine()
        .unwrap();

    let cases: [(&str, EnigmaError); 5] = [
        (
            "* Beta B III IV I AXLE",
            EnigmaError::ReflectorNotFirst("Beta".into()),
        ),
        (
            "* B Beta III IV IX AXLE",
            EnigmaError::UnknownRotor("IX".into()),
        ),
        (
            "* B III Beta IV I AXLE",
            EnigmaError::UnpoweredRotor {
                name: "III".into(),
                slot: 1,
            },
        ),
        (
            "* B Beta III IV I AXL",
            EnigmaError::SettingLength {
                expected: 4,
                found: 3,
            },
        ),
        (
            "* B Beta III IV I AXLE (YF) (FZ)",
            EnigmaError::RepeatedCycleSymbol('F'),
        ),
    ];

    for (line, expected) in cases {
        let err = Setup::parse(line, 5)
            .unwrap()
            .apply(&mut machine)
            .unwrap_err();
        assert_eq!(err, expected, "setup {:?}", line);
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(!machine.is_configured());
    }

    assert_eq!(
        Setup::parse("* B Beta III III I AXLE", 5).unwrap_err(),
        EnigmaError::DuplicateRotorName("III".into())
    );
}
