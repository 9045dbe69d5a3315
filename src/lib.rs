//! Rotor cipher machine simulator.
//!
//! Models an electromechanical rotor machine: a row of interchangeable
//! rotors, each a fixed letter substitution, closed by a reflector and
//! wrapped in a plugboard. Before every character the rotors advance,
//! including the notch-driven double step of a middle rotor. Because the
//! reflector sends each signal back along the stack, a message converted
//! twice from the same starting state returns to the plaintext.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (symbol ↔ index)
//!     ↑
//! Permutation  (disjoint cycles, forward/inverse tables)
//!     ↑
//! Rotor        (Moving | Fixed | Reflecting, stored in a RotorCatalog)
//!     ↑
//! Machine      (slots + settings, stepping, plugboard → rotors → reflector → rotors → plugboard⁻¹)
//! ```
//!
//! [`MachineConfig`], [`Setup`] and [`driver`] read the textual machine
//! description and message streams used by the `enigma` binary.
//!
//! # Examples
//!
//! Encrypt with an Enigma I (reflector B, rotors I-II-III at `AAA`):
//!
//! ```
//! use enigma::{MachineConfig, Setup};
//!
//! let config = MachineConfig::parse(
//!     "ABCDEFGHIJKLMNOPQRSTUVWXYZ 4 3
//!      I   MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//!      II  ME (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
//!      III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
//!      B   R  (AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)",
//! )
//! .unwrap();
//! let mut machine = config.into_machine().unwrap();
//!
//! Setup::parse("* B I II III AAA", 4)
//!     .unwrap()
//!     .apply(&mut machine)
//!     .unwrap();
//! assert_eq!(machine.convert_message("HELLO WORLD").unwrap(), "ILBDA AMTAZ");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod config;
pub mod driver;
pub mod error;
pub mod machine;
pub mod permutation;
pub mod rotor;
pub mod setup;

pub use alphabet::Alphabet;
pub use config::MachineConfig;
pub use error::{EnigmaError, ErrorKind, Result};
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorCatalog, RotorId, RotorKind};
pub use setup::Setup;
