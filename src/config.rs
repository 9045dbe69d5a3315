//! Textual machine description.
//!
//! The description is a whitespace-separated token stream:
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ        alphabet
//! 5 3                               slots, pawls
//! I MQ  (AELTPHQXRU) (BKNW) ...     name, type, cycles...
//! Beta N (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B R   (AE) (BN) (CK) ...
//! ```
//!
//! The type token is `M` followed by the notch symbols for a moving rotor,
//! `N` for a fixed rotor and `R` for a reflector. Every following token that
//! starts with `(` belongs to the rotor's wiring, so a wiring may span lines.

use std::iter::Peekable;
use std::str::{FromStr, SplitWhitespace};
use std::sync::Arc;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// A parsed machine description: alphabet, slot counts and rotor catalog.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    pawls: usize,
    rotors: Vec<Rotor>,
}

impl MachineConfig {
    /// Parses a machine description.
    ///
    /// # Errors
    /// - [`EnigmaError::TruncatedConfig`] if the alphabet or a count is missing.
    /// - [`EnigmaError::InvalidNumber`] if a count is not a decimal integer.
    /// - [`EnigmaError::BadRotorDescription`] if a rotor has no type token.
    /// - [`EnigmaError::UnknownRotorType`] for a type other than `M…`, `N` or `R`.
    /// - [`EnigmaError::DuplicateRotorName`] if two rotors share a name.
    /// - Any alphabet, permutation or notch error from the parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::MachineConfig;
    ///
    /// let config = MachineConfig::parse(
    ///     "ABCD 3 2
    ///      R1 R (AC) (BD)
    ///      M1 MA (ABCD)
    ///      M2 MC (AB) (CD)",
    /// )
    /// .unwrap();
    /// assert_eq!(config.num_rotors(), 3);
    /// assert_eq!(config.rotors().len(), 3);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = text.split_whitespace().peekable();

        let alphabet = tokens
            .next()
            .ok_or(EnigmaError::TruncatedConfig("alphabet"))?;
        let alphabet = Arc::new(Alphabet::new(alphabet)?);
        let num_rotors = parse_count(tokens.next(), "number of rotors")?;
        let pawls = parse_count(tokens.next(), "number of pawls")?;

        let mut rotors: Vec<Rotor> = Vec::new();
        while let Some(name) = tokens.next() {
            let rotor = parse_rotor(name, &mut tokens, &alphabet)?;
            if rotors.iter().any(|r| r.name() == rotor.name()) {
                return Err(EnigmaError::DuplicateRotorName(rotor.name().to_string()));
            }
            debug!(rotor = rotor.name(), kind = ?rotor.kind(), "rotor described");
            rotors.push(rotor);
        }

        Ok(MachineConfig {
            alphabet,
            num_rotors,
            pawls,
            rotors,
        })
    }

    /// Returns the alphabet.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls.
    pub fn pawls(&self) -> usize {
        self.pawls
    }

    /// Returns the described rotors, in order of appearance.
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    /// Builds an unconfigured machine from this description.
    ///
    /// # Errors
    /// Returns the construction errors of [`Machine::new`].
    pub fn into_machine(self) -> Result<Machine> {
        Machine::new(self.alphabet, self.num_rotors, self.pawls, self.rotors)
    }
}

impl FromStr for MachineConfig {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_count(token: Option<&str>, what: &'static str) -> Result<usize> {
    let token = token.ok_or(EnigmaError::TruncatedConfig(what))?;
    token
        .parse()
        .map_err(|_| EnigmaError::InvalidNumber(token.to_string()))
}

fn parse_rotor(
    name: &str,
    tokens: &mut Peekable<SplitWhitespace<'_>>,
    alphabet: &Arc<Alphabet>,
) -> Result<Rotor> {
    if name.starts_with('(') {
        return Err(EnigmaError::BadRotorDescription(name.to_string()));
    }
    let kind = match tokens.next() {
        Some(kind) if !kind.starts_with('(') => kind,
        _ => return Err(EnigmaError::BadRotorDescription(name.to_string())),
    };

    let mut cycles = Vec::new();
    while let Some(cycle) = tokens.next_if(|token| token.starts_with('(')) {
        cycles.push(cycle);
    }
    let permutation = Permutation::new(&cycles.join(" "), alphabet.clone())?;

    let mut kind_chars = kind.chars();
    match (kind_chars.next(), kind_chars.as_str()) {
        (Some('M'), notches) => Rotor::moving(name, permutation, notches),
        (Some('N'), "") => Ok(Rotor::fixed(name, permutation)),
        (Some('R'), "") => Ok(Rotor::reflector(name, permutation)),
        _ => Err(EnigmaError::UnknownRotorType {
            name: name.to_string(),
            kind: kind.to_string(),
        }),
    }
}
