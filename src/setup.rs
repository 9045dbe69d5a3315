//! Per-message setup line.
//!
//! A setup line selects the rotors, their initial settings and the
//! plugboard for the messages that follow it:
//!
//! ```text
//! * B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
//! ```

use tracing::debug;

use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::permutation::Permutation;

/// Marker that introduces a setup line.
const SETUP_MARKER: &str = "*";

/// A parsed setup line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    rotors: Vec<String>,
    setting: String,
    plugboard: String,
}

impl Setup {
    /// Returns true if `line` should be read as a setup line rather than a message.
    pub fn is_setup_line(line: &str) -> bool {
        line.contains('*')
    }

    /// Parses `line` for a machine with `num_rotors` slots.
    ///
    /// # Errors
    /// - [`EnigmaError::MalformedSetup`] if the line does not start with `*`
    ///   or is too short to hold the rotor names and the setting.
    /// - [`EnigmaError::DuplicateRotorName`] if a rotor is named twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Setup;
    ///
    /// let setup = Setup::parse("* B Beta III IV I AXLE (YF) (ZH)", 5).unwrap();
    /// assert_eq!(setup.rotors(), ["B", "Beta", "III", "IV", "I"]);
    /// assert_eq!(setup.setting(), "AXLE");
    /// assert_eq!(setup.plugboard(), "(YF) (ZH)");
    /// ```
    pub fn parse(line: &str, num_rotors: usize) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() != Some(&SETUP_MARKER) {
            return Err(EnigmaError::MalformedSetup(format!(
                "expected '{}' at the start of {:?}",
                SETUP_MARKER, line
            )));
        }
        if tokens.len() < num_rotors + 2 {
            return Err(EnigmaError::MalformedSetup(format!(
                "expected {} rotor names and a setting in {:?}",
                num_rotors, line
            )));
        }

        let rotors: Vec<String> = tokens[1..=num_rotors]
            .iter()
            .map(|name| name.to_string())
            .collect();
        for (i, name) in rotors.iter().enumerate() {
            if rotors[..i].contains(name) {
                return Err(EnigmaError::DuplicateRotorName(name.clone()));
            }
        }

        Ok(Setup {
            rotors,
            setting: tokens[num_rotors + 1].to_string(),
            plugboard: tokens[num_rotors + 2..].join(" "),
        })
    }

    /// Returns the rotor names, reflector first.
    pub fn rotors(&self) -> &[String] {
        &self.rotors
    }

    /// Returns the initial setting string.
    pub fn setting(&self) -> &str {
        &self.setting
    }

    /// Returns the plugboard cycles as written.
    pub fn plugboard(&self) -> &str {
        &self.plugboard
    }

    /// Configures `machine` with this setup.
    ///
    /// Either every part applies or the machine is left untouched.
    ///
    /// # Errors
    /// Returns the first error raised while building the plugboard,
    /// inserting the rotors or applying the setting.
    pub fn apply(&self, machine: &mut Machine) -> Result<()> {
        let plugboard = Permutation::new(&self.plugboard, machine.alphabet().clone())?;

        let mut staged = machine.clone();
        staged.insert_rotors(&self.rotors)?;
        staged.set_rotors(&self.setting)?;
        staged.set_plugboard(plugboard)?;
        *machine = staged;

        debug!(rotors = ?self.rotors, setting = %self.setting, "setup applied");
        Ok(())
    }
}
