//! Message stream processing.
//!
//! Reads setup lines and message lines, converts each message against the
//! machine state left by the previous one, and writes the result in groups
//! of five symbols.

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::setup::Setup;

/// Number of symbols per output group.
const GROUP_SIZE: usize = 5;

/// Errors produced while processing a message stream.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The machine rejected a setup or a message.
    #[error(transparent)]
    Enigma(#[from] EnigmaError),
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Processes every line of `input` with `machine`, writing results to `output`.
///
/// The first line must be a setup line. Each later line that contains `*`
/// reconfigures the machine; every other line is converted with its
/// whitespace removed and written as groups of five symbols.
///
/// # Errors
/// - [`ProcessError::Enigma`] for a malformed setup or a foreign symbol.
/// - [`ProcessError::Io`] if reading or writing fails.
///
/// # Examples
///
/// ```
/// use enigma::{driver, MachineConfig};
///
/// let machine = MachineConfig::parse(
///     "ABCD 3 2  R R (AC) (BD)  L MA (ABCD)  M MC (AB) (CD)",
/// )
/// .unwrap()
/// .into_machine()
/// .unwrap();
///
/// let input = "* R L M AA\nABCDABCD\n";
/// let mut output = Vec::new();
/// driver::process(machine, input.as_bytes(), &mut output).unwrap();
/// assert_eq!(String::from_utf8(output).unwrap().lines().count(), 1);
/// ```
pub fn process<R, W>(mut machine: Machine, input: R, mut output: W) -> Result<(), ProcessError>
where
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    let first = match lines.next() {
        Some(line) => line?,
        None => return Ok(()),
    };
    Setup::parse(&first, machine.num_rotors())?.apply(&mut machine)?;

    for (number, line) in lines.enumerate() {
        let line = line?;
        if Setup::is_setup_line(&line) {
            Setup::parse(&line, machine.num_rotors())?.apply(&mut machine)?;
            debug!(line = number + 2, "machine reconfigured");
            continue;
        }
        let message: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        let converted = machine.convert_message(&message)?;
        writeln!(output, "{}", group_five(&converted))?;
    }
    output.flush()?;
    Ok(())
}

/// Splits `msg` into space-separated groups of five symbols, ignoring any
/// whitespace already present. The last group may be shorter.
///
/// # Examples
///
/// ```
/// use enigma::driver::group_five;
///
/// assert_eq!(group_five("QVPQSOKOILPUBKJ"), "QVPQS OKOIL PUBKJ");
/// assert_eq!(group_five("AB CDEFG"), "ABCDE FG");
/// ```
pub fn group_five(msg: &str) -> String {
    let mut grouped = String::with_capacity(msg.len() + msg.len() / GROUP_SIZE);
    for (i, ch) in msg.chars().filter(|c| !c.is_whitespace()).enumerate() {
        if i > 0 && i % GROUP_SIZE == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}
