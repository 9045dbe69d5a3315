//! Machine: the stepping state machine and the per-character transform.
//!
//! A machine owns a catalog of available rotors, an ordered row of slots
//! (slot 0 is the reflector, the last slot is the rightmost rotor) and a
//! plugboard. Every conversion first advances the rotors, then passes the
//! signal through
//!
//! ```text
//! plugboard → slots right-to-left (reflector included)
//!           → slots left-to-right (reflector excluded) → plugboard⁻¹
//! ```
//!
//! Configuration calls validate their input completely before touching the
//! machine, so a failed call leaves the previous configuration in place.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;
use crate::rotor::{Rotor, RotorCatalog, RotorId};

/// A rotor mounted in a machine slot, together with its current offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    rotor: RotorId,
    setting: usize,
}

/// A complete rotor cipher machine.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use enigma::{Alphabet, Machine, Permutation, Rotor};
///
/// let alpha = Arc::new(Alphabet::new("ABCD").unwrap());
/// let perm = |cycles| Permutation::new(cycles, alpha.clone()).unwrap();
/// let rotors = vec![
///     Rotor::reflector("R", perm("(AC) (BD)")),
///     Rotor::moving("M1", perm("(ABD)"), "D").unwrap(),
///     Rotor::moving("M2", perm("(BCD)"), "B").unwrap(),
/// ];
///
/// let mut machine = Machine::new(alpha.clone(), 3, 2, rotors.clone()).unwrap();
/// machine.insert_rotors(&["R", "M1", "M2"]).unwrap();
/// machine.set_rotors("AA").unwrap();
/// let cipher = machine.convert_message("DAB CAB").unwrap();
///
/// let mut receiver = Machine::new(alpha, 3, 2, rotors).unwrap();
/// receiver.insert_rotors(&["R", "M1", "M2"]).unwrap();
/// receiver.set_rotors("AA").unwrap();
/// assert_eq!(receiver.convert_message(&cipher).unwrap(), "DAB CAB");
/// ```
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    pawls: usize,
    catalog: RotorCatalog,
    slots: Vec<Slot>,
    plugboard: Permutation,
}

impl Machine {
    /// Creates a machine with `num_rotors` slots, `pawls` pawls and the
    /// given rotors available for insertion.
    ///
    /// The plugboard starts as the identity and no rotors are inserted.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidRotorCount`] if `num_rotors <= 1`.
    /// - [`EnigmaError::InvalidPawlCount`] if `pawls >= num_rotors`.
    /// - [`EnigmaError::AlphabetMismatch`] if a rotor uses another alphabet.
    /// - [`EnigmaError::DuplicateRotorName`] if two rotors share a name.
    pub fn new<I>(
        alphabet: Arc<Alphabet>,
        num_rotors: usize,
        pawls: usize,
        rotors: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = Rotor>,
    {
        if num_rotors <= 1 {
            return Err(EnigmaError::InvalidRotorCount(num_rotors));
        }
        if pawls >= num_rotors {
            return Err(EnigmaError::InvalidPawlCount { pawls, num_rotors });
        }

        let rotors = rotors.into_iter();
        let mut catalog = RotorCatalog::with_capacity(rotors.size_hint().0);
        for rotor in rotors {
            if !same_alphabet(rotor.permutation().alphabet(), &alphabet) {
                return Err(EnigmaError::AlphabetMismatch(rotor.name().to_string()));
            }
            catalog.add(rotor)?;
        }

        debug!(
            alphabet = %alphabet,
            num_rotors,
            pawls,
            available = catalog.len(),
            "machine created"
        );

        Ok(Machine {
            plugboard: Permutation::identity(alphabet.clone()),
            alphabet,
            num_rotors,
            pawls,
            catalog,
            slots: Vec::with_capacity(num_rotors),
        })
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls.
    pub fn pawls(&self) -> usize {
        self.pawls
    }

    /// Returns the machine alphabet.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the rotors available for insertion.
    pub fn catalog(&self) -> &RotorCatalog {
        &self.catalog
    }

    /// Returns the current plugboard.
    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Returns true once rotors have been inserted.
    pub fn is_configured(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Returns the names of the inserted rotors, reflector first.
    pub fn slot_names(&self) -> Vec<&str> {
        self.slots
            .iter()
            .map(|slot| self.catalog.get(slot.rotor).name())
            .collect()
    }

    /// Returns the current settings of the non-reflector slots, leftmost first.
    ///
    /// Every slot setting is kept below the alphabet size, so the string
    /// always holds `num_rotors() - 1` symbols once rotors are inserted.
    pub fn settings(&self) -> String {
        self.slots
            .iter()
            .skip(1)
            .map(|slot| self.alphabet.symbol(slot.setting))
            .collect()
    }

    /// Mounts the rotors named in `names` (reflector first), all at setting 0.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorCountMismatch`] if `names.len() != num_rotors()`.
    /// - [`EnigmaError::UnknownRotor`] if a name is not in the catalog.
    /// - [`EnigmaError::DuplicateRotorName`] if a rotor is named twice.
    /// - [`EnigmaError::ReflectorNotFirst`] if slot 0 is not a reflector.
    /// - [`EnigmaError::MisplacedReflector`] if any other slot is.
    /// - [`EnigmaError::UnpoweredRotor`] if a moving rotor sits left of the
    ///   `pawls()` rightmost slots.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::RotorCountMismatch {
                expected: self.num_rotors,
                found: names.len(),
            });
        }

        let first_driven = self.num_rotors - self.pawls;
        let mut slots: Vec<Slot> = Vec::with_capacity(self.num_rotors);
        for (index, name) in names.iter().enumerate() {
            let name = name.as_ref();
            let id = self
                .catalog
                .find(name)
                .ok_or_else(|| EnigmaError::UnknownRotor(name.to_string()))?;
            if slots.iter().any(|slot| slot.rotor == id) {
                return Err(EnigmaError::DuplicateRotorName(name.to_string()));
            }

            let rotor = self.catalog.get(id);
            if index == 0 && !rotor.reflecting() {
                return Err(EnigmaError::ReflectorNotFirst(name.to_string()));
            }
            if index > 0 && rotor.reflecting() {
                return Err(EnigmaError::MisplacedReflector {
                    name: name.to_string(),
                    slot: index,
                });
            }
            if rotor.rotates() && index < first_driven {
                return Err(EnigmaError::UnpoweredRotor {
                    name: name.to_string(),
                    slot: index,
                });
            }
            slots.push(Slot {
                rotor: id,
                setting: 0,
            });
        }

        self.slots = slots;
        debug!(rotors = ?self.slot_names(), "rotors inserted");
        Ok(())
    }

    /// Sets the non-reflector slots from `setting`, one symbol per slot,
    /// leftmost first.
    ///
    /// # Errors
    /// - [`EnigmaError::NotConfigured`] if no rotors are inserted.
    /// - [`EnigmaError::SettingLength`] if `setting` is not `num_rotors() - 1` symbols long.
    /// - [`EnigmaError::SettingSymbol`] if a symbol is not in the alphabet.
    pub fn set_rotors(&mut self, setting: &str) -> Result<()> {
        if self.slots.is_empty() {
            return Err(EnigmaError::NotConfigured);
        }
        let symbols: Vec<char> = setting.chars().collect();
        if symbols.len() != self.num_rotors - 1 {
            return Err(EnigmaError::SettingLength {
                expected: self.num_rotors - 1,
                found: symbols.len(),
            });
        }

        let mut settings = Vec::with_capacity(symbols.len());
        for (slot, &symbol) in self.slots[1..].iter().zip(&symbols) {
            if !self.alphabet.contains(symbol) {
                return Err(EnigmaError::SettingSymbol(symbol));
            }
            settings.push(self.catalog.get(slot.rotor).resolve_symbol(symbol)?);
        }

        for (slot, value) in self.slots[1..].iter_mut().zip(settings) {
            slot.setting = value;
        }
        debug!(setting, "rotor settings applied");
        Ok(())
    }

    /// Installs `plugboard`, replacing the previous one.
    ///
    /// # Errors
    /// Returns [`EnigmaError::AlphabetMismatch`] if `plugboard` permutes a
    /// different alphabet.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<()> {
        if !same_alphabet(plugboard.alphabet(), &self.alphabet) {
            return Err(EnigmaError::AlphabetMismatch("plugboard".to_string()));
        }
        debug!(plugboard = %plugboard, "plugboard installed");
        self.plugboard = plugboard;
        Ok(())
    }

    /// Advances the machine, then converts the symbol index `index`.
    ///
    /// # Errors
    /// - [`EnigmaError::IndexOutOfRange`] if `index >= alphabet().size()`.
    /// - [`EnigmaError::NotConfigured`] if no rotors are inserted.
    pub fn convert(&mut self, index: usize) -> Result<usize> {
        let size = self.alphabet.size();
        if index >= size {
            return Err(EnigmaError::IndexOutOfRange { index, size });
        }
        if self.slots.is_empty() {
            return Err(EnigmaError::NotConfigured);
        }

        self.step();

        let mut c = self.plugboard.permute(index as i64);
        for slot in self.slots.iter().rev() {
            let rotor = self.catalog.get(slot.rotor);
            c = rotor.convert_forward(c, slot.setting);
        }
        for slot in &self.slots[1..] {
            let rotor = self.catalog.get(slot.rotor);
            c = rotor.convert_backward(c, slot.setting);
        }
        Ok(self.plugboard.invert(c as i64))
    }

    /// Converts every symbol of `msg`, passing whitespace through unchanged.
    ///
    /// The whole message is checked against the alphabet before any
    /// conversion, so a foreign symbol leaves the rotors untouched.
    ///
    /// # Errors
    /// - [`EnigmaError::SymbolNotFound`] for a symbol outside the alphabet.
    /// - [`EnigmaError::NotConfigured`] if no rotors are inserted.
    pub fn convert_message(&mut self, msg: &str) -> Result<String> {
        let indices = msg
            .chars()
            .map(|ch| {
                if ch.is_whitespace() {
                    Ok(None)
                } else {
                    self.alphabet.to_int(ch).map(Some)
                }
            })
            .collect::<Result<Vec<Option<usize>>>>()?;

        let mut converted = String::with_capacity(msg.len());
        for (ch, index) in msg.chars().zip(indices) {
            match index {
                Some(index) => {
                    let out = self.convert(index)?;
                    converted.push(self.alphabet.to_char(out)?);
                }
                None => converted.push(ch),
            }
        }
        Ok(converted)
    }

    /// Advances the rotors for one keystroke.
    ///
    /// Step flags come from a snapshot of the pre-step settings. The
    /// rightmost slot always steps. A moving rotor whose right neighbour sits
    /// at a notch steps, and pushes that neighbour along with it. Each flagged
    /// slot advances exactly once, even when flagged twice.
    fn step(&mut self) {
        let last = self.slots.len() - 1;
        let mut flags = vec![false; self.slots.len()];
        flags[last] = true;

        for k in 0..last {
            let left = self.catalog.get(self.slots[k].rotor);
            let right = self.catalog.get(self.slots[k + 1].rotor);
            if left.rotates() && right.at_notch(self.slots[k + 1].setting) {
                flags[k] = true;
                flags[k + 1] = true;
            }
        }
        trace!(?flags, "step flags");

        for (slot, &flag) in self.slots.iter_mut().zip(&flags) {
            if flag {
                slot.setting = self.catalog.get(slot.rotor).advance(slot.setting);
            }
        }
    }
}

/// Returns true if both handles refer to equal alphabets.
fn same_alphabet(a: &Arc<Alphabet>, b: &Arc<Alphabet>) -> bool {
    Arc::ptr_eq(a, b) || a == b
}
