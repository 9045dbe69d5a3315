//! Rotors and the catalog they are drawn from.
//!
//! A [`Rotor`] is the immutable identity of a wheel: its name, its wiring
//! and its kind. The rotational offset is not stored here. It belongs to the
//! machine slot the rotor is mounted in, so the same catalog entry can be
//! reconfigured freely without carrying state from a previous message.
//!
//! Rotors live in a [`RotorCatalog`] arena and are referenced by
//! [`RotorId`], in the same way the machine refers to them from its slots.

use std::collections::HashMap;

use tracing::warn;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;

/// The three mechanical variants of a rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Driven by a pawl; lets its left neighbour advance when at a notch.
    Moving {
        /// Symbols at which this rotor engages the pawl to its left.
        notches: Vec<char>,
    },
    /// Never advances.
    Fixed,
    /// Turns the signal back through the rotor stack; always at position 0.
    Reflecting,
}

/// Immutable description of one rotor: name, kind and wiring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    name: String,
    kind: RotorKind,
    permutation: Permutation,
}

impl Rotor {
    /// Creates a moving rotor whose notches are the symbols of `notches`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidNotch`] if a notch is not in the
    /// permutation's alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation, Rotor};
    ///
    /// let alpha = Arc::new(Alphabet::default());
    /// let wiring = "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)";
    /// let perm = Permutation::new(wiring, alpha).unwrap();
    /// let rotor = Rotor::moving("I", perm, "Q").unwrap();
    /// assert!(rotor.rotates());
    /// assert!(rotor.at_notch(16));
    /// ```
    pub fn moving(
        name: impl Into<String>,
        permutation: Permutation,
        notches: &str,
    ) -> Result<Self> {
        let name = name.into();
        let alphabet = permutation.alphabet();
        let mut symbols = Vec::with_capacity(notches.len());
        for notch in notches.chars() {
            if !alphabet.contains(notch) {
                return Err(EnigmaError::InvalidNotch { name, notch });
            }
            if !symbols.contains(&notch) {
                symbols.push(notch);
            }
        }
        Ok(Rotor {
            name,
            kind: RotorKind::Moving { notches: symbols },
            permutation,
        })
    }

    /// Creates a fixed (non-moving, non-reflecting) rotor.
    pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
        Rotor {
            name: name.into(),
            kind: RotorKind::Fixed,
            permutation,
        }
    }

    /// Creates a reflector.
    ///
    /// A physical reflector wires every contact to a different one. That is
    /// not enforced here, but a wiring with fixed points is reported with a
    /// warning.
    pub fn reflector(name: impl Into<String>, permutation: Permutation) -> Self {
        let name = name.into();
        if !permutation.derangement() {
            warn!(rotor = %name, "reflector wiring has fixed points");
        }
        Rotor {
            name,
            kind: RotorKind::Reflecting,
            permutation,
        }
    }

    /// Returns the rotor name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rotor kind.
    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    /// Returns the wiring.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Returns the alphabet of the wiring.
    pub fn alphabet(&self) -> &Alphabet {
        self.permutation.alphabet()
    }

    /// Returns the alphabet size.
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// Returns the notch symbols (empty unless moving).
    pub fn notches(&self) -> &[char] {
        match &self.kind {
            RotorKind::Moving { notches } => notches,
            _ => &[],
        }
    }

    /// Returns true iff this rotor has a ratchet and can move.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// Returns true iff this rotor is a reflector.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflecting)
    }

    /// Returns true iff, at `setting`, this rotor lets its left neighbour advance.
    pub fn at_notch(&self, setting: usize) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => self
                .alphabet()
                .to_char(setting)
                .map(|symbol| notches.contains(&symbol))
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Returns the setting reached by advancing once from `setting`.
    ///
    /// Only moving rotors advance; for the other kinds this is the identity.
    pub fn advance(&self, setting: usize) -> usize {
        match self.kind {
            RotorKind::Moving { .. } => (setting + 1) % self.size(),
            _ => setting,
        }
    }

    /// Resolves an integer position into a valid setting (floored modulo).
    ///
    /// # Errors
    /// Returns [`EnigmaError::ReflectorSetting`] if this is a reflector and
    /// the position does not reduce to 0.
    pub fn resolve_setting(&self, position: i64) -> Result<usize> {
        let setting = position.rem_euclid(self.size() as i64) as usize;
        if self.reflecting() && setting != 0 {
            return Err(EnigmaError::ReflectorSetting {
                name: self.name.clone(),
                position: setting,
            });
        }
        Ok(setting)
    }

    /// Resolves a setting symbol into a valid setting.
    ///
    /// # Errors
    /// - [`EnigmaError::SymbolNotFound`] if `symbol` is not in the alphabet.
    /// - [`EnigmaError::ReflectorSetting`] as for [`resolve_setting`](Self::resolve_setting).
    pub fn resolve_symbol(&self, symbol: char) -> Result<usize> {
        let position = self.alphabet().to_int(symbol)?;
        self.resolve_setting(position as i64)
    }

    /// Converts contact `p` through the wiring rotated by `setting`.
    pub fn convert_forward(&self, p: usize, setting: usize) -> usize {
        let contact = self.permutation.permute(p as i64 + setting as i64);
        self.unrotate(contact, setting)
    }

    /// Converts contact `e` through the inverse wiring rotated by `setting`.
    pub fn convert_backward(&self, e: usize, setting: usize) -> usize {
        let contact = self.permutation.invert(e as i64 + setting as i64);
        self.unrotate(contact, setting)
    }

    fn unrotate(&self, contact: usize, setting: usize) -> usize {
        (contact as i64 - setting as i64).rem_euclid(self.size() as i64) as usize
    }
}

/// Unique identifier for a rotor within a [`RotorCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotorId(pub usize);

/// Arena of available rotors, addressed by [`RotorId`] or by name.
#[derive(Debug, Clone, Default)]
pub struct RotorCatalog {
    rotors: Vec<Rotor>,
    by_name: HashMap<String, RotorId>,
}

impl RotorCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty catalog with room for `capacity` rotors.
    pub fn with_capacity(capacity: usize) -> Self {
        RotorCatalog {
            rotors: Vec::with_capacity(capacity),
            by_name: HashMap::with_capacity(capacity),
        }
    }

    /// Adds a rotor and returns its id.
    ///
    /// # Errors
    /// Returns [`EnigmaError::DuplicateRotorName`] if the name is taken.
    pub fn add(&mut self, rotor: Rotor) -> Result<RotorId> {
        if self.by_name.contains_key(rotor.name()) {
            return Err(EnigmaError::DuplicateRotorName(rotor.name().to_string()));
        }
        let id = RotorId(self.rotors.len());
        self.by_name.insert(rotor.name().to_string(), id);
        self.rotors.push(rotor);
        Ok(id)
    }

    /// Returns the rotor with the given id.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this catalog.
    pub fn get(&self, id: RotorId) -> &Rotor {
        &self.rotors[id.0]
    }

    /// Looks a rotor up by name.
    pub fn find(&self, name: &str) -> Option<RotorId> {
        self.by_name.get(name).copied()
    }

    /// Returns the number of rotors.
    pub fn len(&self) -> usize {
        self.rotors.len()
    }

    /// Returns true if the catalog holds no rotors.
    pub fn is_empty(&self) -> bool {
        self.rotors.is_empty()
    }

    /// Iterates over the rotors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rotor> {
        self.rotors.iter()
    }
}
