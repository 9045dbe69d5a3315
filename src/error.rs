//! Error types for the enigma library.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EnigmaError>;

/// Broad classification of an [`EnigmaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The machine, a rotor, or one of the textual descriptions is invalid.
    Configuration,
    /// A symbol is not a member of the alphabet.
    Lookup,
    /// An index lies outside `[0, alphabet size)`.
    Range,
}

/// Errors produced by the enigma library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// Alphabet built from an empty symbol sequence.
    #[error("Alphabet must contain at least one symbol")]
    EmptyAlphabet,
    /// Alphabet built from a sequence that repeats a symbol.
    #[error("Symbol '{0}' appears more than once in the alphabet")]
    DuplicateSymbol(char),
    /// Alphabet contains whitespace or a character reserved by the textual formats.
    #[error("Symbol {0:?} is reserved and can not be part of an alphabet")]
    ReservedSymbol(char),
    /// Machine built with fewer than two rotor slots.
    #[error("Number of rotors must be greater than 1, got {0}")]
    InvalidRotorCount(usize),
    /// Pawl count outside `[0, num_rotors)`.
    #[error("Number of pawls must be in [0, {num_rotors}), got {pawls}")]
    InvalidPawlCount {
        /// Requested pawl count.
        pawls: usize,
        /// Number of rotor slots.
        num_rotors: usize,
    },
    /// Cycle notation with unbalanced or stray characters.
    #[error("Malformed cycle notation: {0}")]
    MalformedCycles(String),
    /// A symbol appears in more than one cycle, or twice in the same cycle.
    #[error("Symbol '{0}' appears in more than one cycle position")]
    RepeatedCycleSymbol(char),
    /// A permutation or rotor was built over a different alphabet than the machine's.
    #[error("Permutation for '{0}' uses a different alphabet than the machine")]
    AlphabetMismatch(String),
    /// A rotor name occurs twice in a catalog or a slot assignment.
    #[error("Rotor '{0}' is named more than once")]
    DuplicateRotorName(String),
    /// A slot assignment names a rotor missing from the catalog.
    #[error("Unknown rotor '{0}'")]
    UnknownRotor(String),
    /// A slot assignment with the wrong number of names.
    #[error("Expected {expected} rotors, got {found}")]
    RotorCountMismatch {
        /// Number of slots in the machine.
        expected: usize,
        /// Number of names supplied.
        found: usize,
    },
    /// Slot 0 holds a rotor that does not reflect.
    #[error("Rotor '{0}' in the first slot is not a reflector")]
    ReflectorNotFirst(String),
    /// A reflector was assigned to a slot other than 0.
    #[error("Reflector '{name}' can only occupy the first slot, found in slot {slot}")]
    MisplacedReflector {
        /// Offending reflector.
        name: String,
        /// Slot it was assigned to.
        slot: usize,
    },
    /// A moving rotor placed left of the pawl-driven slots.
    #[error("Moving rotor '{name}' in slot {slot} is not driven by a pawl")]
    UnpoweredRotor {
        /// Offending rotor.
        name: String,
        /// Slot it was assigned to.
        slot: usize,
    },
    /// Setting string whose length differs from `num_rotors - 1`.
    #[error("Setting must have {expected} symbols, got {found}")]
    SettingLength {
        /// Number of non-reflector slots.
        expected: usize,
        /// Length of the supplied setting.
        found: usize,
    },
    /// Setting character outside the alphabet.
    #[error("Setting symbol '{0}' is not in the alphabet")]
    SettingSymbol(char),
    /// Attempt to rotate a reflector away from position 0.
    #[error("Reflector '{name}' can not be set to position {position}")]
    ReflectorSetting {
        /// Reflector name.
        name: String,
        /// Requested position.
        position: usize,
    },
    /// Conversion or setting requested before rotors were inserted.
    #[error("Machine has no rotors inserted")]
    NotConfigured,
    /// Notch symbol outside the alphabet.
    #[error("Notch '{notch}' of rotor '{name}' is not in the alphabet")]
    InvalidNotch {
        /// Rotor name.
        name: String,
        /// Offending notch symbol.
        notch: char,
    },
    /// Machine description ended before a required token.
    #[error("Configuration truncated: missing {0}")]
    TruncatedConfig(&'static str),
    /// A numeric token that does not parse.
    #[error("Invalid number '{0}' in configuration")]
    InvalidNumber(String),
    /// Rotor description missing its type token.
    #[error("Bad rotor description for '{0}'")]
    BadRotorDescription(String),
    /// Rotor type other than `M`, `N` or `R`.
    #[error("Unknown type '{kind}' for rotor '{name}'")]
    UnknownRotorType {
        /// Rotor name.
        name: String,
        /// The type token as written.
        kind: String,
    },
    /// Setup line that does not follow `* ROTORS... SETTING [CYCLES...]`.
    #[error("Malformed setup line: {0}")]
    MalformedSetup(String),
    /// Symbol not present in the alphabet.
    #[error("Symbol {0:?} is not in the alphabet")]
    SymbolNotFound(char),
    /// Index outside `[0, size)`.
    #[error("Index {index} is out of range for alphabet of size {size}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Alphabet size.
        size: usize,
    },
}

impl EnigmaError {
    /// Returns the taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnigmaError::SymbolNotFound(_) => ErrorKind::Lookup,
            EnigmaError::IndexOutOfRange { .. } => ErrorKind::Range,
            _ => ErrorKind::Configuration,
        }
    }
}
