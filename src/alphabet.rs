//! Alphabet: ordered set of encodable symbols.
//!
//! Maps each symbol to a dense index `0..size()` and back. Built once and
//! never mutated; permutations and machines share it through an `Arc`.

use std::collections::HashMap;
use std::fmt;

use crate::error::{EnigmaError, Result};

/// Symbols that carry meaning in the textual formats and so can not be encoded.
const RESERVED: [char; 3] = ['(', ')', '*'];

/// The 26 upper-case Latin letters.
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An ordered set of distinct symbols with index lookup in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    ranks: HashMap<char, usize>,
}

impl Alphabet {
    /// Builds an alphabet from the characters of `chars`, in order.
    ///
    /// # Errors
    /// - [`EnigmaError::EmptyAlphabet`] if `chars` is empty.
    /// - [`EnigmaError::DuplicateSymbol`] if a character repeats.
    /// - [`EnigmaError::ReservedSymbol`] for whitespace, `(`, `)` or `*`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Alphabet;
    ///
    /// let alpha = Alphabet::new("ABCD").unwrap();
    /// assert_eq!(alpha.size(), 4);
    /// assert!(Alphabet::new("AABC").is_err());
    /// ```
    pub fn new(chars: &str) -> Result<Self> {
        let mut symbols = Vec::with_capacity(chars.len());
        let mut ranks = HashMap::with_capacity(chars.len());
        for ch in chars.chars() {
            if ch.is_whitespace() || RESERVED.contains(&ch) {
                return Err(EnigmaError::ReservedSymbol(ch));
            }
            if ranks.insert(ch, symbols.len()).is_some() {
                return Err(EnigmaError::DuplicateSymbol(ch));
            }
            symbols.push(ch);
        }
        if symbols.is_empty() {
            return Err(EnigmaError::EmptyAlphabet);
        }
        Ok(Alphabet { symbols, ranks })
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if `symbol` is a member of this alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.ranks.contains_key(&symbol)
    }

    /// Returns the symbol at `index`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] if `index >= size()`.
    pub fn to_char(&self, index: usize) -> Result<char> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(EnigmaError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    /// Returns the index of `symbol`. Inverse of [`to_char`](Self::to_char).
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotFound`] if `symbol` is not a member.
    pub fn to_int(&self, symbol: char) -> Result<usize> {
        self.ranks
            .get(&symbol)
            .copied()
            .ok_or(EnigmaError::SymbolNotFound(symbol))
    }

    /// Iterates over the symbols in index order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }

    /// Returns the symbol at an index already known to be in range.
    ///
    /// # Panics
    /// Panics if `index >= size()`.
    pub(crate) fn symbol(&self, index: usize) -> char {
        self.symbols[index]
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let symbols: Vec<char> = UPPERCASE.chars().collect();
        let ranks = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Alphabet { symbols, ranks }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &ch in &self.symbols {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}
