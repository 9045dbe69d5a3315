//! Permutation of an alphabet written in cycle notation.
//!
//! A notation such as `"(BACD) (EF)"` describes the cycles
//! `B→A→C→D→B` and `E→F→E`. Symbols that appear in no cycle are fixed
//! points. The cycles are compiled into forward and inverse index tables
//! at construction, so every lookup afterwards is a single array access.

use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};

/// A bijection on the indices of an [`Alphabet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    cycles: Vec<Vec<char>>,
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Parses `cycles` against `alphabet`.
    ///
    /// Whitespace is ignored anywhere in the notation and empty cycles
    /// `()` are dropped. An empty notation yields the identity.
    ///
    /// # Errors
    /// - [`EnigmaError::MalformedCycles`] for unbalanced parentheses or a
    ///   symbol outside any cycle.
    /// - [`EnigmaError::SymbolNotFound`] for a symbol outside the alphabet.
    /// - [`EnigmaError::RepeatedCycleSymbol`] if the cycles are not disjoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alpha = Arc::new(Alphabet::new("ABCD").unwrap());
    /// let perm = Permutation::new("(BACD)", alpha).unwrap();
    /// assert_eq!(perm.permute_symbol('A').unwrap(), 'C');
    /// assert_eq!(perm.invert(0), 1);
    /// ```
    pub fn new(cycles: &str, alphabet: Arc<Alphabet>) -> Result<Self> {
        let cycles = parse_cycles(cycles, &alphabet)?;
        let size = alphabet.size();
        let mut forward: Vec<usize> = (0..size).collect();
        let mut inverse: Vec<usize> = (0..size).collect();
        let mut seen = vec![false; size];

        for cycle in &cycles {
            for (i, &ch) in cycle.iter().enumerate() {
                let from = alphabet.to_int(ch)?;
                let to = alphabet.to_int(cycle[(i + 1) % cycle.len()])?;
                if seen[from] {
                    return Err(EnigmaError::RepeatedCycleSymbol(ch));
                }
                seen[from] = true;
                forward[from] = to;
                inverse[to] = from;
            }
        }

        Ok(Permutation {
            alphabet,
            cycles,
            forward,
            inverse,
        })
    }

    /// Returns the identity permutation on `alphabet`.
    pub fn identity(alphabet: Arc<Alphabet>) -> Self {
        let size = alphabet.size();
        Permutation {
            alphabet,
            cycles: Vec::new(),
            forward: (0..size).collect(),
            inverse: (0..size).collect(),
        }
    }

    /// Returns the size of the alphabet being permuted.
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// Returns the alphabet this permutation was built over.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the cycles as parsed, empty cycles excluded.
    pub fn cycles(&self) -> &[Vec<char>] {
        &self.cycles
    }

    /// Reduces `p` into `[0, size())` with floored modulo.
    fn wrap(&self, p: i64) -> usize {
        p.rem_euclid(self.size() as i64) as usize
    }

    /// Applies the permutation to `p` taken modulo the alphabet size.
    pub fn permute(&self, p: i64) -> usize {
        self.forward[self.wrap(p)]
    }

    /// Applies the inverse permutation to `c` taken modulo the alphabet size.
    pub fn invert(&self, c: i64) -> usize {
        self.inverse[self.wrap(c)]
    }

    /// Applies the permutation to a symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotFound`] if `p` is not in the alphabet.
    pub fn permute_symbol(&self, p: char) -> Result<char> {
        let index = self.alphabet.to_int(p)?;
        self.alphabet.to_char(self.forward[index])
    }

    /// Applies the inverse permutation to a symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotFound`] if `c` is not in the alphabet.
    pub fn invert_symbol(&self, c: char) -> Result<char> {
        let index = self.alphabet.to_int(c)?;
        self.alphabet.to_char(self.inverse[index])
    }

    /// Returns true iff no symbol maps to itself.
    pub fn derangement(&self) -> bool {
        self.forward.iter().enumerate().all(|(i, &j)| i != j)
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cycle) in self.cycles.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "(")?;
            for &ch in cycle {
                write!(f, "{}", ch)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Splits cycle notation into its non-empty cycles.
fn parse_cycles(notation: &str, alphabet: &Alphabet) -> Result<Vec<Vec<char>>> {
    let mut cycles = Vec::new();
    let mut current: Option<Vec<char>> = None;

    for ch in notation.chars().filter(|c| !c.is_whitespace()) {
        match ch {
            '(' => {
                if current.is_some() {
                    return Err(EnigmaError::MalformedCycles(format!(
                        "nested '(' in {:?}",
                        notation
                    )));
                }
                current = Some(Vec::new());
            }
            ')' => match current.take() {
                Some(cycle) => {
                    if !cycle.is_empty() {
                        cycles.push(cycle);
                    }
                }
                None => {
                    return Err(EnigmaError::MalformedCycles(format!(
                        "unmatched ')' in {:?}",
                        notation
                    )))
                }
            },
            _ => match current.as_mut() {
                Some(cycle) => {
                    if !alphabet.contains(ch) {
                        return Err(EnigmaError::SymbolNotFound(ch));
                    }
                    cycle.push(ch);
                }
                None => {
                    return Err(EnigmaError::MalformedCycles(format!(
                        "symbol '{}' outside of a cycle in {:?}",
                        ch, notation
                    )))
                }
            },
        }
    }

    if current.is_some() {
        return Err(EnigmaError::MalformedCycles(format!(
            "unterminated cycle in {:?}",
            notation
        )));
    }
    Ok(cycles)
}
