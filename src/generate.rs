//! Bounded language enumeration
//!
//! Produces every string over an alphabet for lengths `1..=max_size`, with
//! repetition. Within one length, strings follow the lexicographic order
//! induced by the alphabet's order, the last position varying fastest.

use ahash::RandomState;
use hashbrown::HashSet;
use log::debug;

use crate::error::{Error, Result};

/// An ordered set of symbols
///
/// Symbols keep the order of their first occurrence; later duplicates are
/// dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<String>,
}

impl Alphabet {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: HashSet<String, RandomState> = HashSet::with_hasher(RandomState::new());
        let mut unique = Vec::new();

        for symbol in symbols {
            let symbol = symbol.into();
            if seen.insert(symbol.clone()) {
                unique.push(symbol);
            }
        }

        Self { symbols: unique }
    }

    /// One symbol per character of `chars`
    pub fn from_chars(chars: &str) -> Self {
        Self::new(chars.chars().map(String::from))
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Alphabet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Number of strings of length `1..=max_size` over `alphabet_len` symbols
///
/// Returns `None` if the count overflows `usize`.
pub fn language_size(alphabet_len: usize, max_size: usize) -> Option<usize> {
    match alphabet_len {
        0 => return Some(0),
        1 => return Some(max_size),
        _ => {}
    }

    // Two or more symbols overflow within usize::BITS iterations
    let mut total: usize = 0;
    let mut power: usize = 1;

    for _ in 0..max_size {
        power = power.checked_mul(alphabet_len)?;
        total = total.checked_add(power)?;
    }

    Some(total)
}

/// Size of the language, or `Error::TooLarge` if it exceeds `limit`
pub fn checked_language_size(alphabet: &Alphabet, max_size: usize, limit: usize) -> Result<usize> {
    match language_size(alphabet.len(), max_size) {
        Some(n) if n <= limit => Ok(n),
        _ => Err(Error::TooLarge {
            alphabet: alphabet.len(),
            max_size,
        }),
    }
}

/// Lazy enumerator over a bounded language
pub struct StringGenerator<'a> {
    alphabet: &'a Alphabet,
    max_size: usize,
    /// Symbol index per position of the next string; empty when exhausted
    indices: Vec<usize>,
    remaining: Option<usize>,
}

impl<'a> StringGenerator<'a> {
    pub fn new(alphabet: &'a Alphabet, max_size: usize) -> Self {
        let indices = if alphabet.is_empty() || max_size == 0 {
            Vec::new()
        } else {
            vec![0]
        };

        Self {
            alphabet,
            max_size,
            indices,
            remaining: language_size(alphabet.len(), max_size),
        }
    }

    fn advance(&mut self) {
        let base = self.alphabet.len();

        for position in (0..self.indices.len()).rev() {
            self.indices[position] += 1;
            if self.indices[position] < base {
                return;
            }
            self.indices[position] = 0;
        }

        // Every position wrapped: move on to the next length
        if self.indices.len() < self.max_size {
            self.indices.push(0);
        } else {
            self.indices.clear();
        }
    }
}

impl Iterator for StringGenerator<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.indices.is_empty() {
            return None;
        }

        let symbols = self.alphabet.symbols();
        let string: String = self.indices.iter().map(|&i| symbols[i].as_str()).collect();

        self.advance();
        if let Some(ref mut remaining) = self.remaining {
            *remaining = remaining.saturating_sub(1);
        }

        Some(string)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

/// Enumerate all strings over `alphabet` of length 1 up to `max_size`
pub fn generate_strings(alphabet: &Alphabet, max_size: usize) -> Vec<String> {
    debug!(
        "Enumerating {} symbols up to length {} ({:?} strings)",
        alphabet.len(),
        max_size,
        language_size(alphabet.len(), max_size)
    );

    StringGenerator::new(alphabet, max_size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_symbols_length_two() {
        let alphabet = Alphabet::from_chars("ab");
        let strings = generate_strings(&alphabet, 2);

        assert_eq!(strings, vec!["a", "b", "aa", "ab", "ba", "bb"]);
    }

    #[test]
    fn test_empty_alphabet() {
        let alphabet = Alphabet::default();

        assert!(generate_strings(&alphabet, 0).is_empty());
        assert!(generate_strings(&alphabet, 3).is_empty());
    }

    #[test]
    fn test_zero_max_size() {
        let alphabet = Alphabet::from_chars("xyz");
        assert!(generate_strings(&alphabet, 0).is_empty());
    }

    #[test]
    fn test_output_length_matches_sum() {
        for (symbols, max_size) in [("a", 4), ("ab", 3), ("abc", 4), ("0123456789", 3)] {
            let alphabet = Alphabet::from_chars(symbols);
            let expected: usize = (1..=max_size as u32).map(|i| symbols.len().pow(i)).sum();

            assert_eq!(generate_strings(&alphabet, max_size).len(), expected);
            assert_eq!(language_size(alphabet.len(), max_size), Some(expected));
        }
    }

    #[test]
    fn test_multi_character_symbols() {
        let alphabet = Alphabet::new(["ab", "c"]);
        let strings = generate_strings(&alphabet, 2);

        assert_eq!(strings, vec!["ab", "c", "abab", "abc", "cab", "cc"]);
    }

    #[test]
    fn test_alphabet_dedup_keeps_first_order() {
        let alphabet = Alphabet::new(["b", "a", "b", "c", "a"]);
        assert_eq!(alphabet.symbols(), &["b", "a", "c"]);
        assert_eq!(alphabet.len(), 3);

        let strings = generate_strings(&alphabet, 1);
        assert_eq!(strings, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_lengths_are_grouped() {
        let alphabet = Alphabet::from_chars("abc");
        let lengths: Vec<usize> = generate_strings(&alphabet, 3).iter().map(String::len).collect();

        assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_size_hint_is_exact() {
        let alphabet = Alphabet::from_chars("ab");
        let mut generator = StringGenerator::new(&alphabet, 2);

        assert_eq!(generator.size_hint(), (6, Some(6)));
        generator.next();
        assert_eq!(generator.size_hint(), (5, Some(5)));
    }

    #[test]
    fn test_language_size_overflow() {
        assert_eq!(language_size(2, 0), Some(0));
        assert_eq!(language_size(0, 10), Some(0));
        assert_eq!(language_size(1, 5), Some(5));
        assert_eq!(language_size(10, 100), None);
    }

    #[test]
    fn test_language_size_large_max_size() {
        assert_eq!(language_size(1, usize::MAX), Some(usize::MAX));
        assert_eq!(language_size(0, usize::MAX), Some(0));
        assert_eq!(language_size(2, usize::MAX), None);

        let alphabet = Alphabet::from_chars("a");
        assert!(matches!(
            checked_language_size(&alphabet, usize::MAX, 100),
            Err(Error::TooLarge { alphabet: 1, .. })
        ));
        assert_eq!(StringGenerator::new(&alphabet, usize::MAX).size_hint().1, Some(usize::MAX));
    }

    #[test]
    fn test_matches_nested_loop_product() {
        let symbols = ["a", "b", "c"];
        let mut expected: Vec<String> = Vec::new();
        expected.extend(symbols.iter().map(|s| s.to_string()));
        for x in symbols {
            for y in symbols {
                expected.push(format!("{x}{y}"));
            }
        }
        for x in symbols {
            for y in symbols {
                for z in symbols {
                    expected.push(format!("{x}{y}{z}"));
                }
            }
        }

        let strings = generate_strings(&Alphabet::from_chars("abc"), 3);
        assert_eq!(strings.len(), 39);
        assert_eq!(strings, expected);
    }

    #[test]
    fn test_checked_language_size() {
        let alphabet = Alphabet::from_chars("ab");

        assert_eq!(checked_language_size(&alphabet, 3, 14).unwrap(), 14);
        assert!(matches!(
            checked_language_size(&alphabet, 3, 13),
            Err(Error::TooLarge { alphabet: 2, max_size: 3 })
        ));
        assert!(checked_language_size(&alphabet, 200, usize::MAX).is_err());
    }
}
