//! Vocabulary loading and interning.
//!
//! A word list file holds one candidate word per line. Loading trims
//! whitespace, drops blank lines, upper-cases every entry, then sorts and
//! deduplicates. Each surviving word is interned under a [`WordId`] (its
//! index in the sorted list), and the rest of the crate works on ids: domains
//! and assignments store ids, and id order is the deterministic value order
//! used for tie-breaking.

use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;
use std::io::{self, BufRead};
use std::path::Path;

/// Index of an interned word in its [`WordList`].
pub type WordId = usize;

/// Inline capacity of a word's cached letter buffer; longer words spill to
/// the heap.
const INLINE_LETTERS: usize = 16;

/// An interned vocabulary word with its letters cached for O(1) access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    letters: SmallVec<[char; INLINE_LETTERS]>,
}

impl Word {
    fn new(text: String) -> Self {
        let letters = text.chars().collect();
        Self { text, letters }
    }

    /// Length in letters (not bytes).
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// The letter at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the end of the word.
    #[must_use]
    pub fn letter(&self, index: usize) -> char {
        self.letters[index]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// The interned vocabulary: sorted, deduplicated, upper-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<Word>,
}

impl WordList {
    /// Builds a word list from any iterator of strings.
    pub fn new<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .sorted()
            .dedup()
            .map(Word::new)
            .collect_vec();
        Self { words }
    }

    /// Reads a word list from a `BufRead` source, one word per line.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be read.
    pub fn parse_words<R: BufRead>(reader: R) -> io::Result<Self> {
        let lines: Vec<String> = reader.lines().collect::<io::Result<_>>()?;
        Ok(Self::new(lines))
    }

    /// Reads the word list file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::parse_words(io::BufReader::new(file))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The interned word behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not an id handed out by this list.
    #[must_use]
    pub fn get(&self, id: WordId) -> &Word {
        &self.words[id]
    }

    /// Looks up the id of `text` (matched after trimming and upper-casing).
    #[must_use]
    pub fn id_of(&self, text: &str) -> Option<WordId> {
        let needle = text.trim().to_uppercase();
        self.words
            .binary_search_by(|w| w.text.as_str().cmp(needle.as_str()))
            .ok()
    }

    /// Every id in this list, in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = WordId> {
        0..self.words.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, &Word)> {
        self.words.iter().enumerate()
    }
}
