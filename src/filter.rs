//! Candidate filtering for the word-guessing puzzle.
//!
//! A session is an append-only log of scored guesses. Every query derives the
//! constraint sets from the whole log and scans the dictionary again.

use crate::wordbank::Dictionary;
use crate::{debug_log, info_log};
use std::collections::{BTreeMap, BTreeSet};

pub const WORD_LENGTH: usize = 5;

/// Judgment of one letter in one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Verdict {
    /// Not in the word (gray)
    #[default]
    Absent,
    /// In the word, wrong position (yellow)
    Present,
    /// In the word at this position (green)
    Correct,
}

impl Verdict {
    /// Parse a feedback character: G/2 = correct, Y/1 = present, X/B/0/. = absent.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' | '2' => Some(Self::Correct),
            'Y' | '1' => Some(Self::Present),
            'X' | 'B' | '0' | '.' => Some(Self::Absent),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }

    /// Next verdict in tile-tapping order: absent, present, correct, absent.
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::Absent => Self::Present,
            Self::Present => Self::Correct,
            Self::Correct => Self::Absent,
        }
    }
}

/// A submitted word with one verdict per letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    letters: [char; WORD_LENGTH],
    verdicts: [Verdict; WORD_LENGTH],
}

impl Guess {
    /// Returns `None` unless `word` is exactly [`WORD_LENGTH`] characters.
    /// The word is stored lowercase.
    #[must_use]
    pub fn new(word: &str, verdicts: [Verdict; WORD_LENGTH]) -> Option<Self> {
        let chars: Vec<char> = word.to_lowercase().chars().collect();
        let letters: [char; WORD_LENGTH] = chars.try_into().ok()?;
        Some(Self { letters, verdicts })
    }

    #[must_use]
    pub fn word(&self) -> String {
        self.letters.iter().collect()
    }

    #[must_use]
    pub fn letters(&self) -> &[char; WORD_LENGTH] {
        &self.letters
    }

    #[must_use]
    pub fn verdicts(&self) -> &[Verdict; WORD_LENGTH] {
        &self.verdicts
    }

    /// `(position, letter, verdict)` for each slot.
    pub fn marks(&self) -> impl Iterator<Item = (usize, char, Verdict)> + '_ {
        self.letters
            .iter()
            .zip(self.verdicts.iter())
            .enumerate()
            .map(|(i, (&letter, &verdict))| (i, letter, verdict))
    }
}

/// Constraint sets implied by a sequence of guesses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    /// Marked absent somewhere and never present or correct anywhere.
    pub absent: BTreeSet<char>,
    /// Every letter marked present or correct.
    pub known: BTreeSet<char>,
    /// Letter known to be in the word but not at this position.
    pub present_at: [Option<char>; WORD_LENGTH],
    /// Letter known to be at this position.
    pub correct_at: [Option<char>; WORD_LENGTH],
}

impl Constraints {
    /// Later guesses overwrite earlier ones at the same position in
    /// `present_at` and `correct_at`.
    #[must_use]
    pub fn derive(guesses: &[Guess]) -> Self {
        let mut constraints = Self::default();
        let mut marked_absent = BTreeSet::new();

        for guess in guesses {
            for (i, letter, verdict) in guess.marks() {
                match verdict {
                    Verdict::Correct => {
                        constraints.correct_at[i] = Some(letter);
                        constraints.known.insert(letter);
                    }
                    Verdict::Present => {
                        constraints.present_at[i] = Some(letter);
                        constraints.known.insert(letter);
                    }
                    Verdict::Absent => {
                        marked_absent.insert(letter);
                    }
                }
            }
        }

        // A duplicate letter can be gray in one slot and yellow/green in another.
        constraints.absent = marked_absent
            .difference(&constraints.known)
            .copied()
            .collect();
        constraints
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.absent.is_empty()
            && self.known.is_empty()
            && self.present_at.iter().all(Option::is_none)
            && self.correct_at.iter().all(Option::is_none)
    }

    /// Whether `word` is consistent with every constraint.
    #[must_use]
    pub fn admits(&self, word: &str) -> bool {
        let letters: Vec<char> = word.chars().collect();
        if letters.len() != WORD_LENGTH {
            return false;
        }

        if letters.iter().any(|c| self.absent.contains(c)) {
            return false;
        }

        if !self.known.iter().all(|c| letters.contains(c)) {
            return false;
        }

        let present_ok = self.present_at.iter().enumerate().all(|(i, slot)| match slot {
            Some(letter) => letters.contains(letter) && letters[i] != *letter,
            None => true,
        });
        if !present_ok {
            return false;
        }

        self.correct_at.iter().enumerate().all(|(i, slot)| match slot {
            Some(letter) => letters[i] == *letter,
            None => true,
        })
    }
}

/// Per-letter verdicts for coloring a keyboard.
///
/// The most recently submitted verdict for a letter wins, even when an
/// earlier guess marked it more strongly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyStates(BTreeMap<char, Verdict>);

impl KeyStates {
    #[must_use]
    pub fn derive(guesses: &[Guess]) -> Self {
        let mut states = BTreeMap::new();
        for guess in guesses {
            for (_, letter, verdict) in guess.marks() {
                states.insert(letter, verdict);
            }
        }
        Self(states)
    }

    #[must_use]
    pub fn get(&self, letter: char) -> Option<Verdict> {
        self.0.get(&letter.to_ascii_lowercase()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Verdict)> + '_ {
        self.0.iter().map(|(&letter, &verdict)| (letter, verdict))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of [`ConstraintFilter::submit_guess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    WrongLength,
    NotInDictionary,
}

/// Session state: the loaded dictionary and the guesses recorded so far.
#[derive(Debug, Clone, Default)]
pub struct ConstraintFilter {
    dictionary: Dictionary,
    guesses: Vec<Guess>,
}

impl ConstraintFilter {
    #[must_use]
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            guesses: Vec::new(),
        }
    }

    /// Publish a dictionary that finished loading after the filter was built.
    pub fn install_dictionary(&mut self, dictionary: Dictionary) {
        info_log!("Installed dictionary with {} words", dictionary.len());
        self.dictionary = dictionary;
    }

    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    #[must_use]
    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    /// Record a scored guess. Words of the wrong length or missing from the
    /// dictionary are ignored and leave the session unchanged.
    pub fn submit_guess(&mut self, word: &str, verdicts: [Verdict; WORD_LENGTH]) -> SubmitOutcome {
        let Some(guess) = Guess::new(word, verdicts) else {
            debug_log!("submit_guess() - '{}' is not {} letters", word, WORD_LENGTH);
            return SubmitOutcome::WrongLength;
        };

        if !self.dictionary.contains(&guess.word()) {
            debug_log!("submit_guess() - '{}' is not in the dictionary", word);
            return SubmitOutcome::NotInDictionary;
        }

        info_log!("submit_guess() - Recorded guess #{}: {:?}", self.guesses.len() + 1, guess);
        self.guesses.push(guess);
        SubmitOutcome::Accepted
    }

    #[must_use]
    pub fn constraints(&self) -> Constraints {
        Constraints::derive(&self.guesses)
    }

    #[must_use]
    pub fn key_states(&self) -> KeyStates {
        KeyStates::derive(&self.guesses)
    }

    /// Dictionary words consistent with every guess, in dictionary order.
    #[must_use]
    pub fn compute_candidates(&self) -> Vec<String> {
        let constraints = self.constraints();
        debug_log!("compute_candidates() - Constraints: {:?}", constraints);
        self.dictionary
            .iter()
            .filter(|word| constraints.admits(word))
            .map(str::to_string)
            .collect()
    }

    pub fn reset(&mut self) {
        info_log!("reset() - Clearing {} guesses", self.guesses.len());
        self.guesses.clear();
    }
}
