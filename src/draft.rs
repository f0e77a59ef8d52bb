//! The guess being typed, before it is submitted.

use crate::filter::{KeyStates, Verdict, WORD_LENGTH};

/// Up to [`WORD_LENGTH`] letters with one verdict slot per position.
///
/// Verdict slots outlive the letters typed over them: deleting a letter
/// keeps the slot's verdict, and typing a letter only overwrites it when
/// the keyboard already knows a verdict for that letter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    letters: Vec<char>,
    verdicts: [Verdict; WORD_LENGTH],
}

impl Draft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a letter, prefilling its verdict from the keyboard hints.
    /// Returns false if the draft is full or `letter` is not ASCII alphabetic.
    pub fn push(&mut self, letter: char, hints: &KeyStates) -> bool {
        if self.is_complete() || !letter.is_ascii_alphabetic() {
            return false;
        }
        let letter = letter.to_ascii_lowercase();
        if let Some(verdict) = hints.get(letter) {
            self.verdicts[self.letters.len()] = verdict;
        }
        self.letters.push(letter);
        true
    }

    pub fn pop(&mut self) -> Option<char> {
        self.letters.pop()
    }

    /// Out-of-range indexes are ignored.
    pub fn cycle(&mut self, index: usize) {
        if let Some(verdict) = self.verdicts.get_mut(index) {
            *verdict = verdict.cycle();
        }
    }

    pub fn set_verdict(&mut self, index: usize, verdict: Verdict) {
        if let Some(slot) = self.verdicts.get_mut(index) {
            *slot = verdict;
        }
    }

    #[must_use]
    pub fn verdict(&self, index: usize) -> Option<Verdict> {
        self.verdicts.get(index).copied()
    }

    #[must_use]
    pub fn verdicts(&self) -> [Verdict; WORD_LENGTH] {
        self.verdicts
    }

    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    #[must_use]
    pub fn word(&self) -> String {
        self.letters.iter().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.letters.len() == WORD_LENGTH
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Guess;

    fn hints(word: &str, verdicts: [Verdict; WORD_LENGTH]) -> KeyStates {
        KeyStates::derive(&[Guess::new(word, verdicts).unwrap()])
    }

    #[test]
    fn test_push_until_full() {
        let mut draft = Draft::new();
        for c in "CRANES".chars() {
            draft.push(c, &KeyStates::default());
        }
        assert_eq!(draft.word(), "crane");
        assert!(draft.is_complete());
        assert!(!draft.push('x', &KeyStates::default()));
    }

    #[test]
    fn test_push_rejects_non_letters() {
        let mut draft = Draft::new();
        assert!(!draft.push('3', &KeyStates::default()));
        assert!(!draft.push(' ', &KeyStates::default()));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_default_verdicts_are_absent() {
        let draft = Draft::new();
        assert_eq!(draft.verdicts(), [Verdict::Absent; WORD_LENGTH]);
    }

    #[test]
    fn test_push_prefills_from_hints() {
        let keys = hints(
            "crane",
            [
                Verdict::Correct,
                Verdict::Absent,
                Verdict::Present,
                Verdict::Absent,
                Verdict::Absent,
            ],
        );
        let mut draft = Draft::new();
        draft.push('a', &keys);
        draft.push('c', &keys);
        draft.push('t', &keys);
        assert_eq!(draft.verdict(0), Some(Verdict::Present));
        assert_eq!(draft.verdict(1), Some(Verdict::Correct));
        assert_eq!(draft.verdict(2), Some(Verdict::Absent));
    }

    #[test]
    fn test_pop_keeps_slot_verdict() {
        let mut draft = Draft::new();
        draft.push('a', &KeyStates::default());
        draft.cycle(0);
        assert_eq!(draft.pop(), Some('a'));
        assert_eq!(draft.verdict(0), Some(Verdict::Present));

        // A letter with no hint leaves the slot alone
        draft.push('b', &KeyStates::default());
        assert_eq!(draft.verdict(0), Some(Verdict::Present));
    }

    #[test]
    fn test_cycle_and_set_verdict() {
        let mut draft = Draft::new();
        draft.cycle(2);
        draft.cycle(2);
        assert_eq!(draft.verdict(2), Some(Verdict::Correct));
        draft.cycle(2);
        assert_eq!(draft.verdict(2), Some(Verdict::Absent));

        draft.set_verdict(4, Verdict::Present);
        assert_eq!(draft.verdict(4), Some(Verdict::Present));

        draft.cycle(9);
        draft.set_verdict(9, Verdict::Correct);
        assert_eq!(draft.verdict(9), None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut draft = Draft::new();
        draft.push('a', &KeyStates::default());
        draft.cycle(0);
        draft.clear();
        assert!(draft.is_empty());
        assert_eq!(draft.verdicts(), [Verdict::Absent; WORD_LENGTH]);
    }
}
