use crate::filter::{ConstraintFilter, Guess, KeyStates, SubmitOutcome, Verdict, WORD_LENGTH};
use crate::{debug_log, info_log};
use std::time::{Duration, Instant};

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Submit {
        word: String,
        verdicts: [Verdict; WORD_LENGTH],
    },
    Reset,
    Exit,
}

/// Candidates left after the latest guess and how long the scan took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateReport {
    pub words: Vec<String>,
    pub elapsed: Duration,
}

/// A front end that can drive a session.
pub trait GameInterface {
    fn display_session_start(&mut self, word_count: usize);

    /// `None` means nothing actionable was entered; the loop asks again.
    /// Implementations must return `Some(UserAction::Exit)` once input ends.
    fn read_action(&mut self) -> Option<UserAction>;

    fn display_accepted(&mut self, guess: &Guess);

    fn display_rejected(&mut self, word: &str, outcome: SubmitOutcome);

    fn display_key_states(&mut self, key_states: &KeyStates);

    fn display_candidates(&mut self, report: &CandidateReport);

    fn display_reset_message(&mut self, word_count: usize);

    fn display_exit_message(&mut self);
}

pub fn session_loop<I: GameInterface + ?Sized>(filter: &mut ConstraintFilter, interface: &mut I) {
    interface.display_session_start(filter.dictionary().len());

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("session_loop() - Action: {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::Reset => {
                filter.reset();
                interface.display_reset_message(filter.dictionary().len());
            }
            UserAction::Submit { word, verdicts } => {
                submit(filter, interface, &word, verdicts);
            }
        }
    }
}

fn submit<I: GameInterface + ?Sized>(
    filter: &mut ConstraintFilter,
    interface: &mut I,
    word: &str,
    verdicts: [Verdict; WORD_LENGTH],
) {
    match filter.submit_guess(word, verdicts) {
        SubmitOutcome::Accepted => {
            if let Some(guess) = filter.guesses().last() {
                interface.display_accepted(guess);
            }
            interface.display_key_states(&filter.key_states());

            let started = Instant::now();
            let words = filter.compute_candidates();
            let report = CandidateReport {
                words,
                elapsed: started.elapsed(),
            };
            info_log!(
                "submit() - {} candidates after {} guesses ({:?})",
                report.words.len(),
                filter.guesses().len(),
                report.elapsed
            );
            interface.display_candidates(&report);
        }
        outcome => {
            debug_log!("submit() - '{}' rejected: {:?}", word, outcome);
            interface.display_rejected(word, outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::Dictionary;
    use std::collections::VecDeque;
    use crate::filter::Verdict::{Absent, Correct, Present};

    #[derive(Debug, PartialEq)]
    enum Event {
        Start(usize),
        Accepted(String),
        Rejected(String, SubmitOutcome),
        Keys(usize),
        Candidates(Vec<String>),
        Reset(usize),
        Exit,
    }

    /// Replays scripted actions and records what the loop displayed.
    struct ScriptedInterface {
        actions: VecDeque<Option<UserAction>>,
        events: Vec<Event>,
    }

    impl ScriptedInterface {
        fn new(actions: Vec<Option<UserAction>>) -> Self {
            Self {
                actions: actions.into(),
                events: Vec::new(),
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_session_start(&mut self, word_count: usize) {
            self.events.push(Event::Start(word_count));
        }

        fn read_action(&mut self) -> Option<UserAction> {
            self.actions.pop_front().unwrap_or(Some(UserAction::Exit))
        }

        fn display_accepted(&mut self, guess: &Guess) {
            self.events.push(Event::Accepted(guess.word()));
        }

        fn display_rejected(&mut self, word: &str, outcome: SubmitOutcome) {
            self.events.push(Event::Rejected(word.to_string(), outcome));
        }

        fn display_key_states(&mut self, key_states: &KeyStates) {
            self.events.push(Event::Keys(key_states.len()));
        }

        fn display_candidates(&mut self, report: &CandidateReport) {
            self.events.push(Event::Candidates(report.words.clone()));
        }

        fn display_reset_message(&mut self, word_count: usize) {
            self.events.push(Event::Reset(word_count));
        }

        fn display_exit_message(&mut self) {
            self.events.push(Event::Exit);
        }
    }

    fn submit_action(word: &str, verdicts: [Verdict; WORD_LENGTH]) -> Option<UserAction> {
        Some(UserAction::Submit {
            word: word.to_string(),
            verdicts,
        })
    }

    fn filter() -> ConstraintFilter {
        ConstraintFilter::new(Dictionary::from_iter(["crane", "slate", "trace", "crate"]))
    }

    #[test]
    fn test_immediate_exit() {
        let mut filter = filter();
        let mut interface = ScriptedInterface::new(vec![Some(UserAction::Exit)]);
        session_loop(&mut filter, &mut interface);
        assert_eq!(interface.events, vec![Event::Start(4), Event::Exit]);
    }

    #[test]
    fn test_accepted_guess_reports_candidates() {
        let mut filter = filter();
        let mut interface = ScriptedInterface::new(vec![
            None,
            submit_action("slate", [Absent, Absent, Correct, Present, Correct]),
        ]);
        session_loop(&mut filter, &mut interface);

        assert_eq!(
            interface.events,
            vec![
                Event::Start(4),
                Event::Accepted("slate".to_string()),
                Event::Keys(5),
                Event::Candidates(vec!["trace".to_string()]),
                Event::Exit,
            ]
        );
        assert_eq!(filter.guesses().len(), 1);
    }

    #[test]
    fn test_rejected_guess_is_not_recorded() {
        let mut filter = filter();
        let mut interface = ScriptedInterface::new(vec![
            submit_action("zzzzz", [Correct; WORD_LENGTH]),
            submit_action("cran", [Correct; WORD_LENGTH]),
        ]);
        session_loop(&mut filter, &mut interface);

        assert_eq!(
            interface.events,
            vec![
                Event::Start(4),
                Event::Rejected("zzzzz".to_string(), SubmitOutcome::NotInDictionary),
                Event::Rejected("cran".to_string(), SubmitOutcome::WrongLength),
                Event::Exit,
            ]
        );
        assert!(filter.guesses().is_empty());
    }

    #[test]
    fn test_reset_clears_session() {
        let mut filter = filter();
        let mut interface = ScriptedInterface::new(vec![
            submit_action("crane", [Absent; WORD_LENGTH]),
            Some(UserAction::Reset),
            submit_action("crane", [Correct; WORD_LENGTH]),
        ]);
        session_loop(&mut filter, &mut interface);

        assert_eq!(interface.events[4], Event::Reset(4));
        assert_eq!(
            interface.events[7],
            Event::Candidates(vec!["crane".to_string()])
        );
        assert_eq!(filter.guesses().len(), 1);
    }
}
