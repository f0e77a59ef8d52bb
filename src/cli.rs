use crate::draft::Draft;
use crate::filter::{Guess, KeyStates, SubmitOutcome, Verdict, WORD_LENGTH};
use crate::game_state::{CandidateReport, GameInterface, UserAction};
use crate::wordbank::WordbankSource;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

const MAX_CANDIDATES_DISPLAY: usize = 10;

/// Word puzzle assistant: mark your guesses, see the words that still fit
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list (defaults to the built-in list)
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Use the line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Write the log here instead of the user cache directory
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn wordbank_source(&self) -> WordbankSource {
        match &self.wordbank_path {
            Some(path) => WordbankSource::File(path.clone()),
            None => WordbankSource::Embedded,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

#[derive(Debug, PartialEq, Eq)]
pub enum GuessInput {
    Valid(String),
    Invalid,
    Exit,
    Reset,
}

#[derive(Debug, PartialEq, Eq)]
pub enum FeedbackInput {
    Verdicts([Verdict; WORD_LENGTH]),
    Invalid,
    Exit,
}

fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

fn parse_feedback(feedback: &str) -> Option<[Verdict; WORD_LENGTH]> {
    let verdicts: Vec<Verdict> = feedback
        .chars()
        .map(Verdict::from_char)
        .collect::<Option<_>>()?;
    verdicts.try_into().ok()
}

/// `None` at end of input or on a read error.
fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

pub fn read_guess<R: BufRead>(reader: &mut R) -> GuessInput {
    println!("\nEnter your guess (5 letters, or 'reset' to start over, or 'exit' to quit):");
    let Some(input) = read_trimmed_line(reader) else {
        return GuessInput::Exit;
    };
    let input = input.to_lowercase();

    match input.as_str() {
        "exit" | "quit" => GuessInput::Exit,
        "reset" | "next" => GuessInput::Reset,
        _ if is_valid_word(&input) => GuessInput::Valid(input),
        _ => {
            println!("Invalid guess. Please enter 5 letters.");
            GuessInput::Invalid
        }
    }
}

/// An empty line keeps the draft's verdicts.
pub fn read_feedback<R: BufRead>(reader: &mut R, draft: &Draft) -> FeedbackInput {
    println!(
        "Enter feedback (G=green, Y=yellow, X=gray, e.g. GYXXG) or press ENTER for {}:",
        format_verdicts(&draft.verdicts())
    );
    let Some(input) = read_trimmed_line(reader) else {
        return FeedbackInput::Exit;
    };

    if input.is_empty() {
        return FeedbackInput::Verdicts(draft.verdicts());
    }
    match parse_feedback(&input) {
        Some(verdicts) => FeedbackInput::Verdicts(verdicts),
        None => {
            println!("Invalid feedback. Please enter 5 characters using G, Y, or X.");
            FeedbackInput::Invalid
        }
    }
}

#[must_use]
pub fn format_verdicts(verdicts: &[Verdict]) -> String {
    verdicts.iter().map(|v| v.to_char()).collect()
}

/// Keyboard hints grouped by verdict, one line per non-empty group.
#[must_use]
pub fn format_key_states(key_states: &KeyStates) -> Vec<String> {
    [
        (Verdict::Correct, "Correct"),
        (Verdict::Present, "Present"),
        (Verdict::Absent, "Absent"),
    ]
    .iter()
    .filter_map(|&(verdict, label)| {
        let letters: Vec<String> = key_states
            .iter()
            .filter(|&(_, v)| v == verdict)
            .map(|(letter, _)| letter.to_ascii_uppercase().to_string())
            .collect();
        (!letters.is_empty()).then(|| format!("{label}: {}", letters.join(" ")))
    })
    .collect()
}

pub fn display_session_start(word_count: usize) {
    println!("Loaded {word_count} words.");
}

pub fn display_accepted(guess: &Guess) {
    println!(
        "Recorded {} [{}]",
        guess.word().to_uppercase(),
        format_verdicts(guess.verdicts())
    );
}

pub fn display_rejected(word: &str, outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::WrongLength => println!("Guess must be exactly 5 letters."),
        SubmitOutcome::NotInDictionary => {
            println!("'{}' is not in the word list.", word.to_uppercase());
        }
        SubmitOutcome::Accepted => {}
    }
}

pub fn display_key_states(key_states: &KeyStates) {
    for line in format_key_states(key_states) {
        println!("{line}");
    }
}

pub fn display_candidates(report: &CandidateReport) {
    println!(
        "Possible candidates ({}) - time {} ms",
        report.words.len(),
        report.elapsed.as_millis()
    );
    for word in report.words.iter().take(MAX_CANDIDATES_DISPLAY) {
        println!("{}", word.to_uppercase());
    }
    if report.words.len() > MAX_CANDIDATES_DISPLAY {
        println!("...and {} more", report.words.len() - MAX_CANDIDATES_DISPLAY);
    }
    if report.words.is_empty() {
        println!("No candidates remain. Check your inputs.");
    }
}

pub fn display_reset_message(word_count: usize) {
    println!("Cleared all guesses. {word_count} words available.");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// CLI implementation of the `GameInterface` trait.
///
/// Wraps a `BufRead` so tests can script the session with a `Cursor`.
pub struct CliInterface<R: BufRead> {
    reader: R,
    key_states: KeyStates,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            key_states: KeyStates::default(),
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_session_start(&mut self, word_count: usize) {
        display_session_start(word_count);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        let word = match read_guess(&mut self.reader) {
            GuessInput::Valid(word) => word,
            GuessInput::Exit => return Some(UserAction::Exit),
            GuessInput::Reset => return Some(UserAction::Reset),
            GuessInput::Invalid => return None,
        };

        let mut draft = Draft::new();
        for letter in word.chars() {
            draft.push(letter, &self.key_states);
        }

        match read_feedback(&mut self.reader, &draft) {
            FeedbackInput::Verdicts(verdicts) => Some(UserAction::Submit { word, verdicts }),
            FeedbackInput::Exit => Some(UserAction::Exit),
            FeedbackInput::Invalid => None,
        }
    }

    fn display_accepted(&mut self, guess: &Guess) {
        display_accepted(guess);
    }

    fn display_rejected(&mut self, word: &str, outcome: SubmitOutcome) {
        display_rejected(word, outcome);
    }

    fn display_key_states(&mut self, key_states: &KeyStates) {
        self.key_states = key_states.clone();
        display_key_states(key_states);
    }

    fn display_candidates(&mut self, report: &CandidateReport) {
        display_candidates(report);
    }

    fn display_reset_message(&mut self, word_count: usize) {
        self.key_states = KeyStates::default();
        display_reset_message(word_count);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use crate::filter::Verdict::{Absent, Correct, Present};

    #[test]
    fn test_parse_cli_no_args() {
        let cli = Cli::try_parse_from(["word-assist"]).unwrap();
        assert_eq!(cli.wordbank_path, None);
        assert!(!cli.plain);
        assert!(!cli.verbose);
        assert_eq!(cli.wordbank_source(), WordbankSource::Embedded);
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli = Cli::try_parse_from([
            "word-assist",
            "-i",
            "custom_words.txt",
            "--plain",
            "--log-file",
            "/tmp/wa.log",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.wordbank_path, Some(PathBuf::from("custom_words.txt")));
        assert!(cli.plain);
        assert!(cli.verbose);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/wa.log")));
        assert_eq!(
            cli.wordbank_source(),
            WordbankSource::File(PathBuf::from("custom_words.txt"))
        );
    }

    #[test]
    fn test_parse_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["word-assist", "--bogus"]).is_err());
    }

    #[test]
    fn test_is_valid_word() {
        assert!(is_valid_word("crane"));
        assert!(is_valid_word("AbCdE"));
        assert!(!is_valid_word("cran")); // Too short
        assert!(!is_valid_word("cranes")); // Too long
        assert!(!is_valid_word("cran3"));
        assert!(!is_valid_word("cran "));
        assert!(!is_valid_word(""));
    }

    #[test]
    fn test_parse_feedback() {
        assert_eq!(parse_feedback("GGGGG"), Some([Correct; WORD_LENGTH]));
        assert_eq!(
            parse_feedback("gyx.2"),
            Some([Correct, Present, Absent, Absent, Correct])
        );
        assert_eq!(parse_feedback("GGGG"), None);
        assert_eq!(parse_feedback("GGGGGG"), None);
        assert_eq!(parse_feedback("GGGGA"), None);
    }

    #[test]
    fn test_read_guess_variants() {
        assert_eq!(
            read_guess(&mut Cursor::new("CRANE\n")),
            GuessInput::Valid("crane".to_string())
        );
        assert_eq!(
            read_guess(&mut Cursor::new("  slate  \n")),
            GuessInput::Valid("slate".to_string())
        );
        assert_eq!(read_guess(&mut Cursor::new("EXIT\n")), GuessInput::Exit);
        assert_eq!(read_guess(&mut Cursor::new("reset\n")), GuessInput::Reset);
        assert_eq!(read_guess(&mut Cursor::new("next\n")), GuessInput::Reset);
        assert_eq!(read_guess(&mut Cursor::new("CRAN\n")), GuessInput::Invalid);
        assert_eq!(read_guess(&mut Cursor::new("CR4NE\n")), GuessInput::Invalid);
    }

    #[test]
    fn test_read_guess_end_of_input_exits() {
        assert_eq!(read_guess(&mut Cursor::new("")), GuessInput::Exit);
    }

    #[test]
    fn test_read_feedback_explicit() {
        let draft = Draft::new();
        assert_eq!(
            read_feedback(&mut Cursor::new("gyxxg\n"), &draft),
            FeedbackInput::Verdicts([Correct, Present, Absent, Absent, Correct])
        );
        assert_eq!(
            read_feedback(&mut Cursor::new("GGG\n"), &draft),
            FeedbackInput::Invalid
        );
        assert_eq!(read_feedback(&mut Cursor::new(""), &draft), FeedbackInput::Exit);
    }

    #[test]
    fn test_read_feedback_empty_line_uses_draft() {
        let mut draft = Draft::new();
        draft.set_verdict(1, Present);
        assert_eq!(
            read_feedback(&mut Cursor::new("\n"), &draft),
            FeedbackInput::Verdicts([Absent, Present, Absent, Absent, Absent])
        );
    }

    #[test]
    fn test_format_key_states_groups_letters() {
        let guess = Guess::new("crane", [Correct, Absent, Present, Absent, Absent]).unwrap();
        let lines = format_key_states(&KeyStates::derive(&[guess]));
        assert_eq!(
            lines,
            vec![
                "Correct: C".to_string(),
                "Present: A".to_string(),
                "Absent: E N R".to_string(),
            ]
        );
        assert!(format_key_states(&KeyStates::default()).is_empty());
    }

    #[test]
    fn test_cli_interface_prefills_from_hints() {
        let mut interface = CliInterface::new(Cursor::new("cater\n\n"));
        let guess = Guess::new("crane", [Correct, Absent, Present, Absent, Absent]).unwrap();
        interface.display_key_states(&KeyStates::derive(&[guess]));

        assert_eq!(
            interface.read_action(),
            Some(UserAction::Submit {
                word: "cater".to_string(),
                verdicts: [Correct, Present, Absent, Absent, Absent],
            })
        );
        assert_eq!(interface.read_action(), Some(UserAction::Exit));
    }

    #[test]
    fn test_cli_interface_invalid_feedback_asks_again() {
        let mut interface = CliInterface::new(Cursor::new("crane\nQQQQQ\n"));
        assert_eq!(interface.read_action(), None);
        assert_eq!(interface.read_action(), Some(UserAction::Exit));
    }
}
