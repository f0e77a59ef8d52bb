// Library interface for word-assist
// This allows integration tests to access internal modules

pub mod logging;

pub mod cli;
pub mod draft;
pub mod filter;
pub mod game_state;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use draft::Draft;
pub use filter::{
    ConstraintFilter, Constraints, Guess, KeyStates, SubmitOutcome, Verdict, WORD_LENGTH,
};
pub use game_state::{CandidateReport, GameInterface, UserAction, session_loop};
pub use wordbank::{Dictionary, WordbankSource, load_wordbank_from_file, load_wordbank_from_str};
