use crate::filter::WORD_LENGTH;
use crate::info_log;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words.txt");

/// Ordered list of valid words with a membership index.
///
/// Words are lowercase and exactly [`WORD_LENGTH`] ASCII letters. Anything
/// else is dropped on the way in, as are repeats of a word already present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
    index: HashSet<String>,
}

impl Dictionary {
    fn push_line(&mut self, line: &str) {
        let word = line.trim().to_lowercase();
        if word.len() != WORD_LENGTH || !word.chars().all(|c| c.is_ascii_lowercase()) {
            return;
        }
        if self.index.insert(word.clone()) {
            self.words.push(word);
        }
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut dictionary = Self::default();
        for line in iter {
            dictionary.push_line(line.as_ref());
        }
        dictionary
    }
}

impl From<Vec<String>> for Dictionary {
    fn from(words: Vec<String>) -> Self {
        words.into_iter().collect()
    }
}

pub fn load_wordbank_from_str(data: &str) -> Dictionary {
    data.lines().collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Dictionary> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut dictionary = Dictionary::default();
    for line in reader.lines() {
        dictionary.push_line(&line?);
    }
    Ok(dictionary)
}

/// Where the word list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordbankSource {
    Embedded,
    File(PathBuf),
}

impl WordbankSource {
    pub fn load(&self) -> io::Result<Dictionary> {
        let dictionary = match self {
            Self::Embedded => load_wordbank_from_str(EMBEDDED_WORDBANK),
            Self::File(path) => load_wordbank_from_file(path)?,
        };
        info_log!("Loaded {} words from {}", dictionary.len(), self);
        Ok(dictionary)
    }
}

impl fmt::Display for WordbankSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded word list"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the word list on a background thread.
///
/// The dictionary must not be used before [`join_load`] returns it.
pub fn spawn_load(source: WordbankSource) -> io::Result<JoinHandle<io::Result<Dictionary>>> {
    thread::Builder::new()
        .name("wordbank-loader".to_string())
        .spawn(move || source.load())
}

pub fn join_load(handle: JoinHandle<io::Result<Dictionary>>) -> io::Result<Dictionary> {
    handle
        .join()
        .map_err(|_| io::Error::other("word bank loader thread panicked"))?
}
