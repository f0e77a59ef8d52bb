//! TUI (Terminal User Interface) module for word-assist
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `Board`: terminal-free editing state (recorded guesses, the draft row,
//!   the marking cursor, keyboard hints, candidates) and key handling
//! - `TuiInterface`: owns the terminal, renders the `Board` and implements
//!   `GameInterface` for the session loop
//!
//! The draft row is always editable: letters type, tiles cycle through
//! gray, yellow and green, and ENTER submits. A word missing from the list
//! stays on the row for correction.

use crate::draft::Draft;
use crate::filter::{Guess, KeyStates, SubmitOutcome, Verdict, WORD_LENGTH};
use crate::game_state::{CandidateReport, GameInterface, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const MAX_CANDIDATES_DISPLAY: usize = 120;
const CANDIDATE_COLUMNS: usize = 4;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

// Tile colors of the original puzzle
const ABSENT_COLOR: Color = Color::Rgb(0x78, 0x7C, 0x7E);
const PRESENT_COLOR: Color = Color::Rgb(0xC9, 0xB4, 0x58);
const CORRECT_COLOR: Color = Color::Rgb(0x6A, 0xAA, 0x64);

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const EMPTY_TILE_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

fn verdict_style(verdict: Verdict) -> Style {
    let background = match verdict {
        Verdict::Absent => ABSENT_COLOR,
        Verdict::Present => PRESENT_COLOR,
        Verdict::Correct => CORRECT_COLOR,
    };
    Style::new()
        .fg(Color::White)
        .bg(background)
        .add_modifier(Modifier::BOLD)
}

/// Editing state behind the screen.
#[derive(Debug)]
pub struct Board {
    rows: Vec<Guess>,
    draft: Draft,
    cursor: usize,
    key_states: KeyStates,
    candidates: Option<CandidateReport>,
    word_count: usize,
    message: String,
    error_message: String,
    status: String,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            draft: Draft::new(),
            cursor: 0,
            key_states: KeyStates::default(),
            candidates: None,
            word_count: 0,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        }
    }
}

impl Board {
    #[must_use]
    pub fn rows(&self) -> &[Guess] {
        &self.rows
    }

    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    #[must_use]
    pub fn candidates(&self) -> Option<&CandidateReport> {
        self.candidates.as_ref()
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Apply one key press. Returns an action for the session loop when the
    /// key asks for one.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != KeyEventKind::Press {
            debug_log!("handle_key() - Ignoring non-Press key event: {:?}", key.kind);
            return None;
        }

        // Garbage from terminal focus changes shows up as replacement or control characters
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || c.is_control())
        {
            debug_log!("handle_key() - Ignoring invalid character {:?}", c);
            return None;
        }

        self.error_message.clear();

        match key.code {
            KeyCode::Esc => {
                info_log!("handle_key() - ESC pressed, returning Exit");
                Some(UserAction::Exit)
            }
            KeyCode::Char('r' | 'R') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                info_log!("handle_key() - Ctrl-R pressed, returning Reset");
                Some(UserAction::Reset)
            }
            _ if Self::has_modifier_keys(&key) => {
                debug_log!("handle_key() - Ignoring key with modifier: {:?}", key.modifiers);
                None
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.draft.cycle(index);
                self.cursor = index;
                None
            }
            KeyCode::Char(' ') => {
                self.draft.cycle(self.cursor);
                None
            }
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if self.draft.push(c, &self.key_states) {
                    self.cursor = self.draft.len() - 1;
                    debug_log!("handle_key() - Draft now '{}'", self.draft.word());
                } else {
                    self.error_message = "Guess is already 5 letters!".to_string();
                }
                None
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                None
            }
            KeyCode::Backspace => {
                self.draft.pop();
                self.cursor = self.draft.len().saturating_sub(1);
                None
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(WORD_LENGTH - 1);
                None
            }
            KeyCode::Enter if self.draft.is_complete() => {
                info_log!("handle_key() - Submitting '{}'", self.draft.word());
                Some(UserAction::Submit {
                    word: self.draft.word(),
                    verdicts: self.draft.verdicts(),
                })
            }
            KeyCode::Enter => {
                self.error_message = "Guess must be exactly 5 letters!".to_string();
                None
            }
            _ => {
                debug_log!("handle_key() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }

    fn record(&mut self, guess: &Guess) {
        self.rows.push(guess.clone());
        self.draft.clear();
        self.cursor = 0;
        self.status = format!("Recorded {}", guess.word().to_uppercase());
    }

    fn reject(&mut self, word: &str, outcome: SubmitOutcome) {
        self.error_message = match outcome {
            SubmitOutcome::NotInDictionary => {
                format!("Not in word list: {}", word.to_uppercase())
            }
            SubmitOutcome::WrongLength => "Guess must be exactly 5 letters!".to_string(),
            SubmitOutcome::Accepted => String::new(),
        };
    }

    fn reset(&mut self, word_count: usize) {
        self.rows.clear();
        self.draft.clear();
        self.cursor = 0;
        self.key_states = KeyStates::default();
        self.candidates = None;
        self.word_count = word_count;
        self.error_message.clear();
        self.message = format!("Cleared. {word_count} words available.");
        self.status = "New session - Enter your first guess".to_string();
    }
}

/// Main TUI interface component.
///
/// Manages terminal rendering and input, and draws the `Board`.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    board: Board,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            board: Board::default(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current board to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let board = &self.board;
        self.terminal.draw(|f| render(f, board))?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(self.board.handle_key(key)),
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

fn render(f: &mut Frame, board: &Board) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Board and candidates
            Constraint::Length(5), // Keyboard
            Constraint::Length(3), // Status line
            Constraint::Length(3), // Instructions
        ])
        .split(f.area());

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(20)])
        .split(chunks[1]);

    render_title(f, chunks[0]);
    render_board(f, middle[0], board);
    render_candidates(f, middle[1], board);
    render_keyboard(f, chunks[2], &board.key_states);
    render_status(f, chunks[3], &board.status);
    render_instructions(f, chunks[4]);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("WORD ASSIST")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_board(f: &mut Frame, area: Rect, board: &Board) {
    let block = Block::default().title("Guesses").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Recorded rows plus the draft row; drop the oldest rows when they don't fit
    let available_rows = (inner.height / ROW_SPACING) as usize;
    let rows_needed = board.rows.len() + 1;
    let skip_count = rows_needed.saturating_sub(available_rows);

    let mut display_index = 0;
    for guess in board.rows.iter().skip(skip_count) {
        let spans = guess_spans(guess);
        render_line(f, inner, display_index, spans);
        display_index += 1;
    }
    render_line(f, inner, display_index, draft_spans(&board.draft, board.cursor));
}

fn guess_spans(guess: &Guess) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw("  ")];
    for (_, letter, verdict) in guess.marks() {
        spans.push(Span::styled(
            format!(" {} ", letter.to_ascii_uppercase()),
            verdict_style(verdict),
        ));
        spans.push(Span::raw(" "));
    }
    spans
}

fn draft_spans(draft: &Draft, cursor: usize) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw("  ")];
    for i in 0..WORD_LENGTH {
        let letter = draft.letters().get(i).map_or(' ', char::to_ascii_uppercase);
        let mut style = match draft.verdict(i) {
            Some(verdict) if i < draft.len() => verdict_style(verdict),
            _ => EMPTY_TILE_STYLE,
        };
        if i == cursor {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        spans.push(Span::styled(format!(" {letter} "), style));
        spans.push(Span::raw(" "));
    }
    spans
}

#[allow(clippy::cast_possible_truncation)]
fn render_line(f: &mut Frame, area: Rect, row_index: usize, spans: Vec<Span<'static>>) {
    let y = area.y + (row_index as u16 * ROW_SPACING);
    if y >= area.y + area.height {
        return;
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        },
    );
}

fn render_candidates(f: &mut Frame, area: Rect, board: &Board) {
    let mut lines = Vec::new();

    if let Some(report) = &board.candidates {
        lines.push(Line::from(vec![Span::styled(
            format!(
                "{} words - time {} ms",
                report.words.len(),
                report.elapsed.as_millis()
            ),
            INFO_STYLE,
        )]));
        let shown: Vec<String> = report
            .words
            .iter()
            .take(MAX_CANDIDATES_DISPLAY)
            .map(|w| w.to_uppercase())
            .collect();
        for chunk in shown.chunks(CANDIDATE_COLUMNS) {
            lines.push(Line::from(format!("  {}", chunk.join("  "))));
        }
        if report.words.len() > MAX_CANDIDATES_DISPLAY {
            lines.push(Line::from(format!(
                "  ... and {} more",
                report.words.len() - MAX_CANDIDATES_DISPLAY
            )));
        }
        if report.words.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                "No candidates remain. Check your inputs.",
                ERROR_STYLE,
            )]));
        }
        lines.push(Line::from(""));
    } else if board.word_count > 0 {
        lines.push(Line::from(format!("{} words loaded", board.word_count)));
        lines.push(Line::from(""));
    }

    if !board.message.is_empty() {
        lines.push(Line::from(vec![Span::styled(board.message.as_str(), MESSAGE_STYLE)]));
    }
    if !board.error_message.is_empty() {
        lines.push(Line::from(vec![Span::styled(
            board.error_message.as_str(),
            ERROR_STYLE,
        )]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Candidates").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_keyboard(f: &mut Frame, area: Rect, key_states: &KeyStates) {
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(row, keys)| {
            let mut spans = vec![Span::raw(" ".repeat(row + 1))];
            for key in keys.chars() {
                let style = key_states.get(key).map_or(EMPTY_TILE_STYLE, verdict_style);
                spans.push(Span::styled(format!(" {} ", key.to_ascii_uppercase()), style));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect();

    let paragraph =
        Paragraph::new(lines).block(Block::default().title("Keyboard").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect) {
    let text = "Type letters | 1-5 or SPACE: cycle tile | \u{2190}/\u{2192}: move | ENTER: Submit | Ctrl-R: Clear | ESC: Quit";
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let status_text = if status.is_empty() { "Ready" } else { status };
    let paragraph = Paragraph::new(status_text)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

impl GameInterface for TuiInterface {
    fn display_session_start(&mut self, word_count: usize) {
        self.board.word_count = word_count;
        self.board.message = format!("Loaded {word_count} words.");
        self.board.status = "Ready - Enter your first 5-letter guess".to_string();
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Error handling input: {}, returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_accepted(&mut self, guess: &Guess) {
        self.board.record(guess);
        self.draw_or_log();
    }

    fn display_rejected(&mut self, word: &str, outcome: SubmitOutcome) {
        self.board.reject(word, outcome);
        self.draw_or_log();
    }

    fn display_key_states(&mut self, key_states: &KeyStates) {
        self.board.key_states = key_states.clone();
    }

    fn display_candidates(&mut self, report: &CandidateReport) {
        self.board.message.clear();
        self.board.candidates = Some(report.clone());
        self.draw_or_log();
    }

    fn display_reset_message(&mut self, word_count: usize) {
        self.board.reset(word_count);
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.board.message = "Exiting...".to_string();
        self.board.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
