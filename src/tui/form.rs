use crate::review::{ReviewError, ReviewOutcome, ReviewRunner};
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

pub const EMPTY_INPUT_ERROR: &str = "Please paste some code to review.";
pub const SUCCESS_BANNER: &str = "Review Generated!";

const PROCESSING_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const UI_POLL_INTERVAL: Duration = Duration::from_millis(60);
const SPINNER_TICK_INTERVAL: Duration = Duration::from_millis(120);
const CURSOR_BLINK_INTERVAL: Duration = Duration::from_millis(500);
const TAB_WIDTH: usize = 4;
const RESULT_PAGE_LINES: u16 = 10;

/// Blank or whitespace-only submissions never start a run.
pub fn validate_submission(input: &str) -> Result<&str, &'static str> {
    if input.trim().is_empty() {
        return Err(EMPTY_INPUT_ERROR);
    }
    Ok(input)
}

pub fn error_banner_text(err: &str) -> String {
    format!("An error occurred: {err}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Idle,
    InProgress,
    Success,
    Error(String),
}

struct ReviewWorker {
    result_rx: Receiver<Result<ReviewOutcome, ReviewError>>,
}

pub struct FormState {
    input: String,
    banner: Banner,
    result: Option<String>,
    result_scroll: u16,
    processing: Option<ReviewWorker>,
    spinner_index: usize,
    last_spinner_tick: Instant,
    cursor_visible: bool,
    last_cursor_tick: Instant,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            banner: Banner::Idle,
            result: None,
            result_scroll: 0,
            processing: None,
            spinner_index: 0,
            last_spinner_tick: Instant::now(),
            cursor_visible: true,
            last_cursor_tick: Instant::now(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn result_scroll(&self) -> u16 {
        self.result_scroll
    }

    pub fn is_processing(&self) -> bool {
        self.processing.is_some()
    }

    pub fn insert_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn insert_str(&mut self, text: &str) {
        self.input.push_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
    }

    pub fn insert_newline(&mut self) {
        self.input.push('\n');
    }

    pub fn insert_tab(&mut self) {
        self.input.push_str(&" ".repeat(TAB_WIDTH));
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Scroll offset stays within the result's line count.
    pub fn scroll_result_down(&mut self, lines: u16) {
        let total = self
            .result
            .as_deref()
            .map(|text| u16::try_from(text.lines().count()).unwrap_or(u16::MAX))
            .unwrap_or(0);
        self.result_scroll = self
            .result_scroll
            .saturating_add(lines)
            .min(total.saturating_sub(1));
    }

    pub fn scroll_result_up(&mut self, lines: u16) {
        self.result_scroll = self.result_scroll.saturating_sub(lines);
    }

    /// Maps one key event onto the form. Ctrl+S submits, Enter stays a newline.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.kind == KeyEventKind::Release {
            return FormAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => FormAction::Quit,
                KeyCode::Char('s') => match self.begin_submit() {
                    Some(code) => FormAction::Submit(code),
                    None => FormAction::None,
                },
                _ => FormAction::None,
            };
        }

        match key.code {
            KeyCode::Esc => return FormAction::Quit,
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Tab => self.insert_tab(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::PageDown => self.scroll_result_down(RESULT_PAGE_LINES),
            KeyCode::PageUp => self.scroll_result_up(RESULT_PAGE_LINES),
            KeyCode::Down => self.scroll_result_down(1),
            KeyCode::Up => self.scroll_result_up(1),
            KeyCode::Char(c) => self.insert_char(c),
            _ => {}
        }
        FormAction::None
    }

    /// Returns the code to review, or `None` when nothing should start.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.processing.is_some() {
            return None;
        }
        match validate_submission(&self.input) {
            Ok(code) => {
                let code = code.to_string();
                self.banner = Banner::InProgress;
                self.result = None;
                self.spinner_index = 0;
                self.last_spinner_tick = Instant::now();
                Some(code)
            }
            Err(message) => {
                self.banner = Banner::Error(message.to_string());
                None
            }
        }
    }

    fn attach_worker(&mut self, result_rx: Receiver<Result<ReviewOutcome, ReviewError>>) {
        self.processing = Some(ReviewWorker { result_rx });
    }

    pub fn finish(&mut self, result: Result<ReviewOutcome, String>) {
        self.processing = None;
        self.result_scroll = 0;
        match result {
            Ok(outcome) => {
                self.banner = Banner::Success;
                self.result = Some(outcome.state.code);
            }
            Err(err) => {
                self.banner = Banner::Error(error_banner_text(&err));
                self.result = None;
            }
        }
    }

    fn check_processing_result(&mut self) {
        let received = match self.processing.as_ref() {
            Some(worker) => worker.result_rx.try_recv(),
            None => return,
        };
        match received {
            Ok(result) => self.finish(result.map_err(|err| err.to_string())),
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.finish(Err("review worker stopped unexpectedly".to_string()));
            }
        }
    }

    fn spinner_frame(&self) -> &'static str {
        PROCESSING_FRAMES[self.spinner_index % PROCESSING_FRAMES.len()]
    }

    fn advance_spinner_if_needed(&mut self) {
        if self.processing.is_some() && self.last_spinner_tick.elapsed() >= SPINNER_TICK_INTERVAL {
            self.spinner_index = (self.spinner_index + 1) % PROCESSING_FRAMES.len();
            self.last_spinner_tick = Instant::now();
        }
    }

    fn advance_cursor_blink_if_needed(&mut self) {
        if self.last_cursor_tick.elapsed() >= CURSOR_BLINK_INTERVAL {
            self.cursor_visible = !self.cursor_visible;
            self.last_cursor_tick = Instant::now();
        }
    }

    fn cursor_suffix(&self) -> &'static str {
        if self.cursor_visible {
            "█"
        } else {
            " "
        }
    }

    pub fn status_line(&self) -> String {
        match &self.banner {
            Banner::Idle => "paste code, Ctrl+S to submit, PgUp/PgDn to scroll, Esc to quit".to_string(),
            Banner::Success if self.result_scroll > 0 => {
                format!("{SUCCESS_BANNER} (line {})", self.result_scroll + 1)
            }
            Banner::InProgress => format!("Generating review... {}", self.spinner_frame()),
            Banner::Success => SUCCESS_BANNER.to_string(),
            Banner::Error(message) => message.clone(),
        }
    }
}

pub fn run_review_form(runner: ReviewRunner) -> Result<(), String> {
    let mut terminal = setup_terminal()?;
    let mut state = FormState::new();

    let result = run_event_loop(&mut terminal, &runner, &mut state);
    teardown_terminal(&mut terminal)?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    runner: &ReviewRunner,
    state: &mut FormState,
) -> Result<(), String> {
    loop {
        state.advance_spinner_if_needed();
        state.advance_cursor_blink_if_needed();
        state.check_processing_result();
        draw_form(terminal, state)?;

        if !event::poll(UI_POLL_INTERVAL).map_err(|e| format!("failed to poll events: {e}"))? {
            continue;
        }

        let key = match event::read().map_err(|e| format!("failed to read event: {e}"))? {
            Event::Key(key) => key,
            Event::Paste(text) => {
                state.insert_str(&text);
                continue;
            }
            _ => continue,
        };

        match state.handle_key(key) {
            FormAction::Quit => break,
            FormAction::Submit(code) => spawn_review(runner, code, state),
            FormAction::None => {}
        }
    }

    Ok(())
}

fn spawn_review(runner: &ReviewRunner, code: String, state: &mut FormState) {
    let worker_runner = runner.clone();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = worker_runner.run(&code);
        let _ = tx.send(result);
    });
    state.attach_worker(rx);
}

/// Keeps the last input line in view. Line counts past `u16::MAX` saturate.
fn input_scroll_offset(input_text: &str, visible: u16) -> u16 {
    u16::try_from(input_text.lines().count().max(1))
        .unwrap_or(u16::MAX)
        .saturating_sub(visible)
}

fn draw_form<B: Backend>(terminal: &mut Terminal<B>, state: &FormState) -> Result<(), String> {
    terminal
        .draw(|frame| {
            let sections = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Min(8),
                    Constraint::Length(3),
                    Constraint::Min(6),
                ])
                .split(frame.area());

            let header = Paragraph::new(vec![
                Line::raw("Automated Code Peer Review"),
                Line::raw("Submit your code for an automated peer review using an open-source LLM."),
            ])
            .block(
                Block::default()
                    .title("peerflow")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
            frame.render_widget(header, sections[0]);

            let input_text = format!("{}{}", state.input, state.cursor_suffix());
            let input_scroll =
                input_scroll_offset(&input_text, sections[1].height.saturating_sub(2));
            let input_widget = Paragraph::new(input_text)
                .block(
                    Block::default()
                        .title("Paste your code here")
                        .borders(Borders::ALL),
                )
                .scroll((input_scroll, 0));
            frame.render_widget(input_widget, sections[1]);

            let banner_style = match state.banner {
                Banner::Idle => Style::default(),
                Banner::InProgress => Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
                Banner::Success => Style::default().fg(Color::Green),
                Banner::Error(_) => Style::default().fg(Color::Red),
            };
            let status_widget = Paragraph::new(state.status_line())
                .style(banner_style)
                .block(Block::default().title("Status").borders(Borders::ALL));
            frame.render_widget(status_widget, sections[2]);

            let result_widget = Paragraph::new(state.result.clone().unwrap_or_default())
                .block(
                    Block::default()
                        .title("Code Review Feedback")
                        .borders(Borders::ALL),
                )
                .wrap(Wrap { trim: false })
                .scroll((state.result_scroll, 0));
            frame.render_widget(result_widget, sections[3]);
        })
        .map_err(|e| format!("failed to render review form: {e}"))?;

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, String> {
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    enter_or_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableBracketedPaste, cursor::Hide)
                .map_err(|e| format!("failed to enter alternate screen: {e}"))?;
            Terminal::new(CrosstermBackend::new(stdout))
                .map_err(|e| format!("failed to initialize terminal: {e}"))
        },
        || {
            let mut stdout = io::stdout();
            let _ = execute!(
                stdout,
                DisableBracketedPaste,
                LeaveAlternateScreen,
                cursor::Show
            );
            let _ = disable_raw_mode();
        },
    )
}

/// Runs `restore` when `enter` fails, so raw mode never outlives a failed setup.
fn enter_or_restore<T>(
    enter: impl FnOnce() -> Result<T, String>,
    restore: impl FnOnce(),
) -> Result<T, String> {
    match enter() {
        Ok(value) => Ok(value),
        Err(err) => {
            restore();
            Err(err)
        }
    }
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), String> {
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen,
        cursor::Show
    )
    .map_err(|e| format!("failed to leave alternate screen: {e}"))?;
    terminal
        .show_cursor()
        .map_err(|e| format!("failed to restore cursor: {e}"))?;
    Ok(())
}
