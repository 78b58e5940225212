//! TUI rendering and terminal management (impure shell)

pub mod log_list;
pub mod search_input;
pub mod status_bar;
pub mod styles;

pub use log_list::LogList;
pub use search_input::SearchInput;
pub use status_bar::{StatusBar, TailIndicator};
pub use styles::{ColorConfig, LogStyles};

use crate::config::keybindings::KeyBindings;
use crate::model::{AppError, KeyAction};
use crate::state::{HostEvent, Session};
use crate::view_state::ViewportDimensions;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Position, Rect},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Rows scrolled per mouse wheel notch.
pub const WHEEL_ROWS: usize = 3;

/// Draw one frame: the entry list above a one-row status bar or search
/// prompt. Returns the list area.
pub fn render(frame: &mut Frame<'_>, session: &mut Session, styles: &LogStyles) -> Rect {
    let [list, bottom] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    session.plan(ViewportDimensions::new(list.width, list.height));
    frame.render_widget(LogList::new(session, styles), list);
    if session.search().is_typing() {
        frame.render_widget(SearchInput::new(session.search(), styles), bottom);
    } else {
        frame.render_widget(StatusBar::new(session, styles), bottom);
    }
    list
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    session: Session,
    key_bindings: KeyBindings,
    styles: LogStyles,
    tick: Duration,
    /// Last rendered list area (for click hit testing)
    list_area: Rect,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create the application on the real terminal
    ///
    /// Sets up terminal in raw mode with alternate screen, mouse capture and
    /// focus reporting.
    pub fn new(session: Session, tick: Duration) -> Result<Self, AppError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        stdout.execute(EnableFocusChange)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, session, tick))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Waits for terminal events up to the next
    /// tick; each tick polls the file and redraws only if something changed.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.draw()?;
        let mut last_tick = Instant::now();

        loop {
            let timeout = self.tick.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                let redraw = match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        true
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                        self.session.handle_host_event(HostEvent::Resize {
                            width,
                            height: height.saturating_sub(1),
                        })
                    }
                    Event::FocusLost => self.session.handle_host_event(HostEvent::FocusLost),
                    Event::FocusGained => self.session.handle_host_event(HostEvent::FocusGained),
                    _ => false,
                };
                if redraw {
                    self.draw()?;
                }
            }

            if last_tick.elapsed() >= self.tick {
                last_tick = Instant::now();
                if self.session.handle_host_event(HostEvent::Tick) {
                    self.draw()?;
                }
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Create the application on an existing terminal.
    pub fn with_terminal(terminal: Terminal<B>, session: Session, tick: Duration) -> Self {
        Self {
            terminal,
            session,
            key_bindings: KeyBindings::default(),
            styles: LogStyles::new(),
            tick,
            list_area: Rect::default(),
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        // Ctrl+C always quits, even while typing a query
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.session.search().is_typing() {
            match key.code {
                KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.session.search_insert(ch);
                    return false;
                }
                KeyCode::Backspace => {
                    self.session.search_backspace();
                    return false;
                }
                KeyCode::Left => {
                    self.session.search_cursor_left();
                    return false;
                }
                KeyCode::Right => {
                    self.session.search_cursor_right();
                    return false;
                }
                KeyCode::Enter => {
                    self.session.search_submit();
                    return false;
                }
                KeyCode::Esc => {
                    self.session.search_cancel();
                    return false;
                }
                _ => {} // Fall through to key binding dispatch
            }
        } else if key.code == KeyCode::Esc {
            self.session.search_cancel();
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::ScrollUp => self.session.scroll_up(1),
            KeyAction::ScrollDown => self.session.scroll_down(1),
            KeyAction::PageUp => self.session.page_up(),
            KeyAction::PageDown => self.session.page_down(),
            KeyAction::ScrollToTop => self.session.scroll_to_top(),
            KeyAction::JumpToTail => self.session.jump_to_tail(),
            KeyAction::ToggleTail => self.session.toggle_tail(),
            KeyAction::NextEntry => self.session.focus_next(),
            KeyAction::PrevEntry => self.session.focus_prev(),
            KeyAction::ToggleExpand => self.session.toggle_focused(),
            KeyAction::ToggleExpandAll => self.session.toggle_expand_all(),
            KeyAction::StartSearch => self.session.start_search(),
            KeyAction::Clear => self.session.clear(),
            KeyAction::CopyVisible => {
                if let Err(err) = self.session.copy_visible() {
                    warn!(error = %err, "Copy failed");
                }
            }
        }
        false
    }

    /// Handle a mouse event. Returns true if a redraw is due.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.session.wheel_up(WHEEL_ROWS);
                true
            }
            MouseEventKind::ScrollDown => {
                self.session.wheel_down(WHEEL_ROWS);
                true
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let position = Position::new(mouse.column, mouse.row);
                self.list_area.contains(position)
                    && self
                        .session
                        .click(usize::from(mouse.row - self.list_area.y))
            }
            _ => false,
        }
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), AppError> {
        let session = &mut self.session;
        let styles = &self.styles;
        let mut list_area = Rect::default();
        self.terminal.draw(|frame| {
            list_area = render(frame, session, styles);
        })?;
        self.list_area = list_area;
        Ok(())
    }

    /// The session being shown.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The terminal, for inspecting a test backend.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(session: Session, tick: Duration) -> Result<(), AppError> {
    let result = TuiApp::new(session, tick).and_then(|mut app| app.run());

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture and focus reporting, and leaves the
/// alternate screen
fn restore_terminal() -> Result<(), AppError> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(DisableFocusChange)?;
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
