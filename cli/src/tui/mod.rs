pub mod app;
pub mod ui;

use std::{io, time::Duration};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use bikeshare_core::{DashboardUseCase, DateRange};

use crate::tui::app::App;

const WEEK: i64 = 7;
const MONTH: i64 = 30;

/// `initial` is pulled inside the dataset's span; `None` opens on the full span.
pub fn run(usecase: &DashboardUseCase, initial: Option<DateRange>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(usecase, initial);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
                    KeyCode::Left | KeyCode::Char('h') => app.shift(-1),
                    KeyCode::Right | KeyCode::Char('l') => app.shift(1),
                    KeyCode::Down | KeyCode::Char('j') => app.shift(-WEEK),
                    KeyCode::Up | KeyCode::Char('k') => app.shift(WEEK),
                    KeyCode::PageDown => app.shift(-MONTH),
                    KeyCode::PageUp => app.shift(MONTH),
                    KeyCode::Char('r') => app.reset(),
                    _ => {}
                }
            }
        }
    }
}
