//! Terminal front end: renders both forms and drives the controller.

mod app;
mod ui;

pub use app::{Action, AlertQueue, App, Field};

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::controller::ScraperController;

pub async fn run(controller: ScraperController, alerts: Arc<AlertQueue>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new(controller, alerts);
    let result = event_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        let state = app.controller.snapshot();
        terminal.draw(|f| ui::render(f, app, &state))?;

        // Poll with a short timeout so spawned requests show up as they settle.
        if !event::poll(Duration::from_millis(100))? {
            tokio::task::yield_now().await;
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            Some(Action::Quit) => return Ok(()),
            Some(Action::Scrape) => {
                let controller = app.controller.clone();
                tokio::spawn(async move { controller.trigger_scrape().await });
            }
            Some(Action::Parse) => {
                let controller = app.controller.clone();
                tokio::spawn(async move { controller.trigger_parse().await });
            }
            None => {}
        }
    }
}
