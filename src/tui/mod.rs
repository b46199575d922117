//! TUI module - Terminal dashboard with ratatui

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
};
use std::io::{stdout, Stdout};

use crate::db::KeyValueStore;
use crate::history::History;
use crate::records::PersonalRecords;
use crate::session::{Session, SessionRequest};
use crate::tracker::Tracker;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// App state for TUI
pub struct App<S> {
    tracker: Tracker<S>,
    request: SessionRequest,
    session: Option<Session>,
    history: History,
    prs: PersonalRecords,
    status: String,
    confirm_clear: bool,
    should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(tracker: Tracker<S>, request: SessionRequest) -> Self {
        let mut app = Self {
            tracker,
            request,
            session: None,
            history: History::default(),
            prs: PersonalRecords::default(),
            status: String::new(),
            confirm_clear: false,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }

        restore_terminal()?;
        Ok(())
    }

    fn refresh(&mut self) {
        self.session = self.tracker.pending_session();
        self.history = self.tracker.history();
        self.prs = self.tracker.prs();
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let hint = self.tracker.rotation_hint(self.request.days);
        let header = Paragraph::new(format!("FirstRep | {hint}"))
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        frame.render_widget(self.session_table(), chunks[1]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);
        frame.render_widget(self.history_list(), bottom[0]);
        frame.render_widget(self.pr_table(), bottom[1]);

        // Footer
        let footer_text = if self.confirm_clear {
            "Delete ALL history, PRs, rotation and chat? y: yes | any other key: cancel".to_string()
        } else if self.status.is_empty() {
            "q: quit | g: generate | d: discard | r: reset rotation | f: refresh | c: clear all"
                .to_string()
        } else {
            self.status.clone()
        };
        let footer = Paragraph::new(footer_text)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[3]);
    }

    fn session_table(&self) -> Table<'_> {
        let title = match &self.session {
            Some(s) => format!("Today's Workout ({} • Variation {})", s.split, s.variation_index + 1),
            None => "Today's Workout (press g)".to_string(),
        };

        let rows: Vec<Row> = self
            .session
            .iter()
            .flat_map(|s| &s.exercises)
            .map(|e| {
                Row::new(vec![
                    Cell::from(e.name.clone()),
                    Cell::from(format!("{} × {}", e.sets, e.rep_range)),
                    Cell::from(e.rest.rest.clone()),
                    Cell::from(e.alternatives.join(", ")),
                ])
            })
            .collect();

        Table::new(
            rows,
            [
                Constraint::Length(32),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Min(20),
            ],
        )
        .header(
            Row::new(vec!["Exercise", "Sets × Reps", "Rest", "Alternatives"])
                .style(Style::default().bold()),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
    }

    fn history_list(&self) -> List<'_> {
        let items: Vec<ListItem> = self
            .history
            .list()
            .iter()
            .map(|w| {
                let logged = w.exercises.iter().filter(|e| e.has_entry()).count();
                ListItem::new(format!(
                    "{} | {:5} | var {} | {}/{} logged | {}",
                    w.created_at.format("%Y-%m-%d"),
                    w.split.to_string(),
                    w.variation_index + 1,
                    logged,
                    w.exercises.len(),
                    w.id
                ))
            })
            .collect();

        List::new(items).block(Block::default().borders(Borders::ALL).title("History"))
    }

    fn pr_table(&self) -> Table<'_> {
        let rows: Vec<Row> = self
            .prs
            .iter()
            .map(|(name, pr)| {
                Row::new(vec![
                    Cell::from(name.clone()),
                    Cell::from(format!("{} lbs × {}", pr.weight, pr.reps)),
                ])
            })
            .collect();

        Table::new(rows, [Constraint::Min(20), Constraint::Length(16)])
            .header(Row::new(vec!["Exercise", "Best"]).style(Style::default().bold()))
            .block(Block::default().borders(Borders::ALL).title("PRs"))
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        if self.confirm_clear {
            self.confirm_clear = false;
            if code == KeyCode::Char('y') {
                self.tracker.clear_all();
                self.status = "All data cleared.".to_string();
                self.refresh();
            } else {
                self.status.clear();
            }
            return;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('g') => {
                self.tracker.generate(&self.request);
                self.status = "Workout generated. Rotation + variation advanced.".to_string();
                self.refresh();
            }
            KeyCode::Char('d') => {
                if self.tracker.discard_session() {
                    self.status = "Workout cleared (not saved).".to_string();
                }
                self.refresh();
            }
            KeyCode::Char('r') => {
                self.tracker.reset_rotation();
                self.status = "Rotation reset to the start.".to_string();
            }
            KeyCode::Char('f') => {
                self.status.clear();
                self.refresh();
            }
            KeyCode::Char('c') => self.confirm_clear = true,
            _ => {}
        }
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::library::Library;
    use crate::session::SetsMode;

    fn app() -> App<MemoryStore> {
        let tracker = Tracker::new(MemoryStore::new(), Library::builtin());
        let request = SessionRequest::new(6, 45, SetsMode::Auto).unwrap();
        App::new(tracker, request)
    }

    #[test]
    fn test_generate_and_discard_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('g'));
        assert!(app.session.is_some());
        assert_eq!(app.tracker.rotation().day_index, 1);

        app.handle_key(KeyCode::Char('d'));
        assert!(app.session.is_none());
        assert_eq!(app.status, "Workout cleared (not saved).");
    }

    #[test]
    fn test_clear_needs_confirmation() {
        let mut app = app();
        app.handle_key(KeyCode::Char('g'));
        app.handle_key(KeyCode::Char('c'));
        app.handle_key(KeyCode::Char('n'));
        assert_eq!(app.tracker.rotation().day_index, 1);

        app.handle_key(KeyCode::Char('c'));
        app.handle_key(KeyCode::Char('y'));
        assert_eq!(app.tracker.rotation().day_index, 0);
        assert!(app.session.is_none());
    }

    #[test]
    fn test_render_does_not_panic() {
        let mut app = app();
        app.handle_key(KeyCode::Char('g'));
        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
