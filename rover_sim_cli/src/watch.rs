use anyhow::Result;
use ratatui::{
    crossterm::{
        self,
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    prelude::*,
    widgets::*,
};
use rover_sim_core::{Coordinate, Grid, Heading, Step, StepOutcome, Trace};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

/// Replay state for one finished run.
struct App<'a> {
    grid: Grid,
    trace: &'a Trace,
    /// Number of steps currently shown as applied.
    shown: usize,
    /// Flag to control the main loop.
    should_quit: bool,
}

impl<'a> App<'a> {
    fn new(grid: Grid, trace: &'a Trace) -> Self {
        App {
            grid,
            trace,
            shown: 0,
            should_quit: false,
        }
    }

    fn finished(&self) -> bool {
        self.shown >= self.trace.steps().len()
    }

    /// Advances the replay by one command.
    fn tick(&mut self) {
        if !self.finished() {
            self.shown += 1;
        }
    }

    fn last_step(&self) -> Option<&Step> {
        self.shown
            .checked_sub(1)
            .and_then(|i| self.trace.steps().get(i))
    }

    fn state(&self) -> (Coordinate, Heading) {
        self.last_step()
            .map(|s| (s.position, s.heading))
            .unwrap_or((self.trace.start(), self.trace.start_heading()))
    }

    fn quit(&mut self) {
        self.should_quit = true;
    }
}

/// Replays `trace` over `grid` in the terminal until the user quits.
pub fn run(grid: Grid, trace: &Trace, tick_rate: Duration) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(grid, trace);
    let result = run_app(&mut terminal, &mut app, tick_rate);
    restore_terminal(&mut terminal)?;
    result
}

/// Configures the terminal for TUI interaction.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(70),
            Constraint::Percentage(20),
            Constraint::Percentage(10),
        ])
        .split(frame.area());

    render_map(frame, main_layout[0], app);
    render_status(frame, main_layout[1], app);

    let help = if app.finished() {
        "Replay finished. Press 'q' or 'Esc' to quit."
    } else {
        "Press 'q' or 'Esc' to quit."
    };
    let help_text = Paragraph::new(help)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(help_text, main_layout[2]);
}

fn rover_glyph(heading: Heading) -> &'static str {
    match heading {
        Heading::N => "^",
        Heading::E => ">",
        Heading::S => "v",
        Heading::W => "<",
    }
}

/// Draws the grid with north at the top.
///
/// Grids larger than the panel are clipped to the cells nearest the origin.
fn render_map(frame: &mut Frame, area: Rect, app: &App) {
    let grid = &app.grid;
    let (position, heading) = app.state();

    let visible_w = grid.width().clamp(0, area.width.saturating_sub(2) as i32);
    let visible_h = grid.height().clamp(0, area.height.saturating_sub(2) as i32);

    let mut lines: Vec<Line> = Vec::with_capacity(visible_h as usize);
    for y in (0..visible_h).rev() {
        let mut spans: Vec<Span> = Vec::with_capacity(visible_w as usize);
        for x in 0..visible_w {
            let span = if position == (Coordinate { x, y }) {
                Span::styled(rover_glyph(heading), Style::default().fg(Color::Red).bold())
            } else if grid.has_obstacle(x, y) {
                Span::styled("#", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(".")
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    let title = format!("Grid {}x{}", grid.width(), grid.height());
    let map_paragraph = Paragraph::new(lines)
        .block(Block::default().title(title).borders(Borders::ALL))
        .alignment(Alignment::Center);

    frame.render_widget(map_paragraph, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let (position, heading) = app.state();
    let total = app.trace.steps().len();

    let mut items = vec![ListItem::new(format!(
        "Step {}/{}  Position {} facing {}",
        app.shown,
        total,
        position,
        heading.name()
    ))];

    if let Some(step) = app.last_step() {
        let (label, style) = match step.outcome {
            StepOutcome::Moved => ("moved", Style::default().fg(Color::Green)),
            StepOutcome::Turned => ("turned", Style::default()),
            StepOutcome::BlockedByObstacle => {
                ("blocked by obstacle", Style::default().fg(Color::Yellow))
            }
            StepOutcome::OutOfBounds => ("blocked by edge", Style::default().fg(Color::Yellow)),
        };
        items.push(ListItem::from(Line::from(vec![
            Span::raw(format!("Last command: {} -> ", step.command)),
            Span::styled(label, style),
        ])));
    }

    if app.finished() {
        items.push(ListItem::new(app.trace.status().to_string()));
    }

    let status_widget =
        List::new(items).block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status_widget, area);
}
