use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
};
use log::info;
use plexus_config::Config;
use plexus_field::{ParticleAnimator, TerminalSurface};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Paragraph,
};

use crate::environment::{FOOTER_ROWS, TerminalEnvironment};
use crate::scheduler::TickScheduler;

mod environment;
mod logging;
mod scheduler;

/// Longest the loop sleeps waiting for input when nothing is due.
const IDLE_POLL: Duration = Duration::from_millis(100);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    if let Some(path) = logging::init()? {
        info!("logging to {}", path.display());
    }
    let env = TerminalEnvironment::probe(&config.display)?;

    let terminal = ratatui::init();
    let result = match execute!(stdout(), EnableFocusChange) {
        Ok(()) => App::new(config, env).run(terminal),
        Err(e) => Err(e.into()),
    };
    // Best effort: the terminal is being restored either way
    let _ = execute!(stdout(), DisableFocusChange);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Loaded configuration.
    config: Config,
    /// Terminal geometry and motion preference.
    env: TerminalEnvironment,
    /// The hero particle field.
    animator: ParticleAnimator<TerminalSurface>,
    /// Frame clock for the animator.
    scheduler: TickScheduler,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, env: TerminalEnvironment) -> Self {
        let surface = TerminalSurface::detect(&config.display);
        Self::with_surface(config, env, surface)
    }

    /// Construct with an explicit surface; `None` leaves the hero empty.
    fn with_surface(
        config: Config,
        env: TerminalEnvironment,
        surface: Option<TerminalSurface>,
    ) -> Self {
        let animator = ParticleAnimator::new(surface, config.field.clone());
        let scheduler = TickScheduler::new(config.display.frame_interval());
        Self {
            running: false,
            config,
            env,
            animator,
            scheduler,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.animator.start(&self.env, &mut self.scheduler);
        while self.running {
            self.tick(Instant::now());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.animator.teardown(&mut self.scheduler);
        Ok(())
    }

    /// Dispatch a due frame and settle a pending resize.
    fn tick(&mut self, now: Instant) {
        if let Some(handle) = self.scheduler.take_due(now) {
            self.animator.on_frame(handle, &mut self.scheduler);
        }
        self.animator.poll(now, &self.env);
    }

    /// Time until the next frame or resize needs attention.
    fn poll_timeout(&self, now: Instant) -> Duration {
        [self.scheduler.deadline(), self.animator.resize_deadline()]
            .into_iter()
            .flatten()
            .map(|deadline| deadline.saturating_duration_since(now))
            .min()
            .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL))
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let [accent_r, accent_g, accent_b] = self.config.field.accent;
        let accent = Color::Rgb(accent_r, accent_g, accent_b);

        let [hero, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(FOOTER_ROWS)])
                .areas(frame.area());

        if let Some(surface) = self.animator.surface() {
            frame.render_widget(surface, hero);
        }

        // Title centered over the canvas
        let [_, title_area, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(hero);
        let title = Paragraph::new(self.config.display.title.as_str())
            .style(Style::new().fg(accent).bold())
            .alignment(Alignment::Center);
        frame.render_widget(title, title_area);

        let motion = if self.env.reduced_motion() { "off" } else { "on" };
        let mut help = vec![
            "q".bold().fg(accent),
            " quit  ".dark_gray(),
            "m".bold().fg(accent),
            format!(" motion: {motion}").dark_gray(),
        ];
        if self.animator.is_running() && !self.animator.is_visible() {
            help.push("  paused".dark_gray());
        }
        frame.render_widget(Line::from(help).centered(), footer);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the next frame or resize deadline.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.poll_timeout(Instant::now()))? {
            self.on_event(event::read()?);
        }
        Ok(())
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Resize(columns, rows) => {
                self.on_resize(columns, rows, environment::cell_size(), Instant::now());
            }
            Event::FocusGained => self.animator.set_visible(true),
            Event::FocusLost => self.animator.set_visible(false),
            _ => {}
        }
    }

    /// Track the new geometry; the field follows once resizing settles.
    fn on_resize(&mut self, columns: u16, rows: u16, cell: Option<(f64, f64)>, now: Instant) {
        self.env.resize(columns, rows, cell);
        self.animator.on_resize(now);
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('m')) => self.toggle_motion(),
            _ => {}
        }
    }

    /// Flip the reduced-motion preference and tell the animator.
    fn toggle_motion(&mut self) {
        let reduce = !self.env.reduced_motion();
        self.env.set_reduced_motion(reduce);
        self.animator
            .on_motion_preference_change(reduce, &self.env, &mut self.scheduler);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
