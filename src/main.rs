mod app;
mod config;
mod event;
mod input;
mod keyboard;
mod practice;
mod ui;

use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::App;
use config::Config;
use event::{AppEvent, EventHandler};
use practice::surface::TextSlot;
use ui::components::keyboard_view::KeyboardView;
use ui::layout::PracticeLayout;
use ui::theme::Theme;

#[derive(Parser)]
#[command(name = "typi", version, about = "Terminal key-by-key typing practice")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Seed for target selection (repeatable sessions)")]
    seed: Option<u64>,

    #[arg(long, help = "Write debug logs to this file")]
    log_file: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_file) = &cli.log_file {
        init_logging(log_file)?;
    }
    log::info!("typi starting");

    let mut config = Config::load().unwrap_or_else(|e| {
        log::warn!("failed to load config: {e:#}. Using defaults.");
        Config::default()
    });
    if let Some(theme_name) = cli.theme {
        config.theme = theme_name;
    }

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        log::warn!(
            "theme {:?} not found, falling back to default (bundled: {})",
            config.theme,
            Theme::available_themes().join(", ")
        );
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));

    let mut app = App::new(config, theme, cli.seed, Instant::now());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Lets the event thread tell key repeats and releases from fresh presses
    let keyboard_enhanced = execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok();
    log::debug!("keyboard enhancement flags pushed: {keyboard_enhanced}");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(app.config.tick_rate());

    let result = run_app(&mut terminal, &mut app, &events);

    if keyboard_enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("session aborted: {err:#}");
        eprintln!("Error: {err:?}");
    }

    let summary = app.score_line();
    log::info!("session finished: {summary}");
    println!("{summary}");

    Ok(())
}

fn init_logging(log_file: &str) -> Result<()> {
    use std::fs::OpenOptions;
    use std::io::Write;

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {log_file}"))?;

    // stdout belongs to the TUI, so logs only ever go to the file
    env_logger::Builder::new()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .filter_module("typi", log::LevelFilter::Debug)
        .filter_level(log::LevelFilter::Off)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key, at) => {
                app.handle_key(key, at);
            }
            AppEvent::Tick(now) => app.tick(now),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let stage = app.stage();

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = PracticeLayout::new(area);

    let centered = |text: &str, style: Style| {
        Paragraph::new(Line::from(Span::styled(text.to_string(), style))).alignment(Alignment::Center)
    };

    frame.render_widget(
        centered(
            stage.text(TextSlot::Title),
            Style::default()
                .fg(colors.title())
                .add_modifier(Modifier::BOLD),
        ),
        layout.title,
    );
    frame.render_widget(
        centered(
            stage.text(TextSlot::Instructions),
            Style::default().fg(colors.text_dim()),
        ),
        layout.instructions,
    );
    frame.render_widget(
        centered(stage.text(TextSlot::Score), Style::default().fg(colors.fg())),
        layout.score,
    );
    frame.render_widget(
        centered(
            stage.text(TextSlot::Prompt),
            Style::default()
                .fg(colors.prompt())
                .add_modifier(Modifier::BOLD),
        ),
        layout.prompt,
    );

    let row_pitch = app.config.geometry().row_pitch();
    frame.render_widget(KeyboardView::new(stage, row_pitch, app.theme), layout.keyboard);

    let footer = Paragraph::new(Line::from(Span::styled(
        " [Ctrl+C] Quit ",
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, layout.footer);
}
