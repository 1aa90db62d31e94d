use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tracing::{error, info, warn};

use lingodeck::app::{App, Pane};
use lingodeck::config::Config;
use lingodeck::event::{AppEvent, EventHandler};
use lingodeck::lesson::LessonCatalog;
use lingodeck::logging;
use lingodeck::session::navigation::Tab;
use lingodeck::speech::{self, SpeechBackend};
use lingodeck::ui::components::exercise_card::ExerciseList;
use lingodeck::ui::components::lesson_list::LessonList;
use lingodeck::ui::components::phrase_list::PhraseList;
use lingodeck::ui::components::tab_bar::TabBar;
use lingodeck::ui::components::vocab_grid::VocabGrid;
use lingodeck::ui::layout::{AppLayout, pack_hint_lines};
use lingodeck::ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "lingodeck",
    version,
    about = "Vocabulary, phrases and sentence-building exercises in the terminal"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Disable text-to-speech")]
    mute: bool,

    #[arg(long, help = "Seed for exercise shuffles")]
    seed: Option<u64>,

    #[arg(long, help = "Write the effective configuration file and exit")]
    write_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if cli.mute {
        config.speech_backend = SpeechBackend::None;
    }

    if cli.write_config {
        let path = config.save()?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let _log_guard = logging::init_tracing(&config);
    if let Some(err) = config_error {
        warn!("ignoring unreadable config: {err:#}");
    }

    let catalog = LessonCatalog::bundled()?;
    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        warn!(
            theme = %config.theme,
            available = ?Theme::available_themes(),
            "unknown theme, using default"
        );
        Theme::default()
    });
    let speaker = speech::detect(&config.speech_backend);
    let rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    info!(lessons = catalog.len(), "starting");
    let mut app = App::new(catalog, config, theme, speaker, rng);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new();

    let result = run_app(&mut terminal, &mut app, &events);
    let teardown = restore_terminal(&mut terminal);

    exit_status(result, teardown)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs after the terminal is restored. A loop error takes precedence over a
/// teardown error; either one makes the process exit non-zero.
fn exit_status(run: Result<()>, teardown: Result<()>) -> Result<()> {
    if let Err(err) = &run {
        error!("event loop failed: {err:#}");
    }
    run.and(teardown)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        let size = terminal.size()?;
        app.viewport = Rect::new(0, 0, size.width, size.height);
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            info!("quitting");
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.next_tab();
            return;
        }
        KeyCode::BackTab => {
            app.prev_tab();
            return;
        }
        KeyCode::Char('1') => {
            app.select_tab(Tab::Vocabulary);
            return;
        }
        KeyCode::Char('2') => {
            app.select_tab(Tab::Phrases);
            return;
        }
        KeyCode::Char('3') => {
            app.select_tab(Tab::Exercises);
            return;
        }
        _ => {}
    }

    match app.pane {
        Pane::Lessons => handle_lessons_key(app, key),
        Pane::Content => match app.active_tab() {
            Tab::Vocabulary | Tab::Phrases => handle_browse_key(app, key),
            Tab::Exercises => handle_exercise_key(app, key),
        },
    }
}

fn handle_lessons_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.lesson_cursor_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.lesson_cursor_next(),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.open_highlighted_lesson(),
        KeyCode::Esc => app.focus_content(),
        _ => {}
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.focus_lessons(),
        KeyCode::Left | KeyCode::Char('h') => app.move_item(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_item(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_item_vertical(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_item_vertical(1),
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.activate_item();
        }
        _ => {}
    }
}

fn handle_exercise_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.focus_lessons(),
        KeyCode::Left | KeyCode::Char('h') => app.move_word(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_word(1),
        KeyCode::Up | KeyCode::Down | KeyCode::Char('k') | KeyCode::Char('j') => {
            app.toggle_word_row()
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.activate_word();
        }
        KeyCode::Char('c') => {
            app.check_exercise();
        }
        KeyCode::Char('r') => app.reset_exercise(),
        KeyCode::Char('[') | KeyCode::PageUp => app.move_exercise(-1),
        KeyCode::Char(']') | KeyCode::PageDown => app.move_exercise(1),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let hints = app.footer_hints();
    let probe = AppLayout::new(area, app.config.sidebar_width, 1);
    let hint_lines = pack_hint_lines(&hints, probe.footer.width as usize);
    let layout = AppLayout::new(area, app.config.sidebar_width, hint_lines.len().max(1) as u16);

    let lesson = app.active_lesson();
    let content_focused = app.pane == Pane::Content;

    let sidebar = LessonList::new(
        app.catalog.lessons(),
        lesson.id,
        app.lesson_cursor,
        &app.theme,
    )
    .focused(app.pane == Pane::Lessons)
    .compact(layout.tier.compact_sidebar());
    frame.render_widget(sidebar, layout.sidebar);

    render_header(frame, app, layout.header);
    frame.render_widget(TabBar::new(app.active_tab(), &app.theme), layout.tabs);

    let content = layout.body();
    match app.active_tab() {
        Tab::Vocabulary => frame.render_widget(
            VocabGrid::new(&lesson.vocabulary, app.item_cursor, content_focused, &app.theme),
            content,
        ),
        Tab::Phrases => frame.render_widget(
            PhraseList::new(&lesson.phrases, app.item_cursor, content_focused, &app.theme),
            content,
        ),
        Tab::Exercises => {
            let cursor = content_focused.then_some(app.word_cursor);
            frame.render_widget(
                ExerciseList::new(&app.exercises, app.exercise_cursor, cursor, &app.theme),
                content,
            );
        }
    }

    let footer_lines: Vec<Line> = hint_lines
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.text_muted()))))
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let lesson = app.active_lesson();

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(colors.border()))
        .style(Style::default().bg(colors.header_bg()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let tab_label = format!(" {} ", app.active_tab().label().to_uppercase());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(tab_label.chars().count() as u16 + 1),
        ])
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {}", lesson.title),
        Style::default()
            .fg(colors.header_fg())
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, columns[0]);

    let badge = Paragraph::new(Line::from(Span::styled(
        tab_label,
        Style::default().fg(colors.text_muted()).bg(colors.word_bg()),
    )));
    frame.render_widget(badge, columns[1]);
}
