// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

mod app;
mod clock;
mod config;
mod data;
mod events;
mod fetch;
mod ui;

use app::App;
use clock::SystemClock;
use fetch::{fetch_simulation, HttpFetcher, SimulationRequest};

#[derive(Parser, Debug)]
#[command(name = "tempwatch")]
#[command(about = "Terminal dashboard for simulated city temperature data")]
struct Args {
    /// Base URL of the simulation API (overrides config file and environment)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// City to prefill the query with
    #[arg(long)]
    city: Option<String>,

    /// Start date (YYYY-MM-DD) to prefill the query with
    #[arg(long)]
    start_date: Option<String>,

    /// End date (YYYY-MM-DD) to prefill the query with
    #[arg(long)]
    end_date: Option<String>,

    /// Fetch, compute statistics, export to a JSON file, and exit.
    /// Requires --city, --start-date, and --end-date.
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = config::Settings::load(args.config.as_deref(), args.base_url.as_deref())?;

    // The fetcher spawns requests onto this runtime; it must outlive the TUI.
    let rt = tokio::runtime::Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(&rt, &settings, &args, export_path);
    }

    let fetcher = Box::new(HttpFetcher::new(rt.handle().clone(), &settings.base_url));
    let mut app = App::new(fetcher, Box::new(SystemClock));

    // Prefill the form from the command line; analyze immediately when the
    // full query is present.
    if let Some(ref city) = args.city {
        app.form.city = city.clone();
    }
    if let Some(ref start) = args.start_date {
        app.form.start_date = start.clone();
    }
    if let Some(ref end) = args.end_date {
        app.form.end_date = end.clone();
    }
    if args.city.is_some() && args.start_date.is_some() && args.end_date.is_some() {
        app.submit();
    }

    run_tui(&mut app)
}

/// Run the TUI until the user quits.
fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered =
                    ratatui::layout::Rect::new(0, area.height.saturating_sub(4) / 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            ui::render(frame, app);
        })?;

        // Poll for events with a short timeout so in-flight fetches are
        // noticed promptly.
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        app.poll_fetch();
    }

    Ok(())
}

/// Fetch one query, compute statistics, and write the report to a JSON file.
fn export_to_file(
    rt: &tokio::runtime::Runtime,
    settings: &config::Settings,
    args: &Args,
    export_path: &std::path::Path,
) -> Result<()> {
    let (Some(city), Some(start), Some(end)) = (&args.city, &args.start_date, &args.end_date)
    else {
        bail!("--export requires --city, --start-date, and --end-date");
    };

    let start_date: NaiveDate = start
        .parse()
        .with_context(|| format!("invalid start date: {}", start))?;
    let end_date: NaiveDate = end
        .parse()
        .with_context(|| format!("invalid end date: {}", end))?;
    if end_date < start_date {
        bail!("end date must be after start date");
    }

    let request = SimulationRequest {
        city: city.clone(),
        start_date,
        end_date,
    };

    let fetcher = HttpFetcher::new(rt.handle().clone(), &settings.base_url);
    let client = reqwest::Client::new();
    let url = fetcher.endpoint();
    let raw = rt
        .block_on(fetch_simulation(&client, &url, &request))
        .context("failed to fetch temperature data")?;

    let mut app = App::new(Box::new(fetcher), Box::new(SystemClock));
    let series = data::format_series(raw);
    app.stats = data::stats::compute(&series.points);
    app.series = Some(series);
    app.last_query = Some(request);

    app.export_state(export_path)?;
    println!("Exported temperature report to: {}", export_path.display());
    Ok(())
}
