use blog_filter::category;
use blog_filter::config;
use blog_filter::date;
use blog_filter::entry::EntryStore;
use blog_filter::output;
use blog_filter::pipeline::{Board, Event};
use blog_filter::range::DateRange;
use blog_filter::render;
use blog_filter::sort::SortOrder;
use blog_filter::surface::HtmlSurface;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter flags for a one-shot render.
#[derive(clap::Args, Clone)]
struct FilterArgs {
    /// Sort order: exactly "asc" sorts oldest first, anything else newest first
    #[arg(long, default_value = "desc")]
    sort: String,

    /// First day shown (YYYY-MM-DD), defaults to range.earliest
    #[arg(long)]
    start: Option<String>,

    /// Last day shown (YYYY-MM-DD), defaults to today
    #[arg(long)]
    finish: Option<String>,

    /// Uncheck a category (repeatable); use "other" for uncategorised posts
    #[arg(long = "exclude", value_name = "CATEGORY")]
    exclude: Vec<String>,
}

#[derive(clap::Args, Clone)]
struct SessionArgs {
    /// File with one event per line; reads stdin when omitted
    #[arg(long)]
    events: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "blog-filter")]
#[command(about = "Render a filterable blog page from a JSON dataset")]
#[command(long_about = "\
Render a filterable blog page from a JSON dataset

The dataset is a JSON array of posts. Every field is optional:

  [
    { \"title\": \"Hello\", \"date\": \"2022-04-01\", \"content\": \"...\", \"category\": \"tech\" },
    { \"date\": \"2022-03-20\", \"category\": \"\" }
  ]

Posts without a category are grouped under \"other\". The page shows every
category checked, newest first, from range.earliest (config.toml) to today.

Session events, one per line:
  check <category>      uncheck <category>
  start <YYYY-MM-DD>    finish <YYYY-MM-DD>
  sort                  toggle categories|range

Run 'blog-filter gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// JSON dataset
    #[arg(long, default_value = "data.json", global = true)]
    data: PathBuf,

    /// Output directory for index.html
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one pipeline pass with the given filters and write the page
    Render(FilterArgs),
    /// List categories, entry counts and checkbox ids
    Categories,
    /// Replay UI events and write the final page
    Session(SessionArgs),
    /// Validate the dataset without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Command::Render(ref args) => {
            let mut board = load_board(&cli)?;
            apply_filters(&mut board, args)?;
            let mut surface = new_surface(&board);
            board.init(&mut surface);
            write_output(&board, &surface, &cli)?;
            output::print_render_output(
                board.state(),
                board.categories(),
                &board.visible(),
                &board.config().labels,
                &today(),
            );
        }
        Command::Categories => {
            let store = EntryStore::load(&cli.data)?;
            let counts = category::category_counts(&store);
            let collisions = category::id_collisions(&store);
            output::print_categories(&counts, &collisions);
        }
        Command::Session(ref args) => {
            let mut board = load_board(&cli)?;
            let mut surface = new_surface(&board);
            board.init(&mut surface);

            let reader: Box<dyn BufRead> = match &args.events {
                Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
                None => Box::new(BufReader::new(io::stdin())),
            };
            for (n, line) in reader.lines().enumerate() {
                let line = line?;
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                let event: Event = trimmed
                    .parse()
                    .map_err(|e| format!("line {}: {}", n + 1, e))?;
                let outcome = board.handle(event.clone(), &mut surface);
                println!(
                    "{}",
                    output::format_outcome(&event, &outcome, &board.config().labels.invalid_range)
                );
            }

            write_output(&board, &surface, &cli)?;
            println!();
            output::print_render_output(
                board.state(),
                board.categories(),
                &board.visible(),
                &board.config().labels,
                &today(),
            );
        }
        Command::Check => {
            let store = EntryStore::load(&cli.data)?;
            let collisions = category::id_collisions(&store);
            config::load_config(&cli.config)?;
            output::print_check_output(&store, &collisions);
            println!("==> Dataset is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn today() -> String {
    date::format_date(date::today())
}

fn load_board(cli: &Cli) -> Result<Board, Box<dyn std::error::Error>> {
    let config = config::load_config(&cli.config)?;
    let store = EntryStore::load(&cli.data)?;
    Ok(Board::new(store, config)?)
}

fn new_surface(board: &Board) -> HtmlSurface {
    HtmlSurface::new(board.config().labels.clone(), today())
}

/// Set the board's state from the render flags before the first pass.
fn apply_filters(board: &mut Board, args: &FilterArgs) -> Result<(), Box<dyn std::error::Error>> {
    let order: SortOrder = args.sort.parse()?;
    board.set_sort_order(order);

    let committed = board.state().range.committed();
    let start = args.start.as_deref().unwrap_or(committed.start());
    let finish = args.finish.as_deref().unwrap_or(committed.finish());
    let window = DateRange::new(start, finish)?;
    board.set_window(window);

    for name in &args.exclude {
        board.set_checked(&name.as_str().into(), false);
    }
    Ok(())
}

fn write_output(
    board: &Board,
    surface: &HtmlSurface,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = render::write_page(&cli.output, board.render_page(surface))?;
    println!("==> Wrote {}", path.display());
    Ok(())
}

