mod ansi;
mod logging;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use ascii_tint::site::accent::load_accent_index;
use ascii_tint::site::cycle::{CycleTimer, LogoController};
use ascii_tint::site::document::StaticDocument;
use ascii_tint::site::page::{Page, PageEvent, PageLayout};
use ascii_tint::site::store::JsonFileStore;
use ascii_tint::{wrap_pre, Colorizer, SiteConfig};
use clap::{ArgAction, Parser, Subcommand};
use crossterm::{cursor, queue};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use walkdir::WalkDir;

const DEFAULT_STATE_FILE: &str = "ascii-tint-state.json";

#[derive(Parser, Debug)]
#[command(author, version, about = "Tint ASCII art logos by contiguous glyph columns")]
struct Cli {
    /// Site configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Persisted state file holding the accent index and theme flag
    #[arg(long, global = true)]
    state: Option<PathBuf>,
    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Silence all logging
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print tinted ASCII art to the terminal
    Preview(PreviewArgs),
    /// Write tinted markup for one ASCII art file
    Convert(ConvertArgs),
    /// Convert every `.txt` file under a directory to markup
    Batch(BatchArgs),
    /// Cycle the palette over ASCII art in the terminal
    Cycle(CycleArgs),
    /// Load a page, replay events and print the resulting document as JSON
    Page(PageArgs),
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input text file (`-` for stdin)
    input: PathBuf,
    /// Palette offset; defaults to the stored accent index
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<i64>,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input text file (`-` for stdin)
    input: PathBuf,
    /// Output file path
    #[arg(short, long)]
    output: PathBuf,
    /// Palette offset; defaults to the stored accent index
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<i64>,
    /// Wrap the markup in a `<pre>` element with this id
    #[arg(long)]
    pre_id: Option<String>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory searched recursively for `.txt` files
    input: PathBuf,
    /// Output directory for `.html` files
    #[arg(short, long)]
    out_dir: PathBuf,
    /// Palette offset; defaults to the stored accent index
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<i64>,
}

#[derive(Parser, Debug)]
struct CycleArgs {
    /// Input text file (`-` for stdin)
    input: PathBuf,
    /// Number of color steps before exiting
    #[arg(long, default_value_t = 7)]
    ticks: u32,
    /// Override the configured cycle interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// Logo art file; the page has no logo when omitted
    #[arg(long)]
    logo: Option<PathBuf>,
    /// Path of the current document
    #[arg(long, default_value = "/index.html")]
    path: String,
    /// Navigation link targets, in page order
    #[arg(long = "nav")]
    nav: Vec<String>,
    /// Number of logo clicks to replay
    #[arg(long, default_value_t = 0)]
    click: u32,
    /// Replay one theme toggle
    #[arg(long)]
    toggle_theme: bool,
    /// The page has no theme toggle control
    #[arg(long)]
    no_toggle: bool,
    /// The page has no research image
    #[arg(long)]
    no_image: bool,
    /// The page footer has no year placeholder
    #[arg(long)]
    no_year: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(logging::level_from_flags(cli.quiet, cli.verbose))
        .context("failed to install logger")?;

    let config = match &cli.config {
        Some(path) => {
            SiteConfig::load(path).with_context(|| format!("failed to load config {:?}", path))?
        },
        None => SiteConfig::default(),
    };
    let state_path = cli
        .state
        .clone()
        .or_else(|| config.storage.path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));
    debug!("using state file {}", state_path.display());

    match cli.command {
        Commands::Preview(args) => preview(args, &config, &state_path),
        Commands::Convert(args) => convert(args, &config, &state_path),
        Commands::Batch(args) => batch(args, &config, &state_path),
        Commands::Cycle(args) => cycle(args, &config, &state_path),
        Commands::Page(args) => page(args, config, &state_path),
    }
}

fn preview(args: PreviewArgs, config: &SiteConfig, state_path: &Path) -> Result<()> {
    let colorizer = colorizer(config)?;
    let offset = resolve_offset(args.offset, state_path);
    let text = read_input(&args.input)?;

    let grid = colorizer.render(&text, offset);
    ansi::write_grid(&mut io::stdout().lock(), &grid)?;
    Ok(())
}

fn convert(args: ConvertArgs, config: &SiteConfig, state_path: &Path) -> Result<()> {
    let colorizer = colorizer(config)?;
    let offset = resolve_offset(args.offset, state_path);
    let text = read_input(&args.input)?;

    let mut html = colorizer.render_html(&text, offset);
    if let Some(id) = &args.pre_id {
        html = wrap_pre(id, &html);
    }

    fs::write(&args.output, html).with_context(|| format!("failed to write {:?}", args.output))?;
    info!("wrote {}", args.output.display());
    Ok(())
}

fn batch(args: BatchArgs, config: &SiteConfig, state_path: &Path) -> Result<()> {
    let colorizer = colorizer(config)?;
    let offset = resolve_offset(args.offset, state_path);

    let inputs = collect_text_files(&args.input)?;
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let progress = ProgressBar::new(inputs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files",
        )
        .context("invalid progress template")?
        .progress_chars("=> "),
    );

    for input in &inputs {
        let relative = input.strip_prefix(&args.input).unwrap_or(input);
        let output = args.out_dir.join(relative).with_extension("html");
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create output directory {:?}", parent))?;
        }

        let text =
            fs::read_to_string(input).with_context(|| format!("failed to read {:?}", input))?;
        fs::write(&output, colorizer.render_html(&text, offset))
            .with_context(|| format!("failed to write {:?}", output))?;
        progress.inc(1);
    }

    progress.finish_with_message(format!("Markup written to {:?}", args.out_dir));
    Ok(())
}

fn cycle(args: CycleArgs, config: &SiteConfig, state_path: &Path) -> Result<()> {
    let palette = config.palette().context("invalid palette")?;
    let interval = match args.interval_ms {
        Some(ms) => std::time::Duration::from_millis(ms.max(1)),
        None => config.cycle.interval(),
    };
    let text = read_input(&args.input)?;

    let mut store = JsonFileStore::open(state_path);
    let mut document = StaticDocument::new();
    let mut controller = LogoController::new(palette, CycleTimer::new(interval, true));

    let stored = load_accent_index(&store);
    controller.set_offset(stored, &mut store, &mut document);
    controller.attach_logo(&text, &mut document);

    let mut stdout = io::stdout().lock();
    let Some(logo) = controller.logo() else {
        return Ok(());
    };
    let height = logo.height() as u16;
    ansi::write_grid(&mut stdout, logo)?;

    controller.start(Instant::now());
    let mut remaining = args.ticks;
    while remaining > 0 {
        if let Some(deadline) = controller.next_deadline() {
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
        }

        if !controller.update(Instant::now(), &mut store, &mut document) {
            continue;
        }
        remaining -= 1;

        if let Some(logo) = controller.logo() {
            if height > 0 {
                queue!(stdout, cursor::MoveUp(height))?;
            }
            ansi::write_grid(&mut stdout, logo)?;
        }
    }

    controller.stop();
    info!("stopped at accent index {}", controller.offset());
    Ok(())
}

fn page(args: PageArgs, config: SiteConfig, state_path: &Path) -> Result<()> {
    let logo_text = args.logo.as_deref().map(read_input).transpose()?;
    let layout = PageLayout {
        path: args.path,
        nav_hrefs: args.nav,
        logo_text,
        has_theme_toggle: !args.no_toggle,
        has_research_image: !args.no_image,
        has_footer_year: !args.no_year,
    };

    let store = JsonFileStore::open(state_path);
    let now = Instant::now();
    let mut page = Page::load(layout, config, store, StaticDocument::new(), now)
        .context("failed to load page")?;

    for _ in 0..args.click {
        page.handle(PageEvent::LogoClicked, now);
    }
    if args.toggle_theme {
        page.handle(PageEvent::ThemeToggled, now);
    }

    let report = serde_json::json!({
        "accent_index": page.accent_offset(),
        "theme": page.theme(),
        "document": page.document(),
    });

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report)?;
    writeln!(stdout)?;
    Ok(())
}

fn colorizer(config: &SiteConfig) -> Result<Colorizer> {
    Ok(Colorizer::new(config.palette().context("invalid palette")?))
}

fn resolve_offset(offset: Option<i64>, state_path: &Path) -> i64 {
    offset.unwrap_or_else(|| load_accent_index(&JsonFileStore::open(state_path)))
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))
}

fn collect_text_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
        })
        .collect();
    entries.sort();
    if entries.is_empty() {
        anyhow::bail!("no .txt files found in {:?}", path);
    }
    Ok(entries)
}
