use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pandemic_dash::render::{Metric, format_count, format_delta};
use pandemic_dash::{Client, Config, CycleOutcome, Dashboard, Scope, stats};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "pdash",
    version,
    about = "Show current pandemic totals and daily new cases from disease.sh"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one scope and print its cards (and optionally chart and stats).
    Show(ShowArgs),
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Country name or ISO code; omit (or pass "all") for the global aggregate.
    #[arg(short, long, default_value = "all")]
    country: String,
    /// Create a chart of daily new cases at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the plot (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plot (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Print summary statistics of the daily deltas.
    #[arg(long, default_value_t = false)]
    stats: bool,
    /// Print final values right away instead of ramping the counters.
    #[arg(long, default_value_t = false)]
    no_animate: bool,
    /// API root (default https://disease.sh).
    #[arg(long, default_value = pandemic_dash::config::DEFAULT_BASE_URL)]
    base_url: String,
    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,
    /// Number formatting locale (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Show(args) => cmd_show(args),
    }
}

fn cards_line(dash: &Dashboard, locale: &str) -> String {
    let Some(region) = dash.cards() else {
        return String::new();
    };
    Metric::ALL
        .iter()
        .filter_map(|m| region.card(*m))
        .map(|c| format!("{}: {}", c.metric.title(), format_count(c.display, locale)))
        .collect::<Vec<_>>()
        .join("  |  ")
}

fn cmd_show(args: ShowArgs) -> Result<ExitCode> {
    let config = Config {
        base_url: args.base_url.clone(),
        timeout_secs: args.timeout,
        locale: args.locale.clone(),
    };
    let client = Client::new(&config)?;
    let mut dash = Dashboard::new();

    if dash.run_cycle(&client, Scope::parse(&args.country)) == CycleOutcome::Failed {
        eprintln!("Error: fetch failed");
        return Ok(ExitCode::FAILURE);
    }

    let locale = config.locale.as_str();
    if let Some(region) = dash.cards() {
        println!("{}", region.title);
    }

    let mut stdout = std::io::stdout();
    let animate = !args.no_animate && stdout.is_terminal();
    if animate {
        // ~60 fps, redrawing the line in place
        while dash.tick() {
            write!(stdout, "\r{}", cards_line(&dash, locale))?;
            stdout.flush()?;
            thread::sleep(Duration::from_millis(16));
        }
    }
    if let Some(region) = dash.cards_mut() {
        region.finish();
    }
    if animate {
        write!(stdout, "\r")?;
    }
    writeln!(stdout, "{}", cards_line(&dash, locale))?;

    if let Some(region) = dash.cards() {
        println!("{}", region.last_updated_text());
    }

    if let Some(deltas) = dash.deltas() {
        println!();
        println!("Daily new cases");
        if deltas.is_empty() {
            println!("  (not enough history)");
        }
        for (date, v) in deltas.points() {
            println!("  {date:>10}  {:>12}", format_delta(*v, locale));
        }

        if args.stats {
            match stats::delta_summary(deltas) {
                Some(s) => println!(
                    "count={} min={} max={} mean={:.1} median={:.1} total={} corrections={}",
                    s.count,
                    format_delta(s.min, locale),
                    format_delta(s.max, locale),
                    s.mean,
                    s.median,
                    format_delta(s.total, locale),
                    s.corrections
                ),
                None => println!("count=0"),
            }
        }
    }

    if let (Some(plot_path), Some(chart)) = (args.plot.as_ref(), dash.chart()) {
        chart.render_to_file(plot_path, args.width, args.height, locale)?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }

    Ok(ExitCode::SUCCESS)
}
