//! philo — run one dinner from the command line.
//!
//! ```text
//! philo <philosophers> <time_to_die> <time_to_eat> <time_to_sleep> [meals]
//! ```
//!
//! The event log goes to stdout, one `<ms> <id> <action>` line per event.
//! Diagnostics go to stderr through `tracing` (`-v` for info, `-vv` for
//! debug) so the log stays machine-readable.

use std::io::Stdout;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use dp_core::{Millis, SimConfig, WaitPolicy, parse_meals, parse_positive};
use dp_output::{CsvWriter, LogWriter, audit};
use dp_sim::SimBuilder;
use dp_table::VecSink;

/// stdout log, optional CSV copy, optional in-memory copy for the audit.
type Sink = (LogWriter<Stdout>, (Option<CsvWriter>, Option<VecSink>));

#[derive(Parser, Debug)]
#[command(name = "philo")]
#[command(version)]
#[command(about = "Dining philosophers: N threads, N forks, one monitor")]
struct Cli {
    /// Number of philosophers (and forks)
    #[arg(value_parser = parse_positive)]
    philosophers: u32,

    /// Milliseconds a philosopher survives without starting a meal
    #[arg(value_parser = parse_positive)]
    time_to_die: u32,

    /// Milliseconds a meal lasts
    #[arg(value_parser = parse_positive)]
    time_to_eat: u32,

    /// Milliseconds a philosopher sleeps after eating
    #[arg(value_parser = parse_positive)]
    time_to_sleep: u32,

    /// Stop once every philosopher has eaten this many meals
    #[arg(value_parser = parse_meals)]
    meals: Option<u32>,

    /// Delay before even-numbered philosophers reach for their first fork
    #[arg(long, default_value_t = 1)]
    stagger_ms: u64,

    /// Monitor polling interval in microseconds
    #[arg(long, default_value_t = 1_000)]
    monitor_us: u64,

    /// End eat/sleep waits as soon as the simulation stops
    #[arg(long)]
    interruptible: bool,

    /// Also write the event log as CSV to this path
    #[arg(long, env = "PHILO_CSV")]
    csv: Option<PathBuf>,

    /// Check the finished log for protocol violations; exit non-zero on failure
    #[arg(long)]
    audit: bool,

    /// Increase diagnostic verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> SimConfig {
        let mut config = SimConfig::new(
            self.philosophers,
            self.time_to_die.into(),
            self.time_to_eat.into(),
            self.time_to_sleep.into(),
        );
        config.meals_required = self.meals;
        config.start_stagger = Millis(self.stagger_ms);
        config.monitor_interval = Duration::from_micros(self.monitor_us);
        if self.interruptible {
            config.wait_policy = WaitPolicy::Interruptible;
        }
        config
    }

    fn sink(&self) -> Result<Sink> {
        let csv = match &self.csv {
            Some(path) => Some(
                CsvWriter::new(path)
                    .with_context(|| format!("cannot create {}", path.display()))?,
            ),
            None => None,
        };
        let recorder = self.audit.then(VecSink::new);
        Ok((LogWriter::stdout(), (csv, recorder)))
    }
}

fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = cli.config();
    let mut sim = SimBuilder::new(config.clone(), cli.sink()?).build()?;
    let outcome = sim.run()?;

    let (mut log, (csv, recorded)) = sim.into_sink();
    if let Some(e) = log.take_error() {
        return Err(e).context("writing event log");
    }
    if let Some(mut csv) = csv {
        if let Some(e) = csv.take_error() {
            return Err(e).context("writing CSV log");
        }
    }

    if let Some(recorded) = recorded {
        match audit(&recorded.events, &config) {
            Ok(report) => info!(
                events = report.events,
                meals  = ?report.meals,
                %outcome,
                "audit passed"
            ),
            Err(violation) => bail!("audit failed: {violation}"),
        }
    }

    Ok(())
}
