//! Gut-Brain Axis Simulation Driver
//!
//! Runs the microbiota → serotonin → brain-activity cascade from the
//! default initial conditions (M = 100, S = 50, B = 10), optionally with
//! an intervention, and writes the trajectory to stdout.
//!
//! ```text
//! gut_brain_sim                              # baseline, table output
//! gut_brain_sim --perturbation antibiotic    # single intervention
//! gut_brain_sim --all --format chart         # baseline + all interventions
//! gut_brain_sim --format csv --samples 200   # machine-readable export
//! ```
//!
//! Logs go to stderr; `RUST_LOG` overrides the `-v` level.

use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

use gut_brain_dynamics::{
    compare_to_baseline,
    run_all,
    run_scenario,
    sink_for,
    ChartSpec,
    IntegratorConfig,
    OutputFormat,
    Perturbation,
    RateParameters,
    Result,
    ScenarioRun,
};

#[derive(Parser, Debug)]
#[command(name = "gut_brain_sim", version, about = "Gut-brain axis ODE simulation")]
struct Cli {
    #[arg(long, default_value_t = 100.0, help = "Total simulated time T")]
    time_span: f64,
    #[arg(long, default_value_t = 1000, help = "Number of output samples N")]
    samples: usize,
    #[arg(long, default_value_t = 0.01, help = "Upper bound on the RK4 step")]
    max_step: f64,
    #[arg(long, value_enum, default_value_t = Perturbation::None)]
    perturbation: Perturbation,
    #[arg(
        long,
        conflicts_with = "perturbation",
        help = "Run the baseline followed by every intervention"
    )]
    all: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    #[arg(long, default_value_t = 1, help = "Print every k-th sample (table output)")]
    stride: usize,
    #[arg(long, help = "Microbiota growth rate")]
    growth_rate: Option<f64>,
    #[arg(long, help = "Microbiota decay rate")]
    decay_rate: Option<f64>,
    #[arg(long, help = "Serotonin production rate")]
    production_rate: Option<f64>,
    #[arg(long, help = "Serotonin decay rate")]
    serotonin_decay_rate: Option<f64>,
    #[arg(long, help = "Brain activity increase rate")]
    increase_rate: Option<f64>,
    #[arg(long, help = "Brain activity decay rate")]
    brain_decay_rate: Option<f64>,
    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

impl Cli {
    fn rates(&self) -> Result<RateParameters> {
        let d = RateParameters::default();
        RateParameters::new(
            self.growth_rate.unwrap_or(d.microbiota_growth()),
            self.decay_rate.unwrap_or(d.microbiota_decay()),
            self.production_rate.unwrap_or(d.serotonin_production()),
            self.serotonin_decay_rate.unwrap_or(d.serotonin_decay()),
            self.increase_rate.unwrap_or(d.brain_increase()),
            self.brain_decay_rate.unwrap_or(d.brain_decay()),
        )
    }

    fn config(&self) -> IntegratorConfig {
        IntegratorConfig::new(self.time_span, self.samples).with_max_step(self.max_step)
    }

    fn human_readable(&self) -> bool {
        matches!(self.format, OutputFormat::Table | OutputFormat::Chart)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_banner(cli: &Cli, rates: &RateParameters) {
    println!("═══════════════════════════════════════════════════════════════");
    println!("  Gut-Brain Axis Simulation");
    println!("═══════════════════════════════════════════════════════════════\n");
    println!("Rates:");
    println!(
        "  microbiota: growth = {}, decay = {} (net {:+})",
        rates.microbiota_growth(),
        rates.microbiota_decay(),
        rates.net_microbiota_rate()
    );
    println!(
        "  serotonin:  production = {}, decay = {}",
        rates.serotonin_production(),
        rates.serotonin_decay()
    );
    println!(
        "  brain:      increase = {}, decay = {}",
        rates.brain_increase(),
        rates.brain_decay()
    );
    println!("Integration: T = {}, N = {}, max step = {}\n", cli.time_span, cli.samples, cli.max_step);
}

fn print_final_states(runs: &[ScenarioRun]) {
    println!("Final state:");
    println!("─────────────────────────────────────────────────────────────");
    for run in runs {
        let s = run.final_state();
        println!(
            "  {:<11} M = {:>14.4}  S = {:>14.4}  B = {:>14.4}",
            run.perturbation.name(),
            s.microbiota,
            s.serotonin,
            s.brain_activity
        );
    }

    let comparisons = compare_to_baseline(runs);
    if !comparisons.is_empty() {
        println!("\nRelative to baseline:");
        let fmt = |r: Option<f64>| r.map_or_else(|| "n/a".to_string(), |v| format!("{:.4}", v));
        for c in comparisons {
            println!(
                "  {:<11} M × {}  S × {}  B × {}",
                c.perturbation.name(),
                fmt(c.microbiota_ratio),
                fmt(c.serotonin_ratio),
                fmt(c.brain_activity_ratio)
            );
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let rates = cli.rates()?;
    let config = cli.config();
    config.validate()?;

    let runs = if cli.all {
        run_all(rates, &config)?
    } else {
        vec![run_scenario(cli.perturbation, rates, &config)?]
    };

    if cli.human_readable() {
        print_banner(cli, &rates);
    }

    let mut sink = sink_for(cli.format, std::io::stdout(), cli.stride);
    for run in &runs {
        if cli.human_readable() && run.perturbation != Perturbation::None {
            println!("Simulating effect of {}\n", run.perturbation);
        }
        sink.render(&ChartSpec::for_run(run), &run.series)?;
    }
    sink.finish()?;

    if cli.human_readable() {
        print_final_states(&runs);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "simulation failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
