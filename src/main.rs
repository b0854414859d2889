//! Cookiecalc - Entry Point
//!
//! Loads the balance data once, then answers max level questions from flags
//! or JSON requests.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use cookiecalc::api::{self, CalcRequest};
use cookiecalc::data::{self, BalanceData};
use cookiecalc::progression::Level;

#[derive(Parser)]
#[command(name = "cookiecalc")]
#[command(about = "Cookie max level calculator for EXP jellies", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding level_curve.ron and jellies.ron
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the max level reachable from a jelly inventory
    Calc {
        /// Jelly upgrade level (0 for Base, 1-5 for Lv.1 to Lv.5)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        tier: i64,

        /// Jelly quantity as LABEL=COUNT, e.g. Lv.8=12 (repeatable)
        #[arg(long = "jelly", value_name = "LABEL=COUNT")]
        jellies: Vec<String>,
    },

    /// Answer a JSON calculation request from a file, or stdin if omitted
    Json {
        #[arg(long)]
        request: Option<PathBuf>,
    },

    /// Print the level requirement curve
    Curve,

    /// Write the built-in balance data as editable RON files
    ExportData {
        /// Target directory (defaults to the data directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for JSON replies
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(data::default_data_dir);

    let result = match cli.command {
        Commands::Calc { tier, jellies } => run_calc(&data_dir, tier, &jellies),
        Commands::Json { request } => run_json(&data_dir, request),
        Commands::Curve => run_curve(&data_dir),
        Commands::ExportData { out } => {
            let out = out.unwrap_or(data_dir);
            data::export_default_data(&out)
                .with_context(|| format!("exporting balance data to {:?}", out))
                .map(|()| println!("Wrote balance data to {}", out.display()))
        }
    };

    if let Err(ref e) = result {
        log::error!("cookiecalc failed: {:#}", e);
    }
    result
}

fn load_data(data_dir: &Path) -> Result<BalanceData> {
    BalanceData::load(data_dir)
        .with_context(|| format!("loading balance data from {:?}", data_dir))
}

/// Parse repeated `Lv.N=COUNT` flags; each label may appear once
fn parse_jellies(jellies: &[String]) -> Result<BTreeMap<String, i64>> {
    let mut parsed = BTreeMap::new();
    for entry in jellies {
        let (label, count) = entry
            .split_once('=')
            .with_context(|| format!("expected LABEL=COUNT, got {:?}", entry))?;
        let count: i64 = count
            .trim()
            .parse()
            .with_context(|| format!("invalid jelly count in {:?}", entry))?;
        let label = label.trim().to_string();
        if parsed.contains_key(&label) {
            bail!("jelly {} given more than once", label);
        }
        parsed.insert(label, count);
    }
    Ok(parsed)
}

fn run_calc(data_dir: &Path, tier: i64, jellies: &[String]) -> Result<()> {
    let calc = load_data(data_dir)?.into_calculator();
    let request = CalcRequest {
        jellies: parse_jellies(jellies)?,
        jelly_upgrade: tier,
    };

    let response = api::handle_calc(&calc, &request)?;
    println!("Max achievable cookie level: {}", response.max_level);
    println!("Total jelly EXP: {}", response.jelly_total_exp);
    match response.exp_to_next_level {
        Some(missing) => println!(
            "Leftover EXP: {} ({} more for level {})",
            response.remainder,
            missing,
            response.max_level + 1
        ),
        None => println!("Leftover EXP past the level cap: {}", response.remainder),
    }
    Ok(())
}

fn run_json(data_dir: &Path, request: Option<PathBuf>) -> Result<()> {
    let body = match request {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("reading request {:?}", path))?,
        None => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body).context("reading request from stdin")?;
            body
        }
    };

    let calc = load_data(data_dir)?.into_calculator();
    let reply = api::handle_json(&calc, &body);
    println!("{}", reply.body);
    if reply.status != 200 {
        bail!("request failed with status {}", reply.status);
    }
    Ok(())
}

fn run_curve(data_dir: &Path) -> Result<()> {
    let curve = load_data(data_dir)?.curve;
    println!("{:>5} {:>12} {:>10}", "Level", "Total EXP", "Step");
    for n in 1..=curve.max_level().get() {
        if let Some(level) = Level::new(n) {
            println!("{:>5} {:>12} {:>10}", n, curve.threshold(level), curve.increment(level));
        }
    }
    Ok(())
}
