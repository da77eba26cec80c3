//! bloom-blocker: check domains against a Bloom-filtered hosts blocklist

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use bloom_blocker::report::{default_sweep_rates, sweep, write_csv_file};
use bloom_blocker::telemetry::init_tracing;
use bloom_blocker::{load_domain_list, load_hostfile, BlockerConfig, BloomBlocker, Metrics};

/// Bloom filter domain blocker
#[derive(Parser, Debug)]
#[command(name = "bloom-blocker")]
#[command(about = "Check domains against a hosts blocklist held in a Bloom filter")]
struct Args {
    /// Hosts file with `0.0.0.0 <hostname>` lines (overrides BLOOM_HOSTS_FILE)
    #[arg(long, global = true)]
    hosts: Option<PathBuf>,

    /// Target false positive rate (overrides BLOOM_FPR)
    #[arg(long, global = true)]
    fpr: Option<f64>,

    /// Emit JSON logs (overrides BLOOM_JSON_LOGS)
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report whether each domain is blocked
    Check {
        #[arg(required = true)]
        domains: Vec<String>,
    },

    /// Count blocked entries in an IP-prefixed domain list
    Scan {
        #[arg(long)]
        domains: PathBuf,

        /// Print lookup metrics as JSON
        #[arg(long)]
        metrics: bool,
    },

    /// Measure false positives across target rates and write a CSV
    Sweep {
        /// Known-good domains, IP-prefixed
        #[arg(long)]
        domains: PathBuf,

        #[arg(long, default_value = "error_test.csv")]
        out: PathBuf,

        /// Print samples as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    let mut config = BlockerConfig::from_env().context("Failed to read environment")?;
    if let Some(hosts) = args.hosts {
        config.hosts_file = hosts;
    }
    if let Some(fpr) = args.fpr {
        config.false_positive_rate = fpr;
    }
    config.json_logs |= args.json_logs;
    config.validate()?;

    init_tracing(&config)?;

    let hosts = load_hostfile(&config.hosts_file)
        .with_context(|| format!("Failed to load blocklist {}", config.hosts_file.display()))?;

    match args.command {
        Command::Check { domains } => {
            let blocker = BloomBlocker::new(&hosts, config.false_positive_rate)?;
            let mut any_blocked = false;
            for domain in &domains {
                let blocked = blocker.check_domain(domain)?;
                any_blocked |= blocked;
                println!("{}\t{}", domain, if blocked { "blocked" } else { "allowed" });
            }
            // Exit 1 when nothing was blocked
            Ok(if any_blocked {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }

        Command::Scan { domains, metrics } => {
            let list = load_domain_list(&domains)
                .with_context(|| format!("Failed to load domains {}", domains.display()))?;
            let recorder = Arc::new(Metrics::new());
            let blocker = BloomBlocker::builder(&hosts)
                .false_positive_rate(config.false_positive_rate)
                .metrics(recorder.clone())
                .build()?;

            let blocked = blocker.count_blocked(&list)?;
            println!("Blocklist entries: {}", blocker.len());
            println!("Domains checked:   {}", list.len());
            println!("Blocked:           {}", blocked);
            println!("Blocked rate:      {:.4}", recorder.blocked_rate());
            println!(
                "Filter size:       {:.2} KB",
                blocker.dimension() as f64 / (8.0 * 1024.0)
            );
            if metrics {
                println!("{}", serde_json::to_string_pretty(&recorder.snapshot())?);
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Sweep { domains, out, json } => {
            let list = load_domain_list(&domains)
                .with_context(|| format!("Failed to load domains {}", domains.display()))?;
            info!(hosts = hosts.len(), domains = list.len(), "Starting sweep");

            let samples = sweep(&hosts, &list, &default_sweep_rates())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&samples)?);
            } else {
                for sample in &samples {
                    println!("PF: {}", sample.fpr);
                    println!("Size: {} KB", sample.dimension_kb);
                    println!("False positives: {}", sample.false_positives);
                    println!("************************************");
                }
            }
            write_csv_file(&out, &samples)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Written to {}", out.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}
