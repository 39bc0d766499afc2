//! panel-runner: headless feature panel builder.
//!
//! Usage:
//!   panel-runner --seed 888 --donors 1000 --end-year 2021 --db panel.db
//!   panel-runner --csv ledger.csv --config panel_config.json --db panel.db

use anyhow::{Context, Result};
use donorpanel_core::{
    pipeline::FeaturePipeline,
    store::PanelStore,
    synthetic::{generate_ledger, SyntheticLedgerConfig},
    FeaturePanelRow, GivingLedger, PanelConfig, Transaction,
};
use std::env;

#[derive(serde::Deserialize)]
struct CsvRow {
    donor_id:    i64,
    fiscal_year: i32,
    amount:      f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 888u64);
    let donors = parse_arg(&args, "--donors", 1000u32);
    let csv_path = str_arg(&args, "--csv");
    let config_path = str_arg(&args, "--config");
    let db = str_arg(&args, "--db").unwrap_or("panel.db");

    let mut config = match config_path {
        Some(path) => PanelConfig::load(path)?,
        None => PanelConfig::default(),
    };
    if let Some(year) = args
        .windows(2)
        .find(|w| w[0] == "--end-year")
        .and_then(|w| w[1].parse().ok())
    {
        config.panel_end_year = year;
    }

    let (ledger, generator_seed) = match csv_path {
        Some(path) => (load_csv_ledger(path)?, None),
        None => {
            let synthetic = SyntheticLedgerConfig {
                seed,
                donor_count: donors,
                end_year: config.panel_end_year,
                ..SyntheticLedgerConfig::default()
            };
            log::info!("generating synthetic ledger (seed={seed}, donors={donors})");
            (generate_ledger(&synthetic), Some(seed))
        }
    };

    let pipeline = FeaturePipeline::new(config.clone());
    let panel = pipeline.run(&ledger)?;

    let mut store = PanelStore::open(db)?;
    store.migrate()?;
    let run_id = PanelStore::new_run_id();
    store.insert_run(
        &run_id,
        generator_seed,
        config.panel_end_year,
        &serde_json::to_string(&config)?,
    )?;
    store.insert_panel(&run_id, &panel)?;

    print_summary(&run_id, &ledger, &panel, db);
    Ok(())
}

fn load_csv_ledger(path: &str) -> Result<GivingLedger> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("cannot open {path}"))?;
    let mut transactions = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        transactions.push(Transaction {
            donor_id:    row.donor_id,
            fiscal_year: row.fiscal_year,
            amount:      row.amount,
        });
    }
    log::info!("loaded {} transactions from {path}", transactions.len());
    Ok(GivingLedger::new(transactions)?)
}

fn print_summary(run_id: &str, ledger: &GivingLedger, panel: &[FeaturePanelRow], db: &str) {
    let donors: std::collections::HashSet<i64> =
        panel.iter().map(|r| r.donor_id).collect();
    let churned = panel.iter().filter(|r| r.churn == 1).count();
    let censored = panel.iter().filter(|r| r.censored).count();
    let total_given: f64 = panel.iter().map(|r| r.amount_given).sum();

    println!("run {run_id}");
    println!("  transactions: {}", ledger.len());
    println!("  donors:       {}", donors.len());
    println!("  panel rows:   {}", panel.len());
    println!("  total given:  ${total_given:.2}");
    println!(
        "  churn rows:   {churned} ({:.1}%)",
        100.0 * churned as f64 / panel.len().max(1) as f64
    );
    if censored > 0 {
        println!("  censored:     {censored}");
    }
    println!("  written to:   {db}");
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
