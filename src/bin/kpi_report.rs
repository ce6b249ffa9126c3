use anyhow::Context;
use clap::Parser;
use shopsy_dashboard::data::loader::load_file;
use shopsy_dashboard::report::{build_report, ReportArgs};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = ReportArgs::parse();

    let table = load_file(&args.path)
        .with_context(|| format!("loading {}", args.path.display()))?;
    log::info!("Loaded {} rows from {}", table.len(), args.path.display());

    let report = build_report(&table, &args.selection(&table));
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
