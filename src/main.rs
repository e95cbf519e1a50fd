use std::io::{self, Write};
use std::process;

use env_logger::Env;
use log::debug;

use placement::app::Config;
use placement::data::Snapshot;
use placement::report::render_report;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = match Config::from_args() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            process::exit(1);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("placement error: {err}");
        process::exit(1);
    }
}

fn run(config: &Config) -> placement::Result<()> {
    let snapshot = Snapshot::load(&config.snapshot)?;
    let topology = config.topology(&snapshot)?;
    debug!("loaded {} tasks from {}", snapshot.tasks.len(), config.snapshot.display());

    let report = render_report(&snapshot, &topology, &config.report_options())?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(report.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
