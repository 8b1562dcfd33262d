use anyhow::Result;
use chrono::Local;
use clap::Parser;
use password::{Algorithm, Cli, OsEntropy, Strategy, pipeline, request, ui};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use zeroize::Zeroize;

const LOG_ENV: &str = "PASSWORD_LOG";

fn main() -> Result<()> {
    init_logging()?;

    let mut cli = Cli::parse();

    if cli.list_algorithms {
        for algorithm in Algorithm::ALL {
            println!("{}", algorithm);
        }
        return Ok(());
    }

    if cli.prompt_key {
        let key = ui::prompt_key()?;
        cli.key.zeroize();
        cli.key.push_str(&key);
    }

    let resolved = request::resolve(&cli, Local::now().date_naive());
    cli.key.zeroize();
    let request = resolved?;

    let options = ui::DisplayOptions::detect();

    let passes = match request.strategy {
        Strategy::Digest { .. } => request.iterations,
        _ => 0,
    };
    let progress = ui::iteration_progress(passes, request.quiet, options.unicode_support);

    let outcome = pipeline::run(&request, &mut OsEntropy, |n| progress.set_position(n));
    progress.finish_and_clear();
    let outcome = outcome?;

    if request.debug {
        print!("{}", ui::render_debug(&request, &outcome, &options));
    }
    println!("{}", ui::render_result(&request, &outcome));

    Ok(())
}

/// Diagnostics go to stderr so stdout carries only the result.
fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new("warn"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}
