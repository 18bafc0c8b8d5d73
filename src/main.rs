use clap::Parser;
use nestrouter::cli::{run_cli, Cli};
use nestrouter::logging::{init_logging_with_config, LogConfig, LogFormat};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    log_config.log_level = cli.log_level.clone();
    log_config.format = LogFormat::parse(&cli.log_format);
    init_logging_with_config(&log_config)?;

    let stdout = std::io::stdout();
    run_cli(&cli, &mut stdout.lock())
}
