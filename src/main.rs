use anyhow::{format_err, Context};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use qferm::interfaces::cli::{log_heading, Cli};
use qferm::interfaces::input::Input;
use qferm::interfaces::InputHandle;
use qferm::io::read_qferm_yaml;

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // The `qferm-output` logger carries the main calculation output; everything else only
    // surfaces warnings and errors on the console.
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{m}{n}")))
        .build();
    let config_builder =
        Config::builder().appender(Appender::builder().build("stdout", Box::new(stdout)));
    let config = if let Some(output) = cli.output.as_ref() {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{m}{n}")))
            .append(!cli.overwrite)
            .build(output)
            .with_context(|| {
                format!("Unable to open the output file {}", output.display())
            })?;
        config_builder
            .appender(Appender::builder().build("qferm-output-file", Box::new(file)))
            .logger(
                Logger::builder()
                    .appender("qferm-output-file")
                    .additive(false)
                    .build("qferm-output", LevelFilter::Info),
            )
            .build(Root::builder().appender("stdout").build(LevelFilter::Warn))?
    } else {
        config_builder
            .logger(
                Logger::builder()
                    .appender("stdout")
                    .additive(false)
                    .build("qferm-output", LevelFilter::Info),
            )
            .build(Root::builder().appender("stdout").build(LevelFilter::Warn))?
    };
    log4rs::init_config(config)?;

    log_heading();

    let config_path = cli
        .config
        .ok_or_else(|| format_err!("No configuration file specified; use `--config`."))?;
    let input: Input = read_qferm_yaml(&config_path).with_context(|| {
        format!(
            "Unable to parse the configuration file {}",
            config_path.display()
        )
    })?;
    input.handle()
}
