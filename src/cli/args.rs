use crate::config::{Config, VelocityLimits};
use crate::strategy::PipelineConfig;
use crate::types::VelocityError;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Decide fund-load requests against daily and weekly velocity limits
#[derive(Parser, Debug)]
#[command(name = "velocity-limits")]
#[command(about = "Decide fund-load requests against daily and weekly velocity limits", long_about = None)]
pub struct CliArgs {
    /// Input file containing one JSON load request per line
    #[arg(
        value_name = "INPUT",
        help = "Path to the input file (falls back to files.input_file in the config)"
    )]
    pub input_file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "PATH", help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    /// Output file for decisions
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Write decisions here instead of stdout (falls back to files.output_file)"
    )]
    pub output_file: Option<PathBuf>,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for a single loop or 'async' for the staged pipeline"
    )]
    pub strategy: StrategyType,

    /// Capacity of each pipeline channel (async mode only)
    #[arg(
        long = "channel-capacity",
        value_name = "SIZE",
        help = "Capacity of each pipeline channel (default: 1)"
    )]
    pub channel_capacity: Option<usize>,

    /// Runtime worker threads (async mode only)
    #[arg(
        long = "worker-threads",
        value_name = "COUNT",
        help = "Tokio worker threads (default: CPU cores, at most 3)"
    )]
    pub worker_threads: Option<usize>,

    /// Override velocity_limit.max_daily_load_amount
    #[arg(long = "max-daily-amount", value_name = "AMOUNT")]
    pub max_daily_amount: Option<Decimal>,

    /// Override velocity_limit.max_daily_transaction_count
    #[arg(long = "max-daily-count", value_name = "COUNT")]
    pub max_daily_count: Option<u32>,

    /// Override velocity_limit.max_weekly_load_amount
    #[arg(long = "max-weekly-amount", value_name = "AMOUNT")]
    pub max_weekly_amount: Option<Decimal>,
}

/// Available processing strategies
#[derive(Clone, Debug, PartialEq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Everything a run needs, after merging CLI, config file and defaults
#[derive(Clone, Debug, PartialEq)]
pub struct RunSettings {
    pub input_file: PathBuf,
    /// `None` means stdout
    pub output_file: Option<PathBuf>,
    pub limits: VelocityLimits,
    pub strategy: StrategyType,
    pub pipeline: PipelineConfig,
}

impl CliArgs {
    /// Create a PipelineConfig from CLI arguments
    ///
    /// Missing values take the defaults; zero values are replaced by the
    /// defaults with a warning.
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        if self.channel_capacity.is_some() || self.worker_threads.is_some() {
            let default = PipelineConfig::default();
            PipelineConfig::new(
                self.channel_capacity.unwrap_or(default.channel_capacity),
                self.worker_threads.unwrap_or(default.worker_threads),
            )
        } else {
            PipelineConfig::default()
        }
    }

    /// Load the config file (if any) and merge it with the CLI arguments
    pub fn resolve(&self) -> Result<RunSettings, VelocityError> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        self.resolve_with(config)
    }

    /// Merge an already loaded config with the CLI arguments
    ///
    /// Command-line values win over the config file, which wins over defaults.
    pub fn resolve_with(&self, config: Config) -> Result<RunSettings, VelocityError> {
        let mut limits = config.velocity_limit;
        if let Some(amount) = self.max_daily_amount {
            limits.max_daily_load_amount = amount;
        }
        if let Some(count) = self.max_daily_count {
            limits.max_daily_transaction_count = count;
        }
        if let Some(amount) = self.max_weekly_amount {
            limits.max_weekly_load_amount = amount;
        }
        limits.validate()?;

        let input_file = self
            .input_file
            .clone()
            .or(config.files.input_file)
            .ok_or(VelocityError::MissingInput)?;
        let output_file = self.output_file.clone().or(config.files.output_file);

        Ok(RunSettings {
            input_file,
            output_file,
            limits,
            strategy: self.strategy.clone(),
            pipeline: self.to_pipeline_config(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Strategy parsing tests
    #[rstest]
    #[case::default_strategy(&["program", "input.txt"], StrategyType::Async)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "input.txt"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "input.txt"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.strategy, expected);
    }

    #[rstest]
    #[case::all_defaults(&["program", "input.txt"], 1, PipelineConfig::default().worker_threads)]
    #[case::custom_capacity(&["program", "--channel-capacity", "64", "input.txt"], 64, PipelineConfig::default().worker_threads)]
    #[case::custom_workers(&["program", "--worker-threads", "2", "input.txt"], 1, 2)]
    #[case::zero_capacity_falls_back(&["program", "--channel-capacity", "0", "input.txt"], 1, PipelineConfig::default().worker_threads)]
    fn test_pipeline_config_conversion(
        #[case] args: &[&str],
        #[case] expected_capacity: usize,
        #[case] expected_workers: usize,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_pipeline_config();

        assert_eq!(config.channel_capacity, expected_capacity);
        assert_eq!(config.worker_threads, expected_workers);
    }

    #[test]
    fn test_resolve_defaults() {
        let parsed = CliArgs::try_parse_from(["program", "input.txt"]).unwrap();
        let settings = parsed.resolve().unwrap();

        assert_eq!(settings.input_file, PathBuf::from("input.txt"));
        assert_eq!(settings.output_file, None);
        assert_eq!(settings.limits, VelocityLimits::default());
    }

    #[test]
    fn test_resolve_cli_overrides_config() {
        let mut config = Config::default();
        config.velocity_limit.max_daily_load_amount = Decimal::new(100, 0);
        config.velocity_limit.max_daily_transaction_count = 9;
        config.files.input_file = Some(PathBuf::from("from_config.txt"));
        config.files.output_file = Some(PathBuf::from("out_config.txt"));

        let parsed = CliArgs::try_parse_from([
            "program",
            "--max-daily-amount",
            "250.5",
            "-o",
            "out_cli.txt",
            "from_cli.txt",
        ])
        .unwrap();
        let settings = parsed.resolve_with(config).unwrap();

        assert_eq!(settings.input_file, PathBuf::from("from_cli.txt"));
        assert_eq!(settings.output_file, Some(PathBuf::from("out_cli.txt")));
        assert_eq!(settings.limits.max_daily_load_amount, Decimal::new(2505, 1));
        assert_eq!(settings.limits.max_daily_transaction_count, 9);
        assert_eq!(
            settings.limits.max_weekly_load_amount,
            Decimal::new(20000, 0)
        );
    }

    #[test]
    fn test_resolve_input_from_config() {
        let mut config = Config::default();
        config.files.input_file = Some(PathBuf::from("from_config.txt"));

        let parsed = CliArgs::try_parse_from(["program"]).unwrap();
        let settings = parsed.resolve_with(config).unwrap();
        assert_eq!(settings.input_file, PathBuf::from("from_config.txt"));
    }

    #[test]
    fn test_resolve_without_input_fails() {
        let parsed = CliArgs::try_parse_from(["program"]).unwrap();
        assert_eq!(
            parsed.resolve_with(Config::default()),
            Err(VelocityError::MissingInput)
        );
    }

    #[test]
    fn test_resolve_negative_override_fails() {
        let parsed =
            CliArgs::try_parse_from(["program", "--max-weekly-amount=-1", "input.txt"]).unwrap();
        assert!(matches!(
            parsed.resolve_with(Config::default()),
            Err(VelocityError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_resolve_reads_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[velocity_limit]\nmax_weekly_load_amount = 900\n[files]\ninput_file = \"in.txt\""
        )
        .unwrap();
        file.flush().unwrap();

        let path = file.path().to_str().unwrap();
        let parsed = CliArgs::try_parse_from(["program", "--config", path]).unwrap();
        let settings = parsed.resolve().unwrap();

        assert_eq!(settings.input_file, PathBuf::from("in.txt"));
        assert_eq!(settings.limits.max_weekly_load_amount, Decimal::new(900, 0));
    }

    // Error handling tests
    #[rstest]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "input.txt"])]
    #[case::invalid_amount(&["program", "--max-daily-amount", "lots", "input.txt"])]
    #[case::negative_count(&["program", "--max-daily-count", "-3", "input.txt"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
