// Copyright 2023 Centrifuge Foundation (centrifuge.io).
//
// This file is part of the Centrifuge chain project.
// Centrifuge is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version (see http://www.gnu.org/licenses).
// Centrifuge is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

use std::path::PathBuf;

use lending_engine::{ConfigError, EngineConfig};
use lending_primitives::{Balance, Bps, Months, Moment, MAX_LOAN_MONTHS};
use tracing_subscriber::filter::LevelFilter;

/// Operator tooling for the NFT lending engine.
#[derive(Debug, clap::Parser)]
#[clap(name = "nft-lending", version)]
pub struct Cli {
	#[clap(subcommand)]
	pub subcommand: Subcommand,

	/// Maximum level of the logs written to stderr.
	#[clap(long, global = true, default_value = "info")]
	pub log_level: LevelFilter,

	#[clap(flatten)]
	pub engine: EngineParams,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
	/// Validate and print the effective engine configuration.
	CheckConfig,

	/// Replay a scenario against an in-memory settlement authority.
	Simulate(SimulateCmd),

	/// Print the amortization terms of a loan.
	Amortize(AmortizeCmd),
}

/// Engine configuration. Flags take precedence over the configuration file.
#[derive(Clone, Debug, clap::Args)]
pub struct EngineParams {
	/// JSON file holding the engine configuration.
	#[clap(long, global = true)]
	pub config: Option<PathBuf>,

	/// Loan-to-value, in basis points, from which loans can be liquidated.
	#[clap(long, global = true)]
	pub liquidation_threshold_bps: Option<Bps>,

	/// Amount of payments retained by the journal.
	#[clap(long, global = true)]
	pub journal_capacity: Option<u32>,

	/// Longest loan duration accepted, in days.
	#[clap(long, global = true)]
	pub max_duration_days: Option<u32>,
}

impl EngineParams {
	pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
		let mut config = match &self.config {
			Some(path) => EngineConfig::from_file(path)?,
			None => EngineConfig::default(),
		};

		if let Some(threshold) = self.liquidation_threshold_bps {
			config.liquidation_threshold_bps = threshold;
		}

		if let Some(capacity) = self.journal_capacity {
			config.journal_capacity = capacity;
		}

		if let Some(days) = self.max_duration_days {
			config.max_duration_days = days;
		}

		config.validate()?;
		Ok(config)
	}
}

#[derive(Clone, Debug, clap::Args)]
pub struct SimulateCmd {
	/// JSON scenario to replay.
	#[clap(long)]
	pub scenario: PathBuf,

	/// UNIX time at which the simulated clock starts, unless the scenario
	/// sets one.
	#[clap(long, default_value = "1700000000")]
	pub start_time: Moment,
}

#[derive(Clone, Debug, clap::Args)]
pub struct AmortizeCmd {
	#[clap(long)]
	pub principal: Balance,

	/// Annual interest rate in basis points.
	#[clap(long)]
	pub rate_bps: Bps,

	#[clap(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_LOAN_MONTHS)))]
	pub months: Months,
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use clap::Parser;

	use super::*;

	#[test]
	fn parse_simulate() {
		let cli = Cli::try_parse_from([
			"nft-lending",
			"simulate",
			"--scenario",
			"scenario.json",
			"--liquidation-threshold-bps",
			"7000",
		])
		.unwrap();

		assert_eq!(cli.log_level, LevelFilter::INFO);
		assert_eq!(cli.engine.liquidation_threshold_bps, Some(7000));
		match cli.subcommand {
			Subcommand::Simulate(cmd) => {
				assert_eq!(cmd.scenario, PathBuf::from("scenario.json"));
				assert_eq!(cmd.start_time, 1_700_000_000);
			}
			other => panic!("unexpected subcommand {other:?}"),
		}
	}

	#[test]
	fn amortize_months_are_bounded() {
		let parse = |months: &str| {
			Cli::try_parse_from([
				"nft-lending",
				"amortize",
				"--principal",
				"1000",
				"--rate-bps",
				"0",
				"--months",
				months,
			])
		};

		assert!(parse("1200").is_ok());
		assert!(parse("1201").is_err());
		assert!(parse("4294967295").is_err());
		assert!(parse("0").is_err());
	}

	#[test]
	fn flags_override_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, r#"{{ "liquidation_threshold_bps": 6000, "journal_capacity": 5 }}"#).unwrap();

		let params = EngineParams {
			config: Some(file.path().to_path_buf()),
			liquidation_threshold_bps: Some(9000),
			journal_capacity: None,
			max_duration_days: None,
		};

		let config = params.engine_config().unwrap();
		assert_eq!(config.liquidation_threshold_bps, 9000);
		assert_eq!(config.journal_capacity, 5);
	}

	#[test]
	fn invalid_override() {
		let params = EngineParams {
			config: None,
			liquidation_threshold_bps: None,
			journal_capacity: Some(0),
			max_duration_days: None,
		};

		assert!(matches!(
			params.engine_config(),
			Err(ConfigError::Invalid(_))
		));
	}
}
