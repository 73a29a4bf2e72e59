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

use std::{
	fs,
	io::{self, Write},
	path::PathBuf,
	sync::atomic::{AtomicUsize, Ordering},
};

use clap::Parser;
use lending_engine::{amortization, ConfigError, EngineConfig};
use lending_primitives::{constants::SECONDS_PER_MONTH, Moment};
use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;

use crate::{
	cli::{AmortizeCmd, Cli, SimulateCmd, Subcommand},
	simulation::{Scenario, Simulation},
};

static GLOBAL_INIT: AtomicUsize = AtomicUsize::new(UNINITIALIZED);

const UNINITIALIZED: usize = 0;
const INITIALIZING: usize = 1;
const INITIALIZED: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
	#[error("configuration: {0}")]
	Config(#[from] ConfigError),

	#[error("failed to read {path:?}: {source}")]
	Io { path: PathBuf, source: io::Error },

	#[error("malformed scenario: {0}")]
	Scenario(#[from] serde_json::Error),

	#[error("arithmetic error: {0:?}")]
	Arithmetic(sp_arithmetic::ArithmeticError),

	#[error("failed to write output: {0}")]
	Output(#[source] io::Error),
}

/// Logs go to stderr so that stdout only carries results.
pub fn init_logs(level: LevelFilter) {
	if GLOBAL_INIT
		.compare_exchange(
			UNINITIALIZED,
			INITIALIZING,
			Ordering::SeqCst,
			Ordering::SeqCst,
		)
		.is_ok()
	{
		GLOBAL_INIT.store(INITIALIZED, Ordering::SeqCst);
		tracing_subscriber::fmt::fmt()
			.with_max_level(level)
			.with_writer(io::stderr)
			.init();
	}
}

/// Parse and run command line arguments
pub fn run() -> Result<(), CliError> {
	let cli = Cli::parse();
	init_logs(cli.log_level);

	let config = cli.engine.engine_config()?;
	let stdout = io::stdout();

	match cli.subcommand {
		Subcommand::CheckConfig => print_json(stdout.lock(), &config),
		Subcommand::Simulate(cmd) => simulate(config, &cmd, stdout.lock()),
		Subcommand::Amortize(cmd) => amortize(&cmd, stdout.lock()),
	}
}

fn print_json(mut out: impl Write, value: &impl Serialize) -> Result<(), CliError> {
	serde_json::to_writer_pretty(&mut out, value)?;
	writeln!(out).map_err(CliError::Output)
}

fn simulate(config: EngineConfig, cmd: &SimulateCmd, out: impl Write) -> Result<(), CliError> {
	let content = fs::read_to_string(&cmd.scenario).map_err(|source| CliError::Io {
		path: cmd.scenario.clone(),
		source,
	})?;
	let scenario: Scenario = serde_json::from_str(&content)?;

	log::info!(
		"replaying {} steps from {:?}",
		scenario.steps.len(),
		cmd.scenario
	);

	let start_time = scenario.start_time.unwrap_or(cmd.start_time);
	Simulation::new(config, start_time)?
		.run(scenario, out)
		.map_err(CliError::Output)?;

	Ok(())
}

#[derive(Debug, Serialize)]
struct AmortizationTerms {
	monthly_payment: u128,
	expected_interest: u128,
	schedule: Vec<lending_types::Installment>,
}

fn amortize(cmd: &AmortizeCmd, out: impl Write) -> Result<(), CliError> {
	let maturity_at = Moment::from(cmd.months) * SECONDS_PER_MONTH;

	let terms = AmortizationTerms {
		monthly_payment: amortization::monthly_payment(cmd.principal, cmd.rate_bps, cmd.months)
			.map_err(CliError::Arithmetic)?,
		expected_interest: amortization::expected_interest(
			cmd.principal,
			cmd.rate_bps,
			cmd.months,
		)
		.map_err(CliError::Arithmetic)?,
		schedule: amortization::payment_schedule(cmd.principal, cmd.rate_bps, 0, 0, maturity_at)
			.map_err(CliError::Arithmetic)?,
	};

	print_json(out, &terms)
}
