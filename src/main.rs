mod cli;
mod consts;
mod protocol;
mod session;
mod transport;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use consts::*;
use session::{FlashOptions, Session};
use transport::SerialTransport;

fn main() {
	let cli = Cli::parse();
	if let Err(err) = run(&cli) {
		eprintln!("{err:#}");
		eprintln!("Flash failed");
		std::process::exit(1);
	}
}

fn run(cli: &Cli) -> Result<()> {
	eprintln!("Reading file...");
	let image = std::fs::read(&cli.file)
		.with_context(|| format!("could not read {}", cli.file.display()))?;

	eprintln!("Initiating connection...");
	let handshake = SerialTransport::open(&cli.port, DEFAULT_BAUD_RATE, HANDSHAKE_TIMEOUT)?;
	Session::new(handshake).negotiate_baud(cli.baud)?;

	// The device has switched to the new rate; reopen the port to match
	let transport = SerialTransport::open(&cli.port, cli.baud, SETUP_TIMEOUT)?;
	let mut session = Session::new(transport);
	session.flash(
		&image,
		&FlashOptions {
			erase: cli.erase,
			write: cli.write,
		},
	)
}
