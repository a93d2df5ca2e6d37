use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spi-flasher", about = "Flash a ROM image through an ESP serial SPI programmer")]
pub struct Cli {
	#[arg(short, long, help = "ROM image to flash")]
	pub file: PathBuf,

	#[arg(short, long, help = "Serial port the programmer is connected to")]
	pub port: String,

	#[arg(
		short,
		long,
		help = "Baud rate to communicate at; try a high value like 921600, 700000, 576000, 250000 or 115200"
	)]
	pub baud: u32,

	#[arg(long, help = "Erase the chip")]
	pub erase: bool,

	#[arg(long, help = "Write the image to the chip")]
	pub write: bool,
}
