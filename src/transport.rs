use std::io::{self, Read as _, Write as _};
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// The serial link as the session sees it: write one frame, read one line.
///
/// `read_line` returns an empty buffer when the timeout expires with nothing
/// received; whether that is acceptable depends on the session phase.
pub trait Transport {
	fn send(&mut self, frame: &[u8]) -> Result<()>;
	fn read_line(&mut self) -> Result<Vec<u8>>;
	fn set_timeout(&mut self, timeout: Duration) -> Result<()>;
}

pub struct SerialTransport {
	port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
	pub fn open(path: &str, baud: u32, timeout: Duration) -> Result<Self> {
		let port = serialport::new(path, baud)
			.data_bits(serialport::DataBits::Eight)
			.stop_bits(serialport::StopBits::One)
			.parity(serialport::Parity::None)
			.timeout(timeout)
			.open()
			.with_context(|| format!("could not connect to device on {path}"))?;
		Ok(SerialTransport { port })
	}
}

impl Transport for SerialTransport {
	fn send(&mut self, frame: &[u8]) -> Result<()> {
		self.port.write_all(frame)?;
		self.port.flush()?;
		Ok(())
	}

	fn read_line(&mut self) -> Result<Vec<u8>> {
		let mut line = Vec::new();
		let mut byte = [0u8; 1];
		loop {
			match self.port.read(&mut byte) {
				Ok(0) => bail!("serial port EOF"),
				Ok(_) => {
					line.push(byte[0]);
					if byte[0] == b'\n' {
						return Ok(line);
					}
				}
				Err(e) if e.kind() == io::ErrorKind::TimedOut => return Ok(line),
				Err(e) => return Err(e.into()),
			}
		}
	}

	fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
		self.port.set_timeout(timeout)?;
		Ok(())
	}
}
