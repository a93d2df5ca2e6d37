use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::consts::*;
use crate::protocol::{decode_message, encode_command, Command, Message, Payload, ProtocolError};
use crate::transport::Transport;

pub struct FlashOptions {
	pub erase: bool,
	pub write: bool,
}

/// One request/response exchange at a time against one device. Never
/// pipelined: every command is followed by its read before the next send.
pub struct Session<T> {
	transport: T,
}

impl<T: Transport> Session<T> {
	pub fn new(transport: T) -> Self {
		Session { transport }
	}

	/// Asks the device to switch its baud rate. The device answers on the
	/// old rate (if at all); the caller must reopen the port at the new rate
	/// before anything else.
	pub fn negotiate_baud(&mut self, baud: u32) -> Result<()> {
		self.command(Command::SetBaud, Payload::Size(u64::from(baud)))?;
		self.read_message(false)?;
		Ok(())
	}

	/// Runs the full programming sequence: mode flags and file size, then
	/// the erase and write phases as requested.
	pub fn flash(&mut self, image: &[u8], options: &FlashOptions) -> Result<()> {
		eprintln!("Setting things up...");
		self.transport.set_timeout(SETUP_TIMEOUT)?;

		self.command(Command::SetErase, Payload::Flag(options.erase))?;
		self.read_message(false)?;
		self.command(Command::SetWrite, Payload::Flag(options.write))?;
		self.read_message(false)?;
		self.command(Command::SetFileSize, Payload::Size(image.len() as u64))?;
		self.read_message(false)?;

		// Erase and write take much longer per response than the setup
		// exchanges
		self.transport.set_timeout(TRANSFER_TIMEOUT)?;

		if options.erase {
			self.erase()?;
		}
		if options.write {
			self.write_image(image)?;
			// Fire and forget; the device reboots without replying
			self.command(Command::DoReset, Payload::Empty)?;
		}
		Ok(())
	}

	fn erase(&mut self) -> Result<()> {
		self.command(Command::DoErase, Payload::Empty)?;

		let spinner = ProgressBar::new_spinner();
		spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
		spinner.set_message("Erasing chip...");

		// The device streams status lines while it works; empty reads are
		// just the timeout ticking over, so keep polling until the marker.
		loop {
			match self.read_message(true)? {
				Some(text) if text == ERASE_DONE => break,
				Some(text) => spinner.set_message(text),
				None => {}
			}
		}

		spinner.finish_with_message("Erase complete.");
		Ok(())
	}

	fn write_image(&mut self, image: &[u8]) -> Result<()> {
		eprintln!("Write in progress...");

		let pb = ProgressBar::new(image.len() as u64);
		pb.set_style(
			ProgressStyle::default_bar()
				.template("{spinner:.cyan} [{bar:40.cyan/dim}] {bytes}/{total_bytes} ({eta})")?
				.progress_chars("=> "),
		);

		let mut written = 0u64;
		for chunk in image.chunks(DATA_CHUNK_SIZE) {
			let local_hash = format!("{:x}", md5::compute(chunk));

			// Resend until the device echoes back a matching digest. No
			// retry cap: a flaky link eventually yields a clean transfer.
			loop {
				self.command(Command::SendFlashData, Payload::Data(chunk))?;
				if self.read_required(true)? == local_hash {
					break;
				}
				pb.println("Hash mismatch, retrying...");
			}

			self.command(Command::DoFlash, Payload::Empty)?;
			loop {
				if let Some(text) = self.read_message(true)? {
					if text == WRITE_OK {
						break;
					}
				}
			}

			written += chunk.len() as u64;
			pb.set_position(written);
		}

		pb.finish();
		eprintln!("Write complete!");
		Ok(())
	}

	fn command(&mut self, command: Command, payload: Payload) -> Result<()> {
		let frame = encode_command(command, payload)?;
		self.transport.send(&frame)
	}

	/// Reads and classifies one response line.
	///
	/// INFO text is echoed to stderr unless `mute_info` is set and is
	/// returned either way; checksum text is returned verbatim; an ERROR
	/// aborts with the device's own text; an empty read yields `None`.
	fn read_message(&mut self, mute_info: bool) -> Result<Option<String>> {
		let line = self.transport.read_line()?;
		match decode_message(&line)? {
			Message::Empty => Ok(None),
			Message::Info(text) => {
				if !mute_info {
					eprintln!("{text}");
				}
				Ok(Some(text))
			}
			Message::Error(text) => {
				let text = text.strip_prefix("ERROR: ").unwrap_or(&text).to_string();
				Err(ProtocolError::Device(text).into())
			}
			Message::Checksum(text) => Ok(Some(text)),
		}
	}

	/// Like `read_message`, but silence from the device is fatal.
	fn read_required(&mut self, mute_info: bool) -> Result<String> {
		self.read_message(mute_info)?
			.ok_or_else(|| ProtocolError::MissingResponse.into())
	}
}
