use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::protocol::ProtocolError;

/// Host-to-device commands. Each maps to exactly one wire tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
	SetBaud,
	SetErase,
	SetWrite,
	SetFileSize,
	SendFlashData,
	DoErase,
	DoFlash,
	DoReset,
}

impl Command {
	pub fn tag(self) -> u8 {
		match self {
			Command::SetBaud => b'!',
			Command::SetErase => b'@',
			Command::SetWrite => b'#',
			Command::SetFileSize => b'$',
			Command::SendFlashData => b'%',
			Command::DoErase => b'^',
			Command::DoFlash => b'&',
			Command::DoReset => b'*',
		}
	}
}

pub enum Payload<'a> {
	Empty,
	Size(u64),
	Flag(bool),
	Data(&'a [u8]),
}

/// Builds the wire frame for one command: tag byte, base64 payload, newline.
///
/// Which payload kind a command takes is fixed; a mismatch is a caller bug
/// and fails before anything is transmitted.
pub fn encode_command(command: Command, payload: Payload) -> Result<Vec<u8>, ProtocolError> {
	let raw = match (command, payload) {
		(Command::SetBaud | Command::SetFileSize, Payload::Size(value)) => {
			let value = u32::try_from(value).map_err(|_| ProtocolError::SizeOverflow(value))?;
			value.to_le_bytes().to_vec()
		}
		(Command::SetErase | Command::SetWrite, Payload::Flag(flag)) => {
			vec![if flag { b'1' } else { b'0' }]
		}
		(Command::SendFlashData, Payload::Data(data)) => data.to_vec(),
		(Command::DoErase | Command::DoFlash | Command::DoReset, Payload::Empty) => Vec::new(),
		(command, _) => return Err(ProtocolError::PayloadMismatch { command }),
	};

	let encoded = BASE64.encode(&raw);
	let mut frame = Vec::with_capacity(encoded.len() + 2);
	frame.push(command.tag());
	frame.extend_from_slice(encoded.as_bytes());
	frame.push(b'\n');
	Ok(frame)
}
