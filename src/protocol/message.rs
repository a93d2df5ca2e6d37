use crate::protocol::ProtocolError;

/// One decoded response line from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
	/// `#` — status text for display.
	Info(String),
	/// `!` — failure report, text conventionally prefixed `"ERROR: "`.
	Error(String),
	/// `@` — MD5 hex digest of the last data chunk the device received.
	Checksum(String),
	/// Nothing arrived before the read timed out. Not an error by itself;
	/// the caller decides whether silence is acceptable.
	Empty,
}

pub fn decode_message(line: &[u8]) -> Result<Message, ProtocolError> {
	let text = String::from_utf8_lossy(line);
	let text = text.trim();

	let Some(tag) = text.chars().next() else {
		return Ok(Message::Empty);
	};
	let rest = text[tag.len_utf8()..].to_string();

	match tag {
		'#' => Ok(Message::Info(rest)),
		'!' => Ok(Message::Error(rest)),
		'@' => Ok(Message::Checksum(rest)),
		_ => Err(ProtocolError::UnknownMessageType { tag, text: rest }),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn info_line_keeps_text() {
		let msg = decode_message(b"#Erasing chip...\n").unwrap();
		assert_eq!(msg, Message::Info("Erasing chip...".to_string()));
	}

	#[test]
	fn error_line_keeps_raw_text() {
		let msg = decode_message(b"!ERROR: File size exceeds flash size\n").unwrap();
		assert_eq!(msg, Message::Error("ERROR: File size exceeds flash size".to_string()));
	}

	#[test]
	fn checksum_line_is_verbatim() {
		let msg = decode_message(b"@d41d8cd98f00b204e9800998ecf8427e\n").unwrap();
		assert_eq!(msg, Message::Checksum("d41d8cd98f00b204e9800998ecf8427e".to_string()));
	}

	#[test]
	fn blank_line_is_the_empty_sentinel() {
		assert_eq!(decode_message(b"").unwrap(), Message::Empty);
		assert_eq!(decode_message(b"\r\n").unwrap(), Message::Empty);
	}

	#[test]
	fn unknown_tag_is_rejected() {
		let err = decode_message(b"?whoops\n").unwrap_err();
		assert!(matches!(
			err,
			ProtocolError::UnknownMessageType { tag: '?', ref text } if text == "whoops"
		));
	}
}
