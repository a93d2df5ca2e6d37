pub mod commands;
pub mod message;

pub use commands::{encode_command, Command, Payload};
pub use message::{decode_message, Message};

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
	#[error("device error: {0}")]
	Device(String),

	#[error("unknown message type {tag:?} with data {text:?}")]
	UnknownMessageType { tag: char, text: String },

	#[error("did not receive expected serial message")]
	MissingResponse,

	#[error("value {0} does not fit in a 32-bit field")]
	SizeOverflow(u64),

	#[error("wrong payload kind for {command:?}")]
	PayloadMismatch { command: Command },
}
