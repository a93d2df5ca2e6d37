use std::time::Duration;

pub const DATA_CHUNK_SIZE: usize = 2048;
pub const DEFAULT_BAUD_RATE: u32 = 9600;

pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(2);
pub const SETUP_TIMEOUT: Duration = Duration::from_millis(250);
pub const TRANSFER_TIMEOUT: Duration = Duration::from_secs(5);

pub const ERASE_DONE: &str = "Chip erased";
pub const WRITE_OK: &str = "W_OK";
