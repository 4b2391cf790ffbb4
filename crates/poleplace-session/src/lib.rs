//! Control sessions over plant links.
//!
//! A session is one accepted connection's single cycle: read the two-byte
//! request, run the feedback law, write the one-byte response, append the
//! decoded state to the log sink, close. [`Server`] runs sessions one after
//! another on a single thread; a slow peer holds up everyone behind it.

pub mod client;
pub mod error;
pub mod server;
pub mod session;
pub mod sink;

pub use client::{exchange, exchange_with_timeout};
pub use error::{Result, SessionError};
pub use server::{ServeSummary, Server, ServerConfig};
pub use session::{SessionConfig, SessionHandler};
pub use sink::{format_record, CsvFileSink, LogSink, MemorySink, DEFAULT_LOG_PATH};
