//! # fountain-core
//!
//! LT rateless fountain code core: robust-soliton encoding, GF(2)
//! Gaussian-elimination decoding, CRC-32 integrity tagging, and the wire
//! framing and channel-simulation harness needed to exercise it end to end.
//!
//! ## Crate structure
//!
//! - [`block`] — splitting a payload into fixed-size source blocks and
//!   recombining them
//! - [`soliton`] — the robust-soliton degree distribution
//! - [`encoder`] — systematic-prefix LT encoder
//! - [`gf2`] — word-packed GF(2) rows and build-once/replay-many elimination
//! - [`decoder`] — symbol collection and reconstruction
//! - [`integrity`] — CRC-32 tagging and verify-and-strip
//! - [`error`] — the crate's error type
//! - [`metrics`] — degree histograms, decode timing, rejection counters
//! - [`wire`] — ASCII/JSON symbol, metadata, and sync frame formats
//! - [`session`] — deduplicating receiver-session façade over [`decoder`]
//! - [`channel`] — burst and Gilbert-Elliott erasure simulators (test-only)
//! - [`fixtures`] — deterministic payload generator shared by tests

pub mod block;
pub mod channel;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod fixtures;
pub mod gf2;
pub mod integrity;
pub mod metrics;
pub mod session;
pub mod soliton;
pub mod wire;

pub use decoder::Decoder;
pub use encoder::{Encoder, EncoderConfig, Symbol};
pub use error::FountainError;
pub use integrity::{RejectReason, Verified};
pub use metrics::{FountainMetrics, MetricsSummary};
pub use session::{ReceiverSession, SessionStatus};
