//! # Tunnelgate Core
//!
//! The dual-path verification engine.
//!
//! * **[`connector`]**: the [`Connector`](connector::Connector) seam and the
//!   interface-bound TLS implementation.
//! * **[`network`]**: socket pinning and TLS plumbing used by the connector.
//! * **[`orchestrator`]**: launches the probes concurrently and joins them.
//! * **[`run`]**: evaluates the gate and picks the response to surface.

pub mod connector;
pub mod network;
pub mod orchestrator;
pub mod run;
