// skymgr-api: Async Rust client for the skywire hypervisor REST API

pub mod error;
pub mod hypervisor;
pub mod transport;

pub use error::Error;
pub use hypervisor::HypervisorClient;
pub use hypervisor::models::{AppLogs, AppState, TransportLogEntry, TransportSummary};
pub use transport::{TlsMode, TransportConfig};
