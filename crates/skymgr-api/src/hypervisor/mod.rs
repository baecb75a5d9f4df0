// Hypervisor REST API
//
// One client type; endpoint groups live in sibling files as inherent
// methods so `client.rs` stays focused on transport mechanics.

mod apps;
mod client;
pub mod models;
mod transports;

pub use client::HypervisorClient;
