pub mod admin_gate;

pub use admin_gate::{admin_gate_middleware, AdminIdentity};
