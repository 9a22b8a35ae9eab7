//! Change computer implementations.
//!
//! One [`ChangeComputer`](crate::diff::ChangeComputer) per snapshot section:
//! switches (spine and leaf), endpoints, and connections.

mod connections;
mod devices;

pub use connections::{ConnectionChangeComputer, compare_connection_sets};
pub use devices::{DeviceChangeComputer, DeviceGroup, compare_device_sets};
