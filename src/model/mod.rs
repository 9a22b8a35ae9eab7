//! Data model for fabric drift detection.
//!
//! Two shapes of topology live here:
//!
//! - [`TopologySnapshot`]: the desired state, as produced by the topology
//!   designer and persisted as a baseline.
//! - [`ControlPlaneResponse`]: the observed state, as reported by a live
//!   control plane in custom-resource form.
//!
//! [`CanonicalId`] and [`IdentityIndex`] bridge the two by normalizing ids
//! once before any lookup.

mod identifiers;
mod observed;
mod snapshot;

pub use identifiers::*;
pub use observed::*;
pub use snapshot::*;
