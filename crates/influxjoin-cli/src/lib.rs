//! influxjoin plumbing
//!
//! The boundary collaborators around the influxjoin-core derivation:
//! Kubernetes pod listing, local address resolution, and env-file
//! persistence. The derivation itself lives in influxjoin-core and never
//! touches any of this.

pub mod envfile;
pub mod hostip;
pub mod registry;

pub use envfile::write_env_file;
pub use hostip::external_ipv4;
pub use registry::PodRegistry;
