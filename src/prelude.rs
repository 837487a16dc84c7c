//! Crier public prelude (curated stable-intent exports).
//! Import with: `use crier::prelude::*;`
//!
//! Items here are considered *stable-intent* prior to 1.0.0. Their shape may
//! still adjust minimally until the first tagged release, but we aim to avoid
//! breaking renames or removals. Exclusions are deliberate.

pub use crate::capability::{
    CapabilityRegistrar, DisplayError, HostContext, MessageDisplayer, MessageHub, MessageProducer,
    ProduceError,
};
pub use crate::config::Config;
pub use crate::record::{Grid, GridError, PodRecord};

// NOTE: plugin ABI surface (CapabilityApi, handles) intentionally NOT
// re-exported yet; plugins should import it from `plugin_host` directly.
