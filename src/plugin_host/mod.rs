pub mod loader;

pub use loader::{
    check_plugin, CapabilityApi, CapabilityApiError, DisplayerHandle, PluginLoader, PluginProbe,
    ProducerHandle, PLUGIN_ABI_VERSION, REGISTER_SYMBOL,
};
