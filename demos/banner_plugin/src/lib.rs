use std::sync::atomic::{AtomicUsize, Ordering};

use crier::capability::{
    DisplayError, HostContext, MessageDisplayer, MessageProducer, ProduceError,
};
use crier::plugin_host::CapabilityApi;
use crier::record::PodRecord;

const QUOTES: [&str; 3] = [
    "The show must go on.",
    "Hear ye, hear ye!",
    "Read all about it.",
];

/// Cycles through a fixed list of quotes, one per call.
pub struct QuoteProducer {
    next: AtomicUsize,
}

impl QuoteProducer {
    pub fn new() -> Self {
        Self {
            next: AtomicUsize::new(0),
        }
    }
}

impl Default for QuoteProducer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageProducer for QuoteProducer {
    fn produce(&self) -> Result<String, ProduceError> {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % QUOTES.len();
        Ok(QUOTES[idx].to_string())
    }

    fn name(&self) -> &str {
        "Quote Producer"
    }
}

/// Wraps everything it is given in a banner line.
pub struct BannerDisplayer;

impl MessageDisplayer for BannerDisplayer {
    fn display(&self, message: &str, ctx: &HostContext) -> Result<(), DisplayError> {
        ctx.output.write_line(&format!("*** {} ***", message))?;
        Ok(())
    }

    fn show_record(&self, record: &mut PodRecord, ctx: &HostContext) -> Result<(), DisplayError> {
        let value = record.grid.get(0, 0)?;
        ctx.output.write_line(&format!("*** value {} ***", value))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "Banner Displayer"
    }
}

#[no_mangle]
pub unsafe extern "C" fn register_capabilities(api: *const CapabilityApi) {
    let api = match CapabilityApi::from_raw(api) {
        Ok(api) => api,
        Err(err) => {
            eprintln!("[banner_plugin] invalid capability API: {err}");
            return;
        }
    };
    if let Err(err) = api.register_producer(Box::new(QuoteProducer::new())) {
        eprintln!("[banner_plugin] failed to register producer: {err}");
    }
    if let Err(err) = api.register_displayer(Box::new(BannerDisplayer)) {
        eprintln!("[banner_plugin] failed to register displayer: {err}");
    }
}
