// Lets Crier host capability plugins.
// Dynamically loads platform libraries at runtime: .so (Linux), .dylib (macOS), .dll (Windows).

use std::ffi::c_void;
use std::fs;
use std::path::Path;

use libloading::{Library, Symbol};

use crate::capability::{CapabilityRegistrar, MessageDisplayer, MessageProducer};
use crate::events::dispatcher;
use crate::events::model::{LogEvent, LogLevel, PluginEvent};

pub const PLUGIN_ABI_VERSION: u32 = 1;

/// Symbol every capability plugin must export.
pub const REGISTER_SYMBOL: &[u8] = b"register_capabilities";

/// Opaque handle representing a boxed producer instance.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct ProducerHandle {
    pub data: *mut c_void,
    pub vtable: *mut c_void,
}

impl ProducerHandle {
    pub fn from_producer(producer: Box<dyn MessageProducer>) -> Self {
        let raw: *mut dyn MessageProducer = Box::into_raw(producer);
        let parts: [*mut c_void; 2] = unsafe { std::mem::transmute(raw) };
        Self {
            data: parts[0],
            vtable: parts[1],
        }
    }

    /// # Safety
    /// Caller must ensure the handle originated from `from_producer` in the same process.
    pub unsafe fn into_producer(self) -> Box<dyn MessageProducer> {
        let parts = [self.data, self.vtable];
        let raw: *mut dyn MessageProducer = std::mem::transmute(parts);
        Box::from_raw(raw)
    }
}

/// Opaque handle representing a boxed displayer instance.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct DisplayerHandle {
    pub data: *mut c_void,
    pub vtable: *mut c_void,
}

impl DisplayerHandle {
    pub fn from_displayer(displayer: Box<dyn MessageDisplayer>) -> Self {
        let raw: *mut dyn MessageDisplayer = Box::into_raw(displayer);
        let parts: [*mut c_void; 2] = unsafe { std::mem::transmute(raw) };
        Self {
            data: parts[0],
            vtable: parts[1],
        }
    }

    /// # Safety
    /// Caller must ensure the handle originated from `from_displayer` in the same process.
    pub unsafe fn into_displayer(self) -> Box<dyn MessageDisplayer> {
        let parts = [self.data, self.vtable];
        let raw: *mut dyn MessageDisplayer = std::mem::transmute(parts);
        Box::from_raw(raw)
    }
}

type RegisterProducerFn = unsafe extern "C" fn(ctx: *mut c_void, producer: ProducerHandle);

type RegisterDisplayerFn = unsafe extern "C" fn(ctx: *mut c_void, displayer: DisplayerHandle);

type RegisterCapabilitiesFn = unsafe extern "C" fn(api: *const CapabilityApi);

#[repr(C)]
pub struct CapabilityApi {
    abi_version: u32,
    host_context: *mut c_void,
    register_producer: Option<RegisterProducerFn>,
    register_displayer: Option<RegisterDisplayerFn>,
    reserved: [usize; 4],
}

impl CapabilityApi {
    pub fn abi_version(&self) -> u32 {
        self.abi_version
    }

    pub fn register_producer(
        &self,
        producer: Box<dyn MessageProducer>,
    ) -> Result<(), CapabilityApiError> {
        let handler = self.checked_handler(self.register_producer)?;
        let handle = ProducerHandle::from_producer(producer);
        unsafe {
            handler(self.host_context, handle);
        }
        Ok(())
    }

    pub fn register_displayer(
        &self,
        displayer: Box<dyn MessageDisplayer>,
    ) -> Result<(), CapabilityApiError> {
        let handler = self.checked_handler(self.register_displayer)?;
        let handle = DisplayerHandle::from_displayer(displayer);
        unsafe {
            handler(self.host_context, handle);
        }
        Ok(())
    }

    fn checked_handler<F>(&self, handler: Option<F>) -> Result<F, CapabilityApiError> {
        if self.abi_version != PLUGIN_ABI_VERSION {
            return Err(CapabilityApiError::VersionMismatch {
                expected: PLUGIN_ABI_VERSION,
                received: self.abi_version,
            });
        }
        let handler = handler.ok_or(CapabilityApiError::MissingHandler)?;
        if self.host_context.is_null() {
            return Err(CapabilityApiError::NullContext);
        }
        Ok(handler)
    }

    /// # Safety
    /// The caller must ensure that `ptr` points to a valid `CapabilityApi` instance
    /// with the expected ABI layout. Passing an invalid or dangling pointer is undefined behavior.
    pub unsafe fn from_raw<'a>(
        ptr: *const CapabilityApi,
    ) -> Result<&'a CapabilityApi, CapabilityApiError> {
        ptr.as_ref().ok_or(CapabilityApiError::NullApi)
    }

    fn for_host(handle: &mut RegistrarHandle) -> Self {
        Self {
            abi_version: PLUGIN_ABI_VERSION,
            host_context: handle as *mut _ as *mut c_void,
            register_producer: Some(register_producer_thunk),
            register_displayer: Some(register_displayer_thunk),
            reserved: [0; 4],
        }
    }
}

#[derive(Debug)]
pub enum CapabilityApiError {
    NullApi,
    VersionMismatch { expected: u32, received: u32 },
    MissingHandler,
    NullContext,
}

impl std::fmt::Display for CapabilityApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapabilityApiError::NullApi => write!(f, "capability API pointer was null"),
            CapabilityApiError::VersionMismatch { expected, received } => write!(
                f,
                "plugin ABI version mismatch (expected {}, received {})",
                expected, received
            ),
            CapabilityApiError::MissingHandler => {
                write!(f, "host did not supply a registration callback")
            }
            CapabilityApiError::NullContext => {
                write!(f, "host context pointer missing for registration callback")
            }
        }
    }
}

impl std::error::Error for CapabilityApiError {}

#[repr(C)]
struct RegistrarHandle {
    data: *mut c_void,
    vtable: *mut c_void,
}

impl RegistrarHandle {
    fn from_registrar(registrar: &mut dyn CapabilityRegistrar) -> Self {
        let raw: *mut dyn CapabilityRegistrar = registrar as *mut dyn CapabilityRegistrar;
        let parts: [*mut c_void; 2] = unsafe { std::mem::transmute(raw) };
        Self {
            data: parts[0],
            vtable: parts[1],
        }
    }

    unsafe fn as_mut(&mut self) -> &mut dyn CapabilityRegistrar {
        let parts = [self.data, self.vtable];
        let raw: *mut dyn CapabilityRegistrar = std::mem::transmute(parts);
        &mut *raw
    }
}

unsafe extern "C" fn register_producer_thunk(ctx: *mut c_void, handle: ProducerHandle) {
    if ctx.is_null() {
        return;
    }
    let registrar_handle = &mut *(ctx as *mut RegistrarHandle);
    let registrar = unsafe { registrar_handle.as_mut() };
    let producer = unsafe { handle.into_producer() };
    registrar.register_producer(producer);
}

unsafe extern "C" fn register_displayer_thunk(ctx: *mut c_void, handle: DisplayerHandle) {
    if ctx.is_null() {
        return;
    }
    let registrar_handle = &mut *(ctx as *mut RegistrarHandle);
    let registrar = unsafe { registrar_handle.as_mut() };
    let displayer = unsafe { handle.into_displayer() };
    registrar.register_displayer(displayer);
}

pub struct PluginLoader {
    loaded: Vec<Library>,
}

impl Default for PluginLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginLoader {
    pub fn new() -> Self {
        Self { loaded: Vec::new() }
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    fn is_dynamic_lib(path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => {
                let ext = ext.to_ascii_lowercase();
                ext == "so" || ext == "dylib" || ext == "dll"
            }
            None => false,
        }
    }

    fn plugin_name(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    /// Loads one plugin library and lets it register its capabilities.
    /// The library stays loaded for the loader's lifetime, so registered
    /// capabilities remain callable.
    pub fn load_plugin(
        &mut self,
        path: &Path,
        registrar: &mut dyn CapabilityRegistrar,
    ) -> anyhow::Result<()> {
        unsafe {
            let lib = Library::new(path).map_err(|e| anyhow::anyhow!(e))?;
            let register: Symbol<RegisterCapabilitiesFn> =
                lib.get(REGISTER_SYMBOL).map_err(|e| anyhow::anyhow!(e))?;
            let mut handle = RegistrarHandle::from_registrar(registrar);
            let api = CapabilityApi::for_host(&mut handle);
            register(&api as *const CapabilityApi);
            println!("🔌 Loaded plugin: {}", path.display());
            emit_plugin_event(Self::plugin_name(path), "loaded", None);
            self.loaded.push(lib);
        }
        Ok(())
    }

    /// Loads every dynamic library in `plugin_dir`. A plugin that fails to
    /// load or register is skipped, the rest still load.
    pub fn load_plugins<P: AsRef<Path>>(
        &mut self,
        plugin_dir: P,
        registrar: &mut dyn CapabilityRegistrar,
    ) -> anyhow::Result<()> {
        for entry in fs::read_dir(plugin_dir)? {
            let path = entry?.path();
            if Self::is_dynamic_lib(&path) {
                if let Err(e) = self.load_plugin(&path, registrar) {
                    println!("⚠️ Skipping plugin {}: {}", path.display(), e);
                    emit_plugin_event(Self::plugin_name(&path), "load_failed", Some(e.to_string()));
                }
            }
        }
        Ok(())
    }
}

fn emit_plugin_event(plugin: String, action: &str, detail: Option<String>) {
    let mut meta = dispatcher::meta("plugin_host", LogLevel::Info);
    meta.corr_id = Some(dispatcher::correlation_id());
    dispatcher::emit(LogEvent::Plugin(PluginEvent {
        meta,
        plugin,
        action: action.to_string(),
        detail,
    }));
}

/// What a plugin registered during a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginProbe {
    pub producers: usize,
    pub displayers: usize,
}

struct CountingRegistrar {
    producers: usize,
    displayers: usize,
}

impl CapabilityRegistrar for CountingRegistrar {
    fn register_producer(&mut self, _producer: Box<dyn MessageProducer>) {
        self.producers += 1;
    }

    fn register_displayer(&mut self, _displayer: Box<dyn MessageDisplayer>) {
        self.displayers += 1;
    }
}

/// Loads a plugin just long enough to see what it would register.
/// The registered capabilities are dropped before the library is unloaded.
pub fn check_plugin(path: &Path) -> anyhow::Result<PluginProbe> {
    if !PluginLoader::is_dynamic_lib(path) {
        anyhow::bail!("{} is not a dynamic library", path.display());
    }
    let mut counting = CountingRegistrar {
        producers: 0,
        displayers: 0,
    };
    unsafe {
        let lib = Library::new(path).map_err(|e| anyhow::anyhow!(e))?;
        let register: Symbol<RegisterCapabilitiesFn> =
            lib.get(REGISTER_SYMBOL).map_err(|e| anyhow::anyhow!(e))?;
        let mut handle = RegistrarHandle::from_registrar(&mut counting);
        let api = CapabilityApi::for_host(&mut handle);
        register(&api as *const CapabilityApi);
    }
    Ok(PluginProbe {
        producers: counting.producers,
        displayers: counting.displayers,
    })
}
