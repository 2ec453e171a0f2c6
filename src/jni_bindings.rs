use jni::objects::{JClass, JObject, JObjectArray, JString};
use jni::sys::{jboolean, jint, jlong, jobjectArray};
use jni::JNIEnv;
use log::{error, info, warn};
use std::panic;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use lazy_static::lazy_static;
use crate::config::LogSettings;
use crate::dispatcher::DispatchReport;
use crate::error::Result;
use crate::level::LogLevel;
use crate::logging::init_android_logger;
use crate::manager::LogManager;
use crate::printer::{ConsolePrinter, LogPrinter, ViewPrinter};
use crate::value::LogValue;

// Process-wide state reachable from the static Java entry points
lazy_static! {
    static ref LOG_MANAGER: ArcSwapOption<LogManager> = ArcSwapOption::empty();
    static ref VIEW_PRINTERS: DashMap<jlong, Arc<ViewPrinter>> = DashMap::new();
    // Serializes manager installs against view printer registration
    static ref REGISTRY_LOCK: Mutex<()> = Mutex::new(());
}

static NEXT_VIEW_HANDLE: AtomicI64 = AtomicI64::new(1);

// Macro to simplify access to the installed manager
macro_rules! with_manager {
    ($method_name:expr, $return_value:expr, $manager:ident => $code:block) => {
        match LOG_MANAGER.load_full() {
            Some($manager) => $code,
            None => {
                error!("HiLog not initialized, {} ignored", $method_name);
                $return_value
            }
        }
    };
}

fn lock_registry() -> MutexGuard<'static, ()> {
    match REGISTRY_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("Registry mutex poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

// Runs native work so that a panic never unwinds into the JVM
fn guarded<T>(method_name: &str, fallback: T, work: impl FnOnce() -> T) -> T {
    match panic::catch_unwind(panic::AssertUnwindSafe(work)) {
        Ok(value) => value,
        Err(panic_err) => {
            error!("{} panicked: {:?}", method_name, panic_err);
            fallback
        }
    }
}

/// Installs a fresh manager. View printers created by an earlier install
/// keep their handles and are attached to the new manager.
fn install_manager(settings_json: &str) -> Result<()> {
    let config = LogSettings::from_json(settings_json)?.into_config();
    info!("Installing HiLog manager with config: {:?}", config);

    let _guard = lock_registry();
    let mut printers: Vec<Arc<dyn LogPrinter>> = vec![Arc::new(ConsolePrinter::new())];
    let mut handles: Vec<jlong> = VIEW_PRINTERS.iter().map(|entry| *entry.key()).collect();
    handles.sort_unstable();
    for handle in handles {
        if let Some(printer) = VIEW_PRINTERS.get(&handle) {
            printers.push(printer.value().clone());
        }
    }
    if printers.len() > 1 {
        info!("Carrying {} view printer(s) over to the new manager", printers.len() - 1);
    }
    LOG_MANAGER.store(Some(Arc::new(LogManager::new(config, printers))));
    Ok(())
}

fn log_contents(priority: i32, tag: Option<String>, contents: Vec<String>) -> Result<Option<DispatchReport>> {
    let level = LogLevel::try_from(priority)?;
    let values: Vec<LogValue> = contents.into_iter().map(LogValue::from).collect();
    with_manager!("nativeLog", Ok(None), manager => {
        let report = match tag {
            Some(tag) => manager.log_with_tag(level, &tag, &values)?,
            None => manager.log(level, &values)?,
        };
        Ok(Some(report))
    })
}

fn register_view_printer(capacity: usize) -> jlong {
    let _guard = lock_registry();
    with_manager!("nativeCreateViewPrinter", 0, manager => {
        let printer = Arc::new(ViewPrinter::new(capacity));
        let handle = NEXT_VIEW_HANDLE.fetch_add(1, Ordering::Relaxed);
        manager.add_printer(printer.clone());
        VIEW_PRINTERS.insert(handle, printer);
        info!("View printer registered, handle: {}", handle);
        handle
    })
}

fn unregister_view_printer(handle: jlong) -> bool {
    let _guard = lock_registry();
    match VIEW_PRINTERS.remove(&handle) {
        Some((_, printer)) => {
            if let Some(manager) = LOG_MANAGER.load_full() {
                let printer: Arc<dyn LogPrinter> = printer;
                manager.remove_printer(&printer);
            }
            info!("View printer destroyed, handle: {}", handle);
            true
        }
        None => {
            warn!("No view printer found for handle: {}", handle);
            false
        }
    }
}

fn drain_view_logs(handle: jlong) -> Option<Vec<String>> {
    VIEW_PRINTERS.get(&handle).map(|printer| {
        printer
            .drain()
            .iter()
            .map(|item| item.assemble_visual_log())
            .collect()
    })
}

// Helper function to read a Java String[]; null elements read as "null"
fn read_string_array<'local>(env: &mut JNIEnv<'local>, array: &JObjectArray<'local>) -> jni::errors::Result<Vec<String>> {
    if array.is_null() {
        return Ok(Vec::new());
    }
    let len = env.get_array_length(array)?;
    let mut strings = Vec::with_capacity(len.max(0) as usize);
    for i in 0..len {
        let element = env.get_object_array_element(array, i)?;
        if element.is_null() {
            strings.push("null".to_string());
            continue;
        }
        let java_string = JString::from(element);
        let value: String = env.get_string(&java_string)?.into();
        env.delete_local_ref(java_string)?;
        strings.push(value);
    }
    Ok(strings)
}

// Helper function to build a Java String[] from the drained logs
fn new_string_array<'local>(env: &mut JNIEnv<'local>, strings: &[String]) -> jni::errors::Result<JObjectArray<'local>> {
    let string_class = env.find_class("java/lang/String")?;
    let java_array = env.new_object_array(strings.len() as i32, &string_class, JObject::null())?;
    for (i, s) in strings.iter().enumerate() {
        let java_string = env.new_string(s)?;
        env.set_object_array_element(&java_array, i as i32, &java_string)?;
        env.delete_local_ref(java_string)?;
    }
    Ok(java_array)
}

// Lifecycle management

#[no_mangle]
pub extern "system" fn Java_org_devio_hi_library_log_HiLogNative_nativeInit<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass,
    settings_json: JString<'local>,
) -> jboolean {
    init_android_logger();

    let settings_str: String = if settings_json.is_null() {
        String::new()
    } else {
        match env.get_string(&settings_json) {
            Ok(s) => s.into(),
            Err(e) => {
                error!("Failed to get settings string: {:?}", e);
                return 0;
            }
        }
    };

    guarded("nativeInit", 0, || match install_manager(&settings_str) {
        Ok(()) => {
            info!("HiLog initialized successfully");
            1
        }
        Err(e) => {
            error!("Failed to initialize HiLog: {}", e);
            0
        }
    })
}

// Logging

#[no_mangle]
pub extern "system" fn Java_org_devio_hi_library_log_HiLogNative_nativeLog<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass,
    priority: jint,
    tag: JString<'local>,
    contents: JObjectArray<'local>,
) {
    let tag_str: Option<String> = if tag.is_null() {
        None
    } else {
        match env.get_string(&tag) {
            Ok(s) => Some(s.into()),
            Err(e) => {
                error!("Failed to get tag string: {:?}", e);
                return;
            }
        }
    };

    let contents_vec = match read_string_array(&mut env, &contents) {
        Ok(v) => v,
        Err(e) => {
            error!("Failed to read log contents: {:?}", e);
            return;
        }
    };

    guarded("nativeLog", (), || match log_contents(priority, tag_str, contents_vec) {
        Ok(Some(report)) if !report.is_clean() => {
            warn!("{} printer(s) failed during dispatch", report.failures.len());
        }
        Ok(_) => {}
        Err(e) => {
            error!("Failed to dispatch log: {}", e);
        }
    })
}

// View printer management

#[no_mangle]
pub extern "system" fn Java_org_devio_hi_library_log_HiLogNative_nativeCreateViewPrinter(
    _env: JNIEnv,
    _class: JClass,
    capacity: jint,
) -> jlong {
    if capacity <= 0 {
        error!("Invalid view printer capacity: {}", capacity);
        return 0;
    }
    guarded("nativeCreateViewPrinter", 0, || register_view_printer(capacity as usize))
}

#[no_mangle]
pub extern "system" fn Java_org_devio_hi_library_log_HiLogNative_nativeDestroyViewPrinter(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    if handle == 0 {
        error!("Attempted to destroy null view printer handle");
        return;
    }
    guarded("nativeDestroyViewPrinter", false, || unregister_view_printer(handle));
}

#[no_mangle]
pub extern "system" fn Java_org_devio_hi_library_log_HiLogNative_nativeDrainViewLogs<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass,
    handle: jlong,
) -> jobjectArray {
    let logs = guarded("nativeDrainViewLogs", None, || drain_view_logs(handle)).unwrap_or_else(|| {
        error!("Invalid view printer handle: {}", handle);
        Vec::new()
    });

    match new_string_array(&mut env, &logs) {
        Ok(java_array) => java_array.into_raw(),
        Err(e) => {
            error!("Failed to create Java array: {:?}", e);
            std::ptr::null_mut()
        }
    }
}
