use std::sync::Once;

static LOGGER_INIT: Once = Once::new();

/// Routes the `log` facade to logcat. No fixed tag is set: android_logger
/// then uses each record's module path as the tag, which the console
/// printer fills with the per-call tag.
pub fn init_android_logger() {
    LOGGER_INIT.call_once(|| {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Trace)
                .format(|f, record| write!(f, "{}", record.args()))
        );
        log::info!("Android logger initialized for HiLog");
    });
}
