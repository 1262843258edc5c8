//! `log` facade wiring.
//!
//! Native builds leave logger installation to the host (tests, tools). On
//! wasm32 a small bridge forwards records to the browser console.

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, LevelFilter, Log, Metadata, Record};

    pub(super) struct ConsoleLogger;

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = format!("[{}] {}", record.target(), record.args());
            let value = wasm_bindgen::JsValue::from_str(&line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&value),
                Level::Warn => web_sys::console::warn_1(&value),
                Level::Info => web_sys::console::info_1(&value),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
            }
        }

        fn flush(&self) {}
    }

    pub(super) fn install(level: LevelFilter) {
        // A second init() call keeps the first logger.
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(level);
        }
    }
}

/// Install the console logger (wasm32 only). Safe to call more than once.
pub fn init_logging(level: log::LevelFilter) {
    #[cfg(target_arch = "wasm32")]
    console::install(level);
    #[cfg(not(target_arch = "wasm32"))]
    let _ = level;
}
