//! Host helpers: daily seeds and routing `log` records to the browser console.

/// Seed for the puzzle of a given calendar day, formatted `YYYY-MM-DD`.
///
/// Month and day are zero-padded: canonicalization drops the dashes, and
/// unpadded `2024-1-11` and `2024-11-1` would both become `2024111`.
pub fn daily_seed(year: i32, month: u32, day: u32) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

/// Seed for today's puzzle in the browser's local time.
#[cfg(target_arch = "wasm32")]
pub fn today_seed() -> String {
    let now = js_sys::Date::new_0();
    daily_seed(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
}

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use wasm_bindgen::JsValue;

    struct ConsoleLogger;

    static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
            match record.level() {
                Level::Error => web_sys::console::error_1(&msg),
                Level::Warn => web_sys::console::warn_1(&msg),
                Level::Info => web_sys::console::info_1(&msg),
                Level::Debug | Level::Trace => web_sys::console::log_1(&msg),
            }
        }

        fn flush(&self) {}
    }

    pub fn init(level: LevelFilter) {
        // A second call keeps the first logger; only the level changes.
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(level);
    }
}

/// Send `log` output to the browser console at `level` and above.
#[cfg(target_arch = "wasm32")]
pub fn init_console_logger(level: log::LevelFilter) {
    console::init(level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::canonicalize_seed;

    #[test]
    fn daily_seed_is_zero_padded() {
        assert_eq!(daily_seed(2024, 1, 1), "2024-01-01");
        assert_eq!(daily_seed(2025, 12, 31), "2025-12-31");
    }

    #[test]
    fn distinct_days_never_share_a_canonical_seed() {
        let a = canonicalize_seed(&daily_seed(2024, 1, 11)).unwrap();
        let b = canonicalize_seed(&daily_seed(2024, 11, 1)).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, "20240111");
    }
}
