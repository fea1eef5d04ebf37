use log::Level;

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// Route `log` macros to the browser console. Safe to call more than once.
pub fn init_logging(level: Level) {
    let _ = console_log::init_with_level(level);
}
