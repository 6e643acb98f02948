//! Shutdown signal handling.
//!
//! SIGINT and SIGTERM are consumed on a background thread that clears a shared
//! running flag. The tick loop polls the flag between short sleeps.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGINT, SIGTERM},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

use crate::logger::Log;

/// Install the handler and return the running flag it controls.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<Arc<AtomicBool>> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    let mut signals =
        Signals::new([SIGTERM, SIGINT]).context("Failed to register signal handlers")?;

    thread::Builder::new()
        .name("almanac-signals".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                Log::log_pipe();
                Log::log_info(&format!("Shutdown signal received: {}", signal));
                r.store(false, Ordering::SeqCst);
                if debug_enabled {
                    Log::log_debug("Set running flag to false");
                }
            }
        })
        .context("Failed to spawn signal handling thread")?;

    Ok(running)
}
