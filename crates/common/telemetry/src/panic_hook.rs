// Copyright 2025 Crrow
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Panic hook that routes panics through `tracing` with a backtrace and
//! counts them.

use std::{panic, sync::LazyLock, thread};

use backtrace::Backtrace;
use prometheus::{IntCounter, register_int_counter};

/// Number of panics observed since the hook was installed.
pub static PANIC_COUNTER: LazyLock<IntCounter> = LazyLock::new(|| {
    register_int_counter!("reelkit_panic_counter", "panic_counter").unwrap()
});

/// Replace the default panic handler with one that logs the panic message,
/// location, thread and backtrace as an error event before delegating to the
/// previous hook.
///
/// The thread name tells a panic on the player loop apart from one in the
/// runtime's blocking pool.
pub fn set_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic| {
        let backtrace = format!("{:?}", Backtrace::new());
        let current = thread::current();
        let thread_name = current.name().unwrap_or("<unnamed>");
        match panic.location() {
            Some(location) => tracing::error!(
                message = %panic,
                backtrace = %backtrace,
                panic.thread = thread_name,
                panic.file = location.file(),
                panic.line = location.line(),
                panic.column = location.column(),
            ),
            None => tracing::error!(
                message = %panic,
                backtrace = %backtrace,
                panic.thread = thread_name,
            ),
        }
        PANIC_COUNTER.inc();
        default_hook(panic);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_panics_on_named_threads() {
        set_panic_hook();
        let before = PANIC_COUNTER.get();
        let result = thread::Builder::new()
            .name("reelkit-player".to_string())
            .spawn(|| panic!("boom"))
            .unwrap()
            .join();
        assert!(result.is_err());
        assert!(PANIC_COUNTER.get() > before);
    }
}
