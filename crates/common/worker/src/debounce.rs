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

use std::time::Duration;

use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Quiet period used by [`Debouncer::default`].
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);

/// Coalesces a burst of values into one emission per quiet period.
///
/// Every [`put`](Debouncer::put) replaces the pending value and restarts the
/// quiet window; the value is emitted on the stream once `window` passes
/// without another `put`. The stream can be taken once. Dropping the
/// debouncer ends the stream and discards a value that was still pending.
///
/// ```rust
/// use std::time::Duration;
///
/// use futures::StreamExt;
/// use reelkit_common_worker::Debouncer;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let debouncer = Debouncer::new(Duration::from_millis(10));
/// let mut values = Box::pin(debouncer.stream().unwrap());
///
/// debouncer.put(1);
/// debouncer.put(2);
/// assert_eq!(values.next().await, Some(2));
/// # }
/// ```
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    tx:     mpsc::UnboundedSender<T>,
    rx:     Mutex<Option<mpsc::UnboundedReceiver<T>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Debouncer {
            window,
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    pub fn window(&self) -> Duration { self.window }

    /// Offer a value. Never blocks.
    pub fn put(&self, value: T) {
        if self.tx.send(value).is_err() {
            tracing::trace!("debounced stream dropped, value discarded");
        }
    }

    /// Take the debounced stream.
    ///
    /// Returns `None` once the stream has already been taken.
    pub fn stream(&self) -> Option<impl Stream<Item = T> + Send + 'static> {
        let rx = self.rx.lock().take()?;
        let window = self.window;
        Some(futures::stream::unfold(rx, move |mut rx| async move {
            let mut pending = rx.recv().await?;
            loop {
                match tokio::time::timeout(window, rx.recv()).await {
                    Ok(Some(next)) => pending = next,
                    Ok(None) => return None,
                    Err(_) => return Some((pending, rx)),
                }
            }
        }))
    }
}

impl<T: Send + 'static> Default for Debouncer<T> {
    fn default() -> Self { Self::new(DEFAULT_DEBOUNCE_WINDOW) }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::StreamExt;
    use tokio::time::{Instant, sleep};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn emits_only_the_latest_value_of_a_burst() {
        let debouncer = Debouncer::default();
        let mut values = Box::pin(debouncer.stream().unwrap());

        debouncer.put(1);
        debouncer.put(2);
        debouncer.put(3);

        assert_eq!(values.next().await, Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn put_within_window_restarts_the_timer() {
        let debouncer = Arc::new(Debouncer::new(Duration::from_millis(200)));
        let mut values = Box::pin(debouncer.stream().unwrap());
        let started = Instant::now();

        debouncer.put("first");
        let late = debouncer.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(150)).await;
            late.put("second");
        });

        assert_eq!(values.next().await, Some("second"));
        assert!(started.elapsed() >= Duration::from_millis(350));
    }

    #[tokio::test(start_paused = true)]
    async fn values_separated_by_quiet_periods_are_all_emitted() {
        let debouncer = Debouncer::new(Duration::from_millis(200));
        let mut values = Box::pin(debouncer.stream().unwrap());

        debouncer.put(10);
        assert_eq!(values.next().await, Some(10));

        sleep(Duration::from_millis(500)).await;
        debouncer.put(20);
        assert_eq!(values.next().await, Some(20));
    }

    #[test]
    fn stream_can_only_be_taken_once() {
        let debouncer: Debouncer<u32> = Debouncer::default();
        assert!(debouncer.stream().is_some());
        assert!(debouncer.stream().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_debouncer_ends_the_stream() {
        let debouncer = Debouncer::default();
        let mut values = Box::pin(debouncer.stream().unwrap());

        debouncer.put(7);
        drop(debouncer);

        assert_eq!(values.next().await, None);
    }
}
