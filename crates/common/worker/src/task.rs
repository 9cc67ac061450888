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

use std::{future::Future, time::Duration};

use tokio_util::sync::CancellationToken;

use crate::{
    context::TaskContext,
    driver::IntervalDriver,
    handle::TaskHandle,
    metrics::{TASK_EXECUTIONS, TASK_STARTED},
};

/// Spawn a cancellable task on the current runtime.
///
/// The future built by `f` is dropped at its next suspension point once the
/// returned handle is cancelled or dropped.
///
/// # Panics
///
/// Panics when called outside of a Tokio runtime.
pub fn spawn<F, Fut>(name: &'static str, f: F) -> TaskHandle
where
    F: FnOnce(TaskContext) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    let cancel_token = CancellationToken::new();
    let ctx = TaskContext::new(name, cancel_token.clone());
    let work = f(ctx.clone());

    TASK_STARTED.with_label_values(&[name]).inc();
    tracing::debug!(task = name, "task started");

    let join = tokio::spawn(async move {
        tokio::select! {
            biased;
            () = ctx.cancelled() => {}
            () = work => {}
        }
        tracing::trace!(task = ctx.name(), "task stopped");
    });

    TaskHandle::new(name, cancel_token, join)
}

/// Spawn a task that calls `tick` every `period`, starting immediately.
pub fn spawn_interval<F>(name: &'static str, period: Duration, mut tick: F) -> TaskHandle
where
    F: FnMut() + Send + 'static,
{
    spawn(name, move |ctx| async move {
        let mut driver = IntervalDriver::new(period);
        while driver.wait_next(&ctx).await {
            TASK_EXECUTIONS.with_label_values(&[ctx.name()]).inc();
            tick();
        }
    })
}
