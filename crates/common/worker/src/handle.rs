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

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::metrics::TASK_CANCELLED;

/// Owning handle of a spawned task.
///
/// Dropping the handle cancels the task.
#[derive(Debug)]
pub struct TaskHandle {
    name:         &'static str,
    cancel_token: CancellationToken,
    join:         JoinHandle<()>,
}

impl TaskHandle {
    pub(crate) fn new(
        name: &'static str,
        cancel_token: CancellationToken,
        join: JoinHandle<()>,
    ) -> Self {
        TaskHandle {
            name,
            cancel_token,
            join,
        }
    }

    pub fn name(&self) -> &'static str { self.name }

    /// Request cancellation.
    ///
    /// Returns `true` if this call cancelled the task and `false` if it was
    /// already cancelled. Calling it again is harmless.
    pub fn cancel(&self) -> bool {
        if self.cancel_token.is_cancelled() {
            return false;
        }
        self.cancel_token.cancel();
        TASK_CANCELLED.with_label_values(&[self.name]).inc();
        tracing::debug!(task = self.name, "task cancelled");
        true
    }

    pub fn is_cancelled(&self) -> bool { self.cancel_token.is_cancelled() }

    /// Whether the task body has returned.
    pub fn is_finished(&self) -> bool { self.join.is_finished() }
}

impl Drop for TaskHandle {
    fn drop(&mut self) { self.cancel_token.cancel(); }
}
