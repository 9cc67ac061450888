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

use crate::handle::TaskHandle;

/// Lifetime counters of a [`TaskSlot`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotStats {
    /// Tasks started through [`TaskSlot::restart`].
    pub started:   u64,
    /// Tasks this slot actually cancelled. Repeated cancels of the same task
    /// count once.
    pub cancelled: u64,
}

/// Holds at most one running task.
///
/// [`restart`](TaskSlot::restart) always cancels the current task before the
/// next one is started, so two tasks from the same slot never run side by
/// side.
#[derive(Debug, Default)]
pub struct TaskSlot {
    current: Option<TaskHandle>,
    stats:   SlotStats,
}

impl TaskSlot {
    pub fn new() -> Self { Self::default() }

    /// Cancel the current task, then install the one returned by `start`.
    pub fn restart(&mut self, start: impl FnOnce() -> TaskHandle) {
        self.cancel();
        let handle = start();
        self.stats.started += 1;
        self.current = Some(handle);
    }

    /// Cancel the current task, if any.
    ///
    /// The cancelled handle stays in the slot, so cancelling again is a no-op
    /// on an already-cancelled task. Returns `true` only when a running task
    /// was stopped by this call.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.current.as_ref().is_some_and(TaskHandle::cancel);
        if cancelled {
            self.stats.cancelled += 1;
        }
        cancelled
    }

    /// Whether the slot holds a task that has not been cancelled.
    pub fn is_running(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|handle| !handle.is_cancelled())
    }

    pub fn stats(&self) -> SlotStats { self.stats }
}
