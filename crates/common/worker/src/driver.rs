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

use crate::context::TaskContext;

/// Drives a repeating task at a fixed period.
///
/// The first tick completes immediately. Missed ticks are skipped rather than
/// bursted.
pub(crate) struct IntervalDriver {
    interval: tokio::time::Interval,
}

impl IntervalDriver {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        IntervalDriver { interval }
    }

    /// Wait for next execution. Returns false if should stop.
    ///
    /// Cancellation is polled first so a cancelled task never runs another
    /// tick, even when the tick is already due.
    pub async fn wait_next(&mut self, ctx: &TaskContext) -> bool {
        tokio::select! {
            biased;
            () = ctx.cancelled() => false,
            _ = self.interval.tick() => true,
        }
    }
}
