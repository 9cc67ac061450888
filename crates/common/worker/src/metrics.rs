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

use std::sync::LazyLock;

use prometheus::{IntCounterVec, register_int_counter_vec};

pub const TASK_LABEL: &str = "task";

pub static TASK_STARTED: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "reelkit_task_started_total",
        "Total number of scheduled tasks started",
        &[TASK_LABEL]
    )
    .unwrap()
});

pub static TASK_CANCELLED: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "reelkit_task_cancelled_total",
        "Total number of scheduled tasks cancelled explicitly",
        &[TASK_LABEL]
    )
    .unwrap()
});

pub static TASK_EXECUTIONS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "reelkit_task_executions_total",
        "Total number of interval task executions",
        &[TASK_LABEL]
    )
    .unwrap()
});
