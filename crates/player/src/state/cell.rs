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

use tokio::sync::watch;

/// Observable value with one writer and any number of readers.
///
/// Readers either read the latest value with [`get`](StateCell::get) or
/// [`subscribe`](StateCell::subscribe) to be woken on changes; a new
/// subscriber starts at the most recent value. Writing a value equal to the
/// current one does not wake subscribers.
#[derive(Debug)]
pub struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + PartialEq> StateCell<T> {
    pub(crate) fn new(value: T) -> Self {
        let (tx, _) = watch::channel(value);
        StateCell { tx }
    }

    pub fn get(&self) -> T { self.tx.borrow().clone() }

    pub fn subscribe(&self) -> watch::Receiver<T> { self.tx.subscribe() }

    pub(crate) fn set(&self, value: T) {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }
}
