// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::indicator::ProgressIndicator;
use std::sync::atomic::{AtomicU64, Ordering};

/// Line-per-item output on stderr for non-terminal environments.
#[derive(Debug, Default)]
pub struct SimpleProgress {
    total: AtomicU64,
    done: AtomicU64,
}

impl SimpleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&self, name: &str, resolved: bool) -> String {
        let done = self.done.fetch_add(1, Ordering::SeqCst) + 1;
        let total = self.total.load(Ordering::SeqCst);
        let mark = if resolved { "✓" } else { "✗" };
        format!("[{done}/{total}] {mark} {name}")
    }
}

impl ProgressIndicator for SimpleProgress {
    fn start(&self, total: u64) {
        self.total.store(total, Ordering::SeqCst);
        self.done.store(0, Ordering::SeqCst);
    }

    fn item_done(&self, name: &str, resolved: bool) {
        eprintln!("{}", self.line(name, resolved));
    }

    fn complete(&self, message: Option<String>) {
        if let Some(message) = message {
            eprintln!("{message}");
        }
    }
}
