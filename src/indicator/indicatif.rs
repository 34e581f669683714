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
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::OnceLock;
use std::time::Duration;

const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

pub struct IndicatifProgress {
    progress_bar: OnceLock<ProgressBar>,
}

impl IndicatifProgress {
    pub fn new() -> Self {
        Self {
            progress_bar: OnceLock::new(),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░")
            .tick_chars("⣾⣽⣻⢿⡿⣟⣯⣷")
    }
}

impl Default for IndicatifProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressIndicator for IndicatifProgress {
    fn start(&self, total: u64) {
        let pb = self.progress_bar.get_or_init(|| ProgressBar::new(total));
        pb.set_length(total);
        pb.set_style(Self::style());
        pb.set_message("Resolving");
        pb.enable_steady_tick(Duration::from_millis(100));
    }

    fn item_done(&self, name: &str, resolved: bool) {
        if let Some(pb) = self.progress_bar.get() {
            let mark = if resolved { "✓" } else { "✗" };
            pb.set_message(format!("{mark} {name}"));
            pb.inc(1);
        }
    }

    fn complete(&self, message: Option<String>) {
        if let Some(pb) = self.progress_bar.get() {
            let msg = message.unwrap_or_else(|| "Complete".to_string());
            pb.finish_with_message(msg);
        }
    }
}
