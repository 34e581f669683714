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

use crate::indicator::{IndicatifProgress, ProgressIndicator, SilentProgress, SimpleProgress};
use std::env;
use std::io::IsTerminal;

/// `ISO_LIST_PROGRESS=bar|lines|none` forces a renderer regardless of terminal detection.
const PROGRESS_ENV: &str = "ISO_LIST_PROGRESS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Bar,
    Lines,
    Silent,
}

impl ProgressMode {
    fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bar" => Some(ProgressMode::Bar),
            "lines" | "simple" => Some(ProgressMode::Lines),
            "none" | "off" => Some(ProgressMode::Silent),
            _ => None,
        }
    }
}

pub struct ProgressFactory;

impl ProgressFactory {
    pub fn create(no_progress: bool) -> Box<dyn ProgressIndicator> {
        match Self::mode(no_progress) {
            ProgressMode::Bar => Box::new(IndicatifProgress::new()),
            ProgressMode::Lines => Box::new(SimpleProgress::new()),
            ProgressMode::Silent => Box::new(SilentProgress),
        }
    }

    pub fn mode(no_progress: bool) -> ProgressMode {
        if no_progress {
            return ProgressMode::Silent;
        }

        if let Ok(value) = env::var(PROGRESS_ENV) {
            match ProgressMode::from_env_value(&value) {
                Some(mode) => return mode,
                None => log::warn!("Ignoring unknown {PROGRESS_ENV} value '{value}'"),
            }
        }

        if Self::is_plain_environment() {
            ProgressMode::Lines
        } else {
            ProgressMode::Bar
        }
    }

    fn is_plain_environment() -> bool {
        // Pipe, redirect or log file
        if !std::io::stderr().is_terminal() {
            return true;
        }

        if env::var("CI").is_ok() || env::var("NO_COLOR").is_ok() {
            return true;
        }

        env::var("TERM").is_ok_and(|term| term == "dumb")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_env_values() {
        assert_eq!(ProgressMode::from_env_value("bar"), Some(ProgressMode::Bar));
        assert_eq!(ProgressMode::from_env_value(" Lines "), Some(ProgressMode::Lines));
        assert_eq!(ProgressMode::from_env_value("simple"), Some(ProgressMode::Lines));
        assert_eq!(ProgressMode::from_env_value("OFF"), Some(ProgressMode::Silent));
        assert_eq!(ProgressMode::from_env_value("fancy"), None);
    }

    #[test]
    #[serial]
    fn test_no_progress_wins() {
        unsafe { env::set_var(PROGRESS_ENV, "bar") };
        assert_eq!(ProgressFactory::mode(true), ProgressMode::Silent);
        unsafe { env::remove_var(PROGRESS_ENV) };
    }

    #[test]
    #[serial]
    fn test_env_override() {
        unsafe { env::set_var(PROGRESS_ENV, "none") };
        assert_eq!(ProgressFactory::mode(false), ProgressMode::Silent);
        unsafe { env::set_var(PROGRESS_ENV, "bar") };
        assert_eq!(ProgressFactory::mode(false), ProgressMode::Bar);
        unsafe { env::remove_var(PROGRESS_ENV) };
    }

    #[test]
    #[serial]
    fn test_unknown_env_value_falls_back_to_detection() {
        let original_ci = env::var("CI").ok();
        unsafe { env::set_var(PROGRESS_ENV, "fancy") };
        unsafe { env::set_var("CI", "true") };
        assert_eq!(ProgressFactory::mode(false), ProgressMode::Lines);
        unsafe { env::remove_var(PROGRESS_ENV) };
        match original_ci {
            Some(value) => unsafe { env::set_var("CI", value) },
            None => unsafe { env::remove_var("CI") },
        }
    }
}
