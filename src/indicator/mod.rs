//! Progress feedback for batch resolution.
//!
//! Workers report each finished distribution from their own thread, so every
//! method takes `&self`. Implementations:
//! - `IndicatifProgress` - animated bar for terminals
//! - `SimpleProgress` - one line per distribution for logs and CI
//! - `SilentProgress` - no output, for `--no-progress`

pub mod factory;
pub mod indicatif;
pub mod silent;
pub mod simple;

pub use factory::{ProgressFactory, ProgressMode};
pub use self::indicatif::IndicatifProgress;
pub use silent::SilentProgress;
pub use simple::SimpleProgress;

pub trait ProgressIndicator: Send + Sync {
    /// Begin a batch of `total` distributions
    fn start(&self, total: u64);

    /// One distribution finished, successfully or not
    fn item_done(&self, name: &str, resolved: bool);

    /// The batch is over
    fn complete(&self, message: Option<String>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl ProgressIndicator for RecordingProgress {
        fn start(&self, total: u64) {
            self.events.lock().unwrap().push(format!("start {total}"));
        }

        fn item_done(&self, name: &str, resolved: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{name} {resolved}"));
        }

        fn complete(&self, message: Option<String>) {
            self.events
                .lock()
                .unwrap()
                .push(message.unwrap_or_else(|| "done".to_string()));
        }
    }

    #[test]
    fn test_trait_object_from_threads() {
        let progress = RecordingProgress::default();
        let indicator: &dyn ProgressIndicator = &progress;

        indicator.start(2);
        std::thread::scope(|scope| {
            scope.spawn(|| indicator.item_done("Debian", true));
            scope.spawn(|| indicator.item_done("Arch", false));
        });
        indicator.complete(None);

        let events = progress.events.lock().unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], "start 2");
        assert!(events.contains(&"Debian true".to_string()));
        assert!(events.contains(&"Arch false".to_string()));
        assert_eq!(events[3], "done");
    }
}
