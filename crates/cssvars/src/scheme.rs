//! Light/dark color-scheme detection.
//!
//! [`detect_color_scheme`] asks the operating system whether the user prefers
//! a dark scheme. The detector can be replaced with [`set_scheme_detector`],
//! which is how tests force a scheme:
//!
//! ```rust
//! use cssvars::{detect_color_scheme, set_scheme_detector, ColorScheme};
//!
//! set_scheme_detector(|| ColorScheme::Dark);
//! assert_eq!(detect_color_scheme().label(), "dark");
//! ```
//!
//! [`SchemeWatcher`] polls the detector and calls a hook when the preference
//! changes. The default hook only logs the new label; install one with
//! [`SchemeWatcher::on_change`] to react, for example by rebinding variables.

use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The user's preferred color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    /// `"light"` or `"dark"`.
    pub fn label(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

type SchemeDetector = fn() -> ColorScheme;

static SCHEME_DETECTOR: Lazy<Mutex<SchemeDetector>> = Lazy::new(|| Mutex::new(os_scheme_detector));

/// Overrides the detector used to determine the preferred scheme.
///
/// This is useful for testing or when you want to force a specific scheme.
pub fn set_scheme_detector(detector: SchemeDetector) {
    let mut guard = SCHEME_DETECTOR.lock().unwrap();
    *guard = detector;
}

/// Restores the operating-system detector.
pub fn reset_scheme_detector() {
    set_scheme_detector(os_scheme_detector);
}

/// Queries the current preferred scheme through the configured detector.
pub fn detect_color_scheme() -> ColorScheme {
    let detector = SCHEME_DETECTOR.lock().unwrap();
    (*detector)()
}

/// Checks the preferred scheme once, logging the result.
pub fn init_color_scheme() -> ColorScheme {
    let scheme = detect_color_scheme();
    tracing::debug!(scheme = scheme.label(), "detected color scheme");
    scheme
}

fn os_scheme_detector() -> ColorScheme {
    match detect_os_theme() {
        OsThemeMode::Dark => ColorScheme::Dark,
        OsThemeMode::Light => ColorScheme::Light,
    }
}

type ChangeHook = Box<dyn FnMut(ColorScheme) + Send>;

/// Watches for changes of the preferred scheme.
pub struct SchemeWatcher {
    current: ColorScheme,
    hook: ChangeHook,
}

impl SchemeWatcher {
    /// Starts watching from the currently detected scheme.
    pub fn new() -> Self {
        Self::starting_at(detect_color_scheme())
    }

    /// Starts watching from a known scheme.
    pub fn starting_at(current: ColorScheme) -> Self {
        Self {
            current,
            hook: Box::new(|scheme| {
                tracing::debug!(scheme = scheme.label(), "color scheme changed");
            }),
        }
    }

    /// Replaces the hook called with the new scheme on every change.
    pub fn on_change<F>(mut self, hook: F) -> Self
    where
        F: FnMut(ColorScheme) + Send + 'static,
    {
        self.hook = Box::new(hook);
        self
    }

    /// The scheme seen on the last poll.
    pub fn current(&self) -> ColorScheme {
        self.current
    }

    /// Re-detects the scheme, calling the hook and returning it if it changed.
    pub fn poll(&mut self) -> Option<ColorScheme> {
        let detected = detect_color_scheme();
        if detected == self.current {
            return None;
        }
        self.current = detected;
        (self.hook)(detected);
        Some(detected)
    }

    /// Polls every `period` until the future is dropped.
    pub async fn watch(&mut self, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            self.poll();
        }
    }
}

impl Default for SchemeWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchemeWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemeWatcher")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex as StdMutex};

    static DARK: AtomicBool = AtomicBool::new(false);

    fn toggled_detector() -> ColorScheme {
        if DARK.load(Ordering::SeqCst) {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(ColorScheme::Light.label(), "light");
        assert_eq!(ColorScheme::Dark.to_string(), "dark");
        assert!(ColorScheme::Dark.is_dark());
    }

    #[test]
    #[serial]
    fn test_set_scheme_detector_override() {
        set_scheme_detector(|| ColorScheme::Dark);
        assert_eq!(detect_color_scheme(), ColorScheme::Dark);
        assert_eq!(init_color_scheme(), ColorScheme::Dark);

        set_scheme_detector(|| ColorScheme::Light);
        assert_eq!(detect_color_scheme(), ColorScheme::Light);

        reset_scheme_detector();
    }

    #[test]
    #[serial]
    fn test_watcher_reports_changes_once() {
        DARK.store(false, Ordering::SeqCst);
        set_scheme_detector(toggled_detector);

        let seen = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut watcher = SchemeWatcher::new().on_change(move |scheme| {
            sink.lock().unwrap().push(scheme.label());
        });

        assert_eq!(watcher.current(), ColorScheme::Light);
        assert_eq!(watcher.poll(), None);

        DARK.store(true, Ordering::SeqCst);
        assert_eq!(watcher.poll(), Some(ColorScheme::Dark));
        assert_eq!(watcher.poll(), None);

        DARK.store(false, Ordering::SeqCst);
        assert_eq!(watcher.poll(), Some(ColorScheme::Light));

        assert_eq!(*seen.lock().unwrap(), vec!["dark", "light"]);
        reset_scheme_detector();
    }

    #[tokio::test]
    #[serial]
    async fn test_watch_loop_polls() {
        DARK.store(true, Ordering::SeqCst);
        set_scheme_detector(toggled_detector);

        let mut watcher = SchemeWatcher::starting_at(ColorScheme::Light);
        let _ = tokio::time::timeout(
            Duration::from_millis(50),
            watcher.watch(Duration::from_millis(5)),
        )
        .await;

        assert_eq!(watcher.current(), ColorScheme::Dark);
        DARK.store(false, Ordering::SeqCst);
        reset_scheme_detector();
    }
}
