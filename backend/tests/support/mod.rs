#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::NaiveDate;
use cropwatch::config::AppConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Fixed "today" so sensor dates are stable across runs.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Defaults with a small demo field so whole-pipeline tests stay fast.
pub fn small_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.image.default_width = 30;
    config.image.default_height = 20;
    config.render.map_width = 24;
    config.render.map_height = 16;
    config.render.overlay_width = 32;
    config.render.overlay_height = 32;
    config
}

/// Runs `f` with `CROPWATCH_CONFIG` and friends temporarily modified.
///
/// Access is serialized because the process environment is global and tests
/// run in parallel; the previous values are restored even if `f` panics.
///
/// `Some(v)` sets a variable, `None` removes it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    saved: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let saved = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { saved }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.saved.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
