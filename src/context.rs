//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::config::AppConfig;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Bumped to re-run the photo loader - read
    pub reload_trigger: ReadSignal<u32>,
    /// Bumped to re-run the photo loader - write
    set_reload_trigger: WriteSignal<u32>,
    config: StoredValue<AppConfig>,
}

impl AppContext {
    pub fn new(reload_trigger: (ReadSignal<u32>, WriteSignal<u32>), config: AppConfig) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            config: StoredValue::new(config),
        }
    }

    /// Invalidate the loaded collection so it is fetched again
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Whether no reload was requested since `trigger` was read
    pub fn is_current(&self, trigger: u32) -> bool {
        self.reload_trigger.get_untracked() == trigger
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_supersedes_earlier_loads() {
        let owner = Owner::new();
        owner.set();

        let ctx = AppContext::new(signal(0u32), AppConfig::default());
        let first = ctx.reload_trigger.get_untracked();
        assert!(ctx.is_current(first));

        ctx.reload();
        let second = ctx.reload_trigger.get_untracked();
        assert_ne!(first, second);
        assert!(!ctx.is_current(first));
        assert!(ctx.is_current(second));
    }
}
