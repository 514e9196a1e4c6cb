//! Pool configuration.

/// Environment variable overriding [`PoolSettings::initial_capacity`].
pub const CAPACITY_ENV: &str = "TACTUS_POOL_CAPACITY";
/// Environment variable overriding [`PoolSettings::max_pointers`].
pub const MAX_POINTERS_ENV: &str = "TACTUS_MAX_POINTERS";

/// Sizing of a [`PointerPool`](crate::PointerPool).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolSettings {
    /// Slots reserved up front.
    pub initial_capacity: usize,
    /// Upper bound on simultaneously bound records. Always at least 1.
    pub max_pointers: usize,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            initial_capacity: 10,
            max_pointers: 32,
        }
    }
}

impl PoolSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings with `TACTUS_POOL_CAPACITY` and
    /// `TACTUS_MAX_POINTERS` applied when they hold valid integers.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(capacity) = env_usize(CAPACITY_ENV) {
            settings = settings.with_initial_capacity(capacity);
        }
        if let Some(max) = env_usize(MAX_POINTERS_ENV) {
            settings = settings.with_max_pointers(max);
        }
        settings
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_max_pointers(mut self, max: usize) -> Self {
        self.max_pointers = max.max(1);
        self
    }

    /// Capacity actually reserved: never more than `max_pointers`.
    pub fn reserved_capacity(&self) -> usize {
        self.initial_capacity.min(self.max_pointers)
    }
}

fn env_usize(key: &str) -> Option<usize> {
    let raw = std::env::var(key).ok()?;
    parse_usize(key, &raw)
}

fn parse_usize(key: &str, raw: &str) -> Option<usize> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("ignoring {key}={raw:?}: {err}");
            None
        }
    }
}
