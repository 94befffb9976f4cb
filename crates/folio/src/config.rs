use std::time::Duration;

use anyhow::{Context, Result};

/// Default quiet window between a document edit and the pass it triggers.
/// Edits arrive in rapid bursts while the user types; a full render+measure
/// pass is expensive, so only the last edit in the window runs one.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Default settle delay after font loading completes. Render frameworks may
/// finish committing before layout and font metrics are final; measuring
/// without this wait reads systematically wrong heights.
pub const DEFAULT_SETTLE_MS: u64 = 100;

/// Default fit-test tolerance in px. Absorbs sub-pixel rounding in measured
/// heights. Kept small so genuine overflow is never masked.
pub const DEFAULT_TOLERANCE_PX: f32 = 2.0;

/// Engine tuning knobs.
/// Every knob has a default; `from_env` only fails on unparseable values.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Quiet window before a document change triggers a pass.
    pub debounce: Duration,
    /// Post-font-load settle delay before measurement is trusted.
    pub settle: Duration,
    /// Fit-test tolerance in the shared pixel basis.
    pub tolerance_px: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            settle: Duration::from_millis(DEFAULT_SETTLE_MS),
            tolerance_px: DEFAULT_TOLERANCE_PX,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(EngineConfig {
            debounce: Duration::from_millis(env_or("FOLIO_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)?),
            settle: Duration::from_millis(env_or("FOLIO_SETTLE_MS", DEFAULT_SETTLE_MS)?),
            tolerance_px: env_or("FOLIO_TOLERANCE_PX", DEFAULT_TOLERANCE_PX)?,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("'{key}' must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
