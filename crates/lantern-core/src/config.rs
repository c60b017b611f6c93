//! Motion configuration (parsed from TOML)

use crate::error::{LanternError, Result};
use crate::types::Millis;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound on the intro duration. The intro gates all primary content,
/// so its timer must be finite and bounded.
pub const MAX_INTRO_DURATION_MS: Millis = 60_000;

/// Upper bound on a particle's lifetime. Together with the spawn interval it
/// bounds how many particles can be live at once.
pub const MAX_PARTICLE_LIFETIME_MS: Millis = 60_000;

/// A staged entrance animation that plays relative to intro start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntranceCue {
    pub name: String,
    pub delay_ms: Millis,
    pub duration_ms: Millis,
}

impl EntranceCue {
    pub fn new(name: impl Into<String>, delay_ms: Millis, duration_ms: Millis) -> Self {
        Self {
            name: name.into(),
            delay_ms,
            duration_ms,
        }
    }
}

/// Tunables for the intro, particle emitter, reveal controller and hero fade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    #[serde(alias = "introDurationMs")]
    pub intro_duration_ms: Millis,
    #[serde(alias = "particleIntervalMs")]
    pub particle_interval_ms: Millis,
    /// Inclusive [min, max] particle lifetime
    #[serde(alias = "particleLifetimeRangeMs")]
    pub particle_lifetime_range_ms: [Millis; 2],
    /// Distance travelled past the top edge of the viewport
    pub particle_overshoot_px: f32,
    /// Horizontal drift is drawn from [-particle_drift_px, particle_drift_px]
    pub particle_drift_px: f32,
    pub particle_ease: String,
    pub particle_seed: u32,
    #[serde(alias = "revealEnterPct")]
    pub reveal_enter_pct: f32,
    #[serde(alias = "revealExitPct")]
    pub reveal_exit_pct: f32,
    pub reveal_duration_ms: Millis,
    pub reveal_ease: String,
    /// Scroll fraction at which the hero background is fully faded
    pub hero_fade_end: f32,
    #[serde(rename = "entrance")]
    pub entrance_cues: Vec<EntranceCue>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            intro_duration_ms: 2000,
            particle_interval_ms: 100,
            particle_lifetime_range_ms: [5000, 10_000],
            particle_overshoot_px: 100.0,
            particle_drift_px: 100.0,
            particle_ease: "power2.out".to_string(),
            particle_seed: 0xDEAD_BEEF,
            reveal_enter_pct: 80.0,
            reveal_exit_pct: 20.0,
            reveal_duration_ms: 1000,
            reveal_ease: "power1.out".to_string(),
            hero_fade_end: 0.5,
            entrance_cues: default_entrance_cues(),
        }
    }
}

fn default_entrance_cues() -> Vec<EntranceCue> {
    vec![
        EntranceCue::new("header", 2000, 1000),
        EntranceCue::new("nav.0", 2500, 300),
        EntranceCue::new("nav.1", 2600, 300),
        EntranceCue::new("nav.2", 2700, 300),
        EntranceCue::new("hero.badge", 2500, 1000),
        EntranceCue::new("hero.title", 3000, 1000),
        EntranceCue::new("hero.cta", 3500, 500),
    ]
}

impl MotionConfig {
    /// Parse a config from a TOML string. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every tunable against its allowed range.
    pub fn validate(&self) -> Result<()> {
        check_range(
            "intro_duration_ms",
            self.intro_duration_ms as f64,
            1.0,
            MAX_INTRO_DURATION_MS as f64,
        )?;
        check_range(
            "particle_interval_ms",
            self.particle_interval_ms as f64,
            1.0,
            f64::MAX,
        )?;

        let [min, max] = self.particle_lifetime_range_ms;
        check_range(
            "particle_lifetime_range_ms[0]",
            min as f64,
            1.0,
            MAX_PARTICLE_LIFETIME_MS as f64,
        )?;
        check_range(
            "particle_lifetime_range_ms[1]",
            max as f64,
            min as f64,
            MAX_PARTICLE_LIFETIME_MS as f64,
        )?;

        check_range(
            "particle_overshoot_px",
            self.particle_overshoot_px as f64,
            0.0,
            f64::MAX,
        )?;
        check_range(
            "particle_drift_px",
            self.particle_drift_px as f64,
            0.0,
            f64::MAX,
        )?;
        check_range("reveal_enter_pct", self.reveal_enter_pct as f64, 0.0, 100.0)?;
        check_range("reveal_exit_pct", self.reveal_exit_pct as f64, 0.0, 100.0)?;
        check_range(
            "reveal_duration_ms",
            self.reveal_duration_ms as f64,
            1.0,
            f64::MAX,
        )?;
        if !(self.hero_fade_end > 0.0 && self.hero_fade_end <= 1.0) {
            return Err(LanternError::ValueOutOfRange {
                field: "hero_fade_end".into(),
                min: 0.0,
                max: 1.0,
                value: self.hero_fade_end as f64,
            });
        }

        for cue in &self.entrance_cues {
            if cue.name.is_empty() {
                return Err(LanternError::Config("entrance cue without a name".into()));
            }
            check_range(
                &format!("entrance.{}.duration_ms", cue.name),
                cue.duration_ms as f64,
                1.0,
                f64::MAX,
            )?;
        }
        Ok(())
    }

    /// Upper bound on simultaneously live particles: ceil(max lifetime / interval) + 1
    pub fn particle_bound(&self) -> usize {
        let interval = self.particle_interval_ms.max(1);
        let lifetime = self.particle_lifetime_range_ms[1];
        usize::try_from(lifetime.div_ceil(interval).saturating_add(1)).unwrap_or(usize::MAX)
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_nan() || value < min || value > max {
        return Err(LanternError::ValueOutOfRange {
            field: field.to_string(),
            min,
            max,
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = MotionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.intro_duration_ms, 2000);
        assert_eq!(config.particle_bound(), 101);
    }

    #[test]
    fn parse_snake_case_keys() {
        let toml_str = r#"
intro_duration_ms = 1500
particle_interval_ms = 250
particle_lifetime_range_ms = [1000, 2000]
reveal_enter_pct = 75.0
"#;
        let config = MotionConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.intro_duration_ms, 1500);
        assert_eq!(config.particle_interval_ms, 250);
        assert_eq!(config.particle_lifetime_range_ms, [1000, 2000]);
        assert!((config.reveal_enter_pct - 75.0).abs() < 1e-6);
        // Untouched keys keep their defaults
        assert!((config.reveal_exit_pct - 20.0).abs() < 1e-6);
        assert_eq!(config.entrance_cues.len(), 7);
    }

    #[test]
    fn parse_camel_case_aliases() {
        let toml_str = r#"
introDurationMs = 3000
particleIntervalMs = 50
particleLifetimeRangeMs = [100, 200]
revealEnterPct = 90.0
revealExitPct = 10.0
"#;
        let config = MotionConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.intro_duration_ms, 3000);
        assert_eq!(config.particle_interval_ms, 50);
        assert_eq!(config.particle_lifetime_range_ms, [100, 200]);
        assert!((config.reveal_exit_pct - 10.0).abs() < 1e-6);
    }

    #[test]
    fn parse_entrance_cues() {
        let toml_str = r#"
[[entrance]]
name = "header"
delay_ms = 100
duration_ms = 200
"#;
        let config = MotionConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.entrance_cues, vec![EntranceCue::new("header", 100, 200)]);
    }

    #[test]
    fn unbounded_intro_is_rejected() {
        let config = MotionConfig {
            intro_duration_ms: MAX_INTRO_DURATION_MS + 1,
            ..MotionConfig::default()
        };
        match config.validate() {
            Err(LanternError::ValueOutOfRange { field, .. }) => {
                assert_eq!(field, "intro_duration_ms")
            }
            other => panic!("expected range error, got {other:?}"),
        }
    }

    #[test]
    fn inverted_lifetime_range_is_rejected() {
        let config = MotionConfig {
            particle_lifetime_range_ms: [500, 100],
            ..MotionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unbounded_lifetime_is_rejected() {
        let config = MotionConfig {
            particle_interval_ms: 1,
            particle_lifetime_range_ms: [1, u64::MAX],
            ..MotionConfig::default()
        };
        match config.validate() {
            Err(LanternError::ValueOutOfRange { field, .. }) => {
                assert_eq!(field, "particle_lifetime_range_ms[1]")
            }
            other => panic!("expected range error, got {other:?}"),
        }
        assert_eq!(config.particle_bound(), usize::MAX);

        let longest = MotionConfig {
            particle_interval_ms: 1,
            particle_lifetime_range_ms: [1, MAX_PARTICLE_LIFETIME_MS],
            ..MotionConfig::default()
        };
        assert!(longest.validate().is_ok());
        assert_eq!(longest.particle_bound(), 60_001);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = MotionConfig {
            particle_interval_ms: 0,
            ..MotionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = MotionConfig::from_toml_str("intro_duration_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, LanternError::TomlParseError(_)));
    }

    #[test]
    fn load_from_file_and_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "particle_interval_ms = 120").unwrap();
        let config = MotionConfig::load(file.path()).unwrap();
        assert_eq!(config.particle_interval_ms, 120);

        let text = config.to_toml_string().unwrap();
        let reparsed = MotionConfig::from_toml_str(&text).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = MotionConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, LanternError::IoError(_)));
    }
}
