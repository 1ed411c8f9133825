// config.rs - Effect configuration
//
// Every field has a default; the page may override any of them with a JSON
// object passed to `mount`. Unknown keys are rejected so typos fail loudly.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Top-level effect settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectConfig {
    /// Smoothing factor for the eased scroll, 0 < ease <= 1
    pub ease: f64,
    /// Horizontal distortion per pixel of plane offset
    pub distortion_x: f32,
    /// Vertical distortion per pixel of scroll velocity
    pub distortion_y: f32,
    pub alpha: f32,
    pub segments: u32,
    /// `None` follows the device pixel ratio
    pub pixel_ratio: Option<f64>,
    pub antialias: bool,
    pub camera: CameraConfig,
    pub selectors: Selectors,
    pub reveal: RevealConfig,
    pub log_level: String,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            ease: 0.075,
            distortion_x: 0.0,
            distortion_y: 0.0003,
            alpha: 1.0,
            segments: 100,
            pixel_ratio: None,
            antialias: true,
            camera: CameraConfig::default(),
            selectors: Selectors::default(),
            reveal: RevealConfig::default(),
            log_level: "info".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Camera z position; one scene unit equals one CSS pixel at z = 0
    pub distance: f64,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { distance: 1000.0, near: 1.0, far: 2000.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    pub scrollable: String,
    pub main: String,
    pub images: String,
    pub headings: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            scrollable: ".scrollable".into(),
            main: "main".into(),
            images: "img".into(),
            headings: ".h1".into(),
        }
    }
}

/// Text line reveal parameters handed to the tween library
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub enabled: bool,
    /// SplitText `type` for the animated pass; must include "lines"
    pub split_type: String,
    pub lines_class: String,
    /// SplitText `type` for the wrapping pass
    pub parent_split_type: String,
    pub parent_lines_class: String,
    /// ScrollTrigger start, "<element edge> <viewport edge>"
    pub start: String,
    pub duration: f64,
    pub ease: String,
    /// Starting vertical offset as a percentage of line height
    pub travel_percent: f64,
    pub skew_y: f64,
    pub stagger: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            split_type: "lines".into(),
            lines_class: "split-child".into(),
            parent_split_type: "chars,words,lines".into(),
            parent_lines_class: "split-parent".into(),
            start: "top center".into(),
            duration: 3.5,
            ease: "power4".into(),
            travel_percent: 100.0,
            skew_y: 3.0,
            stagger: 0.05,
        }
    }
}

impl EffectConfig {
    /// Parse overrides and validate. Empty input yields the defaults.
    pub fn from_json(src: &str) -> Result<Self, EngineError> {
        let cfg: Self = if src.trim().is_empty() {
            Self::default()
        } else {
            serde_json::from_str(src)?
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let bad = |msg: String| Err(EngineError::InvalidConfig(msg));

        if !(self.ease > 0.0 && self.ease <= 1.0) {
            return bad(format!("ease must be in (0, 1], got {}", self.ease));
        }
        if !(self.alpha >= 0.0 && self.alpha <= 1.0) {
            return bad(format!("alpha must be in [0, 1], got {}", self.alpha));
        }
        if self.segments == 0 {
            return bad("segments must be at least 1".into());
        }
        if let Some(r) = self.pixel_ratio {
            if !(r > 0.0) {
                return bad(format!("pixel_ratio must be positive, got {}", r));
            }
        }
        if !(self.camera.distance > 0.0) {
            return bad(format!("camera.distance must be positive, got {}", self.camera.distance));
        }
        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            return bad(format!(
                "camera clip range must satisfy 0 < near < far, got {}..{}",
                self.camera.near, self.camera.far
            ));
        }
        if self.reveal.duration < 0.0 || self.reveal.stagger < 0.0 {
            return bad("reveal.duration and reveal.stagger must not be negative".into());
        }
        if !self.reveal.split_type.split(',').any(|t| t.trim() == "lines") {
            return bad(format!("reveal.split_type must include \"lines\", got '{}'", self.reveal.split_type));
        }
        if log_level(&self.log_level).is_none() {
            return bad(format!("unknown log_level '{}'", self.log_level));
        }
        Ok(())
    }

    pub fn level(&self) -> log::Level {
        log_level(&self.log_level).unwrap_or(log::Level::Info)
    }
}

fn log_level(s: &str) -> Option<log::Level> {
    match s.to_ascii_lowercase().as_str() {
        "error" => Some(log::Level::Error),
        "warn" => Some(log::Level::Warn),
        "info" => Some(log::Level::Info),
        "debug" => Some(log::Level::Debug),
        "trace" => Some(log::Level::Trace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_default() {
        let cfg = EffectConfig::from_json("  ").unwrap();
        assert_eq!(cfg, EffectConfig::default());
        assert_eq!(cfg.ease, 0.075);
        assert_eq!(cfg.reveal.duration, 3.5);
        assert_eq!(cfg.reveal.start, "top center");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = EffectConfig::from_json(r#"{"ease": 0.2, "reveal": {"stagger": 0.1}}"#).unwrap();
        assert_eq!(cfg.ease, 0.2);
        assert_eq!(cfg.reveal.stagger, 0.1);
        assert_eq!(cfg.reveal.skew_y, 3.0);
        assert_eq!(cfg.camera.distance, 1000.0);
    }

    #[test]
    fn rejects_out_of_range_ease() {
        for src in [r#"{"ease": 0}"#, r#"{"ease": 1.5}"#, r#"{"ease": -0.1}"#] {
            assert!(matches!(EffectConfig::from_json(src), Err(EngineError::InvalidConfig(_))), "{}", src);
        }
        assert!(EffectConfig::from_json(r#"{"ease": 1}"#).is_ok());
    }

    #[test]
    fn animated_split_must_produce_lines() {
        let cfg = EffectConfig::default();
        assert_eq!(cfg.reveal.parent_split_type, "chars,words,lines");
        assert!(EffectConfig::from_json(r#"{"reveal": {"split_type": "words, lines"}}"#).is_ok());
        assert!(matches!(
            EffectConfig::from_json(r#"{"reveal": {"split_type": "words"}}"#),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(EffectConfig::from_json(r#"{"eas": 0.1}"#), Err(EngineError::ConfigJson(_))));
    }

    #[test]
    fn rejects_bad_camera_and_level() {
        assert!(EffectConfig::from_json(r#"{"camera": {"near": 10, "far": 5}}"#).is_err());
        assert!(EffectConfig::from_json(r#"{"camera": {"distance": 0}}"#).is_err());
        assert!(EffectConfig::from_json(r#"{"log_level": "loud"}"#).is_err());
        assert!(EffectConfig::from_json(r#"{"segments": 0}"#).is_err());
        assert!(EffectConfig::from_json(r#"{"pixel_ratio": 0}"#).is_err());
    }

    #[test]
    fn json_output_parses_back() {
        let json = EffectConfig::default().to_json().unwrap();
        assert_eq!(EffectConfig::from_json(&json).unwrap(), EffectConfig::default());
        assert_eq!(EffectConfig::default().level(), log::Level::Info);
    }
}
