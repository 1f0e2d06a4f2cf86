//! Scene configuration: every look-and-timing constant of the quiz video.

use serde::{Deserialize, Serialize};

use quizreel_animation_core::{ClockSource, Config, ConfigError};

/// Floating (bobbing) motion of the highlighted card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingStyle {
    /// Seconds per full oscillation.
    pub period: f32,
    /// Vertical amplitude.
    pub height: f32,
    /// Rotation amplitude in degrees.
    pub rotation: f32,
}

impl Default for FloatingStyle {
    fn default() -> Self {
        Self {
            period: 1.0,
            height: 0.1,
            rotation: 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStyle {
    pub card_color: String,
    pub text_color: String,
    pub stroke_color: String,
    pub height: f32,
    /// width = height * aspect
    pub aspect: f32,
    pub sfx_volume: f32,
    pub reveal_fade: f32,
    pub reveal_grow: f32,
    pub answer_scale: f32,
    pub answer_grow: f32,
    pub answer_hold: f32,
    pub floating: FloatingStyle,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            card_color: "#ffffff".into(),
            text_color: "#000000".into(),
            stroke_color: "#ffffff".into(),
            height: 550.0,
            aspect: 0.71,
            sfx_volume: 0.3,
            reveal_fade: 0.5,
            reveal_grow: 0.25,
            answer_scale: 2.0,
            answer_grow: 0.5,
            answer_hold: 3.0,
            floating: FloatingStyle::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_size: f32,
    pub font_family: String,
    pub fill: String,
    pub stroke: String,
    pub shadow_color: String,
    pub shadow_blur: f32,
    pub shadow_offset: f32,
    /// Pause between word starts in `animate`.
    pub stagger_delay: f32,
    pub word_fade_in: f32,
    pub word_overshoot: f32,
    pub word_overshoot_in: f32,
    pub word_settle: f32,
    pub fade_out: f32,
    pub fade_out_delay: f32,
    pub emphasis_peak: f32,
    pub emphasis_up: f32,
    pub emphasis_down: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 64.0,
            font_family: "Luckiest Guy".into(),
            fill: "#ffffff".into(),
            stroke: "#000000".into(),
            shadow_color: "#000000".into(),
            shadow_blur: 4.0,
            shadow_offset: 4.0,
            stagger_delay: 0.1,
            word_fade_in: 0.03,
            word_overshoot: 1.2,
            word_overshoot_in: 0.02,
            word_settle: 0.01,
            fade_out: 0.3,
            fade_out_delay: 0.1,
            emphasis_peak: 1.3,
            emphasis_up: 0.2,
            emphasis_down: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneAssets {
    pub pop_sfx: String,
    pub applause_sfx: String,
    pub ding_sfx: String,
}

impl Default for SceneAssets {
    fn default() -> Self {
        Self {
            pop_sfx: "/pop.mp3".into(),
            applause_sfx: "/applause.mp3".into(),
            ding_sfx: "/ding.mp3".into(),
        }
    }
}

/// Waits and transitions of the scene director, in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTiming {
    pub after_question: f32,
    pub body_grow: f32,
    /// Options body height as a fraction of the frame.
    pub body_height: f32,
    pub between_cards: f32,
    pub before_answer: f32,
    pub after_ding: f32,
    pub outro: f32,
}

impl Default for SceneTiming {
    fn default() -> Self {
        Self {
            after_question: 1.0,
            body_grow: 1.5,
            body_height: 0.6,
            between_cards: 0.3,
            before_answer: 4.0,
            after_ding: 1.0,
            outro: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub frame_rate: f32,
    /// Output size in pixels, `[width, height]`.
    pub size: [u32; 2],
    pub clock: ClockSource,
    /// Background gradient stops.
    pub background: [String; 2],
    pub card: CardStyle,
    pub text: TextStyle,
    pub assets: SceneAssets,
    pub timing: SceneTiming,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30.0,
            size: [1080, 1920],
            clock: ClockSource::Simulated,
            background: ["#0033ff".into(), "#6600ff".into()],
            card: CardStyle::default(),
            text: TextStyle::default(),
            assets: SceneAssets::default(),
            timing: SceneTiming::default(),
        }
    }
}

impl SceneConfig {
    /// Scheduler config matching this scene.
    pub fn animation_config(&self) -> Config {
        Config {
            frame_rate: self.frame_rate,
            clock: self.clock,
            ..Config::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.animation_config().validate()
    }

    /// Parse a (possibly partial) JSON config; missing fields use defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: SceneConfig = serde_json::from_str(s).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }
}
