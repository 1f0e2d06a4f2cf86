//! External effects (audio, scene-node removal) and the host boundary that executes them.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::EffectError;

/// Fire-and-forget command issued to the host at a scheduled point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    PlayAudio { channel: String },
    PauseAudio { channel: String },
    SetAudioSource { channel: String, src: String },
    RemoveNode { node: String },
    Custom { name: String, data: JsonValue },
}

impl Effect {
    pub fn play(channel: impl Into<String>) -> Self {
        Effect::PlayAudio {
            channel: channel.into(),
        }
    }

    pub fn pause(channel: impl Into<String>) -> Self {
        Effect::PauseAudio {
            channel: channel.into(),
        }
    }

    pub fn set_source(channel: impl Into<String>, src: impl Into<String>) -> Self {
        Effect::SetAudioSource {
            channel: channel.into(),
            src: src.into(),
        }
    }

    pub fn remove(node: impl Into<String>) -> Self {
        Effect::RemoveNode { node: node.into() }
    }

    /// Audio channel this effect targets, if any.
    pub fn channel(&self) -> Option<&str> {
        match self {
            Effect::PlayAudio { channel }
            | Effect::PauseAudio { channel }
            | Effect::SetAudioSource { channel, .. } => Some(channel),
            _ => None,
        }
    }
}

/// Executes effects for the scheduler. Implementations must not block.
pub trait EffectHost {
    fn apply(&mut self, effect: &Effect) -> Result<(), EffectError>;

    /// Length in seconds of whatever is loaded on `channel`.
    fn audio_duration(&self, channel: &str) -> Result<f32, EffectError> {
        Err(EffectError::DurationUnavailable {
            channel: channel.to_string(),
        })
    }
}

/// Accepts and discards every effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl EffectHost for NullHost {
    fn apply(&mut self, _effect: &Effect) -> Result<(), EffectError> {
        Ok(())
    }
}

/// In-memory host that keeps a log of applied effects and simple channel state.
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    applied: Vec<Effect>,
    sources: HashMap<String, String>,
    durations: HashMap<String, f32>,
    failing: HashSet<String>,
    playing: HashSet<String>,
    removed: Vec<String>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `seconds` as the duration of any channel whose source is `src`.
    pub fn with_duration(mut self, src: impl Into<String>, seconds: f32) -> Self {
        self.durations.insert(src.into(), seconds);
        self
    }

    /// Make every effect on `channel` fail with a playback error.
    pub fn failing_channel(mut self, channel: impl Into<String>) -> Self {
        self.failing.insert(channel.into());
        self
    }

    pub fn applied(&self) -> &[Effect] {
        &self.applied
    }

    pub fn source(&self, channel: &str) -> Option<&str> {
        self.sources.get(channel).map(String::as_str)
    }

    pub fn is_playing(&self, channel: &str) -> bool {
        self.playing.contains(channel)
    }

    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    pub fn plays_on(&self, channel: &str) -> usize {
        self.applied
            .iter()
            .filter(|e| matches!(e, Effect::PlayAudio { channel: c } if c == channel))
            .count()
    }
}

impl EffectHost for RecordingHost {
    fn apply(&mut self, effect: &Effect) -> Result<(), EffectError> {
        if let Some(channel) = effect.channel() {
            if self.failing.contains(channel) {
                return Err(EffectError::Playback {
                    channel: channel.to_string(),
                    reason: "channel marked as failing".into(),
                });
            }
        }
        match effect {
            Effect::PlayAudio { channel } => {
                self.playing.insert(channel.clone());
            }
            Effect::PauseAudio { channel } => {
                self.playing.remove(channel);
            }
            Effect::SetAudioSource { channel, src } => {
                self.sources.insert(channel.clone(), src.clone());
            }
            Effect::RemoveNode { node } => {
                if self.removed.contains(node) {
                    return Err(EffectError::UnknownNode { node: node.clone() });
                }
                self.removed.push(node.clone());
            }
            Effect::Custom { .. } => {}
        }
        self.applied.push(effect.clone());
        Ok(())
    }

    fn audio_duration(&self, channel: &str) -> Result<f32, EffectError> {
        let src = self
            .sources
            .get(channel)
            .ok_or_else(|| EffectError::UnknownChannel {
                channel: channel.to_string(),
            })?;
        self.durations
            .get(src)
            .copied()
            .ok_or_else(|| EffectError::DurationUnavailable {
                channel: channel.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_json_shape() {
        let json = serde_json::to_value(Effect::set_source("card0/sfx", "/pop.mp3")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "set_audio_source", "channel": "card0/sfx", "src": "/pop.mp3"})
        );
    }

    #[test]
    fn recording_host_tracks_channels() {
        let mut host = RecordingHost::new().with_duration("/q.mp3", 2.5);
        host.apply(&Effect::set_source("scene/audio", "/q.mp3")).unwrap();
        host.apply(&Effect::play("scene/audio")).unwrap();
        assert!(host.is_playing("scene/audio"));
        assert_eq!(host.audio_duration("scene/audio").unwrap(), 2.5);
        host.apply(&Effect::pause("scene/audio")).unwrap();
        assert!(!host.is_playing("scene/audio"));
        assert!(matches!(
            host.audio_duration("other"),
            Err(EffectError::UnknownChannel { .. })
        ));
    }

    #[test]
    fn failing_channel_is_not_recorded() {
        let mut host = RecordingHost::new().failing_channel("bad");
        assert!(host.apply(&Effect::play("bad")).is_err());
        assert!(host.applied().is_empty());
    }
}
