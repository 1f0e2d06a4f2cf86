//! Question text animated word by word.

use quizreel_animation_core::{
    emphasize, pulse, stagger_sequential, AnimationError, Color, Director, Signal, SignalStore,
};

use crate::config::TextStyle;
use crate::error::SceneError;

#[derive(Clone, Debug)]
pub struct Word {
    pub text: String,
    pub opacity: Signal<f32>,
    pub scale: Signal<f32>,
}

#[derive(Debug)]
pub struct AnimatedText {
    node: String,
    words: Vec<Word>,
    fill: Signal<Color>,
    stroke: Signal<Color>,
    font_size: Signal<f32>,
    style: TextStyle,
}

impl AnimatedText {
    /// Split `text` on single spaces; every word starts invisible at scale 0.
    pub fn new(
        store: &mut SignalStore,
        node: impl Into<String>,
        text: &str,
        style: &TextStyle,
    ) -> Result<Self, SceneError> {
        let node = node.into();
        let words = text
            .split(' ')
            .filter(|w| !w.is_empty())
            .enumerate()
            .map(|(i, word)| -> Result<Word, AnimationError> {
                store.create(format!("{node}/word{i}/text"), word.to_string())?;
                Ok(Word {
                    text: word.to_string(),
                    opacity: store.create(format!("{node}/word{i}/opacity"), 0.0f32)?,
                    scale: store.create(format!("{node}/word{i}/scale"), 0.0f32)?,
                })
            })
            .collect::<Result<Vec<_>, AnimationError>>()?;

        Ok(Self {
            fill: store.create(format!("{node}/fill"), style.fill.parse::<Color>()?)?,
            stroke: store.create(format!("{node}/stroke"), style.stroke.parse::<Color>()?)?,
            font_size: store.create(format!("{node}/font_size"), style.font_size)?,
            node,
            words,
            style: style.clone(),
        })
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn fill(&self) -> Signal<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Signal<Color> {
        self.stroke
    }

    pub fn font_size(&self) -> Signal<f32> {
        self.font_size
    }

    /// Pop each word in, one after another, `delay` seconds apart.
    pub fn animate(&self, delay: f32) -> Director {
        let style = self.style.clone();
        stagger_sequential(
            format!("{}/animate", self.node),
            &self.words,
            delay,
            move |i, word| {
                Director::new(format!("word{i}"))
                    .tween(word.opacity, 1.0, style.word_fade_in)
                    .tween(word.scale, style.word_overshoot, style.word_overshoot_in)
                    .tween(word.scale, 1.0, style.word_settle)
            },
        )
    }

    /// Fade words out in order.
    pub fn fade_out(&self, delay: f32) -> Director {
        let fade = self.style.fade_out;
        stagger_sequential(
            format!("{}/fade_out", self.node),
            &self.words,
            delay,
            move |i, word| Director::new(format!("word{i}")).tween(word.opacity, 0.0, fade),
        )
    }

    /// Pulse one word; an out-of-range index does nothing.
    pub fn emphasize(&self, index: usize) -> Director {
        let s = &self.style;
        emphasize(
            format!("{}/emphasize", self.node),
            &self.words,
            index,
            |word| {
                pulse(
                    word.scale,
                    s.emphasis_peak,
                    s.emphasis_up,
                    1.0,
                    s.emphasis_down,
                )
            },
        )
    }
}
