//! Answer card: a player image with name plate, its sound channels and animations.
//!
//! Lifecycle: `Hidden -> Revealing -> Revealed -> (Eliminated | HighlightedFloating)`.

use std::cell::Cell;
use std::f32::consts::TAU;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use quizreel_animation_core::{
    every_frame, Color, Derived, Director, DirectorId, Easing, Effect, EffectError, EffectHost,
    HandleSlot, Scheduler, Signal, SignalStore, StepContext,
};

use crate::config::{CardStyle, FloatingStyle, SceneAssets};
use crate::error::SceneError;
use crate::quiz::OptionData;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    Hidden,
    Revealing,
    Revealed,
    Eliminated,
    HighlightedFloating,
}

/// Signal handles owned by one card.
#[derive(Clone, Debug)]
pub struct CardSignals {
    pub player_name: Signal<String>,
    pub image_src: Signal<String>,
    pub audio_src: Signal<String>,
    pub card_color: Signal<Color>,
    pub text_color: Signal<Color>,
    pub stroke_color: Signal<Color>,
    pub opacity: Signal<f32>,
    pub scale: Signal<f32>,
    pub height: Signal<f32>,
    pub width: Derived<f32>,
    pub floating_y: Signal<f32>,
    pub floating_rotation: Signal<f32>,
}

#[derive(Debug)]
pub struct Card {
    node: String,
    signals: CardSignals,
    style: CardStyle,
    assets: SceneAssets,
    state: Rc<Cell<CardState>>,
    floating: HandleSlot,
}

impl Card {
    /// Create the card's signals under `node/...` with their initial values.
    pub fn new(
        store: &mut SignalStore,
        node: impl Into<String>,
        option: &OptionData,
        style: &CardStyle,
        assets: &SceneAssets,
    ) -> Result<Self, SceneError> {
        let node = node.into();
        let card_color: Color = style.card_color.parse()?;
        let text_color: Color = style.text_color.parse()?;
        let stroke_color: Color = style.stroke_color.parse()?;

        let height = store.create(format!("{node}/height"), style.height)?;
        let aspect = style.aspect;
        let signals = CardSignals {
            player_name: store.create(format!("{node}/name"), option.text.clone())?,
            image_src: store.create(format!("{node}/image"), option.image_src.clone())?,
            audio_src: store.create(format!("{node}/audio"), option.audio_src.clone())?,
            card_color: store.create(format!("{node}/card_color"), card_color)?,
            text_color: store.create(format!("{node}/text_color"), text_color)?,
            stroke_color: store.create(format!("{node}/stroke_color"), stroke_color)?,
            opacity: store.create(format!("{node}/opacity"), 0.0f32)?,
            scale: store.create(format!("{node}/scale"), 0.0f32)?,
            height,
            width: store.derive(move |s| s.get(&height) * aspect),
            floating_y: store.create(format!("{node}/floating_y"), 0.0f32)?,
            floating_rotation: store.create(format!("{node}/floating_rotation"), 0.0f32)?,
        };

        Ok(Self {
            node,
            signals,
            style: style.clone(),
            assets: assets.clone(),
            state: Rc::new(Cell::new(CardState::Hidden)),
            floating: HandleSlot::new(),
        })
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn signals(&self) -> &CardSignals {
        &self.signals
    }

    pub fn state(&self) -> CardState {
        self.state.get()
    }

    /// Sound-effect channel (pop, applause).
    pub fn sfx_channel(&self) -> String {
        format!("{}/sfx", self.node)
    }

    /// Narration channel (the option's audio).
    pub fn tts_channel(&self) -> String {
        format!("{}/tts", self.node)
    }

    fn set_state(&self, next: CardState) -> impl FnOnce(&mut StepContext<'_>) {
        let state = Rc::clone(&self.state);
        let node = self.node.clone();
        move |_| {
            log::debug!("{node}: {:?} -> {next:?}", state.get());
            state.set(next);
        }
    }

    /// Load both channels from the current signal values. Takes no time.
    pub fn setup(&self) -> Director {
        let sfx = self.sfx_channel();
        let volume = Effect::Custom {
            name: "set_volume".into(),
            data: serde_json::json!({ "channel": sfx, "volume": self.style.sfx_volume }),
        };
        let tts = self.tts_channel();
        let audio = self.signals.audio_src;
        Director::new(format!("{}/setup", self.node))
            .command(Effect::set_source(sfx, &self.assets.pop_sfx))
            .command(volume)
            .call(move |ctx| {
                let src = ctx.get(&audio);
                ctx.issue(Effect::set_source(tts, src));
            })
    }

    /// Fade in, play pop and narration, then grow through the pop curve.
    pub fn reveal(&self) -> Director {
        Director::new(format!("{}/reveal", self.node))
            .call(self.set_state(CardState::Revealing))
            .tween(self.signals.opacity, 1.0, self.style.reveal_fade)
            .command(Effect::play(self.sfx_channel()))
            .command(Effect::play(self.tts_channel()))
            .tween_eased(
                self.signals.scale,
                1.0,
                self.style.reveal_grow,
                Easing::reveal_pop(),
            )
            .call(self.set_state(CardState::Revealed))
    }

    /// Highlight as the correct answer. The narration can overlap the applause.
    pub fn answer(&self) -> Director {
        Director::new(format!("{}/answer", self.node))
            .command(Effect::set_source(
                self.sfx_channel(),
                &self.assets.applause_sfx,
            ))
            .tween(self.signals.scale, 0.0, 0.0)
            .command(Effect::play(self.tts_channel()))
            .tween(
                self.signals.scale,
                self.style.answer_scale,
                self.style.answer_grow,
            )
            .run(self.start_floating())
            .wait(self.style.answer_hold)
    }

    pub fn shrink(&self) -> Director {
        Director::new(format!("{}/shrink", self.node)).tween(self.signals.scale, 0.0, 0.0)
    }

    /// Remove the card's node from the scene.
    pub fn eliminate(&self) -> Director {
        Director::new(format!("{}/eliminate", self.node))
            .call(self.cancel_floating())
            .command(Effect::remove(&self.node))
            .call(self.set_state(CardState::Eliminated))
    }

    /// Spawn the floating loop, replacing a running one. Takes no time.
    pub fn start_floating(&self) -> Director {
        Director::new(format!("{}/start_floating", self.node))
            .call(self.cancel_floating())
            .spawn_into(self.floating_director(), &self.floating)
            .call(self.set_state(CardState::HighlightedFloating))
    }

    /// Cancel the floating loop from inside a director and zero both offsets.
    pub fn stop_floating_director(&self) -> Director {
        let y = self.signals.floating_y;
        let rotation = self.signals.floating_rotation;
        Director::new(format!("{}/stop_floating", self.node))
            .call(self.cancel_floating())
            .call(move |ctx| {
                ctx.set(&y, 0.0);
                ctx.set(&rotation, 0.0);
            })
    }

    /// Cancel the floating loop immediately. Returns whether a loop was running.
    pub fn stop_floating<H: EffectHost>(&self, scheduler: &mut Scheduler<H>) -> bool {
        let cancelled = match self.floating.take() {
            Some(id) => scheduler.cancel(id),
            None => false,
        };
        let store = scheduler.store_mut();
        store.set(&self.signals.floating_y, 0.0);
        store.set(&self.signals.floating_rotation, 0.0);
        cancelled
    }

    pub fn floating_handle(&self) -> Option<DirectorId> {
        self.floating.get()
    }

    fn cancel_floating(&self) -> impl FnOnce(&mut StepContext<'_>) {
        let slot = self.floating.clone();
        move |ctx| {
            if let Some(id) = slot.take() {
                ctx.cancel(id);
            }
        }
    }

    /// Endless bobbing loop; cancelling it resets both offsets to 0.
    pub fn floating_director(&self) -> Director {
        let FloatingStyle {
            period,
            height,
            rotation,
        } = self.style.floating.clone();
        let y = self.signals.floating_y;
        let rot = self.signals.floating_rotation;
        every_frame(format!("{}/floating", self.node), move |ctx| {
            let wave = floating_wave(ctx.phase_time(), period);
            ctx.set(&y, wave * height);
            ctx.set(&rot, wave * rotation);
        })
        .on_cancel(move |store| {
            store.set(&y, 0.0);
            store.set(&rot, 0.0);
        })
    }

    /// Length of the narration clip, as reported by the host.
    pub fn tts_duration(&self, host: &dyn EffectHost) -> Result<f32, EffectError> {
        host.audio_duration(&self.tts_channel())
    }
}

/// `sin(2π · (t mod period) / period)`; a non-positive period holds at 0.
pub fn floating_wave(time: f32, period: f32) -> f32 {
    if period <= 0.0 || !period.is_finite() {
        return 0.0;
    }
    let phase = time.rem_euclid(period) / period;
    (phase * TAU).sin()
}
