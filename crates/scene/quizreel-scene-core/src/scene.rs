//! The quiz scene: question, staggered card reveals, the answer and the outro.

use quizreel_animation_core::{
    bake, BakedTimeline, BakingConfig, Color, Director, Effect, EffectHost, Scheduler, Signal,
    SignalStore,
};

use crate::card::Card;
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::quiz::QuestionData;
use crate::text::AnimatedText;

/// Channel carrying the question narration and, later, the ding.
pub const SCENE_AUDIO: &str = "scene/audio";

#[derive(Debug)]
pub struct QuizScene {
    data: QuestionData,
    config: SceneConfig,
    question: AnimatedText,
    cards: Vec<Card>,
    body_height: Signal<f32>,
    background: [Signal<Color>; 2],
}

impl QuizScene {
    /// Validate the inputs and create every signal of the scene.
    pub fn build(
        store: &mut SignalStore,
        data: QuestionData,
        config: SceneConfig,
    ) -> Result<Self, SceneError> {
        data.validate()?;
        config.validate()?;

        let background = [
            store.create("background/from", config.background[0].parse::<Color>()?)?,
            store.create("background/to", config.background[1].parse::<Color>()?)?,
        ];
        let question = AnimatedText::new(store, "question", &data.question, &config.text)?;
        let body_height = store.create("body/height", 0.0f32)?;
        let cards = data
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                Card::new(
                    store,
                    format!("card{i}"),
                    option,
                    &config.card,
                    &config.assets,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "built quiz scene: {} words, {} cards, correct={}",
            question.words().len(),
            cards.len(),
            data.correct_answer_index
        );

        Ok(Self {
            data,
            config,
            question,
            cards,
            body_height,
            background,
        })
    }

    pub fn data(&self) -> &QuestionData {
        &self.data
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn question(&self) -> &AnimatedText {
        &self.question
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn correct_card(&self) -> Option<&Card> {
        self.cards.get(self.data.correct_answer_index)
    }

    pub fn body_height(&self) -> Signal<f32> {
        self.body_height
    }

    pub fn background(&self) -> [Signal<Color>; 2] {
        self.background
    }

    /// Root director for the whole scene.
    pub fn director(&self) -> Director {
        let timing = &self.config.timing;
        let correct = self.data.correct_answer_index;

        let mut root = Director::new("quiz")
            .command(Effect::set_source(SCENE_AUDIO, &self.data.audio_src));
        for card in &self.cards {
            root = root.run(card.setup());
        }

        root = root
            .command(Effect::play(SCENE_AUDIO))
            .run(self.question.animate(self.config.text.stagger_delay))
            .wait(timing.after_question)
            .tween(self.body_height, timing.body_height, timing.body_grow);

        for card in &self.cards {
            root = root.wait(timing.between_cards).run(card.reveal());
        }

        root = root
            .wait(timing.before_answer)
            .command(Effect::pause(SCENE_AUDIO))
            .command(Effect::set_source(SCENE_AUDIO, &self.config.assets.ding_sfx))
            .command(Effect::play(SCENE_AUDIO))
            .wait(timing.after_ding);

        for (i, card) in self.cards.iter().enumerate() {
            if i != correct {
                root = root.run(card.eliminate());
            }
        }
        if let Some(card) = self.correct_card() {
            root = root.run(card.answer());
        }
        root.wait(timing.outro)
    }
}

/// A built scene together with its baked timeline and the scheduler that produced it.
pub struct QuizRender<H: EffectHost> {
    pub scene: QuizScene,
    pub timeline: BakedTimeline,
    /// Still holds any directors that outlived the root (the floating loop).
    pub scheduler: Scheduler<H>,
}

/// Build a scene on a fresh scheduler and bake it at the scene frame rate.
pub fn bake_quiz<H: EffectHost>(
    data: QuestionData,
    config: SceneConfig,
    host: H,
) -> Result<QuizRender<H>, SceneError> {
    let mut scheduler = Scheduler::with_host(config.animation_config(), host)?;
    let baking = BakingConfig {
        frame_rate: config.frame_rate,
        ..BakingConfig::default()
    };
    let scene = QuizScene::build(scheduler.store_mut(), data, config)?;
    let timeline = bake(&mut scheduler, scene.director(), &baking)?;
    Ok(QuizRender {
        scene,
        timeline,
        scheduler,
    })
}
