use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quizreel_animation_core::{export_baked_json, RecordingHost};
use quizreel_scene_core::{bake_quiz, QuestionData, SceneConfig};
use serde_json::to_string_pretty;

const DEFAULT_QUIZ: &str = include_str!("../../../../fixtures/quizzes/four_options.json");

#[derive(Parser)]
#[command(name = "bake_quiz")]
#[command(about = "Bake a quiz scene and print its timeline")]
struct Cli {
    /// Quiz JSON file (defaults to the bundled four-option quiz)
    path: Option<PathBuf>,

    /// Print the full baked timeline as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let text = match &cli.path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => DEFAULT_QUIZ.to_string(),
    };
    let data = QuestionData::from_json_str(&text)?;
    let file_name = data.output_file_name().to_string();

    let render = bake_quiz(data, SceneConfig::default(), RecordingHost::new())?;

    if cli.json {
        println!("{}", to_string_pretty(&export_baked_json(&render.timeline))?);
        return Ok(());
    }

    let timeline = &render.timeline;
    println!(
        "{file_name}: {:.2}s, {} frames at {} fps",
        timeline.duration,
        timeline.frame_count(),
        timeline.frame_rate
    );
    println!(
        "{} tracks, {} events",
        timeline.tracks.len(),
        timeline.events.len()
    );
    for effect in render.scheduler.host().applied() {
        println!("  {}", serde_json::to_string(effect)?);
    }
    Ok(())
}
