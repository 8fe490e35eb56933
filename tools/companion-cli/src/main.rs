//! Companion Emotion CLI
//!
//! Runs texts through the emotion engine and prints the reading and the
//! animation the pet would show.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use companion_plugin_emotion::{
    AnalysisContext, AnimationId, EmotionPlugin, PersonalityProfile, PetEvent, TraitLevel,
};
use companion_core::Logger;
use std::collections::HashMap;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optional .env file to load before reading COMPANION_* settings
    #[arg(long, global = true)]
    env_file: Option<std::path::PathBuf>,

    /// Override a setting, e.g. --set COMPANION_BLEND_MARGIN=0.3
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    overrides: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a text and choose an animation
    Analyze {
        /// Text to analyze
        text: String,

        /// User whose session the readings accumulate in
        #[arg(short, long, default_value = "cli")]
        user: String,

        /// Replay the text this many times to show context effects
        #[arg(short, long, default_value_t = 1)]
        repeat: usize,

        /// Event that triggered the analysis
        #[arg(short, long, value_enum, default_value = "message")]
        event: EventArg,

        /// Extra text classified at reduced weight
        #[arg(long)]
        supplement: Option<String>,

        /// Personality trait set to high
        #[arg(short, long, value_enum)]
        personality: Vec<TraitArg>,
    },

    /// Print the (emotion, intensity) → animation table
    Table,

    /// Plan a transition between two animation ids
    Plan {
        /// Animation currently shown
        current: String,
        /// Animation requested
        candidate: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EventArg {
    /// Free-form chat message
    Message,
    /// Reflection after a challenge
    Reflection,
    /// Daily check-in
    CheckIn,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TraitArg {
    Serious,
    Playful,
    Anxious,
}

fn parse_overrides(raw: &[String]) -> Result<HashMap<String, String>> {
    raw.iter()
        .map(|pair| {
            let (k, v) = pair
                .split_once('=')
                .with_context(|| format!("expected KEY=VALUE, got '{}'", pair))?;
            Ok((k.trim().to_string(), v.trim().to_string()))
        })
        .collect()
}

fn build_context(
    event: EventArg,
    supplement: Option<String>,
    traits: &[TraitArg],
) -> AnalysisContext {
    let event = match event {
        EventArg::Message => PetEvent::UserMessage,
        EventArg::Reflection => PetEvent::ReflectionAdded,
        EventArg::CheckIn => PetEvent::CheckIn,
    };
    let mut ctx = AnalysisContext::for_event(event);
    if let Some(text) = supplement {
        ctx = ctx.with_supplementary_text(text);
    }
    if !traits.is_empty() {
        let profile = traits
            .iter()
            .fold(PersonalityProfile::balanced(), |p, t| match t {
                TraitArg::Serious => p.with_seriousness(TraitLevel::High),
                TraitArg::Playful => p.with_playfulness(TraitLevel::High),
                TraitArg::Anxious => p.with_anxiety(TraitLevel::High),
            });
        ctx = ctx.with_personality(profile);
    }
    ctx
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => companion_core::load_env_from_path(path)?,
        None => companion_core::load_env()?,
    }
    companion_core::init_logging();
    let log = Logger::new("companion-cli");

    let overrides = parse_overrides(&cli.overrides)?;
    let engine = EmotionPlugin::new().init(&overrides)?;
    log.info(&format!("engine ready with {} override(s)", overrides.len()));

    match cli.command {
        Command::Analyze {
            text,
            user,
            repeat,
            event,
            supplement,
            personality,
        } => {
            let ctx = build_context(event, supplement, &personality);
            log.debug(&format!("analyzing as '{}' with {:?}", user, ctx.event));
            if repeat == 0 {
                log.warn("--repeat 0 runs a single round");
            }
            for round in 1..=repeat.max(1) {
                let suggestion = engine.suggest_animation(&user, &text, &ctx);
                println!("── round {} ──", round);
                println!("{}", serde_json::to_string_pretty(&suggestion.state)?);
                println!(
                    "{} -> {} (requested {})",
                    suggestion.state.describe(),
                    suggestion.animation,
                    suggestion.candidate
                );
            }
            if let Some(history) = engine.history_snapshot(&user) {
                println!(
                    "history: {} readings, trend {:?}, volatility {:.3}, mean valence {:.3}, dominant {}",
                    history.len(),
                    history.trend,
                    history.volatility,
                    history.average_valence(),
                    history
                        .dominant_emotion()
                        .map(|e| e.as_str())
                        .unwrap_or("-")
                );
            }
        }
        Command::Table => {
            let selector = companion_plugin_emotion::AnimationSelector::new(
                engine.config().blend_margin,
            )?;
            for (emotion, intensity, animation) in selector.entries() {
                println!("{:<14}{:<8}{}", emotion.as_str(), intensity.as_str(), animation);
            }
        }
        Command::Plan { current, candidate } => {
            let next = engine.plan_transition_raw(&current, &candidate);
            let done = next.as_str() == candidate.trim().to_ascii_lowercase();
            let note = match (done, next == AnimationId::HUB) {
                (true, _) => "",
                (false, true) => " (via hub)",
                (false, false) => " (intermediate)",
            };
            println!("{} -> {}{}", current, next, note);
        }
    }

    Ok(())
}
