//! Headless simulation over a synthetic page

use super::load_config;
use anyhow::{bail, Result};
use lantern_animation::{AnimationState, DocumentLayout, RevealPhase};
use lantern_core::{ElementRef, Millis, MotionConfig, ScrollMetrics, Viewport};
use lantern_stage::{RevealCandidate, Stage};
use serde::Serialize;
use tracing::info;

/// Sections laid out below the hero, one viewport apart
const SECTIONS: u64 = 4;

pub struct SimulateArgs {
    pub config: Option<String>,
    pub duration_ms: u64,
    pub frame_ms: u64,
    pub width: f32,
    pub height: f32,
    pub scroll_to: f32,
    pub format: String,
}

#[derive(Debug, Serialize)]
pub struct SectionSummary {
    pub element: ElementRef,
    pub top: f32,
    pub phase: RevealPhase,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub duration_ms: Millis,
    pub frames: u64,
    pub animation_state: AnimationState,
    pub ready_at: Option<Millis>,
    pub spawned: u64,
    pub removed: u64,
    pub live: usize,
    pub peak_live: usize,
    pub particle_bound: usize,
    pub hero_opacity: f32,
    pub sections: Vec<SectionSummary>,
    pub leaked_resources: usize,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let summary = simulate(config, &args)?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => print_text(&summary),
    }
    Ok(())
}

/// Mount a stage, scroll linearly to `scroll_to` over the run, then tear down
pub fn simulate(config: MotionConfig, args: &SimulateArgs) -> Result<Summary> {
    if args.frame_ms == 0 {
        bail!("--frame-ms must be at least 1");
    }
    let viewport = Viewport::new(args.width, args.height);
    let particle_bound = config.particle_bound();

    let mut layout = DocumentLayout::new();
    let mut candidates = Vec::new();
    let mut tops = Vec::new();
    for i in 0..SECTIONS {
        let element = ElementRef::from_raw(i + 1);
        let top = args.height * (i as f32 + 1.25);
        layout.place(element, top);
        candidates.push(RevealCandidate::new(element));
        tops.push(top);
    }
    let content_height = args.height * (SECTIONS as f32 + 2.0);

    let mut stage = Stage::mount(config, viewport, &candidates, Box::new(layout))?;

    let mut now = 0;
    let mut frames = 0;
    while now < args.duration_ms {
        now = (now + args.frame_ms).min(args.duration_ms);
        if args.scroll_to != 0.0 {
            let progress = now as f32 / args.duration_ms as f32;
            stage.scrolled(ScrollMetrics::new(
                args.scroll_to * progress,
                args.height,
                content_height,
            ));
        }
        stage.advance_to(now)?;
        frames += 1;
    }

    let snapshot = stage.snapshot();
    let particles = stage.particles();
    let mut summary = Summary {
        duration_ms: args.duration_ms,
        frames,
        animation_state: snapshot.animation_state,
        ready_at: stage.intro().ready_at(),
        spawned: particles.spawned_total(),
        removed: particles.removed_total(),
        live: particles.live_count(),
        peak_live: particles.peak_live(),
        particle_bound,
        hero_opacity: snapshot.hero_opacity,
        sections: snapshot
            .reveals
            .iter()
            .zip(tops)
            .map(|(reveal, top)| SectionSummary {
                element: reveal.element,
                top,
                phase: reveal.phase,
            })
            .collect(),
        leaked_resources: 0,
    };

    stage.teardown()?;
    let left = stage.resources();
    summary.leaked_resources = left.timers + left.tweens + left.listeners + left.particles;
    info!(frames, spawned = summary.spawned, "simulation finished");
    Ok(summary)
}

fn print_text(summary: &Summary) {
    println!("Simulated {} ms in {} frames", summary.duration_ms, summary.frames);
    match summary.ready_at {
        Some(at) => println!("  intro:     ready at {} ms", at),
        None => println!("  intro:     {:?}", summary.animation_state),
    }
    println!(
        "  particles: {} spawned, {} removed, {} live (peak {}, bound {})",
        summary.spawned, summary.removed, summary.live, summary.peak_live, summary.particle_bound
    );
    println!("  hero:      opacity {:.3}", summary.hero_opacity);
    for section in &summary.sections {
        println!(
            "  {} at {:.0}px: {:?}",
            section.element, section.top, section.phase
        );
    }
    if summary.leaked_resources > 0 {
        println!("  Warning: {} resource(s) survived teardown", summary.leaked_resources);
    }
}
