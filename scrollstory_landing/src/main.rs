// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `landing`: simulate a scroll session over the landing page.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrollstory_landing::{build_stage, Element, LandingConfig, Session};

#[derive(Debug, Parser)]
#[command(name = "landing")]
#[command(version, about = "Simulate a scroll session over the landing page")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scroll targets in pixels, one gesture each (defaults to a tour of
    /// every pinned section)
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    scroll: Vec<f64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LandingConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => LandingConfig::default(),
    };
    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let mut stage = build_stage(&config).context("building the landing page")?;
    let mut session = Session::new(config.session, 0.0);
    session.mount(&mut stage);
    session.settle(&mut stage);

    let targets = if cli.scroll.is_empty() {
        // Stop past each pinned center, then once between two sections.
        let mut targets: Vec<f64> = stage
            .registry()
            .regions()
            .map(|(_, r)| r.center() + 0.3 * (r.end() - r.center()))
            .collect();
        if let Some((_, last)) = stage.registry().regions().last() {
            targets.push(last.end() + config.viewport.height);
        }
        targets
    } else {
        cli.scroll.clone()
    };

    println!(
        "page: {} pinned sections, {} reveals, max scroll {:.0}px",
        stage.sections().len(),
        stage.reveals().len(),
        stage.host().max_scroll()
    );
    for (section, pin) in Element::PINNED.iter().zip(stage.sections()) {
        if let Some(region) = pin.region() {
            println!(
                "  {section:?}: pinned {:.0}..{:.0}, rests at {:.0}",
                region.start(),
                region.end(),
                region.center()
            );
        }
    }

    for target in targets {
        match session.gesture(&mut stage, target) {
            Some(snap) => println!(
                "scroll to {target:.0}: snapped {:.0} -> {:.0} in {:.2}s",
                snap.from, snap.to, snap.duration
            ),
            None => println!("scroll to {target:.0}: rests in place"),
        }
        session.settle(&mut stage);
    }

    stage.unmount();
    println!(
        "{} frames, {} snaps, {} visuals applied, host released: {}",
        session.frames(),
        session.snaps().len(),
        stage.host().applied(),
        stage.host().is_released()
    );
    Ok(())
}
