use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use tokio::sync::mpsc;

use scopekit::logging::init_tracing;
use scopekit::mvi::TaggedEvent;
use scopekit::replay::{parse_script, parse_slot_arg, Replay};
use scopekit::Config;

/// Replay a script of events through a counter scope and print each step
/// as one JSON line.
#[derive(Debug, Parser)]
#[command(name = "scope-replay", version)]
struct Args {
    /// JSON file holding an array of `{"kind": .., "data": ..}` events.
    #[arg(long)]
    script: PathBuf,

    /// TOML config file. Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Slot content to register before replay, as `name=content`.
    #[arg(long = "slot", value_parser = parse_slot_arg)]
    slots: Vec<(String, String)>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    let text = tokio::fs::read_to_string(&args.script)
        .await
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let events = parse_script(&text).context("parsing script")?;
    tracing::info!(events = events.len(), "Replay starting");

    let replay = Replay::new(&config);
    for (name, content) in &args.slots {
        replay
            .register_slot(name, content)
            .with_context(|| format!("registering slot '{name}'"))?;
    }

    // Events arrive through a channel, as they would from async work
    // feeding a UI; dispatch itself stays synchronous on this task.
    let (tx, mut rx) = mpsc::channel::<TaggedEvent>(16);
    let producer = tokio::spawn(async move {
        for event in events {
            if tx.send(event).await.is_err() {
                break;
            }
        }
    });

    while let Some(event) = rx.recv().await {
        let line = replay.step(event)?;
        println!("{}", serde_json::to_string(&line)?);
    }
    producer.await.context("event producer failed")?;

    let slots = replay.resolved_slots()?;
    println!("{}", json!({ "slots": slots }));
    replay.scope().dispose();
    Ok(())
}
