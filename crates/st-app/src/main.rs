use std::sync::Arc;

use clap::Parser;
use st_core::{
    Completion, LanguageSlot, Orchestrator, OrchestratorEvent, OrchestratorOptions, SharedText,
    Surface,
};
use tokio::signal;
use tokio::task::JoinSet;

pub mod cli;
pub mod controller;
pub mod events;
pub mod io;
pub mod logging;
pub mod profile;
pub mod state;
pub mod ui;


use self::cli::{Cli, Command};
use self::controller::AppController;
use self::events::AppEvent;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // optional .env next to the binary invocation
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_tracing(cli.log_json);

    let config = profile::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Languages { target } => {
            list_languages(target);
            Ok(())
        }
        Command::Translate { from, to, text } => {
            let state = AppState::new(config)?;
            translate_once(&state, from.as_deref(), to.as_deref(), text.join(" ")).await
        }
        Command::Interactive => {
            let state = AppState::new(config)?;
            let options = OrchestratorOptions::for_surface(&state.config, Surface::Main);
            let orchestrator = Orchestrator::new(state.services.clone(), options);
            run_surface(&state, orchestrator, Surface::Main, None).await
        }
        Command::Share { text, process_text } => {
            let shared = SharedText::new(text, process_text);
            let Some(text) = shared.resolve() else {
                tracing::info!("Nothing shared, overlay not opened");
                return Ok(());
            };

            let state = AppState::new(config)?;
            let options = OrchestratorOptions::for_surface(&state.config, Surface::ShareOverlay);
            let Some(orchestrator) =
                Orchestrator::for_shared_text(state.services.clone(), options, text)
            else {
                return Ok(());
            };
            // the overlay translates once as soon as it opens
            run_surface(&state, orchestrator, Surface::ShareOverlay, Some(AppEvent::Translate))
                .await
        }
    }
}

fn list_languages(target_only: bool) {
    let registry = st_core::LanguageRegistry::builtin();
    let slot = if target_only {
        LanguageSlot::Target
    } else {
        LanguageSlot::Source
    };

    for language in registry.languages_for(slot) {
        println!("{:<6} {}", language.code, language.display_name);
    }
}

/// One-shot translation. Only an invalid language choice is an error; a failed
/// request is reported as a notice on stderr.
async fn translate_once(
    state: &AppState,
    from: Option<&str>,
    to: Option<&str>,
    text: String,
) -> anyhow::Result<()> {
    let options = OrchestratorOptions::for_surface(&state.config, Surface::Main);
    let (events_tx, events_rx) = kanal::unbounded_async();
    let mut orchestrator =
        Orchestrator::new(state.services.clone(), options).with_observer(events_tx);

    if let Some(code) = from {
        orchestrator.set_source_language(code)?;
    }
    if let Some(code) = to {
        orchestrator.set_target_language(code)?;
    }
    orchestrator.set_input_text(text);

    let completion = orchestrator.translate().await;

    while let Ok(Some(event)) = events_rx.try_recv() {
        if let OrchestratorEvent::Notice(message) = event {
            eprintln!("! {message}");
        }
    }

    match completion {
        Some(Completion::Applied) => println!("{}", orchestrator.snapshot().result_text),
        Some(other) => tracing::debug!("translation not applied: {other:?}"),
        None => tracing::debug!("blank input, nothing translated"),
    }

    Ok(())
}

/// Run an interactive surface until it closes or Ctrl+C
async fn run_surface(
    state: &AppState,
    orchestrator: Orchestrator,
    surface: Surface,
    initial: Option<AppEvent>,
) -> anyhow::Result<()> {
    let controller = AppController::new();
    let mut tasks = controller.spawn_tasks(
        orchestrator,
        surface,
        Arc::clone(&state.services.registry),
    );

    if let Some(event) = initial {
        controller.sender().send(event).await?;
    }
    io::spawn_stdin_reader(controller.sender());

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            log_task_exit(result);
        }
    }

    controller.shutdown();
    drain(&mut tasks).await;
    Ok(())
}

async fn drain(tasks: &mut JoinSet<anyhow::Result<()>>) {
    while let Some(result) = tasks.join_next().await {
        log_task_exit(result);
    }
}

fn log_task_exit(result: Result<anyhow::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => tracing::debug!("task exited"),
        Ok(Err(e)) => tracing::error!("task failed: {e}"),
        Err(e) => tracing::error!("task panicked: {e}"),
    }
}
