use kanal::{AsyncReceiver, AsyncSender};
use st_core::{LanguageSlot, Orchestrator, PendingTranslation, Status, Surface};
use st_translator::{TranslateError, TranslationResult};
use tokio_util::sync::CancellationToken;

use crate::ui::UiMessage;

pub mod language;
pub mod translate;

use language::{handle_language_change, handle_swap};
use translate::{handle_translation_finished, spawn_translation};

#[derive(Debug)]
pub enum AppEvent {
    /// New input text, translated right away
    Input(String),
    Translate,
    Swap,
    SetSource(String),
    SetTarget(String),
    Clear,
    ShowLanguages,
    ShowState,
    UnknownCommand(String),
    Close,
    TranslationFinished {
        pending: PendingTranslation,
        outcome: Result<TranslationResult, TranslateError>,
    },
}

/// Owns the orchestrator for one surface until it closes
pub async fn event_loop(
    mut orchestrator: Orchestrator,
    surface: Surface,
    app_rx: AsyncReceiver<AppEvent>,
    app_tx: AsyncSender<AppEvent>,
    ui_tx: AsyncSender<UiMessage>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] {:?} surface open", surface);
    let mut closing = false;

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] {:?}", std::mem::discriminant(&event));

        match event {
            AppEvent::Close => {
                if orchestrator.status() == Status::InFlight {
                    // let the outstanding request land before closing
                    tracing::debug!("[EVENT_LOOP] close deferred until request completes");
                    closing = true;
                } else {
                    break;
                }
            }
            AppEvent::TranslationFinished { pending, outcome } => {
                handle_translation_finished(&mut orchestrator, &pending, outcome, &app_tx);
                if closing && orchestrator.status() == Status::Idle {
                    break;
                }
            }
            event if closing => {
                tracing::debug!("[EVENT_LOOP] closing, dropped {:?}", event);
            }
            event => handle_event(&mut orchestrator, surface, event, &app_tx, &ui_tx).await?,
        }
    }

    tracing::info!("[EVENT_LOOP] {:?} surface closed", surface);
    Ok(())
}

async fn handle_event(
    orchestrator: &mut Orchestrator,
    surface: Surface,
    event: AppEvent,
    app_tx: &AsyncSender<AppEvent>,
    ui_tx: &AsyncSender<UiMessage>,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Input(text) => {
            if surface == Surface::ShareOverlay {
                ui_tx
                    .send(UiMessage::Error("shared text cannot be edited".to_string()))
                    .await?;
                return Ok(());
            }
            orchestrator.set_input_text(text);
            if let Some(pending) = orchestrator.begin_translate() {
                spawn_translation(orchestrator, pending, app_tx);
            }
        }
        AppEvent::Translate => {
            if let Some(pending) = orchestrator.begin_translate() {
                spawn_translation(orchestrator, pending, app_tx);
            }
        }
        AppEvent::Swap => handle_swap(orchestrator, app_tx),
        AppEvent::SetSource(code) => {
            handle_language_change(orchestrator, LanguageSlot::Source, &code, app_tx, ui_tx).await?;
        }
        AppEvent::SetTarget(code) => {
            handle_language_change(orchestrator, LanguageSlot::Target, &code, app_tx, ui_tx).await?;
        }
        AppEvent::Clear => orchestrator.clear(),
        AppEvent::ShowLanguages => {
            let languages = orchestrator.registry().list_languages().to_vec();
            ui_tx.send(UiMessage::Languages(languages)).await?;
        }
        AppEvent::ShowState => {
            ui_tx.send(UiMessage::State(orchestrator.snapshot())).await?;
        }
        AppEvent::UnknownCommand(command) => {
            ui_tx
                .send(UiMessage::Error(format!("unknown command: {command}")))
                .await?;
        }
        AppEvent::Close | AppEvent::TranslationFinished { .. } => {
            // handled by the loop
        }
    }

    Ok(())
}
