use kanal::AsyncSender;
use st_core::{Completion, Orchestrator, PendingTranslation};
use st_translator::{TranslateError, TranslationResult};

use crate::events::AppEvent;

/// Run the client call off the event loop and report back as an event
pub fn spawn_translation(
    orchestrator: &Orchestrator,
    pending: PendingTranslation,
    app_tx: &AsyncSender<AppEvent>,
) {
    let translator = orchestrator.translator();
    let tx = app_tx.clone();

    tokio::spawn(async move {
        let outcome = translator.translate(&pending.request).await;
        if let Err(e) = tx.send(AppEvent::TranslationFinished { pending, outcome }).await {
            tracing::debug!("translation finished after shutdown: {e}");
        }
    });
}

pub fn handle_translation_finished(
    orchestrator: &mut Orchestrator,
    pending: &PendingTranslation,
    outcome: Result<TranslationResult, TranslateError>,
    app_tx: &AsyncSender<AppEvent>,
) {
    match orchestrator.finish_translate(pending, outcome) {
        Completion::Applied => tracing::debug!("request {} applied", pending.id),
        Completion::Failed(e) => tracing::debug!("request {} failed: {e}", pending.id),
        Completion::Stale {
            follow_up: Some(next),
        } => {
            tracing::debug!("request {} stale, following up with {}", pending.id, next.id);
            spawn_translation(orchestrator, next, app_tx);
        }
        Completion::Stale { follow_up: None } | Completion::Ignored => {}
    }
}
