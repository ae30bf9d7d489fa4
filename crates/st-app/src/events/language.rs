use kanal::AsyncSender;
use st_core::{LanguageSlot, Orchestrator};

use crate::events::AppEvent;
use crate::events::translate::spawn_translation;
use crate::ui::UiMessage;

pub async fn handle_language_change(
    orchestrator: &mut Orchestrator,
    slot: LanguageSlot,
    code: &str,
    app_tx: &AsyncSender<AppEvent>,
    ui_tx: &AsyncSender<UiMessage>,
) -> anyhow::Result<()> {
    let result = match slot {
        LanguageSlot::Source => orchestrator.set_source_language(code),
        LanguageSlot::Target => orchestrator.set_target_language(code),
    };

    match result {
        Ok(Some(pending)) => spawn_translation(orchestrator, pending, app_tx),
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("rejected {slot} '{code}': {e}");
            ui_tx.send(UiMessage::Error(e.to_string())).await?;
        }
    }

    Ok(())
}

/// Swap, then re-translate on surfaces that follow every change
pub fn handle_swap(orchestrator: &mut Orchestrator, app_tx: &AsyncSender<AppEvent>) {
    orchestrator.swap();

    if orchestrator.options().auto_retranslate
        && let Some(pending) = orchestrator.begin_translate()
    {
        spawn_translation(orchestrator, pending, app_tx);
    }
}
