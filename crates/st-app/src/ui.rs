use std::sync::Arc;

use kanal::AsyncReceiver;
use st_core::{Language, LanguageRegistry, OrchestratorEvent, OrchestratorState, Status};
use tokio_util::sync::CancellationToken;

/// Messages for the terminal that do not come from the orchestrator
#[derive(Debug, Clone)]
pub enum UiMessage {
    Languages(Vec<Language>),
    State(OrchestratorState),
    Error(String),
}

/// Labels used when a code is missing from the registry
const SOURCE_FALLBACK: &str = "Detect language";
const TARGET_FALLBACK: &str = "Chinese (Traditional)";

/// Turns orchestrator state into terminal lines
pub struct Renderer {
    registry: Arc<LanguageRegistry>,
    last: OrchestratorState,
}

impl Renderer {
    pub fn new(registry: Arc<LanguageRegistry>) -> Self {
        Self {
            registry,
            last: OrchestratorState::default(),
        }
    }

    pub fn pair_label(&self, state: &OrchestratorState) -> String {
        format!(
            "{} -> {}",
            self.registry
                .display_name_or(&state.source_language, SOURCE_FALLBACK),
            self.registry
                .display_name_or(&state.target_language, TARGET_FALLBACK)
        )
    }

    /// Lines to print for a new state, only what changed
    pub fn render_state(&mut self, state: OrchestratorState) -> Vec<String> {
        let mut lines = Vec::new();

        if state.source_language != self.last.source_language
            || state.target_language != self.last.target_language
        {
            lines.push(format!("[{}]", self.pair_label(&state)));
        }

        if state.status == Status::InFlight && self.last.status != Status::InFlight {
            lines.push("… translating".to_string());
        }

        if state.input_text != self.last.input_text
            && state.input_text.is_empty()
            && state.result_text.is_empty()
        {
            lines.push("(cleared)".to_string());
        } else if state.result_text != self.last.result_text && !state.result_text.is_empty() {
            lines.push(state.result_text.clone());
            if let Some(pronunciation) = &state.pronunciation {
                lines.push(format!("  ({pronunciation})"));
            }
        } else if state.input_text != self.last.input_text
            && !state.input_text.is_empty()
            && self.last.result_text == state.input_text
        {
            // a swap moved the previous result into the input
            lines.push(format!("> {}", state.input_text));
        }

        self.last = state;
        lines
    }

    pub fn render_message(&self, message: UiMessage) -> Vec<String> {
        match message {
            UiMessage::Languages(languages) => languages
                .iter()
                .map(|l| format!("{:<6} {}", l.code, l.display_name))
                .collect(),
            UiMessage::State(state) => {
                let mut lines = vec![
                    format!("[{}] {:?}", self.pair_label(&state), state.status),
                    format!("input:  {}", state.input_text),
                    format!("result: {}", state.result_text),
                ];
                if let Some(detected) = &state.detected_language {
                    lines.push(format!("detected: {detected}"));
                }
                lines
            }
            UiMessage::Error(message) => vec![format!("! {message}")],
        }
    }
}

pub async fn ui_loop(
    orchestrator_rx: AsyncReceiver<OrchestratorEvent>,
    message_rx: AsyncReceiver<UiMessage>,
    registry: Arc<LanguageRegistry>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut renderer = Renderer::new(registry);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = orchestrator_rx.recv() => print_event(&mut renderer, event?),
            message = message_rx.recv() => print_lines(renderer.render_message(message?)),
        }
    }

    // flush whatever the event loop produced before shutting down
    while let Ok(Some(event)) = orchestrator_rx.try_recv() {
        print_event(&mut renderer, event);
    }
    while let Ok(Some(message)) = message_rx.try_recv() {
        print_lines(renderer.render_message(message));
    }

    Ok(())
}

fn print_event(renderer: &mut Renderer, event: OrchestratorEvent) {
    match event {
        OrchestratorEvent::StateChanged(state) => print_lines(renderer.render_state(state)),
        OrchestratorEvent::Notice(message) => eprintln!("! {message}"),
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
