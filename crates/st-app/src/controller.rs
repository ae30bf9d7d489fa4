use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use st_core::{LanguageRegistry, Orchestrator, OrchestratorEvent, Surface};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{AppEvent, event_loop};
use crate::ui::{UiMessage, ui_loop};

/// Centralized channel management
pub struct ChannelSet {
    pub app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    // unbounded, the orchestrator never waits on its observer
    pub orchestrator: (
        AsyncSender<OrchestratorEvent>,
        AsyncReceiver<OrchestratorEvent>,
    ),
    pub messages: (AsyncSender<UiMessage>, AsyncReceiver<UiMessage>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app: kanal::bounded_async(64),
            orchestrator: kanal::unbounded_async(),
            messages: kanal::bounded_async(64),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Task spawning and lifecycle for one surface
pub struct AppController {
    channels: ChannelSet,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new() -> Self {
        Self {
            channels: ChannelSet::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Where user actions go
    pub fn sender(&self) -> AsyncSender<AppEvent> {
        self.channels.app.0.clone()
    }

    pub fn spawn_tasks(
        &self,
        orchestrator: Orchestrator,
        surface: Surface,
        registry: Arc<LanguageRegistry>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        let orchestrator = orchestrator.with_observer(self.channels.orchestrator.0.clone());

        // Event loop
        tasks.spawn(event_loop(
            orchestrator,
            surface,
            self.channels.app.1.clone(),
            self.channels.app.0.clone(),
            self.channels.messages.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Terminal output
        tasks.spawn(ui_loop(
            self.channels.orchestrator.1.clone(),
            self.channels.messages.1.clone(),
            registry,
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}
