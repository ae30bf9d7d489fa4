use std::mem;
use std::sync::Arc;

use kanal::AsyncSender;
use st_config::{Config, StaleResultPolicy};
use st_translator::{
    AUTO_DETECT, DEFAULT_ENGINE, LanguageCode, TranslateError, TranslationRequest,
    TranslationResult, Translator,
};
use uuid::Uuid;

use crate::error::CoreError;
use crate::language::LanguageRegistry;
use crate::preferences::{PreferenceRecord, PreferenceStore};
use crate::types::{LanguageSlot, OrchestratorEvent, OrchestratorState, Status, Surface};

/// Collaborators injected into every orchestrator
#[derive(Clone)]
pub struct Services {
    pub registry: Arc<LanguageRegistry>,
    pub translator: Arc<dyn Translator>,
    pub preferences: Arc<dyn PreferenceStore>,
}

#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Re-translate after every language change
    pub auto_retranslate: bool,
    pub stale_results: StaleResultPolicy,
    pub engine: String,
    /// Target taken when swapping away from auto-detect
    pub swap_fallback: LanguageCode,
}

impl OrchestratorOptions {
    pub fn for_surface(config: &Config, surface: Surface) -> Self {
        let auto_retranslate = match surface {
            Surface::Main => config.orchestrator.main_auto_retranslate,
            Surface::ShareOverlay => config.orchestrator.share_auto_retranslate,
        };

        Self {
            auto_retranslate,
            stale_results: config.orchestrator.stale_results,
            engine: config.translator.engine.clone(),
            swap_fallback: config.orchestrator.swap_fallback.clone(),
        }
    }
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            auto_retranslate: false,
            stale_results: StaleResultPolicy::Discard,
            engine: DEFAULT_ENGINE.to_string(),
            swap_fallback: "en".to_string(),
        }
    }
}

/// The one request an orchestrator is waiting on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTranslation {
    pub id: Uuid,
    pub request: TranslationRequest,
}

/// What `finish_translate` did with an outcome
#[derive(Debug)]
pub enum Completion {
    /// Result text replaced
    Applied,
    /// Result text left as it was, a notice was emitted
    Failed(TranslateError),
    /// The query changed while the request was in flight. `follow_up` is the
    /// request for the current query when auto re-translate is on.
    Stale {
        follow_up: Option<PendingTranslation>,
    },
    /// Not the request this orchestrator is waiting on
    Ignored,
}

/// Translation state machine for one screen.
///
/// `Idle` -> `InFlight` on [`begin_translate`](Self::begin_translate), back to
/// `Idle` on [`finish_translate`](Self::finish_translate). At most one request
/// is outstanding; translating while busy is a no-op.
pub struct Orchestrator {
    state: OrchestratorState,
    in_flight: Option<PendingTranslation>,
    services: Services,
    options: OrchestratorOptions,
    observer: Option<AsyncSender<OrchestratorEvent>>,
}

impl Orchestrator {
    /// Seed the language pair from the preference store
    pub fn new(services: Services, options: OrchestratorOptions) -> Self {
        let record = sanitize_record(&services.registry, services.preferences.load());

        Self::build(
            services,
            options,
            record.source_language,
            record.target_language,
        )
    }

    /// Start from a caller supplied pair instead of the stored one
    pub fn with_selection(
        services: Services,
        options: OrchestratorOptions,
        source: &str,
        target: &str,
    ) -> Result<Self, CoreError> {
        services.registry.validate(source, LanguageSlot::Source)?;
        services.registry.validate(target, LanguageSlot::Target)?;

        Ok(Self::build(
            services,
            options,
            source.to_string(),
            target.to_string(),
        ))
    }

    /// Overlay for shared text: auto-detect source, last saved target.
    /// Returns `None` for blank text, the overlay does not open.
    pub fn for_shared_text(
        services: Services,
        options: OrchestratorOptions,
        text: &str,
    ) -> Option<Self> {
        if text.trim().is_empty() {
            tracing::debug!("blank shared text, overlay not opened");
            return None;
        }

        let record = sanitize_record(&services.registry, services.preferences.load());
        let mut orchestrator = Self::build(
            services,
            options,
            AUTO_DETECT.to_string(),
            record.target_language,
        );
        orchestrator.state.input_text = text.to_string();

        Some(orchestrator)
    }

    fn build(
        services: Services,
        options: OrchestratorOptions,
        source_language: LanguageCode,
        target_language: LanguageCode,
    ) -> Self {
        tracing::debug!("orchestrator opened with {source_language} -> {target_language}");

        Self {
            state: OrchestratorState {
                source_language,
                target_language,
                ..OrchestratorState::default()
            },
            in_flight: None,
            services,
            options,
            observer: None,
        }
    }

    /// Send state changes and notices to `observer`
    pub fn with_observer(mut self, observer: AsyncSender<OrchestratorEvent>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn snapshot(&self) -> OrchestratorState {
        self.state.clone()
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn options(&self) -> &OrchestratorOptions {
        &self.options
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.services.registry
    }

    pub fn translator(&self) -> Arc<dyn Translator> {
        Arc::clone(&self.services.translator)
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.state.input_text = text.into();
        self.notify_state();
    }

    /// Enter `InFlight` and hand out the request to run.
    ///
    /// `None` when the input is blank or a request is already outstanding;
    /// neither case touches state.
    pub fn begin_translate(&mut self) -> Option<PendingTranslation> {
        if self.state.input_text.trim().is_empty() {
            tracing::debug!("translate ignored: blank input");
            return None;
        }

        if let Some(pending) = &self.in_flight {
            tracing::debug!("translate ignored: request {} in flight", pending.id);
            return None;
        }

        let request = TranslationRequest::new(
            self.state.source_language.clone(),
            self.state.target_language.clone(),
            self.state.input_text.clone(),
        )
        .with_engine(self.options.engine.clone());

        let pending = PendingTranslation {
            id: Uuid::new_v4(),
            request,
        };

        tracing::debug!(
            "request {} issued ({} -> {}, {} chars)",
            pending.id,
            pending.request.source_language,
            pending.request.target_language,
            pending.request.text.chars().count()
        );

        self.state.status = Status::InFlight;
        self.in_flight = Some(pending.clone());
        self.notify_state();

        Some(pending)
    }

    /// Apply the outcome of `pending` and return to `Idle`
    pub fn finish_translate(
        &mut self,
        pending: &PendingTranslation,
        outcome: Result<TranslationResult, TranslateError>,
    ) -> Completion {
        match &self.in_flight {
            Some(current) if current.id == pending.id => {}
            _ => {
                tracing::warn!("completion for unknown request {} ignored", pending.id);
                return Completion::Ignored;
            }
        }

        self.in_flight = None;
        self.state.status = Status::Idle;

        let completion = match outcome {
            Ok(result) => {
                let current = self.matches_current(&pending.request);
                if current || self.options.stale_results == StaleResultPolicy::Overwrite {
                    tracing::debug!("request {} applied", pending.id);
                    self.apply_result(result);
                    Completion::Applied
                } else {
                    tracing::debug!("request {} is stale, result discarded", pending.id);
                    Completion::Stale { follow_up: None }
                }
            }
            Err(err) => {
                tracing::warn!("request {} failed: {err}", pending.id);
                self.notice(format!("Translation failed: {err}"));
                Completion::Failed(err)
            }
        };

        self.notify_state();

        match completion {
            Completion::Stale { .. } if self.options.auto_retranslate => Completion::Stale {
                follow_up: self.begin_translate(),
            },
            Completion::Stale { .. } => {
                if !self.state.input_text.trim().is_empty() {
                    self.notice("Input changed during translation, translate again".to_string());
                }
                Completion::Stale { follow_up: None }
            }
            other => other,
        }
    }

    /// Run one translation to completion. `None` when nothing was issued.
    pub async fn translate(&mut self) -> Option<Completion> {
        let pending = self.begin_translate()?;
        let outcome = self.services.translator.translate(&pending.request).await;

        Some(self.finish_translate(&pending, outcome))
    }

    /// Exchange source and target. A shown result becomes the new input.
    pub fn swap(&mut self) {
        let state = &mut self.state;

        if state.source_language == AUTO_DETECT {
            state.source_language = mem::replace(
                &mut state.target_language,
                self.options.swap_fallback.clone(),
            );
        } else {
            mem::swap(&mut state.source_language, &mut state.target_language);
        }

        if !state.result_text.is_empty() {
            state.input_text = mem::take(&mut state.result_text);
            state.detected_language = None;
            state.pronunciation = None;
        }

        tracing::debug!(
            "swapped to {} -> {}",
            state.source_language,
            state.target_language
        );

        self.persist();
        self.notify_state();
    }

    /// Returns the request to run when auto re-translate is on
    pub fn set_source_language(
        &mut self,
        code: &str,
    ) -> Result<Option<PendingTranslation>, CoreError> {
        self.set_language(LanguageSlot::Source, code)
    }

    /// Fails with `InvalidSelection` for auto-detect
    pub fn set_target_language(
        &mut self,
        code: &str,
    ) -> Result<Option<PendingTranslation>, CoreError> {
        self.set_language(LanguageSlot::Target, code)
    }

    fn set_language(
        &mut self,
        slot: LanguageSlot,
        code: &str,
    ) -> Result<Option<PendingTranslation>, CoreError> {
        self.services.registry.validate(code, slot)?;

        let field = match slot {
            LanguageSlot::Source => &mut self.state.source_language,
            LanguageSlot::Target => &mut self.state.target_language,
        };
        *field = code.to_string();
        tracing::debug!("{slot} set to {code}");

        self.persist();
        self.notify_state();

        if self.options.auto_retranslate {
            Ok(self.begin_translate())
        } else {
            Ok(None)
        }
    }

    /// Empty input and result. An outstanding request keeps running.
    pub fn clear(&mut self) {
        self.state.input_text.clear();
        self.state.result_text.clear();
        self.state.detected_language = None;
        self.state.pronunciation = None;
        self.notify_state();
    }

    fn matches_current(&self, request: &TranslationRequest) -> bool {
        request.text == self.state.input_text
            && request.source_language == self.state.source_language
            && request.target_language == self.state.target_language
    }

    fn apply_result(&mut self, result: TranslationResult) {
        self.state.result_text = result.translated_text;
        self.state.detected_language = result.source_language_detected;
        self.state.pronunciation = result.pronunciation;
    }

    fn persist(&self) {
        let record = PreferenceRecord {
            source_language: self.state.source_language.clone(),
            target_language: self.state.target_language.clone(),
        };

        if let Err(e) = self.services.preferences.save(&record) {
            tracing::warn!("failed to save language preferences: {e}");
        }
    }

    fn notify_state(&self) {
        self.emit(OrchestratorEvent::StateChanged(self.state.clone()));
    }

    fn notice(&self, message: String) {
        self.emit(OrchestratorEvent::Notice(message));
    }

    fn emit(&self, event: OrchestratorEvent) {
        if let Some(observer) = &self.observer
            && let Err(e) = observer.try_send(event)
        {
            tracing::debug!("observer gone: {e}");
        }
    }
}

/// Replace stored codes the registry cannot accept with the defaults
fn sanitize_record(registry: &LanguageRegistry, record: PreferenceRecord) -> PreferenceRecord {
    let defaults = PreferenceRecord::default();

    let source_language = match registry.validate(&record.source_language, LanguageSlot::Source) {
        Ok(()) => record.source_language,
        Err(e) => {
            tracing::warn!("stored source ignored: {e}");
            defaults.source_language
        }
    };

    let target_language = match registry.validate(&record.target_language, LanguageSlot::Target) {
        Ok(()) => record.target_language,
        Err(e) => {
            tracing::warn!("stored target ignored: {e}");
            defaults.target_language
        }
    };

    PreferenceRecord {
        source_language,
        target_language,
    }
}
