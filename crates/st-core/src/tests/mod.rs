mod preferences_tests;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use st_translator::{
    ProviderMetadata, TranslateError, TranslationRequest, TranslationResult, Translator,
};

use crate::{
    LanguageRegistry, MemoryPreferenceStore, Orchestrator, OrchestratorOptions, PreferenceRecord,
    Services,
};

type Reply = Box<dyn Fn(&TranslationRequest) -> Result<TranslationResult, TranslateError> + Send + Sync>;

/// Records every request and answers from a closure
pub(crate) struct FakeTranslator {
    calls: Mutex<Vec<TranslationRequest>>,
    reply: Reply,
}

impl FakeTranslator {
    pub(crate) fn replying(text: &'static str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Box::new(move |_| {
                Ok(TranslationResult {
                    translated_text: text.to_string(),
                    ..TranslationResult::default()
                })
            }),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Box::new(|_| Err(TranslateError::NetworkError("connection reset".into()))),
        }
    }

    pub(crate) fn calls(&self) -> Vec<TranslationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult, TranslateError> {
        self.calls.lock().unwrap().push(request.clone());
        (self.reply)(request)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
        }
    }
}

pub(crate) struct Harness {
    pub translator: Arc<FakeTranslator>,
    pub preferences: Arc<MemoryPreferenceStore>,
    pub services: Services,
}

impl Harness {
    pub(crate) fn new(translator: FakeTranslator) -> Self {
        Self::with_record(translator, PreferenceRecord::default())
    }

    pub(crate) fn with_record(translator: FakeTranslator, record: PreferenceRecord) -> Self {
        let translator = Arc::new(translator);
        let preferences = Arc::new(MemoryPreferenceStore::with_record(record));
        let services = Services {
            registry: Arc::new(LanguageRegistry::builtin()),
            translator: translator.clone(),
            preferences: preferences.clone(),
        };

        Self {
            translator,
            preferences,
            services,
        }
    }

    pub(crate) fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(self.services.clone(), OrchestratorOptions::default())
    }

    pub(crate) fn orchestrator_with(&self, options: OrchestratorOptions) -> Orchestrator {
        Orchestrator::new(self.services.clone(), options)
    }
}
