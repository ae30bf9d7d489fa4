/// Text handed over by the host when the share overlay is launched
#[derive(Debug, Clone, Default)]
pub struct SharedText {
    /// Directly shared text
    pub text: Option<String>,
    /// Text selected in another app and sent through "process text"
    pub process_text: Option<String>,
}

impl SharedText {
    pub fn new(text: Option<String>, process_text: Option<String>) -> Self {
        Self { text, process_text }
    }

    /// Shared text wins when it is not blank. `None` means the overlay must
    /// not open.
    pub fn resolve(&self) -> Option<&str> {
        [self.text.as_deref(), self.process_text.as_deref()]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
    }
}
