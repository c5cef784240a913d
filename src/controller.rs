use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tracing::{debug, info};

use crate::api::models::Model;
use crate::client::ApiGateway;

/// Everything the two forms show. Lives only as long as the client session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub url: String,
    pub question: String,
    pub cleaned: String,
    pub answer: String,
    pub loading: bool,
    pub model: Model,
}

/// Where user-facing failure messages go.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Holds the form state and runs the scrape/parse actions against a gateway.
///
/// Clones share the same state, so an action can be spawned onto the runtime
/// while the view keeps rendering `loading`. Nothing stops a second trigger
/// while one is already in flight.
#[derive(Clone)]
pub struct ScraperController {
    gateway: Arc<dyn ApiGateway>,
    notifier: Arc<dyn Notifier>,
    state: Arc<Mutex<FormState>>,
}

impl ScraperController {
    pub fn new(gateway: Arc<dyn ApiGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notifier,
            state: Arc::new(Mutex::new(FormState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> FormState {
        self.state().clone()
    }

    pub fn set_url(&self, url: impl Into<String>) {
        self.state().url = url.into();
    }

    pub fn set_question(&self, question: impl Into<String>) {
        self.state().question = question.into();
    }

    pub fn set_cleaned(&self, cleaned: impl Into<String>) {
        self.state().cleaned = cleaned.into();
    }

    pub fn set_model(&self, model: Model) {
        self.state().model = model;
    }

    /// Apply an in-place edit to the state, e.g. a keystroke on one field.
    pub fn update(&self, edit: impl FnOnce(&mut FormState)) {
        edit(&mut self.state());
    }

    pub async fn trigger_scrape(&self) {
        let url = {
            let mut st = self.state();
            if st.url.is_empty() {
                return;
            }
            st.loading = true;
            st.cleaned.clear();
            st.answer.clear();
            st.url.clone()
        };

        info!(%url, "scrape requested");
        let result = self.gateway.scrape(url).await;

        let failure = {
            let mut st = self.state();
            st.loading = false;
            match result {
                Ok(body) => {
                    st.cleaned = text_field(&body, "cleaned");
                    debug!(chars = st.cleaned.len(), "scrape finished");
                    None
                }
                Err(err) => Some(format!("Scrape failed: {}", err.user_message())),
            }
        };

        if let Some(message) = failure {
            self.notifier.alert(&message);
        }
    }

    pub async fn trigger_parse(&self) {
        let (question, dom_content, url, model) = {
            let mut st = self.state();
            if st.question.is_empty() {
                return;
            }
            st.loading = true;
            st.answer.clear();

            let dom_content = (!st.cleaned.trim().is_empty()).then(|| st.cleaned.clone());
            let url = (dom_content.is_none() && !st.url.is_empty()).then(|| st.url.clone());
            (st.question.clone(), dom_content, url, st.model)
        };

        info!(
            model = %model,
            with_content = dom_content.is_some(),
            with_url = url.is_some(),
            "parse requested"
        );
        let result = self
            .gateway
            .parse(question, dom_content, url, Some(model.as_str().to_string()))
            .await;

        let failure = {
            let mut st = self.state();
            st.loading = false;
            match result {
                Ok(body) => {
                    st.answer = text_field(&body, "answer");
                    None
                }
                Err(err) => Some(format!("Parse failed: {}", err.user_message())),
            }
        };

        if let Some(message) = failure {
            self.notifier.alert(&message);
        }
    }
}

fn text_field(body: &Value, key: &str) -> String {
    body.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
