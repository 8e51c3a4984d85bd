//! Display-state machine for the lookup flow.
//!
//! One controller per active session. It owns the pending query text and
//! the current [`DisplayState`], and is the only thing that transitions
//! that state:
//!
//! `Idle --submit(non-empty)--> Loading --success--> Loaded`
//! `Loading --failure--> Failed`; `Loaded|Failed --submit--> Loading`.

use tracing::{debug, warn};

use crate::error::{LOOKUP_FAILED_MESSAGE, LookupError};
use crate::model::{FetchOptions, ForecastMode, WeatherSnapshot};
use crate::normalize::normalize;
use crate::provider::WeatherProvider;

/// What the presentation layer should currently show. Exactly one variant
/// is active; every transition replaces the previous value wholesale, so a
/// failed lookup can never leave a stale snapshot behind.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading,
    Loaded(WeatherSnapshot),
    Failed(String),
}

impl DisplayState {
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            DisplayState::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            DisplayState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct QueryController {
    provider: Box<dyn WeatherProvider>,
    mode: ForecastMode,
    options: FetchOptions,
    query: String,
    state: DisplayState,
}

impl QueryController {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        mode: ForecastMode,
        options: FetchOptions,
    ) -> Self {
        Self { provider, mode, options, query: String::new(), state: DisplayState::Idle }
    }

    /// Replace the pending query text. No validation, no other side effects.
    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn query_text(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Run one lookup for the pending query.
    ///
    /// An empty or whitespace-only query changes nothing and never reaches
    /// the provider. Otherwise the state moves to `Loading`, and then to
    /// `Loaded` or `Failed` depending on the outcome. Every failure kind
    /// collapses into the same static user message; the cause only
    /// survives in the logs.
    ///
    /// `&mut self` serializes submissions within one session, and dropping
    /// the controller drops any in-flight request with it, so a late
    /// response can never write into a destroyed controller.
    pub async fn submit(&mut self) {
        let query = self.query.trim().to_owned();
        if query.is_empty() {
            debug!("ignoring submit with empty query");
            return;
        }

        self.state = DisplayState::Loading;

        match lookup(self.provider.as_ref(), &query, self.mode, &self.options).await {
            Ok(snapshot) => self.state = DisplayState::Loaded(snapshot),
            Err(err) => {
                warn!(%query, error = ?err, "lookup failed");
                self.state = DisplayState::Failed(LOOKUP_FAILED_MESSAGE.to_string());
            }
        }
    }
}

/// One-shot lookup: fetch and normalize without going through a
/// controller. Unlike [`QueryController::submit`], an empty query is an
/// error here rather than a no-op, since there is no state to leave
/// untouched.
pub async fn lookup(
    provider: &dyn WeatherProvider,
    query: &str,
    mode: ForecastMode,
    options: &FetchOptions,
) -> Result<WeatherSnapshot, LookupError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(LookupError::EmptyQuery);
    }

    let payload = provider.fetch(query, options).await?;
    normalize(&payload, mode)
}
