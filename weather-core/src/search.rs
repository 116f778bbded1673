use tracing::{debug, warn};

use crate::{model::CardId, provider::WeatherProvider, state::AppState};

/// Outcome of one form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Input was blank; nothing was fetched and nothing changed.
    Ignored,
    /// A card was appended.
    Added(CardId),
    /// The fetch failed; the error slot holds the message.
    Failed,
}

/// The city input field.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    input: String,
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// Submit the current input.
    ///
    /// Blank input is a no-op. Otherwise exactly one fetch is issued for the
    /// trimmed city, its outcome is applied to `state`, and the input is
    /// cleared whatever the outcome.
    pub async fn submit<P>(&mut self, provider: &P, state: &mut AppState) -> Submission
    where
        P: WeatherProvider + ?Sized,
    {
        let city = self.input.trim();
        if city.is_empty() {
            return Submission::Ignored;
        }

        debug!(city, "submitting search");
        let ticket = state.begin_search();
        let result = provider.current(city).await;

        let submission = match &result {
            Ok(record) => Submission::Added(record.id()),
            Err(err) => {
                warn!(city, reason = %err.reason(), detail = err.detail(), "weather fetch failed");
                Submission::Failed
            }
        };

        state.complete(ticket, result);
        self.clear();
        submission
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::FetchFailed,
        model::{WeatherRecord, fixtures::record},
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every city it is asked for.
    #[derive(Debug)]
    struct StubProvider {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl StubProvider {
        fn ok() -> Self {
            Self { calls: Mutex::new(Vec::new()), fail: false }
        }

        fn failing() -> Self {
            Self { calls: Mutex::new(Vec::new()), fail: true }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn current(&self, city: &str) -> Result<WeatherRecord, FetchFailed> {
            self.calls.lock().unwrap().push(city.to_string());
            if self.fail {
                Err(FetchFailed::status(404, "city not found"))
            } else {
                Ok(record(42, city, "Clouds"))
            }
        }
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let provider = StubProvider::ok();
        let mut state = AppState::new();

        for raw in ["", "   ", "\t\n "] {
            let mut form = SearchForm::new();
            form.set_input(raw);

            assert_eq!(form.submit(&provider, &mut state).await, Submission::Ignored);
            assert_eq!(form.input(), raw);
        }

        assert!(provider.calls().is_empty());
        assert!(state.cards().is_empty());
        assert_eq!(state.error(), None);
        assert_eq!(state.mood().as_str(), "clear");
    }

    #[tokio::test]
    async fn trims_city_and_clears_input_on_success() {
        let provider = StubProvider::ok();
        let mut state = AppState::new();
        let mut form = SearchForm::new();
        form.set_input("  London ");

        let outcome = form.submit(&provider, &mut state).await;

        assert_eq!(outcome, Submission::Added(CardId(42)));
        assert_eq!(provider.calls(), ["London"]);
        assert_eq!(form.input(), "");
        assert_eq!(state.cards().len(), 1);
        assert_eq!(state.mood().as_str(), "clouds");
    }

    #[tokio::test]
    async fn clears_input_on_failure() {
        let provider = StubProvider::failing();
        let mut state = AppState::new();
        let mut form = SearchForm::new();
        form.set_input("Atlantis");

        let outcome = form.submit(&provider, &mut state).await;

        assert_eq!(outcome, Submission::Failed);
        assert_eq!(provider.calls(), ["Atlantis"]);
        assert_eq!(form.input(), "");
        assert_eq!(state.error(), Some("City not found"));
        assert!(state.cards().is_empty());
    }

    #[tokio::test]
    async fn works_through_a_trait_object() {
        let provider: Box<dyn WeatherProvider> = Box::new(StubProvider::ok());
        let mut state = AppState::new();
        let mut form = SearchForm::new();
        form.set_input("Oslo");

        let outcome = form.submit(provider.as_ref(), &mut state).await;
        assert_eq!(outcome, Submission::Added(CardId(42)));
    }
}
