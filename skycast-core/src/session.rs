use crate::{
    error::LookupError,
    history::RecentSearches,
    location::LocationSource,
    lookup::LookupService,
    model::WeatherRecord,
};

/// Visible lookup state: the last shown record, the search history, and a
/// monotonically increasing request token.
///
/// Every lookup takes a token before suspending; only the outcome carrying
/// the latest token is applied, so a slow superseded request can never
/// clobber a fresher result. A discarded outcome surfaces as `Ok(None)`.
///
/// On success the resolved city name is pushed into the history; on failure
/// nothing is mutated, so an error is never shown alongside a partial
/// record.
#[derive(Debug)]
pub struct Session {
    lookup: LookupService,
    history: RecentSearches,
    last: Option<WeatherRecord>,
    latest_token: u64,
}

impl Session {
    pub fn new(lookup: LookupService, history: RecentSearches) -> Self {
        Self {
            lookup,
            history,
            last: None,
            latest_token: 0,
        }
    }

    /// Look up by city name and apply the outcome if still the latest.
    pub async fn search(&mut self, city: &str) -> Result<Option<WeatherRecord>, LookupError> {
        let token = self.begin();
        let outcome = self.lookup.by_name(city).await;
        self.finish(token, outcome)
    }

    /// Resolve coordinates from `source`, then look up by coordinate.
    pub async fn search_here(
        &mut self,
        source: &dyn LocationSource,
    ) -> Result<Option<WeatherRecord>, LookupError> {
        let token = self.begin();
        let outcome = match source.locate().await {
            Ok(coords) => self.lookup.by_coordinate(coords).await,
            Err(e) => Err(e),
        };
        self.finish(token, outcome)
    }

    /// Issue a new request token, superseding any request still in flight.
    pub fn begin(&mut self) -> u64 {
        self.latest_token += 1;
        self.latest_token
    }

    /// Apply a lookup outcome taken under `token`.
    ///
    /// A superseded outcome (token no longer the latest) is discarded as
    /// `Ok(None)`, success or not.
    pub fn finish(
        &mut self,
        token: u64,
        outcome: Result<WeatherRecord, LookupError>,
    ) -> Result<Option<WeatherRecord>, LookupError> {
        if token != self.latest_token {
            tracing::debug!("discarding superseded lookup outcome");
            return Ok(None);
        }

        let record = outcome?;
        if !record.city.is_empty() {
            self.history.record(&record.city);
        }
        self.last = Some(record.clone());
        Ok(Some(record))
    }

    /// The last applied weather record, if any.
    pub fn weather(&self) -> Option<&WeatherRecord> {
        self.last.as_ref()
    }

    /// Recent-search history, most-recent-first.
    pub fn history(&self) -> &[String] {
        self.history.current()
    }
}
