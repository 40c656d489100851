use crate::core::geo::format_distance;
use crate::core::location::LocationResolver;
use crate::core::ranking::{nearest_branch, rank_branches};
use crate::core::summary::summarize;
use crate::domain::model::{
    AdviceRequest, AdviceResponse, Branch, Coordinate, RankedBranch, SummaryLine, UserLocation,
};
use crate::domain::ports::{AdviceService, LocationProvider};
use crate::utils::error::{LocatorError, Result};

pub const DEVICE_LOCATION_QUERY: &str = "Current GPS Location";

/// Identifies one advice request within a session. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AdviceTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum AdviceState {
    Idle,
    Pending(AdviceTicket),
    Ready(AdviceResponse),
    Failed,
}

#[derive(Debug, Clone)]
pub struct PendingAdvice {
    pub ticket: AdviceTicket,
    pub request: AdviceRequest,
}

/// What became of a completed request.
#[derive(Debug, PartialEq)]
pub enum AdviceOutcome {
    Applied,
    Stale,
}

/// Caller-side state for one user: the current location, the current advice and the
/// wiring between resolver, ranking, requester and presenter.
pub struct LocatorSession<A: AdviceService, L: LocationProvider> {
    advice: A,
    resolver: LocationResolver<L>,
    branches: &'static [Branch],
    user_location: Option<UserLocation>,
    advice_state: AdviceState,
    locating: bool,
    last_ticket: u64,
}

impl<A: AdviceService, L: LocationProvider> LocatorSession<A, L> {
    pub fn new(advice: A, location: L, branches: &'static [Branch]) -> Self {
        Self {
            advice,
            resolver: LocationResolver::new(location),
            branches,
            user_location: None,
            advice_state: AdviceState::Idle,
            locating: false,
            last_ticket: 0,
        }
    }

    pub fn user_location(&self) -> Option<&UserLocation> {
        self.user_location.as_ref()
    }

    pub fn is_locating(&self) -> bool {
        self.locating
    }

    pub fn advice_state(&self) -> &AdviceState {
        &self.advice_state
    }

    pub fn current_advice(&self) -> Option<&AdviceResponse> {
        match &self.advice_state {
            AdviceState::Ready(response) => Some(response),
            _ => None,
        }
    }

    pub fn is_advice_pending(&self) -> bool {
        matches!(self.advice_state, AdviceState::Pending(_))
    }

    pub fn summary_lines(&self) -> Vec<SummaryLine> {
        self.current_advice()
            .map(|response| summarize(&response.message))
            .unwrap_or_default()
    }

    /// Registry ordered for display; only annotated when a location is known.
    pub fn ranked_branches(&self) -> Vec<RankedBranch> {
        rank_branches(
            self.branches,
            self.user_location.as_ref().map(|l| l.coordinate),
        )
    }

    /// Replaces the current location wholesale, e.g. after a typed address was geocoded.
    pub fn set_user_location(&mut self, location: UserLocation) {
        self.user_location = Some(location);
    }

    /// One-shot device fix. On failure the previous location is dropped.
    pub async fn use_device_location(&mut self) -> Result<Coordinate> {
        self.locating = true;
        let result = self.resolver.resolve().await;
        self.locating = false;

        match result {
            Ok(coordinate) => {
                tracing::info!("📍 Device location resolved: {}", coordinate);
                self.user_location = Some(UserLocation {
                    coordinate,
                    address: None,
                });
                Ok(coordinate)
            }
            Err(e) => {
                tracing::warn!("Device location unavailable: {}", e);
                self.user_location = None;
                Err(e)
            }
        }
    }

    fn distance_hint(&self) -> Option<String> {
        let coordinate = self.user_location.as_ref()?.coordinate;
        nearest_branch(self.branches, coordinate)
            .and_then(|nearest| nearest.distance_km)
            .map(format_distance)
    }

    /// Starts a new request. The displayed advice is cleared until it completes.
    pub fn begin_advice(
        &mut self,
        query: &str,
        coordinate: Option<Coordinate>,
        distance_hint: Option<String>,
    ) -> Result<PendingAdvice> {
        if query.trim().is_empty() {
            return Err(LocatorError::EmptyQuery);
        }

        self.last_ticket += 1;
        let ticket = AdviceTicket(self.last_ticket);
        self.advice_state = AdviceState::Pending(ticket);

        Ok(PendingAdvice {
            ticket,
            request: AdviceRequest {
                query: query.to_string(),
                coordinate,
                distance_hint,
            },
        })
    }

    /// Applies a completed request unless a newer one has been started since.
    pub fn finish_advice(
        &mut self,
        ticket: AdviceTicket,
        result: Result<AdviceResponse>,
    ) -> Result<AdviceOutcome> {
        if ticket.0 != self.last_ticket {
            match &result {
                Ok(_) => tracing::debug!("Dropping stale advice response {:?}", ticket),
                Err(e) => tracing::debug!("Dropping stale advice failure {:?}: {}", ticket, e),
            }
            return Ok(AdviceOutcome::Stale);
        }

        match result {
            Ok(response) => {
                self.advice_state = AdviceState::Ready(response);
                Ok(AdviceOutcome::Applied)
            }
            Err(e) => {
                tracing::error!("Advice request failed: {}", e);
                self.advice_state = AdviceState::Failed;
                Err(e)
            }
        }
    }

    async fn run_advice(
        &mut self,
        query: &str,
        coordinate: Option<Coordinate>,
        distance_hint: Option<String>,
    ) -> Result<&AdviceResponse> {
        let pending = self.begin_advice(query, coordinate, distance_hint)?;
        let result = self.advice.request_advice(&pending.request).await;
        self.finish_advice(pending.ticket, result)?;
        self.current_advice()
            .ok_or_else(|| LocatorError::AdviceRequestFailed {
                message: "advice was superseded".to_string(),
            })
    }

    /// Free-text search. Uses the known location, if any, as a hint.
    pub async fn submit_query(&mut self, query: &str) -> Result<&AdviceResponse> {
        let coordinate = self.user_location.as_ref().map(|l| l.coordinate);
        let hint = self.distance_hint();
        self.run_advice(query, coordinate, hint).await
    }

    /// Device fix followed by advice for the fixed point.
    pub async fn locate_and_advise(&mut self) -> Result<&AdviceResponse> {
        let coordinate = self.use_device_location().await?;
        let hint = self.distance_hint();
        self.run_advice(DEVICE_LOCATION_QUERY, Some(coordinate), hint)
            .await
    }
}
