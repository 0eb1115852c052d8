use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use autostylist_common::models::{
    Ack, Context, FeedbackAction, FeedbackEvent, Gender, Occasion, OutfitRank,
    RecommendationResponse,
};
use autostylist_common::traits::RecommendationApi;

use crate::session::Session;
use crate::Error;

pub const NOT_FOUND_HINT: &str = "Make sure you have uploaded items for this occasion.";

#[derive(Debug, Default)]
struct State {
    last: Option<RecommendationResponse>,
    selected: OutfitRank,
}

/// Fetches outfits, tracks the selected tab and sends feedback for it.
pub struct RecommendationService {
    api: Arc<dyn RecommendationApi>,
    session: Arc<Session>,
    state: Mutex<State>,
}

impl RecommendationService {
    pub fn new(api: Arc<dyn RecommendationApi>, session: Arc<Session>) -> Self {
        Self {
            api,
            session,
            state: Mutex::new(State::default()),
        }
    }

    /// Replaces the current result. A failure leaves no result behind.
    pub async fn recommend(
        &self,
        occasion: Occasion,
        gender: Gender,
    ) -> Result<RecommendationResponse, Error> {
        let res = self.api.get_recommendations(self.session.context(), occasion, gender).await;
        let res = self.session.check(res).await;

        let mut state = self.state.lock().await;
        match res {
            Ok(resp) => {
                state.selected = resp
                    .recommendations
                    .iter()
                    .map(|(rank, _)| rank)
                    .next()
                    .unwrap_or_default();
                state.last = Some(resp.clone());
                info!("Got {} outfit(s) for {occasion}", resp.recommendations.iter().count());
                Ok(resp)
            }
            Err(e) => {
                state.last = None;
                state.selected = OutfitRank::Best;
                Err(e)
            }
        }
    }

    pub async fn context(&self, occasion: Occasion) -> Result<Context, Error> {
        let res = self.api.get_context(self.session.context(), occasion).await;
        self.session.check(res).await
    }

    pub async fn select(&self, rank: OutfitRank) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        let populated = state
            .last
            .as_ref()
            .is_some_and(|r| r.recommendations.get(rank).is_some());
        if !populated {
            return Err(Error::validation(format!("No {} outfit to show", rank.label())));
        }
        state.selected = rank;
        Ok(())
    }

    pub async fn selected(&self) -> OutfitRank {
        self.state.lock().await.selected
    }

    pub async fn last(&self) -> Option<RecommendationResponse> {
        self.state.lock().await.last.clone()
    }

    /// Rates the selected outfit. Selection and result survive a failure.
    pub async fn send_feedback(&self, action: FeedbackAction) -> Result<Ack, Error> {
        let event = {
            let state = self.state.lock().await;
            let last = state
                .last
                .as_ref()
                .ok_or_else(|| Error::validation("Get recommendations first"))?;
            FeedbackEvent::from_choice(&last.recommendations, state.selected, action)?
        };

        let res = self.api.send_feedback(self.session.context(), &event).await;
        match self.session.check(res).await {
            Ok(ack) => Ok(ack),
            Err(e) => {
                warn!("Feedback ({action}) not recorded: {e}");
                Err(e)
            }
        }
    }

    /// Extra guidance to show next to `err`, if any.
    pub fn hint(err: &Error) -> Option<&'static str> {
        matches!(err, Error::NotFound(_)).then_some(NOT_FOUND_HINT)
    }
}
