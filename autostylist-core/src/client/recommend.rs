// File: autostylist-core/src/client/recommend.rs

use async_trait::async_trait;

use autostylist_common::models::{
    Ack, AuthContext, Context, FeedbackEvent, Gender, Occasion, RecommendationResponse,
};
use autostylist_common::traits::RecommendationApi;
use autostylist_common::{ErrorBody, ErrorKind};

use super::{Access, ApiClient, Operation};
use crate::http::{HttpRequest, RequestBody};
use crate::Error;

const RECOMMEND: Operation = Operation {
    name: "recommend",
    fallback: "Failed to get recommendations",
    in_band: ErrorKind::NotFound,
};
const CONTEXT: Operation = Operation {
    name: "context",
    fallback: "Failed to get context",
    in_band: ErrorKind::Validation,
};
const FEEDBACK: Operation = Operation {
    name: "feedback",
    fallback: "Failed to send feedback",
    in_band: ErrorKind::Validation,
};

#[async_trait]
impl RecommendationApi for ApiClient {
    async fn get_recommendations(
        &self,
        ctx: &AuthContext,
        occasion: Occasion,
        gender: Gender,
    ) -> Result<RecommendationResponse, Error> {
        let body = RequestBody::Multipart {
            fields: vec![
                ("occasion".to_string(), occasion.to_string()),
                ("gender".to_string(), gender.to_string()),
            ],
            file: None,
        };
        let request = self.authorize(
            HttpRequest::post(self.url("/recommend")).with_body(body),
            ctx,
            Access::from_flag(self.config.auth_policy.recommend),
            &RECOMMEND,
        )?;
        let resp: RecommendationResponse = self.call(&RECOMMEND, request).await?;
        if resp.recommendations.is_empty() {
            return Err(Error::NotFound(ErrorBody::new("No outfits could be built for this occasion")));
        }
        Ok(resp)
    }

    async fn get_context(&self, ctx: &AuthContext, occasion: Occasion) -> Result<Context, Error> {
        let body = RequestBody::Multipart {
            fields: vec![("occasion".to_string(), occasion.to_string())],
            file: None,
        };
        let request = self.authorize(
            HttpRequest::post(self.url("/context")).with_body(body),
            ctx,
            Access::from_flag(self.config.auth_policy.recommend),
            &CONTEXT,
        )?;
        self.call(&CONTEXT, request).await
    }

    async fn send_feedback(&self, ctx: &AuthContext, feedback: &FeedbackEvent) -> Result<Ack, Error> {
        let request = self.authorize(
            HttpRequest::post(self.url("/feedback")),
            ctx,
            Access::Required,
            &FEEDBACK,
        )?;
        if !feedback.is_disjoint() {
            return Err(Error::validation("An item cannot be both liked and disliked"));
        }
        let request = request.with_body(RequestBody::Json(serde_json::to_value(feedback)?));
        self.call(&FEEDBACK, request).await
    }
}
