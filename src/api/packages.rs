use serde_json::Value;

use super::client::HttpBackend;
use super::error::ApiError;
use super::models::*;
use crate::auth::PosType;

impl HttpBackend {
    /// Packages on offer for one shop category.
    pub async fn get_packages(&self, pos_type: PosType) -> Result<Vec<Package>, ApiError> {
        let response: PackagesResponse = self
            .get_with_query("/packages", &[("pos_type", pos_type.as_str())])
            .await?;
        Ok(response.packages)
    }

    pub async fn subscribe(&self, package_id: &Value) -> Result<Option<Subscription>, ApiError> {
        let response: SubscriptionResponse = self
            .post("/subscribe", &SubscribeRequest { package_id })
            .await?;
        Ok(response.subscription)
    }

    pub async fn get_current_subscription(&self) -> Result<Option<Subscription>, ApiError> {
        let response: SubscriptionResponse = self.get("/subscription/current").await?;
        Ok(response.subscription)
    }

    /// Feature catalogue; the shape belongs to the backend.
    pub async fn get_features(&self) -> Result<Value, ApiError> {
        self.get("/features").await
    }
}
