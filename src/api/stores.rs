use serde_json::Value;

use super::client::HttpBackend;
use super::error::ApiError;
use super::models::*;

fn store_path(store_id: &str) -> String {
    format!("/stores/{}", urlencoding::encode(store_id))
}

impl HttpBackend {
    pub async fn get_stores(&self) -> Result<Vec<Store>, ApiError> {
        let response: StoresResponse = self.get("/stores").await?;
        Ok(response.stores)
    }

    pub async fn create_store(&self, input: &StoreInput) -> Result<Store, ApiError> {
        let response: StoreResponse = self.post("/stores", input).await?;
        Ok(response.store)
    }

    pub async fn get_store(&self, store_id: &str) -> Result<Store, ApiError> {
        let response: StoreResponse = self.get(&store_path(store_id)).await?;
        Ok(response.store)
    }

    pub async fn update_store(&self, store_id: &str, input: &StoreInput) -> Result<Store, ApiError> {
        let response: StoreResponse = self.put(&store_path(store_id), input).await?;
        Ok(response.store)
    }

    pub async fn delete_store(&self, store_id: &str) -> Result<Value, ApiError> {
        self.delete(&store_path(store_id)).await
    }

    pub async fn open_store(&self, store_id: &str) -> Result<Value, ApiError> {
        log::info!("Opening store {}", store_id);
        self.post_empty(&format!("{}/open", store_path(store_id))).await
    }

    pub async fn close_store(&self, store_id: &str) -> Result<Value, ApiError> {
        log::info!("Closing store {}", store_id);
        self.post_empty(&format!("{}/close", store_path(store_id))).await
    }

    /// Close an open store, open a closed one.
    pub async fn toggle_store(&self, store_id: &str, is_open: bool) -> Result<Value, ApiError> {
        if is_open {
            self.close_store(store_id).await
        } else {
            self.open_store(store_id).await
        }
    }

    /// Per-store dashboard figures; the shape belongs to the backend.
    pub async fn get_store_dashboard(&self, store_id: &str) -> Result<Value, ApiError> {
        self.get(&format!("{}/dashboard", store_path(store_id))).await
    }

    /// Stores and the current subscription, requested concurrently.
    pub async fn load_dashboard(&self) -> Result<DashboardData, ApiError> {
        let (stores, subscription) =
            futures::try_join!(self.get_stores(), self.get_current_subscription())?;
        Ok(DashboardData {
            stores,
            subscription,
        })
    }
}
