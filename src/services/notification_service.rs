// ============================================================================
// NOTIFICATION SERVICE - /notifications (SOLO comunicación HTTP)
// ============================================================================

use std::rc::Rc;

use crate::models::api::Envelope;
use crate::models::notification::{Notification, NotificationCount};
use crate::services::error::ApiError;
use crate::services::gateway::{Gateway, RequestOptions};
use crate::services::transport::{HttpMethod, RequestBody};

#[derive(Clone)]
pub struct NotificationService {
    gateway: Rc<Gateway>,
}

impl NotificationService {
    pub fn new(gateway: Rc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Notification>, ApiError> {
        let list: Envelope<Vec<Notification>> = self.gateway.get("/notifications").await?;
        Ok(list.into_inner())
    }

    pub async fn unread(&self) -> Result<Vec<Notification>, ApiError> {
        let list: Envelope<Vec<Notification>> = self.gateway.get("/notifications/non-lues").await?;
        Ok(list.into_inner())
    }

    /// Polling del badge: silencioso para no llenar de toasts si la red cae
    pub async fn unread_count(&self) -> Result<u32, ApiError> {
        let count: NotificationCount = self
            .gateway
            .request(HttpMethod::Get, "/notifications/count", RequestBody::Empty, RequestOptions::silent())
            .await?;
        Ok(count.count)
    }

    pub async fn mark_read(&self, id: u64) -> Result<(), ApiError> {
        self.gateway
            .send(HttpMethod::Patch, &format!("/notifications/{}/lue", id), RequestOptions::default())
            .await
    }

    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        self.gateway
            .send(HttpMethod::Patch, "/notifications/marquer-toutes-lues", RequestOptions::default())
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.gateway
            .send(HttpMethod::Delete, &format!("/notifications/{}", id), RequestOptions::default())
            .await
    }
}
