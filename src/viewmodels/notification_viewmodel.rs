// ============================================================================
// NOTIFICATION VIEWMODEL
// ============================================================================

use std::rc::Rc;

use crate::models::notification::Notification;
use crate::services::{ApiError, Gateway, NotificationService};

#[derive(Clone)]
pub struct NotificationViewModel {
    service: NotificationService,
}

impl NotificationViewModel {
    pub fn new(gateway: Rc<Gateway>) -> Self {
        Self {
            service: NotificationService::new(gateway),
        }
    }

    pub async fn load(&self, unread_only: bool) -> Result<Vec<Notification>, ApiError> {
        if unread_only {
            self.service.unread().await
        } else {
            self.service.list().await
        }
    }

    /// Contador del badge; `None` si falla (el polling sigue)
    pub async fn unread_count(&self) -> Option<u32> {
        match self.service.unread_count().await {
            Ok(count) => Some(count),
            Err(e) => {
                log::warn!("⚠️ No se pudo actualizar el contador de notificaciones: {}", e);
                None
            }
        }
    }

    pub async fn mark_read(&self, notifications: &mut [Notification], id: u64) -> Result<(), ApiError> {
        self.service.mark_read(id).await?;
        if let Some(n) = notifications.iter_mut().find(|n| n.id == id) {
            n.lue = true;
        }
        Ok(())
    }

    pub async fn mark_all_read(&self, notifications: &mut [Notification]) -> Result<(), ApiError> {
        self.service.mark_all_read().await?;
        notifications.iter_mut().for_each(|n| n.lue = true);
        Ok(())
    }

    pub async fn delete(&self, notifications: &mut Vec<Notification>, id: u64) -> Result<(), ApiError> {
        self.service.delete(id).await?;
        notifications.retain(|n| n.id != id);
        Ok(())
    }

    pub fn unread_in(notifications: &[Notification]) -> usize {
        notifications.iter().filter(|n| !n.lue).count()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::services::gateway::test_support::gateway;
    use crate::services::transport::TransportError;

    fn notification(id: u64, lue: bool) -> Notification {
        Notification {
            id,
            titre: "Nouvelle demande".to_string(),
            message: "Une demande a été créée".to_string(),
            lue,
            kind: None,
            created_at: None,
        }
    }

    #[test]
    fn test_mark_all_read_updates_every_item() {
        let (gateway, transport, _) = gateway();
        transport.respond(200, "");
        let vm = NotificationViewModel::new(gateway);
        let mut list = vec![notification(1, false), notification(2, false), notification(3, true)];

        block_on(vm.mark_all_read(&mut list)).unwrap();

        assert_eq!(NotificationViewModel::unread_in(&list), 0);
    }

    #[test]
    fn test_failed_mark_read_leaves_item_unread() {
        let (gateway, transport, _) = gateway();
        transport.respond(500, r#"{"message":"Erreur serveur"}"#);
        let vm = NotificationViewModel::new(gateway);
        let mut list = vec![notification(1, false)];

        assert!(block_on(vm.mark_read(&mut list, 1)).is_err());
        assert!(!list[0].lue);
    }

    #[test]
    fn test_badge_polling_is_silent_on_network_error() {
        let (gateway, transport, toasts) = gateway();
        transport.fail(TransportError::Network("offline".to_string()));
        transport.respond(200, r#"{"count":3}"#);
        let vm = NotificationViewModel::new(gateway);

        assert_eq!(block_on(vm.unread_count()), None);
        assert_eq!(block_on(vm.unread_count()), Some(3));
        assert!(toasts.is_empty());
    }
}
