// ============================================================================
// TOAST STATE - Notificaciones transitorias para el usuario
// ============================================================================

use std::cell::Cell;

use crate::state::reactivity::{ReactiveState, SubscriptionId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Info => "toast toast-info",
            ToastLevel::Warning => "toast toast-warning",
            ToastLevel::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// Destino de los mensajes globales del Gateway
pub trait Notifier {
    fn notify(&self, level: ToastLevel, message: &str);
}

/// Cola de toasts visible; el componente ToastList la renderiza y expira cada toast
pub struct ToastStore {
    toasts: ReactiveState<Vec<Toast>>,
    next_id: Cell<u64>,
}

impl ToastStore {
    pub fn new() -> Self {
        Self {
            toasts: ReactiveState::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Añade un toast y devuelve su id (para programar su expiración)
    pub fn push(&self, level: ToastLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let toast = Toast {
            id,
            level,
            message: message.into(),
        };
        self.toasts.update(|toasts| toasts.push(toast));
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Success, message)
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.get()
    }

    pub fn messages(&self) -> Vec<String> {
        self.toasts.with(|toasts| toasts.iter().map(|t| t.message.clone()).collect())
    }

    pub fn len(&self) -> usize {
        self.toasts.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) -> SubscriptionId {
        self.toasts.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.toasts.unsubscribe(id);
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastStore {
    fn notify(&self, level: ToastLevel, message: &str) {
        self.push(level, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let store = ToastStore::new();
        let first = store.push(ToastLevel::Error, "Erreur");
        let second = store.success("Machine créée");
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);

        store.dismiss(first);
        assert_eq!(store.messages(), vec!["Machine créée".to_string()]);
    }
}
