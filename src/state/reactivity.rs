// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Identificador para cancelar una suscripción (al desmontar un componente)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Estado reactivo con sistema de notificaciones
pub struct ReactiveState<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(SubscriptionId, Callback)>>,
    next_id: Cell<u64>,
}

impl<T: Clone> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Copia del valor actual
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Leer sin clonar
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut self.value.borrow_mut());
        self.notify();
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Un callback puede desuscribirse (desmontar su componente) mientras se notifica,
    /// por eso se itera sobre una copia de la lista
    fn notify(&self) {
        let callbacks: Vec<Callback> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_notifies_every_subscriber() {
        let state = ReactiveState::new(0);
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        state.subscribe(move || h.set(h.get() + 1));
        let h = hits.clone();
        state.subscribe(move || h.set(h.get() + 10));

        state.set(5);
        assert_eq!(state.get(), 5);
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn test_unsubscribe_during_notify_does_not_panic() {
        let state = Rc::new(ReactiveState::new(String::new()));
        let id_cell: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&state);
        let id_for_cb = id_cell.clone();
        let id = state.subscribe(move || {
            if let (Some(state), Some(id)) = (weak.upgrade(), id_for_cb.get()) {
                state.unsubscribe(id);
            }
        });
        id_cell.set(Some(id));

        state.update(|s| s.push('x'));
        assert_eq!(state.subscriber_count(), 0);
        assert_eq!(state.with(|s| s.len()), 1);
    }
}
