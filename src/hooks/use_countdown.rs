// ============================================================================
// USE COUNTDOWN - Cuenta atrás por segundos con gloo Interval
// ============================================================================

use std::rc::Rc;

use gloo_timers::callback::Interval;
use yew::prelude::*;

use crate::utils::Countdown;

enum CountdownAction {
    Tick,
    Restart,
}

#[derive(Clone, Copy, PartialEq)]
struct CountdownState(Countdown);

impl Reducible for CountdownState {
    type Action = CountdownAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut countdown = self.0;
        match action {
            CountdownAction::Tick => {
                if countdown.tick() {
                    log::info!("⏰ Código de verificación expirado");
                }
            }
            CountdownAction::Restart => countdown.restart(),
        }
        Rc::new(Self(countdown))
    }
}

pub struct UseCountdownHandle {
    pub display: String,
    pub expired: bool,
    pub restart: Callback<()>,
}

/// El intervalo se detiene al expirar y se vuelve a crear con `restart`
#[hook]
pub fn use_countdown(total_seconds: u32) -> UseCountdownHandle {
    let state = use_reducer(|| CountdownState(Countdown::new(total_seconds)));
    let expired = state.0.is_expired();

    {
        let dispatcher = state.dispatcher();
        use_effect_with(expired, move |expired| {
            let interval = (!*expired).then(|| Interval::new(1_000, move || dispatcher.dispatch(CountdownAction::Tick)));
            move || drop(interval)
        });
    }

    let restart = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(CountdownAction::Restart))
    };

    UseCountdownHandle {
        display: state.0.display(),
        expired,
        restart,
    }
}
