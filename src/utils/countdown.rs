// ============================================================================
// COUNTDOWN - Cuenta atrás del código de reseteo (lógica pura, sin timers)
// ============================================================================
// El hook use_countdown llama a tick() una vez por segundo con gloo Interval
// ============================================================================

use crate::utils::constants::RESET_CODE_TTL_SECONDS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    total: u32,
    remaining: u32,
}

impl Countdown {
    pub fn new(total_seconds: u32) -> Self {
        Self {
            total: total_seconds,
            remaining: total_seconds,
        }
    }

    /// Cuenta atrás de 15 minutos del código de verificación
    pub fn reset_code() -> Self {
        Self::new(RESET_CODE_TTL_SECONDS)
    }

    /// Avanza un segundo; devuelve true si acaba de llegar a cero
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// El reenvío del código sólo se habilita cuando expira
    pub fn can_resend(&self) -> bool {
        self.is_expired()
    }

    pub fn restart(&mut self) {
        self.remaining = self.total;
    }

    /// Formato `mm:ss`
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaches_zero_after_exactly_900_ticks() {
        let mut countdown = Countdown::reset_code();
        assert_eq!(countdown.display(), "15:00");

        for _ in 0..899 {
            assert!(!countdown.tick());
        }
        assert_eq!(countdown.remaining(), 1);
        assert!(!countdown.can_resend());

        assert!(countdown.tick());
        assert!(countdown.is_expired());
        assert!(countdown.can_resend());
        assert_eq!(countdown.display(), "00:00");
    }

    #[test]
    fn test_tick_after_expiry_stays_at_zero() {
        let mut countdown = Countdown::new(1);
        assert!(countdown.tick());
        assert!(!countdown.tick());
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn test_restart_after_resend() {
        let mut countdown = Countdown::new(3);
        while !countdown.tick() {}
        countdown.restart();
        assert_eq!(countdown.remaining(), 3);
        assert!(!countdown.can_resend());
    }

    #[test]
    fn test_display_format() {
        let mut countdown = Countdown::new(61);
        assert_eq!(countdown.display(), "01:01");
        countdown.tick();
        assert_eq!(countdown.display(), "01:00");
    }
}
