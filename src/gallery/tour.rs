//! Auto-tour timer.
//!
//! At most one timer is armed at a time. Whether one should be armed is a
//! function of `(is_auto_touring, is_loading, current_style)` only; any
//! change of that key cancels the pending timer before a new one is armed.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use super::GalleryEvent;
use crate::catalog::Style;

/// The style a timer should be armed for, or `None` when no timer may run.
pub fn desired_key(is_auto_touring: bool, is_loading: bool, current_style: Style) -> Option<Style> {
    (is_auto_touring && !is_loading).then_some(current_style)
}

struct ArmedTimer {
    key: Style,
    token: u64,
    cancel: CancellationToken,
}

pub struct TourSchedule {
    interval: Duration,
    armed: Option<ArmedTimer>,
    next_token: u64,
}

impl TourSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            armed: None,
            next_token: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Key of the armed timer, if any.
    pub fn armed_for(&self) -> Option<Style> {
        self.armed.as_ref().map(|t| t.key)
    }

    /// Bring the armed timer in line with `desired`.
    pub fn sync(&mut self, desired: Option<Style>, events: &UnboundedSender<GalleryEvent>) {
        if self.armed_for() == desired {
            return;
        }
        self.cancel();
        if let Some(key) = desired {
            self.arm(key, events);
        }
    }

    fn arm(&mut self, key: Style, events: &UnboundedSender<GalleryEvent>) {
        self.next_token += 1;
        let token = self.next_token;
        let cancel = CancellationToken::new();
        let cancelled = cancel.clone();
        let interval = self.interval;
        let tx = events.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(interval) => {
                    let _ = tx.send(GalleryEvent::TourTick { token });
                }
            }
        });

        self.armed = Some(ArmedTimer { key, token, cancel });
    }

    pub fn cancel(&mut self) {
        if let Some(timer) = self.armed.take() {
            timer.cancel.cancel();
        }
    }

    /// Consume the armed timer if `token` belongs to it. A tick from a
    /// timer that was already cancelled or replaced yields `None`.
    pub fn take_fired(&mut self, token: u64) -> Option<Style> {
        match &self.armed {
            Some(timer) if timer.token == token => self.armed.take().map(|t| t.key),
            _ => None,
        }
    }
}

impl Drop for TourSchedule {
    fn drop(&mut self) {
        self.cancel();
    }
}
