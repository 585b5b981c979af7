//! Transient top-level banner.
//!
//! Each banner gets a fresh generation. A hide timer only hides the banner it
//! was scheduled for, so an older timer firing late never removes a newer
//! message.

use std::time::Duration;

use serde::Serialize;

use super::commands::Effect;
use crate::constants::DEFAULT_BANNER_MILLIS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Banner>,
    generation: u64,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_BANNER_MILLIS))
    }
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: None,
            generation: 0,
            ttl,
        }
    }

    pub fn show_error(&mut self, message: impl Into<String>) -> Effect {
        self.show(BannerKind::Error, message.into())
    }

    pub fn show_success(&mut self, message: impl Into<String>) -> Effect {
        self.show(BannerKind::Success, message.into())
    }

    fn show(&mut self, kind: BannerKind, message: String) -> Effect {
        self.generation += 1;
        log::debug!("Banner #{} ({:?}): {}", self.generation, kind, message);
        self.current = Some(Banner {
            kind,
            message,
            generation: self.generation,
        });
        Effect::HideBanner {
            generation: self.generation,
            after: self.ttl,
        }
    }

    /// Hides the banner if it is still the one `generation` refers to.
    /// Returns whether anything was hidden.
    pub fn expire(&mut self, generation: u64) -> bool {
        match &self.current {
            Some(banner) if banner.generation == generation => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Banner> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_replaces_current_banner_and_schedules_hide() {
        let mut notifier = Notifier::new(Duration::from_secs(3));
        notifier.show_error("boom");
        let effect = notifier.show_success("saved");

        let banner = notifier.current().unwrap();
        assert_eq!(banner.kind, BannerKind::Success);
        assert_eq!(banner.message, "saved");
        assert_eq!(
            effect,
            Effect::HideBanner {
                generation: 2,
                after: Duration::from_secs(3)
            }
        );
    }

    #[test]
    fn older_timer_does_not_hide_newer_banner() {
        let mut notifier = Notifier::default();
        notifier.show_error("first");
        notifier.show_success("second");

        assert!(!notifier.expire(1));
        assert_eq!(notifier.current().unwrap().message, "second");

        assert!(notifier.expire(2));
        assert!(notifier.current().is_none());
    }

    #[test]
    fn timer_after_dismiss_is_a_no_op() {
        let mut notifier = Notifier::default();
        notifier.show_error("gone");
        notifier.dismiss();
        assert!(!notifier.expire(1));
    }
}
