use std::time::{Duration, Instant};

use serde_json::{json, Value as JsonValue};


/// How long a notification is fully shown, and how long it fades afterwards.
pub const DISPLAY_DURATION: Duration = Duration::from_secs(3);
pub const FADE_DURATION: Duration = Duration::from_millis(500);


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
}

impl NotifyKind {
    fn as_str(&self) -> &'static str {
        match self {
            NotifyKind::Success => "success",
            NotifyKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyPhase {
    Show,
    Fade,
    Expired,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotifyKind,
    created: Instant,
}

impl Notification {
    fn phase_at(&self, now: Instant) -> NotifyPhase {
        let age = now.saturating_duration_since(self.created);

        if age < DISPLAY_DURATION {
            NotifyPhase::Show
        } else if age < DISPLAY_DURATION + FADE_DURATION {
            NotifyPhase::Fade
        } else {
            NotifyPhase::Expired
        }
    }
}


/// Queue of ephemeral status messages. Dismissal is purely time-based:
/// expired entries are pruned whenever the queue is read.
pub struct Notifier {
    items: Vec<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Notifier { items: Vec::new() }
    }

    pub fn success<S: Into<String>>(&mut self, message: S) {
        self.push(message.into(), NotifyKind::Success);
    }

    pub fn error<S: Into<String>>(&mut self, message: S) {
        self.push(message.into(), NotifyKind::Error);
    }

    fn push(&mut self, message: String, kind: NotifyKind) {
        info!("Notify ({}): {}", kind.as_str(), message);
        self.items.push(Notification {
            message,
            kind,
            created: Instant::now(),
        });
    }

    pub fn active(&mut self) -> Vec<(Notification, NotifyPhase)> {
        self.active_at(Instant::now())
    }

    fn active_at(&mut self, now: Instant) -> Vec<(Notification, NotifyPhase)> {
        self.items
            .retain(|item| item.phase_at(now) != NotifyPhase::Expired);

        self.items
            .iter()
            .map(|item| (item.clone(), item.phase_at(now)))
            .collect()
    }

    pub fn to_json(&mut self) -> JsonValue {
        let items = self.active()
            .into_iter()
            .map(|(item, phase)| {
                json!({
                    "message": item.message,
                    "kind": item.kind.as_str(),
                    "fading": phase == NotifyPhase::Fade,
                })
            })
            .collect::<Vec<_>>();

        json!({
            "notifications": items,
            "size": items.len(),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_notifications_are_shown() {
        let mut notifier = Notifier::new();
        notifier.success("Disaster report submitted successfully!");

        let active = notifier.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].0.kind, NotifyKind::Success);
        assert_eq!(active[0].1, NotifyPhase::Show);
    }

    #[test]
    fn notifications_fade_then_expire() {
        let mut notifier = Notifier::new();
        notifier.error("Please fill out all required fields.");
        let created = notifier.items[0].created;

        let fading = created + DISPLAY_DURATION + Duration::from_millis(100);
        let active = notifier.active_at(fading);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].1, NotifyPhase::Fade);

        let gone = created + DISPLAY_DURATION + FADE_DURATION + Duration::from_millis(1);
        assert!(notifier.active_at(gone).is_empty());
        // Pruned for good, not merely hidden.
        assert!(notifier.items.is_empty());
    }

    #[test]
    fn queue_keeps_independent_messages() {
        let mut notifier = Notifier::new();
        notifier.success("one");
        notifier.error("two");

        let active = notifier.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].0.message, "one");
        assert_eq!(active[1].0.kind, NotifyKind::Error);
    }
}
