//! Short-lived notification feed shown beside the play field.

use std::collections::VecDeque;

use crate::types::GameEvent;

/// Toasts kept at once; older ones are pushed out.
pub const MAX_TOASTS: usize = 4;

/// Default time a toast stays visible.
pub const DEFAULT_TOAST_TTL_MS: u32 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => None,
            GameEvent::Hit { .. } | GameEvent::LevelUp { .. } => Some(ToastKind::Success),
            GameEvent::Missed { .. } | GameEvent::WrongKey { .. } => Some(ToastKind::Error),
            GameEvent::GameOver { .. } => Some(ToastKind::Info),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    expires_at_ms: u64,
}

impl Toast {
    pub fn expires_at_ms(&self) -> u64 {
        self.expires_at_ms
    }
}

/// Bounded, newest-last feed of toasts with a fixed time-to-live.
#[derive(Debug, Clone)]
pub struct Toasts {
    ttl_ms: u32,
    items: VecDeque<Toast>,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL_MS)
    }
}

impl Toasts {
    pub fn new(ttl_ms: u32) -> Self {
        Self {
            ttl_ms,
            items: VecDeque::with_capacity(MAX_TOASTS),
        }
    }

    pub fn ttl_ms(&self) -> u32 {
        self.ttl_ms
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now_ms: u64) {
        if self.items.len() == MAX_TOASTS {
            self.items.pop_front();
        }
        self.items.push_back(Toast {
            kind,
            message: message.into(),
            expires_at_ms: now_ms + self.ttl_ms as u64,
        });
    }

    /// Queue the message for `event`. Returns `false` for silent events.
    pub fn push_event(&mut self, event: &GameEvent, now_ms: u64) -> bool {
        match ToastKind::for_event(event) {
            Some(kind) => {
                self.push(kind, event.to_string(), now_ms);
                true
            }
            None => false,
        }
    }

    /// Drop every toast whose time is up. Returns whether anything changed.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.expires_at_ms > now_ms);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }
}
