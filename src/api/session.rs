//! API session bookkeeping: every request carries `Anvil-Sess`; sessions
//! are created when the editor spawns a child process and tracked in a
//! bounded map.

use std::collections::HashMap;

use crate::constants::api::SESSION_MAP_CAPACITY;
use crate::constants::errors::SESSION_UNAUTHORIZED;
use crate::error::{AnvilError, Result};

use super::NotificationQueue;

pub type SessionId = String;

#[derive(Debug, Default)]
pub struct Session {
    pub notifications: NotificationQueue,
    pub registered_commands: Vec<String>,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, Session>,
    insertion_order: Vec<SessionId>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session, evicting the oldest if the bound is already
    /// full — a spawned child always gets a session rather than being
    /// refused outright.
    pub fn create(&mut self, id: SessionId) {
        if self.sessions.len() >= SESSION_MAP_CAPACITY {
            if let Some(oldest) = self.insertion_order.first().cloned() {
                self.sessions.remove(&oldest);
                self.insertion_order.remove(0);
            }
        }
        self.sessions.insert(id.clone(), Session::default());
        self.insertion_order.push(id);
    }

    pub fn authenticate(&self, id: &str) -> Result<()> {
        if self.sessions.contains_key(id) {
            Ok(())
        } else {
            Err(AnvilError::user(SESSION_UNAUTHORIZED, "unknown or expired session"))
        }
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn broadcast(&mut self, notification: super::Notification) {
        for session in self.sessions.values_mut() {
            session.notifications.push(notification.clone());
        }
    }
}
