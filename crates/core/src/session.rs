use chrono::{Local, NaiveDate};

use crate::id::SessionId;

/// Context for one client session.
///
/// Passed explicitly to the pantry and the recipe orchestrator instead of living
/// in process-wide state. Authentication itself is out of scope; the context
/// only carries what the core needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session_id: SessionId,
    display_name: Option<String>,
    today: Option<NaiveDate>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            session_id: SessionId::new(),
            display_name: None,
            today: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Pin "today" (tests, replays). Without it the local calendar date is used.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
