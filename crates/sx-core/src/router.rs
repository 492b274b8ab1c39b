use crate::tab::Tab;

/// Owner of the active tab. Session-scoped: never persisted, starts at
/// [`Tab::News`].
#[derive(Debug, Default)]
pub struct TabRouter {
    active: Tab,
}

impl TabRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.active != tab {
            tracing::debug!("tab {} -> {}", self.active, tab);
        }
        self.active = tab;
    }
}
