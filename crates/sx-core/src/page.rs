use crate::constants::{CONSTRUCTION, TITLE};
use crate::persist::KvStore;
use crate::router::TabRouter;
use crate::tab::{Action, Tab, TabView};
use crate::tech::TechRegistry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavButton {
    pub tab: Tab,
    pub label: &'static str,
    pub active: bool,
}

/// Everything a front-end needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub title: &'static str,
    pub nav: Vec<NavButton>,
    pub active: Tab,
    pub content: TabView,
}

impl Screen {
    pub fn shows_tab(&self, tab: Tab) -> bool {
        self.nav.iter().any(|b| b.tab == tab)
    }
}

/// Wires the technology registry and tab router into a single screen.
///
/// The page holds both but changes them only through their own operations.
/// Every mutating method takes `&mut self`, so a composed action is fully
/// applied before anyone can render again.
pub struct Page<S: KvStore> {
    techs: TechRegistry<S>,
    router: TabRouter,
}

impl<S: KvStore> Page<S> {
    pub fn new(techs: TechRegistry<S>) -> Self {
        Self {
            techs,
            router: TabRouter::new(),
        }
    }

    /// Load technology state from `store` and start on the default tab.
    pub fn open(store: S) -> Self {
        Self::new(TechRegistry::new(store))
    }

    pub fn techs(&self) -> &TechRegistry<S> {
        &self.techs
    }

    pub fn router(&self) -> &TabRouter {
        &self.router
    }

    pub fn active_tab(&self) -> Tab {
        self.router.active()
    }

    pub fn nav_buttons(&self) -> Vec<NavButton> {
        let state = self.techs.state();
        let active = self.router.active();
        Tab::ALL
            .into_iter()
            .filter(|tab| tab.is_visible(state))
            .map(|tab| NavButton {
                tab,
                label: tab.label(),
                active: tab == active,
            })
            .collect()
    }

    pub fn render(&self) -> Screen {
        let active = self.router.active();
        Screen {
            title: TITLE,
            nav: self.nav_buttons(),
            active,
            content: active.render(self.techs.state()),
        }
    }

    pub fn navigate(&mut self, tab: Tab) {
        self.router.set_tab(tab);
    }

    pub fn unlock(&mut self, tech: &str) {
        self.perform(&Action::Unlock(tech.to_string()));
    }

    pub fn perform(&mut self, action: &Action) {
        match action {
            Action::Goto(tab) => self.router.set_tab(*tab),
            Action::Unlock(tech) => self.techs.unlock(tech),
            Action::UnlockAndGo { tech, tab } => {
                self.techs.unlock(tech);
                self.router.set_tab(*tab);
            }
        }
    }

    /// Trigger the `index`-th action button of the active tab.
    /// Returns false when the tab has no such button.
    pub fn press(&mut self, index: usize) -> bool {
        let content = self.router.active().render(self.techs.state());
        match content.actions.into_iter().nth(index) {
            Some(button) => {
                tracing::debug!("pressed '{}'", button.label);
                self.perform(&button.action);
                true
            }
            None => false,
        }
    }

    /// The intro dialog's "Start Construction" button.
    pub fn start_construction(&mut self) {
        self.perform(&Action::unlock_and_go(CONSTRUCTION, Tab::Construction));
    }
}
