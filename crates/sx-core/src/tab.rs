//! Closed tab registry.
//!
//! Every tab is a variant of [`Tab`]; label, visibility and content are
//! exhaustive matches, so an unconfigured tab cannot exist at runtime. Unknown
//! identifiers are only possible at the string boundary and are rejected by
//! [`Tab::from_str`].

use std::fmt;
use std::str::FromStr;

use crate::constants::{CONSTRUCTION, RESEARCH};
use crate::tech::TechnologyState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    News,
    Construction,
    Research,
}

impl Tab {
    /// All tabs, in navigation order.
    pub const ALL: [Tab; 3] = [Tab::News, Tab::Construction, Tab::Research];

    pub fn id(self) -> &'static str {
        match self {
            Tab::News => "news",
            Tab::Construction => "construction",
            Tab::Research => "research",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::News => "News",
            Tab::Construction => "Construction",
            Tab::Research => "Research",
        }
    }

    /// Technology that must be unlocked before the tab shows in navigation.
    pub fn required_tech(self) -> Option<&'static str> {
        match self {
            Tab::News => None,
            Tab::Construction => Some(CONSTRUCTION),
            Tab::Research => Some(RESEARCH),
        }
    }

    pub fn is_visible(self, techs: &TechnologyState) -> bool {
        self.required_tech().is_none_or(|tech| techs.has(tech))
    }

    /// Produce the tab's content for the current technology state.
    pub fn render(self, techs: &TechnologyState) -> TabView {
        match self {
            Tab::News => TabView {
                heading: "Space Express has been founded!",
                paragraphs: vec![
                    "Welcome to Space Express, bright musketeer. You are the founder \
                     and have appointed yourself lead engineer. Your mission is to \
                     develop the technology required to become a multi-planetary \
                     species and colonize Mars.",
                    "To accomplish this goal you will need to build a thriving space \
                     program. But today you start with a small step: build a prototype \
                     rocket to gain research points and raise additional funding.",
                ],
                actions: vec![ActionButton {
                    label: "Start Construction",
                    action: Action::unlock_and_go(CONSTRUCTION, Tab::Construction),
                }],
            },
            Tab::Construction => {
                let research = if techs.has(RESEARCH) {
                    ActionButton {
                        label: "Research Lab",
                        action: Action::Goto(Tab::Research),
                    }
                } else {
                    ActionButton {
                        label: "Start Research",
                        action: Action::unlock_and_go(RESEARCH, Tab::Research),
                    }
                };
                TabView {
                    heading: "Construction yard",
                    paragraphs: vec![
                        "The hangar doors are open. Your first prototype rocket sits on \
                         the pad, waiting for parts and a launch window.",
                        "Every test flight brings back data. Put it to use.",
                    ],
                    actions: vec![research],
                }
            }
            Tab::Research => TabView {
                heading: "Research lab",
                paragraphs: vec![
                    "Telemetry from the prototype streams in. The engineers are \
                     already sketching the next airframe.",
                ],
                actions: vec![ActionButton {
                    label: "Back to News",
                    action: Action::Goto(Tab::News),
                }],
            },
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTab(pub String);

impl fmt::Display for UnknownTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = Tab::ALL.iter().map(|t| t.id()).collect();
        write!(f, "unknown tab '{}' (expected one of: {})", self.0, known.join(", "))
    }
}

impl std::error::Error for UnknownTab {}

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Tab::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

/// A transition a rendered view can request from the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Goto(Tab),
    Unlock(String),
    /// Unlock then switch tabs, committed as one page update.
    UnlockAndGo { tech: String, tab: Tab },
}

impl Action {
    pub fn unlock_and_go(tech: &str, tab: Tab) -> Self {
        Action::UnlockAndGo {
            tech: tech.to_string(),
            tab,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionButton {
    pub label: &'static str,
    pub action: Action,
}

/// Content of one tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabView {
    pub heading: &'static str,
    pub paragraphs: Vec<&'static str>,
    pub actions: Vec<ActionButton>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(names: &[&str]) -> TechnologyState {
        let json = serde_json::to_string(
            &names
                .iter()
                .map(|n| (n.to_string(), true))
                .collect::<std::collections::BTreeMap<_, _>>(),
        )
        .unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_ids_roundtrip_through_from_str() {
        for tab in Tab::ALL {
            assert_eq!(tab.id().parse::<Tab>().unwrap(), tab);
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive_and_trims() {
        assert_eq!(" Construction ".parse::<Tab>().unwrap(), Tab::Construction);
    }

    #[test]
    fn test_unknown_tab_rejected() {
        let err = "shipyard".parse::<Tab>().unwrap_err();
        assert_eq!(err, UnknownTab("shipyard".to_string()));
        assert!(err.to_string().contains("news, construction, research"));
    }

    #[test]
    fn test_default_is_news() {
        assert_eq!(Tab::default(), Tab::News);
    }

    #[test]
    fn test_news_always_visible() {
        assert!(Tab::News.is_visible(&TechnologyState::new()));
    }

    #[test]
    fn test_gated_tabs_follow_technology() {
        let empty = TechnologyState::new();
        assert!(!Tab::Construction.is_visible(&empty));
        assert!(!Tab::Research.is_visible(&empty));

        let built = state_with(&[CONSTRUCTION]);
        assert!(Tab::Construction.is_visible(&built));
        assert!(!Tab::Research.is_visible(&built));
    }

    #[test]
    fn test_news_offers_start_construction() {
        let view = Tab::News.render(&TechnologyState::new());
        assert_eq!(view.actions.len(), 1);
        assert_eq!(view.actions[0].label, "Start Construction");
        assert_eq!(
            view.actions[0].action,
            Action::unlock_and_go(CONSTRUCTION, Tab::Construction)
        );
    }

    #[test]
    fn test_construction_action_depends_on_research() {
        let before = Tab::Construction.render(&state_with(&[CONSTRUCTION]));
        assert_eq!(
            before.actions[0].action,
            Action::unlock_and_go(RESEARCH, Tab::Research)
        );

        let after = Tab::Construction.render(&state_with(&[CONSTRUCTION, RESEARCH]));
        assert_eq!(after.actions[0].action, Action::Goto(Tab::Research));
    }
}
