// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Navigable views and path routing.

use serde::Serialize;
use std::fmt;
use tracing::warn;

/// A page of the site.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Landing,
    Home,
    Today,
    YourMoon,
    Phases,
    Events,
    NotFound,
}

/// A navigation bar entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub view: View,
}

/// Navigation bar entries, in display order.
pub const NAVIGATION: [NavItem; 5] = [
    NavItem {
        label: "Home",
        path: "/",
        view: View::Landing,
    },
    NavItem {
        label: "Today",
        path: "/today",
        view: View::Today,
    },
    NavItem {
        label: "Your Moon",
        path: "/your-moon",
        view: View::YourMoon,
    },
    NavItem {
        label: "Phases",
        path: "/phases",
        view: View::Phases,
    },
    NavItem {
        label: "Events",
        path: "/events",
        view: View::Events,
    },
];

impl View {
    /// Every routable view.
    pub const ROUTABLE: [Self; 6] = [
        Self::Landing,
        Self::Home,
        Self::Today,
        Self::YourMoon,
        Self::Phases,
        Self::Events,
    ];

    /// Resolve a request path. Matching is exact apart from one trailing
    /// slash; anything else is [`View::NotFound`].
    pub fn route(path: &str) -> Self {
        let normalized = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(stripped) => stripped,
        };
        match Self::ROUTABLE.into_iter().find(|v| v.path() == normalized) {
            Some(view) => view,
            None => {
                warn!(path, "attempted to access a non-existent route");
                Self::NotFound
            }
        }
    }

    /// Canonical path. [`View::NotFound`] has none and reports `"/404"`.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Home => "/home",
            Self::Today => "/today",
            Self::YourMoon => "/your-moon",
            Self::Phases => "/phases",
            Self::Events => "/events",
            Self::NotFound => "/404",
        }
    }

    /// Page title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Landing => "What's Your Moon",
            Self::Home => "Moon Phase Explorer",
            Self::Today => "Today's Moon",
            Self::YourMoon => "Discover Your Birth Moon",
            Self::Phases => "Moon Phases",
            Self::Events => "Upcoming Space Events",
            Self::NotFound => "Oops! Page not found",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths() {
        assert_eq!(View::route("/"), View::Landing);
        assert_eq!(View::route("/home"), View::Home);
        assert_eq!(View::route("/today"), View::Today);
        assert_eq!(View::route("/your-moon"), View::YourMoon);
        assert_eq!(View::route("/phases"), View::Phases);
        assert_eq!(View::route("/events"), View::Events);
    }

    #[test]
    fn test_trailing_slash() {
        assert_eq!(View::route("/today/"), View::Today);
        assert_eq!(View::route("/today//"), View::NotFound);
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(View::route("/nope"), View::NotFound);
        assert_eq!(View::route("/Today"), View::NotFound);
        assert_eq!(View::route("/today/extra"), View::NotFound);
        assert_eq!(View::route(""), View::NotFound);
    }

    #[test]
    fn test_path_round_trips_for_routable_views() {
        for view in View::ROUTABLE {
            assert_eq!(View::route(view.path()), view);
        }
    }

    #[test]
    fn test_navigation() {
        let labels: Vec<_> = NAVIGATION.iter().map(|n| n.label).collect();
        assert_eq!(labels, ["Home", "Today", "Your Moon", "Phases", "Events"]);
        for item in NAVIGATION {
            assert_eq!(View::route(item.path), item.view);
        }
    }
}
