//! Screen routes and the navigator contract

use std::fmt;
use std::sync::Mutex;
use tracing::info;

/// Screens reachable through the URL fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Bills,
    NewBill,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        match path {
            "" | "/" => Some(Route::Login),
            "#employee/bills" => Some(Route::Bills),
            "#employee/bill/new" => Some(Route::NewBill),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Replaces the visible screen
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records every visited route
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        self.history().last().copied()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        info!("Navigating to {}", route);
        self.history
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths_round_trip() {
        for route in [Route::Login, Route::Bills, Route::NewBill] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("#admin/dashboard"), None);
    }

    #[test]
    fn test_history_navigator() {
        let navigator = HistoryNavigator::new();
        assert_eq!(navigator.current(), None);
        navigator.navigate(Route::NewBill);
        navigator.navigate(Route::Bills);
        assert_eq!(navigator.current(), Some(Route::Bills));
        assert_eq!(navigator.history(), vec![Route::NewBill, Route::Bills]);
    }
}
