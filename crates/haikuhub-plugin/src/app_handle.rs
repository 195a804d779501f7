//! Shared application handle passed to plugin `init`.
//!
//! Plugins contribute self-contained Axum router fragments here; the host
//! folds them into the final router only after every plugin initialized.
//! Keeping accumulation separate from serving is what lets collected
//! middleware wrap plugin routes as well as host routes.

use axum::Router;

/// Accumulates route fragments contributed by plugins during `init`.
#[derive(Debug)]
pub struct AppHandle {
    routers: Vec<Router>,
}

impl AppHandle {
    /// Creates an empty handle.
    pub fn new() -> Self {
        Self {
            routers: Vec::new(),
        }
    }

    /// Adds a route fragment. The fragment must already carry its own state
    /// (`Router<()>`); paths are absolute (e.g. `/api/analytics`).
    pub fn merge_routes(&mut self, routes: Router) {
        self.routers.push(routes);
    }

    /// Number of contributed route fragments.
    pub fn route_sets(&self) -> usize {
        self.routers.len()
    }

    /// Folds all contributed fragments into a single router.
    pub fn into_router(self) -> Router {
        self.routers.into_iter().fold(Router::new(), Router::merge)
    }
}

impl Default for AppHandle {
    fn default() -> Self {
        Self::new()
    }
}
