use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
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
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Keeps the last requested route; adapters that answer with a redirect read
/// it back once the controller is done.
#[derive(Debug, Default)]
pub struct RouteRecorder {
    routes: Mutex<Vec<Route>>,
}

impl RouteRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes.lock().ok().and_then(|routes| routes.last().copied())
    }

    pub fn history(&self) -> Vec<Route> {
        self.routes.lock().map(|routes| routes.clone()).unwrap_or_default()
    }
}

impl Navigator for RouteRecorder {
    fn navigate(&self, route: Route) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route);
        }
    }
}

/// Liveness flag of the page a controller is bound to. Responses that arrive
/// after `leave()` must not be applied.
#[derive(Clone, Debug)]
pub struct PageGuard {
    active: Arc<AtomicBool>,
}

impl PageGuard {
    pub fn new() -> Self {
        PageGuard {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn leave(&self) {
        self.active.store(false, Ordering::Release);
    }
}

impl Default for PageGuard {
    fn default() -> Self {
        Self::new()
    }
}
