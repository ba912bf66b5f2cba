//! Navigator: the route stack.

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::route::{Route, RouteName};
use crate::error::NavigationError;

/// One entry of the stack. The id identifies this visit of the screen, so
/// two frames for the same route stay distinguishable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub id: Uuid,
    #[serde(flatten)]
    pub route: Route,
}

impl Frame {
    fn new(route: Route) -> Self {
        Self {
            id: Uuid::new_v4(),
            route,
        }
    }

    pub fn name(&self) -> RouteName {
        self.route.name()
    }
}

/// Stack of frames. Never empty: the active frame is held apart from the
/// history beneath it, and the bottom frame is the entry route.
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<Frame>,
    current: Frame,
}

impl Navigator {
    pub fn new(entry: Route) -> Self {
        let current = Frame::new(entry);
        info!(route = %current.route, frame = %current.id, "Navigator started");
        Self {
            history: Vec::new(),
            current,
        }
    }

    /// Push `route`; it becomes the active frame.
    pub fn navigate(&mut self, route: Route) -> &Frame {
        let frame = Frame::new(route);
        info!(
            from = %self.current.route,
            to = %frame.route,
            depth = self.depth() + 1,
            "Navigate"
        );
        let previous = std::mem::replace(&mut self.current, frame);
        self.history.push(previous);
        &self.current
    }

    /// Swap the active frame for `route` without growing history.
    ///
    /// Returns the frame that was replaced; it can no longer be reached by
    /// going back.
    pub fn replace(&mut self, route: Route) -> Frame {
        let frame = Frame::new(route);
        info!(
            from = %self.current.route,
            to = %frame.route,
            depth = self.depth(),
            "Replace"
        );
        std::mem::replace(&mut self.current, frame)
    }

    /// Pop the active frame and return it.
    pub fn go_back(&mut self) -> Result<Frame, NavigationError> {
        let Some(previous) = self.history.pop() else {
            debug!(route = %self.current.route, "Back ignored, no history");
            return Err(NavigationError::NoHistory);
        };
        let popped = std::mem::replace(&mut self.current, previous);
        info!(
            from = %popped.route,
            to = %self.current.route,
            depth = self.depth(),
            "Back"
        );
        Ok(popped)
    }

    pub fn current(&self) -> &Frame {
        &self.current
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.history.len() + 1
    }

    /// Frames from the entry route up to the active one.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.history.iter().chain(std::iter::once(&self.current))
    }

    pub fn contains(&self, frame_id: Uuid) -> bool {
        self.frames().any(|f| f.id == frame_id)
    }

    /// Owned copy of the stack, bottom first.
    pub fn snapshot(&self) -> Vec<Frame> {
        self.frames().cloned().collect()
    }
}
