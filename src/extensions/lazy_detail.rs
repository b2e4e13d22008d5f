/// One-shot guard for hover-triggered detail loads.
///
/// Event renderers that fetch extra tooltip lines on hover keep one of these
/// per element: the first hover starts the load, later hovers are ignored,
/// and the resolved value is kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyDetail<T> {
    state: LazyDetailState<T>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LazyDetailState<T> {
    Idle,
    Requested,
    Loaded(T),
}

impl<T> Default for LazyDetail<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LazyDetail<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: LazyDetailState::Idle,
        }
    }

    /// Marks the load as started. Returns `true` only on the first call.
    pub fn request(&mut self) -> bool {
        if !matches!(self.state, LazyDetailState::Idle) {
            return false;
        }
        self.state = LazyDetailState::Requested;
        true
    }

    /// Runs `load` on the first request only.
    pub fn request_with<F: FnOnce()>(&mut self, load: F) -> bool {
        let first = self.request();
        if first {
            load();
        }
        first
    }

    /// Stores the loaded value. Resolving twice keeps the latest value.
    pub fn resolve(&mut self, value: T) {
        self.state = LazyDetailState::Loaded(value);
    }

    #[must_use]
    pub fn get(&self) -> Option<&T> {
        match &self.state {
            LazyDetailState::Loaded(value) => Some(value),
            LazyDetailState::Idle | LazyDetailState::Requested => None,
        }
    }

    #[must_use]
    pub fn is_requested(&self) -> bool {
        !matches!(self.state, LazyDetailState::Idle)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LazyDetailState::Loaded(_))
    }
}
