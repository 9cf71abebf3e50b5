// Open state controller
// Open/closed flag with controlled and uncontrolled modes

use std::fmt;

pub type OpenCallback = Box<dyn FnMut()>;

/// Tracks whether the picker is open.
///
/// When an `open` prop is supplied it is authoritative: requests only notify
/// `on_open`/`on_close` and are mirrored in `requested` until the consumer
/// syncs the prop. Otherwise the requested state is the state.
pub struct OpenStateController {
    controlled: Option<bool>,
    requested: bool,
    on_open: Option<OpenCallback>,
    on_close: Option<OpenCallback>,
}

impl OpenStateController {
    pub fn uncontrolled(default_open: bool) -> Self {
        Self {
            controlled: None,
            requested: default_open,
            on_open: None,
            on_close: None,
        }
    }

    pub fn controlled(open: bool) -> Self {
        Self {
            controlled: Some(open),
            requested: open,
            on_open: None,
            on_close: None,
        }
    }

    pub fn with_on_open(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_open = Some(Box::new(callback));
        self
    }

    pub fn with_on_close(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    pub(crate) fn with_callbacks(
        mut self,
        on_open: Option<OpenCallback>,
        on_close: Option<OpenCallback>,
    ) -> Self {
        self.on_open = on_open;
        self.on_close = on_close;
        self
    }

    pub fn is_open(&self) -> bool {
        self.controlled.unwrap_or(self.requested)
    }

    pub fn is_controlled(&self) -> bool {
        self.controlled.is_some()
    }

    /// State most recently asked for, which may lag behind a controlled prop.
    pub fn requested(&self) -> bool {
        self.requested
    }

    /// Request a transition. Returns false when already in `next`.
    pub fn set_open(&mut self, next: bool) -> bool {
        if next == self.is_open() {
            self.requested = next;
            return false;
        }

        self.requested = next;
        log::debug!("picker {} requested", if next { "open" } else { "close" });
        let callback = if next {
            self.on_open.as_mut()
        } else {
            self.on_close.as_mut()
        };
        if let Some(callback) = callback {
            callback();
        }
        true
    }

    /// Request the state computed from the current one.
    pub fn update_open(&mut self, f: impl FnOnce(bool) -> bool) -> bool {
        let next = f(self.is_open());
        self.set_open(next)
    }

    pub fn open(&mut self) -> bool {
        self.set_open(true)
    }

    pub fn close(&mut self) -> bool {
        self.set_open(false)
    }

    pub fn toggle(&mut self) -> bool {
        self.update_open(|open| !open)
    }

    /// Adopt a new `open` prop. Ignored for uncontrolled pickers.
    pub fn sync_controlled(&mut self, open: bool) {
        match self.controlled {
            Some(_) => {
                self.controlled = Some(open);
                self.requested = open;
            }
            None => log::warn!("ignoring open prop on an uncontrolled picker"),
        }
    }
}

impl fmt::Debug for OpenStateController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenStateController")
            .field("controlled", &self.controlled)
            .field("requested", &self.requested)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded() -> (Rc<RefCell<Vec<&'static str>>>, OpenStateController, OpenStateController) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let build = |controller: OpenStateController| {
            let on_open = Rc::clone(&log);
            let on_close = Rc::clone(&log);
            controller
                .with_on_open(move || on_open.borrow_mut().push("open"))
                .with_on_close(move || on_close.borrow_mut().push("close"))
        };
        let uncontrolled = build(OpenStateController::uncontrolled(false));
        let controlled = build(OpenStateController::controlled(false));
        (log, uncontrolled, controlled)
    }

    #[test]
    fn test_uncontrolled_transitions() {
        let (log, mut open_state, _) = recorded();

        assert!(open_state.open());
        assert!(open_state.is_open());
        assert!(!open_state.open());
        assert!(open_state.toggle());
        assert!(!open_state.is_open());

        assert_eq!(*log.borrow(), vec!["open", "close"]);
    }

    #[test]
    fn test_controlled_prop_is_authoritative() {
        let (log, _, mut open_state) = recorded();

        assert!(open_state.open());
        assert!(!open_state.is_open());
        assert!(open_state.requested());

        open_state.sync_controlled(true);
        assert!(open_state.is_open());

        assert!(open_state.close());
        assert!(open_state.is_open());
        assert_eq!(*log.borrow(), vec!["open", "close"]);
    }

    #[test]
    fn test_controlled_repeats_requests_until_synced() {
        let (log, _, mut open_state) = recorded();

        open_state.open();
        open_state.open();

        assert_eq!(*log.borrow(), vec!["open", "open"]);
    }

    #[test]
    fn test_sync_is_ignored_when_uncontrolled() {
        let mut open_state = OpenStateController::uncontrolled(true);
        open_state.sync_controlled(false);
        assert!(open_state.is_open());
        assert!(!open_state.is_controlled());
    }
}
