//! Contracts between the shell and the host platform services it consumes.
//!
//! Everything here lives on the UI thread: handles are `Rc`/`RefCell` based
//! and none of them is `Send`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Startup splash owned by the host platform.
pub trait SplashScreen {
    /// Keep the splash up until `hide` is called. Invoked once at process start.
    fn prevent_auto_hide(&mut self);
    /// Dismiss the splash. Must be idempotent.
    fn hide(&mut self);
}

/// Commands the shell may issue to the embedded browser.
pub trait BrowserView {
    /// Navigate one step back in the view's history.
    fn go_back(&mut self);
}

pub type SharedBrowserView = Rc<RefCell<dyn BrowserView>>;

/// A reference to the embedded browser that is either live or absent.
///
/// The host attaches its view once it exists; the shell only ever holds a
/// weak handle, so a dropped view reads as absent.
#[derive(Clone, Default)]
pub struct ViewRef {
    slot: Rc<RefCell<Option<Weak<RefCell<dyn BrowserView>>>>>,
}

impl ViewRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, view: &SharedBrowserView) {
        *self.slot.borrow_mut() = Some(Rc::downgrade(view));
    }

    pub fn detach(&self) {
        self.slot.borrow_mut().take();
    }

    pub fn current(&self) -> Option<SharedBrowserView> {
        self.slot.borrow().as_ref().and_then(Weak::upgrade)
    }

    pub fn is_live(&self) -> bool {
        self.current().is_some()
    }
}

pub type BackPressListener = Box<dyn FnMut() -> bool>;
pub type SharedBackHandler = Rc<RefCell<BackHandler>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Hardware back-button service: a registry of back-press listeners.
///
/// Listeners run newest first; the first one returning `true` consumes the
/// press and stops propagation.
#[derive(Default)]
pub struct BackHandler {
    listeners: Vec<(ListenerId, BackPressListener)>,
    next_id: u64,
    dispatching: bool,
    removed_while_dispatching: Vec<ListenerId>,
}

impl BackHandler {
    pub fn new_shared() -> SharedBackHandler {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn add_listener(this: &SharedBackHandler, listener: BackPressListener) -> Subscription {
        let mut handler = this.borrow_mut();
        let id = ListenerId(handler.next_id);
        handler.next_id = handler.next_id.wrapping_add(1);
        handler.listeners.push((id, listener));
        Subscription {
            handler: Rc::downgrade(this),
            id,
        }
    }

    /// Delivers one back press. Returns whether a listener consumed it; when
    /// it did not, the caller should run the platform default action.
    pub fn dispatch(this: &SharedBackHandler) -> bool {
        let mut taken = {
            let mut handler = this.borrow_mut();
            handler.dispatching = true;
            std::mem::take(&mut handler.listeners)
        };

        let mut consumed = false;
        for (_, listener) in taken.iter_mut().rev() {
            if listener() {
                consumed = true;
                break;
            }
        }

        // listeners may have subscribed or unsubscribed while we were running them
        let mut handler = this.borrow_mut();
        handler.dispatching = false;
        let removed = std::mem::take(&mut handler.removed_while_dispatching);
        taken.retain(|(id, _)| !removed.contains(id));
        taken.append(&mut handler.listeners);
        handler.listeners = taken;
        consumed
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn remove(&mut self, id: ListenerId) {
        if self.dispatching {
            self.removed_while_dispatching.push(id);
        }
        self.listeners.retain(|(other, _)| *other != id);
    }
}

/// Handle returned by [`BackHandler::add_listener`].
///
/// Dropping it does not deregister the listener; call [`Subscription::remove`].
#[must_use = "a back-press subscription must be removed explicitly"]
pub struct Subscription {
    handler: Weak<RefCell<BackHandler>>,
    id: ListenerId,
}

impl Subscription {
    pub fn remove(self) {
        if let Some(handler) = self.handler.upgrade() {
            handler.borrow_mut().remove(self.id);
        }
    }
}
