//! Ambient access to the current [`Ui`] for call sites that cannot take a
//! `&mut Ui` parameter, such as draw hooks that rebuild part of the tree.
//!
//! The context is visible only on the thread that entered it and only for
//! the duration of [`enter`].

use std::cell::RefCell;

use scoped_tls::scoped_thread_local;

use crate::{
    error::{Error, Result},
    ui::Ui,
};

/// Slot holding the entered UI.
type Slot<'a> = RefCell<&'a mut Ui>;

scoped_thread_local!(static CURRENT: *const ());

/// Run `f` with `ui` installed as the current UI on this thread.
pub fn enter<R>(ui: &mut Ui, f: impl FnOnce() -> R) -> R {
    let slot: Slot<'_> = RefCell::new(ui);
    let ptr = &slot as *const Slot<'_> as *const ();
    CURRENT.set(&ptr, f)
}

/// Is a UI installed on this thread?
pub fn is_entered() -> bool {
    CURRENT.is_set()
}

/// Run `f` against the current UI.
///
/// Fails with [`Error::NoContext`] outside [`enter`] and with
/// [`Error::ContextBusy`] when called from inside another `with_current`.
pub fn with_current<R>(f: impl FnOnce(&mut Ui) -> R) -> Result<R> {
    if !CURRENT.is_set() {
        return Err(Error::NoContext);
    }
    CURRENT.with(|ptr| {
        // SAFETY: `ptr` was created in `enter` from a slot on its stack frame,
        // which outlives the `set` call we are running inside.
        let slot = unsafe { &*(*ptr as *const Slot<'_>) };
        let mut ui = slot.try_borrow_mut().map_err(|_| Error::ContextBusy)?;
        Ok(f(&mut **ui))
    })
}
