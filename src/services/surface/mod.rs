// Public surface
// Prop bundles and contexts handed to the field, views and layout

mod handle;

pub use handle::PickerHandle;

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::action::{
    ChangeImportance, FieldChangeContext, PickerAction, PickerShortcut, SelectionState,
};
use crate::models::error::PickerError;
use crate::services::controller::DispatchOutcome;
use crate::services::value_manager::ValueManager;

type DispatchResult = Result<DispatchOutcome, PickerError>;

/// Field `on_change`: dispatches `setValueFromField`.
pub struct FieldChangeHandler<M: ValueManager> {
    handle: PickerHandle<M>,
}

impl<M: ValueManager> FieldChangeHandler<M> {
    pub fn call(&self, value: M::Value, context: FieldChangeContext<M::Error>) -> DispatchResult {
        self.handle.dispatch(PickerAction::from_field(value, context))
    }
}

/// View `on_change`: dispatches `setValueFromView`.
pub struct ViewChangeHandler<M: ValueManager> {
    handle: PickerHandle<M>,
}

impl<M: ValueManager> ViewChangeHandler<M> {
    pub fn call(&self, value: M::Value, selection_state: SelectionState) -> DispatchResult {
        self.handle
            .dispatch(PickerAction::from_view(value, selection_state))
    }
}

/// Layout `on_change`: a plain partial view selection, never an accept.
pub struct LayoutChangeHandler<M: ValueManager> {
    handle: PickerHandle<M>,
}

impl<M: ValueManager> LayoutChangeHandler<M> {
    pub fn call(&self, value: M::Value) -> DispatchResult {
        self.handle
            .dispatch(PickerAction::from_view(value, SelectionState::Partial))
    }
}

pub struct ShortcutHandler<M: ValueManager> {
    handle: PickerHandle<M>,
}

impl<M: ValueManager> ShortcutHandler<M> {
    pub fn call(
        &self,
        value: M::Value,
        change_importance: ChangeImportance,
        shortcut: PickerShortcut,
    ) -> DispatchResult {
        self.handle
            .dispatch(PickerAction::from_shortcut(value, change_importance, shortcut))
    }
}

/// Layout `is_valid`: runs the injected validator.
pub struct ValidityCheck<M: ValueManager> {
    handle: PickerHandle<M>,
}

impl<M: ValueManager> ValidityCheck<M> {
    pub fn call(&self, value: &M::Value) -> Result<bool, PickerError> {
        self.handle.with(|controller| controller.is_valid(value))
    }
}

pub struct OpenSetter<M: ValueManager> {
    handle: PickerHandle<M>,
}

impl<M: ValueManager> OpenSetter<M> {
    pub fn call(&self, open: bool) -> Result<bool, PickerError> {
        self.handle.with_mut(|controller| controller.set_open(open))
    }

    pub fn update(&self, f: impl FnOnce(bool) -> bool) -> Result<bool, PickerError> {
        self.handle.with_mut(|controller| controller.update_open(f))
    }
}

/// Control buttons exposed to descendant UI.
pub struct ActionsContext<M: ValueManager> {
    handle: PickerHandle<M>,
    set_open: Rc<OpenSetter<M>>,
}

impl<M: ValueManager> ActionsContext<M> {
    pub fn set_open(&self, open: bool) -> Result<bool, PickerError> {
        self.set_open.call(open)
    }

    pub fn clear_value(&self) -> DispatchResult {
        self.handle.with_mut(|controller| controller.clear_value())
    }

    pub fn set_value_to_today(&self) -> DispatchResult {
        self.handle
            .with_mut(|controller| controller.set_value_to_today())
    }

    pub fn accept_value_changes(&self) -> DispatchResult {
        self.handle
            .with_mut(|controller| controller.accept_value_changes())
    }

    pub fn cancel_value_changes(&self) -> DispatchResult {
        self.handle
            .with_mut(|controller| controller.cancel_value_changes())
    }
}

/// Context reserved for the picker's own popper/dialog.
pub struct PrivateContext<M: ValueManager> {
    handle: PickerHandle<M>,
}

impl<M: ValueManager> PrivateContext<M> {
    /// Close, committing any pending draft first.
    pub fn dismiss_views(&self) -> DispatchResult {
        self.handle.with_mut(|controller| controller.dismiss_views())
    }
}

pub struct FieldProps<M: ValueManager> {
    pub value: M::Value,
    pub on_change: Rc<FieldChangeHandler<M>>,
}

pub struct ViewProps<M: ValueManager> {
    pub value: M::Value,
    pub on_change: Rc<ViewChangeHandler<M>>,
    pub open: bool,
    pub set_open: Rc<OpenSetter<M>>,
}

pub struct LayoutProps<M: ValueManager> {
    pub value: M::Value,
    pub on_change: Rc<LayoutChangeHandler<M>>,
    pub on_select_shortcut: Rc<ShortcutHandler<M>>,
    pub is_valid: Rc<ValidityCheck<M>>,
}

/// Everything descendant UI needs for one render.
pub struct PickerSurface<M: ValueManager> {
    pub field: FieldProps<M>,
    pub view: ViewProps<M>,
    pub layout: LayoutProps<M>,
    pub actions: Rc<ActionsContext<M>>,
    pub private: Rc<PrivateContext<M>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SurfaceKey {
    revision: u64,
    open: bool,
}

/// Assembles [`PickerSurface`]s for one picker.
///
/// Handlers and contexts are created once and shared by every surface, so
/// their identity is stable for the picker's lifetime. Surfaces themselves
/// are rebuilt only when the draft or the open flag changes.
pub struct PublicSurfaceBuilder<M: ValueManager> {
    handle: PickerHandle<M>,
    field_change: Rc<FieldChangeHandler<M>>,
    view_change: Rc<ViewChangeHandler<M>>,
    layout_change: Rc<LayoutChangeHandler<M>>,
    shortcut: Rc<ShortcutHandler<M>>,
    is_valid: Rc<ValidityCheck<M>>,
    set_open: Rc<OpenSetter<M>>,
    actions: Rc<ActionsContext<M>>,
    private: Rc<PrivateContext<M>>,
    cache: RefCell<Option<(SurfaceKey, Rc<PickerSurface<M>>)>>,
}

impl<M: ValueManager> PublicSurfaceBuilder<M> {
    pub fn new(handle: PickerHandle<M>) -> Self {
        let set_open = Rc::new(OpenSetter {
            handle: handle.clone(),
        });
        Self {
            field_change: Rc::new(FieldChangeHandler {
                handle: handle.clone(),
            }),
            view_change: Rc::new(ViewChangeHandler {
                handle: handle.clone(),
            }),
            layout_change: Rc::new(LayoutChangeHandler {
                handle: handle.clone(),
            }),
            shortcut: Rc::new(ShortcutHandler {
                handle: handle.clone(),
            }),
            is_valid: Rc::new(ValidityCheck {
                handle: handle.clone(),
            }),
            actions: Rc::new(ActionsContext {
                handle: handle.clone(),
                set_open: Rc::clone(&set_open),
            }),
            private: Rc::new(PrivateContext {
                handle: handle.clone(),
            }),
            set_open,
            handle,
            cache: RefCell::new(None),
        }
    }

    pub fn handle(&self) -> &PickerHandle<M> {
        &self.handle
    }

    pub fn actions(&self) -> Rc<ActionsContext<M>> {
        Rc::clone(&self.actions)
    }

    pub fn private_context(&self) -> Rc<PrivateContext<M>> {
        Rc::clone(&self.private)
    }

    /// Surface for the current state, reused while nothing it shows changed.
    pub fn build(&self) -> Result<Rc<PickerSurface<M>>, PickerError> {
        let key = self.handle.with(|controller| SurfaceKey {
            revision: controller.revision(),
            open: controller.is_open(),
        })?;

        if let Some((cached_key, surface)) = self.cache.borrow().as_ref() {
            if *cached_key == key {
                return Ok(Rc::clone(surface));
            }
        }

        let value = self.handle.draft()?;
        let surface = Rc::new(PickerSurface {
            field: FieldProps {
                value: value.clone(),
                on_change: Rc::clone(&self.field_change),
            },
            view: ViewProps {
                value: value.clone(),
                on_change: Rc::clone(&self.view_change),
                open: key.open,
                set_open: Rc::clone(&self.set_open),
            },
            layout: LayoutProps {
                value,
                on_change: Rc::clone(&self.layout_change),
                on_select_shortcut: Rc::clone(&self.shortcut),
                is_valid: Rc::clone(&self.is_valid),
            },
            actions: Rc::clone(&self.actions),
            private: Rc::clone(&self.private),
        });
        log::trace!("rebuilt picker surface at revision {}", key.revision);
        *self.cache.borrow_mut() = Some((key, Rc::clone(&surface)));
        Ok(surface)
    }
}
