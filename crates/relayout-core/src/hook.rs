// Relayout Translation Hook
// Decodes hardware events with the input layout, re-encodes them with the
// output layout, and dispatches the result to observers

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::{KeyEvent, LayoutError, LayoutTable, ModifierMask, RawCode, RawKeyInput};

/// Callback receiving every translated event. Must not block.
pub type Observer = Box<dyn Fn(&KeyEvent) + Send>;

/// Handle returned by [`TranslationHook::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// What the host should do with the native event after the hook ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookOutcome {
    /// Code not produced by the input layout; let the default action run
    Passthrough,
    /// Event was translated and dispatched; suppress the default action
    Suppress,
}

impl HookOutcome {
    /// Returns true if the host's default action should proceed
    pub fn allows_default(self) -> bool {
        matches!(self, HookOutcome::Passthrough)
    }
}

/// The stateful translation engine.
///
/// Single-threaded: `handle_raw_event` runs to completion, notifying every
/// observer in registration order, before it returns. Use
/// [`SharedTranslationHook`] when events and layout swaps come from
/// different threads.
pub struct TranslationHook {
    input_layout: Arc<LayoutTable>,
    output_layout: Arc<LayoutTable>,
    observers: IndexMap<ObserverId, Observer>,
    next_observer_id: u64,
}

impl TranslationHook {
    /// Create a hook translating from `input_layout` (the hardware) to
    /// `output_layout` (the layout to simulate)
    pub fn new(input_layout: Arc<LayoutTable>, output_layout: Arc<LayoutTable>) -> Self {
        Self {
            input_layout,
            output_layout,
            observers: IndexMap::new(),
            next_observer_id: 0,
        }
    }

    pub fn input_layout(&self) -> &Arc<LayoutTable> {
        &self.input_layout
    }

    pub fn output_layout(&self) -> &Arc<LayoutTable> {
        &self.output_layout
    }

    /// Swap the hardware layout. Already dispatched events are unaffected.
    pub fn set_input_layout(&mut self, layout: Arc<LayoutTable>) {
        log::info!("input layout: {} -> {}", self.input_layout, layout);
        self.input_layout = layout;
    }

    /// Swap the simulated layout. Already dispatched events are unaffected.
    pub fn set_output_layout(&mut self, layout: Arc<LayoutTable>) {
        log::info!("output layout: {} -> {}", self.output_layout, layout);
        self.output_layout = layout;
    }

    /// Register an observer.
    ///
    /// Observers are notified in registration order. Registering the same
    /// callback twice yields two independent registrations.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: Fn(&KeyEvent) + Send + 'static,
    {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.insert(id, Box::new(observer));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.shift_remove(&id).is_some()
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Handle a raw transition from the host
    pub fn handle(&self, input: &RawKeyInput) -> Result<HookOutcome, LayoutError> {
        self.handle_raw_event(input.raw_code, input.modifier_mask(), input.action.is_pressed())
    }

    /// Translate one hardware transition and dispatch it.
    ///
    /// Codes the input layout does not produce are passed through without
    /// notifying anyone. Otherwise every observer sees the translated event
    /// and the caller is told to suppress the native one.
    pub fn handle_raw_event(
        &self,
        raw_code: RawCode,
        modifiers: ModifierMask,
        pressed: bool,
    ) -> Result<HookOutcome, LayoutError> {
        match self.translate(raw_code, modifiers, pressed)? {
            Some(event) => {
                self.dispatch(&event);
                Ok(HookOutcome::Suppress)
            }
            None => Ok(HookOutcome::Passthrough),
        }
    }

    /// Build the translated event without dispatching it.
    ///
    /// Shared codes decode to several physical keys; the first in catalogue
    /// order is re-encoded. All candidates mean the same thing.
    pub fn translate(
        &self,
        raw_code: RawCode,
        modifiers: ModifierMask,
        pressed: bool,
    ) -> Result<Option<KeyEvent>, LayoutError> {
        if pressed {
            log::debug!("keyCode = {}, modifiers = {}", raw_code, modifiers.bits());
        }

        let ids = self.input_layout.decode(raw_code);
        let Some(&id) = ids.first() else {
            log::trace!("code {} not on layout {}, passing through", raw_code, self.input_layout);
            return Ok(None);
        };

        let output_code = self.output_layout.encode(id).map_err(|e| {
            log::error!(
                "cannot encode {} on layout {}: {}",
                id.index(),
                self.output_layout,
                e
            );
            e
        })?;

        if pressed {
            log::debug!("keyCode = {}, modifiers = {}", output_code, modifiers.bits());
        }

        Ok(Some(KeyEvent::new(
            Arc::clone(&self.output_layout),
            output_code,
            modifiers,
            pressed,
        )))
    }

    /// Notify every observer, in registration order
    pub fn dispatch(&self, event: &KeyEvent) {
        for observer in self.observers.values() {
            observer(event);
        }
    }
}

impl fmt::Debug for TranslationHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationHook")
            .field("input_layout", &self.input_layout.name())
            .field("output_layout", &self.output_layout.name())
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// A [`TranslationHook`] behind a single exclusive lock.
///
/// Layout swaps and dispatch are serialised, so a swap never races an
/// in-flight translation. Observers run while the lock is held and must
/// not call back into the same hook.
#[derive(Clone)]
pub struct SharedTranslationHook {
    inner: Arc<Mutex<TranslationHook>>,
}

impl SharedTranslationHook {
    pub fn new(hook: TranslationHook) -> Self {
        Self {
            inner: Arc::new(Mutex::new(hook)),
        }
    }

    pub fn handle(&self, input: &RawKeyInput) -> Result<HookOutcome, LayoutError> {
        self.inner.lock().handle(input)
    }

    pub fn handle_raw_event(
        &self,
        raw_code: RawCode,
        modifiers: ModifierMask,
        pressed: bool,
    ) -> Result<HookOutcome, LayoutError> {
        self.inner.lock().handle_raw_event(raw_code, modifiers, pressed)
    }

    pub fn set_input_layout(&self, layout: Arc<LayoutTable>) {
        self.inner.lock().set_input_layout(layout);
    }

    pub fn set_output_layout(&self, layout: Arc<LayoutTable>) {
        self.inner.lock().set_output_layout(layout);
    }

    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&KeyEvent) + Send + 'static,
    {
        self.inner.lock().subscribe(observer)
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.inner.lock().unsubscribe(id)
    }

    pub fn input_layout(&self) -> Arc<LayoutTable> {
        Arc::clone(self.inner.lock().input_layout())
    }

    pub fn output_layout(&self) -> Arc<LayoutTable> {
        Arc::clone(self.inner.lock().output_layout())
    }
}

impl fmt::Debug for SharedTranslationHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(inner) => f.debug_tuple("SharedTranslationHook").field(&*inner).finish(),
            None => f.write_str("SharedTranslationHook(<locked>)"),
        }
    }
}
