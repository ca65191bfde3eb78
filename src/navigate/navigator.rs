use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::navigate::adapter::{DocumentAdapter, ScrollOptions};
use crate::navigate::event_loop::{EventLoop, TaskId};
use crate::navigate::viewport::element_is_fully_visible;
use crate::utils::error::TocError;

/// Highlight class applied to a scroll destination
pub const DEFAULT_HIGHLIGHT_CLASS: &str = "scrolledTo";

/// How long a highlight stays on
pub const DEFAULT_HIGHLIGHT_DURATION: Duration = Duration::from_millis(4000);

/// What the highlight removal timer is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HighlightClock {
    /// From the click. A scroll that settles late shortens the visible
    /// highlight, down to nothing when it takes longer than the duration.
    #[default]
    Activation,
    /// From the moment the highlight is applied
    Highlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightOptions {
    pub class: String,
    pub duration: Duration,
    pub clock: HighlightClock,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            class: DEFAULT_HIGHLIGHT_CLASS.to_string(),
            duration: DEFAULT_HIGHLIGHT_DURATION,
            clock: HighlightClock::default(),
        }
    }
}

/// Outcome of an activation, captured at click time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTarget {
    pub element_id: String,
    pub was_in_viewport: bool,
}

/// A click on a table of contents anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    href: String,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Target identifier of the anchor, `#intro` -> `intro`
    pub fn target_id(&self) -> &str {
        self.href.rsplit_once('#').map(|(_, id)| id).unwrap_or(&self.href)
    }
}

/// Pending continuations of the latest activation of one target
#[derive(Debug, Clone, Copy)]
struct Activation {
    generation: u64,
    observer: Option<TaskId>,
    removal: Option<TaskId>,
}

impl Activation {
    fn is_settled(&self) -> bool {
        self.observer.is_none() && self.removal.is_none()
    }
}

struct Shared<D: DocumentAdapter, E: EventLoop> {
    document: Rc<D>,
    events: Rc<E>,
    options: HighlightOptions,
    active: RefCell<HashMap<String, Activation>>,
    generation: Cell<u64>,
}

impl<D: DocumentAdapter, E: EventLoop> Shared<D, E> {
    fn is_current(&self, target_id: &str, generation: u64) -> bool {
        self.active
            .borrow()
            .get(target_id)
            .map(|activation| activation.generation == generation)
            .unwrap_or(false)
    }
}

/// Scrolls to table of contents targets and highlights them for a while.
///
/// Per target the highlight goes `Idle -> Highlighted -> Idle`. A target that
/// is already fully visible is highlighted right away; otherwise the highlight
/// waits for the scroll to settle. Either way a removal timer puts the target
/// back to idle.
pub struct ScrollNavigator<D: DocumentAdapter + 'static, E: EventLoop + 'static> {
    shared: Rc<Shared<D, E>>,
}

impl<D: DocumentAdapter + 'static, E: EventLoop + 'static> ScrollNavigator<D, E> {
    pub fn new(document: Rc<D>, events: Rc<E>, options: HighlightOptions) -> Self {
        Self {
            shared: Rc::new(Shared {
                document,
                events,
                options,
                active: RefCell::new(HashMap::new()),
                generation: Cell::new(0),
            }),
        }
    }

    /// Click handler for an anchor. Prevents the default jump and never fails;
    /// an unknown target is logged and leaves the page where it is.
    pub fn on_click(&self, event: &mut ClickEvent) -> Option<ScrollTarget> {
        event.prevent_default();
        match self.activate(event.target_id()) {
            Ok(target) => Some(target),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    /// Scroll to the element with `target_id` and highlight it
    pub fn activate(&self, target_id: &str) -> Result<ScrollTarget, TocError> {
        let shared = &self.shared;
        let element = shared
            .document
            .resolve_element_by_id(target_id)
            .ok_or_else(|| TocError::TargetNotFound(target_id.to_string()))?;

        let was_in_viewport = element_is_fully_visible(shared.document.as_ref(), &element);
        self.supersede(target_id);

        let generation = shared.generation.get() + 1;
        shared.generation.set(generation);
        shared.active.borrow_mut().insert(
            target_id.to_string(),
            Activation {
                generation,
                observer: None,
                removal: None,
            },
        );

        let class = &shared.options.class;
        shared.document.remove_class(&element, class);
        shared.document.scroll_into_view(&element, ScrollOptions::centered_smooth());

        let mut observer = None;
        let mut removal = None;
        if was_in_viewport {
            shared.document.add_class(&element, class);
            debug!("#{}: Idle -> Highlighted (already visible)", target_id);
            removal = Some(schedule_removal(shared, target_id, element, generation));
        } else {
            debug!("#{}: waiting for scroll to settle", target_id);
            observer = Some(schedule_highlight(shared, target_id, element.clone(), generation));
            if shared.options.clock == HighlightClock::Activation {
                removal = Some(schedule_removal(shared, target_id, element, generation));
            }
        }

        if let Some(activation) = shared.active.borrow_mut().get_mut(target_id) {
            activation.observer = observer;
            activation.removal = removal;
        }

        Ok(ScrollTarget {
            element_id: target_id.to_string(),
            was_in_viewport,
        })
    }

    /// Targets with a highlight or removal still pending
    pub fn pending_targets(&self) -> Vec<String> {
        let mut targets: Vec<String> = self.shared.active.borrow().keys().cloned().collect();
        targets.sort();
        targets
    }

    /// Cancel what earlier activations left pending before a new one starts.
    ///
    /// The same target loses its observer and removal timer. Scroll-end is a
    /// document-wide signal and the new scroll replaces any in flight, so
    /// other targets lose their pending observers too.
    fn supersede(&self, target_id: &str) {
        let stale: Vec<TaskId> = {
            let mut active = self.shared.active.borrow_mut();
            let mut stale = Vec::new();

            if let Some(previous) = active.remove(target_id) {
                stale.extend(previous.observer);
                stale.extend(previous.removal);
            }
            for (id, activation) in active.iter_mut() {
                if let Some(observer) = activation.observer.take() {
                    debug!("#{}: pending highlight superseded by #{}", id, target_id);
                    stale.push(observer);
                }
            }
            active.retain(|_, activation| !activation.is_settled());
            stale
        };

        for task in stale {
            self.shared.events.cancel(task);
        }
    }
}

fn schedule_highlight<D, E>(shared: &Rc<Shared<D, E>>, target_id: &str, element: D::Element, generation: u64) -> TaskId
where
    D: DocumentAdapter + 'static,
    E: EventLoop + 'static,
{
    let weak: Weak<Shared<D, E>> = Rc::downgrade(shared);
    let target_id = target_id.to_string();

    shared.events.once_scroll_end(Box::new(move || {
        let shared = match weak.upgrade() {
            Some(shared) => shared,
            None => return,
        };
        if !shared.is_current(&target_id, generation) {
            return;
        }

        shared.document.add_class(&element, &shared.options.class);
        debug!("#{}: Idle -> Highlighted (scroll settled)", target_id);

        let removal = match shared.options.clock {
            HighlightClock::Highlight => Some(schedule_removal(&shared, &target_id, element, generation)),
            HighlightClock::Activation => None,
        };

        if let Some(activation) = shared.active.borrow_mut().get_mut(&target_id) {
            activation.observer = None;
            if removal.is_some() {
                activation.removal = removal;
            }
        };
    }))
}

fn schedule_removal<D, E>(shared: &Rc<Shared<D, E>>, target_id: &str, element: D::Element, generation: u64) -> TaskId
where
    D: DocumentAdapter + 'static,
    E: EventLoop + 'static,
{
    let weak: Weak<Shared<D, E>> = Rc::downgrade(shared);
    let target_id = target_id.to_string();

    shared.events.set_timeout(
        shared.options.duration,
        Box::new(move || {
            let shared = match weak.upgrade() {
                Some(shared) => shared,
                None => return,
            };
            if !shared.is_current(&target_id, generation) {
                return;
            }

            shared.document.remove_class(&element, &shared.options.class);

            // The activation is over; a scroll that has not settled yet no longer highlights
            let stale_observer = shared
                .active
                .borrow_mut()
                .remove(&target_id)
                .and_then(|activation| activation.observer);
            if let Some(observer) = stale_observer {
                debug!("#{}: scroll still running when the highlight expired", target_id);
                shared.events.cancel(observer);
            }
            debug!("#{}: Highlighted -> Idle", target_id);
        }),
    )
}
