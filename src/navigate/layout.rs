use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::navigate::adapter::{DocumentAdapter, Rect, ScrollOptions, ViewportSize};
use crate::utils::error::{BoxResult, TocError};
use crate::utils::fs;

/// Pixels a smooth scroll covers per millisecond
const SMOOTH_SCROLL_SPEED: f64 = 2.0;

/// Upper bound for a simulated smooth scroll
const MAX_SCROLL_DURATION: Duration = Duration::from_millis(3000);

/// Position of an element in document coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementBox {
    pub id: String,
    #[serde(default)]
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementBox {
    pub fn new(id: &str, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.to_string(),
            left,
            top,
            width,
            height,
        }
    }
}

fn default_viewport() -> ViewportSize {
    ViewportSize {
        width: 1280.0,
        height: 800.0,
    }
}

/// Geometry of a page: viewport, scroll offset and element boxes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default = "default_viewport")]
    pub viewport: ViewportSize,
    #[serde(default)]
    pub scroll_x: f64,
    #[serde(default)]
    pub scroll_y: f64,
    #[serde(default)]
    pub elements: Vec<ElementBox>,
}

impl PageLayout {
    /// Load a layout description from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> BoxResult<Self> {
        let content = fs::read_file(path.as_ref())?;
        Self::from_yaml(&content).map_err(|e| {
            TocError::Config(format!("Failed to parse page layout ({}): {}", path.as_ref().display(), e)).into()
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

/// In-memory page standing in for a rendering environment
pub struct SimulatedPage {
    layout: PageLayout,
    scroll: Cell<(f64, f64)>,
    classes: RefCell<HashMap<String, BTreeSet<String>>>,
    additions: RefCell<HashMap<(String, String), usize>>,
    scrolls: Cell<usize>,
    last_scroll_distance: Cell<f64>,
}

impl SimulatedPage {
    pub fn new(layout: PageLayout) -> Self {
        let scroll = (layout.scroll_x, layout.scroll_y);
        Self {
            layout,
            scroll: Cell::new(scroll),
            classes: RefCell::new(HashMap::new()),
            additions: RefCell::new(HashMap::new()),
            scrolls: Cell::new(0),
            last_scroll_distance: Cell::new(0.0),
        }
    }

    fn element_box(&self, id: &str) -> Option<&ElementBox> {
        self.layout.elements.iter().find(|element| element.id == id)
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.classes
            .borrow()
            .get(id)
            .map(|classes| classes.contains(class))
            .unwrap_or(false)
    }

    /// How often `class` was added to the element
    pub fn times_added(&self, id: &str, class: &str) -> usize {
        self.additions
            .borrow()
            .get(&(id.to_string(), class.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll.get().1
    }

    pub fn scroll_count(&self) -> usize {
        self.scrolls.get()
    }

    /// How long the most recent smooth scroll takes to settle
    pub fn scroll_duration(&self) -> Duration {
        let millis = self.last_scroll_distance.get() / SMOOTH_SCROLL_SPEED;
        Duration::from_millis(millis.round() as u64).min(MAX_SCROLL_DURATION)
    }
}

/// Scroll offset that centers `size` at `start` in the viewport, never above the top
fn centered_offset(start: f64, size: f64, viewport: f64) -> f64 {
    (start + size / 2.0 - viewport / 2.0).max(0.0)
}

impl DocumentAdapter for SimulatedPage {
    type Element = String;

    fn resolve_element_by_id(&self, id: &str) -> Option<String> {
        self.element_box(id).map(|element| element.id.clone())
    }

    fn bounding_box(&self, element: &String) -> Rect {
        let (scroll_x, scroll_y) = self.scroll.get();
        match self.element_box(element) {
            Some(b) => Rect::new(b.left - scroll_x, b.top - scroll_y, b.width, b.height),
            None => Rect::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    fn viewport_size(&self) -> ViewportSize {
        self.layout.viewport
    }

    fn scroll_into_view(&self, element: &String, options: ScrollOptions) {
        let target = match self.element_box(element) {
            Some(target) => target,
            None => return,
        };
        let (x, y) = self.scroll.get();
        let viewport = self.layout.viewport;

        let new_x = centered_offset(target.left, target.width, viewport.width);
        let new_y = centered_offset(target.top, target.height, viewport.height);
        let distance = ((new_x - x).powi(2) + (new_y - y).powi(2)).sqrt();

        self.scroll.set((new_x, new_y));
        self.scrolls.set(self.scrolls.get() + 1);
        self.last_scroll_distance.set(if options.smooth { distance } else { 0.0 });
        debug!("Scrolled to #{} ({:.0}px to {:.0},{:.0})", element, distance, new_x, new_y);
    }

    fn add_class(&self, element: &String, class: &str) {
        let added = self
            .classes
            .borrow_mut()
            .entry(element.clone())
            .or_default()
            .insert(class.to_string());
        if added {
            *self
                .additions
                .borrow_mut()
                .entry((element.clone(), class.to_string()))
                .or_insert(0) += 1;
            info!("#{} +{}", element, class);
        }
    }

    fn remove_class(&self, element: &String, class: &str) {
        let removed = self
            .classes
            .borrow_mut()
            .get_mut(element)
            .map(|classes| classes.remove(class))
            .unwrap_or(false);
        if removed {
            info!("#{} -{}", element, class);
        }
    }
}
