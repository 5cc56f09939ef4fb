//! Fakes shared by the unit tests.

use crate::navigation::controller::{
    DestinationListeners, ListenerId, NavController, NavOptions, NavigateError,
    OnDestinationChangedListener,
};
use crate::navigation::graph::{DestinationId, DestinationTree, NavGraph};
use crate::navigation::hierarchy::find_start_destination;
use crate::navigation::label::Arguments;
use crate::view::app_bar::icon::{Animation, Animator, DrawerArrow};
use crate::view::{AppBar, SidePanel, UiRef};
use std::cell::RefCell;
use std::rc::Rc;

pub const ROOT: DestinationId = DestinationId(1);
pub const HOME: DestinationId = DestinationId(2);
pub const LIBRARY: DestinationId = DestinationId(3);
pub const SHELF: DestinationId = DestinationId(4);
pub const BOOK: DestinationId = DestinationId(5);
pub const SETTINGS: DestinationId = DestinationId(6);
pub const EPISODE: DestinationId = DestinationId(7);

/// ```txt
///   root (start = home)
///   ├── home          "Home"
///   ├── library       "Library" (start = shelf)
///   │   ├── shelf     no label
///   │   ├── book      "Book"
///   │   └── episode   "Episode {number}"
///   └── settings      "Settings"
/// ```
pub fn sample_graph() -> NavGraph {
    let mut graph = NavGraph::new(ROOT, HOME, Some("Root"));
    graph
        .add_screen(ROOT, HOME, Some("Home"))
        .and_then(|graph| graph.add_graph(ROOT, LIBRARY, SHELF, Some("Library")))
        .and_then(|graph| graph.add_screen(LIBRARY, SHELF, None))
        .and_then(|graph| graph.add_screen(LIBRARY, BOOK, Some("Book")))
        .and_then(|graph| graph.add_screen(LIBRARY, EPISODE, Some("Episode {number}")))
        .and_then(|graph| graph.add_screen(ROOT, SETTINGS, Some("Settings")))
        .expect("sample graph is well formed");
    graph
}

#[derive(Debug, Clone, PartialEq)]
pub enum IconUpdate {
    Cleared,
    Shown { progress: f32, description: String },
}

#[derive(Debug, Default)]
pub struct RecordingAppBar {
    pub titles: Vec<String>,
    pub icons: Vec<IconUpdate>,
    arrows: Vec<DrawerArrow>,
}

impl RecordingAppBar {
    pub fn same_icon_every_time(&self) -> bool {
        self.arrows
            .windows(2)
            .all(|pair| pair[0].same_icon(&pair[1]))
    }
}

impl AppBar for RecordingAppBar {
    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn set_navigation_icon(&mut self, icon: Option<&DrawerArrow>, description: Option<&str>) {
        match icon {
            Some(icon) => {
                self.icons.push(IconUpdate::Shown {
                    progress: icon.progress(),
                    description: description.unwrap_or_default().to_string(),
                });
                self.arrows.push(icon.clone());
            }
            None => self.icons.push(IconUpdate::Cleared),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingPanel {
    pub opened: usize,
    pub closed: usize,
    pub toggled: usize,
}

impl SidePanel for RecordingPanel {
    fn open(&mut self) {
        self.opened += 1;
    }

    fn close(&mut self) {
        self.closed += 1;
    }

    fn toggle(&mut self) {
        self.toggled += 1;
    }
}

pub fn app_bar(bar: &Rc<RefCell<RecordingAppBar>>) -> UiRef<dyn AppBar> {
    let shared: Rc<RefCell<dyn AppBar>> = bar.clone();
    UiRef::new(&shared)
}

pub fn side_panel(panel: &Rc<RefCell<RecordingPanel>>) -> UiRef<dyn SidePanel> {
    let shared: Rc<RefCell<dyn SidePanel>> = panel.clone();
    UiRef::new(&shared)
}

#[derive(Debug, Default)]
struct AnimatorLog {
    started: Vec<(f32, f32)>,
    running: Vec<bool>,
    cancelled: usize,
}

/// Records transitions and keeps them running until told otherwise.
#[derive(Debug, Clone, Default)]
pub struct FakeAnimator {
    log: Rc<RefCell<AnimatorLog>>,
}

impl FakeAnimator {
    pub fn started(&self) -> Vec<(f32, f32)> {
        self.log.borrow().started.clone()
    }

    pub fn cancelled(&self) -> usize {
        self.log.borrow().cancelled
    }

    pub fn running(&self) -> usize {
        self.log.borrow().running.iter().filter(|&&r| r).count()
    }

    pub fn finish_all(&self) {
        for running in self.log.borrow_mut().running.iter_mut() {
            *running = false;
        }
    }
}

struct FakeAnimation {
    log: Rc<RefCell<AnimatorLog>>,
    index: usize,
}

impl Animation for FakeAnimation {
    fn is_running(&self) -> bool {
        self.log.borrow().running[self.index]
    }

    fn cancel(&mut self) {
        let mut log = self.log.borrow_mut();
        if log.running[self.index] {
            log.running[self.index] = false;
            log.cancelled += 1;
        }
    }
}

impl Animator for FakeAnimator {
    fn animate(&mut self, _icon: &DrawerArrow, from: f32, to: f32) -> Box<dyn Animation> {
        let mut log = self.log.borrow_mut();
        log.started.push((from, to));
        log.running.push(true);

        Box::new(FakeAnimation {
            log: self.log.clone(),
            index: log.running.len() - 1,
        })
    }
}

/// Back stack controller that dispatches to its listeners after every move.
#[derive(Debug)]
pub struct FakeController {
    pub graph: NavGraph,
    pub back_stack: Vec<DestinationId>,
    pub navigations: Vec<(DestinationId, NavOptions)>,
    pub listeners: DestinationListeners,
    pub up_calls: usize,
}

impl FakeController {
    /// Starts on the start destination of the graph, or on its root when the
    /// start chain is broken.
    pub fn new(graph: NavGraph) -> Self {
        let start = find_start_destination(&graph, graph.root()).unwrap_or(graph.root());

        FakeController {
            graph,
            back_stack: vec![start],
            navigations: Vec::new(),
            listeners: DestinationListeners::new(),
            up_calls: 0,
        }
    }
}

impl NavController for FakeController {
    fn graph(&self) -> &dyn DestinationTree {
        &self.graph
    }

    fn current_destination(&self) -> Option<DestinationId> {
        self.back_stack.last().copied()
    }

    fn navigate(
        &mut self,
        target: DestinationId,
        arguments: Option<Arguments>,
        options: &NavOptions,
    ) -> Result<(), NavigateError> {
        if !self.graph.contains(target) {
            return Err(NavigateError::UnknownDestination(target));
        }

        if let Some(pop_up_to) = options.pop_up_to {
            if let Some(index) = self
                .back_stack
                .iter()
                .position(|&id| id == pop_up_to.destination)
            {
                let keep = if pop_up_to.inclusive { index } else { index + 1 };
                self.back_stack.truncate(keep);
            }
        }

        if !(options.launch_single_top && self.current_destination() == Some(target)) {
            self.back_stack.push(target);
        }
        self.navigations.push((target, options.clone()));

        self.listeners
            .dispatch(&self.graph, target, arguments.as_ref())?;

        Ok(())
    }

    /// Listeners get no arguments when the back stack is popped.
    fn navigate_up(&mut self) -> Result<bool, NavigateError> {
        self.up_calls += 1;
        if self.back_stack.len() < 2 {
            return Ok(false);
        }

        self.back_stack.pop();
        if let Some(current) = self.current_destination() {
            self.listeners.dispatch(&self.graph, current, None)?;
        }

        Ok(true)
    }

    fn add_on_destination_changed_listener(
        &mut self,
        listener: Box<dyn OnDestinationChangedListener>,
    ) -> ListenerId {
        self.listeners.add(listener)
    }

    fn remove_on_destination_changed_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}
