use crate::errors::ViewError;
use std::fmt;
use tracing::{debug, warn};

pub const DEFAULT_VIEW: &str = "overview";
pub const CLASS_VIEW: &str = "class";
const SECTION_SUFFIX: &str = "-section";

/// An action card as declared on the page: its `data-target` and caption.
#[derive(Debug, Clone)]
pub struct ControlDecl {
    pub target: String,
    pub label: String,
}

impl ControlDecl {
    pub fn new(target: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub view: String,
    pub label: String,
    pub section_id: String,
}

/// Control/section pairs keyed by view name, in declaration order.
#[derive(Debug, Clone)]
pub struct ViewRegistry {
    entries: Vec<ViewEntry>,
}

impl ViewRegistry {
    /// Builds the registry, failing if any control targets a section the page
    /// does not declare.
    pub fn new(controls: &[ControlDecl], sections: &[&str]) -> Result<Self, ViewError> {
        if controls.is_empty() {
            return Err(ViewError::EmptyRegistry);
        }

        let mut entries: Vec<ViewEntry> = Vec::with_capacity(controls.len());
        for control in controls {
            if !sections.iter().any(|section| *section == control.target) {
                return Err(ViewError::UnknownSection(control.target.clone()));
            }
            let view = control
                .target
                .strip_suffix(SECTION_SUFFIX)
                .filter(|view| !view.is_empty())
                .ok_or_else(|| ViewError::InvalidSectionId(control.target.clone()))?;
            if entries.iter().any(|entry| entry.view == view) {
                return Err(ViewError::DuplicateView(view.to_string()));
            }
            entries.push(ViewEntry {
                view: view.to_string(),
                label: control.label.clone(),
                section_id: control.target.clone(),
            });
        }

        Ok(Self { entries })
    }

    /// The attendance page layout.
    pub fn portal() -> Result<Self, ViewError> {
        let controls = [
            ControlDecl::new("overview-section", "Overview"),
            ControlDecl::new("attendance-section", "Attendance Records"),
            ControlDecl::new("class-section", "Class Statistics"),
        ];
        let sections = ["overview-section", "attendance-section", "class-section"];
        Self::new(&controls, &sections)
    }

    pub fn entries(&self) -> &[ViewEntry] {
        &self.entries
    }

    pub fn resolve(&self, view: &str) -> Option<&ViewEntry> {
        self.entries.iter().find(|entry| entry.view == view)
    }

    pub fn by_target(&self, target: &str) -> Option<&ViewEntry> {
        self.entries.iter().find(|entry| entry.section_id == target)
    }

    pub fn default_entry(&self) -> &ViewEntry {
        &self.entries[0]
    }
}

/// A path plus ordered query pairs, edited the way `URLSearchParams` is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl {
    path: String,
    query: Vec<(String, String)>,
}

impl PageUrl {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.split('#').next().unwrap_or_default();
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));
        let query = serde_urlencoded::from_str::<Vec<(String, String)>>(query).unwrap_or_else(
            |err| {
                warn!("ignoring unparsable query string: {err}");
                Vec::new()
            },
        );

        Self {
            path: path.to_string(),
            query,
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `key` to `value`, or removes it when `value` is `None`.
    pub fn with_param(mut self, key: &str, value: Option<&str>) -> Self {
        match value {
            None => self.query.retain(|(k, _)| k != key),
            Some(value) => match self.query.iter().position(|(k, _)| k == key) {
                Some(first) => {
                    self.query[first].1 = value.to_string();
                    let mut index = 0;
                    self.query.retain(|(k, _)| {
                        let keep = index <= first || k != key;
                        index += 1;
                        keep
                    });
                }
                None => self.query.push((key.to_string(), value.to_string())),
            },
        }
        self
    }
}

impl fmt::Display for PageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            let query = serde_urlencoded::to_string(&self.query).map_err(|_| fmt::Error)?;
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}

/// The browser location and session history.
pub trait History {
    fn location(&self) -> &PageUrl;

    /// Adds a history entry without reloading.
    fn push(&mut self, url: PageUrl);

    /// Full navigation; the page reloads at `url`.
    fn navigate(&mut self, url: PageUrl);
}

/// History for a single server-side request: pushes move the location,
/// navigations are recorded for the response to act on.
#[derive(Debug, Clone)]
pub struct RequestHistory {
    location: PageUrl,
    entries: Vec<PageUrl>,
    navigation: Option<PageUrl>,
}

impl RequestHistory {
    pub fn new(location: PageUrl) -> Self {
        Self {
            entries: vec![location.clone()],
            location,
            navigation: None,
        }
    }

    pub fn entries(&self) -> &[PageUrl] {
        &self.entries
    }

    pub fn navigation(&self) -> Option<&PageUrl> {
        self.navigation.as_ref()
    }
}

impl History for RequestHistory {
    fn location(&self) -> &PageUrl {
        &self.location
    }

    fn push(&mut self, url: PageUrl) {
        self.entries.push(url.clone());
        self.location = url;
    }

    fn navigate(&mut self, url: PageUrl) {
        self.navigation = Some(url);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    /// A click on an action card carrying `data-target`.
    ActivateControl { target: String },
    /// The "view class stats" shortcut.
    ShowClassStats,
    /// A filter link carrying `data-class`.
    FilterByClass { class_id: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Activated(String),
    Navigated(PageUrl),
    Ignored,
}

pub struct ViewStateController<H> {
    registry: ViewRegistry,
    active: Option<String>,
    history: H,
}

impl<H: History> ViewStateController<H> {
    pub fn new(registry: ViewRegistry, history: H) -> Self {
        Self {
            registry,
            active: None,
            history,
        }
    }

    /// Activates the view named by the URL, or the first declared view when
    /// the parameter is absent or unknown.
    pub fn initialize(&mut self) -> &str {
        let requested = self
            .history
            .location()
            .param("view")
            .and_then(|view| match self.registry.resolve(view) {
                Some(entry) => Some(entry.view.clone()),
                None => {
                    warn!("unknown view `{view}`, falling back to default");
                    None
                }
            });
        let view = requested.unwrap_or_else(|| self.registry.default_entry().view.clone());

        self.activate_view(&view);
        self.active.as_deref().unwrap_or(DEFAULT_VIEW)
    }

    /// Makes `view` the only active section and records it in the URL.
    /// Unknown views leave the current state untouched.
    pub fn activate_view(&mut self, view: &str) -> bool {
        let Some(entry) = self.registry.resolve(view) else {
            debug!("no section for view `{view}`");
            return false;
        };

        self.active = Some(entry.view.clone());
        let url = self.history.location().clone().with_param("view", Some(view));
        self.history.push(url);
        true
    }

    pub fn navigate_with_filter(&mut self, view: &str, class_id: Option<&str>) -> PageUrl {
        let url = self.filter_url(view, class_id);
        self.history.navigate(url.clone());
        url
    }

    /// Target of a filter link, without navigating.
    pub fn filter_url(&self, view: &str, class_id: Option<&str>) -> PageUrl {
        let url = self.history.location().clone().with_param("view", Some(view));
        match class_id.filter(|id| !id.is_empty()) {
            Some(id) => url.with_param("class", Some(id)),
            None => url,
        }
    }

    /// View carried by the current URL, as filter links read it.
    pub fn current_view(&self) -> &str {
        self.history.location().param("view").unwrap_or(DEFAULT_VIEW)
    }

    pub fn dispatch(&mut self, command: ViewCommand) -> CommandOutcome {
        match command {
            ViewCommand::ActivateControl { target } => {
                let Some(view) = self.registry.by_target(&target).map(|e| e.view.clone()) else {
                    debug!("control target `{target}` has no section");
                    return CommandOutcome::Ignored;
                };
                self.activate(view)
            }
            ViewCommand::ShowClassStats => self.activate(CLASS_VIEW.to_string()),
            ViewCommand::FilterByClass { class_id } => {
                let view = self.current_view().to_string();
                CommandOutcome::Navigated(self.navigate_with_filter(&view, class_id.as_deref()))
            }
        }
    }

    fn activate(&mut self, view: String) -> CommandOutcome {
        if self.activate_view(&view) {
            CommandOutcome::Activated(view)
        } else {
            CommandOutcome::Ignored
        }
    }

    pub fn active_view(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_active(&self, view: &str) -> bool {
        self.active.as_deref() == Some(view)
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn history(&self) -> &H {
        &self.history
    }
}

/// Inline style for a `.progress-bar` carrying `data-width`.
pub fn progress_bar_style(data_width: Option<&str>) -> Option<String> {
    let width: f64 = data_width?.trim().parse().ok()?;
    if !width.is_finite() {
        return None;
    }
    Some(format!("width: {}%", width.clamp(0.0, 100.0)))
}
