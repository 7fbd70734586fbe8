/// A single tab and the panel it reveals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: String,
    pub title: String,
}

impl Tab {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A set of mutually exclusive tabs. At most one is active, and exactly one
/// is active whenever the group is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroup {
    id: String,
    tabs: Vec<Tab>,
    active: Option<usize>,
}

impl TabGroup {
    /// Create a group with the first tab active
    pub fn new(id: impl Into<String>, tabs: Vec<Tab>) -> Self {
        let active = if tabs.is_empty() { None } else { Some(0) };
        Self {
            id: id.into(),
            tabs,
            active,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Tabs paired with their active flag, in display order
    pub fn iter_with_state(&self) -> impl Iterator<Item = (&Tab, bool)> {
        self.tabs
            .iter()
            .enumerate()
            .map(move |(index, tab)| (tab, Some(index) == self.active))
    }

    pub fn active(&self) -> Option<&Tab> {
        self.active.and_then(|index| self.tabs.get(index))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, tab_id: &str) -> bool {
        self.active().is_some_and(|tab| tab.id == tab_id)
    }

    /// Activate `tab_id`, deactivating every sibling. Unknown ids leave the
    /// group untouched.
    pub fn activate(&mut self, tab_id: &str) -> bool {
        match self.tabs.iter().position(|tab| tab.id == tab_id) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn select_next(&mut self) {
        if let Some(index) = self.active {
            self.active = Some((index + 1) % self.tabs.len());
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(index) = self.active {
            let len = self.tabs.len();
            self.active = Some((index + len - 1) % len);
        }
    }
}

/// All tab groups of a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    groups: Vec<TabGroup>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: TabGroup) -> Self {
        self.add_group(group);
        self
    }

    /// Register a group, replacing any existing group with the same id
    pub fn add_group(&mut self, group: TabGroup) {
        if let Some(existing) = self.groups.iter_mut().find(|g| g.id == group.id) {
            *existing = group;
        } else {
            self.groups.push(group);
        }
    }

    pub fn group(&self, group_id: &str) -> Option<&TabGroup> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    fn group_mut(&mut self, group_id: &str) -> Option<&mut TabGroup> {
        self.groups.iter_mut().find(|g| g.id == group_id)
    }

    /// Activate `tab_id` inside `group_id`.
    ///
    /// Returns whether anything changed hands. Unknown groups and unknown
    /// tabs are silently ignored and keep the previous selection.
    pub fn activate(&mut self, group_id: &str, tab_id: &str) -> bool {
        let activated = self
            .group_mut(group_id)
            .is_some_and(|group| group.activate(tab_id));
        if activated {
            tracing::debug!("Activated tab {} in group {}", tab_id, group_id);
        }
        activated
    }

    pub fn active(&self, group_id: &str) -> Option<&str> {
        self.group(group_id)
            .and_then(TabGroup::active)
            .map(|tab| tab.id.as_str())
    }

    pub fn is_active(&self, group_id: &str, tab_id: &str) -> bool {
        self.group(group_id).is_some_and(|group| group.is_active(tab_id))
    }

    pub fn select_next(&mut self, group_id: &str) {
        if let Some(group) = self.group_mut(group_id) {
            group.select_next();
        }
    }

    pub fn select_prev(&mut self, group_id: &str) {
        if let Some(group) = self.group_mut(group_id) {
            group.select_prev();
        }
    }
}
