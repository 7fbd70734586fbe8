use crate::domain::tags::{lookup, TagDetail, SAMPLE_TAGS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the tag browser lays out tags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagViewMode {
    #[default]
    Graph,
    List,
    Timeline,
}

impl TagViewMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::List => "list",
            Self::Timeline => "timeline",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Graph => Self::List,
            Self::List => Self::Timeline,
            Self::Timeline => Self::Graph,
        }
    }
}

impl fmt::Display for TagViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag browser panel state: search filter, cursor and the open detail card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagBrowser {
    search: String,
    cursor: usize,
    view_mode: TagViewMode,
    detail: Option<(String, TagDetail)>,
    loaded: bool,
}

impl TagBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.cursor = 0;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.cursor = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.cursor = 0;
    }

    /// Sample tags whose name contains the search text, ignoring case
    pub fn visible_tags(&self) -> Vec<&'static str> {
        let needle = self.search.to_lowercase();
        SAMPLE_TAGS
            .iter()
            .copied()
            .filter(|tag| tag.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn select_next(&mut self) {
        let count = self.visible_tags().len();
        if self.cursor + 1 < count {
            self.cursor += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn selected_tag(&self) -> Option<&'static str> {
        self.visible_tags().get(self.cursor).copied()
    }

    /// Open the detail card for `tag_name`
    pub fn show_details(&mut self, tag_name: &str) -> &TagDetail {
        let detail = lookup(tag_name);
        &self.detail.insert((tag_name.to_string(), detail)).1
    }

    /// Tag name and details of the open card
    pub fn detail(&self) -> Option<(&str, &TagDetail)> {
        self.detail
            .as_ref()
            .map(|(name, detail)| (name.as_str(), detail))
    }

    pub fn view_mode(&self) -> TagViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: TagViewMode) {
        self.view_mode = mode;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }
}
