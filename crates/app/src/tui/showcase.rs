use artifact_demo_core::app::{Scheduler, TimerHandle};
use artifact_demo_core::domain::{
    active_section, scroll_target, CommandBuilder, NavbarStyle, Section, Tab, TabGroup, ViewState,
};
use artifact_demo_core::ports::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;

/// Tab group inside the showcase's demo section
pub const DEMO_GROUP: &str = "demo";

/// Rows taken by the nav bar above the document
pub const NAVBAR_HEIGHT: usize = 3;

/// Rows reserved for the demo panel, whichever tab is active
const DEMO_PANEL_HEIGHT: usize = 7;

const EXAMPLE_REMOTE: &str = "git@example.com:team/artifacts.git";

struct SectionContent {
    id: &'static str,
    title: &'static str,
    text: &'static [&'static str],
}

const SECTIONS: &[SectionContent] = &[
    SectionContent {
        id: "overview",
        title: "Overview",
        text: &[
            "git-artifact stores build artifacts in a plain git repository.",
            "Every artifact set is an orphan commit reachable only through a tag,",
            "so history stays flat and any tag can be fetched on its own.",
        ],
    },
    SectionContent {
        id: "features",
        title: "Features",
        text: &[
            "* No server beyond the git remote you already have",
            "* Tags are the only index: list, filter and find the latest with globs",
            "* Fetch a single artifact set without cloning the others",
            "* Works from CI with nothing but git installed",
        ],
    },
    SectionContent {
        id: "use-cases",
        title: "Use Cases",
        text: &[
            "* Hand binaries from one pipeline to the next",
            "* Keep release bundles next to the source tag that produced them",
            "* Share test fixtures too large for the main repository",
        ],
    },
    SectionContent {
        id: "demo",
        title: "Demo",
        text: &[],
    },
    SectionContent {
        id: "commands",
        title: "Commands",
        text: &["Examples built from the supported options of each command:"],
    },
    SectionContent {
        id: "installation",
        title: "Installation",
        text: &["Put the script on your PATH and git picks it up as a subcommand:"],
    },
];

const DEMO_TABS: &[(&str, &str, &[&str])] = &[
    (
        "basic",
        "Basic",
        &[
            "$ git artifact init --url=<remote>",
            "$ cp build/output/* .",
            "$ git artifact add-n-push -t v1.0",
            "All good.. get back to clear state for next artifact...",
        ],
    ),
    (
        "retrieve",
        "Retrieve",
        &[
            "$ git artifact clone --url=<remote> --path=artifacts",
            "$ cd artifacts",
            "$ git artifact find-latest -r 'v2.*'",
            "v2.1.3",
            "$ git artifact fetch-co -t v2.1.3",
        ],
    ),
    (
        "ci",
        "CI",
        &[
            "steps:",
            "  - run: git artifact clone --url=$ARTIFACT_REMOTE --path=out",
            "  - run: cp -r dist/* out/",
            "  - run: cd out && git artifact add-n-push -t $BUILD_TAG",
        ],
    ),
];

const INSTALL_SNIPPETS: &[&str] = &[
    "cp git-artifact ~/bin/ && chmod +x ~/bin/git-artifact",
    "git artifact --help",
];

/// One line of the rendered showcase document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocLine {
    Heading { section: usize },
    Text(&'static str),
    Snippet(usize),
    DemoTabs,
    DemoPanel(usize),
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyState {
    Idle,
    Copied,
    Failed,
}

/// A copyable snippet and the feedback its button shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyButton {
    pub text: String,
    pub state: CopyState,
}

impl CopyButton {
    pub fn label(&self) -> &'static str {
        match self.state {
            CopyState::Idle => "Copy",
            CopyState::Copied => "Copied!",
            CopyState::Failed => "Copy failed",
        }
    }
}

/// Showcase page state: scroll position, demo tabs and copy buttons
pub struct ShowcaseState {
    clock: Arc<dyn Clock>,
    view: ViewState,
    document: Vec<DocLine>,
    sections: Vec<Section>,
    snippets: Vec<CopyButton>,
    focused_snippet: usize,
    scroll: usize,
    viewport_rows: usize,
    feedback_timers: Scheduler<usize>,
    pending_resets: HashMap<usize, TimerHandle>,
    copy_feedback: Duration,
    nav_lookahead: usize,
    navbar_threshold: usize,
}

impl ShowcaseState {
    pub fn new(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let view = ViewState::new().with_group(TabGroup::new(
            DEMO_GROUP,
            DEMO_TABS
                .iter()
                .map(|(id, title, _)| Tab::new(*id, *title))
                .collect(),
        ));

        let builder = CommandBuilder;
        let mut snippet_texts: Vec<String> = [
            builder.build("init", &[("--url", EXAMPLE_REMOTE), ("--branch", "main")]),
            builder.build("add-n-push", &[("-t", "v1.0"), ("-b", "main")]),
            builder.build("fetch-co", &[("-t", "v1.0")]),
            builder.build("fetch-co-latest", &[("--regex", "v2.*")]),
            builder.build("find-latest", &[("-r", "v2.*")]),
        ]
        .into_iter()
        .flatten()
        .collect();
        let command_snippets = snippet_texts.len();
        snippet_texts.extend(INSTALL_SNIPPETS.iter().map(|s| s.to_string()));

        let (document, sections) = layout(command_snippets, snippet_texts.len());

        Self {
            clock,
            view,
            document,
            sections,
            snippets: snippet_texts
                .into_iter()
                .map(|text| CopyButton {
                    text,
                    state: CopyState::Idle,
                })
                .collect(),
            focused_snippet: 0,
            scroll: 0,
            viewport_rows: 1,
            feedback_timers: Scheduler::new(),
            pending_resets: HashMap::new(),
            copy_feedback: config.timing.copy_feedback,
            nav_lookahead: config.showcase.nav_lookahead,
            navbar_threshold: config.showcase.navbar_threshold,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn document(&self) -> &[DocLine] {
        &self.document
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_title(&self, index: usize) -> &'static str {
        SECTIONS.get(index).map(|s| s.title).unwrap_or_default()
    }

    /// Lines of the active demo panel
    pub fn demo_panel(&self) -> &'static [&'static str] {
        let active = self.view.active(DEMO_GROUP);
        DEMO_TABS
            .iter()
            .find(|(id, _, _)| Some(*id) == active)
            .map(|(_, _, lines)| *lines)
            .unwrap_or_default()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Rows of document visible below the nav bar. Re-clamps the scroll.
    pub fn set_viewport(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Furthest scroll that still fills the viewport
    fn max_scroll(&self) -> usize {
        self.document.len().saturating_sub(self.viewport_rows)
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let target = self.scroll.saturating_add_signed(delta);
        self.scroll = target.min(self.max_scroll());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Jump so the section's heading is the first document row. The nav
    /// bar has its own rows, so nothing is subtracted. Unknown indices are
    /// ignored.
    pub fn jump_to(&mut self, index: usize) {
        if let Some(section) = self.sections.get(index) {
            self.scroll = scroll_target(section, 0).min(self.max_scroll());
            debug!("Jumped to section {}", section.id);
        }
    }

    pub fn active_section(&self) -> Option<&Section> {
        active_section(&self.sections, self.scroll, self.nav_lookahead)
    }

    pub fn navbar_style(&self) -> NavbarStyle {
        NavbarStyle::for_scroll(self.scroll, self.navbar_threshold)
    }

    pub fn snippets(&self) -> &[CopyButton] {
        &self.snippets
    }

    pub fn focused_snippet(&self) -> usize {
        self.focused_snippet
    }

    pub fn focus_next_snippet(&mut self) {
        if !self.snippets.is_empty() {
            self.focused_snippet = (self.focused_snippet + 1) % self.snippets.len();
        }
    }

    pub fn focused_text(&self) -> Option<&str> {
        self.snippets
            .get(self.focused_snippet)
            .map(|snippet| snippet.text.as_str())
    }

    /// Record the outcome of a copy and schedule the label to revert
    pub fn finish_copy(&mut self, index: usize, succeeded: bool) {
        let Some(snippet) = self.snippets.get_mut(index) else {
            return;
        };
        snippet.state = if succeeded {
            CopyState::Copied
        } else {
            CopyState::Failed
        };

        if let Some(previous) = self.pending_resets.remove(&index) {
            self.feedback_timers.cancel(previous);
        }
        let handle = self
            .feedback_timers
            .schedule(self.clock.now(), self.copy_feedback, index);
        self.pending_resets.insert(index, handle);
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.feedback_timers.time_until_next(self.clock.now())
    }

    /// Revert every copy label whose feedback time is over
    pub fn run_due(&mut self) -> usize {
        let due = self.feedback_timers.drain_due(self.clock.now());
        for index in &due {
            self.pending_resets.remove(index);
            if let Some(snippet) = self.snippets.get_mut(*index) {
                snippet.state = CopyState::Idle;
            }
        }
        due.len()
    }
}

/// Lay the document out top to bottom and record where each section sits
fn layout(command_snippets: usize, total_snippets: usize) -> (Vec<DocLine>, Vec<Section>) {
    let mut document = Vec::new();
    let mut sections = Vec::new();

    for (index, content) in SECTIONS.iter().enumerate() {
        let top = document.len();
        document.push(DocLine::Heading { section: index });
        document.extend(content.text.iter().map(|line| DocLine::Text(*line)));

        match content.id {
            "demo" => {
                document.push(DocLine::DemoTabs);
                document.extend((0..DEMO_PANEL_HEIGHT).map(DocLine::DemoPanel));
            }
            "commands" => document.extend((0..command_snippets).map(DocLine::Snippet)),
            "installation" => {
                document.extend((command_snippets..total_snippets).map(DocLine::Snippet))
            }
            _ => {}
        }
        document.push(DocLine::Blank);

        sections.push(Section {
            id: content.id.to_string(),
            title: content.title.to_string(),
            top,
            height: document.len() - top,
        });
    }

    (document, sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifact_demo_core::ports::ManualClock;

    fn showcase() -> (Arc<ManualClock>, ShowcaseState) {
        let clock = Arc::new(ManualClock::new());
        let state = ShowcaseState::new(&Config::default(), clock.clone());
        (clock, state)
    }

    #[test]
    fn test_sections_tile_the_document() {
        let (_, state) = showcase();
        let sections = state.sections();
        assert_eq!(sections.len(), SECTIONS.len());
        assert_eq!(sections[0].top, 0);
        for pair in sections.windows(2) {
            assert_eq!(pair[0].top + pair[0].height, pair[1].top);
        }
        let last = sections.last().unwrap();
        assert_eq!(last.top + last.height, state.document().len());
    }

    #[test]
    fn test_jump_highlights_target_section() {
        let (_, mut state) = showcase();
        for index in 0..state.sections().len() - 1 {
            state.jump_to(index);
            assert_eq!(
                state.active_section().map(|s| s.id.clone()),
                Some(state.sections()[index].id.clone())
            );
        }
    }

    #[test]
    fn test_scroll_is_clamped() {
        let (_, mut state) = showcase();
        state.scroll_by(-5);
        assert_eq!(state.scroll(), 0);
        state.scroll_by(10_000);
        assert_eq!(state.scroll(), state.document().len() - 1);
    }

    #[test]
    fn test_jump_puts_heading_on_first_row() {
        let (_, mut state) = showcase();
        state.set_viewport(20);
        for index in 1..3 {
            state.jump_to(index);
            let section = &state.sections()[index];
            assert_eq!(state.scroll(), section.top);
            assert_eq!(state.document()[state.scroll()], DocLine::Heading { section: index });
        }
    }

    #[test]
    fn test_bottom_scroll_keeps_viewport_filled() {
        let (_, mut state) = showcase();
        state.set_viewport(20);
        state.scroll_to_bottom();
        assert_eq!(state.scroll(), state.document().len() - 20);
        assert!(state.active_section().is_some());

        state.scroll_by(10_000);
        assert_eq!(state.scroll(), state.document().len() - 20);

        state.set_viewport(30);
        assert_eq!(state.scroll(), state.document().len() - 30);
    }

    #[test]
    fn test_navbar_turns_translucent_after_threshold() {
        let (_, mut state) = showcase();
        assert_eq!(state.navbar_style(), NavbarStyle::Solid);
        state.scroll_by(11);
        assert_eq!(state.navbar_style(), NavbarStyle::Translucent);
    }

    #[test]
    fn test_demo_panel_follows_active_tab() {
        let (_, mut state) = showcase();
        assert!(state.demo_panel()[0].contains("init"));
        state.view_mut().activate(DEMO_GROUP, "ci");
        assert_eq!(state.demo_panel()[0], "steps:");
        state.view_mut().activate(DEMO_GROUP, "missing");
        assert_eq!(state.demo_panel()[0], "steps:");
    }

    #[test]
    fn test_snippets_use_builder_output() {
        let (_, state) = showcase();
        let texts: Vec<&str> = state.snippets().iter().map(|s| s.text.as_str()).collect();
        assert!(texts.contains(&"git artifact add-n-push -t=v1.0 -b=main"));
        assert!(texts.contains(&"git artifact --help"));
    }

    #[test]
    fn test_copy_feedback_reverts_after_delay() {
        let (clock, mut state) = showcase();
        state.finish_copy(0, true);
        assert_eq!(state.snippets()[0].label(), "Copied!");

        clock.advance(Duration::from_millis(999));
        assert_eq!(state.run_due(), 0);
        clock.advance(Duration::from_millis(1));
        assert_eq!(state.run_due(), 1);
        assert_eq!(state.snippets()[0].label(), "Copy");
    }

    #[test]
    fn test_repeated_copy_restarts_feedback() {
        let (clock, mut state) = showcase();
        state.finish_copy(1, true);
        clock.advance(Duration::from_millis(600));
        state.finish_copy(1, false);
        assert_eq!(state.snippets()[1].label(), "Copy failed");

        clock.advance(Duration::from_millis(600));
        assert_eq!(state.run_due(), 0);
        assert_eq!(state.snippets()[1].label(), "Copy failed");

        clock.advance(Duration::from_millis(400));
        assert_eq!(state.run_due(), 1);
        assert_eq!(state.snippets()[1].state, CopyState::Idle);
    }
}
