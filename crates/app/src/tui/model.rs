use artifact_demo_core::app::{DemoSession, COMMANDS_TAB, MAIN_GROUP};
use artifact_demo_core::domain::{CommandKind, ParamName, ParamSpec, DEFAULT_DELIMITER};
use artifact_demo_core::ports::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::showcase::ShowcaseState;
use crate::cli::Page;
use crate::config::Config;

/// Commands offered by the form, in display order
static COMMANDS: [CommandKind; 7] = CommandKind::KNOWN;

/// The TUI Model - this represents the complete UI state
pub struct TuiModel {
    /// Page currently on screen
    pub page: Page,

    /// Demo page: tabs, transcript and pending simulated completions
    pub demo: DemoSession,

    /// Values typed into the command forms
    pub form: CommandForm,

    /// Showcase page state
    pub showcase: ShowcaseState,

    /// Current input state
    pub input: InputState,

    /// Output pane position, in lines up from the tail
    pub output_scroll: usize,

    /// Output revision the pane last snapped to
    seen_output_revision: u64,

    /// Terminal size
    pub terminal_width: u16,
    pub terminal_height: u16,

    /// Whether the application should quit
    pub should_quit: bool,
}

/// Input state for text input modes
#[derive(Debug, Default)]
pub struct InputState {
    /// Current input mode
    pub mode: InputMode,

    /// Current input text
    pub text: String,

    /// Input prompt text
    pub prompt: String,
}

/// Input modes for different text entry scenarios
#[derive(Debug, Default, Clone, PartialEq)]
pub enum InputMode {
    #[default]
    None,

    /// Filtering the tag browser; applied as you type
    Search,
}

/// Form values for every command, plus which command and field are focused
#[derive(Debug, Clone, PartialEq)]
pub struct CommandForm {
    selected: usize,
    field: usize,
    values: HashMap<String, HashMap<String, String>>,
}

impl Default for CommandForm {
    fn default() -> Self {
        let mut form = Self {
            selected: 0,
            field: 0,
            values: HashMap::new(),
        };
        form.set_value(&CommandKind::Summary, ParamName::Delimiter, DEFAULT_DELIMITER);
        form
    }
}

impl CommandForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &'static [CommandKind] {
        &COMMANDS
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_kind(&self) -> &'static CommandKind {
        &COMMANDS[self.selected]
    }

    pub fn select_next_command(&mut self) {
        if self.selected + 1 < COMMANDS.len() {
            self.selected += 1;
            self.field = 0;
        }
    }

    pub fn select_prev_command(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.field = 0;
        }
    }

    pub fn fields(&self) -> &'static [ParamSpec] {
        self.selected_kind().params()
    }

    pub fn focused_field(&self) -> Option<ParamName> {
        self.fields().get(self.field).map(|spec| spec.name)
    }

    pub fn focused_index(&self) -> usize {
        self.field
    }

    pub fn next_field(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.field = (self.field + 1) % count;
        }
    }

    pub fn prev_field(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.field = (self.field + count - 1) % count;
        }
    }

    pub fn value(&self, kind: &CommandKind, param: ParamName) -> &str {
        self.values
            .get(kind.id())
            .and_then(|values| values.get(param.flag()))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn set_value(&mut self, kind: &CommandKind, param: ParamName, value: impl Into<String>) {
        self.values
            .entry(kind.id().to_string())
            .or_default()
            .insert(param.flag().to_string(), value.into());
    }

    /// Append to the focused field of the selected command
    pub fn push_char(&mut self, c: char) {
        if let Some(param) = self.focused_field() {
            let kind = self.selected_kind();
            let mut value = self.value(kind, param).to_string();
            value.push(c);
            self.set_value(kind, param, value);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(param) = self.focused_field() {
            let kind = self.selected_kind();
            let mut value = self.value(kind, param).to_string();
            value.pop();
            self.set_value(kind, param, value);
        }
    }

    /// Raw values of the selected command, keyed by flag name
    pub fn raw_params(&self) -> HashMap<String, String> {
        self.values
            .get(self.selected_kind().id())
            .cloned()
            .unwrap_or_default()
    }
}

impl TuiModel {
    pub fn new(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let mut demo = DemoSession::new(clock.clone(), config.timing.timings());
        demo.tag_browser_mut().set_view_mode(config.ui.tag_view_mode);
        let showcase = ShowcaseState::new(config, clock);
        let seen_output_revision = demo.output().revision();

        Self {
            page: config.ui.start_page,
            demo,
            form: CommandForm::new(),
            showcase,
            input: InputState::default(),
            output_scroll: 0,
            seen_output_revision,
            terminal_width: 0,
            terminal_height: 0,
            should_quit: false,
        }
    }

    pub fn active_tab(&self) -> &str {
        self.demo.view().active(MAIN_GROUP).unwrap_or(COMMANDS_TAB)
    }

    pub fn toggle_page(&mut self) {
        self.page = match self.page {
            Page::Demo => Page::Showcase,
            Page::Showcase => Page::Demo,
        };
    }

    pub fn is_editing(&self) -> bool {
        self.input.mode != InputMode::None
    }

    pub fn start_input(&mut self, mode: InputMode, prompt: impl Into<String>, text: impl Into<String>) {
        self.input.mode = mode;
        self.input.prompt = prompt.into();
        self.input.text = text.into();
    }

    pub fn end_input(&mut self) {
        self.input.mode = InputMode::None;
        self.input.text.clear();
        self.input.prompt.clear();
    }

    pub fn scroll_output_up(&mut self, lines: usize) {
        let max = self.demo.output().lines().len().saturating_sub(1);
        self.output_scroll = (self.output_scroll + lines).min(max);
    }

    pub fn scroll_output_down(&mut self, lines: usize) {
        self.output_scroll = self.output_scroll.saturating_sub(lines);
    }

    /// Snap the output pane back to the tail whenever the transcript changed
    pub fn follow_output(&mut self) {
        let revision = self.demo.output().revision();
        if revision != self.seen_output_revision {
            self.seen_output_revision = revision;
            self.output_scroll = 0;
        }
    }

    /// Fire due timers on both pages. Returns how many fired.
    pub fn run_due(&mut self) -> usize {
        let fired = self.demo.run_due() + self.showcase.run_due();
        self.follow_output();
        fired
    }

    /// Time until the next timer on either page
    pub fn time_until_next(&self) -> Option<Duration> {
        match (self.demo.time_until_next(), self.showcase.time_until_next()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
