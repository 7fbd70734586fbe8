use crate::app::scheduler::{Scheduler, TimerHandle};
use crate::app::tag_browser::{TagBrowser, TagViewMode};
use crate::domain::command::{self, CommandKind, Parameters};
use crate::domain::output::OutputLog;
use crate::domain::tabs::{Tab, TabGroup, ViewState};
use crate::domain::tags::TagDetail;
use crate::error::ValidationErrors;
use crate::ports::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Group holding the demo's top-level tabs
pub const MAIN_GROUP: &str = "main";
pub const COMMANDS_TAB: &str = "commands";
pub const BROWSER_TAB: &str = "browser";
pub const HELP_TAB: &str = "help";

/// How long each simulated action pretends to take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub command_delay: Duration,
    pub load_delay: Duration,
    pub refresh_delay: Duration,
    pub view_mode_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            command_delay: Duration::from_millis(500),
            load_delay: Duration::from_millis(1000),
            refresh_delay: Duration::from_millis(800),
            view_mode_delay: Duration::from_millis(500),
        }
    }
}

/// Second half of a simulated action, run once its timer fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Command { kind: CommandKind, params: Parameters },
    RepositoryLoaded { started_at: String },
    TagsRefreshed { started_at: String },
    ViewModeChanged { mode: TagViewMode, started_at: String },
}

/// Result of dispatching a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Validation failed; the error line was written and nothing was scheduled
    Rejected(ValidationErrors),
    /// The command was echoed and its transcript will follow
    Scheduled(TimerHandle),
}

impl DispatchOutcome {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled(_))
    }
}

/// The demo page: its tabs, its transcript and every pending simulated
/// completion
pub struct DemoSession {
    clock: Arc<dyn Clock>,
    timings: Timings,
    view: ViewState,
    output: OutputLog,
    scheduler: Scheduler<Completion>,
    tag_browser: TagBrowser,
}

impl DemoSession {
    pub fn new(clock: Arc<dyn Clock>, timings: Timings) -> Self {
        let view = ViewState::new().with_group(TabGroup::new(
            MAIN_GROUP,
            vec![
                Tab::new(COMMANDS_TAB, "Commands"),
                Tab::new(BROWSER_TAB, "Tag Browser"),
                Tab::new(HELP_TAB, "Help"),
            ],
        ));
        let output = OutputLog::new(clock.timestamp());

        let mut session = Self {
            clock,
            timings,
            view,
            output,
            scheduler: Scheduler::new(),
            tag_browser: TagBrowser::new(),
        };
        session.show_tab(COMMANDS_TAB);
        session
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    pub fn tag_browser(&self) -> &TagBrowser {
        &self.tag_browser
    }

    pub fn tag_browser_mut(&mut self) -> &mut TagBrowser {
        &mut self.tag_browser
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn show_tab(&mut self, tab_id: &str) -> bool {
        self.view.activate(MAIN_GROUP, tab_id)
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.view.active(MAIN_GROUP)
    }

    fn write(&mut self, text: impl Into<String>) {
        let timestamp = self.clock.timestamp();
        self.output.append(timestamp, text);
    }

    /// Dispatch `command_id` with raw form values.
    ///
    /// Values the command does not take are dropped. Missing required values
    /// are all reported on a single error line and stop the dispatch;
    /// otherwise the invocation is echoed now and the canned transcript is
    /// scheduled after the command delay.
    pub fn execute(&mut self, command_id: &str, raw_params: &HashMap<String, String>) -> DispatchOutcome {
        let kind = CommandKind::parse(command_id);
        let params = Parameters::project(&kind, raw_params);
        self.dispatch(kind, params)
    }

    pub fn dispatch(&mut self, kind: CommandKind, params: Parameters) -> DispatchOutcome {
        if let Err(errors) = command::validate(&kind, &params) {
            info!("Rejected {}: {}", kind, errors);
            let line = format!("[{}] Error: {}\n", self.clock.timestamp(), errors);
            self.write(line);
            return DispatchOutcome::Rejected(errors);
        }

        let invocation = command::render_invocation(&kind, &params);
        info!("Executing {}", invocation);
        let line = format!("[{}] Executing: {}\n", self.clock.timestamp(), invocation);
        self.write(line);

        let handle = self.schedule(self.timings.command_delay, Completion::Command { kind, params });
        DispatchOutcome::Scheduled(handle)
    }

    /// Reset the transcript. Pending completions still fire afterwards.
    pub fn clear_output(&mut self) {
        let timestamp = self.clock.timestamp();
        self.output.clear(timestamp);
    }

    pub fn load_repository(&mut self) -> TimerHandle {
        let started_at = self.clock.timestamp();
        self.write(format!("[{}] Loading repository tags...\n", started_at));
        self.schedule(self.timings.load_delay, Completion::RepositoryLoaded { started_at })
    }

    pub fn refresh_tags(&mut self) -> TimerHandle {
        let started_at = self.clock.timestamp();
        self.write(format!("[{}] Refreshing tag information...\n", started_at));
        self.schedule(self.timings.refresh_delay, Completion::TagsRefreshed { started_at })
    }

    pub fn change_view_mode(&mut self, mode: TagViewMode) -> TimerHandle {
        let started_at = self.clock.timestamp();
        self.tag_browser.set_view_mode(mode);
        self.write(format!("[{}] Switching to {} view...\n", started_at, mode));
        self.schedule(
            self.timings.view_mode_delay,
            Completion::ViewModeChanged { mode, started_at },
        )
    }

    pub fn show_tag_details(&mut self, tag_name: &str) -> TagDetail {
        self.tag_browser.show_details(tag_name).clone()
    }

    fn schedule(&mut self, delay: Duration, completion: Completion) -> TimerHandle {
        let now = self.clock.now();
        self.scheduler.schedule(now, delay, completion)
    }

    /// Cancel a pending completion. Returns false if it already fired.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.scheduler.cancel(handle).is_some()
    }

    pub fn cancel_all(&mut self) -> usize {
        self.scheduler.cancel_all()
    }

    pub fn pending(&self) -> usize {
        self.scheduler.len()
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.scheduler.time_until_next(self.clock.now())
    }

    /// Fire every completion whose delay has elapsed. Returns how many ran.
    pub fn run_due(&mut self) -> usize {
        let due = self.scheduler.drain_due(self.clock.now());
        let count = due.len();
        for completion in due {
            self.complete(completion);
        }
        count
    }

    fn complete(&mut self, completion: Completion) {
        debug!("Completing {:?}", completion);
        match completion {
            Completion::Command { kind, params } => {
                let timestamp = self.clock.timestamp();
                let lines = command::transcript(&kind, &params);
                let text = format!("[{}] {}\n", timestamp, lines.join("\n"));
                self.write(text);
            }
            Completion::RepositoryLoaded { started_at } => {
                self.write(format!("[{}] Repository loaded successfully!\n", started_at));
                self.write("Found 12 tags in repository.\n");
                self.tag_browser.mark_loaded();
            }
            Completion::TagsRefreshed { started_at } => {
                self.write(format!("[{}] Tags refreshed successfully!\n\n", started_at));
            }
            Completion::ViewModeChanged { mode, started_at } => {
                self.write(format!("[{}] View mode changed to {}.\n\n", started_at, mode));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ManualClock;

    fn session() -> (Arc<ManualClock>, DemoSession) {
        let clock = Arc::new(ManualClock::new());
        let session = DemoSession::new(clock.clone(), Timings::default());
        (clock, session)
    }

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn count_lines(session: &DemoSession, needle: &str) -> usize {
        session
            .output()
            .lines()
            .iter()
            .filter(|line| line.contains(needle))
            .count()
    }

    #[test]
    fn test_starts_on_commands_tab() {
        let (_, session) = session();
        assert_eq!(session.active_tab(), Some(COMMANDS_TAB));
        assert!(session.output().text().contains("Ready to execute commands..."));
    }

    #[test]
    fn test_missing_url_reports_error_and_schedules_nothing() {
        let (clock, mut session) = session();
        let outcome = session.execute("init", &HashMap::new());

        assert!(!outcome.is_scheduled());
        assert_eq!(count_lines(&session, "Remote URL is required"), 1);
        assert_eq!(session.pending(), 0);

        clock.advance(Duration::from_secs(5));
        assert_eq!(session.run_due(), 0);
        assert_eq!(count_lines(&session, "Executing"), 0);
    }

    #[test]
    fn test_init_echoes_then_completes_after_delay() {
        let (clock, mut session) = session();
        let params = raw(&[("url", "https://x"), ("path", "repo"), ("branch", "main")]);
        assert!(session.execute("init", &params).is_scheduled());

        assert_eq!(
            count_lines(
                &session,
                r#"git artifact init --url="https://x" --path="repo" --branch="main""#
            ),
            1
        );
        assert_eq!(count_lines(&session, "Repository initialized successfully!"), 0);

        clock.advance(Duration::from_millis(499));
        assert_eq!(session.run_due(), 0);

        clock.advance(Duration::from_millis(1));
        assert_eq!(session.run_due(), 1);
        assert_eq!(count_lines(&session, "Repository initialized successfully!"), 1);
        assert_eq!(count_lines(&session, "Remote: https://x"), 1);
        assert_eq!(count_lines(&session, "Directory: repo"), 1);
    }

    #[test]
    fn test_unknown_command_skips_validation() {
        let (clock, mut session) = session();
        session.execute("gc", &raw(&[("url", "ignored")]));
        assert_eq!(count_lines(&session, "Executing: git artifact gc"), 1);

        clock.advance(Duration::from_millis(500));
        session.run_due();
        assert_eq!(count_lines(&session, "Command 'gc' executed successfully!"), 1);
    }

    #[test]
    fn test_overlapping_commands_complete_in_deadline_order() {
        let (clock, mut session) = session();
        session.execute("fetch-co", &raw(&[("tag", "v1.0")]));
        session.execute("find-latest", &raw(&[("glob", "v2*")]));
        assert_eq!(session.pending(), 2);

        clock.advance(Duration::from_millis(500));
        assert_eq!(session.run_due(), 2);

        let text = session.output().text();
        let fetch = text.find("Fetching tag: v1.0").unwrap();
        let latest = text.find("Finding latest tag matching 'v2*'").unwrap();
        assert!(fetch < latest);
    }

    #[test]
    fn test_cancelled_command_never_completes() {
        let (clock, mut session) = session();
        let outcome = session.execute("add-n-push", &raw(&[("tag", "v3.0")]));
        let DispatchOutcome::Scheduled(handle) = outcome else {
            panic!("expected the command to be scheduled");
        };

        assert!(session.cancel(handle));
        assert!(!session.cancel(handle));
        clock.advance(Duration::from_secs(1));
        assert_eq!(session.run_due(), 0);
        assert_eq!(count_lines(&session, "Tagging with: v3.0"), 0);
    }

    #[test]
    fn test_clear_output_keeps_pending_completions() {
        let (clock, mut session) = session();
        session.execute("clone", &raw(&[("url", "https://x")]));
        session.clear_output();
        assert_eq!(session.output().lines(), vec!["Command output cleared."]);

        clock.advance(Duration::from_millis(500));
        session.run_due();
        assert_eq!(count_lines(&session, "Repository cloned successfully!"), 1);
    }

    #[test]
    fn test_load_then_refresh_overtakes() {
        let (clock, mut session) = session();
        session.load_repository();
        clock.advance(Duration::from_millis(100));
        session.refresh_tags();

        clock.advance(Duration::from_millis(800));
        assert_eq!(session.run_due(), 1);
        assert!(!session.tag_browser().is_loaded());

        clock.advance(Duration::from_millis(100));
        assert_eq!(session.run_due(), 1);
        assert!(session.tag_browser().is_loaded());

        let text = session.output().text();
        assert!(text.find("Tags refreshed").unwrap() < text.find("Repository loaded").unwrap());
        assert_eq!(count_lines(&session, "Found 12 tags in repository."), 1);
    }

    #[test]
    fn test_delayed_lines_reuse_start_timestamp() {
        let (clock, mut session) = session();
        clock.advance(Duration::from_secs(61));
        session.change_view_mode(TagViewMode::Timeline);
        assert_eq!(session.tag_browser().view_mode(), TagViewMode::Timeline);

        clock.advance(Duration::from_secs(5));
        session.run_due();
        assert_eq!(
            count_lines(&session, "[00:01:01] View mode changed to timeline."),
            1
        );
    }

    #[test]
    fn test_browser_actions_announce_immediately() {
        let (clock, mut session) = session();
        clock.advance(Duration::from_secs(3));

        session.load_repository();
        session.refresh_tags();
        session.change_view_mode(TagViewMode::List);

        let lines = session.output().lines();
        let tail: Vec<&str> = lines.iter().rev().take(3).rev().map(String::as_str).collect();
        assert_eq!(
            tail,
            vec![
                "[00:00:03] Loading repository tags...",
                "[00:00:03] Refreshing tag information...",
                "[00:00:03] Switching to list view...",
            ]
        );
        assert_eq!(session.pending(), 3);
        assert_eq!(count_lines(&session, "Repository loaded"), 0);
    }

    #[test]
    fn test_show_tag_details() {
        let (_, mut session) = session();
        assert_eq!(session.show_tag_details("v1.0").commit, "1a2b3c4d");
        assert_eq!(
            session.show_tag_details("nonexistent-tag").message,
            "Tag nonexistent-tag"
        );
    }
}
