use crate::domain::tags::SAMPLE_TAGS;
use crate::error::{CoreError, ValidationErrors};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Base of every rendered invocation
pub const COMMAND_PREFIX: &str = "git artifact";

/// Delimiter the summary command assumes when none is given
pub const DEFAULT_DELIMITER: &str = "/";

/// The commands the demo knows how to simulate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Init,
    Clone,
    AddNPush,
    FetchCo,
    List,
    FindLatest,
    Summary,
    /// Anything else; echoed back verbatim
    Other(String),
}

impl CommandKind {
    /// Every simulated command, in the order the demo lists them
    pub const KNOWN: [CommandKind; 7] = [
        CommandKind::Init,
        CommandKind::Clone,
        CommandKind::AddNPush,
        CommandKind::FetchCo,
        CommandKind::List,
        CommandKind::FindLatest,
        CommandKind::Summary,
    ];

    pub fn parse(id: &str) -> Self {
        match id {
            "init" => Self::Init,
            "clone" => Self::Clone,
            "add-n-push" => Self::AddNPush,
            "fetch-co" => Self::FetchCo,
            "list" => Self::List,
            "find-latest" => Self::FindLatest,
            "summary" => Self::Summary,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Init => "init",
            Self::Clone => "clone",
            Self::AddNPush => "add-n-push",
            Self::FetchCo => "fetch-co",
            Self::List => "list",
            Self::FindLatest => "find-latest",
            Self::Summary => "summary",
            Self::Other(id) => id,
        }
    }

    /// One-line description shown next to the command in the demo
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Init => "Initialize a new artifact repository",
            Self::Clone => "Clone an existing artifact repository",
            Self::AddNPush => "Add, commit, tag and push artifacts",
            Self::FetchCo => "Fetch a tag and check it out",
            Self::List => "List tags matching a glob",
            Self::FindLatest => "Find the latest tag matching a glob",
            Self::Summary => "Summarize tags by prefix",
            Self::Other(_) => "Custom command",
        }
    }

    /// Parameters this command accepts, in form order
    pub fn params(&self) -> &'static [ParamSpec] {
        match self {
            Self::Init => INIT_PARAMS,
            Self::Clone => CLONE_PARAMS,
            Self::AddNPush => ADD_N_PUSH_PARAMS,
            Self::FetchCo => FETCH_CO_PARAMS,
            Self::List | Self::FindLatest => GLOB_PARAMS,
            Self::Summary => SUMMARY_PARAMS,
            Self::Other(_) => &[],
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Named command parameters. Declaration order is flag order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamName {
    Url,
    Path,
    Branch,
    Tag,
    Glob,
    Delimiter,
}

impl ParamName {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "url" => Some(Self::Url),
            "path" => Some(Self::Path),
            "branch" => Some(Self::Branch),
            "tag" => Some(Self::Tag),
            "glob" => Some(Self::Glob),
            "delimiter" => Some(Self::Delimiter),
            _ => None,
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Path => "path",
            Self::Branch => "branch",
            Self::Tag => "tag",
            Self::Glob => "glob",
            Self::Delimiter => "delimiter",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Url => "Remote URL",
            Self::Path => "Local path",
            Self::Branch => "Branch",
            Self::Tag => "Tag",
            Self::Glob => "Glob pattern",
            Self::Delimiter => "Delimiter",
        }
    }

    pub fn missing_message(self) -> String {
        format!("{} is required", self.label())
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// Constraint on a single parameter of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: ParamName,
    pub required: bool,
}

const fn required(name: ParamName) -> ParamSpec {
    ParamSpec { name, required: true }
}

const fn optional(name: ParamName) -> ParamSpec {
    ParamSpec { name, required: false }
}

const INIT_PARAMS: &[ParamSpec] = &[
    required(ParamName::Url),
    optional(ParamName::Path),
    optional(ParamName::Branch),
];
const CLONE_PARAMS: &[ParamSpec] = &[required(ParamName::Url), optional(ParamName::Path)];
const ADD_N_PUSH_PARAMS: &[ParamSpec] = &[required(ParamName::Tag), optional(ParamName::Branch)];
const FETCH_CO_PARAMS: &[ParamSpec] = &[required(ParamName::Tag)];
const GLOB_PARAMS: &[ParamSpec] = &[optional(ParamName::Glob)];
const SUMMARY_PARAMS: &[ParamSpec] = &[optional(ParamName::Delimiter)];

/// Parameter values projected onto one command's parameter set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    values: BTreeMap<ParamName, String>,
}

impl Parameters {
    /// Keep only the values `kind` accepts; unrelated keys are dropped
    pub fn project(kind: &CommandKind, raw: &HashMap<String, String>) -> Self {
        let values = kind
            .params()
            .iter()
            .filter_map(|spec| {
                raw.get(spec.name.flag())
                    .map(|value| (spec.name, value.clone()))
            })
            .collect();
        Self { values }
    }

    pub fn with(mut self, name: ParamName, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    /// The value of `name`, treating an empty string as absent
    pub fn get(&self, name: ParamName) -> Option<&str> {
        self.values
            .get(&name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    fn get_or<'a>(&'a self, name: ParamName, fallback: &'a str) -> &'a str {
        self.get(name).unwrap_or(fallback)
    }

    fn raw(&self, name: ParamName) -> &str {
        self.values.get(&name).map(String::as_str).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamName, &str)> {
        self.values.iter().map(|(name, value)| (*name, value.as_str()))
    }
}

/// Collect every missing required parameter of `kind`
pub fn validate(kind: &CommandKind, params: &Parameters) -> Result<(), ValidationErrors> {
    let errors: Vec<CoreError> = kind
        .params()
        .iter()
        .filter(|spec| spec.required && params.get(spec.name).is_none())
        .map(|spec| CoreError::MissingRequiredParameter { parameter: spec.name })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Render the command line the demo pretends to run
pub fn render_invocation(kind: &CommandKind, params: &Parameters) -> String {
    let mut command = format!("{} {}", COMMAND_PREFIX, kind.id());
    if !kind.is_known() {
        return command;
    }

    for (name, value) in params.iter() {
        if value.is_empty() {
            continue;
        }
        if name == ParamName::Delimiter && value == DEFAULT_DELIMITER {
            continue;
        }
        command.push_str(&format!(" --{}=\"{}\"", name.flag(), value));
    }
    command
}

/// The canned output printed once a simulated command "finishes".
///
/// Every line but the first is returned without a timestamp; the caller
/// prefixes the first line. The transcript ends with a blank line.
pub fn transcript(kind: &CommandKind, params: &Parameters) -> Vec<String> {
    let mut lines = match kind {
        CommandKind::Init => vec![
            "Repository initialized successfully!".to_string(),
            format!("Directory: {}", params.get_or(ParamName::Path, "my-artifact-repo")),
            format!("Remote: {}", params.raw(ParamName::Url)),
            format!("Branch: {}", params.get_or(ParamName::Branch, "main")),
            "Ready to receive artifacts...".to_string(),
        ],
        CommandKind::Clone => vec![
            "Cloning repository...".to_string(),
            format!("Cloning into '{}'...", params.get_or(ParamName::Path, "repository")),
            "Repository cloned successfully!".to_string(),
            "Ready to receive artifacts...".to_string(),
        ],
        CommandKind::AddNPush => vec![
            "Adding artifacts...".to_string(),
            "Committing artifacts...".to_string(),
            format!("Tagging with: {}", params.raw(ParamName::Tag)),
            "Pushing tag to remote...".to_string(),
            "All good.. get back to clear state for next artifact...".to_string(),
        ],
        CommandKind::FetchCo => {
            let tag = params.raw(ParamName::Tag);
            vec![
                format!("Fetching tag: {}", tag),
                "Checking out tag in detached HEAD...".to_string(),
                format!("* {} (tag: {})", tag, tag),
            ]
        }
        CommandKind::List => {
            let glob = params.raw(ParamName::Glob);
            let mut lines = vec![format!("Tags matching pattern '{}':", glob)];
            lines.extend(SAMPLE_TAGS.iter().map(|tag| tag.to_string()));
            lines.push(String::new());
            lines.push(format!("Tags found: {} : {}", glob, SAMPLE_TAGS.len()));
            lines
        }
        CommandKind::FindLatest => vec![
            format!("Finding latest tag matching '{}':", params.raw(ParamName::Glob)),
            "v2.1.3".to_string(),
        ],
        CommandKind::Summary => vec![
            format!("Summary using delimiter: {}", params.raw(ParamName::Delimiter)),
            "------------------------".to_string(),
            "v1 : 3".to_string(),
            "v2 : 5".to_string(),
            "dev : 2".to_string(),
        ],
        CommandKind::Other(id) => vec![format!("Command '{}' executed successfully!", id)],
    };
    lines.push(String::new());
    lines
}
