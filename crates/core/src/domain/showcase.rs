/// A section of the showcase page, positioned in rows from the top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub top: usize,
    pub height: usize,
}

impl Section {
    pub fn contains(&self, row: usize) -> bool {
        row >= self.top && row < self.top + self.height
    }
}

/// Section the nav bar should highlight for the given scroll offset.
///
/// The checked row sits `lookahead` rows below the top of the viewport. When
/// sections overlap the last match wins.
pub fn active_section(sections: &[Section], scroll: usize, lookahead: usize) -> Option<&Section> {
    let row = scroll + lookahead;
    sections.iter().filter(|section| section.contains(row)).last()
}

/// Scroll offset that puts the top of `section` `offset` rows below the
/// viewport top
pub fn scroll_target(section: &Section, offset: usize) -> usize {
    section.top.saturating_sub(offset)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarStyle {
    Solid,
    Translucent,
}

impl NavbarStyle {
    pub fn for_scroll(scroll: usize, threshold: usize) -> Self {
        if scroll > threshold {
            Self::Translucent
        } else {
            Self::Solid
        }
    }
}

struct BuilderEntry {
    command: &'static str,
    base: &'static str,
    options: &'static [&'static str],
}

const BUILDER_TABLE: &[BuilderEntry] = &[
    BuilderEntry {
        command: "init",
        base: "git artifact init",
        options: &["--url", "--path", "--branch"],
    },
    BuilderEntry {
        command: "clone",
        base: "git artifact clone",
        options: &["--url", "--path"],
    },
    BuilderEntry {
        command: "add-n-push",
        base: "git artifact add-n-push",
        options: &["-t", "-b"],
    },
    BuilderEntry {
        command: "fetch-co",
        base: "git artifact fetch-co",
        options: &["-t"],
    },
    BuilderEntry {
        command: "fetch-co-latest",
        base: "git artifact fetch-co-latest",
        options: &["--regex"],
    },
    BuilderEntry {
        command: "find-latest",
        base: "git artifact find-latest",
        options: &["-r"],
    },
];

/// Builds example invocations for the showcase, keeping only options the
/// command actually supports
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandBuilder;

impl CommandBuilder {
    /// `None` for unknown commands. Options are appended in the order
    /// given; empty values and unsupported keys are skipped.
    pub fn build(&self, command: &str, options: &[(&str, &str)]) -> Option<String> {
        let entry = BUILDER_TABLE.iter().find(|entry| entry.command == command)?;
        let mut line = entry.base.to_string();
        for (key, value) in options {
            if !value.is_empty() && entry.options.contains(key) {
                line.push_str(&format!(" {}={}", key, value));
            }
        }
        Some(line)
    }
}
