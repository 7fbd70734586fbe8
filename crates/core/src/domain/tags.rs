/// Tags the sample repository pretends to hold
pub const SAMPLE_TAGS: [&str; 8] = [
    "v1.0",
    "v1.0/src",
    "v1.1",
    "v2.0",
    "v2.0/src",
    "v2.0/test",
    "v2.1.0",
    "v2.1.3",
];

/// Details shown for a tag in the tag browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDetail {
    pub commit: String,
    pub date: String,
    pub author: String,
    pub message: String,
    pub artifacts: Vec<String>,
}

struct TagRecord {
    name: &'static str,
    commit: &'static str,
    date: &'static str,
    author: &'static str,
    message: &'static str,
    artifacts: &'static [&'static str],
}

const TAG_TABLE: &[TagRecord] = &[
    TagRecord {
        name: "v1.0",
        commit: "1a2b3c4d",
        date: "2024-01-15",
        author: "John Doe",
        message: "Release version 1.0",
        artifacts: &["binary", "documentation"],
    },
    TagRecord {
        name: "v1.0/src",
        commit: "2b3c4d5e",
        date: "2024-01-15",
        author: "John Doe",
        message: "Source code for v1.0",
        artifacts: &["source files", "build scripts"],
    },
    TagRecord {
        name: "v2.0",
        commit: "3c4d5e6f",
        date: "2024-02-20",
        author: "Jane Smith",
        message: "Major release 2.0",
        artifacts: &["binary", "documentation", "tests"],
    },
];

impl TagRecord {
    fn detail(&self) -> TagDetail {
        TagDetail {
            commit: self.commit.to_string(),
            date: self.date.to_string(),
            author: self.author.to_string(),
            message: self.message.to_string(),
            artifacts: self.artifacts.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl TagDetail {
    /// Stand-in for tags the sample table does not know
    pub fn placeholder(tag_name: &str) -> Self {
        Self {
            commit: "abc123".to_string(),
            date: "2024-01-01".to_string(),
            author: "Developer".to_string(),
            message: format!("Tag {}", tag_name),
            artifacts: vec!["unknown".to_string()],
        }
    }
}

/// Look up the sample details of `tag_name`
pub fn lookup(tag_name: &str) -> TagDetail {
    TAG_TABLE
        .iter()
        .find(|record| record.name == tag_name)
        .map(TagRecord::detail)
        .unwrap_or_else(|| TagDetail::placeholder(tag_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_tag() {
        let detail = lookup("v1.0");
        assert_eq!(detail.commit, "1a2b3c4d");
        assert_eq!(detail.author, "John Doe");
        assert_eq!(detail.artifacts, vec!["binary", "documentation"]);
    }

    #[test]
    fn test_lookup_nested_tag() {
        assert_eq!(lookup("v1.0/src").message, "Source code for v1.0");
        assert_eq!(lookup("v2.0").artifacts.len(), 3);
    }

    #[test]
    fn test_lookup_unknown_tag_synthesizes_placeholder() {
        let detail = lookup("nonexistent-tag");
        assert_eq!(detail.commit, "abc123");
        assert_eq!(detail.date, "2024-01-01");
        assert_eq!(detail.author, "Developer");
        assert_eq!(detail.message, "Tag nonexistent-tag");
        assert_eq!(detail.artifacts, vec!["unknown"]);
    }

    #[test]
    fn test_sample_tags_without_table_entry_fall_back() {
        assert_eq!(lookup("v2.1.3"), TagDetail::placeholder("v2.1.3"));
    }
}
