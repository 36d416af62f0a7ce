//! YAML frontmatter parsing and serialization.

use crate::error::{Result, TagError};
use crate::note::Frontmatter;
use serde_yaml::Value;
use std::path::Path;

/// Frontmatter extraction result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML string (without delimiters).
    pub yaml: Option<&'a str>,
    /// Everything after the closing `---` line, verbatim.
    pub body: &'a str,
}

/// Split content into frontmatter and body.
///
/// Frontmatter must open with a `---` line at the very start of the file and
/// close with the next line that is exactly `---`. Without a closing fence the
/// whole content is body.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let no_frontmatter = FrontmatterSplit {
        yaml: None,
        body: content,
    };

    let Some(after_open) = content.strip_prefix("---") else {
        return no_frontmatter;
    };

    // Skip the newline after the opening ---
    let yaml_start = if after_open.starts_with('\n') {
        4
    } else if after_open.starts_with("\r\n") {
        5
    } else {
        return no_frontmatter;
    };

    let mut line_start = yaml_start;
    loop {
        let line_end = content[line_start..].find('\n').map(|i| line_start + i);
        let line = &content[line_start..line_end.unwrap_or(content.len())];

        if line.trim_end_matches('\r') == "---" {
            let yaml = if line_start == yaml_start {
                ""
            } else {
                // Drop the newline that ends the last YAML line
                content[yaml_start..line_start - 1].trim_end_matches('\r')
            };
            let body = line_end.map(|end| &content[end + 1..]).unwrap_or("");
            return FrontmatterSplit {
                yaml: Some(yaml),
                body,
            };
        }

        match line_end {
            Some(end) => line_start = end + 1,
            None => return no_frontmatter,
        }
    }
}

/// Extract frontmatter as a raw YAML string.
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    split_frontmatter(content).yaml
}

/// Parse a raw YAML block into a frontmatter mapping.
///
/// An empty block or an explicit `null` is an empty mapping. Any other
/// non-mapping document is rejected.
pub fn parse_frontmatter(yaml: &str, path: &Path) -> Result<Frontmatter> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::new());
    }

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| TagError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Frontmatter::new()),
        _ => Err(TagError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message: "frontmatter is not a mapping".to_string(),
        }),
    }
}

/// Serialize a mapping back to a frontmatter block (with delimiters).
///
/// An empty mapping serializes to an empty string, i.e. no block at all.
pub fn serialize_frontmatter(frontmatter: &Frontmatter) -> Result<String> {
    if frontmatter.is_empty() {
        return Ok(String::new());
    }
    let yaml = serde_yaml::to_string(frontmatter)?;
    Ok(format!("---\n{}---\n", yaml))
}

/// Replace the frontmatter block of `content`, keeping the body byte for byte.
pub fn update_frontmatter(content: &str, frontmatter: &Frontmatter) -> Result<String> {
    let split = split_frontmatter(content);
    let fm_str = serialize_frontmatter(frontmatter)?;

    Ok(format!("{}{}", fm_str, split.body))
}
