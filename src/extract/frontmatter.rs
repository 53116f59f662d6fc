// README header block parsing
//
// READMEs open with a YAML block fenced by `---` lines:
//
//   ---
//   name: Storage Example
//   description: Persist settings with the storage API
//   ---

use crate::error::FrontmatterError;
use serde::Deserialize;

/// Marker line that opens and closes the header block
pub const DELIMITER: &str = "---";

/// Typed view of a README header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct RawFrontmatter {
    name: Option<String>,
    description: Option<String>,
}

/// Parse the header block at the top of `text`.
///
/// The first line must be the delimiter; everything up to the next delimiter
/// line is parsed as YAML. Keys other than `name` and `description` are
/// ignored.
pub fn parse_frontmatter(text: &str) -> Result<Frontmatter, FrontmatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));

    match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => {}
        _ => return Err(FrontmatterError::MissingDelimiter),
    }

    let mut header = Vec::new();
    let mut closed = false;
    for line in lines {
        if line.trim_end() == DELIMITER {
            closed = true;
            break;
        }
        header.push(line);
    }
    if !closed {
        return Err(FrontmatterError::Unterminated);
    }

    let header = header.join("\n");
    if header.trim().is_empty() {
        return Err(FrontmatterError::MissingName);
    }

    let raw: RawFrontmatter =
        serde_yaml::from_str(&header).map_err(|e| FrontmatterError::Yaml(e.to_string()))?;

    let name = raw.name.ok_or(FrontmatterError::MissingName)?;

    Ok(Frontmatter {
        name,
        description: raw.description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_description() {
        let readme = "---\nname: Storage\ndescription: Persist things\n---\n\n# Storage\n";
        let fm = parse_frontmatter(readme).unwrap();
        assert_eq!(fm.name, "Storage");
        assert_eq!(fm.description.as_deref(), Some("Persist things"));
    }

    #[test]
    fn test_description_optional() {
        let fm = parse_frontmatter("---\nname: Foo\n---\nbody").unwrap();
        assert_eq!(fm.name, "Foo");
        assert_eq!(fm.description, None);
    }

    #[test]
    fn test_crlf_and_extra_keys() {
        let readme = "---\r\nname: \"Quoted: name\"\r\ntags: [a, b]\r\n---\r\nbody";
        let fm = parse_frontmatter(readme).unwrap();
        assert_eq!(fm.name, "Quoted: name");
    }

    #[test]
    fn test_only_first_block_is_header() {
        let readme = "---\nname: First\n---\ntext\n---\nname: Second\n---\n";
        assert_eq!(parse_frontmatter(readme).unwrap().name, "First");
    }

    #[test]
    fn test_missing_delimiter() {
        assert_eq!(
            parse_frontmatter("# Title\n---\nname: x\n---\n"),
            Err(FrontmatterError::MissingDelimiter)
        );
        assert_eq!(parse_frontmatter(""), Err(FrontmatterError::MissingDelimiter));
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(
            parse_frontmatter("---\nname: Foo\n# body"),
            Err(FrontmatterError::Unterminated)
        );
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(
            parse_frontmatter("---\ndescription: nameless\n---\n"),
            Err(FrontmatterError::MissingName)
        );
        assert_eq!(
            parse_frontmatter("---\n---\n"),
            Err(FrontmatterError::MissingName)
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_frontmatter("---\nname: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }
}
