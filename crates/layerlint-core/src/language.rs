//! Source-language detection from file extensions.

use std::path::Path;

/// Tag every file carries, matching rules with no explicit language tags.
pub const UNIVERSAL: &str = "universal";

/// Maps a filename to its language tags.
///
/// Every file gets the `universal` tag; known extensions add one specific
/// tag. Unknown extensions map to `universal` only.
#[must_use]
pub fn tags_for(filename: &Path) -> Vec<String> {
    let mut tags = vec![UNIVERSAL.to_string()];
    if let Some(tag) = detect(filename) {
        tags.insert(0, tag.to_string());
    }
    tags
}

/// Returns the specific language tag for a filename, if its extension is known.
#[must_use]
pub fn detect(filename: &Path) -> Option<&'static str> {
    let ext = filename.extension()?.to_str()?;
    match ext {
        "rb" | "rake" | "gemspec" => Some("ruby"),
        "rs" => Some("rust"),
        "js" | "jsx" | "mjs" => Some("javascript"),
        "ts" | "tsx" => Some("typescript"),
        "py" => Some("python"),
        "go" => Some("go"),
        "sh" | "bash" => Some("shell"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extension_gets_specific_and_universal_tags() {
        let tags = tags_for(Path::new("app/models/user.rb"));
        assert_eq!(tags, vec!["ruby".to_string(), "universal".to_string()]);
    }

    #[test]
    fn unknown_extension_is_universal_only() {
        let tags = tags_for(Path::new("notes.xyz"));
        assert_eq!(tags, vec!["universal".to_string()]);
    }

    #[test]
    fn no_extension_is_universal_only() {
        let tags = tags_for(Path::new("Rakefile2"));
        assert_eq!(tags, vec!["universal".to_string()]);
    }

    #[test]
    fn typescript_variants() {
        assert_eq!(detect(Path::new("a.ts")), Some("typescript"));
        assert_eq!(detect(Path::new("a.tsx")), Some("typescript"));
    }
}
