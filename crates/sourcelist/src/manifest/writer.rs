//! CMake text emission.
//!
//! Output shape for one rule:
//!
//! ```text
//! set(IMAGES
//! 	content/a.png
//! 	content/sub/b.PNG
//! )
//! source_group("Images" FILES ${IMAGES})
//!
//! ```
//!
//! and, when an aggregate variable is configured, a trailing
//! `set(ALL_SOURCE_FILES ...)` of `${VAR}` references.

use std::io::{self, Write};

/// Writes manifest blocks to any [`Write`] sink.
pub struct ManifestWriter<W: Write> {
    out: W,
}

impl<W: Write> ManifestWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one `set(VAR ...)` block plus its optional `source_group`.
    ///
    /// The group directive is skipped for empty lists so CMake never sees a
    /// group over an empty variable.
    pub fn write_rule_block(
        &mut self,
        variable: &str,
        files: &[String],
        group: Option<&str>,
    ) -> io::Result<()> {
        writeln!(self.out, "set({}", variable)?;
        for file in files {
            writeln!(self.out, "\t{}", quote_argument(file))?;
        }
        writeln!(self.out, ")")?;

        if let Some(group) = group.filter(|g| !g.is_empty()) {
            if !files.is_empty() {
                writeln!(
                    self.out,
                    "source_group(\"{}\" FILES ${{{}}})",
                    escape_quoted(group),
                    variable
                )?;
            }
        }

        writeln!(self.out)
    }

    /// Write the umbrella list referencing every populated variable.
    pub fn write_aggregate(&mut self, name: &str, variables: &[String]) -> io::Result<()> {
        writeln!(self.out, "set({}", name)?;
        for variable in variables {
            writeln!(self.out, "\t${{{}}}", variable)?;
        }
        writeln!(self.out, ")")
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Quote a list element only when CMake would otherwise split or
/// reinterpret it.
fn quote_argument(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ';' | '"' | '(' | ')' | '#' | '$' | '\\'));
    if needs_quotes {
        format!("\"{}\"", escape_quoted(value))
    } else {
        value.to_string()
    }
}

/// Escape for a CMake quoted argument.
fn escape_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            ';' => escaped.push_str("\\;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut ManifestWriter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut writer = ManifestWriter::new(Vec::new());
        f(&mut writer).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn block_with_group() {
        let files = vec!["content/a.png".to_string(), "content/sub/b.PNG".to_string()];
        let text = render(|w| w.write_rule_block("IMAGES", &files, Some("Images")));
        assert_eq!(
            text,
            "set(IMAGES\n\tcontent/a.png\n\tcontent/sub/b.PNG\n)\n\
             source_group(\"Images\" FILES ${IMAGES})\n\n"
        );
    }

    #[test]
    fn block_without_group() {
        let files = vec!["src/main.cpp".to_string()];
        let text = render(|w| w.write_rule_block("SOURCE_FILES", &files, None));
        assert_eq!(text, "set(SOURCE_FILES\n\tsrc/main.cpp\n)\n\n");

        let text = render(|w| w.write_rule_block("SOURCE_FILES", &files, Some("")));
        assert!(!text.contains("source_group"));
    }

    #[test]
    fn empty_block_never_groups() {
        let text = render(|w| w.write_rule_block("CONTENT_FILES", &[], Some("Content Files")));
        assert_eq!(text, "set(CONTENT_FILES\n)\n\n");
    }

    #[test]
    fn aggregate_references_variables() {
        let vars = vec!["HEADER_FILES".to_string(), "SOURCE_FILES".to_string()];
        let text = render(|w| w.write_aggregate("ALL_SOURCE_FILES", &vars));
        assert_eq!(
            text,
            "set(ALL_SOURCE_FILES\n\t${HEADER_FILES}\n\t${SOURCE_FILES}\n)\n"
        );
    }

    #[test]
    fn paths_with_spaces_are_quoted() {
        assert_eq!(quote_argument("content/my file.png"), "\"content/my file.png\"");
        assert_eq!(quote_argument("content/a;b.png"), "\"content/a\\;b.png\"");
        assert_eq!(quote_argument("src/plain.cpp"), "src/plain.cpp");
    }

    #[test]
    fn variable_references_in_paths_are_escaped() {
        assert_eq!(quote_argument("content/${X}.png"), "\"content/\\${X}.png\"");

        let files = vec!["content/${X}.png".to_string()];
        let text = render(|w| w.write_rule_block("IMAGES", &files, None));
        assert_eq!(text, "set(IMAGES\n\t\"content/\\${X}.png\"\n)\n\n");
    }

    #[test]
    fn group_labels_are_escaped() {
        let files = vec!["a.txt".to_string()];
        let text = render(|w| w.write_rule_block("DOCS", &files, Some("Say \"hi\"")));
        assert!(text.contains("source_group(\"Say \\\"hi\\\"\" FILES ${DOCS})"));
    }
}
