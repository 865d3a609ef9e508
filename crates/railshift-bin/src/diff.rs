use anyhow::Result;
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;
use std::path::Path;

/// Render a colored line diff of a planned content change.
pub fn render_content_diff(path: &Path, old_content: &str, new_content: &str) -> Result<String> {
    let mut output = String::new();
    writeln!(output, "\n📝 {}", path.display())?;

    let diff = TextDiff::from_lines(old_content, new_content);

    for (i, group) in diff.grouped_ops(3).iter().enumerate() {
        if i > 0 {
            writeln!(output, "{:-^1$}", "", 40)?;
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, style) = match change.tag() {
                    ChangeTag::Delete => ("- ", "\x1b[31m"), // Red
                    ChangeTag::Insert => ("+ ", "\x1b[32m"), // Green
                    ChangeTag::Equal => ("  ", "\x1b[0m"),   // Default
                };
                write!(output, "{}{}{}\x1b[0m", style, sign, change.value())?;
            }
        }
    }

    Ok(output)
}
