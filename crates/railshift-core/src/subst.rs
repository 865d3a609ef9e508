use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::RenameError;

/// A single literal find/replace pair.
#[derive(Debug, Clone)]
pub struct Substitution {
    pub find: String,
    pub replace: String,
}

impl Substitution {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }

    /// Replace every non-overlapping occurrence of `find` in `content`.
    /// Returns `None` when nothing matched.
    pub fn apply(&self, content: &str) -> Option<String> {
        if content.contains(&self.find) {
            debug!(
                "Substitution '{}' -> '{}': {} occurrence(s)",
                self.find,
                self.replace,
                content.matches(&self.find).count()
            );
            Some(content.replace(&self.find, &self.replace))
        } else {
            None
        }
    }
}

/// The before/after content of one rewritten file, kept around so a dry
/// run can render what would have changed.
#[derive(Debug, Clone)]
pub struct ContentPreview {
    pub path: PathBuf,
    pub before: String,
    pub after: String,
}

/// Apply an ordered substitution plan to one string. Later passes operate
/// on the output of earlier ones; the order is part of the contract.
pub fn apply_all(content: &str, plan: &[Substitution]) -> Option<String> {
    let mut current = content.to_string();
    let mut changed = false;
    for substitution in plan {
        if let Some(next) = substitution.apply(&current) {
            current = next;
            changed = true;
        }
    }
    changed.then_some(current)
}

/// Rewrite a file in place by running `plan` over its full contents.
/// Returns the before/after pair when the content changed, `None` when no
/// pass matched.
pub fn replace_in_file(
    path: &Path,
    plan: &[Substitution],
    dry_run: bool,
) -> Result<Option<ContentPreview>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    match apply_all(&content, plan) {
        Some(new_content) => {
            if dry_run {
                info!("Would update contents of: {:?}", path);
            } else {
                info!("Updating contents of: {:?}", path);
                fs::write(path, &new_content)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            Ok(Some(ContentPreview {
                path: path.to_path_buf(),
                before: content,
                after: new_content,
            }))
        }
        None => {
            debug!("No substitutions matched in: {:?}", path);
            Ok(None)
        }
    }
}

/// Move a file or directory with a checked rename. A missing source is an
/// error, never a silent no-op.
pub fn move_path(from: &Path, to: &Path, dry_run: bool) -> Result<()> {
    if !from.exists() {
        return Err(RenameError::MissingSource {
            path: from.to_path_buf(),
        }
        .into());
    }

    if dry_run {
        info!("Would rename: {:?} -> {:?}", from, to);
        return Ok(());
    }

    info!("Renaming: {:?} -> {:?}", from, to);
    fs::rename(from, to)
        .with_context(|| format!("failed to rename {} -> {}", from.display(), to.display()))?;
    Ok(())
}
