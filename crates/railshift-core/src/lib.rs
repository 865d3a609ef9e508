use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod inflect;
pub mod subst;

pub use subst::{ContentPreview, Substitution};

use inflect::{to_plural, to_singular, to_slug};

#[derive(thiserror::Error, Debug)]
pub enum RenameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing source file: {path}")]
    MissingSource { path: PathBuf },
    #[error("malformed identifier: '{identifier}'")]
    MalformedIdentifier { identifier: String },
}

/// What a rename targets, decided purely from the shape of the old
/// identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameKind {
    Model,
    Controller,
    ControllerAction,
}

impl RenameKind {
    /// `Controller` in the name makes it a controller-family rename, a
    /// dot on top of that makes it an action rename, anything else is a
    /// model. There are no other signals; malformed names flow into
    /// whichever branch matches and fail downstream.
    pub fn classify(from: &str) -> Self {
        if from.contains("Controller") {
            if from.contains('.') {
                RenameKind::ControllerAction
            } else {
                RenameKind::Controller
            }
        } else {
            RenameKind::Model
        }
    }
}

/// A controller identifier with its conventional suffix removed, denoting
/// the resource it manages.
pub fn resource_name(controller: &str) -> String {
    controller
        .strip_suffix("Controller")
        .unwrap_or(controller)
        .to_string()
}

#[derive(Debug, Default)]
pub struct RenameOutcome {
    pub files_moved: usize,
    pub files_edited: usize,
    pub dirs_renamed: usize,
    /// Populated on dry runs only, so callers can render what would have
    /// changed.
    pub previews: Vec<ContentPreview>,
}

/// One rename invocation: an old/new identifier pair applied to a project
/// root. Constructed once, driven to completion by [`Renamer::run`], then
/// discarded.
pub struct Renamer {
    root: PathBuf,
    from: String,
    to: String,
    dry_run: bool,
}

/// Classify and execute a rename against `root`.
pub fn rename(root: &Path, from: &str, to: &str, dry_run: bool) -> Result<RenameOutcome> {
    Renamer::new(root, from, to, dry_run).run()
}

impl Renamer {
    pub fn new(
        root: impl Into<PathBuf>,
        from: impl Into<String>,
        to: impl Into<String>,
        dry_run: bool,
    ) -> Self {
        Self {
            root: root.into(),
            from: from.into(),
            to: to.into(),
            dry_run,
        }
    }

    pub fn run(&self) -> Result<RenameOutcome> {
        let kind = RenameKind::classify(&self.from);
        info!("Renaming '{}' -> '{}' ({:?})", self.from, self.to, kind);

        let outcome = match kind {
            RenameKind::Model => self.rename_model(),
            RenameKind::Controller => self.rename_controller(),
            RenameKind::ControllerAction => self.rename_controller_action(),
        }?;

        info!(
            "Rename complete: {} files moved, {} files edited, {} directories renamed",
            outcome.files_moved, outcome.files_edited, outcome.dirs_renamed
        );

        Ok(outcome)
    }

    /// Rename a model: its source file plus whatever spec, test, and
    /// fixture files exist for it.
    pub fn rename_model(&self) -> Result<RenameOutcome> {
        let mut outcome = RenameOutcome::default();
        let from_slug = to_slug(&self.from);
        let to_slug_ = to_slug(&self.to);
        let plan = vec![Substitution::new(&self.from, &self.to)];

        self.move_and_substitute(
            &self.root.join("app/models").join(format!("{from_slug}.rb")),
            &self.root.join("app/models").join(format!("{to_slug_}.rb")),
            &plan,
            &mut outcome,
        )?;

        self.move_and_substitute_optional(
            &self
                .root
                .join("spec/models")
                .join(format!("{from_slug}_spec.rb")),
            &self
                .root
                .join("spec/models")
                .join(format!("{to_slug_}_spec.rb")),
            &plan,
            &mut outcome,
        )?;

        self.move_and_substitute_optional(
            &self
                .root
                .join("test/models")
                .join(format!("{from_slug}_test.rb")),
            &self
                .root
                .join("test/models")
                .join(format!("{to_slug_}_test.rb")),
            &plan,
            &mut outcome,
        )?;

        // Fixture data is keyed by the pluralized slug and moved as-is;
        // its contents are not assumed to name the model.
        let fixture_from = self
            .root
            .join("test/fixtures")
            .join(format!("{}.yml", to_plural(&from_slug)));
        if fixture_from.exists() {
            let fixture_to = self
                .root
                .join("test/fixtures")
                .join(format!("{}.yml", to_plural(&to_slug_)));
            subst::move_path(&fixture_from, &fixture_to, self.dry_run)?;
            outcome.files_moved += 1;
        } else {
            debug!("Skipping missing fixture: {:?}", fixture_from);
        }

        Ok(outcome)
    }

    /// Rename a controller and every artifact that names its resource:
    /// spec, test, views directory, helper, and the route file.
    pub fn rename_controller(&self) -> Result<RenameOutcome> {
        let mut outcome = RenameOutcome::default();
        let from_slug = to_slug(&self.from);
        let to_slug_ = to_slug(&self.to);
        let from_resource = resource_name(&self.from);
        let to_resource = resource_name(&self.to);
        let from_resource_slug = to_slug(&from_resource);
        let to_resource_slug = to_slug(&to_resource);

        // Fixed substitution order: exact identifier, resource slug,
        // singular resource slug, singular resource name. Later passes
        // operate on the output of earlier ones.
        let full_plan = vec![
            Substitution::new(&self.from, &self.to),
            Substitution::new(&from_resource_slug, &to_resource_slug),
            Substitution::new(
                to_singular(&from_resource_slug),
                to_singular(&to_resource_slug),
            ),
            Substitution::new(to_singular(&from_resource), to_singular(&to_resource)),
        ];

        self.move_and_substitute(
            &self
                .root
                .join("app/controllers")
                .join(format!("{from_slug}.rb")),
            &self
                .root
                .join("app/controllers")
                .join(format!("{to_slug_}.rb")),
            &full_plan,
            &mut outcome,
        )?;

        let identifier_plan = vec![Substitution::new(&self.from, &self.to)];
        self.move_and_substitute_optional(
            &self
                .root
                .join("spec/controllers")
                .join(format!("{from_slug}_spec.rb")),
            &self
                .root
                .join("spec/controllers")
                .join(format!("{to_slug_}_spec.rb")),
            &identifier_plan,
            &mut outcome,
        )?;

        self.move_and_substitute_optional(
            &self
                .root
                .join("test/controllers")
                .join(format!("{from_slug}_test.rb")),
            &self
                .root
                .join("test/controllers")
                .join(format!("{to_slug_}_test.rb")),
            &full_plan,
            &mut outcome,
        )?;

        let views_from = self.root.join("app/views").join(&from_resource_slug);
        if views_from.is_dir() {
            let views_to = self.root.join("app/views").join(&to_resource_slug);
            subst::move_path(&views_from, &views_to, self.dry_run)?;
            outcome.dirs_renamed += 1;

            let view_plan = vec![
                Substitution::new(&from_resource_slug, &to_resource_slug),
                Substitution::new(
                    to_singular(&from_resource_slug),
                    to_singular(&to_resource_slug),
                ),
            ];
            // A dry run leaves the directory at its old path.
            let views_dir = if self.dry_run { &views_from } else { &views_to };
            for entry in fs::read_dir(views_dir)? {
                let path = entry?.path();
                if path.is_file() {
                    let preview = subst::replace_in_file(&path, &view_plan, self.dry_run)?;
                    self.record_edit(&mut outcome, preview);
                }
            }
        } else {
            debug!("Skipping missing views directory: {:?}", views_from);
        }

        let helper_plan = vec![Substitution::new(&from_resource, &to_resource)];
        self.move_and_substitute_optional(
            &self
                .root
                .join("app/helpers")
                .join(format!("{from_resource_slug}_helper.rb")),
            &self
                .root
                .join("app/helpers")
                .join(format!("{to_resource_slug}_helper.rb")),
            &helper_plan,
            &mut outcome,
        )?;

        // The route file is edited in place and assumed to exist.
        let route_plan = vec![Substitution::new(&from_resource_slug, &to_resource_slug)];
        let preview =
            subst::replace_in_file(&self.root.join("config/routes.rb"), &route_plan, self.dry_run)?;
        self.record_edit(&mut outcome, preview);

        Ok(outcome)
    }

    /// Rename one action inside a controller: the handler name in the
    /// controller source plus its view templates, leaving the controller
    /// itself untouched.
    pub fn rename_controller_action(&self) -> Result<RenameOutcome> {
        let mut outcome = RenameOutcome::default();
        let (controller, action) =
            self.from
                .split_once('.')
                .ok_or_else(|| RenameError::MalformedIdentifier {
                    identifier: self.from.clone(),
                })?;
        let resource_slug = to_slug(&resource_name(controller));

        let controller_path = self
            .root
            .join("app/controllers")
            .join(format!("{}.rb", to_slug(controller)));
        let plan = vec![Substitution::new(action, &self.to)];
        let preview = subst::replace_in_file(&controller_path, &plan, self.dry_run)?;
        self.record_edit(&mut outcome, preview);

        let views_dir = self.root.join("app/views").join(&resource_slug);
        if views_dir.is_dir() {
            for entry in fs::read_dir(&views_dir)? {
                let path = entry?.path();
                if !path.is_file() {
                    continue;
                }
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                // The base name is everything before the first dot, so a
                // multi-part extension like `html.erb` survives whole.
                let Some((base, extension)) = name.split_once('.') else {
                    continue;
                };
                if base == action {
                    let new_path = views_dir.join(format!("{}.{}", self.to, extension));
                    subst::move_path(&path, &new_path, self.dry_run)?;
                    outcome.files_moved += 1;
                }
            }
        } else {
            debug!("Skipping missing views directory: {:?}", views_dir);
        }

        Ok(outcome)
    }

    fn move_and_substitute(
        &self,
        from: &Path,
        to: &Path,
        plan: &[Substitution],
        outcome: &mut RenameOutcome,
    ) -> Result<()> {
        subst::move_path(from, to, self.dry_run)?;
        outcome.files_moved += 1;
        // A dry run leaves the file at its source path.
        let target = if self.dry_run { from } else { to };
        let preview = subst::replace_in_file(target, plan, self.dry_run)?;
        self.record_edit(outcome, preview);
        Ok(())
    }

    fn move_and_substitute_optional(
        &self,
        from: &Path,
        to: &Path,
        plan: &[Substitution],
        outcome: &mut RenameOutcome,
    ) -> Result<()> {
        if from.exists() {
            self.move_and_substitute(from, to, plan, outcome)
        } else {
            debug!("Skipping missing optional file: {:?}", from);
            Ok(())
        }
    }

    fn record_edit(&self, outcome: &mut RenameOutcome, preview: Option<ContentPreview>) {
        if let Some(preview) = preview {
            outcome.files_edited += 1;
            if self.dry_run {
                outcome.previews.push(preview);
            }
        }
    }
}
