//! Built-in rename scenarios, run against a generated fixture project.
//!
//! Each scenario gets a freshly generated sample app under the system temp
//! directory, so no state leaks from one scenario into the next.

use anyhow::Result;
use railshift_core::rename;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run_all(keep: bool) -> Result<bool> {
    let scenarios: [(&str, fn(&Path, &mut Checks)); 4] = [
        ("model rename", model_rename),
        ("controller rename", controller_rename),
        ("controller action rename", controller_action_rename),
        ("repeated rename fails", repeated_rename_fails),
    ];

    let mut all_passed = true;

    for (name, scenario) in scenarios {
        let root = fresh_fixture(name)?;
        info!("Running scenario '{}' in {:?}", name, root);

        let mut checks = Checks::default();
        scenario(&root, &mut checks);

        if checks.failures.is_empty() {
            println!("✅ {name}");
        } else {
            all_passed = false;
            println!("❌ {name}");
            for failure in &checks.failures {
                println!("   - {failure}");
            }
        }

        if keep {
            println!("   fixture kept at {}", root.display());
        } else {
            fs::remove_dir_all(&root)?;
        }
    }

    Ok(all_passed)
}

#[derive(Default)]
struct Checks {
    failures: Vec<String>,
}

impl Checks {
    fn check(&mut self, condition: bool, description: impl Into<String>) {
        if !condition {
            self.failures.push(description.into());
        }
    }

    fn check_exists(&mut self, root: &Path, relative: &str) {
        self.check(
            root.join(relative).exists(),
            format!("{relative} should exist"),
        );
    }

    fn check_absent(&mut self, root: &Path, relative: &str) {
        self.check(
            !root.join(relative).exists(),
            format!("{relative} should be gone"),
        );
    }

    fn check_file_changed(&mut self, root: &Path, relative: &str, from: &str, to: &str) {
        match fs::read_to_string(root.join(relative)) {
            Ok(contents) => {
                self.check(
                    contents.contains(to),
                    format!("{relative} should contain '{to}'"),
                );
                self.check(
                    !contents.contains(from),
                    format!("{relative} should no longer contain '{from}'"),
                );
            }
            Err(err) => self.failures.push(format!("{relative} could not be read: {err}")),
        }
    }
}

fn model_rename(root: &Path, checks: &mut Checks) {
    if let Err(err) = rename(root, "DummyModel", "NewModel", false) {
        checks.failures.push(format!("rename failed: {err:#}"));
        return;
    }

    checks.check_exists(root, "app/models/new_model.rb");
    checks.check_absent(root, "app/models/dummy_model.rb");
    checks.check_file_changed(root, "app/models/new_model.rb", "DummyModel", "NewModel");

    checks.check_exists(root, "spec/models/new_model_spec.rb");
    checks.check_absent(root, "spec/models/dummy_model_spec.rb");
    checks.check_file_changed(root, "spec/models/new_model_spec.rb", "DummyModel", "NewModel");

    checks.check_exists(root, "test/models/new_model_test.rb");
    checks.check_absent(root, "test/models/dummy_model_test.rb");
    checks.check_file_changed(root, "test/models/new_model_test.rb", "DummyModel", "NewModel");

    checks.check_exists(root, "test/fixtures/new_models.yml");
    checks.check_absent(root, "test/fixtures/dummy_models.yml");
}

fn controller_rename(root: &Path, checks: &mut Checks) {
    if let Err(err) = rename(root, "DummiesController", "HelloWorldsController", false) {
        checks.failures.push(format!("rename failed: {err:#}"));
        return;
    }

    checks.check_exists(root, "app/controllers/hello_worlds_controller.rb");
    checks.check_absent(root, "app/controllers/dummies_controller.rb");
    checks.check_file_changed(
        root,
        "app/controllers/hello_worlds_controller.rb",
        "DummiesController",
        "HelloWorldsController",
    );
    checks.check_file_changed(
        root,
        "app/controllers/hello_worlds_controller.rb",
        "dummies",
        "hello_worlds",
    );
    checks.check_file_changed(
        root,
        "app/controllers/hello_worlds_controller.rb",
        "dummy",
        "hello_world",
    );

    checks.check_exists(root, "app/views/hello_worlds/index.html.erb");
    checks.check_absent(root, "app/views/dummies/index.html.erb");
    checks.check_file_changed(
        root,
        "app/views/hello_worlds/index.html.erb",
        "dummy",
        "hello_worlds",
    );
    checks.check_exists(root, "app/views/hello_worlds/show.html.erb");
    checks.check_absent(root, "app/views/dummies/show.html.erb");
    checks.check_file_changed(
        root,
        "app/views/hello_worlds/show.html.erb",
        "dummy",
        "hello_world",
    );

    checks.check_file_changed(root, "config/routes.rb", "dummies", "hello_worlds");
    checks.check_file_changed(
        root,
        "app/helpers/hello_worlds_helper.rb",
        "DummiesHelper",
        "HelloWorldsHelper",
    );

    checks.check_exists(root, "spec/controllers/hello_worlds_controller_spec.rb");
    checks.check_absent(root, "spec/controllers/dummies_controller_spec.rb");
    checks.check_file_changed(
        root,
        "spec/controllers/hello_worlds_controller_spec.rb",
        "DummiesController",
        "HelloWorldsController",
    );

    checks.check_exists(root, "test/controllers/hello_worlds_controller_test.rb");
    checks.check_absent(root, "test/controllers/dummies_controller_test.rb");
    checks.check_file_changed(
        root,
        "test/controllers/hello_worlds_controller_test.rb",
        "DummiesController",
        "HelloWorldsController",
    );
}

fn controller_action_rename(root: &Path, checks: &mut Checks) {
    if let Err(err) = rename(root, "DummiesController.index", "new_action", false) {
        checks.failures.push(format!("rename failed: {err:#}"));
        return;
    }

    checks.check_file_changed(
        root,
        "app/controllers/dummies_controller.rb",
        "index",
        "new_action",
    );
    checks.check_exists(root, "app/views/dummies/new_action.html.erb");
    checks.check_absent(root, "app/views/dummies/index.html.erb");
}

fn repeated_rename_fails(root: &Path, checks: &mut Checks) {
    if let Err(err) = rename(root, "DummyModel", "NewModel", false) {
        checks.failures.push(format!("first rename failed: {err:#}"));
        return;
    }

    // The model file moved, so the same rename again must fail.
    checks.check(
        rename(root, "DummyModel", "NewModel", false).is_err(),
        "second identical rename should fail on the moved source file",
    );
}

/// Generate the sample app every scenario runs against: one model with
/// spec, test, and fixture files, and one controller with views, helper,
/// spec, test, and a route entry.
fn fresh_fixture(name: &str) -> Result<PathBuf> {
    let root = std::env::temp_dir().join(format!(
        "railshift_selftest_{}_{}",
        name.replace(' ', "_"),
        std::process::id()
    ));
    if root.exists() {
        fs::remove_dir_all(&root)?;
    }

    seed(
        &root,
        "app/models/dummy_model.rb",
        "class DummyModel < ActiveRecord::Base\nend\n",
    )?;
    seed(
        &root,
        "spec/models/dummy_model_spec.rb",
        "describe DummyModel do\nend\n",
    )?;
    seed(
        &root,
        "test/models/dummy_model_test.rb",
        "class DummyModelTest < ActiveSupport::TestCase\nend\n",
    )?;
    seed(
        &root,
        "test/fixtures/dummy_models.yml",
        "one:\n  name: first\ntwo:\n  name: second\n",
    )?;

    seed(
        &root,
        "app/controllers/dummies_controller.rb",
        "class DummiesController < ApplicationController\n  def index\n    @dummies = Dummy.all\n  end\n\n  def show\n    @dummy = Dummy.find(params[:id])\n  end\nend\n",
    )?;
    seed(
        &root,
        "app/views/dummies/index.html.erb",
        "<h1>Listing dummies</h1>\n<% @dummies.each do |dummy| %>\n  <p><%= dummy %></p>\n<% end %>\n",
    )?;
    seed(
        &root,
        "app/views/dummies/show.html.erb",
        "<p>Showing one dummy</p>\n",
    )?;
    seed(
        &root,
        "app/helpers/dummies_helper.rb",
        "module DummiesHelper\nend\n",
    )?;
    seed(
        &root,
        "spec/controllers/dummies_controller_spec.rb",
        "describe DummiesController do\nend\n",
    )?;
    seed(
        &root,
        "test/controllers/dummies_controller_test.rb",
        "class DummiesControllerTest < ActionDispatch::IntegrationTest\nend\n",
    )?;
    seed(
        &root,
        "config/routes.rb",
        "Rails.application.routes.draw do\n  resources :dummies\nend\n",
    )?;

    Ok(root)
}

fn seed(root: &Path, relative: &str, contents: &str) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_contains_the_sample_app() {
        let root = fresh_fixture("fixture_shape").unwrap();

        assert!(root.join("app/models/dummy_model.rb").exists());
        assert!(root.join("app/controllers/dummies_controller.rb").exists());
        assert!(root.join("app/views/dummies/index.html.erb").exists());
        assert!(root.join("config/routes.rb").exists());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn all_scenarios_pass_against_the_fixture() {
        let scenarios: [fn(&Path, &mut Checks); 4] = [
            model_rename,
            controller_rename,
            controller_action_rename,
            repeated_rename_fails,
        ];
        for scenario in scenarios {
            let root = fresh_fixture("scenarios_pass").unwrap();
            let mut checks = Checks::default();
            scenario(&root, &mut checks);
            assert!(checks.failures.is_empty(), "failures: {:?}", checks.failures);
            let _ = fs::remove_dir_all(&root);
        }
    }
}
