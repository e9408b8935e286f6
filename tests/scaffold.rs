use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use stencil::defaults::Defaults;
use stencil::prompt::PromptEngine;
use stencil::scaffold::{self, PresetPrompter, Prompter, ScaffoldRequest};
use tempfile::TempDir;

/// Answers from a list; `None` cancels. Records every question asked.
struct Answers {
    template: Option<String>,
    values: Vec<Option<String>>,
    asked: Vec<(String, String)>,
}

impl Answers {
    fn new(template: &str, values: &[Option<&str>]) -> Self {
        Self {
            template: Some(template.to_string()),
            values: values.iter().map(|v| v.map(str::to_string)).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for Answers {
    fn select_template(&mut self, _choices: &[String]) -> stencil::Result<Option<String>> {
        Ok(self.template.clone())
    }

    fn value(
        &mut self,
        variable: &str,
        _tokens: &BTreeSet<String>,
        default: &str,
    ) -> stencil::Result<Option<String>> {
        self.asked.push((variable.to_string(), default.to_string()));
        Ok(self.values.remove(0))
    }
}

fn write(base: &Path, rel: &str, content: &[u8]) {
    let path = base.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn mkdir(base: &Path, rel: &str) {
    fs::create_dir_all(base.join(rel)).unwrap();
}

fn request(project: &Path, destination: PathBuf) -> ScaffoldRequest {
    ScaffoldRequest {
        destination,
        project_root: project.to_path_buf(),
        template_roots: Vec::new(),
        defaults: Defaults::default(),
    }
}

/// Every file under `root`, relative, sorted.
fn tree(root: &Path) -> Vec<String> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap().flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(base, &path, out);
            } else {
                out.push(
                    path.strip_prefix(base)
                        .unwrap()
                        .to_string_lossy()
                        .replace('\\', "/"),
                );
            }
        }
    }
    let mut out = Vec::new();
    if root.exists() {
        walk(root, root, &mut out);
    }
    out.sort();
    out
}

#[test]
fn renders_each_token_in_its_own_case() {
    let project = TempDir::new().unwrap();
    write(
        project.path(),
        ".templates/ts/__name__.ts",
        b"class __NameCase__ {}",
    );
    let dest = project.path().join("out");

    let mut answers = Answers::new("ts", &[Some("my thing")]);
    scaffold::run(&request(project.path(), dest.clone()), &mut answers).unwrap();

    assert_eq!(tree(&dest), vec!["mything.ts"]);
    assert_eq!(
        fs::read_to_string(dest.join("mything.ts")).unwrap(),
        "class MyThing {}"
    );
}

#[test]
fn one_prompt_per_logical_variable_with_destination_default() {
    let project = TempDir::new().unwrap();
    write(
        project.path(),
        ".templates/svc/__service-name__/__SERVICENAME__.env",
        b"__serviceName__ __service_name__ __ServiceNameCase__ __owner__",
    );
    let dest = project.path().join("billing-api");

    let mut answers = Answers::new("svc", &[Some("Ada"), Some("order line")]);
    let report = scaffold::run(&request(project.path(), dest.clone()), &mut answers).unwrap();

    assert_eq!(
        answers.asked,
        vec![
            ("owner".to_string(), "billing-api".to_string()),
            ("servicename".to_string(), "billing-api".to_string()),
        ]
    );
    assert_eq!(tree(&dest), vec!["order-line/ORDERLINE.env"]);
    assert_eq!(
        fs::read_to_string(dest.join("order-line/ORDERLINE.env")).unwrap(),
        "orderLine order_line OrderLine ada"
    );
    assert_eq!(report.variables.len(), 2);
}

#[test]
fn template_without_placeholders_copies_byte_for_byte() {
    let project = TempDir::new().unwrap();
    let binary = [0u8, 1, 2, 0xff, 0xfe, b'\n'];
    write(project.path(), ".templates/plain/README.md", b"# Static\r\n");
    write(project.path(), ".templates/plain/assets/logo.bin", &binary);
    write(project.path(), ".templates/plain/nested/deep/a.txt", b"a");
    let dest = project.path().join("copy");

    let mut answers = Answers::new("plain", &[]);
    let report = scaffold::run(&request(project.path(), dest.clone()), &mut answers).unwrap();

    let source = project.path().join(".templates/plain");
    assert_eq!(tree(&dest), tree(&source));
    for rel in tree(&source) {
        assert_eq!(
            fs::read(dest.join(&rel)).unwrap(),
            fs::read(source.join(&rel)).unwrap(),
            "{} differs",
            rel
        );
    }
    assert!(answers.asked.is_empty());
    assert_eq!(report.warnings, vec!["no variables found in plain"]);
}

#[test]
fn hidden_fragment_is_spliced_and_its_tokens_prompted() {
    let project = TempDir::new().unwrap();
    write(project.path(), ".templates/app/src/main.rs", b"fn main() {}");
    mkdir(project.path(), ".templates/app/__INCLUDE__(common)");
    write(
        project.path(),
        ".templates/(common)/README.md",
        b"# __project_name__",
    );
    let dest = project.path().join("demo");

    let mut answers = Answers::new("app", &[Some("Cool Tool")]);
    let report = scaffold::run(&request(project.path(), dest.clone()), &mut answers).unwrap();

    assert_eq!(answers.asked[0].0, "projectname");
    assert_eq!(tree(&dest), vec!["README.md", "src/main.rs"]);
    assert_eq!(
        fs::read_to_string(dest.join("README.md")).unwrap(),
        "# cool_tool"
    );
    assert_eq!(report.materialized.includes_spliced, 1);
}

#[test]
fn include_from_configured_root_resolves_by_definition_name() {
    let project = TempDir::new().unwrap();
    let shared = TempDir::new().unwrap();
    mkdir(project.path(), ".templates/app/docs/__INCLUDE__(license-mit)");
    write(shared.path(), "license-mit/LICENSE", b"MIT __year__");
    write(shared.path(), "license-apache/LICENSE", b"Apache");

    let mut req = request(project.path(), project.path().join("out"));
    req.defaults.template_paths = vec![shared.path().display().to_string()];

    let mut answers = Answers::new("app", &[Some("2026")]);
    scaffold::run(&req, &mut answers).unwrap();

    assert_eq!(
        fs::read_to_string(project.path().join("out/docs/LICENSE")).unwrap(),
        "MIT 2026"
    );
}

#[test]
fn cyclic_includes_terminate_with_each_side_once() {
    let project = TempDir::new().unwrap();
    write(project.path(), ".templates/a/a.txt", b"A __x__");
    mkdir(project.path(), ".templates/a/__INCLUDE__(b)");
    write(project.path(), ".templates/b/b.txt", b"B __y__");
    mkdir(project.path(), ".templates/b/__INCLUDE__(a)");
    let dest = project.path().join("out");

    let mut answers = Answers::new("a", &[Some("1"), Some("2")]);
    let report = scaffold::run(&request(project.path(), dest.clone()), &mut answers).unwrap();

    assert_eq!(tree(&dest), vec!["a.txt", "b.txt"]);
    assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "A 1");
    assert_eq!(fs::read_to_string(dest.join("b.txt")).unwrap(), "B 2");
    assert_eq!(report.warnings, vec!["include cycle: a (skipped)"]);
}

#[test]
fn unresolved_include_is_skipped_with_warning() {
    let project = TempDir::new().unwrap();
    write(project.path(), ".templates/app/keep.txt", b"kept");
    mkdir(project.path(), ".templates/app/__INCLUDE__(nowhere)");
    let dest = project.path().join("out");

    let mut answers = Answers::new("app", &[]);
    let report = scaffold::run(&request(project.path(), dest.clone()), &mut answers).unwrap();

    assert_eq!(tree(&dest), vec!["keep.txt"]);
    assert!(report
        .warnings
        .contains(&"include not found: nowhere (skipped)".to_string()));
}

#[test]
fn cancelling_a_value_prompt_writes_nothing() {
    let project = TempDir::new().unwrap();
    write(project.path(), ".templates/ts/__a__.ts", b"__b__");
    let dest = project.path().join("out");

    let mut answers = Answers::new("ts", &[Some("first"), None]);
    let err = scaffold::run(&request(project.path(), dest.clone()), &mut answers).unwrap_err();

    assert_eq!(err.code.as_str(), "scaffold.cancelled");
    assert_eq!(err.details["stage"], "value:b");
    assert!(!dest.exists());
}

#[test]
fn end_of_input_on_interactive_prompt_cancels() {
    let project = TempDir::new().unwrap();
    write(project.path(), ".templates/ts/__a__.ts", b"");
    let dest = project.path().join("out");

    let engine = PromptEngine::with_io(std::io::Cursor::new("1\n".to_string()), std::io::sink());
    let mut prompter = PresetPrompter::new(None, Vec::new(), engine);
    let err = scaffold::run(&request(project.path(), dest.clone()), &mut prompter).unwrap_err();

    assert_eq!(err.code.as_str(), "scaffold.cancelled");
    assert!(!dest.exists());
}

#[test]
fn presets_and_non_interactive_defaults() {
    let project = TempDir::new().unwrap();
    write(
        project.path(),
        ".templates/lib/__crate_name__/__Module__.txt",
        b"__crate-name__",
    );
    let dest = project.path().join("my widget");

    let mut prompter = PresetPrompter::new(
        Some("lib".to_string()),
        vec![("module".to_string(), "http client".to_string())],
        PromptEngine::non_interactive(),
    );
    scaffold::run(&request(project.path(), dest.clone()), &mut prompter).unwrap();

    assert_eq!(tree(&dest), vec!["my_widget/HttpClient.txt"]);
    assert_eq!(
        fs::read_to_string(dest.join("my_widget/HttpClient.txt")).unwrap(),
        "my-widget"
    );
}

#[test]
fn cli_roots_take_precedence_over_project_templates() {
    let project = TempDir::new().unwrap();
    let override_root = TempDir::new().unwrap();
    write(project.path(), ".templates/app/from.txt", b"project");
    write(override_root.path(), "app/from.txt", b"cli");

    let mut req = request(project.path(), project.path().join("out"));
    req.template_roots = vec![override_root.path().to_path_buf()];

    let mut answers = Answers::new("app", &[]);
    scaffold::run(&req, &mut answers).unwrap();

    assert_eq!(
        fs::read_to_string(project.path().join("out/from.txt")).unwrap(),
        "cli"
    );
}

#[test]
fn existing_destination_directory_is_filled() {
    let project = TempDir::new().unwrap();
    write(project.path(), ".templates/app/new.txt", b"new");
    write(project.path(), "out/old.txt", b"old");
    let dest = project.path().join("out");

    let mut answers = Answers::new("app", &[]);
    scaffold::run(&request(project.path(), dest.clone()), &mut answers).unwrap();

    assert_eq!(tree(&dest), vec!["new.txt", "old.txt"]);
}

#[test]
fn value_with_path_separators_stays_inside_destination() {
    let project = TempDir::new().unwrap();
    write(project.path(), ".templates/ts/__name__.txt", b"hi __name__");
    write(project.path(), ".templates/ts/keep.txt", b"kept");
    let dest = project.path().join("out");

    let mut answers = Answers::new("ts", &[Some("../escape/evil")]);
    let report = scaffold::run(&request(project.path(), dest.clone()), &mut answers).unwrap();

    assert_eq!(tree(&dest), vec!["keep.txt"]);
    assert!(!project.path().join("escape").exists());
    assert!(report
        .warnings
        .iter()
        .any(|w| w.starts_with("unsafe name after substitution")));
}

#[test]
fn destination_inside_template_is_rejected_before_prompting() {
    let project = TempDir::new().unwrap();
    write(project.path(), ".templates/ts/__name__.ts", b"x");
    let dest = project.path().join(".templates/ts/out");

    let mut answers = Answers::new("ts", &[Some("widget")]);
    let err = scaffold::run(&request(project.path(), dest.clone()), &mut answers).unwrap_err();

    assert_eq!(err.code.as_str(), "destination.invalid");
    assert!(answers.asked.is_empty());
    assert!(!dest.exists());
    assert_eq!(tree(&project.path().join(".templates/ts")), vec!["__name__.ts"]);
}
