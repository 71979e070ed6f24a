//! Command implementations. Each one reports problems on stderr and exits
//! with status 1 on failure.

use std::path::{Path, PathBuf};

use efs_diagnostic::Diagnostic;
use efs_model::{ElementId, Model, ModelError, RefactorReport};
use tracing::debug;

/// Arguments shared by `rename` and `move`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefactorOptions {
    pub model: PathBuf,
    /// Full name of the element to refactor.
    pub element: String,
    /// New name for `rename`, full name of the new parent for `move`.
    pub target: String,
    /// Where to write the result; the input file when absent.
    pub output: Option<PathBuf>,
}

impl RefactorOptions {
    fn output(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.model)
    }
}

/// `<model> <element> <target> [-o <out>]`, with `-o` allowed anywhere.
pub fn parse_refactor_args(args: &[String]) -> Option<RefactorOptions> {
    let mut positional = Vec::new();
    let mut output = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "-o" || arg == "--output" {
            output = Some(PathBuf::from(iter.next()?));
        } else if let Some(path) = arg.strip_prefix("--output=") {
            output = Some(PathBuf::from(path));
        } else {
            positional.push(arg.as_str());
        }
    }

    let [model, element, target] = positional[..] else {
        return None;
    };
    Some(RefactorOptions {
        model: PathBuf::from(model),
        element: element.to_string(),
        target: target.to_string(),
        output,
    })
}

pub fn check_model(path: &str) {
    let mut model = load(Path::new(path));
    let errors = model.check();
    report_diagnostics(&model);
    if errors > 0 {
        eprintln!("{errors} error(s) in {path}");
        std::process::exit(1);
    }
    println!("{path}: ok");
}

pub fn rename_element(options: &RefactorOptions) {
    let mut model = load(&options.model);
    let element = find(&model, &options.element);
    model.compile();
    let report = model.rename(element, &options.target).unwrap_or_else(|err| fail(&err));
    finish(&model, options, report);
}

pub fn move_element(options: &RefactorOptions) {
    let mut model = load(&options.model);
    let element = find(&model, &options.element);
    let parent = if options.target == "." {
        model.root()
    } else {
        find(&model, &options.target)
    };
    model.compile();
    let report = model.move_to(element, parent).unwrap_or_else(|err| fail(&err));
    finish(&model, options, report);
}

fn finish(model: &Model, options: &RefactorOptions, report: RefactorReport) {
    report_diagnostics(model);
    let output = options.output();
    if let Err(err) = model.save(output) {
        eprintln!("error: cannot write '{}': {err}", output.display());
        std::process::exit(1);
    }
    println!(
        "{} expression(s) rewritten, {} rejected, {} unchanged; wrote {}",
        report.committed,
        report.rejected,
        report.unchanged,
        output.display()
    );
    if report.rejected > 0 {
        std::process::exit(1);
    }
}

fn load(path: &Path) -> Model {
    match Model::load(path) {
        Ok(model) => model,
        Err(err) => {
            eprintln!("error: cannot load '{}': {err}", path.display());
            std::process::exit(1);
        }
    }
}

fn find(model: &Model, full_name: &str) -> ElementId {
    model
        .find(full_name)
        .unwrap_or_else(|| fail(&ModelError::NotFound(full_name.to_string())))
}

fn fail(err: &ModelError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}

fn report_diagnostics(model: &Model) {
    for (id, diagnostics) in model.diagnostics() {
        let owner = model.full_name(id);
        for diagnostic in diagnostics {
            eprintln!("{}", render(&owner, diagnostic));
        }
    }
    debug!(errors = model.error_count(), "reported diagnostics");
}

fn render(owner: &str, diagnostic: &Diagnostic) -> String {
    format!("{owner}: {diagnostic}")
}
