use std::{fs, path::Path};

use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};
use clap::Parser as _;
use sysexits::ExitCode;
use yansi::Color;

use z80asm::diagnostics::{CliError, ParseErrorMessage};

mod cli;
use cli::{Cli, Options};

const ERROR_COLOR: Color = Color::Red;
const ERROR_KIND: ReportKind = ReportKind::Custom("error", ERROR_COLOR);
const WARNING_COLOR: Color = Color::Yellow;
const WARNING_KIND: ReportKind = ReportKind::Custom("warning", WARNING_COLOR);

fn main() -> ExitCode {
    let Ok((options, path)) = Cli::parse().finish() else {
        return ExitCode::Usage;
    };

    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(source) => {
            let error = CliError::Input {
                path: path.display().to_string().into(),
                source,
            };
            eprintln!("error: {error}");
            return ExitCode::NoInput;
        }
    };

    let (_program, errors) = z80asm::parse_source(&source, 0);
    if errors.is_empty() {
        return ExitCode::Ok;
    }

    report_errors(&path, &source, &errors, &options);
    let nb_errors = errors.len();
    eprintln!(
        "{nb_errors} error{} generated.",
        if nb_errors == 1 { "" } else { "s" }
    );
    ExitCode::DataErr
}

fn report_errors(path: &Path, source: &str, errors: &[ParseErrorMessage], options: &Options) {
    let file_name = path.display().to_string();
    let nb_chars = source.chars().count();

    for error in errors.iter().take(options.max_errors) {
        // Token positions are character indices; highlight the character the
        // offending token starts at, or the end of input for a premature EOF.
        let start = error.position.min(nb_chars);
        let end = (error.position + 1).min(nb_chars).max(start);
        let span = (file_name.as_str(), start..end);

        let report = Report::build(ERROR_KIND, span.clone())
            .with_config(Config::default().with_index_type(IndexType::Char))
            .with_code(error.code.code())
            .with_message(&error.text)
            .with_label(Label::new(span).with_color(ERROR_COLOR))
            .finish();
        if report
            .eprint((file_name.as_str(), Source::from(source)))
            .is_err()
        {
            // The diagnostic stream is gone; the exit code still reports the failure.
            return;
        }
    }

    if errors.len() > options.max_errors {
        let span = (file_name.as_str(), 0..0);
        let _ = Report::build(WARNING_KIND, span)
            .with_config(Config::default().with_index_type(IndexType::Char))
            .with_message(format!(
                "Reached {} errors, any subsequent will not be printed",
                options.max_errors,
            ))
            .finish()
            .eprint((file_name.as_str(), Source::from(source)));
    }
}
