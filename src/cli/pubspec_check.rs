use std::path::PathBuf;

use repo_tools::runner::NullSink;
use repo_tools::{run_pubspec_check, DirectoryPackages, StdoutSink};

pub(crate) fn run(
    packages_dir: PathBuf,
    packages: Vec<String>,
    exclude: Vec<String>,
    format: super::Format,
) {
    let source = DirectoryPackages::new(packages_dir)
        .with_include(packages)
        .with_exclude(exclude);

    let result = match format {
        super::Format::Text => run_pubspec_check(&source, &mut StdoutSink),
        super::Format::Json => run_pubspec_check(&source, &mut NullSink),
    };
    let summary = match result {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let super::Format::Json = format {
        match serde_json::to_string_pretty(&summary.reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: cannot serialize results: {e}");
                std::process::exit(1);
            }
        }
    }

    std::process::exit(summary.exit_code());
}
