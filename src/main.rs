//! AST bridge debug tool entry point.

mod cli;

use std::path::{Path, PathBuf};

use astbridge::{BuildSession, PhaseOutcome, SourceUnitDeclaration, UnitHooks};
use astbridge_core::BridgeOptions;
use astbridge_source::RecordedFrontEnd;
use clap::Parser;
use cli::{Cli, Command, Stage};
use derive_more::{Display, Error};
use serde::de::DeserializeOwned;
use tracing::Level;

#[derive(Debug, Display, Error)]
enum DumpError {
    #[display("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("cannot render declaration tree: {_0}")]
    Render(serde_json::Error),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .try_init();

    match cli.command {
        Command::Dump {
            fixture,
            options,
            stage,
        } => {
            if let Err(e) = dump(&fixture, options.as_deref(), stage) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DumpError> {
    let text = std::fs::read_to_string(path).map_err(|source| DumpError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DumpError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn dump(fixture: &Path, options: Option<&Path>, stage: Stage) -> Result<(), DumpError> {
    let front_end: RecordedFrontEnd = read_json(fixture)?;
    let options: BridgeOptions = match options {
        Some(path) => read_json(path)?,
        None => BridgeOptions::default(),
    };

    let files: Vec<_> = front_end
        .units
        .iter()
        .map(|unit| (unit.module.id, unit.path.clone(), unit.text.clone()))
        .collect();
    let mut session = BuildSession::new(front_end, options);

    let mut units = Vec::new();
    for (module, path, text) in files {
        match session.open_unit(module, &path, text) {
            Ok(unit) => units.push(UnitReport::new(path, unit)),
            Err(e) => eprintln!("Skipping {}: {e}", path.display()),
        }
    }

    for report in &mut units {
        let outcome = report.unit.populate(&mut session);
        report.outcomes.push(("populate", outcome));
    }
    if stage >= Stage::Resolve {
        for report in &mut units {
            report.unit.build_scope(&mut session);
        }
        for report in &mut units {
            let outcome = report.unit.resolve(&mut session);
            report.outcomes.push(("resolve", outcome));
        }
    }
    if stage >= Stage::Analyse {
        for report in &mut units {
            let outcome = report.unit.analyse_code(&mut session);
            report.outcomes.push(("analyse", outcome));
        }
    }
    if stage >= Stage::Generate {
        for report in &mut units {
            let outcome = report.unit.generate_code(&mut session);
            report.outcomes.push(("generate", outcome));
        }
    }

    for report in &units {
        report.print()?;
    }
    Ok(())
}

struct UnitReport {
    path: PathBuf,
    unit: SourceUnitDeclaration,
    outcomes: Vec<(&'static str, PhaseOutcome)>,
}

impl UnitReport {
    fn new(path: PathBuf, unit: SourceUnitDeclaration) -> Self {
        Self {
            path,
            unit,
            outcomes: Vec::new(),
        }
    }

    fn print(&self) -> Result<(), DumpError> {
        println!("=== {} ===", self.path.display());
        for (stage, outcome) in &self.outcomes {
            println!("{stage}: {outcome:?}");
        }

        let tree = serde_json::to_string_pretty(self.unit.tree()).map_err(DumpError::Render)?;
        println!("{tree}");

        let result = self.unit.reporter();
        println!("Diagnostics ({} total):", result.diagnostics.len());
        for diagnostic in &result.diagnostics {
            println!("  {diagnostic}");
        }
        println!("Tasks ({} total):", result.tasks.len());
        for task in &result.tasks {
            println!("  {task}");
        }
        println!("Class files ({} total):", result.class_files.len());
        for class_file in &result.class_files {
            println!(
                "  {} -> {} ({} bytes)",
                class_file.path,
                class_file.binding,
                class_file.bytes.len()
            );
        }
        println!();
        Ok(())
    }
}
