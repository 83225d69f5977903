use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use csvmap_ingest::ExportOptions;
use csvmap_model::{ConverterKind, DataFilter, FilterSide};
use csvmap_persistence::{ProfileStore, read_profile_document, write_profile_document};
use csvmap_transform::TransformOptions;
use tracing::info;

use csvmap_cli::pipeline::{Conversion, ConvertRequest, resolve_profile, run_conversion};

use crate::cli::{ConvertArgs, ProfileCommand};
use crate::summary::{apply_table_style, print_profile, print_profiles};

/// Rows shown when converting without an output file.
const DEFAULT_PREVIEW_ROWS: usize = 10;

/// A finished `convert` run and what to show for it.
pub struct ConvertOutcome {
    pub conversion: Conversion,
    pub output: Option<PathBuf>,
    pub preview_rows: usize,
    pub show_diagnostics: bool,
}

pub fn run_convert(args: &ConvertArgs, store_path: &Path) -> Result<ConvertOutcome> {
    let store = ProfileStore::open(store_path).context("open profile store")?;
    let profile = resolve_profile(&args.profile, &store)?;

    let mut options = TransformOptions::new();
    if args.diagnostics {
        options = options.with_diagnostics();
    }
    if let Some(seed) = args.seed {
        options = options.with_seed(seed);
    }
    let request = ConvertRequest::new(&args.input)
        .with_encoding(args.encoding)
        .with_filter(filter_from_args(args))
        .with_options(options);
    let conversion = run_conversion(&profile, request)?;

    if let Some(path) = &args.output {
        let export = if args.no_bom {
            ExportOptions::without_bom()
        } else {
            ExportOptions::default()
        };
        conversion.export(path, export)?;
    }

    let preview_rows = match (args.preview, &args.output) {
        (Some(rows), _) => rows,
        (None, Some(_)) => 0,
        (None, None) => DEFAULT_PREVIEW_ROWS,
    };
    Ok(ConvertOutcome {
        conversion,
        output: args.output.clone(),
        preview_rows,
        show_diagnostics: args.diagnostics,
    })
}

fn filter_from_args(args: &ConvertArgs) -> Option<DataFilter> {
    let (Some(column), Some(pattern)) = (&args.filter_column, &args.filter_pattern) else {
        return None;
    };
    let side = if args.filter_target {
        FilterSide::Target
    } else {
        FilterSide::Source
    };
    Some(DataFilter::new(side, column, pattern))
}

pub fn run_profile(command: &ProfileCommand, store_path: &Path) -> Result<()> {
    let mut store = ProfileStore::open(store_path).context("open profile store")?;
    match command {
        ProfileCommand::List => print_profiles(&store),
        ProfileCommand::Show { profile } => {
            let profile = store.resolve(profile)?;
            print_profile(profile, store.current_profile_id() == Some(profile.id.as_str()));
        }
        ProfileCommand::Export { profile, output } => {
            let profile = store.resolve(profile)?;
            let document = store.export_profile(&profile.id)?;
            let path = output
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("{}.json", document.name)));
            write_profile_document(&path, &document)?;
            println!("Exported '{}' to {}", document.name, path.display());
        }
        ProfileCommand::Import { file, overwrite } => {
            let document = read_profile_document(file)?;
            if !overwrite && store.find_by_name(&document.name).is_some() {
                bail!(
                    "a profile named '{}' already exists; pass --overwrite to replace it",
                    document.name
                );
            }
            let name = document.name.clone();
            let id = store.import_profile(document, *overwrite)?;
            store.save()?;
            println!("Imported '{name}' as {id}");
        }
        ProfileCommand::Delete { profile } => {
            let id = store.resolve(profile)?.id.clone();
            let removed = store.delete_profile(&id)?;
            store.save()?;
            println!("Deleted '{}'", removed.name);
        }
        ProfileCommand::Rename { profile, name } => {
            let id = store.resolve(profile)?.id.clone();
            store.rename_profile(&id, name)?;
            store.save()?;
            info!(profile = %id, "renamed profile");
            println!("Renamed {id} to '{}'", name.trim());
        }
    }
    Ok(())
}

pub fn run_converters() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Type", "Name", "Settings"]);
    apply_table_style(&mut table);
    for kind in ConverterKind::ALL {
        let fields = if kind.fields().is_empty() {
            "-".to_string()
        } else {
            kind.fields().join(", ")
        };
        table.add_row(vec![
            kind.tag().to_string(),
            kind.display_name().to_string(),
            fields,
        ]);
    }
    println!("{table}");
    Ok(())
}
