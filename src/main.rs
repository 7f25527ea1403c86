use miette::{miette, IntoDiagnostic, Result};
use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
};
use themepath::{
    cancel::Uncancellable,
    config::ResolverConfig,
    diagnostics::{emit_warning, QueryDiagnostic},
    service::{Resolution, ThemeService},
    span::Span,
    text::position_to_offset,
    theme::{flatten_with, ThemeTree},
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: themepath [--config <file>] <flatten|complete|hover|annotate> <theme.json> [source] [offset|line:col|start..end]";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(report) = run(args) {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

fn run(mut args: Vec<String>) -> Result<()> {
    let config_path = take_flag(&mut args, "--config")?;
    let (command, theme_path) = match args.as_slice() {
        [command, theme, ..] => (command.clone(), PathBuf::from(theme)),
        _ => return Err(miette!("{USAGE}")),
    };
    let config = load_config(config_path.as_deref(), &theme_path)?;
    let tree = ThemeTree::load(&theme_path)?;

    if command == "flatten" {
        let table = flatten_with(&tree, &config.callable_key)?;
        return print_json(&table);
    }

    let source_path = args
        .get(2)
        .map(PathBuf::from)
        .ok_or_else(|| miette!("{USAGE}"))?;
    let source = fs::read_to_string(&source_path).into_diagnostic()?;
    let name = source_path.display().to_string();

    let service = ThemeService::new(config);
    service.reload(&tree)?;

    match command.as_str() {
        "complete" => {
            let offset = parse_offset(&source, args.get(3))?;
            match service.complete(&source, offset, &Uncancellable) {
                Resolution::Found(ctx) => print_json(&ctx),
                _ => no_match(&name, &source, offset, "no theme accessor at this position"),
            }
        }
        "hover" => {
            let offset = parse_offset(&source, args.get(3))?;
            match service.hover(&source, offset) {
                Resolution::Found(result) => print_json(&result),
                _ => no_match(&name, &source, offset, "nothing resolves to a theme value here"),
            }
        }
        "annotate" => {
            let range = parse_range(&source, args.get(3))?;
            print_json(&service.annotate(&source, range, &Uncancellable))
        }
        other => Err(miette!("unknown command `{other}`\n{USAGE}")),
    }
}

fn take_flag(args: &mut Vec<String>, flag: &str) -> Result<Option<PathBuf>> {
    let Some(idx) = args.iter().position(|arg| arg == flag) else {
        return Ok(None);
    };
    if idx + 1 >= args.len() {
        return Err(miette!("`{flag}` expects a path"));
    }
    let value = args.remove(idx + 1);
    args.remove(idx);
    Ok(Some(PathBuf::from(value)))
}

fn load_config(explicit: Option<&Path>, theme_path: &Path) -> Result<ResolverConfig> {
    if let Some(path) = explicit {
        return Ok(ResolverConfig::load(path)?);
    }
    let start = theme_path
        .canonicalize()
        .unwrap_or_else(|_| theme_path.to_path_buf());
    Ok(ResolverConfig::discover(&start)?.unwrap_or_default())
}

fn parse_offset(source: &str, arg: Option<&String>) -> Result<usize> {
    let arg = arg.ok_or_else(|| miette!("missing offset\n{USAGE}"))?;
    let offset = match arg.split_once(':') {
        Some((line, col)) => {
            let line: u32 = line.parse().into_diagnostic()?;
            let character: u32 = col.parse().into_diagnostic()?;
            position_to_offset(source, lsp_types::Position::new(line, character))
        }
        None => arg.parse().into_diagnostic()?,
    };
    if offset > source.len() {
        return Err(miette!(
            "offset {offset} is past the end of the source ({} bytes)",
            source.len()
        ));
    }
    Ok(offset)
}

fn parse_range(source: &str, arg: Option<&String>) -> Result<Span> {
    let Some(arg) = arg else {
        return Ok(Span::new(0, source.len()));
    };
    let (start, end) = arg
        .split_once("..")
        .ok_or_else(|| miette!("range must look like `start..end`"))?;
    let start: usize = start.parse().into_diagnostic()?;
    let end: usize = end.parse().into_diagnostic()?;
    Ok(Span::new(start, end.max(start)))
}

fn no_match(name: &str, source: &str, offset: usize, message: &str) -> Result<()> {
    emit_warning(
        QueryDiagnostic::new(name, source, Span::new(offset, offset), message, "here")
            .with_help("theme paths resolve after `theme.`, `props.theme.` or an arrow parameter"),
    );
    println!("null");
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{rendered}");
    Ok(())
}
