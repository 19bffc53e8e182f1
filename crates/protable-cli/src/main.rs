// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use protable_app::DEFAULT_PAGE_SIZE;
use protable_app::datasets::DatasetKind;
use runtime::{
    Rendered, TableRequest, employees_source, json_source, orders_source, run_request,
    users_source,
};
use std::env;
use std::io::stderr;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `protable --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    start_logging(&config.log_level())?;

    let choice = data_choice(&options, &config);
    debug!(?choice, config = %options.config_path.display(), "starting");
    if options.check_only {
        if let DataChoice::Json(path) = &choice {
            json_source(path)?;
        }
        return Ok(());
    }

    let rendered = render_choice(&choice, &config, &options.request)?;
    print!("{}", rendered.output);
    for notice in &rendered.notices {
        println!("> {notice}");
    }
    for message in &rendered.ignored {
        eprintln!("ignored: {message}");
    }
    Ok(())
}

/// Installs a stderr `fmt` layer. `RUST_LOG` wins over the configured level.
fn start_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = Registry::default().with(
        fmt::layer()
            .without_time()
            .with_writer(stderr)
            .with_filter(filter),
    );
    tracing::subscriber::set_global_default(subscriber).context("install log subscriber")
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DataChoice {
    Dataset(DatasetKind),
    Json(PathBuf),
}

/// Command-line choices beat the config file. `parse_cli_args` rejects
/// `--data` together with `--dataset`.
fn data_choice(options: &CliOptions, config: &Config) -> DataChoice {
    if let Some(path) = &options.data_path {
        return DataChoice::Json(path.clone());
    }
    if let Some(kind) = options.dataset {
        return DataChoice::Dataset(kind);
    }
    match config.data_path() {
        Some(path) => DataChoice::Json(path),
        None => DataChoice::Dataset(config.dataset()),
    }
}

fn render_choice(choice: &DataChoice, config: &Config, request: &TableRequest) -> Result<Rendered> {
    match choice {
        DataChoice::Dataset(kind) => {
            let table_config = config.table_config(kind.default_page_size());
            match kind {
                DatasetKind::Employees => run_request(employees_source(), table_config, request),
                DatasetKind::Orders => run_request(orders_source(), table_config, request),
                DatasetKind::Users => run_request(users_source(), table_config, request),
            }
        }
        DataChoice::Json(path) => run_request(
            json_source(path)?,
            config.table_config(DEFAULT_PAGE_SIZE),
            request,
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    dataset: Option<DatasetKind>,
    data_path: Option<PathBuf>,
    request: TableRequest,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        dataset: None,
        data_path: None,
        request: TableRequest::default(),
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let flag = arg.as_ref();
        match flag {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--dataset" => {
                let value = required(&mut iter, flag, "a dataset name")?;
                let kind = DatasetKind::parse(&value).ok_or_else(|| {
                    anyhow!("unknown dataset {value:?}; expected one of: employees, orders, users")
                })?;
                options.dataset = Some(kind);
            }
            "--data" => {
                options.data_path = Some(PathBuf::from(required(&mut iter, flag, "a JSON file path")?));
            }
            "--query" => {
                options.request.query = Some(required(&mut iter, flag, "search text")?);
            }
            "--status" => {
                options.request.status = Some(required(&mut iter, flag, "a status value")?);
            }
            "--sort" => {
                options.request.sorts.push(required(&mut iter, flag, "a field name")?);
            }
            "--page-size" => {
                options.request.page_size = Some(parse_count(&required(&mut iter, flag, "a number")?, flag)?);
            }
            "--page" => {
                options.request.page = Some(parse_count(&required(&mut iter, flag, "a page number")?, flag)?);
            }
            "--select" => {
                options.request.select.push(required(&mut iter, flag, "a row id")?);
            }
            "--select-page" => {
                options.request.select_page = true;
            }
            "--view" => {
                options.request.view = Some(required(&mut iter, flag, "a row id")?);
            }
            "--delete-selected" => {
                options.request.delete_selected = true;
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                bail!("unknown argument {unknown:?}; run with --help to see supported options");
            }
        }
    }

    if options.dataset.is_some() && options.data_path.is_some() {
        bail!("use either --dataset or --data, not both");
    }

    Ok(options)
}

fn required<I, S>(iter: &mut I, flag: &str, what: &str) -> Result<String>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    iter.next()
        .map(|value| value.as_ref().to_owned())
        .ok_or_else(|| anyhow!("{flag} requires {what}"))
}

fn parse_count(raw: &str, flag: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .with_context(|| format!("{flag} expects a non-negative integer, got {raw:?}"))
}

fn print_help() {
    println!("protable");
    println!("  --config <path>          Use a specific config path");
    println!("  --dataset <name>         Show a built-in dataset: employees, orders, users");
    println!("  --data <file>            Show records from a JSON array file");
    println!("  --query <text>           Filter rows by case-insensitive substring");
    println!("  --status <value>         Keep rows whose status equals <value>");
    println!("  --sort <field>           Activate a column sort; repeat to cycle asc, desc, off");
    println!("  --page-size <n>          Rows per page");
    println!("  --page <n>               Jump to page <n>");
    println!("  --select <id>            Select a row by id (repeatable)");
    println!("  --select-page            Select every row on the shown page");
    println!("  --view <id>              Send a view action for a row");
    println!("  --delete-selected        Send a delete request for the selection");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config and data, then exit");
    println!("  --help                   Show this help");
}
