use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use basket_cli::session::{ItemChanges, PagingPlan, Session};
use basket_cli::settings::{Settings, load_settings, resolve_data_dir, save_settings, settings_path};
use basket_export::{DEFAULT_EXPORT_FILENAME, ExportOptions, write_csv, write_csv_file};
use basket_model::{Catalog, ItemDraft};
use chrono::{Local, NaiveDate};

use crate::cli::{AddArgs, Cli, Command, ConfigArgs, ExportArgs, ListArgs, ReportArgs, UpdateArgs};
use crate::summary::{describe_item, print_catalog, print_page, print_report, print_settings};

pub fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref());
    let data_dir = cli.data_dir.as_deref();
    match cli.command {
        Command::Add(args) => run_add(args, &mut open_session(data_dir, settings)?),
        Command::Remove { index } => {
            let removed = open_session(data_dir, settings)?.remove(index)?;
            println!("Removed {}", describe_item(&removed));
            Ok(())
        }
        Command::Update(args) => run_update(args, &mut open_session(data_dir, settings)?),
        Command::Clear => {
            let count = open_session(data_dir, settings)?.clear()?;
            println!("Removed {count} items.");
            Ok(())
        }
        Command::List(args) => {
            run_list(&args, &open_session(data_dir, settings)?);
            Ok(())
        }
        Command::Report(args) => run_report(&args, &open_session(data_dir, settings)?),
        Command::Export(args) => run_export(&args, &open_session(data_dir, settings)?),
        Command::Categories => {
            print_catalog(&Catalog::default());
            Ok(())
        }
        Command::Config(args) => run_config(&args, &settings, cli.config.as_deref()),
    }
}

fn open_session(data_dir: Option<&Path>, settings: Settings) -> Result<Session> {
    let data_dir = resolve_data_dir(data_dir, &settings)?;
    Session::open(&data_dir, settings, today())
}

fn run_add(args: AddArgs, session: &mut Session) -> Result<()> {
    let draft = ItemDraft {
        name: args.name,
        category: args.category,
        subcategory: args.subcategory,
        quantity: args.quantity,
        price: args.price,
        date: args.date,
    };
    let item = session.add(&draft)?;
    println!("Added {}", describe_item(&item));
    Ok(())
}

fn run_update(args: UpdateArgs, session: &mut Session) -> Result<()> {
    let changes = ItemChanges {
        name: args.name,
        category: args.category,
        subcategory: args.subcategory,
        quantity: args.quantity,
        price: args.price,
        date: args.date,
    };
    if changes.is_empty() {
        bail!("nothing to update; pass at least one field flag");
    }
    let (previous, updated) = session.update(args.index, changes)?;
    println!("Updated {}", describe_item(&previous));
    println!("     to {}", describe_item(&updated));
    Ok(())
}

fn run_list(args: &ListArgs, session: &Session) {
    let settings = session.settings();
    let plan = PagingPlan {
        filter: args.query.filter(),
        sort: args.query.sort_spec(),
        page_size: args.page_size.unwrap_or(settings.page_size),
        pages: args.pages,
        delay: Duration::from_millis(args.delay_ms.unwrap_or(settings.load_delay_ms)),
    };
    let listing = session.load_pages(&plan, |ticket| {
        eprintln!("Loading page {}...", ticket.target_page_count());
    });
    print_page(&listing.page, session.today(), session.store().len());
}

fn run_report(args: &ReportArgs, session: &Session) -> Result<()> {
    let report = session.report();
    if args.json {
        let chart = report.rollup.chart_data();
        let json = serde_json::to_string_pretty(&chart).context("serialize chart data")?;
        println!("{json}");
    } else {
        print_report(&report);
    }
    Ok(())
}

fn run_export(args: &ExportArgs, session: &Session) -> Result<()> {
    let options = match args.delimiter {
        Some(delimiter) => ExportOptions::with_delimiter(delimiter)?,
        None => session.settings().export.options()?,
    };
    let items = session.export_items(&args.query.filter(), &args.query.sort_spec());
    match &args.output {
        Some(path) => {
            let path = export_path(path);
            write_csv_file(&items, &path, &options)?;
            eprintln!("Exported {} items to {}", items.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_csv(&items, &mut handle, &options)?;
            handle.flush().context("flush stdout")?;
        }
    }
    Ok(())
}

fn run_config(args: &ConfigArgs, settings: &Settings, explicit: Option<&Path>) -> Result<()> {
    if args.init {
        let Some(path) = explicit.map(Path::to_path_buf).or_else(settings_path) else {
            bail!("could not determine a settings path; pass --config");
        };
        save_settings(settings, &path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }
    print_settings(settings);
    if let Some(path) = explicit.map(Path::to_path_buf).or_else(settings_path) {
        println!("Settings file: {}", path.display());
    }
    Ok(())
}

/// A directory target receives the default export file name.
fn export_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DEFAULT_EXPORT_FILENAME)
    } else {
        path.to_path_buf()
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
