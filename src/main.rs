use anyhow::Context;
use catalog_browser::core::ExportSettings;
use catalog_browser::utils::error::ErrorSeverity;
use catalog_browser::utils::{logger, validation::Validate};
use catalog_browser::{
    BrowseView, CatalogBrowser, CatalogEntry, CatalogError, CliArgs, LocalStorage, SelectionTracker,
    SessionConfig,
};
use catalog_browser::config::LogFormat;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match SessionConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(args.verbose);
            eprintln!("❌ Failed to load session file '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    match config.logging.format {
        LogFormat::Compact => logger::init_cli_logger(args.verbose),
        LogFormat::Json => logger::init_json_logger(args.verbose),
    }

    tracing::info!("🚀 Starting catalog browser session from {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Session validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = run(&config, args.dry_run) {
        let exit_code = match e.downcast_ref::<CatalogError>() {
            Some(err) => {
                tracing::error!(
                    "❌ Session failed: {} (Category: {:?}, Severity: {:?})",
                    err,
                    err.category(),
                    err.severity()
                );
                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 {}", err.recovery_suggestion());
                match err.severity() {
                    ErrorSeverity::Low => 0,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                }
            }
            None => {
                eprintln!("❌ {:#}", e);
                1
            }
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn run(config: &SessionConfig, dry_run: bool) -> anyhow::Result<()> {
    let catalog = config.load_catalog().context("loading catalog")?;
    tracing::info!(
        "📚 Catalog loaded: {} departments, {} courses",
        catalog.departments().len(),
        catalog.len()
    );
    for (course, missing) in catalog.dangling_prerequisites() {
        tracing::warn!("{} lists unknown prerequisite {}", course.code, missing);
    }

    let request = config.browse_request(&catalog)?;
    let storage = LocalStorage::new(config.output_path());
    let browser = CatalogBrowser::new(&catalog, storage, config.clone());
    let mut tracker = SelectionTracker::new(&catalog);

    let outcome = browser.run(&request, &mut tracker, dry_run)?;

    println!("{}", catalog.title());
    if let Some(subtitle) = catalog.subtitle() {
        println!("{}", subtitle);
    }
    if let Some(tagline) = catalog.tagline() {
        println!("{}", tagline);
    }
    println!();

    match &outcome.view {
        BrowseView::Filtered(result) => {
            if request.spec.is_search_mode() {
                println!("Filtered Results");
            } else {
                println!("{} - Filtered Courses", config.department(&catalog)?);
            }
            if result.is_empty() {
                println!("No courses match your filters.");
            }
            for entry in &result.entries {
                print_course(entry, true);
            }
        }
        BrowseView::Department { name, entries } => {
            println!("{}", name);
            for entry in entries {
                print_course(entry, false);
            }
        }
    }

    if !tracker.is_empty() {
        println!();
        println!(
            "Your Selected Courses ({} courses, {} credits)",
            tracker.len(),
            tracker.total_credits()
        );
        for entry in tracker.current() {
            println!("  {}", entry.picker_label());
        }
    }

    for path in &outcome.written {
        println!("📁 Saved {}", path);
    }

    Ok(())
}

fn print_course(entry: &CatalogEntry<'_>, with_department: bool) {
    let course = entry.course;
    println!();
    println!("{}: {}", course.code, course.name);
    if with_department {
        println!("  Department: {}", entry.department);
    }
    println!("  Description: {}", course.description);
    println!("  Credits: {}", course.credits);
    println!("  Prerequisites: {}", course.prerequisite);
}
