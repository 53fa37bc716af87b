// Binary entry point for the command-line office reader.
use anyhow::Result;
use chrono::Local;
use orarium::calendar::SeasonCalendar;
use orarium::cli::{self, Command};
use orarium::config::Config;
use orarium::context::StandardContext;
use orarium::engine::OfficeEngine;
use orarium::prayers::PrayerBook;
use orarium::saints::SaintsCalendar;
use orarium::scripture::ScriptureStore;
use orarium::source::{DirectorySource, SharedSource};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let binary_name = args
        .first()
        .and_then(|p| std::path::Path::new(p).file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("orarium")
        .to_string();

    let parsed = cli::parse_args(args.get(1..).unwrap_or_default())?;
    if parsed.command == Command::Help {
        cli::print_help(&binary_name);
        return Ok(());
    }
    cli::init_logging(parsed.verbose)?;

    let ctx = StandardContext::new(parsed.root.clone());
    let mut config = Config::load_or_default(&ctx)?;
    if let Some(office) = parsed.office {
        config.office.office = office;
    }
    if let Some(rite) = parsed.rite {
        config.office.rite = rite;
    }
    let date = parsed.date.unwrap_or_else(|| Local::now().date_naive());

    let data_dir = match &parsed.data {
        Some(dir) => dir.clone(),
        None => config.resolve_data_dir(&ctx)?,
    };
    log::debug!("Content root: {}", data_dir.display());
    let source: SharedSource = Arc::new(DirectorySource::new(data_dir));

    match parsed.command {
        Command::Season => {
            let calendar = SeasonCalendar::load(source.as_ref(), &config).await?;
            let classification = calendar.classify(date);
            print!("{}", cli::format_classification(&classification));
            cli::report_warnings(classification.warning.as_slice());
        }
        Command::Passage(citation) => {
            let store =
                ScriptureStore::new(source, config.book_cache_capacity, config.translation.clone());
            let passage = store.resolve_detailed(&citation).await;
            println!("{}", citation);
            println!();
            println!("{}", passage.text);
            cli::report_warnings(&passage.warnings);
        }
        Command::Prayer(id) => {
            let book = PrayerBook::new(source, config.prayers_file.clone());
            let result = match id {
                Some(id) => book.get(&id).await.map(|prayer| {
                    print!("{}", cli::format_prayer(&prayer.prayer));
                    prayer.warnings
                }),
                None => book.ids().await.map(|ids| {
                    for id in ids {
                        println!("{}", id);
                    }
                    Vec::new()
                }),
            };
            match result {
                Ok(warnings) => cli::report_warnings(&warnings),
                Err(e) => {
                    log::error!("{:#}", e);
                    return Err(e);
                }
            }
        }
        Command::Saints => {
            let saints = SaintsCalendar::new(source).for_date(date).await;
            print!("{}", cli::format_commemorations(date, &saints));
            cli::report_warnings(&saints.warnings);
        }
        Command::Render | Command::Help => {
            let engine = match OfficeEngine::load(source, &config).await {
                Ok(engine) => engine,
                Err(e) => {
                    log::error!("{:#}", e);
                    return Err(e);
                }
            };
            if let Some(office) = engine.render_latest(date, &config.office).await? {
                print!("{}", cli::format_office(&office));
                cli::report_warnings(&office.warnings);
            }
        }
    }
    Ok(())
}
