// File: ./src/cli.rs
//! Shared command-line logic: argument parsing, help, logging setup and
//! plain-text output.
use crate::calendar::{Classification, format_long};
use crate::config::{Office, Rite};
use crate::office::{RenderedOffice, SectionKind};
use crate::prayers::Prayer;
use crate::saints::Commemorations;
use crate::warning::OfficeWarning;
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    Render,
    Season,
    Passage(String),
    Saints,
    /// A Book of Needs prayer by id; without an id, list the ids.
    Prayer(Option<String>),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliArgs {
    pub command: Command,
    pub root: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub date: Option<NaiveDate>,
    pub office: Option<Office>,
    pub rite: Option<Rite>,
    pub verbose: bool,
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} needs a value", flag))
}

/// Parses `args` without the binary name.
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut passage_words: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" | "help" => out.command = Command::Help,
            "--verbose" | "-v" => out.verbose = true,
            "--root" | "-r" => {
                out.root = Some(value(args, i, "--root")?.into());
                i += 1;
            }
            "--data" | "-d" => {
                out.data = Some(value(args, i, "--data")?.into());
                i += 1;
            }
            "--date" => {
                let raw = value(args, i, "--date")?;
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|e| anyhow!("Invalid date '{}': {}", raw, e))?;
                out.date = Some(date);
                i += 1;
            }
            "--office" | "-o" => {
                let raw = value(args, i, "--office")?;
                out.office = Some(
                    Office::from_str(&raw.to_lowercase())
                        .map_err(|_| anyhow!("Unknown office '{}'", raw))?,
                );
                i += 1;
            }
            "--rite" => {
                let raw = value(args, i, "--rite")?;
                out.rite = Some(
                    Rite::from_str(&raw.to_lowercase())
                        .map_err(|_| anyhow!("Unknown rite '{}'", raw))?,
                );
                i += 1;
            }
            "season" if out.command == Command::Render => out.command = Command::Season,
            "saints" if out.command == Command::Render => out.command = Command::Saints,
            "passage" if out.command == Command::Render => {
                out.command = Command::Passage(String::new())
            }
            "prayer" if out.command == Command::Render => out.command = Command::Prayer(None),
            arg if arg.starts_with('-') => log::debug!("Ignoring unknown flag {}", arg),
            arg => match &mut out.command {
                Command::Passage(_) => passage_words.push(arg.to_string()),
                Command::Prayer(id @ None) => *id = Some(arg.to_string()),
                _ => log::debug!("Ignoring stray argument {}", arg),
            },
        }
        i += 1;
    }

    if let Command::Passage(citation) = &mut out.command {
        *citation = passage_words.join(" ");
        if citation.trim().is_empty() {
            return Err(anyhow!("passage needs a citation, e.g. orarium passage \"John 1:1-5\""));
        }
    }
    Ok(out)
}

pub fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut builder = ConfigBuilder::new();
    builder.set_time_level(LevelFilter::Off);
    builder.set_thread_level(LevelFilter::Off);
    builder.set_target_level(LevelFilter::Off);
    builder.set_location_level(LevelFilter::Off);
    TermLogger::init(level, builder.build(), TerminalMode::Stderr, ColorChoice::Auto)?;
    Ok(())
}

pub fn print_help(binary_name: &str) {
    println!(
        "Orarium v{} - Daily office for the command line",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS]                    Render today's office", binary_name);
    println!("    {} season [--date <date>]       Show the liturgical season", binary_name);
    println!("    {} passage <citation>           Print a scripture passage", binary_name);
    println!("    {} saints [--date <date>]       List commemorations", binary_name);
    println!("    {} prayer [<id>]                Print a prayer, or list prayer ids", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -d, --data <dir>      Content directory (season, bible, saints, components).");
    println!("    --date <YYYY-MM-DD>   Render for this date instead of today.");
    println!("    -o, --office <name>   morning, evening, noonday or compline.");
    println!("    --rite <rite>         rite1 or rite2.");
    println!("    -v, --verbose         Log lookups and cache activity to stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EXAMPLES:");
    println!("    {} --date 2026-03-06 --office morning", binary_name);
    println!("    {} passage \"Romans 8:1-11, 31-39\"", binary_name);
    println!();
    println!("Further selections (minister, creed, devotions) live in config.toml under [office].");
}

pub fn format_office(office: &RenderedOffice) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", office.office_name.to_uppercase());
    let _ = writeln!(out, "{}", office.long_date());
    let _ = writeln!(out, "{}", office.calendar_line());
    let _ = writeln!(out, "{} ({})", office.season, office.color);

    for section in &office.sections {
        out.push('\n');
        match section.kind {
            SectionKind::Heading => {
                let _ = writeln!(out, "== {} ==", section.label);
                continue;
            }
            SectionKind::Notice => {
                let _ = writeln!(out, "[{}]", section.label);
            }
            _ => match &section.reference {
                Some(reference) if *reference != section.label => {
                    let _ = writeln!(out, "{} - {}", section.label, reference);
                }
                _ => {
                    let _ = writeln!(out, "{}", section.label);
                }
            },
        }
        if !section.text.is_empty() {
            let _ = writeln!(out, "{}", section.text);
        }
    }
    out
}

pub fn format_classification(c: &Classification) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format_long(c.date));
    let _ = writeln!(out, "Season: {}", c.season);
    let _ = writeln!(out, "Colour: {}", c.liturgical_color);
    let _ = writeln!(out, "Lectionary: {}", c.liturgical_year);
    let _ = writeln!(out, "Content file: {}", c.content_file);
    out
}

pub fn format_commemorations(date: NaiveDate, c: &Commemorations) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Commemorations for {}", format_long(date));
    if c.saints.is_empty() {
        let _ = writeln!(out, "No commemorations for today.");
    }
    for saint in &c.saints {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} ({})", saint.name, saint.tradition.to_uppercase());
        if !saint.description.is_empty() {
            let _ = writeln!(out, "{}", saint.description);
        }
    }
    out
}

pub fn format_prayer(prayer: &Prayer) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", prayer.title);
    if let Some(source) = &prayer.source {
        let _ = writeln!(out, "({})", source);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", prayer.text);
    out
}

/// Warnings go to stderr after the output.
pub fn report_warnings(warnings: &[OfficeWarning]) {
    for w in warnings {
        eprintln!("warning: {}", w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &[&str]) -> Vec<String> {
        s.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_render_flags() {
        let parsed = parse_args(&args(&[
            "--date", "2026-03-06", "--office", "Evening", "--rite", "rite1", "-v",
        ]))
        .unwrap();
        assert_eq!(parsed.command, Command::Render);
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2026, 3, 6));
        assert_eq!(parsed.office, Some(Office::Evening));
        assert_eq!(parsed.rite, Some(Rite::Rite1));
        assert!(parsed.verbose);
    }

    #[test]
    fn test_passage_joins_words() {
        let parsed = parse_args(&args(&["passage", "Romans", "8:1-11,", "31-39"])).unwrap();
        assert_eq!(parsed.command, Command::Passage("Romans 8:1-11, 31-39".into()));
        assert!(parse_args(&args(&["passage"])).is_err());
    }

    #[test]
    fn test_bad_values_are_errors() {
        assert!(parse_args(&args(&["--date", "March 1"])).is_err());
        assert!(parse_args(&args(&["--office", "vespers"])).is_err());
        assert!(parse_args(&args(&["--root"])).is_err());
    }

    #[test]
    fn test_subcommands() {
        assert_eq!(parse_args(&args(&["season"])).unwrap().command, Command::Season);
        assert_eq!(
            parse_args(&args(&["saints", "--date", "2026-03-01"])).unwrap().command,
            Command::Saints
        );
        assert_eq!(parse_args(&args(&["-h"])).unwrap().command, Command::Help);
    }

    #[test]
    fn test_prayer_subcommand() {
        assert_eq!(parse_args(&args(&["prayer"])).unwrap().command, Command::Prayer(None));
        let parsed = parse_args(&args(&["prayer", "for-the-sick", "-v", "extra"])).unwrap();
        assert_eq!(parsed.command, Command::Prayer(Some("for-the-sick".into())));
        assert!(parsed.verbose);
    }

    #[test]
    fn test_format_prayer() {
        let prayer = Prayer {
            title: "For the Sick".into(),
            source: Some("BCP p. 458".into()),
            text: "Heavenly Father, giver of life and health.".into(),
        };
        assert_eq!(
            format_prayer(&prayer),
            "For the Sick\n(BCP p. 458)\n\nHeavenly Father, giver of life and health.\n"
        );
        let bare = Prayer { source: None, ..prayer };
        assert!(format_prayer(&bare).starts_with("For the Sick\n\n"));
    }
}
