//! sheetref - resolve spreadsheet addresses into Sheets API ranges

mod config;
mod error;

use anyhow::{Context, bail};
use error::CliError;
use sheetref_core::{Session, SnapshotFile, SpreadsheetLocator};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: sheetref [OPTIONS] [ADDRESS]...");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [ADDRESS]...                 Addresses such as Sheet1!B2:C10, #2!A:C or B5");
    eprintln!("                               (none: the default sheet and range)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --sheets <FILE>          Sheet metadata snapshot (JSON)");
    eprintln!("      --spreadsheet <ID|URL>   Spreadsheet id or URL (sets default sheet/range)");
    eprintln!("      --config <FILE>          Read settings from FILE");
    eprintln!("      --no-config              Ignore the user config file");
    eprintln!("  -a, --area                   Print normalized areas instead of grid ranges");
    eprintln!("  -f, --filter <COL=V1[,V2]>   Print basic-filter requests (can be repeated)");
    eprintln!("  -l, --list                   List sheets");
    eprintln!("  -v, --verbose                Log debug output to stderr");
    eprintln!("  -h, --help                   Print help");
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    addresses: Vec<String>,
    sheets: Option<PathBuf>,
    spreadsheet: Option<String>,
    config_file: Option<PathBuf>,
    no_config: bool,
    area: bool,
    filters: Vec<(String, Vec<String>)>,
    list: bool,
    verbose: bool,
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(Options),
    Help,
}

fn parse_args(args: &[String]) -> error::Result<Command> {
    let mut opts = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-s" | "--sheets" => {
                opts.sheets = Some(PathBuf::from(required(args, &mut i, "--sheets")?));
            }
            "--spreadsheet" => {
                opts.spreadsheet = Some(required(args, &mut i, "--spreadsheet")?.to_string());
            }
            "--config" => {
                opts.config_file = Some(PathBuf::from(required(args, &mut i, "--config")?));
            }
            "--no-config" => opts.no_config = true,
            "-a" | "--area" => opts.area = true,
            "-f" | "--filter" => {
                let spec = required(args, &mut i, "--filter")?;
                opts.filters.push(parse_filter(spec)?);
            }
            "-l" | "--list" => opts.list = true,
            "-v" | "--verbose" => opts.verbose = true,
            // Everything after `--` is an address.
            "--" => {
                opts.addresses.extend(args[i + 1..].iter().cloned());
                break;
            }
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return Err(CliError::Usage(format!("Unknown option: {}", arg)));
            }
            arg => opts.addresses.push(arg.to_string()),
        }
        i += 1;
    }
    Ok(Command::Run(opts))
}

fn required<'a>(args: &'a [String], i: &mut usize, flag: &str) -> error::Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("{} requires a value", flag)))
}

/// `B=active,pending` -> ("B", ["active", "pending"])
fn parse_filter(spec: &str) -> error::Result<(String, Vec<String>)> {
    let Some((column, values)) = spec.split_once('=') else {
        return Err(CliError::Usage(format!(
            "Expected COLUMN=VALUE[,VALUE] for --filter, got {:?}",
            spec
        )));
    };
    let values = values.split(',').map(str::to_string).collect();
    Ok((column.trim().to_string(), values))
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // Only fails if a logger is already installed.
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn run(opts: Options) -> anyhow::Result<()> {
    if opts.area && !opts.filters.is_empty() {
        bail!("--area and --filter cannot be combined");
    }

    let config = if opts.no_config && opts.config_file.is_none() {
        config::Config::default()
    } else {
        config::load_config(opts.config_file.as_deref())?
    };

    let sheets = opts
        .sheets
        .or(config.sheets)
        .context("no sheet metadata: pass --sheets <FILE> or set `sheets` in config.toml")?;
    let spreadsheet = opts
        .spreadsheet
        .or(config.spreadsheet)
        .unwrap_or_else(|| "local".to_string());

    let mut locator = SpreadsheetLocator::parse(&spreadsheet)?;
    if let Some(rect) = config.default_range.as_deref() {
        locator = locator.with_default_rect(rect);
    }
    let session = Session::new(locator, SnapshotFile::new(&sheets));
    session
        .catalog()
        .fetch()
        .with_context(|| format!("failed to load sheets from {}", sheets.display()))?;

    if opts.list {
        for sheet in session.sheet_list()? {
            println!("{}", serde_json::to_string(&sheet)?);
        }
        if opts.addresses.is_empty() {
            return Ok(());
        }
    }

    let addresses: Vec<Option<&str>> = if opts.addresses.is_empty() {
        vec![None]
    } else {
        opts.addresses.iter().map(|a| Some(a.as_str())).collect()
    };

    let criteria = if opts.filters.is_empty() {
        None
    } else {
        Some(session.filter_criteria(opts.filters.iter().map(|(c, v)| (c, v.clone())))?)
    };

    for address in addresses {
        let label = address.unwrap_or("(default)");
        let line = if opts.area {
            serde_json::to_string(&session.resolve_area(address)?)?
        } else if criteria.is_some() {
            let batch = session
                .basic_filter(address, criteria.clone())
                .with_context(|| format!("cannot filter {}", label))?;
            serde_json::to_string(&batch)?
        } else {
            let range = session
                .range(address)
                .with_context(|| format!("cannot resolve {}", label))?;
            serde_json::to_string(&range)?
        };
        println!("{}", line);
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let opts = match parse_args(&args) {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    init_logging(opts.verbose);

    if let Err(e) = run(opts) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("sheetref")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_parse_addresses_and_flags() {
        let Command::Run(opts) =
            parse_args(&args(&["-s", "s.json", "--area", "A1", "#2!B:C"])).unwrap()
        else {
            panic!("expected run");
        };
        assert_eq!(opts.sheets, Some(PathBuf::from("s.json")));
        assert!(opts.area);
        assert_eq!(opts.addresses, vec!["A1", "#2!B:C"]);
    }

    #[test]
    fn test_parse_filters() {
        let Command::Run(opts) =
            parse_args(&args(&["-f", "B=active", "--filter", "D=x,y"])).unwrap()
        else {
            panic!("expected run");
        };
        assert_eq!(
            opts.filters,
            vec![
                ("B".to_string(), vec!["active".to_string()]),
                ("D".to_string(), vec!["x".to_string(), "y".to_string()]),
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_args(&args(&["--sheets"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&args(&["--bogus"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&args(&["-f", "novalue"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse_args(&args(&["A1", "-h"])).unwrap(), Command::Help);
    }

    #[test]
    fn test_double_dash_passes_addresses_through() {
        let Command::Run(opts) = parse_args(&args(&["--", "-x!A1"])).unwrap() else {
            panic!("expected run");
        };
        assert_eq!(opts.addresses, vec!["-x!A1"]);
    }
}
