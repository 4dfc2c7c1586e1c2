use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use nameparser::config::RuleConfig;
use nameparser::{HumanName, Preferences, RuleSet};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "nameparser")]
#[command(about = "Split human names into title, first, middle, last, suffix and nickname")]
#[command(version)]
struct Cli {
    /// More logging on stderr (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a name given as arguments, or one name per line from stdin
    /// if the only argument is `-`; prints JSON
    Parse {
        #[arg(required = true)]
        name: Vec<String>,

        #[command(flatten)]
        options: ParseOptions,

        /// Print empty buckets too
        #[arg(long)]
        include_empty: bool,
    },

    /// Compare two names, exiting with status 1 if they differ. If the first
    /// is `-`, print each line from stdin that equals the second
    Eq {
        a: String,
        b: String,

        #[command(flatten)]
        options: ParseOptions,
    },
}

#[derive(Args, Debug)]
struct ParseOptions {
    /// Fix the capitalization of all upper- or lowercase names
    #[arg(long)]
    normalize: bool,

    /// With --normalize, fix mixed-case names too
    #[arg(long, requires = "normalize")]
    force: bool,

    /// Split "John and Jane Doe" into two names
    #[arg(long)]
    multiple: bool,

    /// Read a lone leading particle as a first name ("Van Johnson")
    #[arg(long)]
    first_over_prefix: bool,

    /// JSON file of extra rule entries
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,
}

struct NameParser {
    rules: RuleSet,
    prefs: Preferences,
    normalize: bool,
    force: bool,
}

impl NameParser {
    fn new(options: &ParseOptions) -> Result<NameParser> {
        let (rules, mut prefs) = match &options.rules {
            Some(path) => {
                let config = RuleConfig::load(path)
                    .with_context(|| format!("reading rules from {}", path.display()))?;
                (config.into_rules()?, config.preferences)
            }
            None => (RuleSet::new(), Preferences::default()),
        };

        prefs.parse_multiple_names |= options.multiple;
        prefs.first_over_prefix |= options.first_over_prefix;

        Ok(NameParser {
            rules,
            prefs,
            normalize: options.normalize,
            force: options.force,
        })
    }

    fn parse(&self, input: &str) -> HumanName {
        let mut name = HumanName::parse_with(input, &self.rules, self.prefs);
        if self.normalize {
            name.normalize_with(&self.rules, self.force);
        }
        name
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Parse {
            name,
            options,
            include_empty,
        } => parse_mode(&name, &options, include_empty),
        Commands::Eq { a, b, options } => equality_mode(&a, &b, &options),
    }
}

fn render(name: &HumanName, include_empty: bool) -> Result<String> {
    if include_empty {
        Ok(serde_json::to_string(&name.as_dictionary(true))?)
    } else {
        Ok(serde_json::to_string(name)?)
    }
}

fn parse_mode(args: &[String], options: &ParseOptions, include_empty: bool) -> Result<()> {
    let parser = NameParser::new(options)?;
    let mut stdout = io::stdout().lock();

    if args.len() == 1 && args[0] == "-" {
        for line in io::stdin().lock().lines() {
            let line = line.context("reading stdin")?;
            let name = parser.parse(&line);
            if writeln!(stdout, "{}", render(&name, include_empty)?).is_err() {
                // Downstream closed, e.g. piped into `head`
                break;
            }
        }
        return Ok(());
    }

    let name = parser.parse(&args.join(" "));
    writeln!(stdout, "{}", render(&name, include_empty)?)?;
    if name.is_unparsable() {
        process::exit(1);
    }
    Ok(())
}

fn equality_mode(a: &str, b: &str, options: &ParseOptions) -> Result<()> {
    let parser = NameParser::new(options)?;
    let expected = parser.parse(b);
    let mut stdout = io::stdout().lock();

    if a == "-" {
        for line in io::stdin().lock().lines() {
            let line = line.context("reading stdin")?;
            if parser.parse(&line) == expected && writeln!(stdout, "{}", line.trim()).is_err() {
                break;
            }
        }
        return Ok(());
    }

    if parser.parse(a) == expected {
        writeln!(stdout, "equal")?;
        Ok(())
    } else {
        writeln!(stdout, "not equal!")?;
        process::exit(1);
    }
}
