use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use nameswap::delimited::FileProcessor;
use nameswap::names::random_seed;
use nameswap::session;
use nameswap::{Config, NameBank, SubstitutionMode, SubstitutionTable};

#[derive(Parser)]
#[command(name = "nameswap")]
#[command(about = "Rename names in columns of CSV files, generating safe alternatives for demos")]
#[command(
    long_about = "Rename names in columns of CSV files, generating safe alternatives for demos.\n\n\
    Each distinct name gets one substitute first name, used everywhere it appears \
    across all files in the run. Renamed copies are written next to the inputs as \
    <prefix>-<file>. Use -s for repeatable output and --session to keep the same \
    substitutes across runs."
)]
struct Cli {
    /// File to process (repeatable)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Column to rename, matched case-insensitively (repeatable).
    /// Defaults to "First Name", "Last Name", "Preferred Name" and "Camper"
    #[arg(short = 'c', long = "column", value_name = "COLUMN")]
    columns: Vec<String>,

    /// Prefix for renamed files [default: renamed]
    #[arg(short, long)]
    prefix: Option<String>,

    /// Seed for deterministic mappings (same inputs and seed give the same outputs)
    #[arg(short, long)]
    seed: Option<String>,

    /// Skip the confirmation step before processing
    #[arg(long)]
    skip: bool,

    /// Add the default columns even when others were given
    #[arg(long = "defaultcolumns")]
    default_columns: bool,

    /// Add every column whose header contains "name"
    #[arg(long = "autocolumns")]
    auto_columns: bool,

    /// Rename whole cells instead of splitting on spaces, hyphens and commas.
    /// Cells holding several names will not line up with single-name cells
    #[arg(long = "renamewholecells")]
    rename_whole_cells: bool,

    /// Warn whenever a numbered fallback name has to be used
    #[arg(long = "warnmaxattempts")]
    warn_max_attempts: bool,

    /// Session file to resume mappings from and save them to
    #[arg(long, value_name = "FILE")]
    session: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::new();
        config.files.extend(self.files);
        config.columns.extend(self.columns);
        config.prefix = self.prefix;
        config.seed = self.seed;
        config.mode = SubstitutionMode::from_whole_cell_flag(self.rename_whole_cells);
        config.skip_confirmation = self.skip;
        config.default_columns = self.default_columns;
        config.auto_columns = self.auto_columns;
        config.warn_max_attempts = self.warn_max_attempts;
        config.session = self.session;
        config
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut config = Cli::parse().into_config();
    config.finish_setup();
    if let Err(e) = config.validate() {
        anyhow::bail!("{}\nExiting. Use --help for more usage information", e);
    }

    let resumed = match &config.session {
        Some(path) => session::load_optional(path)
            .with_context(|| format!("Failed to load session {}", path.display()))?,
        None => None,
    };
    if let Some(saved) = &resumed {
        for warning in config.resume_from(saved) {
            println!("Warning: {}", warning);
        }
    }

    let seed = match &config.seed {
        Some(seed) => seed.clone(),
        None => {
            let seed = random_seed();
            println!("No seed specified, using random seed {}", seed);
            config.seed = Some(seed.clone());
            seed
        }
    };
    let mode = config.mode;

    println!("\n{}\n", config.report());

    if config.skip_confirmation {
        println!("(User skipped confirmation, beginning processing step)\n");
    } else if !user_confirm()? {
        println!("Operation cancelled by user.");
        return Ok(());
    }

    let table = match resumed {
        Some(saved) => {
            // Continue past the draws that produced the saved mappings
            let bank = NameBank::new(&seed).advanced(saved.mappings.len());
            SubstitutionTable::with_mappings(bank, saved.mappings)
        }
        None => SubstitutionTable::new(NameBank::new(&seed)),
    };
    let table = table.with_warn_on_max_attempts(config.warn_max_attempts);

    let mut processor = FileProcessor::new(table, config.column_list(), config.prefix(), mode);

    let start = Instant::now();
    let outcomes = processor.process_all(&config.file_list());
    let elapsed = start.elapsed();

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        println!("{} of {} files failed", failed, outcomes.len());
    }
    println!("Process finished in {:.3}s\n", elapsed.as_secs_f64());

    if let Some(path) = &config.session {
        let table = processor.into_table();
        session::save(path, &seed, mode, table.mappings())
            .with_context(|| format!("Mappings were NOT saved to {}", path.display()))?;
        println!("Saved {} mappings to {}", table.len(), path.display());
    }

    Ok(())
}

/// Wait for ENTER; any other input cancels
fn user_confirm() -> Result<bool> {
    print!("Press ENTER to continue, type any characters and press ENTER to cancel: ");
    io::stdout().flush()?;

    let mut response = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut response)
        .context("Failed to read confirmation")?;
    // Closed stdin counts as a cancel
    Ok(read > 0 && response.trim_end_matches(['\r', '\n']).is_empty())
}
