use std::{
    io::{self, BufRead, IsTerminal, Write},
    path::PathBuf,
};

use anyhow::Context;
use chart_convert::{ConvertOptions, SourceFormat};
use clap::{Parser, ValueEnum};

mod output;

#[derive(Debug, Parser)]
#[command(name = "chart2json")]
#[command(about = "Convert Cylheim, Malody and Lanotalium charts to Chart.json", long_about = None)]
struct Cli {
    /// Input chart; read from standard input when omitted
    #[arg(short = 'f', long = "file")]
    input: Option<PathBuf>,

    /// Output file, or an existing directory to write Chart.json into
    #[arg(short, long, default_value = output::DEFAULT_FILE_NAME)]
    output: PathBuf,

    /// Treat the input as a .mcz archive and convert the chart inside it
    #[arg(short = 'z', long = "zip", requires = "input")]
    zip: bool,

    /// Source format; detected from the chart when omitted
    #[arg(short = 't', long, value_enum)]
    format: Option<FormatArg>,

    /// Chart file to take from an archive holding several
    #[arg(short, long)]
    select: Option<String>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Cylheim,
    Malody,
    Lanotalium,
}

impl From<FormatArg> for SourceFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Cylheim => SourceFormat::Cylheim,
            FormatArg::Malody => SourceFormat::Malody,
            FormatArg::Lanotalium => SourceFormat::Lanotalium,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ConvertOptions {
        format: cli.format.map(SourceFormat::from),
        select: cli.select,
    };

    let source_name = cli
        .input
        .as_ref()
        .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
    println!("==> converting: {source_name}");

    let chart = match &cli.input {
        Some(input) if cli.zip => chart_convert::convert_archive_with(input, &options, prompt_choice),
        Some(input) => chart_convert::convert_file(input, &options),
        None => chart_convert::convert_reader(io::stdin().lock(), &options),
    }
    .with_context(|| format!("convert failed: {source_name}"))?;
    println!("==> bpm list: {} entries", chart.bpm_list.len());
    println!("==> offset: {}", chart.offset);

    let out_path = output::resolve(&cli.output);
    output::write_chart(&out_path, &chart)?;
    println!("==> saved: {}", out_path.display());

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Ask on the terminal which archive chart to convert. Declines when stdin
/// is not interactive or closes.
fn prompt_choice(candidates: &[PathBuf]) -> Option<usize> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return None;
    }

    println!("==> choose a chart:");
    for (i, c) in candidates.iter().enumerate() {
        println!("  {}: {}", i + 1, c.display());
    }

    let mut lines = stdin.lock().lines();
    loop {
        print!("  number: ");
        io::stdout().flush().ok()?;
        let line = lines.next()?.ok()?;
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=candidates.len()).contains(&n) => return Some(n - 1),
            _ => eprintln!("  invalid choice, enter 1-{}", candidates.len()),
        }
    }
}
