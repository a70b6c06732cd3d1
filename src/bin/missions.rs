use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use time::Date;

use space_missions::aggregate::round2;
use space_missions::dashboard::{DashboardSummary, FilterOptions, group_thousands};
use space_missions::logger;
use space_missions::parser::parse_date;
use space_missions::queries::{Query, QueryKind};
use space_missions::{
    CsvSink, Dataset, FilterSpec, FilteredView, ReadOptions, RocketStatusFilter, SharedDataset,
    write_rows,
};

const QUERY_HELP: &str = "Queries:
  mission-count-by-company <company>
  success-rate-by-company <company>
  missions-in-date-range <start-date> <end-date>
  top-companies-by-count <n>
  mission-status-counts
  missions-in-year <year>
  most-used-rocket
  average-missions-per-year <start-year> <end-year>";

#[derive(Parser)]
#[command(
    name = "missions",
    version,
    about = "Filter and summarise historical space-launch missions"
)]
struct Cli {
    /// Mission table (CSV with Mission, Company, Date, Rocket, RocketStatus, MissionStatus, Price).
    #[arg(long, global = true, default_value = "space_missions.csv")]
    data: PathBuf,

    /// Field delimiter of the mission table.
    #[arg(long, global = true)]
    delimiter: Option<char>,

    /// Also write warnings and errors to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Do not print warnings to stderr.
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the dashboard summary for a filter state.
    Summary(SummaryArgs),
    /// List the choices each filter offers.
    Options(OptionsArgs),
    /// Run one analytic query against the full dataset.
    #[command(after_help = QUERY_HELP)]
    Query(QueryArgs),
    /// Write the filtered rows as CSV or TSV.
    Export(ExportArgs),
}

#[derive(Args, Clone)]
struct FilterArgs {
    /// First launch date to include (YYYY-MM-DD). Open when only --to is given.
    #[arg(long, value_parser = parse_cli_date)]
    from: Option<Date>,

    /// Last launch date to include (YYYY-MM-DD). Open when only --from is given.
    #[arg(long, value_parser = parse_cli_date)]
    to: Option<Date>,

    /// Keep only these companies (repeatable or comma-separated).
    #[arg(long = "company", value_delimiter = ',')]
    companies: Vec<String>,

    /// Keep only these mission outcomes (repeatable or comma-separated).
    #[arg(long = "status", value_delimiter = ',')]
    statuses: Vec<String>,

    /// Rocket status: all, active, or retired.
    #[arg(long, default_value = "all")]
    rocket_status: RocketStatusFilter,
}

#[derive(Args)]
struct SummaryArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Emit JSON instead of human readable output.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct OptionsArgs {
    /// Emit JSON instead of human readable output.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct QueryArgs {
    /// Query name, e.g. missions-in-year.
    name: String,

    /// Query arguments.
    args: Vec<String>,

    /// Emit JSON instead of human readable output.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Output file. Writes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Separate fields with tabs.
    #[arg(long)]
    tsv: bool,

    /// Write header row.
    #[arg(long = "headers", action = ArgAction::SetTrue, default_value_t = true)]
    headers: bool,
    /// Disable header row.
    #[arg(long = "no-headers", action = ArgAction::SetFalse, overrides_with = "headers")]
    _no_headers: bool,
}

type AnyError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logger::log_error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AnyError> {
    logger::set_quiet(cli.quiet);
    if let Some(path) = &cli.log_file {
        logger::set_log_file(path)?;
    }
    let _prefix = logger::set_log_prefix(cli.data.display().to_string());

    let mut options = ReadOptions::new();
    if let Some(delimiter) = cli.delimiter {
        options = options.with_delimiter_char(delimiter)?;
    }
    let shared = SharedDataset::with_options(&cli.data, options);

    match &cli.command {
        Command::Summary(args) => run_summary(&shared, args),
        Command::Options(args) => run_options(&shared, args),
        Command::Query(args) => run_query(&shared, args),
        Command::Export(args) => run_export(&shared, args),
    }
}

fn parse_cli_date(raw: &str) -> Result<Date, String> {
    parse_date(raw).ok_or_else(|| format!("'{raw}' is not a YYYY-MM-DD date"))
}

fn build_spec(dataset: &Dataset, filters: &FilterArgs) -> FilterSpec {
    FilterOptions::from_dataset(dataset)
        .date_spec(filters.from, filters.to)
        .with_companies(filters.companies.iter().cloned())
        .with_statuses(filters.statuses.iter().cloned())
        .with_rocket_status(filters.rocket_status)
        .normalized()
}

fn format_rate(rate: f64) -> String {
    ryu::Buffer::new().format(round2(rate)).to_owned()
}

fn run_summary(shared: &SharedDataset, args: &SummaryArgs) -> Result<(), AnyError> {
    let dataset = shared.get()?;
    let spec = build_spec(&dataset, &args.filters);
    let view = spec.apply(&dataset);
    let summary = DashboardSummary::build(&view);

    if args.json {
        serde_json::to_writer_pretty(io::stdout(), &summary)?;
        println!();
        return Ok(());
    }

    println!(
        "Total Missions: {:<12} Success Rate: {}%",
        group_thousands(summary.total_missions),
        format_rate(summary.success_rate)
    );
    println!(
        "Companies: {:<17} Active Rockets: {}",
        summary.companies, summary.active_rockets
    );

    println!("\nMissions over time:");
    for point in &summary.missions_per_year {
        println!("  {:>4}  {}", point.year, point.missions);
    }

    println!("\nMission status distribution:");
    for (status, count) in summary.status_distribution.entries() {
        println!("  {:<18} {count}", status.as_str());
    }

    println!("\nTop companies by mission count:");
    for entry in &summary.top_companies {
        println!("  {:<24} {}", entry.company, entry.missions);
    }

    println!("\nSuccess rate over time:");
    for point in &summary.success_by_year {
        println!(
            "  {:>4}  {:>6}%  ({} missions)",
            point.year,
            format_rate(point.success_rate),
            point.total_missions
        );
    }

    println!("\n{}", summary.showing_caption());
    Ok(())
}

fn run_options(shared: &SharedDataset, args: &OptionsArgs) -> Result<(), AnyError> {
    let dataset = shared.get()?;
    let options = FilterOptions::from_dataset(&dataset);

    if args.json {
        serde_json::to_writer_pretty(io::stdout(), &options)?;
        println!();
        return Ok(());
    }

    let span = |date: Option<Date>| date.map(|d| d.to_string()).unwrap_or_default();
    println!(
        "Date range: {} .. {}",
        span(options.first_date),
        span(options.last_date)
    );
    println!("Companies: {}", options.companies.join(", "));
    println!("Mission statuses: {}", options.statuses.join(", "));
    let choices: Vec<&str> = options.rocket_statuses.iter().map(|c| c.as_str()).collect();
    println!("Rocket statuses: {}", choices.join(", "));
    Ok(())
}

fn run_query(shared: &SharedDataset, args: &QueryArgs) -> Result<(), AnyError> {
    let kind: QueryKind = args.name.parse()?;
    let dataset = shared.get()?;
    let answer = Query::parse(kind, &args.args).run(&dataset);

    if args.json {
        serde_json::to_writer_pretty(io::stdout(), &answer)?;
        println!();
        return Ok(());
    }

    let text = answer.to_string();
    if text.ends_with('\n') || text.is_empty() {
        print!("{text}");
    } else {
        println!("{text}");
    }
    Ok(())
}

fn run_export(shared: &SharedDataset, args: &ExportArgs) -> Result<(), AnyError> {
    let dataset = shared.get()?;
    let spec = build_spec(&dataset, &args.filters);
    let view = spec.apply(&dataset);
    let delimiter = if args.tsv { b'\t' } else { b',' };

    let written = if let Some(path) = &args.out {
        export_into(&view, BufWriter::new(File::create(path)?), delimiter, args.headers)?
    } else {
        export_into(&view, io::stdout().lock(), delimiter, args.headers)?
    };
    logger::log_info(&format!(
        "exported {written} of {} missions",
        dataset.len()
    ));
    Ok(())
}

fn export_into<W: Write>(
    view: &FilteredView<'_>,
    output: W,
    delimiter: u8,
    headers: bool,
) -> Result<u64, AnyError> {
    let mut sink = CsvSink::new(output)
        .with_delimiter(delimiter)
        .with_headers(headers);
    write_rows(view, &mut sink)?;
    Ok(sink.rows_written())
}
