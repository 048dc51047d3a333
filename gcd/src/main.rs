use anyhow::{Context as _, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use gcd::{
    Format, repl,
    session::{Request, Response, Session},
};
use gcd_core::{
    Distance, Location, Nominatim, Sampling,
    defaults::{
        DEFAULT_END, DEFAULT_GEOCODE_ENDPOINT, DEFAULT_GEOCODE_TIMEOUT, DEFAULT_PRECISION,
        DEFAULT_START, DEFAULT_USER_AGENT, MAX_GEOCODE_RESULTS,
    },
    time::Duration,
};
use std::{
    io::{self, Write as _},
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Great-circle distance, azimuths and geodesic path")]
struct Command {
    /// log filter used when `RUST_LOG` is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// distance, azimuths and path between two locations
    Solve(SolveArgs),
    /// coordinates of a place name
    Search {
        /// free text place name
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        #[command(flatten)]
        geocoder: GeocoderArgs,
    },
    /// read `solve` and `search` commands from stdin
    Repl {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        #[arg(long, default_value_t = DEFAULT_PRECISION)]
        precision: usize,

        #[command(flatten)]
        geocoder: GeocoderArgs,
    },
}

#[derive(Args)]
struct SolveArgs {
    #[arg(long, default_value_t = DEFAULT_START, allow_hyphen_values = true)]
    from: Location,

    #[arg(long, default_value_t = DEFAULT_END, allow_hyphen_values = true)]
    to: Location,

    /// number of path segments
    #[arg(long, conflicts_with = "step")]
    points: Option<usize>,

    /// distance between two path points, `1000km` when neither is given
    #[arg(long)]
    step: Option<Distance>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,
}

impl SolveArgs {
    fn sampling(&self) -> Sampling {
        match (self.points, self.step) {
            (Some(count), _) => Sampling::Count(count),
            (None, Some(step)) => Sampling::Step(step),
            (None, None) => Sampling::default(),
        }
    }
}

#[derive(Args)]
struct GeocoderArgs {
    #[arg(long, default_value = DEFAULT_GEOCODE_ENDPOINT)]
    endpoint: String,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    #[arg(long, default_value_t = Duration::new(DEFAULT_GEOCODE_TIMEOUT))]
    timeout: Duration,

    #[arg(long, default_value_t = MAX_GEOCODE_RESULTS)]
    limit: usize,
}

impl GeocoderArgs {
    fn build(self) -> Result<Nominatim> {
        Nominatim::builder()
            .endpoint(self.endpoint)
            .user_agent(self.user_agent)
            .timeout(self.timeout.into_duration())
            .limit(self.limit)
            .build()
            .context("Failed to set up the geocoder")
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level `{level}`"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow!("Failed to install the logger: {error}"))
}

fn solve(args: SolveArgs) -> Result<ExitCode> {
    let sampling = args.sampling();
    tracing::debug!(from = %args.from, to = %args.to, %sampling, "solve");

    let report = match Session::new(()).solve(args.from, args.to, sampling) {
        Ok(report) => report,
        Err(error) => {
            eprintln!("Cannot compute the path: {error}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut stdout = io::stdout().lock();
    match args.format {
        Format::Text => writeln!(stdout, "{}", report.to_text(args.precision))?,
        Format::Geojson => {
            serde_json::to_writer_pretty(&mut stdout, &report.to_geojson(args.precision))?;
            writeln!(stdout)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn search(query: Vec<String>, geocoder: GeocoderArgs) -> Result<ExitCode> {
    let session = Session::new(geocoder.build()?);
    let query = query.join(" ");
    tracing::debug!(%query, "search");

    let response = session.handle(Request::Search { query });
    let text = response.to_text(DEFAULT_PRECISION);

    if let Response::Error(_) = response {
        eprintln!("{text}");
        return Ok(ExitCode::FAILURE);
    }

    println!("{text}");
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let cmd = Command::parse();

    init_logging(&cmd.log_level)?;

    match cmd.action {
        Action::Solve(args) => solve(args),
        Action::Search { query, geocoder } => search(query, geocoder),
        Action::Repl {
            format,
            precision,
            geocoder,
        } => {
            let session = Session::new(geocoder.build()?);
            repl::run(
                &session,
                io::stdin().lock(),
                io::stdout().lock(),
                format,
                precision,
            )?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
