use std::sync::Arc;

use choros::fetch::{Endpoints, Source, load_blocking};
use choros::render::{
    COUNTIES_OBJECT, DeterministicTextMeasurer, Equirectangular, Identity, PointerEvent,
    Projection, build_scene,
};
use choros::{ChartOptions, FipsCode, JoinPolicy, Rgb, join_counties, terrapin};
use serde::Serialize;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Fetch(choros::fetch::FetchError),
    Chart(choros::Error),
    Topology(terrapin::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Fetch(err) => write!(f, "{err}"),
            CliError::Chart(err) => write!(f, "{err}"),
            CliError::Topology(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<choros::fetch::FetchError> for CliError {
    fn from(value: choros::fetch::FetchError) -> Self {
        Self::Fetch(value)
    }
}

impl From<choros::Error> for CliError {
    fn from(value: choros::Error) -> Self {
        Self::Chart(value)
    }
}

impl From<terrapin::Error> for CliError {
    fn from(value: terrapin::Error) -> Self {
        Self::Topology(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Join,
}

#[derive(Debug, Clone, Copy, Default)]
enum ProjectionKind {
    #[default]
    Identity,
    Equirectangular,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    counties: Option<String>,
    education: Option<String>,
    join_policy: JoinPolicy,
    projection: ProjectionKind,
    hover: Option<u32>,
    pointer: Option<(f64, f64)>,
    low_color: Option<String>,
    high_color: Option<String>,
    pretty: bool,
    out: Option<String>,
}

fn usage() -> &'static str {
    "choros-cli\n\
\n\
USAGE:\n\
  choros-cli [render] [--counties <url|path>] [--education <url|path>] [--projection identity|equirectangular] [--join-policy strict|skip|zero-fill] [--low-color <color>] [--high-color <color>] [--hover <fips>] [--pointer <x,y>] [--out <path>]\n\
  choros-cli join [--counties <url|path>] [--education <url|path>] [--join-policy strict|skip|zero-fill] [--pretty]\n\
\n\
NOTES:\n\
  - Dataset sources default to the freeCodeCamp CDN; pass file paths to work offline.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - --hover highlights a county and fills the tooltip before serializing; --pointer places it.\n\
  - join prints the joined county records as JSON.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "join" => args.command = Command::Join,
            "--pretty" => args.pretty = true,
            "--counties" => {
                let Some(value) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.counties = Some(value.clone());
            }
            "--education" => {
                let Some(value) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.education = Some(value.clone());
            }
            "--join-policy" => {
                let Some(policy) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.join_policy = match policy.as_str() {
                    "strict" => JoinPolicy::Strict,
                    "skip" => JoinPolicy::Skip,
                    "zero-fill" | "zero" => JoinPolicy::ZeroFill,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--projection" => {
                let Some(kind) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.projection = match kind.as_str() {
                    "identity" => ProjectionKind::Identity,
                    "equirectangular" => ProjectionKind::Equirectangular,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--hover" => {
                let Some(fips) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.hover = Some(
                    fips.trim()
                        .parse::<u32>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--pointer" => {
                let Some(point) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let Some((x, y)) = point.split_once(',') else {
                    return Err(CliError::Usage(usage()));
                };
                let x = x.trim().parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                let y = y.trim().parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(x.is_finite() && y.is_finite()) {
                    return Err(CliError::Usage(usage()));
                }
                args.pointer = Some((x, y));
            }
            "--low-color" => {
                let Some(color) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.low_color = Some(color.clone());
            }
            "--high-color" => {
                let Some(color) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.high_color = Some(color.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let mut endpoints = Endpoints::default();
    if let Some(counties) = args.counties.as_deref() {
        endpoints.counties = Source::parse(counties);
    }
    if let Some(education) = args.education.as_deref() {
        endpoints.education = Source::parse(education);
    }
    let (topology, records) = load_blocking(&endpoints)?;

    let mut options = ChartOptions {
        join_policy: args.join_policy,
        ..ChartOptions::default()
    };
    if let Some(low) = args.low_color.as_deref() {
        options.low_color = Rgb::parse(low)?;
    }
    if let Some(high) = args.high_color.as_deref() {
        options.high_color = Rgb::parse(high)?;
    }

    match args.command {
        Command::Join => {
            let counties = join_counties(
                terrapin::feature_collection(&topology, COUNTIES_OBJECT)?,
                &records,
                options.join_policy,
            )?;
            write_json(&counties, args.pretty)
        }
        Command::Render => {
            let projection: Box<dyn Projection> = match args.projection {
                ProjectionKind::Identity => Box::new(Identity),
                ProjectionKind::Equirectangular => Box::new(Equirectangular {
                    width: options.width,
                    height: options.height,
                }),
            };
            let mut scene = build_scene(
                &topology,
                &records,
                &options,
                projection.as_ref(),
                Arc::new(DeterministicTextMeasurer::default()),
            )?;
            if let Some(fips) = args.hover {
                scene.pointer(PointerEvent::Enter(FipsCode(fips)));
            }
            if let Some((x, y)) = args.pointer {
                scene.pointer(PointerEvent::Move { x, y });
            }
            write_text(&scene.to_svg(), args.out.as_deref())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
