use clap::{Parser, Subcommand};
use metaball::metaball::{DEFAULT_BAND_THICKNESS, DEFAULT_BAND_THINNING, DEFAULT_SCALE_RATE};
use metaball::protocol::{self, Request};
use metaball::{BandTuning, Circle, Metaball};
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "metaball", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the indicator window
    Show,
    /// Hide the indicator window
    Hide,
    /// Set the number of pages
    Count { count: i32 },
    /// Glide to a page
    Page { page: i32 },
    /// Move the scroll position to <page> + <offset>
    #[command(allow_negative_numbers = true)]
    Scroll {
        page: i32,
        #[arg(value_parser = parse_finite)]
        offset: f32,
    },
    /// Select a page without scrolling
    Select { page: i32 },
    /// Start or stop the automatic sweep
    Sweep {
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
    /// Write the current frame to a PNG file
    Snapshot { path: PathBuf },
    /// Print the render plan for a cursor circle and a fixed circle
    Plan {
        /// Cursor circle as X,Y,R
        #[arg(long, value_parser = parse_circle)]
        moving: Circle,
        /// Fixed circle as X,Y,R
        #[arg(long, value_parser = parse_circle)]
        fixed: Circle,
        /// Distance at which the band snaps (defaults to 4x the cursor radius)
        #[arg(long)]
        max_length: Option<f32>,
        #[arg(long, default_value_t = DEFAULT_SCALE_RATE)]
        scale_rate: f32,
        #[arg(long, default_value_t = DEFAULT_BAND_THICKNESS)]
        thickness: f32,
        #[arg(long, default_value_t = DEFAULT_BAND_THINNING)]
        thinning: f32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let request = match cli.command {
        Commands::Show => Request::Show,
        Commands::Hide => Request::Hide,
        Commands::Count { count } => Request::Count(count),
        Commands::Page { page } => Request::Page(page),
        Commands::Scroll { page, offset } => Request::Scroll { page, offset },
        Commands::Select { page } => Request::Select(page),
        Commands::Sweep { state } => Request::Sweep(state == "on"),
        Commands::Snapshot { path } => Request::Snapshot(std::path::absolute(path)?),
        Commands::Plan {
            moving,
            fixed,
            max_length,
            scale_rate,
            thickness,
            thinning,
        } => {
            let tuning = BandTuning {
                scale_rate,
                thickness: thickness.clamp(0.0, 1.0),
                thinning: thinning.max(0.0),
            };
            let max_length = max_length.unwrap_or(moving.radius * 4.0);
            print!("{}", Metaball::new(tuning, max_length).blend(&moving, &fixed));
            return Ok(());
        }
    };

    send_request(&request)
}

fn parse_finite(s: &str) -> Result<f32, String> {
    match s.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(format!("'{}' is not a finite number", s)),
        Err(e) => Err(format!("'{}': {}", s, e)),
    }
}

fn parse_circle(s: &str) -> Result<Circle, String> {
    let parts = s
        .split(',')
        .map(|p| parse_finite(p.trim()))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, r] => Ok(Circle::new(*x, *y, *r)),
        _ => Err(format!("expected X,Y,R but got '{}'", s)),
    }
}

fn send_request(request: &Request) -> anyhow::Result<()> {
    let path = protocol::socket_path();
    let mut stream = UnixStream::connect(&path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to pagedots at {}: {}. Is pagedots running?",
            path.display(),
            e
        )
    })?;

    log::debug!("Sending '{}'", request);
    writeln!(stream, "{}", request)?;
    Ok(())
}
