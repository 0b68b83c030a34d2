use chrono::Utc;
use clap::{Parser, Subcommand};
use idrec::config::debug_enabled;
use idrec::tools::{ScanReport, dataset_iter, dataset_root_from_env, read_points, scan_file, scan_paths};
use idrec::{Polygon, QrScanner, ScanLedger, Selector, compute_area, parse_reply};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "idtool", version, about = "Label barcode selection tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan one image and print the payload of the largest barcode
    Scan {
        #[arg(long)]
        image: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Record the payload for this user in the ledger
        #[arg(long, requires = "ledger")]
        user: Option<String>,
        /// Ledger file (JSON), created when missing
        #[arg(long)]
        ledger: Option<PathBuf>,
    },
    /// Compute the area of a polygon read from a points file
    Area {
        #[arg(long)]
        points: PathBuf,
    },
    /// Scan every image under a directory in parallel
    Batch {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print a user's ledger records as CSV, newest first
    Export {
        #[arg(long)]
        ledger: PathBuf,
        #[arg(long)]
        user: String,
    },
    /// Parse a vision-model reply
    Reply {
        #[arg(long)]
        text: String,
    },
}

fn init_tracing() {
    let default = if debug_enabled() { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let ok = match cli.command {
        Command::Scan {
            image,
            json,
            user,
            ledger,
        } => scan_cmd(&image, json, user.as_deref(), ledger.as_deref()),
        Command::Area { points } => area_cmd(&points),
        Command::Batch { root, limit } => batch_cmd(root, limit),
        Command::Export { ledger, user } => export_cmd(&ledger, &user),
        Command::Reply { text } => reply_cmd(&text),
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn print_report(report: &ScanReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(text) => println!("{text}"),
            Err(err) => error!(error = %err, "failed to serialize report"),
        }
        return;
    }
    println!("Image: {}", report.path.display());
    println!("Found {} barcodes", report.detections);
    match (&report.payload, report.area) {
        (Some(payload), Some(area)) => println!("Largest: {payload} (area {area:.1})"),
        _ => println!("Largest: none"),
    }
}

fn scan_cmd(image: &Path, json: bool, user: Option<&str>, ledger_path: Option<&Path>) -> bool {
    let selector = Selector::from_env();
    let report = match scan_file(&QrScanner::new(), &selector, image) {
        Ok(report) => report,
        Err(err) => {
            error!(error = %err, "scan failed");
            return false;
        }
    };
    print_report(&report, json);

    if let (Some(user), Some(path), Some(payload)) = (user, ledger_path, &report.payload) {
        return record_in_ledger(path, user, payload);
    }
    true
}

fn load_ledger(path: &Path) -> Option<ScanLedger> {
    match fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str::<ScanLedger>(&text) {
            Ok(ledger) => Some(ledger),
            Err(err) => {
                error!(path = %path.display(), error = %err, "ledger is not valid JSON");
                None
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Some(ScanLedger::new()),
        Err(err) => {
            error!(path = %path.display(), error = %err, "failed to read ledger");
            None
        }
    }
}

fn record_in_ledger(path: &Path, user: &str, payload: &str) -> bool {
    let Some(mut ledger) = load_ledger(path) else {
        return false;
    };

    ledger.record(user, payload, Utc::now());
    let written = serde_json::to_string_pretty(&ledger)
        .map_err(|err| err.to_string())
        .and_then(|text| fs::write(path, text).map_err(|err| err.to_string()));
    match written {
        Ok(()) => {
            info!(user, records = ledger.len(user), "ledger updated");
            true
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "failed to write ledger");
            false
        }
    }
}

fn export_cmd(path: &Path, user: &str) -> bool {
    let Some(ledger) = load_ledger(path) else {
        return false;
    };
    match ledger.write_csv(user, std::io::stdout().lock()) {
        Ok(()) => true,
        Err(err) => {
            error!(error = %err, "failed to write csv");
            false
        }
    }
}

fn area_cmd(points: &Path) -> bool {
    match read_points(points) {
        Ok(pts) => {
            let polygon = Polygon::new(pts);
            if !polygon.is_well_formed() {
                error!(vertices = polygon.len(), "need at least 3 points");
                return false;
            }
            println!("Vertices: {}", polygon.len());
            println!("Area: {:.3}", compute_area(&polygon));
            true
        }
        Err(err) => {
            error!(error = %err, "failed to read points");
            false
        }
    }
}

fn batch_cmd(root: Option<PathBuf>, limit: Option<usize>) -> bool {
    let root = root.unwrap_or_else(dataset_root_from_env);
    if !root.exists() {
        error!(root = %root.display(), "dataset root not found");
        return false;
    }

    let images: Vec<PathBuf> = dataset_iter(&root, limit).collect();
    if images.is_empty() {
        println!("No images found under {}", root.display());
        return true;
    }

    let start = Instant::now();
    let results = scan_paths(&QrScanner::new(), &Selector::from_env(), &images);
    let elapsed = start.elapsed();

    let mut hits = 0usize;
    for (path, result) in images.iter().zip(&results) {
        match result {
            Ok(report) => match &report.payload {
                Some(payload) => {
                    hits += 1;
                    println!("{}: {} ({} barcodes)", path.display(), payload, report.detections);
                }
                None => println!("{}: none", path.display()),
            },
            Err(err) => println!("{}: error: {}", path.display(), err),
        }
    }

    println!(
        "\n{}/{} images yielded a barcode ({:.2?})",
        hits,
        images.len(),
        elapsed
    );
    true
}

fn reply_cmd(text: &str) -> bool {
    match parse_reply(text) {
        Ok(reply) => {
            println!("Code: {}", reply.code);
            if let Some(value) = reply.value() {
                println!("Value: {value}");
            }
            true
        }
        Err(err) => {
            error!(error = %err, "unrecognized reply");
            false
        }
    }
}
