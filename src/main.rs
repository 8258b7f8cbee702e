use clap::Parser;
use geourl::location::{AxisOrder, Normalizer};
use geourl::providers::{self, Conversion};
use std::process::ExitCode;

/// Translate a geolocation into links for other map services.
///
/// Accepts decimal degrees, degrees/minutes/seconds with hemisphere letters,
/// and map URLs from the supported providers.
///
/// Examples:
///   geourl "27.175015,78.042155"
///   geourl "30°34′15″N 104°3′38″E"
///   geourl "https://www.google.com/maps/@45.876349,9.655686,10z"
///   geourl --provider openstreetmap --provider bing "49.440603,11.004759"
///   geourl --lon-lat "18.0686 59.3293"
///   geourl --json -- "-33.8688,151.2093"
///   geourl --serve --port 8080
#[derive(Parser)]
#[command(name = "geourl", version, about, long_about = None)]
struct Cli {
    /// Location strings or map URLs, one per argument. Put inputs starting
    /// with `-` after `--`.
    #[arg(value_name = "GEO", required_unless_present_any = ["serve", "list_providers"])]
    geo: Vec<String>,

    /// Emit JSON instead of plain lines.
    #[arg(long)]
    json: bool,

    /// Only render these providers (repeatable). See --list-providers.
    #[arg(long = "provider", short = 'p', value_name = "NAME")]
    providers: Vec<String>,

    /// Read bare decimal pairs as longitude first.
    #[arg(long)]
    lon_lat: bool,

    /// Print the supported providers and exit.
    #[arg(long)]
    list_providers: bool,

    /// Serve the HTTP API instead of converting arguments.
    #[arg(long)]
    serve: bool,

    /// Bind address for --serve.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for --serve.
    #[arg(long, default_value_t = 3030)]
    port: u16,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let order = if cli.lon_lat { AxisOrder::LonLat } else { AxisOrder::LatLon };
    let normalizer = Normalizer::with_axis_order(order);

    if cli.list_providers {
        for p in providers::all() {
            println!("{:<14} {}", p.name, p.label);
        }
        return ExitCode::SUCCESS;
    }

    if cli.serve {
        return serve(&cli.host, cli.port, normalizer);
    }

    // Reject a bad --provider before converting anything.
    for name in &cli.providers {
        if let Err(e) = providers::find(name) {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    }

    let mut failed = false;
    for geo in &cli.geo {
        let conversion = normalizer
            .normalize(geo)
            .and_then(|r| Conversion::new(&r, &cli.providers));
        match conversion {
            Ok(conv) => print_conversion(&conv, cli.json),
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_conversion(conv: &Conversion, json: bool) {
    if json {
        match serde_json::to_string_pretty(conv) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Error: {}", e),
        }
        return;
    }
    println!("{}", conv.canonical);
    for u in &conv.urls {
        println!("{}", u.url);
    }
}

fn serve(host: &str, port: u16, normalizer: Normalizer) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: Cannot start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };
    match runtime.block_on(geourl::server::start(host, port, normalizer)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: Cannot serve on {}:{}: {}", host, port, e);
            ExitCode::FAILURE
        }
    }
}
