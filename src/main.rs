use std::io::Read as _;

use clap::{Parser, ValueEnum};
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::time::Duration;

use armada::{
    place_fleet, print_grid, ConsoleInput, ConsolePresenter, DigitSource, GameSession,
    InputSource, PadInput, TcpTransport, DEFAULT_GAME_ID, DEFAULT_SERVER, FLEET, GRID_SIZE,
};

#[derive(ValueEnum, Clone, Debug)]
enum InputMode {
    /// Type each coordinate as a line.
    Console,
    /// Pad-style digit entry: '#' enters, '*' erases.
    Pad,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Display name announced to the relay server.
    #[arg(long)]
    name: String,

    /// Relay server address.
    #[arg(long, default_value = DEFAULT_SERVER)]
    server: String,

    /// Game identifier used for pairing.
    #[arg(long, default_value = DEFAULT_GAME_ID)]
    game_id: String,

    /// Coordinate input style.
    #[arg(long, value_enum, default_value_t = InputMode::Console)]
    input: InputMode,

    #[arg(long, help = "Fix RNG seed for reproducible fleet placement (e.g., --seed 12345)")]
    seed: Option<u64>,
}

/// Replays stdin characters as pad key events; stands in for the physical
/// pad when none is wired up.
struct StdinDigits;

impl DigitSource for StdinDigits {
    fn poll(&mut self) -> Option<char> {
        let mut byte = [0u8; 1];
        match std::io::stdin().read(&mut byte) {
            Ok(1) if !byte[0].is_ascii_whitespace() => Some(byte[0] as char),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    armada::init_logging();
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(s) => {
            println!("Using fixed seed: {} (placement will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let own = place_fleet(&mut rng, GRID_SIZE, &FLEET).map_err(|e| anyhow::anyhow!(e))?;
    println!("Generated fleet board:");
    print_grid(&own, true);

    println!("Connecting to {} ...", cli.server);
    let transport = loop {
        tokio::select! {
            res = TcpTransport::connect(&cli.server) => match res {
                Ok(t) => break t,
                Err(e) => {
                    warn!("connect failed: {}; retrying in 5s", e);
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                println!("\nExiting...");
                return Ok(());
            }
        }
    };
    println!("Connected");

    let input: Box<dyn InputSource> = match cli.input {
        InputMode::Console => Box::new(ConsoleInput::new()),
        InputMode::Pad => Box::new(PadInput::new(StdinDigits)),
    };
    let mut session = GameSession::new(
        cli.name,
        cli.game_id,
        own,
        Box::new(transport),
        input,
        Box::new(ConsolePresenter::new()),
    );
    let stop = session.shutdown_handle();

    tokio::select! {
        res = session.run() => {
            let outcome = res?;
            info!("session finished: {}", outcome);
        }
        _ = tokio::signal::ctrl_c() => {
            stop.store(true, std::sync::atomic::Ordering::SeqCst);
            println!("\nExiting...");
        }
    }
    // Teardown order: input thread first, then the transport with the rest
    // of the session.
    session.close();
    Ok(())
}
