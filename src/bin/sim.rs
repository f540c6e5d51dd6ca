//! Seeded loopback game: two sessions paired by an in-process relay over
//! in-memory transports, both firing random shots.

use armada::transport::in_memory::InMemoryTransport;
use armada::transport::Transport;
use armada::{
    place_fleet, GameOutcome, GameSession, LineReader, Message, Position, QuietPresenter,
    RandomInput, DEFAULT_GAME_ID, FLEET, GRID_SIZE,
};
use rand::{rngs::SmallRng, SeedableRng};

async fn wait_ready(
    reader: &mut LineReader,
    transport: &mut InMemoryTransport,
) -> anyhow::Result<String> {
    loop {
        let Some(line) = reader.next_line(transport).await? else {
            anyhow::bail!("client left before pairing");
        };
        if let Ok(Message::Ready { name, .. }) = Message::decode(&line) {
            return Ok(name);
        }
    }
}

/// Minimal stand-in for the matchmaking server: pair both clients, then
/// forward chunks verbatim until either side closes.
async fn run_relay(
    mut a: InMemoryTransport,
    mut b: InMemoryTransport,
    game_id: String,
) -> anyhow::Result<()> {
    let mut reader_a = LineReader::new();
    let mut reader_b = LineReader::new();
    let name_a = wait_ready(&mut reader_a, &mut a).await?;
    let name_b = wait_ready(&mut reader_b, &mut b).await?;
    a.send(
        Message::Start {
            position: Position::First,
            opponent: name_b,
            game_id: game_id.clone(),
        }
        .encode()
        .as_bytes(),
    )
    .await?;
    b.send(
        Message::Start {
            position: Position::Second,
            opponent: name_a,
            game_id,
        }
        .encode()
        .as_bytes(),
    )
    .await?;
    loop {
        tokio::select! {
            chunk = a.recv() => {
                let chunk = chunk?;
                if chunk.is_empty() {
                    break;
                }
                b.send(&chunk).await?;
            }
            chunk = b.recv() => {
                let chunk = chunk?;
                if chunk.is_empty() {
                    break;
                }
                a.send(&chunk).await?;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let own1 = place_fleet(&mut rng1, GRID_SIZE, &FLEET).map_err(|e| anyhow::anyhow!(e))?;
    let own2 = place_fleet(&mut rng2, GRID_SIZE, &FLEET).map_err(|e| anyhow::anyhow!(e))?;

    let (t1, relay1) = InMemoryTransport::pair();
    let (t2, relay2) = InMemoryTransport::pair();
    let relay = tokio::spawn(run_relay(relay1, relay2, DEFAULT_GAME_ID.to_string()));

    let f1 = async move {
        let mut session = GameSession::new(
            "player1",
            DEFAULT_GAME_ID,
            own1,
            Box::new(t1),
            Box::new(RandomInput::new(rng1)),
            Box::new(QuietPresenter),
        );
        session.run().await
    };
    let f2 = async move {
        let mut session = GameSession::new(
            "player2",
            DEFAULT_GAME_ID,
            own2,
            Box::new(t2),
            Box::new(RandomInput::new(rng2)),
            Box::new(QuietPresenter),
        );
        session.run().await
    };

    let (o1, o2) = tokio::try_join!(f1, f2)?;
    relay.await??;

    println!("player1: {}", o1);
    println!("player2: {}", o2);
    let winner = match (o1, o2) {
        (GameOutcome::Win, GameOutcome::Loss) => "player1",
        (GameOutcome::Loss, GameOutcome::Win) => "player2",
        _ => "none",
    };
    println!("winner: {}", winner);
    Ok(())
}
