//! Coordinate input sources and the single-slot digit mailbox.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::Rng;

/// Blocking provider of validated shot coordinates.
///
/// Implementations own their prompt/re-prompt loop and never yield a value
/// outside `[0, bound)`.
pub trait InputSource: Send {
    fn next_coordinate(&mut self, prompt: &str, bound: usize) -> anyhow::Result<usize>;

    /// Stop any background activity. Called once during session teardown.
    fn stop(&mut self) {}
}

/// Line-based input from stdin.
pub struct ConsoleInput;

impl ConsoleInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for ConsoleInput {
    fn next_coordinate(&mut self, prompt: &str, bound: usize) -> anyhow::Result<usize> {
        loop {
            print!("{} (0-{}): ", prompt, bound - 1);
            io::stdout().flush()?;
            let mut line = String::new();
            if io::stdin().read_line(&mut line)? == 0 {
                return Err(anyhow::anyhow!("stdin closed"));
            }
            match line.trim().parse::<usize>() {
                Ok(v) if v < bound => return Ok(v),
                _ => println!("Enter a number between 0 and {}", bound - 1),
            }
        }
    }
}

/// Single-slot handoff between the pad poll thread and the game loop.
///
/// A fresh symbol overwrites an unread one (latest wins); a read takes the
/// most recent complete value or nothing. The mutex makes the write/read
/// pair linearizable: a value is never observed half-written.
pub struct Mailbox<T> {
    slot: Mutex<Option<T>>,
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    pub fn publish(&self, value: T) {
        *self.slot.lock().unwrap() = Some(value);
    }

    pub fn take(&self) -> Option<T> {
        self.slot.lock().unwrap().take()
    }
}

/// Raw key event source, the seam in front of the physical pad hardware.
/// `poll` reports the symbol currently pressed, if any.
pub trait DigitSource: Send + 'static {
    fn poll(&mut self) -> Option<char>;
}

/// Background thread polling a [`DigitSource`] and publishing every decoded
/// symbol into a [`Mailbox`].
pub struct DigitPump {
    mailbox: Arc<Mailbox<char>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl DigitPump {
    pub fn start(mut source: impl DigitSource, poll_interval: Duration) -> Self {
        let mailbox = Arc::new(Mailbox::new());
        let stop = Arc::new(AtomicBool::new(false));
        let handle = {
            let mailbox = mailbox.clone();
            let stop = stop.clone();
            thread::spawn(move || {
                while !stop.load(Ordering::SeqCst) {
                    if let Some(symbol) = source.poll() {
                        mailbox.publish(symbol);
                    }
                    thread::sleep(poll_interval);
                }
            })
        };
        Self {
            mailbox,
            stop,
            handle: Some(handle),
        }
    }

    pub fn mailbox(&self) -> Arc<Mailbox<char>> {
        self.mailbox.clone()
    }

    /// Signal the poll thread and join it.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for DigitPump {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Pad-style input: digits accumulate until `#` submits, `*` rubs out the
/// last digit, and out-of-range values restart the entry.
pub struct PadInput {
    pump: DigitPump,
    mailbox: Arc<Mailbox<char>>,
    read_interval: Duration,
}

impl PadInput {
    pub fn new(source: impl DigitSource) -> Self {
        Self::with_intervals(
            source,
            Duration::from_millis(10),
            Duration::from_millis(100),
        )
    }

    pub fn with_intervals(
        source: impl DigitSource,
        poll_interval: Duration,
        read_interval: Duration,
    ) -> Self {
        let pump = DigitPump::start(source, poll_interval);
        let mailbox = pump.mailbox();
        Self {
            pump,
            mailbox,
            read_interval,
        }
    }

    fn next_symbol(&self) -> char {
        loop {
            if let Some(symbol) = self.mailbox.take() {
                return symbol;
            }
            thread::sleep(self.read_interval);
        }
    }
}

impl InputSource for PadInput {
    fn next_coordinate(&mut self, prompt: &str, bound: usize) -> anyhow::Result<usize> {
        print!("{} (digits, '#' to enter, '*' to erase): ", prompt);
        io::stdout().flush()?;
        let mut entry = String::new();
        loop {
            match self.next_symbol() {
                '*' => {
                    if entry.pop().is_some() {
                        print!("\u{8} \u{8}");
                        io::stdout().flush()?;
                    }
                }
                '#' => {
                    println!();
                    match entry.parse::<usize>() {
                        Ok(v) if v < bound => return Ok(v),
                        _ => {
                            println!("Enter a number between 0 and {}", bound - 1);
                            print!("{} (digits, '#' to enter, '*' to erase): ", prompt);
                            io::stdout().flush()?;
                            entry.clear();
                        }
                    }
                }
                d if d.is_ascii_digit() => {
                    entry.push(d);
                    print!("{}", d);
                    io::stdout().flush()?;
                }
                _ => {}
            }
        }
    }

    fn stop(&mut self) {
        self.pump.stop();
    }
}

/// Uniform random coordinates; the non-interactive stand-in used by the
/// loopback simulation. The session's duplicate-target check handles
/// repeats.
pub struct RandomInput {
    rng: SmallRng,
}

impl RandomInput {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }
}

impl InputSource for RandomInput {
    fn next_coordinate(&mut self, _prompt: &str, bound: usize) -> anyhow::Result<usize> {
        Ok(self.rng.random_range(0..bound))
    }
}
