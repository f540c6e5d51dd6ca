use std::sync::Arc;
use std::thread;
use std::time::Duration;

use armada::{DigitSource, InputSource, Mailbox, PadInput};

#[test]
fn mailbox_latest_wins() {
    let mailbox = Mailbox::new();
    assert_eq!(mailbox.take(), None);
    mailbox.publish('1');
    mailbox.publish('2');
    // the unread '1' is overwritten, not queued
    assert_eq!(mailbox.take(), Some('2'));
    assert_eq!(mailbox.take(), None);
}

#[test]
fn mailbox_handoff_is_ordered_across_threads() {
    let mailbox = Arc::new(Mailbox::new());
    let writer = {
        let mailbox = mailbox.clone();
        thread::spawn(move || {
            for v in 0u32..1000 {
                mailbox.publish(v);
            }
        })
    };

    // reads observe a monotone subsequence of the writes: values are always
    // complete and never reordered, and the final write is never lost
    let mut last = None;
    loop {
        if let Some(v) = mailbox.take() {
            if let Some(prev) = last {
                assert!(v > prev, "read {} after {}", v, prev);
            }
            last = Some(v);
            if v == 999 {
                break;
            }
        } else {
            thread::yield_now();
        }
    }
    writer.join().unwrap();
    assert_eq!(last, Some(999));
}

struct ScriptedDigits {
    keys: std::vec::IntoIter<char>,
}

impl ScriptedDigits {
    fn new(keys: &str) -> Self {
        Self {
            keys: keys.chars().collect::<Vec<_>>().into_iter(),
        }
    }
}

impl DigitSource for ScriptedDigits {
    fn poll(&mut self) -> Option<char> {
        self.keys.next()
    }
}

/// Pad input paced so the game loop drains every key: the pump publishes
/// every 50ms while the reader polls every millisecond.
fn paced_pad(keys: &str) -> PadInput {
    PadInput::with_intervals(
        ScriptedDigits::new(keys),
        Duration::from_millis(50),
        Duration::from_millis(1),
    )
}

#[test]
fn pad_entry_submits_on_hash() {
    let mut pad = paced_pad("3#");
    assert_eq!(pad.next_coordinate("row", 10).unwrap(), 3);
    pad.stop();
}

#[test]
fn pad_star_erases_last_digit() {
    let mut pad = paced_pad("7*3#");
    assert_eq!(pad.next_coordinate("row", 10).unwrap(), 3);
    pad.stop();
}

#[test]
fn pad_reprompts_out_of_range_entry() {
    // "99" is rejected for a 10-wide board and the entry restarts
    let mut pad = paced_pad("99#4#");
    assert_eq!(pad.next_coordinate("col", 10).unwrap(), 4);
    // stop is idempotent
    pad.stop();
    pad.stop();
}
