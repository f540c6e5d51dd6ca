use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::task::yield_now;

use crate::transport::Transport;

/// Loopback transport for tests and simulation. Each send becomes one chunk
/// on the peer's queue; a dropped peer reads as an orderly close.
pub struct InMemoryTransport {
    recv_queue: Arc<Mutex<VecDeque<Vec<u8>>>>,
    send_queue: Arc<Mutex<VecDeque<Vec<u8>>>>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let q1 = Arc::new(Mutex::new(VecDeque::new()));
        let q2 = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                recv_queue: q1.clone(),
                send_queue: q2.clone(),
            },
            Self {
                recv_queue: q2,
                send_queue: q1,
            },
        )
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        let mut queue = self.send_queue.lock().unwrap();
        queue.push_back(bytes.to_vec());
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Vec<u8>> {
        loop {
            if let Some(chunk) = {
                let mut queue = self.recv_queue.lock().unwrap();
                queue.pop_front()
            } {
                return Ok(chunk);
            }
            if Arc::strong_count(&self.recv_queue) == 1 {
                return Ok(Vec::new());
            }
            yield_now().await;
        }
    }
}
