use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::transport::Transport;

/// Receive buffer size for a single read.
const READ_CHUNK: usize = 1024;

pub struct TcpTransport {
    stream: TcpStream,
    shutdown: Arc<AtomicBool>,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    /// Request graceful shutdown: every later transport operation fails
    /// instead of touching the stream.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        if self.is_shutdown() {
            return Err(anyhow::anyhow!("Transport is shut down"));
        }
        self.stream.write_all(bytes).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::BrokenPipe
                || e.kind() == std::io::ErrorKind::ConnectionReset
            {
                anyhow::anyhow!("Connection closed by peer")
            } else {
                anyhow::anyhow!("Write error: {}", e)
            }
        })
    }

    async fn recv(&mut self) -> anyhow::Result<Vec<u8>> {
        if self.is_shutdown() {
            return Err(anyhow::anyhow!("Transport is shut down"));
        }
        let mut buf = vec![0u8; READ_CHUNK];
        let n = self.stream.read(&mut buf).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::ConnectionReset {
                anyhow::anyhow!("Connection reset by peer")
            } else {
                anyhow::anyhow!("Read error: {}", e)
            }
        })?;
        buf.truncate(n);
        Ok(buf)
    }
}
