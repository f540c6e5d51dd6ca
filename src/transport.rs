//! Byte-stream transport seam between the session and the network.

pub mod in_memory;
pub mod tcp;

/// A connected, message-oriented byte stream.
///
/// `recv` yields whatever chunk the underlying stream produced; callers must
/// not assume one chunk is one protocol line. An empty chunk signals an
/// orderly close.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, bytes: &[u8]) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Vec<u8>>;
}
