//! Pipelining and transactions
//!
//! [`CommandBatch`] sends any number of commands in a single round trip and
//! decodes their replies positionally from one received buffer. Because RESP
//! carries no reply IDs, reply `i` can only be found after replies `0..i`
//! have consumed their exact byte ranges; the decoder's consumed-byte count
//! is what makes this possible.
//!
//! [`Transaction`] drives a MULTI/EXEC/DISCARD session. Its `in_multi` flag
//! lives on the transaction value, never in process-global state, so separate
//! connections cannot interfere with each other.

use crate::buffer::ByteBuffer;
use crate::command::Command;
use crate::error::{RedisError, Result};
use crate::network::Connection;
use crate::protocol::{decode_multibulk_header, decode_reply, Protocol, Reply};

// =============================================================================
// CommandBatch
// =============================================================================

/// An ordered sequence of commands executed in one send/receive round trip.
#[derive(Debug, Default)]
pub struct CommandBatch {
    commands: Vec<Command>,
    encoded: Option<ByteBuffer>,
}

impl CommandBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Append a private copy of `cmd` (arguments and protocol; caches are not
    /// carried over). The caller's command is not aliased.
    pub fn add(&mut self, cmd: &Command) {
        self.commands.push(cmd.detached());
        self.encoded = None;
    }

    /// Concatenate each member's encoding, in order, into one cached buffer
    pub fn build(&mut self) -> Result<&ByteBuffer> {
        let built = match self.encoded.take() {
            Some(buf) => buf,
            None => {
                let mut out = Vec::new();
                for cmd in &mut self.commands {
                    out.extend_from_slice(cmd.encoded()?.as_bytes());
                }
                ByteBuffer::from(out)
            }
        };
        Ok(self.encoded.insert(built))
    }

    /// Send the built buffer once, receive once, and decode exactly one reply
    /// per member from the received bytes, assigning them positionally.
    ///
    /// An empty batch is a no-op.
    pub fn exec<C: Connection + ?Sized>(&mut self, conn: &mut C) -> Result<()> {
        if self.commands.is_empty() {
            return Ok(());
        }
        let wire = self.build()?.duplicate();
        conn.send(wire.as_bytes())?;
        let rdata = conn.receive()?;

        let mut pos = 0;
        for cmd in &mut self.commands {
            let (reply, consumed) = decode_reply(&rdata[pos..])?;
            pos += consumed;
            cmd.attach_reply(reply);
        }
        tracing::debug!(
            commands = self.commands.len(),
            sent = wire.len(),
            received = pos,
            "pipeline executed"
        );
        Ok(())
    }

    /// Member at `index`, with its reply attached after `exec`
    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Replies in submission order; `None` for members not yet executed
    pub fn replies(&self) -> impl Iterator<Item = Option<&Reply>> {
        self.commands.iter().map(|cmd| cmd.reply())
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A MULTI/EXEC/DISCARD session over one connection.
///
/// Holds only the session-scoped `in_multi` flag. Commands issued between
/// [`Transaction::begin`] and [`Transaction::exec`] are queued by the server;
/// execute them individually (their immediate replies are `+QUEUED` status
/// lines) or through a [`CommandBatch`].
#[derive(Debug, Default)]
pub struct Transaction {
    in_multi: bool,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between a successful `begin` and the next `exec`/`discard`
    pub fn is_active(&self) -> bool {
        self.in_multi
    }

    /// Send MULTI and enter transaction mode.
    ///
    /// If the server answers with an error (no transaction support), the
    /// session stays out of transaction mode and `TransactionUnsupported` is
    /// returned.
    pub fn begin<C: Connection + ?Sized>(&mut self, conn: &mut C) -> Result<()> {
        let reply = round_trip(conn, "MULTI")?;
        if let Reply::Error(msg) = reply {
            return Err(RedisError::TransactionUnsupported(
                msg.as_text().into_owned(),
            ));
        }
        self.in_multi = true;
        tracing::debug!("transaction started");
        Ok(())
    }

    /// Send EXEC and decode the queued commands' replies.
    ///
    /// The reply buffer starts with a `*<N>\r\n` header followed by N full
    /// replies (of any type), decoded sequentially. A null array (`*-1`)
    /// means the server aborted the transaction and yields `None`.
    ///
    /// The `in_multi` flag is cleared regardless of the outcome.
    pub fn exec<C: Connection + ?Sized>(&mut self, conn: &mut C) -> Result<Option<Vec<Reply>>> {
        if !self.in_multi {
            return Err(RedisError::NotInTransaction);
        }
        self.in_multi = false;

        let mut cmd = Command::new(Protocol::MultiBulk, "EXEC")?;
        let wire = cmd.encoded()?.duplicate();
        conn.send(wire.as_bytes())?;
        let rdata = conn.receive()?;

        if rdata.first() == Some(&b'-') {
            let (reply, _) = decode_reply(&rdata)?;
            if let Reply::Error(msg) = reply {
                return Err(RedisError::TransactionUnsupported(
                    msg.as_text().into_owned(),
                ));
            }
        }

        let (count, mut pos) = decode_multibulk_header(&rdata)?;
        if count == -1 {
            tracing::debug!("transaction aborted by server");
            return Ok(None);
        }
        if count < 0 {
            return Err(RedisError::MalformedReply(format!(
                "invalid transaction reply count {count}"
            )));
        }

        // Untrusted wire-supplied count; the smallest possible reply is 3
        // bytes (an empty status line), so cap the preallocation by what the
        // buffer could hold.
        let possible = rdata.len().saturating_sub(pos) / 3;
        let mut replies = Vec::with_capacity((count as usize).min(possible));
        for _ in 0..count {
            let (reply, consumed) = decode_reply(&rdata[pos..])?;
            pos += consumed;
            replies.push(reply);
        }
        tracing::debug!(replies = replies.len(), "transaction executed");
        Ok(Some(replies))
    }

    /// Send DISCARD and abandon the queued commands.
    ///
    /// The `in_multi` flag is cleared regardless of the outcome.
    pub fn discard<C: Connection + ?Sized>(&mut self, conn: &mut C) -> Result<()> {
        if !self.in_multi {
            return Err(RedisError::NotInTransaction);
        }
        self.in_multi = false;

        let reply = round_trip(conn, "DISCARD")?;
        if let Reply::Error(msg) = reply {
            return Err(RedisError::TransactionUnsupported(
                msg.as_text().into_owned(),
            ));
        }
        tracing::debug!("transaction discarded");
        Ok(())
    }
}

/// One no-argument command, multibulk framing, one reply
fn round_trip<C: Connection + ?Sized>(conn: &mut C, name: &str) -> Result<Reply> {
    let mut cmd = Command::new(Protocol::MultiBulk, name)?;
    Ok(cmd.exec(conn)?.clone())
}
