//! Command objects
//!
//! A [`Command`] pairs an ordered argument list with a protocol choice and
//! caches both its encoded wire bytes and the reply it received. The caches
//! are invalidated whenever the arguments or the protocol change, so a
//! command can be mutated and re-executed, or recycled wholesale with
//! [`Command::reset`].
//!
//! For one-shot execution without an intermediate object, see [`exec_args`]
//! and [`exec_str`].

use crate::buffer::ByteBuffer;
use crate::error::{RedisError, Result};
use crate::network::Connection;
use crate::protocol::{decode_reply, encode_command, lookup_spec, Protocol, Reply};

/// A single Redis command: protocol choice, arguments, and cached
/// encoding/reply.
///
/// `args[0]` is the command name. Argument indexing is 0-based across the
/// whole list, command name included.
#[derive(Debug, Clone)]
pub struct Command {
    protocol: Protocol,
    args: Vec<ByteBuffer>,
    encoded: Option<ByteBuffer>,
    reply: Option<Reply>,
}

impl Command {
    /// Create a command named `name`.
    ///
    /// For the legacy protocol the name is validated against the command
    /// table immediately; the multibulk protocol accepts any name and leaves
    /// validation to the server.
    pub fn new(protocol: Protocol, name: &str) -> Result<Self> {
        if protocol == Protocol::Legacy && lookup_spec(name.as_bytes()).is_none() {
            return Err(RedisError::UnknownCommand(name.to_string()));
        }
        Ok(Self {
            protocol,
            args: vec![ByteBuffer::from_text(name)],
            encoded: None,
            reply: None,
        })
    }

    /// Create a command from an ordered argument sequence; `args[0]` is the
    /// command name.
    pub fn from_args<A: AsRef<[u8]>>(protocol: Protocol, args: &[A]) -> Result<Self> {
        let name = args.first().ok_or(RedisError::EmptyCommand)?;
        if protocol == Protocol::Legacy && lookup_spec(name.as_ref()).is_none() {
            return Err(RedisError::UnknownCommand(
                String::from_utf8_lossy(name.as_ref()).into_owned(),
            ));
        }
        Ok(Self {
            protocol,
            args: args.iter().map(|a| ByteBuffer::new(a.as_ref())).collect(),
            encoded: None,
            reply: None,
        })
    }

    /// Create a command by tokenizing `text` with SQL-like quoting rules.
    ///
    /// Tokens split on whitespace. A `'` toggles a quoted region in which
    /// whitespace is literal, and `''` (inside or outside a quoted region) is
    /// the escape for a literal `'`. Fails with `UnbalancedQuote` if a quoted
    /// region is still open at end of input. For the legacy protocol the
    /// first token is validated against the command table, as in
    /// [`Command::new`].
    pub fn from_quoted_string(protocol: Protocol, text: &str) -> Result<Self> {
        let bytes = text.as_bytes();
        let mut args: Vec<ByteBuffer> = Vec::new();
        let mut token: Vec<u8> = Vec::new();
        let mut in_quote = false;

        let mut i = 0;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        while i < bytes.len() {
            let b = bytes[i];
            if b == b'\'' {
                if bytes.get(i + 1) == Some(&b'\'') {
                    token.push(b'\'');
                    i += 2;
                    continue;
                }
                in_quote = !in_quote;
                i += 1;
                continue;
            }
            if !in_quote && b.is_ascii_whitespace() {
                args.push(ByteBuffer::from(std::mem::take(&mut token)));
                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                continue;
            }
            token.push(b);
            i += 1;
        }
        if in_quote {
            return Err(RedisError::UnbalancedQuote);
        }
        if !token.is_empty() {
            args.push(ByteBuffer::from(token));
        }

        if protocol == Protocol::Legacy {
            let name = args.first().ok_or(RedisError::EmptyCommand)?;
            if lookup_spec(name.as_bytes()).is_none() {
                return Err(RedisError::UnknownCommand(name.as_text().into_owned()));
            }
        }

        Ok(Self {
            protocol,
            args,
            encoded: None,
            reply: None,
        })
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Change the request framing; discards the cached encoding
    pub fn set_protocol(&mut self, protocol: Protocol) {
        if self.protocol != protocol {
            self.protocol = protocol;
            self.encoded = None;
        }
    }

    pub fn args(&self) -> &[ByteBuffer] {
        &self.args
    }

    /// Append an argument; invalidates the cached encoding and reply
    pub fn add_arg(&mut self, arg: impl AsRef<[u8]>) {
        self.args.push(ByteBuffer::new(arg.as_ref()));
        self.invalidate();
    }

    /// Replace the argument at `index` (0-based, the command name is slot 0);
    /// invalidates the cached encoding and reply
    pub fn set_arg(&mut self, index: usize, arg: impl AsRef<[u8]>) -> Result<()> {
        if index >= self.args.len() {
            return Err(RedisError::ArgIndexOutOfBounds {
                index,
                len: self.args.len(),
            });
        }
        self.args[index] = ByteBuffer::new(arg.as_ref());
        self.invalidate();
        Ok(())
    }

    /// Clear args and caches so the command can be reused; if `name` is
    /// given, reseed the argument list with it
    pub fn reset(&mut self, name: Option<&str>) {
        self.args.clear();
        self.invalidate();
        if let Some(name) = name {
            self.args.push(ByteBuffer::from_text(name));
        }
    }

    /// The wire bytes for this command, building and caching them if needed
    pub fn encoded(&mut self) -> Result<&ByteBuffer> {
        let built = match self.encoded.take() {
            Some(buf) => buf,
            None => encode_command(self.protocol, &self.args)?,
        };
        Ok(self.encoded.insert(built))
    }

    /// The reply from the last execution, if any
    pub fn reply(&self) -> Option<&Reply> {
        self.reply.as_ref()
    }

    /// Take ownership of the cached reply
    pub fn take_reply(&mut self) -> Option<Reply> {
        self.reply.take()
    }

    /// Execute this command over `conn`: build the encoding if absent, send
    /// it, receive one buffer and decode exactly one reply from it.
    ///
    /// Any bytes past the first reply are ignored; standalone execution
    /// expects the receive boundary to align with one reply.
    pub fn exec<C: Connection + ?Sized>(&mut self, conn: &mut C) -> Result<&Reply> {
        let wire = self.encoded()?.duplicate();
        conn.send(wire.as_bytes())?;
        let rdata = conn.receive()?;
        let (reply, consumed) = decode_reply(&rdata)?;
        tracing::trace!(
            sent = wire.len(),
            received = rdata.len(),
            consumed,
            "command executed"
        );
        Ok(&*self.reply.insert(reply))
    }

    /// Private copy for batching: same protocol and args, empty caches
    pub(crate) fn detached(&self) -> Command {
        Command {
            protocol: self.protocol,
            args: self.args.clone(),
            encoded: None,
            reply: None,
        }
    }

    pub(crate) fn attach_reply(&mut self, reply: Reply) {
        self.reply = Some(reply);
    }

    fn invalidate(&mut self) {
        self.encoded = None;
        self.reply = None;
    }
}

/// Execute a command given as an ordered argument sequence, in one round
/// trip, without keeping a [`Command`] around.
pub fn exec_args<C, A>(conn: &mut C, protocol: Protocol, args: &[A]) -> Result<Reply>
where
    C: Connection + ?Sized,
    A: AsRef<[u8]>,
{
    let mut cmd = Command::from_args(protocol, args)?;
    Ok(cmd.exec(conn)?.clone())
}

/// Execute a command given as a quoted string (see
/// [`Command::from_quoted_string`]) in one round trip.
pub fn exec_str<C: Connection + ?Sized>(
    conn: &mut C,
    protocol: Protocol,
    text: &str,
) -> Result<Reply> {
    let mut cmd = Command::from_quoted_string(protocol, text)?;
    Ok(cmd.exec(conn)?.clone())
}
