//! TCP and stdio transports.

use std::fmt::Display;
use std::future::Future;
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{
    stdin, stdout, AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite,
    AsyncWriteExt, BufReader,
};
use tokio::net::TcpListener;

use crate::server::session::{OutputFormat, Session};
use crate::Config;

/// Bytes accepted past the input bound so a `\r\n` ending still fits
const LINE_SLACK: usize = 2;

/// Pause after a failed accept, e.g. while the process is out of descriptors
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Start the interpreter front end described by `config`
pub async fn serve(config: Config) -> Result<()> {
    let format = if config.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let session = Session::new(config.interpreter(), format);

    if !config.commands.is_empty() {
        let mut out = stdout();
        run_commands(&config.commands, &session, &mut out).await?;
        return Ok(());
    }

    match &config.listen {
        Some(addr) => {
            let listener = TcpListener::bind(addr)
                .await
                .with_context(|| format!("binding {}", addr))?;
            log::info!("Listening on {}", listener.local_addr()?);
            serve_tcp(listener, session).await
        }
        None => {
            log::info!("Reading commands from stdin");
            serve_lines(BufReader::new(stdin()), stdout(), &session).await
        }
    }
}

/// Interpret each command and write one answer per line
pub async fn run_commands<W>(commands: &[String], session: &Session, writer: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    for command in commands {
        if let Some(reply) = session.handle_line(command) {
            writer.write_all(reply.as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }
    }
    writer.flush().await?;
    Ok(())
}

/// Accept connections forever, one task per client
pub async fn serve_tcp(listener: TcpListener, session: Session) -> Result<()> {
    let listener = &listener;
    serve_connections(move || listener.accept(), session).await
}

/// Run one line session per accepted connection.
///
/// A failed accept is logged and retried after a short pause; it never
/// takes down the clients already connected.
pub async fn serve_connections<A, F, S, P>(mut accept: A, session: Session) -> Result<()>
where
    A: FnMut() -> F,
    F: Future<Output = io::Result<(S, P)>>,
    S: AsyncRead + AsyncWrite + Send + 'static,
    P: Display + Send + 'static,
{
    loop {
        let (stream, peer) = match accept().await {
            Ok(connection) => connection,
            Err(e) => {
                log::warn!("Failed to accept connection: {}", e);
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        log::info!("Client connected: {}", peer);

        let session = session.clone();
        tokio::spawn(async move {
            let (read_half, write_half) = tokio::io::split(stream);
            if let Err(e) = serve_lines(BufReader::new(read_half), write_half, &session).await {
                log::warn!("Connection {} failed: {}", peer, e);
            }
            log::info!("Client disconnected: {}", peer);
        });
    }
}

/// Answer every line read from `reader` until end of input
pub async fn serve_lines<R, W>(mut reader: R, mut writer: W, session: &Session) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let limit = session.max_input_len() + LINE_SLACK;
    let mut line = Vec::new();

    loop {
        line.clear();
        if read_bounded_line(&mut reader, &mut line, limit).await? == 0 {
            break;
        }

        let text = String::from_utf8_lossy(&line);
        if let Some(reply) = session.handle_line(&text) {
            writer.write_all(reply.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    Ok(())
}

/// Read one line into `line`, keeping at most `limit` bytes of it.
///
/// The rest of an overlong line is consumed and dropped. Returns the number
/// of bytes kept; `0` means end of input.
pub async fn read_bounded_line<R>(
    reader: &mut R,
    line: &mut Vec<u8>,
    limit: usize,
) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let kept = (&mut *reader).take(limit as u64).read_until(b'\n', line).await?;
    if kept == limit && !line.ends_with(b"\n") {
        log::debug!("dropping the tail of a line longer than {} bytes", limit);
        skip_past_newline(reader).await?;
    }
    Ok(kept)
}

async fn skip_past_newline<R>(reader: &mut R) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            return Ok(());
        }
        let (used, done) = match buf.iter().position(|&b| b == b'\n') {
            Some(at) => (at + 1, true),
            None => (buf.len(), false),
        };
        reader.consume(used);
        if done {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Interpreter;

    #[tokio::test]
    async fn test_serve_lines_in_memory() {
        let session = Session::new(Interpreter::default(), OutputFormat::Text);
        let input: &[u8] = b"*IDN?\n\n:INP:\r\n*RST";
        let mut output = Vec::new();

        serve_lines(input, &mut output, &session).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("University of Utah"));
        assert_eq!(lines[1], "partial error");
        assert_eq!(lines[2], "command accepted");
    }

    #[tokio::test]
    async fn test_overlong_line_gets_one_reply() {
        let session = Session::new(Interpreter::default(), OutputFormat::Text);
        let mut input = b":INP:POS:a0:ANGL:IMM ".to_vec();
        input.resize(input.len() + 4 * 1024 * 1024, b'9');
        input.extend_from_slice(b"\n*OPC?\n");
        let mut output = Vec::new();

        serve_lines(input.as_slice(), &mut output, &session).await.unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "command accepted\nquery accepted\n"
        );
    }

    #[tokio::test]
    async fn test_read_bounded_line_caps_buffer() {
        let mut input = vec![b'x'; 64 * 1024];
        input.extend_from_slice(b"\n*RST\n");
        let mut reader = input.as_slice();
        let mut line = Vec::new();

        assert_eq!(read_bounded_line(&mut reader, &mut line, 16).await.unwrap(), 16);
        assert_eq!(line.len(), 16);

        line.clear();
        assert_eq!(read_bounded_line(&mut reader, &mut line, 16).await.unwrap(), 5);
        assert_eq!(line, b"*RST\n");

        line.clear();
        assert_eq!(read_bounded_line(&mut reader, &mut line, 16).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_line_exactly_at_limit_is_kept_whole() {
        let mut reader: &[u8] = b"*RST\n*OPC\n";
        let mut line = Vec::new();

        assert_eq!(read_bounded_line(&mut reader, &mut line, 5).await.unwrap(), 5);
        assert_eq!(line, b"*RST\n");

        line.clear();
        assert_eq!(read_bounded_line(&mut reader, &mut line, 5).await.unwrap(), 5);
        assert_eq!(line, b"*OPC\n");
    }

    #[tokio::test]
    async fn test_accept_errors_do_not_stop_serving() {
        use std::collections::VecDeque;
        use tokio::io::{duplex, DuplexStream};

        let session = Session::new(Interpreter::default(), OutputFormat::Text);
        let (client, server_end) = duplex(1024);
        let mut script: VecDeque<io::Result<(DuplexStream, &'static str)>> =
            VecDeque::from([
                Err(io::Error::from(io::ErrorKind::ConnectionAborted)),
                Err(io::Error::other("too many open files")),
                Ok((server_end, "client-1")),
            ]);

        let server = tokio::spawn(serve_connections(
            move || {
                let next = script.pop_front();
                async move {
                    match next {
                        Some(result) => result,
                        None => std::future::pending().await,
                    }
                }
            },
            session,
        ));

        let (read_half, mut write_half) = tokio::io::split(client);
        let mut lines = BufReader::new(read_half).lines();
        write_half.write_all(b"*RST\n").await.unwrap();

        let reply = tokio::time::timeout(Duration::from_secs(5), lines.next_line())
            .await
            .expect("reply in time")
            .unwrap();
        assert_eq!(reply.as_deref(), Some("command accepted"));
        assert!(!server.is_finished());
        server.abort();
    }

    #[tokio::test]
    async fn test_run_commands() {
        let session = Session::new(Interpreter::default(), OutputFormat::Text);
        let commands = vec!["*OPC?".to_string(), "*OPC".to_string()];
        let mut output = Vec::new();

        run_commands(&commands, &session, &mut output).await.unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "query accepted\ncommand accepted\n"
        );
    }
}
