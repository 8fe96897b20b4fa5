//! Minimal HTTP/1.1 serving loop.
//!
//! Raw tokio, one spawned task per accepted connection, one request per
//! connection (`Connection: close`). Everything beyond reading a request
//! head and a `Content-Length` body is out of scope here; the pipeline
//! does the actual work.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use waypoint_router::{Method, Request, Response};

use crate::app::Pipeline;

/// Binds `addr` and serves the pipeline until the process exits.
pub async fn serve(addr: &str, pipeline: Pipeline) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        let pipeline = pipeline.clone();
        tokio::spawn(async move {
            if let Err(err) = serve_connection(stream, pipeline).await {
                tracing::debug!(%peer, error = %err, "connection ended");
            }
        });
    }
}

async fn serve_connection(stream: TcpStream, pipeline: Pipeline) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);

    let request = match read_request(&mut reader).await {
        Ok(Some(request)) => request,
        Ok(None) => return Ok(()),
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            return write_response(&mut writer, &Response::bad_request(), false).await;
        }
        Err(err) => return Err(err),
    };

    let head_only = request.method == Method::Head;
    let response = match pipeline.handle(request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(error = %err, "handler failure reached the serving boundary");
            Response::internal_server_error()
        }
    };

    write_response(&mut writer, &response, head_only).await
}

/// Reads one request head and body off the connection.
///
/// Returns `Ok(None)` on a connection closed before a request line, and
/// `InvalidData` for anything that is not parseable HTTP/1.x.
async fn read_request<R>(reader: &mut R) -> io::Result<Option<Request>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    if reader.read_line(&mut line).await? == 0 {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let method = parts
        .next()
        .and_then(Method::parse)
        .ok_or_else(|| invalid("unsupported method"))?;
    let target = parts.next().ok_or_else(|| invalid("missing target"))?;
    let version = parts.next().ok_or_else(|| invalid("missing version"))?;
    if !version.starts_with("HTTP/1.") {
        return Err(invalid("unsupported protocol version"));
    }

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, query),
        None => (target, ""),
    };

    let mut request = Request::new(method, path);
    request.query = Request::parse_query_string(query);

    loop {
        let mut header_line = String::new();
        if reader.read_line(&mut header_line).await? == 0 {
            return Err(invalid("connection closed inside header block"));
        }
        let header_line = header_line.trim_end();
        if header_line.is_empty() {
            break;
        }
        let (name, value) = header_line
            .split_once(':')
            .ok_or_else(|| invalid("malformed header line"))?;
        request
            .headers
            .insert(name.trim().to_string(), value.trim().to_string());
    }

    let content_length = request
        .get_header("Content-Length")
        .map(str::parse::<usize>)
        .transpose()
        .map_err(|_| invalid("malformed Content-Length"))?
        .unwrap_or(0);

    if content_length > 0 {
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).await?;
        request.body = body;
    }

    Ok(Some(request))
}

async fn write_response<W>(writer: &mut W, response: &Response, head_only: bool) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut head = format!(
        "HTTP/1.1 {} {}\r\n",
        response.status,
        response.status_text()
    );
    for (name, value) in &response.headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str(&format!("Content-Length: {}\r\n", response.body.len()));
    head.push_str("Connection: close\r\n\r\n");

    writer.write_all(head.as_bytes()).await?;
    if !head_only {
        writer.write_all(&response.body).await?;
    }
    writer.flush().await
}

fn invalid(reason: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, reason.to_string())
}
