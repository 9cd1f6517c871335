// tests/common/listing_server.rs
// =============================================================================
// Minimal HTTP/1.1 server that serves canned directory listings and files.
//
// Routes are matched on the request path with the query string removed.
// Unknown paths get 404. Every request path is recorded so tests can assert
// how often a page was fetched.
// =============================================================================

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub enum Route {
    /// 200 with text/html
    Html(String),
    /// 200 with application/octet-stream
    File(Vec<u8>),
    /// Bare status line with an empty body
    Status(u16),
}

pub struct ListingServer {
    port: u16,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ListingServer {
    /// Starts the server in a background thread. It runs until the process exits.
    pub fn start<P: Into<String>>(routes: impl IntoIterator<Item = (P, Route)>) -> Self {
        let routes: HashMap<String, Route> =
            routes.into_iter().map(|(p, r)| (p.into(), r)).collect();
        let routes = Arc::new(routes);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();

        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                thread::spawn(move || handle(stream, &routes, &log));
            }
        });

        ListingServer { port, requests }
    }

    /// "127.0.0.1:PORT", suitable for `--domain`
    pub fn domain(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Number of requests whose path (without query) equals `path`
    pub fn hits(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }

    pub fn total_requests(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// An Apache-style "Index of" page linking to each href in order.
pub fn listing(hrefs: &[&str]) -> Route {
    let mut html = String::from(
        "<html><head><title>Index of</title></head><body><h1>Index of</h1><table>\n\
         <tr><th><a href=\"?C=N;O=D\">Name</a></th><th><a href=\"?C=M;O=A\">Last modified</a></th></tr>\n",
    );
    for href in hrefs {
        html.push_str(&format!(
            "<tr><td><a href=\"{0}\">{0}</a></td><td>2023-01-05 10:00</td></tr>\n",
            href
        ));
    }
    html.push_str("</table></body></html>\n");
    Route::Html(html)
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };

    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    let path = target.split('?').next().unwrap_or("/").to_string();
    log.lock().unwrap().push(path.clone());

    let (status, content_type, body): (&str, &str, Vec<u8>) = match routes.get(&path) {
        Some(Route::Html(html)) => ("200 OK", "text/html", html.clone().into_bytes()),
        Some(Route::File(bytes)) => ("200 OK", "application/octet-stream", bytes.clone()),
        Some(Route::Status(code)) => {
            let line = format!("HTTP/1.1 {} Status\r\nContent-Length: 0\r\nConnection: close\r\n\r\n", code);
            let _ = stream.write_all(line.as_bytes());
            return;
        }
        None => ("404 Not Found", "text/plain", b"not found".to_vec()),
    };

    let header = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(&body);
}
