#![allow(dead_code)]

pub mod test_server {
    use burnit::server::{BurnService, HttpServer, Limits, ServerHandle};
    use burnit::MemoryStore;
    use std::net::{SocketAddr, TcpListener};
    use std::path::PathBuf;
    use std::sync::{Arc, Once};

    /// Ensures May coroutines are configured only once
    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }

    /// Running service on an ephemeral port; stopped on drop.
    pub struct TestServer {
        handle: Option<ServerHandle>,
        pub addr: SocketAddr,
    }

    impl TestServer {
        pub fn start() -> Self {
            Self::start_with(Limits::default(), None)
        }

        pub fn start_with(limits: Limits, static_dir: Option<PathBuf>) -> Self {
            setup_may_runtime();
            let service = BurnService::new(Arc::new(MemoryStore::new()), limits, static_dir);
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);
            let handle = HttpServer(service).start(addr).unwrap();
            handle.wait_ready().unwrap();
            Self {
                handle: Some(handle),
                addr,
            }
        }

        pub fn origin(&self) -> url::Url {
            url::Url::parse(&format!("http://{}", self.addr)).unwrap()
        }
    }

    impl Drop for TestServer {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.stop();
            }
        }
    }
}

pub mod http {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    /// Status, lowercase headers and body of a raw HTTP/1.1 response.
    #[derive(Debug)]
    pub struct RawReply {
        pub status: u16,
        pub headers: Vec<(String, String)>,
        pub body: Vec<u8>,
    }

    impl RawReply {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        }

        pub fn text(&self) -> String {
            String::from_utf8_lossy(&self.body).into_owned()
        }

        pub fn json(&self) -> serde_json::Value {
            serde_json::from_slice(&self.body).unwrap()
        }
    }

    pub fn send_request(addr: &SocketAddr, req: &[u8]) -> RawReply {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_millis(200)))
            .unwrap();
        let mut buf = Vec::new();
        loop {
            let mut tmp = [0u8; 4096];
            match stream.read(&mut tmp) {
                Ok(0) => break,
                Ok(n) => {
                    buf.extend_from_slice(&tmp[..n]);
                    if response_complete(&buf) {
                        break;
                    }
                }
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break
                }
                Err(e) => panic!("read error: {:?}", e),
            }
        }
        parse_reply(&buf)
    }

    pub fn get(addr: &SocketAddr, path: &str) -> RawReply {
        send_request(
            addr,
            format!("GET {path} HTTP/1.1\r\nHost: test\r\n\r\n").as_bytes(),
        )
    }

    pub fn post(addr: &SocketAddr, path: &str, content_type: &str, body: &[u8]) -> RawReply {
        let mut req = format!(
            "POST {path} HTTP/1.1\r\nHost: test\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\n\r\n",
            body.len()
        )
        .into_bytes();
        req.extend_from_slice(body);
        send_request(addr, &req)
    }

    fn split_head(buf: &[u8]) -> Option<(&[u8], &[u8])> {
        buf.windows(4)
            .position(|w| w == b"\r\n\r\n")
            .map(|pos| (&buf[..pos], &buf[pos + 4..]))
    }

    fn content_length(head: &[u8]) -> Option<usize> {
        String::from_utf8_lossy(head).lines().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
    }

    fn response_complete(buf: &[u8]) -> bool {
        match split_head(buf) {
            Some((head, body)) => content_length(head).is_some_and(|len| body.len() >= len),
            None => false,
        }
    }

    fn parse_reply(buf: &[u8]) -> RawReply {
        let (head, body) = split_head(buf).unwrap_or((buf, &[]));
        let head = String::from_utf8_lossy(head);
        let mut lines = head.lines();
        let status = lines
            .next()
            .and_then(|l| l.split_whitespace().nth(1))
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let headers = lines
            .filter_map(|l| l.split_once(':'))
            .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
            .collect();
        RawReply {
            status,
            headers,
            body: body.to_vec(),
        }
    }
}

pub mod mock_endpoint {
    use std::io::Read;
    use std::net::SocketAddr;
    use std::sync::mpsc::{channel, Receiver};
    use std::thread;

    /// What the mock saw for one request.
    #[derive(Debug, Clone)]
    pub struct Captured {
        pub method: String,
        pub url: String,
        pub content_type: Option<String>,
        pub body: Vec<u8>,
    }

    /// tiny_http server answering each request with the next canned reply.
    pub struct MockEndpoint {
        pub addr: SocketAddr,
        pub requests: Receiver<Captured>,
    }

    impl MockEndpoint {
        pub fn start(replies: Vec<(u16, &str)>) -> Self {
            let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
            let addr = server.server_addr().to_ip().unwrap();
            let replies: Vec<(u16, String)> =
                replies.into_iter().map(|(s, b)| (s, b.to_string())).collect();
            let (tx, rx) = channel();

            thread::spawn(move || {
                for (status, body) in replies {
                    let Ok(mut request) = server.recv() else {
                        return;
                    };
                    let mut captured_body = Vec::new();
                    request.as_reader().read_to_end(&mut captured_body).unwrap();
                    let content_type = request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("Content-Type"))
                        .map(|h| h.value.as_str().to_string());
                    let _ = tx.send(Captured {
                        method: request.method().as_str().to_string(),
                        url: request.url().to_string(),
                        content_type,
                        body: captured_body,
                    });
                    let header = tiny_http::Header::from_bytes(
                        &b"Content-Type"[..],
                        &b"application/json"[..],
                    )
                    .unwrap();
                    let response = tiny_http::Response::from_string(body)
                        .with_status_code(status)
                        .with_header(header);
                    let _ = request.respond(response);
                }
            });

            Self { addr, requests: rx }
        }

        pub fn origin(&self) -> url::Url {
            url::Url::parse(&format!("http://{}", self.addr)).unwrap()
        }
    }
}
