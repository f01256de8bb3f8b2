//! Local relay server shared by the integration tests.

#![allow(dead_code)]

use std::net::TcpListener;
use std::thread;

use tiny_http::{Header, Response, Server};

pub const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns:yt="http://www.youtube.com/xml/schemas/2015" xmlns="http://www.w3.org/2005/Atom">
 <title>test channel</title>
 <entry>
  <yt:videoId>older0001</yt:videoId>
  <title>test channel: the older one</title>
  <published>2024-01-01T00:00:00+00:00</published>
 </entry>
 <entry>
  <yt:videoId>newer0002</yt:videoId>
  <title>test channel: the newer one</title>
  <published>2024-06-01T00:00:00+00:00</published>
 </entry>
 <entry>
  <title>test channel: premiere without id</title>
  <published>2024-07-01T00:00:00+00:00</published>
 </entry>
</feed>"#;

/// A relay with several behaviours, selected by path:
/// `/raw?<target>` echoes the feed, `/wrapped?url=<target>` returns it in a
/// JSON envelope, `/broken?` answers with an HTML error page and `/down?`
/// responds 503.
pub struct Relay {
    pub base: String,
}

impl Relay {
    pub fn start() -> Self {
        let server = Server::http("127.0.0.1:0").expect("bind relay");
        let port = server
            .server_addr()
            .to_ip()
            .expect("relay listens on ip")
            .port();

        thread::spawn(move || {
            for request in server.incoming_requests() {
                let url = request.url().to_string();
                let response = if url.starts_with("/raw?") {
                    Response::from_string(FEED).with_status_code(200)
                } else if url.starts_with("/wrapped?url=") {
                    let body = serde_json::json!({ "contents": FEED, "status": { "http_code": 200 } });
                    Response::from_string(body.to_string())
                        .with_status_code(200)
                        .with_header(
                            Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                                .expect("header"),
                        )
                } else if url.starts_with("/broken?") {
                    Response::from_string("<html><body><h1>Oops").with_status_code(200)
                } else {
                    Response::from_string("unavailable").with_status_code(503)
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base: format!("http://127.0.0.1:{port}"),
        }
    }

    pub fn prefix(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// A prefix pointing at a port nobody is listening on.
pub fn closed_prefix() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let port = listener.local_addr().expect("probe addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/?")
}
