//! Scripted registration service for client tests
//!
//! Listens on a loopback port and serves one scripted `Step` per accepted
//! connection. What each connection carried is sent back to the test over
//! a channel.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use coursereg::protocol::{
    encode_frame, read_frame, read_stream_header, write_frame, write_stream_header, Message,
};
use coursereg::{Config, Course, ProtocolClient, RegistrationForm};
use crossbeam::channel::{unbounded, Receiver};

/// What the service does once it has read the expected requests
pub enum Reply {
    /// Send one framed message
    Message(Message),

    /// Send raw bytes as-is
    Raw(Vec<u8>),

    /// Close the write half without answering
    Hangup,

    /// Say nothing and wait for the client to give up
    Silent,

    /// Open with a foreign stream header instead of ours
    BadHeader,
}

/// Script for one connection
pub struct Step {
    /// Number of request frames to read before replying
    pub expect: usize,
    pub reply: Reply,
}

impl Step {
    pub fn new(expect: usize, reply: Reply) -> Self {
        Self { expect, reply }
    }

    /// One request answered with a course list
    pub fn courses(courses: Vec<Course>) -> Self {
        Self::new(1, Reply::Message(Message::Courses(courses)))
    }

    /// Two requests answered with a text message
    pub fn confirm(text: &str) -> Self {
        Self::new(2, Reply::Message(Message::Text(text.to_string())))
    }
}

/// What the service observed on one connection
#[derive(Debug)]
pub struct Observed {
    /// Request frames, in arrival order
    pub requests: Vec<Message>,

    /// Whether the client closed its side after the exchange
    pub client_closed: bool,
}

pub struct MockService {
    addr: SocketAddr,
    observed: Receiver<Observed>,
}

impl MockService {
    /// Start serving `steps`, one per accepted connection
    pub fn start(steps: Vec<Step>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = unbounded();

        thread::spawn(move || {
            for step in steps {
                let stream = match listener.accept() {
                    Ok((stream, _)) => stream,
                    Err(_) => return,
                };
                if tx.send(serve(stream, step)).is_err() {
                    return;
                }
            }
        });

        Self { addr, observed: rx }
    }

    pub fn config(&self) -> Config {
        Config::builder()
            .host("127.0.0.1")
            .port(self.addr.port())
            .timeouts_ms(2000)
            .build()
    }

    pub fn client(&self) -> ProtocolClient {
        ProtocolClient::new(self.config()).unwrap()
    }

    /// Wait for the report of the next served connection
    pub fn next_observed(&self) -> Observed {
        self.observed
            .recv_timeout(Duration::from_secs(5))
            .expect("mock service reported nothing")
    }
}

fn serve(mut stream: TcpStream, step: Step) -> Observed {
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();

    if let Reply::BadHeader = step.reply {
        let _ = stream.write_all(b"JAVA\x00\x05");
        return Observed {
            requests: Vec::new(),
            client_closed: wait_for_close(&mut stream),
        };
    }

    write_stream_header(&mut stream).unwrap();
    read_stream_header(&mut stream).unwrap();

    let mut requests = Vec::new();
    for _ in 0..step.expect {
        match read_frame(&mut stream, u32::MAX) {
            Ok(message) => requests.push(message),
            Err(_) => {
                return Observed {
                    requests,
                    client_closed: false,
                }
            }
        }
    }

    match step.reply {
        Reply::Message(message) => {
            let _ = write_frame(&mut stream, &message);
        }
        Reply::Raw(bytes) => {
            let _ = stream.write_all(&bytes);
        }
        Reply::Hangup => {
            let _ = stream.shutdown(Shutdown::Write);
        }
        Reply::Silent | Reply::BadHeader => {}
    }

    Observed {
        requests,
        client_closed: wait_for_close(&mut stream),
    }
}

/// Drain the stream until the client closes it
fn wait_for_close(stream: &mut TcpStream) -> bool {
    let mut buf = [0u8; 256];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => return true,
            Ok(_) => continue,
            Err(_) => return false,
        }
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn hiver_courses() -> Vec<Course> {
    vec![
        Course::new("IFT1015", "Programmation 1"),
        Course::new("IFT2015", "Algorithmes"),
    ]
}

pub fn sample_form(course: Course) -> RegistrationForm {
    RegistrationForm::new("Ada", "Lovelace", "ada.lovelace@umontreal.ca", "20231234", course)
        .unwrap()
}

/// A valid frame with its last payload byte flipped
pub fn corrupted_frame(message: &Message) -> Vec<u8> {
    let mut bytes = encode_frame(message).unwrap().to_vec();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    bytes
}

/// A port nothing is listening on
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
