use tokio::{
    io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

/// Scripted replies of the test server. `STARTTLS` is advertised but always refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerBehavior {
    pub reject_auth: bool,
    pub reject_rcpt: bool,
}

/// Everything the client sent during one session.
#[derive(Debug, Default)]
pub struct RecordedSession {
    pub commands: Vec<String>,
    pub data: String,
    pub closed_by_client: bool,
}

impl RecordedSession {
    pub fn position(&self, verb: &str) -> Option<usize> {
        let verb = verb.to_ascii_uppercase();
        self.commands.iter().position(|command| command.to_ascii_uppercase().starts_with(&verb))
    }

    pub fn rcpt_to(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter(|command| command.to_ascii_uppercase().starts_with("RCPT TO:"))
            .map(String::as_str)
            .collect()
    }

    pub fn last_command(&self) -> Option<&str> {
        self.commands.last().map(String::as_str)
    }
}

pub struct TestServer {
    listener: TcpListener,
}

impl TestServer {
    pub async fn bind() -> Self {
        TestServer {
            listener: TcpListener::bind("127.0.0.1:0").await.unwrap(),
        }
    }

    /// A port on localhost with nothing listening on it.
    pub async fn closed_port() -> u16 {
        TestServer::bind().await.port()
    }

    pub fn port(&self) -> u16 {
        self.listener.local_addr().unwrap().port()
    }

    /// Serves a single SMTP session and returns what was recorded once the client disconnects.
    pub fn serve(self, behavior: ServerBehavior) -> JoinHandle<RecordedSession> {
        tokio::spawn(async move {
            let (stream, _) = self.listener.accept().await.unwrap();
            handle_session(stream, behavior).await
        })
    }

    /// Accepts one connection and returns the first byte the client sent, without greeting it.
    pub fn first_byte(self) -> JoinHandle<Option<u8>> {
        tokio::spawn(async move {
            let (mut stream, _) = self.listener.accept().await.unwrap();
            let mut byte = [0u8; 1];
            match stream.read_exact(&mut byte).await {
                Ok(_) => Some(byte[0]),
                Err(_) => None,
            }
        })
    }
}

async fn handle_session(stream: TcpStream, behavior: ServerBehavior) -> RecordedSession {
    let (read, mut write) = stream.into_split();
    let mut reader = BufReader::new(read);
    let mut session = RecordedSession::default();

    write.write_all(b"220 localhost ESMTP test server\r\n").await.unwrap();

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line).await {
            Ok(0) | Err(_) => {
                session.closed_by_client = true;
                break;
            }
            Ok(_) => {}
        }

        let command = line.trim_end().to_string();
        let verb = command.split_whitespace().next().unwrap_or_default().to_ascii_uppercase();
        session.commands.push(command);

        let reply: &[u8] = match verb.as_str() {
            "EHLO" => b"250-localhost\r\n250-AUTH PLAIN LOGIN\r\n250-STARTTLS\r\n250 8BITMIME\r\n",
            "STARTTLS" => b"454 4.7.0 TLS not available\r\n",
            "AUTH" if behavior.reject_auth => b"535 5.7.8 Authentication credentials invalid\r\n",
            "AUTH" => b"235 2.7.0 Authentication successful\r\n",
            "RCPT" if behavior.reject_rcpt => b"550 5.1.1 No such user\r\n",
            "MAIL" | "RCPT" => b"250 2.1.0 Ok\r\n",
            "DATA" => {
                let _ = write.write_all(b"354 End data with <CR><LF>.<CR><LF>\r\n").await;
                loop {
                    let mut data_line = String::new();
                    match reader.read_line(&mut data_line).await {
                        Ok(0) | Err(_) => break,
                        Ok(_) if data_line.trim_end() == "." => break,
                        Ok(_) => session.data.push_str(&data_line),
                    }
                }
                b"250 2.0.0 Ok: queued\r\n"
            }
            "QUIT" => b"221 2.0.0 Bye\r\n",
            _ => b"502 5.5.2 Command not recognized\r\n",
        };
        let _ = write.write_all(reply).await;
    }

    session
}
