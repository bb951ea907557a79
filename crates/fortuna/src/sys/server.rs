use crate::events::AppEvent;
use crate::sys::SOCKET_PATH;
use async_channel::Sender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        let Some(event) = parse_command(line.trim()) else {
                            continue;
                        };
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

fn parse_command(line: &str) -> Option<AppEvent> {
    match line {
        "show" => Some(AppEvent::Show),
        "hide" => Some(AppEvent::Hide),
        "spin" => Some(AppEvent::Spin(None)),
        other => {
            let index = other.strip_prefix("spin ")?;
            match index.trim().parse::<usize>() {
                Ok(i) => Some(AppEvent::Spin(Some(i))),
                Err(_) => {
                    log::warn!("Ignoring malformed spin command: '{}'", line);
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert!(matches!(parse_command("show"), Some(AppEvent::Show)));
        assert!(matches!(parse_command("hide"), Some(AppEvent::Hide)));
        assert!(matches!(parse_command("spin"), Some(AppEvent::Spin(None))));
        assert!(matches!(
            parse_command("spin 3"),
            Some(AppEvent::Spin(Some(3)))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_command("spin three").is_none());
        assert!(parse_command("launch").is_none());
        assert!(parse_command("").is_none());
    }
}
