//! Live-update push channel: connected admin pages get a refresh notice
//! whenever the complaint snapshot is replaced.

use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::Message;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

pub type ClientRegistry = Arc<RwLock<Vec<mpsc::UnboundedSender<String>>>>;

pub fn new_client_registry() -> ClientRegistry {
    Arc::new(RwLock::new(Vec::new()))
}

/// Push a message to every connected page, dropping dead connections.
pub fn broadcast(clients: &ClientRegistry, msg: &str) {
    let mut senders = match clients.write() {
        Ok(s) => s,
        Err(_) => return,
    };
    senders.retain(|s| s.send(msg.to_string()).is_ok());
}

/// WebSocket upgrade handler.
pub async fn connect(
    req: HttpRequest,
    body: web::Payload,
    clients: web::Data<ClientRegistry>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, mut ws_session, mut msg_stream) = actix_ws::handle(&req, body)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    {
        let mut senders = clients.write().unwrap();
        senders.push(tx);
    }

    actix_web::rt::spawn(async move {
        loop {
            tokio::select! {
                Some(msg) = rx.recv() => {
                    if ws_session.text(msg).await.is_err() {
                        break;
                    }
                }
                Some(Ok(msg)) = msg_stream.recv() => {
                    match msg {
                        Message::Ping(bytes) => {
                            if ws_session.pong(&bytes).await.is_err() {
                                break;
                            }
                        }
                        Message::Close(_) => break,
                        Message::Text(_) => {
                            // Pages only listen on this channel; mutations go over HTTP
                        }
                        _ => {}
                    }
                }
                else => break,
            }
        }
        // Sender cleanup happens on the next broadcast
    });

    Ok(response)
}
