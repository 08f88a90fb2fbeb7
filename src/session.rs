// Live edit session - one per open websocket
//
// Send-after-receive with one message in flight: read a frame, persist it,
// ack it, then read the next. The session never pushes unsolicited
// messages. A frame that fails to decode, or any transport error, ends the
// session; a failed persist does not - the client should keep editing even
// when one autosave round-trip goes wrong.

use axum::extract::ws::{Message, WebSocket};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error};

use crate::models::{Ack, EditMessage};
use crate::store::PageStore;

/// Drive one session until the client disconnects or sends something the
/// protocol cannot decode. Dropping the socket closes the connection.
pub async fn run(mut socket: WebSocket, store: Arc<PageStore>) {
    while let Some(frame) = socket.recv().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(err) => {
                debug!("session read error: {}", err);
                break;
            }
        };

        match frame {
            Message::Text(text) => {
                let ack = match handle_edit(&store, text.as_str()).await {
                    Ok(ack) => ack,
                    Err(err) => {
                        debug!("undecodable edit message, closing session: {}", err);
                        break;
                    }
                };
                let payload = match serde_json::to_string(&ack) {
                    Ok(payload) => payload,
                    Err(err) => {
                        error!("failed to encode ack: {}", err);
                        break;
                    }
                };
                if let Err(err) = socket.send(Message::Text(payload.into())).await {
                    debug!("session write error: {}", err);
                    break;
                }
            }
            Message::Close(_) => break,
            // Binary frames are not part of the protocol; ping/pong are
            // handled by the transport.
            _ => {}
        }
    }
}

/// Decode and apply one edit frame. A decode failure bubbles up so the
/// caller can terminate the session; everything else produces an ack.
pub async fn handle_edit(store: &PageStore, raw: &str) -> Result<Ack, serde_json::Error> {
    let msg: EditMessage = serde_json::from_str(raw)?;
    debug!(id = %msg.id, slug = %msg.slug, bytes = msg.data.len(), "recv edit");
    Ok(apply_edit(store, &msg).await)
}

/// Persist one edit and build its acknowledgment. Messages without an id
/// are acked without touching the store (the client has nothing to save
/// yet). A persist failure is logged and reported in the ack, but the
/// reply is always sent so the interactive loop stays alive.
pub async fn apply_edit(store: &PageStore, msg: &EditMessage) -> Ack {
    if msg.id.is_empty() {
        return Ack {
            message: "got it".to_string(),
            success: true,
        };
    }

    match store
        .save(&msg.id, &msg.slug, &msg.data, Utc::now().timestamp_millis())
        .await
    {
        Ok(()) => Ack {
            message: "got it".to_string(),
            success: true,
        },
        Err(err) => {
            error!(id = %msg.id, "save failed: {}", err);
            Ack {
                message: format!("save failed: {}", err),
                success: false,
            }
        }
    }
}
