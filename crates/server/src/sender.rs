//! `ServerFrameSender` abstraction so dispatch/broadcast fan-out can be
//! exercised without a real socket, grounded on the donor's
//! `RunStreamSender`/`WebSocketRunSender` pair (serve/src/run/delivery.rs).

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};

use crate::frames::ServerFrame;

#[async_trait]
pub trait ServerFrameSender: Send {
    async fn send_frame(&mut self, frame: &ServerFrame) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

pub struct WebSocketFrameSender<'a>(pub &'a mut WebSocket);

#[async_trait]
impl ServerFrameSender for WebSocketFrameSender<'_> {
    async fn send_frame(&mut self, frame: &ServerFrame) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let text = serde_json::to_string(frame)?;
        self.0.send(Message::Text(text.into())).await?;
        Ok(())
    }
}

#[cfg(test)]
pub struct MockServerFrameSender {
    pub sent: Vec<ServerFrame>,
}

#[cfg(test)]
#[async_trait]
impl ServerFrameSender for MockServerFrameSender {
    async fn send_frame(&mut self, frame: &ServerFrame) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.sent.push(frame.clone());
        Ok(())
    }
}
