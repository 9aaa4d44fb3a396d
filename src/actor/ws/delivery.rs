use tungstenite::protocol::Message;

use super::WsActor;

impl WsActor {
    /// Broadcast a message to all connected viewers.
    ///
    /// Delivery is fire-and-forget per session: a viewer whose send fails
    /// is dropped from the registry, the rest still receive the message.
    pub(super) fn broadcast(&self, msg: Message) {
        let mut clients = self.clients.lock();
        let count = clients.len();

        if count == 0 {
            crate::debug!("ws"; "no sessions connected");
            return;
        }

        clients.retain_mut(|client| match client.ws.send(msg.clone()) {
            Ok(_) => true,
            Err(e) => {
                crate::debug!("ws"; "session dropped: {}", e);
                false
            }
        });
        crate::debug!("ws"; "broadcast to {} sessions", count);
    }
}
