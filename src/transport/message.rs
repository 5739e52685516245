use serde::{Deserialize, Serialize};

use crate::model::{DeliveryMode, Destination, Message};

/// Error code the broker uses when a queue being provisioned already exists.
pub const ALREADY_EXISTS: &str = "already_exists";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ClientFrame {
    #[serde(rename = "login")]
    Login {
        username: String,
        password: String,
        vpn: String,
    },
    #[serde(rename = "auth")]
    Auth { token: String },
    #[serde(rename = "subscribe")]
    Subscribe { topic: String },
    #[serde(rename = "unsubscribe")]
    Unsubscribe { topic: String },
    #[serde(rename = "provision_queue")]
    ProvisionQueue {
        queue: String,
        durable: bool,
        exclusive: bool,
    },
    #[serde(rename = "bind")]
    Bind {
        queue: String,
        exclusive: bool,
        ack_mode: String,
    },
    #[serde(rename = "publish")]
    Publish {
        destination: Destination,
        payload: String,
        message_id: String,
        qos: u8,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reply_to: Option<Destination>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correlation_id: Option<String>,
    },
    #[serde(rename = "ack")]
    Ack { message_id: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ServerFrame {
    #[serde(rename = "login_response")]
    LoginResponse { token: String },
    #[serde(rename = "authenticated")]
    Authenticated {},
    #[serde(rename = "subscribed")]
    Subscribed { topic: String },
    #[serde(rename = "provisioned")]
    Provisioned { queue: String },
    #[serde(rename = "bound")]
    Bound { queue: String },
    #[serde(rename = "error")]
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
    #[serde(rename = "published")]
    Published { message_id: String },
    #[serde(rename = "rejected")]
    Rejected { message_id: String, message: String },
    #[serde(rename = "message")]
    Message {
        destination: Destination,
        payload: String,
        timestamp: i64,
        message_id: String,
        qos: u8,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reply_to: Option<Destination>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correlation_id: Option<String>,
    },
}

impl From<Message> for ClientFrame {
    fn from(msg: Message) -> Self {
        ClientFrame::Publish {
            destination: msg.destination,
            payload: msg.payload,
            message_id: msg.message_id,
            qos: msg.delivery_mode.qos(),
            reply_to: msg.reply_to,
            correlation_id: msg.correlation_id,
        }
    }
}

impl ServerFrame {
    /// Converts a `message` frame into a [`Message`]; any other frame is returned as is.
    pub fn into_message(self) -> Result<Message, ServerFrame> {
        match self {
            ServerFrame::Message {
                destination,
                payload,
                timestamp,
                message_id,
                qos,
                reply_to,
                correlation_id,
            } => Ok(Message {
                destination,
                payload,
                delivery_mode: DeliveryMode::from_qos(qos),
                reply_to,
                correlation_id,
                message_id,
                timestamp,
            }),
            other => Err(other),
        }
    }
}
