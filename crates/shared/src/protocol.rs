use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupQuery {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnregisterRequest {
    pub email: String,
}

/// Body returned by the mutating endpoints. Successful calls carry `message`;
/// rejected ones carry `detail`, which is usually text but may be any JSON
/// value (validation failures send a list).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl ServerReply {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            detail: None,
        }
    }

    pub fn detail(detail: impl Into<String>) -> Self {
        Self {
            message: None,
            detail: Some(serde_json::Value::String(detail.into())),
        }
    }

    pub fn detail_text(&self) -> Option<&str> {
        self.detail.as_ref().and_then(serde_json::Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_text_ignores_structured_details() {
        let reply: ServerReply =
            serde_json::from_str(r#"{"detail":[{"loc":["query","email"],"msg":"field required"}]}"#)
                .expect("decode");
        assert!(reply.message.is_none());
        assert_eq!(reply.detail_text(), None);

        let reply: ServerReply =
            serde_json::from_str(r#"{"detail":"Activity is full"}"#).expect("decode");
        assert_eq!(reply.detail_text(), Some("Activity is full"));
    }

    #[test]
    fn unregister_body_is_email_object() {
        let body = serde_json::to_string(&UnregisterRequest {
            email: "new@student.edu".into(),
        })
        .expect("encode");
        assert_eq!(body, r#"{"email":"new@student.edu"}"#);
    }
}
