use serde::Deserialize;

// Rumble Live Stream API レスポンス型
//
// このツールが読むのは livestreams -> chat -> recent_messages の経路のみ。
// APIが返すその他のフィールドはデシリアライズ時に無視される。

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub livestreams: Vec<Livestream>,
}

#[derive(Debug, Deserialize)]
pub struct Livestream {
    pub id: String,
    pub chat: LivestreamChat,
}

#[derive(Debug, Deserialize)]
pub struct LivestreamChat {
    pub recent_messages: Vec<ChatMessage>,
}

/// チャットの1メッセージ
///
/// `created_on` はAPIが返す生の文字列のまま保持する。
/// 時刻への変換は [`crate::rumble::timestamp::parse_timestamp`] が行う。
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub username: String,
    pub text: String,
    pub created_on: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_response() {
        let json = r#"{
            "livestreams": [
                {
                    "id": "abc123",
                    "title": "extra field is ignored",
                    "chat": {
                        "recent_messages": [
                            {
                                "username": "alice",
                                "text": "hello",
                                "created_on": "2024-06-01T12:00:00+00:00",
                                "badges": []
                            }
                        ]
                    }
                }
            ]
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.livestreams.len(), 1);
        assert_eq!(response.livestreams[0].id, "abc123");

        let message = &response.livestreams[0].chat.recent_messages[0];
        assert_eq!(message.username, "alice");
        assert_eq!(message.text, "hello");
        assert_eq!(message.created_on, "2024-06-01T12:00:00+00:00");
    }

    #[test]
    fn test_deserialize_empty_livestreams() {
        let response: ChatResponse = serde_json::from_str(r#"{"livestreams": []}"#).unwrap();
        assert!(response.livestreams.is_empty());
    }

    #[test]
    fn test_deserialize_missing_chat_is_error() {
        // chatフィールドが無い配信はスキーマ違反
        let result: Result<ChatResponse, _> =
            serde_json::from_str(r#"{"livestreams": [{"id": "abc123"}]}"#);
        assert!(result.is_err());
    }
}
