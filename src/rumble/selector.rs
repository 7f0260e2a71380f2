use super::errors::RumbleError;
use super::types::Livestream;

/// 投票の対象とするライブ配信をレスポンスから選択する
///
/// - 配信リストが空なら `NoActiveLivestream`
/// - `target_id` 未指定なら先頭の配信（APIの返却順をそのまま使う）
/// - `target_id` 指定時はIDが一致する配信。全件を走査して見つからなければ
///   `NoMatchingLivestream`
pub fn select_livestream<'a>(
    livestreams: &'a [Livestream],
    target_id: Option<&str>,
) -> Result<&'a Livestream, RumbleError> {
    if livestreams.is_empty() {
        return Err(RumbleError::NoActiveLivestream);
    }

    match target_id {
        None => Ok(&livestreams[0]),
        Some(id) => livestreams
            .iter()
            .find(|stream| stream.id == id)
            .ok_or_else(|| RumbleError::NoMatchingLivestream(id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rumble::types::LivestreamChat;

    fn livestream(id: &str) -> Livestream {
        Livestream {
            id: id.to_string(),
            chat: LivestreamChat {
                recent_messages: Vec::new(),
            },
        }
    }

    #[test]
    fn test_empty_list_is_no_active_livestream() {
        let result = select_livestream(&[], None);
        assert!(matches!(result, Err(RumbleError::NoActiveLivestream)));

        // target_id指定時も空リストの扱いは同じ
        let result = select_livestream(&[], Some("1"));
        assert!(matches!(result, Err(RumbleError::NoActiveLivestream)));
    }

    #[test]
    fn test_no_target_returns_first() {
        let streams = vec![livestream("1"), livestream("2")];
        let selected = select_livestream(&streams, None).unwrap();
        assert_eq!(selected.id, "1");
    }

    #[test]
    fn test_target_id_match() {
        let streams = vec![livestream("1"), livestream("2")];
        let selected = select_livestream(&streams, Some("2")).unwrap();
        assert_eq!(selected.id, "2");
    }

    #[test]
    fn test_target_id_no_match() {
        let streams = vec![livestream("1"), livestream("2")];
        let result = select_livestream(&streams, Some("99"));
        match result {
            Err(RumbleError::NoMatchingLivestream(id)) => assert_eq!(id, "99"),
            other => panic!("unexpected result: {:?}", other.map(|s| s.id.clone())),
        }
    }
}
