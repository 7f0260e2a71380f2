/// チャットメッセージの本文を投票として解釈する
///
/// 戻り値は投票先の選択肢。投票と解釈できない場合は None を返す
/// （チャットには投票以外のメッセージが大量に流れるため、エラーではない）。
///
/// 判定順:
/// 1. 選択肢との完全一致（大文字小文字を区別、トリムしない）
/// 2. `numeric` 有効時のみ、ASCII数字だけからなる文字列を1始まりの
///    選択肢番号として解釈（"1" が先頭の選択肢）
pub fn parse_vote<'a>(text: &str, options: &'a [String], numeric: bool) -> Option<&'a str> {
    if let Some(option) = options.iter().find(|option| option.as_str() == text) {
        return Some(option.as_str());
    }

    if numeric && !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit()) {
        // 桁あふれでparseに失敗する文字列は範囲外の番号と同じ扱い
        if let Ok(number) = text.parse::<usize>() {
            if (1..=options.len()).contains(&number) {
                return Some(options[number - 1].as_str());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_exact_match() {
        let opts = options(&["A", "B", "C"]);
        assert_eq!(parse_vote("B", &opts, true), Some("B"));
        assert_eq!(parse_vote("B", &opts, false), Some("B"));
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        let opts = options(&["Red", "Blue"]);
        assert_eq!(parse_vote("red", &opts, true), None);
        assert_eq!(parse_vote("Red", &opts, true), Some("Red"));
    }

    #[test]
    fn test_exact_match_does_not_trim() {
        let opts = options(&["Red", "Blue"]);
        assert_eq!(parse_vote(" Red", &opts, true), None);
        assert_eq!(parse_vote("Red ", &opts, true), None);
    }

    #[test]
    fn test_numeric_vote() {
        let opts = options(&["A", "B", "C"]);
        assert_eq!(parse_vote("1", &opts, true), Some("A"));
        assert_eq!(parse_vote("2", &opts, true), Some("B"));
        assert_eq!(parse_vote("3", &opts, true), Some("C"));
    }

    #[test]
    fn test_numeric_vote_disabled() {
        let opts = options(&["A", "B", "C"]);
        assert_eq!(parse_vote("2", &opts, false), None);
    }

    #[test]
    fn test_zero_never_matches() {
        let opts = options(&["A", "B", "C"]);
        assert_eq!(parse_vote("0", &opts, true), None);
    }

    #[test]
    fn test_out_of_range_never_matches() {
        let opts = options(&["A", "B", "C"]);
        assert_eq!(parse_vote("4", &opts, true), None);
        assert_eq!(parse_vote("100", &opts, true), None);
    }

    #[test]
    fn test_leading_zeros_accepted_in_range() {
        let opts = options(&["A", "B", "C"]);
        assert_eq!(parse_vote("02", &opts, true), Some("B"));
        assert_eq!(parse_vote("003", &opts, true), Some("C"));
        assert_eq!(parse_vote("00", &opts, true), None);
    }

    #[test]
    fn test_overflowing_digit_string() {
        let opts = options(&["A", "B", "C"]);
        assert_eq!(parse_vote("99999999999999999999999999", &opts, true), None);
    }

    #[test]
    fn test_non_digit_text_never_reaches_numeric_branch() {
        let opts = options(&["A", "B", "C"]);
        assert_eq!(parse_vote("1a", &opts, true), None);
        assert_eq!(parse_vote("-1", &opts, true), None);
        assert_eq!(parse_vote("1.0", &opts, true), None);
        assert_eq!(parse_vote(" 1", &opts, true), None);
        // 全角数字はASCII数字ではないので対象外
        assert_eq!(parse_vote("１", &opts, true), None);
    }

    #[test]
    fn test_empty_and_noise_text() {
        let opts = options(&["A", "B", "C"]);
        assert_eq!(parse_vote("", &opts, true), None);
        assert_eq!(parse_vote("hello everyone", &opts, true), None);
    }

    #[test]
    fn test_numeric_option_string_takes_exact_match_first() {
        // 選択肢自体が数字の場合は完全一致が優先される
        let opts = options(&["2", "1"]);
        assert_eq!(parse_vote("2", &opts, true), Some("2"));
        assert_eq!(parse_vote("1", &opts, true), Some("1"));
    }
}
