use chrono::{DateTime, NaiveDateTime, Utc};

/// メッセージのタイムスタンプ文字列をUTCの時刻として解釈する
///
/// フォーマット文字列はchronoのstrftime形式。壁時計の値をそのままUTCとして
/// 扱う。入力にオフセット（+09:00など）が含まれていても適用せず、実行環境の
/// ローカルタイムゾーンも参照しない。
pub fn parse_timestamp(raw: &str, format: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, format).map(|naive| naive.and_utc())
}
