/// API URLをマスキングしてログ出力用の文字列を生成
///
/// Live Stream APIのURLはクエリ部分にアカウント固有の秘密鍵を含むため、
/// クエリ全体を***で置き換える。
///
/// # Examples
/// ```
/// use rumble_chat_poll::util::mask_api_url;
///
/// let masked = mask_api_url("https://rumble.com/-livestream-api/get-data?key=SECRET");
/// assert_eq!(masked, "https://rumble.com/-livestream-api/get-data?***");
/// ```
pub fn mask_api_url(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _query)) => format!("{}?***", base),
        None => url.to_string(),
    }
}
