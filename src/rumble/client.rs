use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

use super::errors::RumbleError;
use super::types::ChatResponse;
use crate::util::mask_api_url;

/// HTTPリクエストのタイムアウト（秒）
const HTTP_TIMEOUT_SECS: u64 = 10;

/// Rumble Live Stream APIクライアント
///
/// APIのURLにはアカウント固有の秘密鍵が含まれるため、ログには
/// マスキングした形でのみ出力する。
pub struct RumbleClient {
    client: Client,
    api_url: String,
    headers: HashMap<String, String>,
}

impl RumbleClient {
    /// 新しいクライアントを作成
    pub fn new(api_url: String, headers: HashMap<String, String>) -> Result<Self, RumbleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;

        log::info!("Rumble client created for {}", mask_api_url(&api_url));

        Ok(Self {
            client,
            api_url,
            headers,
        })
    }

    /// ライブ配信とチャットの最新状態を取得
    ///
    /// 成功ステータス以外は `ApiStatus`、ボディが期待する形と異なる場合は
    /// `Schema` を返す。
    pub async fn fetch_chat(&self) -> Result<ChatResponse, RumbleError> {
        let mut request = self.client.get(&self.api_url);
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Rumble API returned status {}", status);
            return Err(RumbleError::ApiStatus(status));
        }

        let body = response.text().await?;
        let data: ChatResponse = serde_json::from_str(&body)?;

        log::debug!("Fetched {} livestream(s)", data.livestreams.len());
        Ok(data)
    }
}
