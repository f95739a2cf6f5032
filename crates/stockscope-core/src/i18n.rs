//! Display language and translated strings.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Two-letter display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ja,
    #[default]
    En,
}

impl Language {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Ja => Self::En,
            Self::En => Self::Ja,
        }
    }

    /// `ja`, `ja-JP`, `ja_JP.UTF-8` map to Japanese; anything else to English.
    pub fn from_locale(locale: &str) -> Self {
        if locale.trim().to_ascii_lowercase().starts_with("ja") {
            Self::Ja
        } else {
            Self::En
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ja" => Ok(Self::Ja),
            "en" => Ok(Self::En),
            other => Err(ValidationError::InvalidLanguage {
                value: other.to_owned(),
            }),
        }
    }
}

/// Key to string lookup per language.
pub trait MessageCatalog: Send + Sync {
    fn lookup(&self, language: Language, key: &str) -> Option<&str>;

    /// Translated text, falling back to English and then to the key itself.
    fn text(&self, language: Language, key: &str) -> String {
        self.lookup(language, key)
            .or_else(|| self.lookup(Language::En, key))
            .map_or_else(|| key.to_owned(), str::to_owned)
    }
}

/// Strings shipped with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl MessageCatalog for BuiltinCatalog {
    fn lookup(&self, language: Language, key: &str) -> Option<&str> {
        let text = match (language, key) {
            (Language::En, "errorMissingSymbol") => "Please enter a stock symbol",
            (Language::Ja, "errorMissingSymbol") => "銘柄コードを入力してください",
            (Language::En, "errorMissingApiKey") => "Please enter your API key",
            (Language::Ja, "errorMissingApiKey") => "APIキーを入力してください",
            (Language::En, "errorInvalidRequest") => "Invalid request",
            (Language::Ja, "errorInvalidRequest") => "リクエストが不正です",
            (Language::En, "errorNotFound") => "No stock data found for this symbol",
            (Language::Ja, "errorNotFound") => "株価データが見つかりませんでした",
            (Language::En, "errorInvalidSymbol") => "Invalid stock symbol",
            (Language::Ja, "errorInvalidSymbol") => "無効な銘柄コードです",
            (Language::En, "errorRateLimitCalls") => {
                "API call limit reached. Please wait a moment and try again"
            }
            (Language::Ja, "errorRateLimitCalls") => {
                "API呼び出し制限に達しました。しばらく待ってから再試行してください"
            }
            (Language::En, "errorRateLimitPerSecond") => {
                "API rate limit reached (1 request per second). Please wait a moment and try again"
            }
            (Language::Ja, "errorRateLimitPerSecond") => {
                "APIレート制限に達しました（1秒に1リクエスト）。しばらく待ってから再試行してください"
            }
            (Language::En, "errorUpstream") => "Failed to fetch stock data",
            (Language::Ja, "errorUpstream") => "株価データの取得に失敗しました",
            (Language::En, "errorMalformed") => "Unexpected response from the data provider",
            (Language::Ja, "errorMalformed") => "データ提供元から予期しない応答がありました",

            (Language::En, "period1W") => "1 Week",
            (Language::Ja, "period1W") => "1週間",
            (Language::En, "period1M") => "1 Month",
            (Language::Ja, "period1M") => "1ヶ月",
            (Language::En, "period3M") => "3 Months",
            (Language::Ja, "period3M") => "3ヶ月",
            (Language::En, "period6M") => "6 Months",
            (Language::Ja, "period6M") => "6ヶ月",
            (Language::En, "period1Y") => "1 Year",
            (Language::Ja, "period1Y") => "1年",

            (Language::En, "chartTitle") => "Price History",
            (Language::Ja, "chartTitle") => "株価推移",
            (Language::En, "chartDate") => "Date",
            (Language::Ja, "chartDate") => "日付",
            (Language::En, "chartClose") => "Close",
            (Language::Ja, "chartClose") => "終値",
            (Language::En, "chartHigh") => "High",
            (Language::Ja, "chartHigh") => "高値",
            (Language::En, "chartLow") => "Low",
            (Language::Ja, "chartLow") => "安値",
            (Language::En, "chartDataPoints") => "Data points",
            (Language::Ja, "chartDataPoints") => "データ数",
            (Language::En, "chartNoDataInWindow") => "No data in the selected period",
            (Language::Ja, "chartNoDataInWindow") => "選択した期間のデータがありません",
            (Language::En, "chartNoData") => "No chart data available",
            (Language::Ja, "chartNoData") => "チャートデータがありません",
            (Language::En, "chartLoading") => "Loading chart data...",
            (Language::Ja, "chartLoading") => "チャートデータを読み込み中...",

            (Language::En, "quotePrice") => "Price",
            (Language::Ja, "quotePrice") => "株価",
            (Language::En, "quoteChange") => "Change",
            (Language::Ja, "quoteChange") => "変動",
            (Language::En, "quoteHigh") => "High",
            (Language::Ja, "quoteHigh") => "高値",
            (Language::En, "quoteLow") => "Low",
            (Language::Ja, "quoteLow") => "安値",
            (Language::En, "quoteVolume") => "Volume",
            (Language::Ja, "quoteVolume") => "出来高",
            (Language::En, "quoteUpdated") => "Last updated",
            (Language::Ja, "quoteUpdated") => "最終更新",
            _ => return None,
        };
        Some(text)
    }
}
