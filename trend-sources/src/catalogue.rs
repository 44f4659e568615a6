//! Built-in source catalogue

use trend_core::{ItemShape, Source};

/// Google Trends daily search trends for South Korea
pub const GOOGLE_TRENDS_KR_URL: &str =
    "https://trends.google.com/trends/trendingsearches/daily/rss?geo=KR";

/// Google News top stories for South Korea
pub const GOOGLE_NEWS_KR_URL: &str = "https://news.google.com/rss?hl=ko&gl=KR&ceid=KR:ko";

/// Sources used when no explicit source list is configured
pub fn default_sources() -> Vec<Source> {
    vec![
        // Trend entries are already search phrases
        Source::rss("google_rss", GOOGLE_TRENDS_KR_URL).with_shape(ItemShape::Keyword),
        // Headlines look like "주제 설명 - 언론사"
        Source::rss("google_news", GOOGLE_NEWS_KR_URL),
    ]
}
