//! Stroke-order art lookup against the makemeahanzi graphics CDN.
//!
//! Each lookup is independent: one GET for the character's decimal code
//! point, no retries, no caching.

use std::time::Duration;

use reqwest::blocking::Client;

pub const STROKE_ORDER_BASE_URL: &str =
    "https://cdn.jsdelivr.net/gh/skishore/makemeahanzi/graphics";

/// What a lookup produced. `NotFound` covers every non-success HTTP status,
/// `Failed` transport-level problems; neither is a fault for the caller.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum StrokeOrderResult {
    Found(String),
    NotFound,
    Failed(String),
}

pub fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder().timeout(Duration::from_secs(10)).build()
}

/// URL of the stroke-order SVG for one character, keyed by its decimal
/// code point.
pub fn stroke_order_url(character: char) -> String {
    format!("{STROKE_ORDER_BASE_URL}/{}.svg", character as u32)
}

pub fn fetch_stroke_order(client: &Client, character: char) -> StrokeOrderResult {
    let url = stroke_order_url(character);

    match client.get(&url).send() {
        Ok(response) if response.status().is_success() => match response.text() {
            Ok(svg) => StrokeOrderResult::Found(svg),
            Err(e) => StrokeOrderResult::Failed(format!("reading body of {url}: {e}")),
        },
        Ok(_) => StrokeOrderResult::NotFound,
        Err(e) => StrokeOrderResult::Failed(format!("GET {url}: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_uses_decimal_code_point() {
        // 狗 is U+72D7 = 29399
        assert_eq!(
            stroke_order_url('狗'),
            "https://cdn.jsdelivr.net/gh/skishore/makemeahanzi/graphics/29399.svg"
        );
    }

    #[test]
    fn test_url_for_bmp_character() {
        // 你 is U+4F60 = 20320
        assert!(stroke_order_url('你').ends_with("/20320.svg"));
    }
}
