use gloo::net::http::Request;
use lexigrid_core::{dictionary_url, lookup_verdict};

async fn fetch_entries(base_url: &str, word: &str) -> Result<(u16, String), gloo::net::Error> {
    let response = Request::get(&dictionary_url(base_url, word)).send().await?;
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

/// Asks the dictionary about `word`. Transport and decoding failures count as "not a word".
pub(crate) async fn is_valid_word(base_url: &str, word: &str) -> bool {
    match fetch_entries(base_url, word).await {
        Ok((status, body)) => {
            let valid = lookup_verdict(word, status, &body);
            log::debug!("dictionary: {:?} -> {} ({})", word, valid, status);
            valid
        }
        Err(err) => {
            log::error!("Failed to validate word {:?}: {}", word, err);
            false
        }
    }
}
