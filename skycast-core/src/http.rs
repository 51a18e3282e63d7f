use reqwest::Client;
use url::Url;

/// HTTP client that appends the application identifier to every outgoing
/// request as an `appid` query parameter.
///
/// Pure pass-through decorator: no conditional logic, no error path of its
/// own. Path and pre-existing query parameters are preserved untouched.
#[derive(Debug, Clone)]
pub struct AugmentedClient {
    http: Client,
    app_id: String,
}

impl AugmentedClient {
    pub fn new(app_id: String) -> Self {
        Self {
            http: Client::new(),
            app_id,
        }
    }

    /// Append `appid=<id>` to the URL's query string.
    pub fn append_app_id(&self, url: &mut Url) {
        url.query_pairs_mut().append_pair("appid", &self.app_id);
    }

    /// Issue a GET request for `url`, augmented with the application id.
    pub async fn get(&self, mut url: Url) -> reqwest::Result<reqwest::Response> {
        self.append_app_id(&mut url);
        tracing::debug!(%url, "GET");
        self.http.get(url).send().await
    }
}
