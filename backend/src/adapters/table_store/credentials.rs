use crate::error::AppError;
use reqwest::RequestBuilder;
use std::fmt;
use std::path::PathBuf;

/// How calls to the spreadsheet API authenticate.
///
/// Credentials are applied to each request separately. `TokenFile` is re-read on
/// every call so a token rotated on disk is picked up without a restart.
#[derive(Clone)]
pub enum Credentials {
    None,
    /// API key sent as the `key` query parameter. Enough for reading public sheets.
    ApiKey(String),
    /// OAuth access token sent as a bearer token.
    Bearer(String),
    /// File holding an OAuth access token.
    TokenFile(PathBuf),
}

impl Credentials {
    pub async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, AppError> {
        Ok(match self {
            Credentials::None => request,
            Credentials::ApiKey(key) => request.query(&[("key", key)]),
            Credentials::Bearer(token) => request.bearer_auth(token),
            Credentials::TokenFile(path) => {
                let token = tokio::fs::read_to_string(path).await?;
                let token = token.trim();
                if token.is_empty() {
                    return Err(AppError::Config(format!(
                        "token file {} is empty",
                        path.display()
                    )));
                }
                request.bearer_auth(token)
            }
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::None => write!(f, "None"),
            Credentials::ApiKey(_) => write!(f, "ApiKey(..)"),
            Credentials::Bearer(_) => write!(f, "Bearer(..)"),
            Credentials::TokenFile(path) => write!(f, "TokenFile({})", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_of(request: RequestBuilder) -> Option<String> {
        let built = request.build().unwrap();
        built
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .map(|v| v.to_str().unwrap().to_string())
    }

    fn base() -> RequestBuilder {
        reqwest::Client::new().get("https://sheets.example/v4/spreadsheets/doc")
    }

    #[actix_web::test]
    async fn api_key_goes_in_the_query() {
        let request = Credentials::ApiKey("k123".to_string())
            .authorize(base())
            .await
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.url().query(), Some("key=k123"));
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[actix_web::test]
    async fn bearer_sets_authorization() {
        let request = Credentials::Bearer("tok".to_string())
            .authorize(base())
            .await
            .unwrap();
        assert_eq!(header_of(request), Some("Bearer tok".to_string()));
    }

    #[actix_web::test]
    async fn token_file_is_read_per_call() {
        let path = std::env::temp_dir().join(format!("sheets-token-{}", uuid::Uuid::new_v4()));
        let credentials = Credentials::TokenFile(path.clone());

        std::fs::write(&path, "first\n").unwrap();
        let request = credentials.authorize(base()).await.unwrap();
        assert_eq!(header_of(request), Some("Bearer first".to_string()));

        std::fs::write(&path, "second").unwrap();
        let request = credentials.authorize(base()).await.unwrap();
        assert_eq!(header_of(request), Some("Bearer second".to_string()));

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            credentials.authorize(base()).await,
            Err(AppError::Io(_))
        ));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let printed = format!("{:?}", Credentials::Bearer("secret-token".to_string()));
        assert!(!printed.contains("secret-token"));
    }
}
