//! Upload of log files to the savvyanalysis.com web service
//!
//! The service is a Django site: a CSRF token handed out with the login page
//! must accompany the credential POST, a successful login answers
//! `302 Found`, and an accepted upload answers `200 OK`. Any other status is
//! a failure. Nothing is retried.

use crate::config::UploadConfig;
use crate::error::{Result, SkyviewError};
use regex::Regex;
use reqwest::blocking::{multipart, Client};
use reqwest::header::{REFERER, SET_COOKIE};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Proof of a successful login. The session cookie itself lives in the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub csrf_token: String,
}

/// Acknowledgement of an accepted upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub status: u16,
    pub body: String,
}

/// Remote analysis service able to authenticate and receive log files
pub trait AnalysisService {
    fn login(&mut self, username: &str, password: &str) -> Result<SessionToken>;

    fn upload(&mut self, session: &SessionToken, aircraft_id: &str, file: &Path) -> Result<Ack>;
}

/// Pull the `csrftoken` value out of a cookie header or page body
pub fn extract_csrf_token(text: &str) -> Option<String> {
    static CSRF_COOKIE: OnceLock<Option<Regex>> = OnceLock::new();
    let re = CSRF_COOKIE
        .get_or_init(|| Regex::new(r"csrftoken=(\w+)").ok())
        .as_ref()?;
    re.captures(text).map(|caps| caps[1].to_string())
}

/// HTTP client for savvyanalysis.com
pub struct SavvyClient {
    client: Client,
    config: UploadConfig,
}

impl SavvyClient {
    pub fn new(config: UploadConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn fetch_csrf_token(&self, login_url: &str) -> Result<String> {
        let response = self.client.get(login_url).send()?;
        debug!(status = %response.status(), "fetched login page");

        let from_cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(extract_csrf_token);
        if let Some(token) = from_cookie {
            return Ok(token);
        }

        let body = response.text()?;
        extract_csrf_token(&body)
            .ok_or_else(|| SkyviewError::Auth("error obtaining csrftoken".to_string()))
    }
}

impl AnalysisService for SavvyClient {
    fn login(&mut self, username: &str, password: &str) -> Result<SessionToken> {
        let login_url = self.config.endpoint("/login");
        let csrf_token = self.fetch_csrf_token(&login_url)?;

        let response = self
            .client
            .post(&login_url)
            .header(REFERER, login_url.as_str())
            .form(&[
                ("username", username),
                ("password", password),
                ("csrfmiddlewaretoken", csrf_token.as_str()),
            ])
            .send()?;

        let status = response.status();
        if status != StatusCode::FOUND {
            return Err(SkyviewError::Auth(format!(
                "could not log in with the given credentials for '{}' (status {})",
                username, status
            )));
        }

        info!(username, "logged in successfully");
        Ok(SessionToken { csrf_token })
    }

    fn upload(&mut self, session: &SessionToken, aircraft_id: &str, file: &Path) -> Result<Ack> {
        let url = self.config.endpoint(&format!("/upload_files/{aircraft_id}"));
        let name = self
            .config
            .upload_name
            .clone()
            .or_else(|| {
                file.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "skyview.csv".to_string());

        let form = multipart::Form::new()
            .text("name", name)
            .text("aircraft_id", aircraft_id.to_string())
            .file("file", file)?;

        let response = self
            .client
            .post(&url)
            .header(REFERER, self.config.endpoint("/login"))
            .header("X-CSRFToken", session.csrf_token.as_str())
            .multipart(form)
            .send()?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        if status != StatusCode::OK {
            return Err(SkyviewError::Upload(format!(
                "unknown error uploading file (status {})",
                status
            )));
        }

        Ok(Ack {
            status: status.as_u16(),
            body,
        })
    }
}

/// Log in and upload one file. Authentication failure stops before any upload.
pub fn upload_file<S>(
    service: &mut S,
    username: &str,
    password: &str,
    aircraft_id: &str,
    file: &Path,
) -> Result<Ack>
where
    S: AnalysisService + ?Sized,
{
    if !file.is_file() {
        return Err(SkyviewError::Upload(format!(
            "file to upload does not exist: {}",
            file.display()
        )));
    }

    let session = service.login(username, password)?;
    info!(aircraft_id, file = %file.display(), "uploading");
    service.upload(&session, aircraft_id, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[derive(Default)]
    struct FakeService {
        accept_login: bool,
        accept_upload: bool,
        logins: Vec<String>,
        uploads: Vec<(String, String)>,
    }

    impl AnalysisService for FakeService {
        fn login(&mut self, username: &str, _password: &str) -> Result<SessionToken> {
            self.logins.push(username.to_string());
            if self.accept_login {
                Ok(SessionToken {
                    csrf_token: "tok".to_string(),
                })
            } else {
                Err(SkyviewError::Auth("rejected".to_string()))
            }
        }

        fn upload(&mut self, session: &SessionToken, aircraft_id: &str, _file: &Path) -> Result<Ack> {
            self.uploads
                .push((session.csrf_token.clone(), aircraft_id.to_string()));
            if self.accept_upload {
                Ok(Ack {
                    status: 200,
                    body: String::new(),
                })
            } else {
                Err(SkyviewError::Upload("rejected".to_string()))
            }
        }
    }

    #[test]
    fn test_extract_csrf_token() {
        assert_eq!(
            extract_csrf_token("csrftoken=Ab12_x; expires=Thu; Path=/"),
            Some("Ab12_x".to_string())
        );
        assert_eq!(
            extract_csrf_token("Set-Cookie: sessionid=1; csrftoken=zz9"),
            Some("zz9".to_string())
        );
        assert_eq!(extract_csrf_token("sessionid=abc"), None);
    }

    #[test]
    fn test_upload_after_login() {
        let file = NamedTempFile::new().unwrap();
        let mut service = FakeService {
            accept_login: true,
            accept_upload: true,
            ..Default::default()
        };

        let ack = upload_file(&mut service, "pilot", "secret", "3434", file.path()).unwrap();
        assert_eq!(ack.status, 200);
        assert_eq!(service.logins, vec!["pilot".to_string()]);
        assert_eq!(service.uploads, vec![("tok".to_string(), "3434".to_string())]);
    }

    #[test]
    fn test_failed_login_skips_upload() {
        let file = NamedTempFile::new().unwrap();
        let mut service = FakeService {
            accept_upload: true,
            ..Default::default()
        };

        let err = upload_file(&mut service, "pilot", "bad", "3434", file.path()).unwrap_err();
        assert!(matches!(err, SkyviewError::Auth(_)));
        assert!(service.uploads.is_empty());
    }

    #[test]
    fn test_failed_upload_is_reported() {
        let file = NamedTempFile::new().unwrap();
        let mut service = FakeService {
            accept_login: true,
            ..Default::default()
        };

        let err = upload_file(&mut service, "pilot", "secret", "3434", file.path()).unwrap_err();
        assert!(matches!(err, SkyviewError::Upload(_)));
        assert_eq!(service.logins.len(), 1);
    }

    #[test]
    fn test_missing_file_never_logs_in() {
        let mut service = FakeService {
            accept_login: true,
            accept_upload: true,
            ..Default::default()
        };

        let err = upload_file(
            &mut service,
            "pilot",
            "secret",
            "3434",
            Path::new("/nonexistent/skyview.csv"),
        )
        .unwrap_err();
        assert!(matches!(err, SkyviewError::Upload(_)));
        assert!(service.logins.is_empty());
    }
}
