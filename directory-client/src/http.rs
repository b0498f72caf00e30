//! HTTP client for the directory REST API

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::ApiResponse;
use shared::models::{
    DeletedEmployee, Employee, EmployeeFields, EmployeeQuery, LoginRequest, LoginResponse,
    SignupRequest, UserInfo,
};

use crate::{ClientConfig, ClientError, ClientResult};

/// Image attached to a multipart create or update
#[derive(Debug, Clone)]
pub struct ProfileImage {
    /// Original file name; the extension decides the accepted format
    pub file_name: String,
    pub data: Vec<u8>,
}

/// HTTP client for the employee directory server
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl DirectoryClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Forget the token; the server keeps no session to end
    pub fn logout(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Request carrying the bearer token
    fn authed(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let token = self.token.as_ref().ok_or(ClientError::NotLoggedIn)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(Into::into)
    }

    /// Turn an error response into a [`ClientError`]
    async fn error_from(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return ClientError::Http(e),
        };

        // Server errors carry an ApiResponse body with a numeric code
        if let Ok(body) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
            && let Some(code) = body.code
        {
            tracing::debug!(status = %status, code, "API call failed");
            return ClientError::Api {
                status: status.as_u16(),
                code,
                message: body.message,
                details: body.details,
            };
        }

        ClientError::Status {
            status: status.as_u16(),
            body: text,
        }
    }

    fn unwrap_data<T>(response: ApiResponse<T>, what: &str) -> ClientResult<T> {
        response
            .data
            .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {} data", what)))
    }

    // ========== Auth API ==========

    /// Register a new account
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> ClientResult<UserInfo> {
        let body = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: ApiResponse<UserInfo> =
            Self::send(self.request(Method::POST, "/api/signup").json(&body)).await?;
        Self::unwrap_data(response, "signup")
    }

    /// Login and keep the returned token for later calls
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse =
            Self::send(self.request(Method::POST, "/api/login").json(&body)).await?;
        self.token = Some(response.token.clone());
        Ok(response)
    }

    // ========== Employee API ==========

    /// All employees, newest first
    pub async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        Self::send(self.authed(Method::GET, "/api/employees")?).await
    }

    /// Employees matching the department and/or position filters
    pub async fn search_employees(&self, query: &EmployeeQuery) -> ClientResult<Vec<Employee>> {
        Self::send(self.authed(Method::GET, "/api/employees/search/by")?.query(query)).await
    }

    pub async fn get_employee(&self, id: &str) -> ClientResult<Employee> {
        Self::send(self.authed(Method::GET, &format!("/api/employees/{}", id))?).await
    }

    /// Create an employee, as multipart when an image is attached
    pub async fn create_employee(
        &self,
        fields: &EmployeeFields,
        image: Option<ProfileImage>,
    ) -> ClientResult<Employee> {
        let request = self.authed(Method::POST, "/api/employees")?;
        Self::send(with_body(request, fields, image)).await
    }

    /// Overwrite the supplied fields of an employee
    pub async fn update_employee(
        &self,
        id: &str,
        fields: &EmployeeFields,
        image: Option<ProfileImage>,
    ) -> ClientResult<Employee> {
        let request = self.authed(Method::PUT, &format!("/api/employees/{}", id))?;
        Self::send(with_body(request, fields, image)).await
    }

    pub async fn delete_employee(&self, id: &str) -> ClientResult<DeletedEmployee> {
        let response: ApiResponse<DeletedEmployee> =
            Self::send(self.authed(Method::DELETE, &format!("/api/employees/{}", id))?).await?;
        Self::unwrap_data(response, "delete")
    }

    /// Download a stored profile image by its public path (`/uploads/...`)
    pub async fn fetch_image(&self, path: &str) -> ClientResult<Vec<u8>> {
        let response = self.request(Method::GET, path).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }
}

fn with_body(
    request: RequestBuilder,
    fields: &EmployeeFields,
    image: Option<ProfileImage>,
) -> RequestBuilder {
    match image {
        Some(image) => request.multipart(employee_form(fields, image)),
        None => request.json(fields),
    }
}

fn employee_form(fields: &EmployeeFields, image: ProfileImage) -> Form {
    let text_fields = [
        ("first_name", fields.first_name.clone()),
        ("last_name", fields.last_name.clone()),
        ("email", fields.email.clone()),
        ("department", fields.department.clone()),
        ("position", fields.position.clone()),
        ("salary", fields.salary.map(|s| s.to_string())),
        ("date_of_joining", fields.date_of_joining.clone()),
    ];

    let form = text_fields
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .fold(Form::new(), |form, (name, value)| form.text(name, value));

    form.part(
        "profile_image",
        Part::bytes(image.data).file_name(image.file_name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = DirectoryClient::new(&ClientConfig::new("http://host:5001/")).unwrap();
        assert_eq!(client.url("/api/login"), "http://host:5001/api/login");
        assert_eq!(client.url("health"), "http://host:5001/health");
    }

    #[test]
    fn test_authed_requires_token() {
        let client = DirectoryClient::new(&ClientConfig::default()).unwrap();
        assert!(!client.is_logged_in());
        assert!(matches!(
            client.authed(Method::GET, "/api/employees"),
            Err(ClientError::NotLoggedIn)
        ));

        let mut client =
            DirectoryClient::new(&ClientConfig::default().with_token("abc")).unwrap();
        assert!(client.authed(Method::GET, "/api/employees").is_ok());
        client.logout();
        assert!(client.token().is_none());
    }
}
