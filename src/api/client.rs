//! HTTP API Client
//!
//! Functions for communicating with the diary REST API.

use base64::Engine as _;
use gloo_net::http::Request;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://localhost:7015";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("daybook_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Wire Types ============

/// A diary entry as returned by the API
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub images: Vec<EntryImage>,
}

/// An image attached to an entry
///
/// The thumbnail endpoint returns rows carrying only `imageUrl`, so the id
/// defaults to empty there.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryImage {
    #[serde(default)]
    pub image_id: String,
    pub image_url: String,
}

/// Body for the JSON create/update calls
#[derive(Debug, serde::Serialize)]
pub struct EntryPayload {
    pub title: String,
    pub text: String,
    pub images: Vec<ImagePayload>,
}

/// Image slot in an [`EntryPayload`]
///
/// New uploads travel as bare base64 strings; an update that attaches no new
/// files echoes the entry's existing image objects instead.
#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
pub enum ImagePayload {
    Encoded(String),
    Existing(EntryImage),
}

#[derive(serde::Serialize)]
struct AuthRequest {
    email: String,
    password: String,
}

#[derive(Debug, serde::Deserialize)]
struct RegisterResponse {
    message: String,
}

/// Problem-details error body returned by the API on failure
#[derive(Debug, Default, serde::Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    detail: Option<String>,
}

// ============ API Functions ============

/// Log in with email and password, returning the issued session token
pub async fn login(email: &str, password: &str) -> Result<String, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/api/Auth/login", api_base))
        .json(&AuthRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|_| "Network error. Please try again later.".to_string())?;

    if !response.ok() {
        let error: ErrorDetail = response.json().await.unwrap_or_default();
        return Err(error.detail.unwrap_or_else(|| "An error occurred.".to_string()));
    }

    let body = response.text().await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(parse_token_body(&body))
}

/// Register a new account, returning the server's confirmation message
pub async fn register(email: &str, password: &str) -> Result<String, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/api/Auth/register", api_base))
        .json(&AuthRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|_| "Network error. Please try again later.".to_string())?;

    if !response.ok() {
        let error: ErrorDetail = response.json().await.unwrap_or_default();
        return Err(error.detail.unwrap_or_else(|| "An error occurred.".to_string()));
    }

    let result: RegisterResponse = response.json().await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.message)
}

/// Fetch all entries for the signed-in user
pub async fn fetch_entries(token: &str) -> Result<Vec<Entry>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/api/Entries/entries", api_base))
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let error: ErrorDetail = response.json().await.unwrap_or_default();
        return Err(error.detail.unwrap_or_else(|| "Unknown error".to_string()));
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch the images recorded for an entry
pub async fn fetch_entry_images(id: &str) -> Result<Vec<EntryImage>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/api/Entries/get-images/{}", api_base, id))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let error: ErrorDetail = response.json().await.unwrap_or_default();
        return Err(error.detail.unwrap_or_else(|| "Unknown error".to_string()));
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Create a new entry with base64-encoded images
pub async fn add_entry(token: &str, payload: &EntryPayload) -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/api/Entries/add-entry", api_base))
        .header("Authorization", &format!("Bearer {}", token))
        .json(payload)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let error: ErrorDetail = response.json().await.unwrap_or_default();
        return Err(error.detail.unwrap_or_else(|| "Unknown error".to_string()));
    }

    Ok(())
}

/// Update an entry with the JSON payload convention used by the entries page
pub async fn update_entry(token: &str, id: &str, payload: &EntryPayload) -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::put(&format!("{}/api/Entries/entries/{}", api_base, id))
        .header("Authorization", &format!("Bearer {}", token))
        .json(payload)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let error: ErrorDetail = response.json().await.unwrap_or_default();
        return Err(error.detail.unwrap_or_else(|| "Unknown error".to_string()));
    }

    Ok(())
}

/// Fetch a single entry by id
pub async fn fetch_entry(id: &str) -> Result<Entry, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/api/Entries/entries/{}", api_base, id))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let error: ErrorDetail = response.json().await.unwrap_or_default();
        return Err(error.detail.unwrap_or_else(|| "Unknown error".to_string()));
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Update an entry with the multipart convention used by the editor page
pub async fn update_entry_multipart(id: &str, form: web_sys::FormData) -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::put(&format!("{}/api/Entries/entries/{}", api_base, id))
        .body(form)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let error: ErrorDetail = response.json().await.unwrap_or_default();
        return Err(error.detail.unwrap_or_else(|| "Unknown error".to_string()));
    }

    Ok(())
}

/// Delete a single image from an entry
pub async fn delete_image(entry_id: &str, image_id: &str) -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::delete(&format!(
        "{}/api/Entries/entries/{}/images/{}",
        api_base, entry_id, image_id
    ))
    .send()
    .await
    .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let error: ErrorDetail = response.json().await.unwrap_or_default();
        return Err(error.detail.unwrap_or_else(|| "Unknown error".to_string()));
    }

    Ok(())
}

/// Decode a token response body
///
/// Servers in this family return the token either as plain text or as a
/// JSON-quoted string.
fn parse_token_body(body: &str) -> String {
    serde_json::from_str::<String>(body).unwrap_or_else(|_| body.to_string())
}

/// Base64-encode raw image bytes for the JSON entry payload
pub fn encode_image(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

/// Build the display URL for an entry's thumbnail image
///
/// Stored paths may use Windows separators; they are normalized before being
/// joined to the API host.
pub fn thumbnail_url(api_base: &str, image_path: &str) -> String {
    format!("{}/{}", api_base, image_path.replace('\\', "/"))
}

/// Build the display URL for an image shown on the editor page
pub fn edit_image_url(api_base: &str, image_path: &str) -> String {
    format!("{}/images/{}", api_base, image_path)
}

/// Assemble the payload for creating a new entry
pub fn new_entry_payload(title: String, text: String, encoded_images: Vec<String>) -> EntryPayload {
    EntryPayload {
        title,
        text,
        images: encoded_images.into_iter().map(ImagePayload::Encoded).collect(),
    }
}

/// Assemble the payload for updating `entry`
///
/// Blank form fields fall back to the entry's current values, and when no new
/// files were attached the entry's existing images are echoed back so the
/// server keeps them.
pub fn update_entry_payload(
    entry: &Entry,
    title: String,
    text: String,
    encoded_images: Vec<String>,
) -> EntryPayload {
    EntryPayload {
        title: if title.is_empty() { entry.title.clone() } else { title },
        text: if text.is_empty() { entry.text.clone() } else { text },
        images: if encoded_images.is_empty() {
            entry.images.iter().cloned().map(ImagePayload::Existing).collect()
        } else {
            encoded_images.into_iter().map(ImagePayload::Encoded).collect()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> Entry {
        Entry {
            id: "e1".to_string(),
            title: "Old title".to_string(),
            text: "Old text".to_string(),
            images: vec![EntryImage {
                image_id: "img-1".to_string(),
                image_url: "images\\one.jpg".to_string(),
            }],
        }
    }

    #[test]
    fn test_thumbnail_url_normalizes_backslashes() {
        let url = thumbnail_url("https://localhost:7015", "images\\2024\\photo.jpg");
        assert_eq!(url, "https://localhost:7015/images/2024/photo.jpg");
    }

    #[test]
    fn test_thumbnail_url_plain_path() {
        let url = thumbnail_url("https://localhost:7015", "images/photo.jpg");
        assert_eq!(url, "https://localhost:7015/images/photo.jpg");
    }

    #[test]
    fn test_edit_image_url_keeps_path_verbatim() {
        let url = edit_image_url("https://localhost:7015", "photo.jpg");
        assert_eq!(url, "https://localhost:7015/images/photo.jpg");
    }

    #[test]
    fn test_encode_image_has_no_data_url_prefix() {
        let encoded = encode_image(&[0xff, 0xd8, 0xff, 0xe0]);
        assert!(!encoded.starts_with("data:"));
        assert_eq!(encoded, "/9j/4A==");
    }

    #[test]
    fn test_parse_token_body_json_quoted() {
        assert_eq!(parse_token_body("\"abc.def.ghi\""), "abc.def.ghi");
    }

    #[test]
    fn test_parse_token_body_bare() {
        assert_eq!(parse_token_body("abc.def.ghi"), "abc.def.ghi");
    }

    #[test]
    fn test_new_entry_payload_serializes_images_as_strings() {
        let payload = new_entry_payload(
            "Trip".to_string(),
            "We hiked all day.".to_string(),
            vec!["aGVsbG8=".to_string(), "d29ybGQ=".to_string()],
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Trip",
                "text": "We hiked all day.",
                "images": ["aGVsbG8=", "d29ybGQ="],
            })
        );
    }

    #[test]
    fn test_update_payload_falls_back_to_existing_fields() {
        let entry = sample_entry();

        let payload = update_entry_payload(&entry, String::new(), String::new(), Vec::new());
        assert_eq!(payload.title, "Old title");
        assert_eq!(payload.text, "Old text");
    }

    #[test]
    fn test_update_payload_echoes_existing_images_when_no_uploads() {
        let entry = sample_entry();

        let payload = update_entry_payload(
            &entry,
            "New title".to_string(),
            "New text".to_string(),
            Vec::new(),
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json["images"],
            serde_json::json!([{"imageId": "img-1", "imageUrl": "images\\one.jpg"}])
        );
    }

    #[test]
    fn test_update_payload_prefers_new_uploads() {
        let entry = sample_entry();

        let payload = update_entry_payload(
            &entry,
            "New title".to_string(),
            "New text".to_string(),
            vec!["Zm9v".to_string()],
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["images"], serde_json::json!(["Zm9v"]));
    }

    #[test]
    fn test_error_detail_decodes_server_body() {
        let error: ErrorDetail =
            serde_json::from_str(r#"{"detail": "Invalid credentials"}"#).unwrap();
        assert_eq!(error.detail.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_error_detail_tolerates_empty_body() {
        let error: ErrorDetail = serde_json::from_str("{}").unwrap();
        assert_eq!(error.detail, None);
    }

    #[test]
    fn test_entry_deserializes_without_images() {
        let entry: Entry =
            serde_json::from_str(r#"{"id": "e1", "title": "T", "text": "B"}"#).unwrap();
        assert!(entry.images.is_empty());
    }

    #[test]
    fn test_entry_image_deserializes_without_id() {
        let image: EntryImage = serde_json::from_str(r#"{"imageUrl": "images\\a.jpg"}"#).unwrap();
        assert_eq!(image.image_id, "");
        assert_eq!(image.image_url, "images\\a.jpg");
    }
}
