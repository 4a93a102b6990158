//! Response DTOs for the HTTP API.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status message.
    pub message: String,
}

impl HealthResponse {
    /// Create the standard "server is running" response.
    pub fn running() -> Self {
        Self {
            message: "Server is running".to_string(),
        }
    }
}

/// Successful upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Status message.
    pub message: String,
    /// URL at which the uploaded file is retrievable.
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    /// Identifier of the created metadata record.
    #[serde(rename = "fileId")]
    pub file_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_message() {
        let json = serde_json::to_value(HealthResponse::running()).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Server is running"}));
    }

    #[test]
    fn test_upload_response_field_names() {
        let response = UploadResponse {
            message: "File uploaded successfully".to_string(),
            file_url: "http://localhost:8080/uploads/1-a.txt".to_string(),
            file_id: 7,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["fileUrl"], "http://localhost:8080/uploads/1-a.txt");
        assert_eq!(json["fileId"], 7);
        assert_eq!(json["message"], "File uploaded successfully");
    }
}
