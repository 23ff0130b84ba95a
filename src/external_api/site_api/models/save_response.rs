use super::record_id::{deserialize_optional_id, RecordId};

/// Body of a successful `saveProject.php` call
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
pub struct SaveResponse {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Any JSON object without an `error` field
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(serde::Serialize, Debug)]
pub struct DeleteRequest<'a> {
    pub id: &'a RecordId,
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
pub struct ContactResponse {
    #[serde(default)]
    pub success: bool,
}
