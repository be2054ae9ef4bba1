use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

/// Expense-report record owned by the remote store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub bill_type: BillType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Zero when the record carries no usable amount
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: f64,
    /// Stored date string, normally `YYYY-MM-DD`
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_optional_number")]
    pub vat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional_number")]
    pub pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: BillStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_admin: Option<String>,
}

impl Bill {
    /// Receipt reference, present only when both URL and name are set
    pub fn receipt(&self) -> Option<(&str, &str)> {
        match (self.file_url.as_deref(), self.file_name.as_deref()) {
            (Some(url), Some(name)) => Some((url, name)),
            _ => None,
        }
    }
}

/// Expense category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillType {
    Transports,
    RestaurantsEtBars,
    HotelEtLogement,
    ServicesEnLigne,
    ItEtElectronique,
    EquipementEtMateriel,
    FournituresDeBureau,
    Other(String),
}

impl BillType {
    /// Categories offered by the submission form, in display order
    pub const ALL: [BillType; 7] = [
        BillType::Transports,
        BillType::RestaurantsEtBars,
        BillType::HotelEtLogement,
        BillType::ServicesEnLigne,
        BillType::ItEtElectronique,
        BillType::EquipementEtMateriel,
        BillType::FournituresDeBureau,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            BillType::Transports => "Transports",
            BillType::RestaurantsEtBars => "Restaurants et bars",
            BillType::HotelEtLogement => "Hôtel et logement",
            BillType::ServicesEnLigne => "Services en ligne",
            BillType::ItEtElectronique => "IT et électronique",
            BillType::EquipementEtMateriel => "Equipement et matériel",
            BillType::FournituresDeBureau => "Fournitures de bureau",
            BillType::Other(s) => s,
        }
    }
}

impl Default for BillType {
    fn default() -> Self {
        BillType::Other(String::new())
    }
}

impl From<String> for BillType {
    fn from(value: String) -> Self {
        BillType::ALL
            .iter()
            .find(|t| t.as_str() == value)
            .cloned()
            .unwrap_or(BillType::Other(value))
    }
}

impl From<BillType> for String {
    fn from(value: BillType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for BillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review status. Only the remote store changes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
    Unknown(String),
}

impl BillStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
            BillStatus::Unknown(s) => s,
        }
    }
}

impl Default for BillStatus {
    fn default() -> Self {
        BillStatus::Unknown(String::new())
    }
}

impl From<String> for BillStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => BillStatus::Pending,
            "accepted" => BillStatus::Accepted,
            "refused" => BillStatus::Refused,
            _ => BillStatus::Unknown(value),
        }
    }
}

impl From<BillStatus> for String {
    fn from(value: BillStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Kind of logged-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

/// Session record stored under the `"user"` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    pub email: String,
}

/// Receipt file picked by the user
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptFile {
    /// Path or name as reported by the file picker
    pub path: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ReceiptFile {
    pub fn new(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// Read a receipt from disk
    pub async fn read(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(path.to_string_lossy(), bytes))
    }

    /// Name after the last `/` or `\` separator
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(&self.path)
    }

    /// Lowercased extension, if the name has one
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name();
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }

    /// MIME type derived from the extension when none was given
    pub fn mime_type(&self) -> String {
        if let Some(ref content_type) = self.content_type {
            return content_type.clone();
        }
        match self.extension().as_deref() {
            Some("png") => "image/png".to_string(),
            Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
            _ => "application/octet-stream".to_string(),
        }
    }
}

/// Result of uploading a receipt: where it lives and the reserved record key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedReceipt {
    pub file_url: String,
    pub key: String,
}

/// Bill payload sent to the store's create operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    /// Record key reserved by the upload, if any
    #[serde(skip)]
    pub key: Option<String>,
    pub email: String,
    #[serde(rename = "type")]
    pub bill_type: BillType,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: Option<f64>,
    pub pct: f64,
    pub commentary: Option<String>,
    pub file_url: String,
    pub file_name: String,
    pub status: BillStatus,
}

/// Raw values typed into the submission form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBillForm {
    pub bill_type: String,
    pub name: String,
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_number(deserializer)?.unwrap_or_default())
}

/// Accepts a JSON number or a numeric string. Anything else reads as absent.
fn lenient_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::Text(s)) if !s.trim().is_empty() => match s.trim().parse() {
            Ok(n) => Some(n),
            Err(_) => {
                warn!("Ignoring non-numeric value '{}'", s);
                None
            }
        },
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_deserializes_mixed_number_fields() {
        let json = r#"{
            "id": "47qAXb6fIm2zOKkLzMro",
            "vat": "80",
            "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…f-1.jpg",
            "status": "pending",
            "type": "Hôtel et logement",
            "commentary": "séminaire billed",
            "name": "encore",
            "fileName": "preview-facture-free-201801-pdf-1.jpg",
            "date": "2004-04-04",
            "amount": 400,
            "commentAdmin": "ok",
            "email": "a@a",
            "pct": 20
        }"#;

        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.vat, Some(80.0));
        assert_eq!(bill.amount, 400.0);
        assert_eq!(bill.bill_type, BillType::HotelEtLogement);
        assert_eq!(bill.status, BillStatus::Pending);
        assert!(bill.receipt().is_some());
    }

    #[test]
    fn test_unknown_status_and_type_are_preserved() {
        let json = r#"{"type": "Voyage", "amount": "12", "date": "2021-01-01", "status": "archived"}"#;
        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.bill_type, BillType::Other("Voyage".into()));
        assert_eq!(bill.status, BillStatus::Unknown("archived".into()));
        assert_eq!(bill.receipt(), None);
    }

    #[test]
    fn test_incomplete_records_still_deserialize() {
        let json = r#"[
            {"id": "1", "type": "Transports", "amount": 12, "date": "2022-01-02", "status": "pending"},
            {"id": "2", "type": "Transports", "amount": null, "date": "2022-01-03", "status": "accepted"},
            {"id": "3", "type": null, "amount": "abc", "vat": true, "date": "2022-01-04"}
        ]"#;

        let bills: Vec<Bill> = serde_json::from_str(json).unwrap();
        assert_eq!(bills.len(), 3);
        assert_eq!(bills[1].amount, 0.0);
        assert_eq!(bills[2].amount, 0.0);
        assert_eq!(bills[2].vat, None);
        assert_eq!(bills[2].bill_type, BillType::Other(String::new()));
        assert_eq!(bills[2].status, BillStatus::Unknown(String::new()));

        let undated: Bill = serde_json::from_str(r#"{"id": "4"}"#).unwrap();
        assert_eq!(undated.date, "");
        assert_eq!(undated.status, BillStatus::default());
    }

    #[test]
    fn test_receipt_file_name_and_extension() {
        let file = ReceiptFile::new("C:\\fakepath\\photo.JPG", vec![]);
        assert_eq!(file.file_name(), "photo.JPG");
        assert_eq!(file.extension().as_deref(), Some("jpg"));
        assert_eq!(file.mime_type(), "image/jpeg");

        let no_ext = ReceiptFile::new("/tmp/receipt", vec![]);
        assert_eq!(no_ext.extension(), None);

        let hidden = ReceiptFile::new("/tmp/.png", vec![]);
        assert_eq!(hidden.extension(), None);
    }

    #[test]
    fn test_session_user_json() {
        let user: User = serde_json::from_str(r#"{"type":"Employee","email":"a@a"}"#).unwrap();
        assert_eq!(user.user_type, UserType::Employee);
        assert_eq!(user.email, "a@a");
    }
}
