use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A file picked in the receipt input.
#[derive(Clone, Debug, PartialEq)]
pub struct FileSelection {
    /// Value of the input, e.g. `C:\fakepath\facture.png`.
    pub path: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileSelection {
    pub fn new(path: impl Into<String>, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        FileSelection {
            path: path.into(),
            content_type: content_type.map(String::from),
            bytes,
        }
    }

    /// Last path segment; browsers hand back either separator.
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or(self.path.as_str())
    }

    pub fn extension(&self) -> Option<String> {
        let name = self.file_name();
        name.rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// Field values of the new-bill form, as typed by the user.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewBillForm {
    #[serde(rename = "type", default)]
    pub expense_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub vat: String,
    #[serde(default)]
    pub pct: String,
    #[serde(default)]
    pub commentary: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormSubmitEvent {
    pub form: NewBillForm,
    default_prevented: bool,
}

impl FormSubmitEvent {
    pub fn new(form: NewBillForm) -> Self {
        FormSubmitEvent {
            form,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// The eye icon of one row in the list; carries that bill's receipt URL.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ReceiptIcon {
    pub bill_url: Option<String>,
}
