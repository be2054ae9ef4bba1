//! New bill controller: receipt validation, upload and record creation

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::{BilledError, Result};
use crate::format::parse_date;
use crate::models::{Bill, BillDraft, BillStatus, BillType, NewBillForm, ReceiptFile};
use crate::navigation::{Navigator, Route};
use crate::page::RenderTarget;
use crate::session::{self, SessionStore};
use crate::store::BillStore;
use crate::views::new_bill::{self as new_bill_view, NewBillView};

/// Receipt extensions accepted by the form, compared lowercased
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// VAT percentage used when the field is left blank
const DEFAULT_PCT: f64 = 20.0;

/// Where the submission screen is in its workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Editing,
    Validating,
    /// Last chosen file was refused; a new file must be chosen
    Rejected,
    Uploading,
    /// Bill created and list screen requested
    Created,
}

/// Collaborators of the submission screen. All of them are required.
pub struct NewBillConfig {
    pub target: RenderTarget,
    pub store: Option<Arc<dyn BillStore>>,
    pub navigator: Option<Arc<dyn Navigator>>,
    pub session: Option<Arc<dyn SessionStore>>,
}

impl NewBillConfig {
    pub fn new(target: RenderTarget) -> Self {
        Self {
            target,
            store: None,
            navigator: None,
            session: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn BillStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn with_session(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }
}

pub struct NewBillController {
    target: RenderTarget,
    store: Arc<dyn BillStore>,
    navigator: Arc<dyn Navigator>,
    session: Arc<dyn SessionStore>,
    state: SubmissionState,
    form: NewBillForm,
    file: Option<ReceiptFile>,
    file_name: Option<String>,
    file_type_invalid: bool,
}

impl NewBillController {
    /// Validate collaborators and render the empty form
    pub fn new(config: NewBillConfig) -> Result<Self> {
        let store = config.store.ok_or(BilledError::MissingCollaborator("store"))?;
        let navigator = config
            .navigator
            .ok_or(BilledError::MissingCollaborator("navigator"))?;
        let session = config
            .session
            .ok_or(BilledError::MissingCollaborator("session"))?;

        let mut controller = Self {
            target: config.target,
            store,
            navigator,
            session,
            state: SubmissionState::Editing,
            form: NewBillForm::default(),
            file: None,
            file_name: None,
            file_type_invalid: false,
        };
        controller.render();
        Ok(controller)
    }

    /// Validate the chosen receipt. Only jpg, jpeg and png are kept.
    pub fn on_file_chosen(&mut self, file: ReceiptFile) -> Result<()> {
        self.state = SubmissionState::Validating;
        let name = file.file_name().to_string();

        let accepted = file
            .extension()
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()));

        if accepted {
            info!("Receipt {} accepted", name);
            self.file = Some(file);
            self.file_name = Some(name);
            self.file_type_invalid = false;
            self.state = SubmissionState::Editing;
            self.render();
            Ok(())
        } else {
            warn!("Receipt {} rejected: unsupported file type", name);
            self.file = None;
            self.file_name = None;
            self.file_type_invalid = true;
            self.state = SubmissionState::Rejected;
            self.render();
            Err(BilledError::InvalidFileType(name))
        }
    }

    /// Upload the receipt, create the bill and go back to the list.
    ///
    /// Nothing is sent unless a receipt passed [`Self::on_file_chosen`] and the
    /// required fields parse.
    pub async fn on_submit(&mut self, form: NewBillForm) -> Result<Bill> {
        if self.state == SubmissionState::Created {
            return Err(BilledError::InvalidForm("bill already submitted".to_string()));
        }
        self.form = form;

        let (file, file_name) = match (self.file.clone(), self.file_name.clone()) {
            (Some(file), Some(file_name)) if self.state != SubmissionState::Rejected => {
                (file, file_name)
            }
            _ => {
                warn!("Submission blocked: no valid receipt chosen");
                self.file_type_invalid = true;
                self.render();
                return Err(BilledError::InvalidFileType(
                    self.file_name.clone().unwrap_or_default(),
                ));
            }
        };

        let fields = match parse_form(&self.form) {
            Ok(fields) => fields,
            Err(e) => {
                self.render();
                return Err(e);
            }
        };

        let user = session::current_user(self.session.as_ref()).await?;

        self.state = SubmissionState::Uploading;
        self.render();

        match self.upload_and_create(&file, file_name, &user.email, fields).await {
            Ok(bill) => {
                info!("Bill {} submitted", bill.id);
                self.state = SubmissionState::Created;
                self.render();
                self.navigator.navigate(Route::Bills);
                Ok(bill)
            }
            Err(e) => {
                error!("Bill submission failed: {}", e);
                self.state = SubmissionState::Editing;
                self.render();
                Err(e)
            }
        }
    }

    async fn upload_and_create(
        &self,
        file: &ReceiptFile,
        file_name: String,
        email: &str,
        fields: FormFields,
    ) -> Result<Bill> {
        let uploaded = self.store.upload(file, email).await?;

        let draft = BillDraft {
            key: Some(uploaded.key),
            email: email.to_string(),
            bill_type: fields.bill_type,
            name: fields.name,
            amount: fields.amount,
            date: fields.date,
            vat: fields.vat,
            pct: fields.pct,
            commentary: fields.commentary,
            file_url: uploaded.file_url,
            file_name,
            status: BillStatus::Pending,
        };

        self.store.create(&draft).await
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    /// Name of the accepted receipt, if any
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn file_type_invalid(&self) -> bool {
        self.file_type_invalid
    }

    fn render(&mut self) {
        let markup = new_bill_view::render(NewBillView {
            form: &self.form,
            file_type_error: self.file_type_invalid,
            uploading: self.state == SubmissionState::Uploading,
        });
        self.target.render(markup);
    }
}

/// Form values parsed into bill fields
#[derive(Debug, Clone, PartialEq)]
struct FormFields {
    bill_type: BillType,
    name: String,
    date: String,
    amount: f64,
    vat: Option<f64>,
    pct: f64,
    commentary: Option<String>,
}

fn parse_form(form: &NewBillForm) -> Result<FormFields> {
    let bill_type = form.bill_type.trim();
    if bill_type.is_empty() {
        return Err(BilledError::InvalidForm("expense type is required".to_string()));
    }

    let date = form.date.trim();
    if date.is_empty() {
        return Err(BilledError::InvalidForm("date is required".to_string()));
    }
    parse_date(date).map_err(|_| BilledError::InvalidForm(format!("invalid date '{}'", date)))?;

    let amount = parse_number(&form.amount, "amount")?
        .ok_or_else(|| BilledError::InvalidForm("amount is required".to_string()))?;
    let vat = parse_number(&form.vat, "vat")?;
    let pct = parse_number(&form.pct, "pct")?.unwrap_or(DEFAULT_PCT);

    let commentary = Some(form.commentary.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    Ok(FormFields {
        bill_type: BillType::from(bill_type.to_string()),
        name: form.name.trim().to_string(),
        date: date.to_string(),
        amount,
        vat,
        pct,
        commentary,
    })
}

fn parse_number(raw: &str, field: &str) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| BilledError::InvalidForm(format!("invalid {} '{}'", field, raw)))
}
