//! New bill submission form

use maud::{html, Markup};

use crate::models::{BillType, NewBillForm};

pub const FILE_TYPE_ERROR_MESSAGE: &str =
    "Le justificatif doit être une image au format jpg, jpeg ou png";

/// Inputs of one form render
#[derive(Debug, Clone, Copy)]
pub struct NewBillView<'a> {
    pub form: &'a NewBillForm,
    /// Show the file-type error region
    pub file_type_error: bool,
    /// Disable submission while the receipt is being uploaded
    pub uploading: bool,
}

/// Empty form with the file-type error region hidden
pub fn render_empty() -> Markup {
    render(NewBillView {
        form: &NewBillForm::default(),
        file_type_error: false,
        uploading: false,
    })
}

pub fn render(view: NewBillView<'_>) -> Markup {
    let form = view.form;
    let error_class = if view.file_type_error {
        "showErrorMessage"
    } else {
        "hideErrorMessage"
    };

    html! {
        div class="content" {
            div class="content-header" {
                div class="content-title" { "Envoyer une note de frais" }
            }
            div class="form-newbill-container content-inner" {
                form data-testid="form-new-bill" {
                    div class="row" {
                        div class="col-md-6" {
                            div class="col-half" {
                                label for="expense-type" class="bold-label" { "Type de dépense" }
                                select required class="form-control blue-border" data-testid="expense-type" name="expense-type" {
                                    @for bill_type in BillType::ALL.iter() {
                                        option selected[form.bill_type == bill_type.as_str()] {
                                            (bill_type.as_str())
                                        }
                                    }
                                }
                            }
                            div class="col-half" {
                                label for="expense-name" class="bold-label" { "Nom de la dépense" }
                                input type="text" class="form-control blue-border" data-testid="expense-name"
                                    name="expense-name" placeholder="Vol Paris Londres" value=(form.name);
                            }
                            div class="col-half" {
                                label for="datepicker" class="bold-label" { "Date" }
                                input required type="date" class="form-control blue-border" data-testid="datepicker"
                                    name="datepicker" value=(form.date);
                            }
                            div class="col-half" {
                                label for="amount" class="col-form-label bold-label" { "Montant TTC " }
                                input required type="number" class="form-control blue-input" data-testid="amount"
                                    name="amount" placeholder="348" value=(form.amount);
                            }
                            div class="col-half-row" {
                                div class="flex-col" {
                                    label for="vat" class="bold-label" { "TVA" }
                                    input type="number" class="form-control blue-input" data-testid="vat"
                                        name="vat" placeholder="70" value=(form.vat);
                                }
                                div class="flex-col" {
                                    input required type="number" class="form-control blue-input" data-testid="pct"
                                        name="pct" placeholder="20" value=(form.pct);
                                }
                            }
                        }
                        div class="col-md-6" {
                            div class="col-half" {
                                label for="commentary" class="bold-label" { "Commentaire" }
                                textarea class="form-control blue-border" data-testid="commentary" name="commentary" rows="3" {
                                    (form.commentary)
                                }
                            }
                            div class="col-half" {
                                label for="file" class="bold-label" { "Justificatif" }
                                input required type="file" accept=".jpg,.jpeg,.png" class="form-control blue-border"
                                    data-testid="file" name="file";
                                div class=(error_class) id="errorFileType" data-testid="errorFile" {
                                    (FILE_TYPE_ERROR_MESSAGE)
                                }
                            }
                        }
                    }
                    div class="row" {
                        div class="col-md-6" {
                            div class="col-half" {
                                button type="submit" id="btn-send-bill" class="btn btn-primary" disabled[view.uploading] {
                                    "Envoyer"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
