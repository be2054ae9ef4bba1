//! Sample bills served by the in-memory store

use crate::models::{Bill, BillStatus, BillType};

const SAMPLE_RECEIPT_URL: &str =
    "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/justificatifs%2Fpreview-facture-free-201801-pdf-1.jpg?alt=media";

/// Four bills with distinct dates, listed out of date order
pub fn bills() -> Vec<Bill> {
    vec![
        Bill {
            id: "47qAXb6fIm2zOKkLzMro".to_string(),
            email: "a@a".to_string(),
            bill_type: BillType::HotelEtLogement,
            name: "encore".to_string(),
            amount: 400.0,
            date: "2004-04-04".to_string(),
            vat: Some(80.0),
            pct: Some(20.0),
            commentary: Some("séminaire billed".to_string()),
            file_url: Some(SAMPLE_RECEIPT_URL.to_string()),
            file_name: Some("preview-facture-free-201801-pdf-1.jpg".to_string()),
            status: BillStatus::Pending,
            comment_admin: Some("ok".to_string()),
        },
        Bill {
            id: "BeKy5Mo4jkmdfPGYpTxZ".to_string(),
            email: "a@a".to_string(),
            bill_type: BillType::ServicesEnLigne,
            name: "test1".to_string(),
            amount: 100.0,
            date: "2001-01-01".to_string(),
            vat: None,
            pct: Some(20.0),
            commentary: Some("plop".to_string()),
            file_url: Some(SAMPLE_RECEIPT_URL.replace("201801", "201903")),
            file_name: Some("1592770761.jpeg".to_string()),
            status: BillStatus::Refused,
            comment_admin: Some("en fait non".to_string()),
        },
        Bill {
            id: "UIUZtnPQvnbFnB0ozvJh".to_string(),
            email: "a@a".to_string(),
            bill_type: BillType::ServicesEnLigne,
            name: "test3".to_string(),
            amount: 300.0,
            date: "2003-03-03".to_string(),
            vat: Some(60.0),
            pct: Some(20.0),
            commentary: None,
            file_url: Some(SAMPLE_RECEIPT_URL.replace("201801", "201904")),
            file_name: Some("facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png".to_string()),
            status: BillStatus::Accepted,
            comment_admin: Some("bien bien bien".to_string()),
        },
        Bill {
            id: "qcCK3SzECmaZAGRrHjaC".to_string(),
            email: "a@a".to_string(),
            bill_type: BillType::RestaurantsEtBars,
            name: "test2".to_string(),
            amount: 200.0,
            date: "2002-02-02".to_string(),
            vat: Some(40.0),
            pct: Some(20.0),
            commentary: Some("test2".to_string()),
            file_url: Some(SAMPLE_RECEIPT_URL.replace("201801", "201905")),
            file_name: Some("preview-facture-free-201801-pdf-1.jpg".to_string()),
            status: BillStatus::Refused,
            comment_admin: Some("pas la bonne facture".to_string()),
        },
    ]
}
