use clap::{Parser, Subcommand};
use billed::models::{NewBillForm, UserType};

#[derive(Parser)]
#[command(name = "billed")]
#[command(about = "Expense-report front end: list your bills and submit new ones with a receipt")]
#[command(version)]
pub struct Cli {
    /// Use the built-in sample bills instead of the remote API
    #[arg(long, global = true)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store the logged-in user in the local session
    Login {
        /// User email
        #[arg(short, long)]
        email: String,

        /// User type (employee, admin)
        #[arg(long = "type", default_value = "employee")]
        user_type: String,

        /// API token sent as a bearer token
        #[arg(long)]
        jwt: Option<String>,
    },

    /// Render the bill list screen
    Bills {
        /// Write the HTML to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Render the empty new bill form
    Form {
        /// Write the HTML to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Submit a new bill with a receipt image
    NewBill {
        /// Expense type, e.g. "Transports"
        #[arg(long = "type")]
        expense_type: String,

        /// Expense name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Expense date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Amount including taxes
        #[arg(short, long)]
        amount: String,

        /// VAT amount
        #[arg(long, default_value = "")]
        vat: String,

        /// VAT percentage
        #[arg(long, default_value = "")]
        pct: String,

        /// Free-text commentary
        #[arg(short, long, default_value = "")]
        commentary: String,

        /// Receipt image (jpg, jpeg or png)
        #[arg(short, long)]
        file: String,
    },

    /// Render the receipt overlay for a row of the bill list
    Preview {
        /// Row index in the rendered list (0 is the most recent bill)
        #[arg(short, long, default_value = "0")]
        row: usize,
    },
}

impl Commands {
    pub fn parse_user_type(user_type: &str) -> Result<UserType, anyhow::Error> {
        match user_type.to_lowercase().as_str() {
            "employee" => Ok(UserType::Employee),
            "admin" => Ok(UserType::Admin),
            other => Err(anyhow::anyhow!(
                "Unsupported user type: {}. Supported types: employee, admin",
                other
            )),
        }
    }

    pub fn new_bill_form(&self) -> Option<NewBillForm> {
        match self {
            Commands::NewBill {
                expense_type,
                name,
                date,
                amount,
                vat,
                pct,
                commentary,
                ..
            } => Some(NewBillForm {
                bill_type: expense_type.clone(),
                name: name.clone(),
                date: date.clone(),
                amount: amount.clone(),
                vat: vat.clone(),
                pct: pct.clone(),
                commentary: commentary.clone(),
            }),
            _ => None,
        }
    }
}
