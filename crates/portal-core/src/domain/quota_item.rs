//! Quota Item
//!
//! One unit of the data-entry workload. `QuotaDraft` is what the user types
//! (all strings, bound to inputs); `QuotaItem` is the validated record that
//! goes on the wire. The only way to build a `QuotaItem` is through
//! validation.

use chrono::{Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, Validator};

lazy_static! {
    static ref ACCOUNT: Regex = Regex::new(r"^[0-9]{6,18}$").unwrap();
    static ref IFSC: Regex = Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").unwrap();
    static ref AADHAAR: Regex = Regex::new(r"^[0-9]{12}$").unwrap();
    static ref PAN: Regex = Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap();
}

/// Fields of the quota form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuotaField {
    Name,
    FormNumber,
    AccountNumber,
    PhoneNumber,
    BankName,
    BranchName,
    IfscCode,
    AadhaarNumber,
    PanNumber,
    Email,
    Amount,
    DateOfBirth,
    Address,
}

impl QuotaField {
    pub const ALL: [QuotaField; 13] = [
        QuotaField::Name,
        QuotaField::FormNumber,
        QuotaField::AccountNumber,
        QuotaField::PhoneNumber,
        QuotaField::BankName,
        QuotaField::BranchName,
        QuotaField::IfscCode,
        QuotaField::AadhaarNumber,
        QuotaField::PanNumber,
        QuotaField::Email,
        QuotaField::Amount,
        QuotaField::DateOfBirth,
        QuotaField::Address,
    ];

    /// Wire key
    pub fn key(&self) -> &'static str {
        match self {
            QuotaField::Name => "name",
            QuotaField::FormNumber => "formNumber",
            QuotaField::AccountNumber => "accountNumber",
            QuotaField::PhoneNumber => "phoneNumber",
            QuotaField::BankName => "bankName",
            QuotaField::BranchName => "branchName",
            QuotaField::IfscCode => "ifscCode",
            QuotaField::AadhaarNumber => "aadhaarNumber",
            QuotaField::PanNumber => "panNumber",
            QuotaField::Email => "email",
            QuotaField::Amount => "amount",
            QuotaField::DateOfBirth => "dateOfBirth",
            QuotaField::Address => "address",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuotaField::Name => "Name",
            QuotaField::FormNumber => "Form Number",
            QuotaField::AccountNumber => "Account Number",
            QuotaField::PhoneNumber => "Phone Number",
            QuotaField::BankName => "Bank Name",
            QuotaField::BranchName => "Branch Name",
            QuotaField::IfscCode => "IFSC Code",
            QuotaField::AadhaarNumber => "Aadhaar Number",
            QuotaField::PanNumber => "PAN Number",
            QuotaField::Email => "Email",
            QuotaField::Amount => "Amount",
            QuotaField::DateOfBirth => "Date of Birth",
            QuotaField::Address => "Address",
        }
    }

    /// HTML input type
    pub fn input_type(&self) -> &'static str {
        match self {
            QuotaField::Email => "email",
            QuotaField::Amount | QuotaField::FormNumber => "number",
            QuotaField::DateOfBirth => "date",
            QuotaField::PhoneNumber => "tel",
            _ => "text",
        }
    }

    /// Rendered as a textarea
    pub fn is_multiline(&self) -> bool {
        matches!(self, QuotaField::Address)
    }
}

/// The quota form as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuotaDraft {
    pub name: String,
    pub form_number: String,
    pub account_number: String,
    pub phone_number: String,
    pub bank_name: String,
    pub branch_name: String,
    pub ifsc_code: String,
    pub aadhaar_number: String,
    pub pan_number: String,
    pub email: String,
    pub amount: String,
    pub date_of_birth: String,
    pub address: String,
}

impl QuotaDraft {
    /// Blank draft for the item at `index` (form numbers are 1-based)
    pub fn blank(index: u32) -> Self {
        Self {
            form_number: (index + 1).to_string(),
            ..Default::default()
        }
    }

    pub fn get(&self, field: QuotaField) -> &str {
        match field {
            QuotaField::Name => &self.name,
            QuotaField::FormNumber => &self.form_number,
            QuotaField::AccountNumber => &self.account_number,
            QuotaField::PhoneNumber => &self.phone_number,
            QuotaField::BankName => &self.bank_name,
            QuotaField::BranchName => &self.branch_name,
            QuotaField::IfscCode => &self.ifsc_code,
            QuotaField::AadhaarNumber => &self.aadhaar_number,
            QuotaField::PanNumber => &self.pan_number,
            QuotaField::Email => &self.email,
            QuotaField::Amount => &self.amount,
            QuotaField::DateOfBirth => &self.date_of_birth,
            QuotaField::Address => &self.address,
        }
    }

    pub fn set(&mut self, field: QuotaField, value: String) {
        let slot = match field {
            QuotaField::Name => &mut self.name,
            QuotaField::FormNumber => &mut self.form_number,
            QuotaField::AccountNumber => &mut self.account_number,
            QuotaField::PhoneNumber => &mut self.phone_number,
            QuotaField::BankName => &mut self.bank_name,
            QuotaField::BranchName => &mut self.branch_name,
            QuotaField::IfscCode => &mut self.ifsc_code,
            QuotaField::AadhaarNumber => &mut self.aadhaar_number,
            QuotaField::PanNumber => &mut self.pan_number,
            QuotaField::Email => &mut self.email,
            QuotaField::Amount => &mut self.amount,
            QuotaField::DateOfBirth => &mut self.date_of_birth,
            QuotaField::Address => &mut self.address,
        };
        *slot = value;
    }

    pub fn validate(&self) -> Result<QuotaItem, ValidationError> {
        self.validate_on(Local::now().date_naive())
    }

    /// Validation against an explicit "today" for the birth-date check
    pub fn validate_on(&self, today: NaiveDate) -> Result<QuotaItem, ValidationError> {
        use QuotaField as F;

        let mut v = Validator::new();
        let name = v.required(F::Name.key(), F::Name.label(), &self.name).map(str::to_string);
        let form_number = v.positive_int(F::FormNumber.key(), F::FormNumber.label(), &self.form_number);
        let account_number = v.pattern(
            F::AccountNumber.key(),
            F::AccountNumber.label(),
            &self.account_number,
            &ACCOUNT,
            "6 to 18 digits",
        );
        v.phone(F::PhoneNumber.key(), F::PhoneNumber.label(), &self.phone_number);
        let bank_name = v.required(F::BankName.key(), F::BankName.label(), &self.bank_name).map(str::to_string);
        let branch_name = v.required(F::BranchName.key(), F::BranchName.label(), &self.branch_name).map(str::to_string);
        let ifsc_code = v.pattern(F::IfscCode.key(), F::IfscCode.label(), &self.ifsc_code, &IFSC, "SBIN0001234");
        let aadhaar_number = v.pattern(
            F::AadhaarNumber.key(),
            F::AadhaarNumber.label(),
            &self.aadhaar_number,
            &AADHAAR,
            "12 digits",
        );
        let pan_number = v.pattern(F::PanNumber.key(), F::PanNumber.label(), &self.pan_number, &PAN, "ABCDE1234F");
        v.email(F::Email.key(), F::Email.label(), &self.email);
        let amount = v.amount(F::Amount.key(), F::Amount.label(), &self.amount);
        let date_of_birth = v.date(F::DateOfBirth.key(), F::DateOfBirth.label(), &self.date_of_birth, today);
        let address = v.required(F::Address.key(), F::Address.label(), &self.address).map(str::to_string);
        v.finish()?;

        match (
            name,
            form_number,
            account_number,
            bank_name,
            branch_name,
            ifsc_code,
            aadhaar_number,
            pan_number,
            amount,
            date_of_birth,
            address,
        ) {
            (
                Some(name),
                Some(form_number),
                Some(account_number),
                Some(bank_name),
                Some(branch_name),
                Some(ifsc_code),
                Some(aadhaar_number),
                Some(pan_number),
                Some(amount),
                Some(date_of_birth),
                Some(address),
            ) => Ok(QuotaItem {
                form_number,
                name,
                account_number,
                phone_number: self.phone_number.trim().to_string(),
                bank_name,
                branch_name,
                ifsc_code,
                aadhaar_number,
                pan_number,
                email: self.email.trim().to_string(),
                amount,
                date_of_birth,
                address,
            }),
            // Every None above pushed an issue, so finish() already returned.
            _ => unreachable!("validator accepted a draft with missing fields"),
        }
    }
}

/// A validated quota item, ready to post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "QuotaDraft", try_from = "QuotaDraft")]
pub struct QuotaItem {
    pub form_number: u32,
    pub name: String,
    pub account_number: String,
    pub phone_number: String,
    pub bank_name: String,
    pub branch_name: String,
    pub ifsc_code: String,
    pub aadhaar_number: String,
    pub pan_number: String,
    pub email: String,
    pub amount: f64,
    pub date_of_birth: NaiveDate,
    pub address: String,
}

impl From<QuotaItem> for QuotaDraft {
    fn from(item: QuotaItem) -> Self {
        Self {
            name: item.name,
            form_number: item.form_number.to_string(),
            account_number: item.account_number,
            phone_number: item.phone_number,
            bank_name: item.bank_name,
            branch_name: item.branch_name,
            ifsc_code: item.ifsc_code,
            aadhaar_number: item.aadhaar_number,
            pan_number: item.pan_number,
            email: item.email,
            amount: item.amount.to_string(),
            date_of_birth: item.date_of_birth.format("%Y-%m-%d").to_string(),
            address: item.address,
        }
    }
}

impl TryFrom<QuotaDraft> for QuotaItem {
    type Error = ValidationError;

    fn try_from(draft: QuotaDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

#[cfg(test)]
pub(crate) fn sample_draft(index: u32) -> QuotaDraft {
    QuotaDraft {
        name: "Asha Verma".to_string(),
        form_number: (index + 1).to_string(),
        account_number: "123456789012".to_string(),
        phone_number: "9876543210".to_string(),
        bank_name: "State Bank of India".to_string(),
        branch_name: "Pune Main".to_string(),
        ifsc_code: "sbin0001234".to_string(),
        aadhaar_number: "1234 5678 9012".to_string(),
        pan_number: "ABCDE1234F".to_string(),
        email: "asha@example.com".to_string(),
        amount: "2500.50".to_string(),
        date_of_birth: "1994-08-21".to_string(),
        address: "12 MG Road, Pune".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldProblem;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_valid_draft_normalizes_identifiers() {
        let item = sample_draft(4).validate_on(today()).unwrap();
        assert_eq!(item.form_number, 5);
        assert_eq!(item.ifsc_code, "SBIN0001234");
        assert_eq!(item.aadhaar_number, "123456789012");
        assert_eq!(item.amount, 2500.5);
    }

    #[test]
    fn test_empty_required_field_is_named() {
        let mut draft = sample_draft(0);
        draft.set(QuotaField::BankName, "   ".to_string());
        let err = draft.validate_on(today()).unwrap_err();
        assert_eq!(err.fields(), vec!["bankName"]);
        assert_eq!(err.issues[0].problem, FieldProblem::Missing);
    }

    #[test]
    fn test_format_rules() {
        let mut draft = sample_draft(0);
        draft.phone_number = "98765".to_string();
        draft.email = "asha@".to_string();
        draft.date_of_birth = "21-08-1994".to_string();
        draft.pan_number = "1234".to_string();
        let err = draft.validate_on(today()).unwrap_err();
        assert_eq!(err.fields(), vec!["phoneNumber", "panNumber", "email", "dateOfBirth"]);
    }

    #[test]
    fn test_numeric_fields_take_ascii_digits_only() {
        let mut draft = sample_draft(0);
        draft.phone_number = "٩٨٧٦٥٤٣٢١٠".to_string();
        draft.aadhaar_number = "١٢٣٤٥٦٧٨٩٠١٢".to_string();
        draft.account_number = "१२३४५६७८".to_string();
        let err = draft.validate_on(today()).unwrap_err();
        assert_eq!(err.fields(), vec!["accountNumber", "phoneNumber", "aadhaarNumber"]);
    }

    #[test]
    fn test_blank_draft_lists_every_field() {
        let err = QuotaDraft::default().validate_on(today()).unwrap_err();
        assert_eq!(err.issues.len(), QuotaField::ALL.len());
        let blank = QuotaDraft::blank(9);
        assert_eq!(blank.get(QuotaField::FormNumber), "10");
    }

    #[test]
    fn test_wire_format_is_string_valued_camel_case() {
        let item = sample_draft(0).validate_on(today()).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["formNumber"], "1");
        assert_eq!(json["dateOfBirth"], "1994-08-21");
        assert_eq!(json["amount"], "2500.5");
        assert_eq!(json["ifscCode"], "SBIN0001234");
    }

    #[test]
    fn test_get_set_cover_all_fields() {
        let mut draft = QuotaDraft::default();
        for field in QuotaField::ALL {
            draft.set(field, field.key().to_string());
        }
        for field in QuotaField::ALL {
            assert_eq!(draft.get(field), field.key());
        }
    }
}
