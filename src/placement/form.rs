// src/placement/form.rs

use crate::domain::listing::{Coordinates, ListingKind, NewListing};
use crate::domain::payment::PaymentTerms;
use crate::errors::SubmitError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Address,
    Payment,
    Contacts,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Название",
            FormField::Description => "Описание",
            FormField::Address => "Адрес",
            FormField::Payment => "Оплата",
            FormField::Contacts => "Контакты",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the user typed into the task/worker form.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
    /// Blank means "use what the map gave us".
    pub address: String,
    pub payment: PaymentTerms,
    pub contacts: String,
}

fn required(value: &str, field: FormField) -> Result<String, SubmitError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SubmitError::MissingField(field));
    }
    Ok(value.to_string())
}

impl ListingForm {
    /// Build the create body. `resolved_address` fills a blank address field.
    pub fn to_new_listing(
        &self,
        kind: ListingKind,
        at: Coordinates,
        resolved_address: Option<&str>,
    ) -> Result<NewListing, SubmitError> {
        let title = required(&self.title, FormField::Title)?;
        let description = required(&self.description, FormField::Description)?;

        let address = if self.address.trim().is_empty() {
            resolved_address.unwrap_or_default()
        } else {
            self.address.as_str()
        };
        let address = required(address, FormField::Address)?;

        if let PaymentTerms::Amount { amount, .. } = &self.payment {
            if amount.trim().is_empty() {
                return Err(SubmitError::MissingField(FormField::Payment));
            }
        }
        let contacts = required(&self.contacts, FormField::Contacts)?;

        Ok(NewListing {
            kind,
            title,
            description,
            address,
            payment: self.payment.compose(kind),
            contacts,
            latitude: at.lat,
            longitude: at.lng,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ListingForm {
        ListingForm {
            title: " Покрасить забор ".into(),
            description: "20 метров".into(),
            address: String::new(),
            payment: PaymentTerms::Amount {
                amount: "100".into(),
                unit: "BYN".into(),
            },
            contacts: "@owner".into(),
        }
    }

    #[test]
    fn builds_body_with_resolved_address() {
        let body = form()
            .to_new_listing(
                ListingKind::Task,
                Coordinates::new(53.9, 27.56),
                Some("ул. Ленина, 1"),
            )
            .unwrap();

        assert_eq!(body.title, "Покрасить забор");
        assert_eq!(body.address, "ул. Ленина, 1");
        assert_eq!(body.payment, "100 BYN");
        assert_eq!(body.latitude, 53.9);
    }

    #[test]
    fn typed_address_wins_over_resolved() {
        let mut f = form();
        f.address = "Мой адрес".into();
        let body = f
            .to_new_listing(ListingKind::Worker, Coordinates::new(1.0, 1.0), Some("geo"))
            .unwrap();
        assert_eq!(body.address, "Мой адрес");
        assert_eq!(body.payment, "от 100 BYN");
    }

    #[test]
    fn reports_first_missing_field() {
        let mut f = form();
        f.title = "  ".into();
        let err = f
            .to_new_listing(ListingKind::Task, Coordinates::new(1.0, 1.0), Some("a"))
            .unwrap_err();
        assert_eq!(err, SubmitError::MissingField(FormField::Title));

        let err = form()
            .to_new_listing(ListingKind::Task, Coordinates::new(1.0, 1.0), None)
            .unwrap_err();
        assert_eq!(err, SubmitError::MissingField(FormField::Address));
    }

    #[test]
    fn negotiable_needs_no_amount() {
        let mut f = form();
        f.payment = PaymentTerms::Negotiable;
        let body = f
            .to_new_listing(ListingKind::Task, Coordinates::new(1.0, 1.0), Some("a"))
            .unwrap();
        assert_eq!(body.payment, "Договорная");

        f.payment = PaymentTerms::Amount {
            amount: " ".into(),
            unit: "BYN".into(),
        };
        let err = f
            .to_new_listing(ListingKind::Task, Coordinates::new(1.0, 1.0), Some("a"))
            .unwrap_err();
        assert_eq!(err, SubmitError::MissingField(FormField::Payment));
    }
}
