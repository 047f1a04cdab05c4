use portfolio_core_contact_contracts::ContactSubmitError;
use portfolio_models::contact::{
    is_valid_email, is_valid_message, is_valid_name, is_valid_phone, ContactEmail, ContactMessage,
    ContactName, ContactPhone, ContactSubmission, SubmissionField,
};

/// The four contact fields after all checks have passed, trimmed and
/// normalized for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: ContactPhone,
    pub message: ContactMessage,
}

/// Runs the contact form checks in order and fails with the first one that
/// does not hold.
///
/// The field predicates look at the values exactly as submitted. The values
/// are trimmed afterwards, and a field which no longer passes its check once
/// trimmed fails with that field's error.
pub fn validate_submission(
    ContactSubmission {
        name,
        email,
        phone,
        message,
    }: ContactSubmission,
) -> Result<ValidContact, ContactSubmitError> {
    let fields = [&name, &email, &phone, &message];

    if fields.iter().any(|f| matches!(f, SubmissionField::Missing)) {
        return Err(ContactSubmitError::MissingFields);
    }

    let [Some(name), Some(email), Some(phone), Some(message)] = fields.map(SubmissionField::as_text)
    else {
        return Err(ContactSubmitError::NotStrings);
    };

    if [name, email, phone, message]
        .iter()
        .any(|f| f.trim().is_empty())
    {
        return Err(ContactSubmitError::Blank);
    }

    if !is_valid_name(name) {
        return Err(ContactSubmitError::InvalidName);
    }
    if !is_valid_email(email) {
        return Err(ContactSubmitError::InvalidEmail);
    }
    if !is_valid_phone(phone) {
        return Err(ContactSubmitError::InvalidPhone);
    }
    if !is_valid_message(message) {
        return Err(ContactSubmitError::InvalidMessage);
    }

    Ok(ValidContact {
        name: ContactName::try_new(name).map_err(|_| ContactSubmitError::InvalidName)?,
        email: ContactEmail::try_new(email).map_err(|_| ContactSubmitError::InvalidEmail)?,
        phone: ContactPhone::try_new(phone).map_err(|_| ContactSubmitError::InvalidPhone)?,
        message: ContactMessage::try_new(message)
            .map_err(|_| ContactSubmitError::InvalidMessage)?,
    })
}
