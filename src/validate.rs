//! Pre-network parameter checks.
//!
//! Every operation validates its inputs in a fixed order and returns the
//! first rejection before any outbound call is issued. The checks are
//! pure: a failed validation never reaches the transport.

use crate::envelope::{ResponseEnvelope, Status};

pub(crate) const MISSING_API_KEY_MESSAGE: &str =
    "Please provide your FlexOffers API key to proceed. Ask the user for their API key.";
pub(crate) const MISSING_NAME_MESSAGE: &str =
    "Please provide a search term for the promotion (e.g. 'nike shoe').";
pub(crate) const MISSING_PROGRAM_NAME_MESSAGE: &str =
    "Please provide the name of the program to apply to.";
pub(crate) const TERMS_NOT_ACCEPTED_MESSAGE: &str =
    "Applying requires accepting the program's terms. Confirm acceptance with the user, then retry with accept_terms set to true.";
pub(crate) const TERMS_REJECTED_MESSAGE: &str =
    "The program's terms were declined, so no application was submitted.";

/// Explicit agreement state for consent-gated operations.
///
/// "Not supplied" and "explicitly declined" must stay distinguishable:
/// they produce different guidance, so this is a tri-state rather than a
/// boolean with a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Consent {
    #[default]
    Unset,
    Declined,
    Accepted,
}

impl From<Option<bool>> for Consent {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Consent::Unset,
            Some(false) => Consent::Declined,
            Some(true) => Consent::Accepted,
        }
    }
}

/// Resolve the effective credential: the per-call key wins over the
/// configured default; neither present is the `missing_api_key` rejection.
pub(crate) fn require_api_key(
    explicit: Option<&str>,
    configured: Option<&str>,
) -> Result<String, ResponseEnvelope> {
    explicit
        .filter(|k| !k.trim().is_empty())
        .or_else(|| configured.filter(|k| !k.trim().is_empty()))
        .map(str::to_string)
        .ok_or_else(|| ResponseEnvelope::rejection(Status::MissingApiKey, MISSING_API_KEY_MESSAGE))
}

pub(crate) fn require_search_term(name: &str) -> Result<(), ResponseEnvelope> {
    if name.trim().is_empty() {
        return Err(ResponseEnvelope::rejection(Status::MissingName, MISSING_NAME_MESSAGE));
    }
    Ok(())
}

pub(crate) fn require_program_name(name: &str) -> Result<(), ResponseEnvelope> {
    if name.trim().is_empty() {
        return Err(ResponseEnvelope::rejection(
            Status::MissingProgramName,
            MISSING_PROGRAM_NAME_MESSAGE,
        ));
    }
    Ok(())
}

/// Gate a state-changing call on explicit affirmative consent.
pub(crate) fn require_consent(consent: Consent) -> Result<(), ResponseEnvelope> {
    match consent {
        Consent::Accepted => Ok(()),
        Consent::Unset => Err(ResponseEnvelope::rejection(
            Status::TermsNotAccepted,
            TERMS_NOT_ACCEPTED_MESSAGE,
        )),
        Consent::Declined => Err(ResponseEnvelope::rejection(
            Status::TermsRejected,
            TERMS_REJECTED_MESSAGE,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_wins_over_configured() {
        let key = require_api_key(Some("caller-key"), Some("default-key")).unwrap();
        assert_eq!(key, "caller-key");
    }

    #[test]
    fn test_configured_default_fills_in() {
        let key = require_api_key(None, Some("default-key")).unwrap();
        assert_eq!(key, "default-key");
    }

    #[test]
    fn test_blank_keys_count_as_absent() {
        let rejection = require_api_key(Some("   "), None).unwrap_err();
        assert_eq!(rejection.status, Status::MissingApiKey);
        assert!(rejection.message.unwrap().contains("API key"));
    }

    #[test]
    fn test_consent_tri_state() {
        assert!(require_consent(Consent::Accepted).is_ok());

        let unset = require_consent(Consent::Unset).unwrap_err();
        assert_eq!(unset.status, Status::TermsNotAccepted);

        let declined = require_consent(Consent::Declined).unwrap_err();
        assert_eq!(declined.status, Status::TermsRejected);

        // Distinct guidance for the two failure modes.
        assert_ne!(unset.message, declined.message);
    }

    #[test]
    fn test_consent_from_optional_flag() {
        assert_eq!(Consent::from(None), Consent::Unset);
        assert_eq!(Consent::from(Some(false)), Consent::Declined);
        assert_eq!(Consent::from(Some(true)), Consent::Accepted);
    }

    #[test]
    fn test_search_term_required() {
        assert_eq!(
            require_search_term("").unwrap_err().status,
            Status::MissingName
        );
        assert!(require_search_term("nike shoe").is_ok());
    }
}
