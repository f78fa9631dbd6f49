//! The two-stage program application workflow.
//!
//! Application by name is a lookup stage (catalog fetch plus fuzzy match)
//! feeding an apply stage; application by identifier enters the apply
//! stage directly. Consent is validated before either stage runs, and a
//! failed lookup never reaches the apply stage.

use serde_json::{json, Value};

use super::core::FlexOffersClient;
use crate::envelope::{classify_failure, ResponseEnvelope, Status};
use crate::matcher::{self, MatchOutcome};
use crate::transport::HttpRequest;
use crate::validate::{self, Consent};
use crate::Result;

const FETCH_PROGRAMS_FAILED_MESSAGE: &str = "Failed to fetch programs list";

impl FlexOffersClient {
    /// Apply to a program located by fuzzy name lookup.
    ///
    /// Issues two strictly ordered outbound calls: the catalog fetch
    /// (cache-busted), then the application for the matched program.
    pub async fn apply_to_program_by_name(
        &self,
        api_key: Option<&str>,
        program_name: &str,
        country_code: Option<&str>,
        consent: Consent,
    ) -> ResponseEnvelope {
        let key = match validate::require_api_key(api_key, self.config.api_key.as_deref()) {
            Ok(key) => key,
            Err(rejection) => return rejection,
        };
        if let Err(rejection) = validate::require_program_name(program_name) {
            return rejection;
        }
        if let Err(rejection) = validate::require_consent(consent) {
            return rejection;
        }
        match self.lookup_and_apply(&key, program_name, country_code).await {
            Ok(envelope) => envelope,
            Err(err) => classify_failure(&err),
        }
    }

    async fn lookup_and_apply(
        &self,
        api_key: &str,
        program_name: &str,
        country_code: Option<&str>,
    ) -> Result<ResponseEnvelope> {
        let programs = self
            .fetch_programs(api_key, country_code, true, FETCH_PROGRAMS_FAILED_MESSAGE)
            .await?;

        let program = match matcher::find(&programs, program_name) {
            MatchOutcome::Found(program) => program.clone(),
            MatchOutcome::NotFound { suggestions } => {
                return Ok(not_found_envelope(program_name, &suggestions));
            }
        };

        let program_id = field_string(&program, "ProgramID");
        let response = self.submit_application(api_key, &program_id).await?;

        Ok(ResponseEnvelope::success(json!({
            "ProgramID": program.get("ProgramID").cloned().unwrap_or(Value::Null),
            "ProgramName": program.get("ProgramName").cloned().unwrap_or(Value::Null),
            "DomainURL": program.get("DomainURL").cloned().unwrap_or(Value::Null),
            "response": response,
        })))
    }

    /// Apply directly with a known advertiser identifier.
    ///
    /// Skips the lookup stage entirely; one outbound call after the
    /// consent gate.
    pub async fn apply_to_program(
        &self,
        api_key: Option<&str>,
        advertiser_id: &str,
        consent: Consent,
    ) -> ResponseEnvelope {
        let key = match validate::require_api_key(api_key, self.config.api_key.as_deref()) {
            Ok(key) => key,
            Err(rejection) => return rejection,
        };
        if let Err(rejection) = validate::require_consent(consent) {
            return rejection;
        }
        match self.submit_application(&key, advertiser_id).await {
            Ok(response) => ResponseEnvelope::success(json!({
                "ProgramID": advertiser_id,
                "response": response,
            })),
            Err(err) => classify_failure(&err),
        }
    }

    /// The apply stage proper: one application call with an explicit
    /// terms-accepted flag, tolerant of both structured and plain-text
    /// response bodies.
    async fn submit_application(&self, api_key: &str, advertiser_id: &str) -> Result<Value> {
        let url = format!(
            "{}/chat/ApplyToProgram",
            self.config.content_base_url.trim_end_matches('/')
        );
        let request = HttpRequest::new(url)
            .header("apikey", api_key)
            .query("advertiserId", advertiser_id)
            .query("acceptTerms", "true");
        tracing::debug!(advertiser_id, "submitting program application");
        let response = self.transport.get(request).await?;

        // Some deployments answer with JSON, others with a bare
        // confirmation line; either is a valid application receipt.
        Ok(serde_json::from_str(&response.body).unwrap_or(Value::String(response.body)))
    }
}

fn field_string(program: &Value, key: &str) -> String {
    match program.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) if !other.is_null() => other.to_string(),
        _ => String::new(),
    }
}

fn not_found_envelope(query: &str, suggestions: &[String]) -> ResponseEnvelope {
    let message = if suggestions.is_empty() {
        format!("No program matching '{}' was found.", query)
    } else {
        format!(
            "No program matching '{}' was found. Programs available to apply to include: {}.",
            query,
            suggestions.join(", ")
        )
    };
    ResponseEnvelope::rejection(Status::ProgramNotFound, message)
}
