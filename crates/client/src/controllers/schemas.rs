//! Response body validation against a declared `ResponseSchema`

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::http::ApiResponse;
use crate::schemas::ResponseSchema;

/// Validates bodies; issues no HTTP calls of its own
#[derive(Debug, Clone, Default)]
pub struct SchemasController;

impl SchemasController {
    pub fn new() -> Self {
        Self
    }

    /// Validate a response body, reporting every violation rather than the first
    pub fn validate_response(
        &self,
        response: &ApiResponse,
        schema: ResponseSchema,
    ) -> ClientResult<()> {
        let body = response.json_value()?;
        self.validate_value(&body, schema)
    }

    pub fn validate_value(&self, body: &Value, schema: ResponseSchema) -> ClientResult<()> {
        let violations = self.violations(body, schema)?;
        if violations.is_empty() {
            debug!("Response matches the {} schema", schema);
            return Ok(());
        }

        warn!(
            "Response violates the {} schema in {} place(s)",
            schema,
            violations.len()
        );
        Err(ClientError::SchemaViolation {
            schema: schema.name().to_string(),
            violations,
        })
    }

    /// Every violation as `<json pointer>: <message>`
    pub fn violations(&self, body: &Value, schema: ResponseSchema) -> ClientResult<Vec<String>> {
        let definition = schema.definition();
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(&definition)
            .map_err(|e| ClientError::SchemaDefinition {
                schema: schema.name().to_string(),
                reason: e.to_string(),
            })?;

        Ok(validator
            .iter_errors(body)
            .map(|error| {
                let path = error.instance_path.to_string();
                let path = if path.is_empty() { "/".to_string() } else { path };
                format!("{}: {}", path, error)
            })
            .collect())
    }
}
