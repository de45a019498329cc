use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Parts Movement API",
        version = "1.0.0",
        description = r#"
# Parts Movement Log

Records where individual etched parts move between locations.

- **Etchings**: the catalog of known (part, etching) pairs
- **Submitters**: people allowed to record movements
- **Parts log**: the append-only movement history, with CSV export

## Error Handling

Failed requests return a JSON body with the message, status and request id:

```json
{
  "error": "Name already registered",
  "status": 409,
  "request_id": "7d1f3c1e-0b8a-4a57-9a55-5a8e4c7f0e21",
  "timestamp": "2025-11-12T10:30:00+00:00"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    tags(
        (name = "etchings", description = "Known part etchings"),
        (name = "submitters", description = "Submitter registry"),
        (name = "partslog", description = "Movement log and CSV export"),
        (name = "health", description = "Service health")
    ),
    paths(
        crate::handlers::etchings::list_etchings,
        crate::handlers::submitters::list_submitters,
        crate::handlers::submitters::register_submitter,
        crate::handlers::parts_log::submit_entry,
        crate::handlers::parts_log::list_entries,
        crate::handlers::parts_log::export_csv,
        crate::handlers::health::health_check,
    ),
    components(
        schemas(
            crate::errors::ErrorResponse,
            crate::services::etchings::EtchingView,
            crate::services::parts_log::NewPartsLogEntry,
            crate::entities::parts_log::Model,
            crate::handlers::submitters::RegisterRequest,
            crate::handlers::submitters::RegisterResponse,
            crate::handlers::parts_log::SubmitEntryResponse,
            crate::handlers::health::HealthResponse,
            crate::handlers::health::ComponentStatus,
        )
    )
)]
pub struct ApiDoc;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
