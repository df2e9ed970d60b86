// src/application/commands/list_commands.rs
//
// List Command Handlers
//
// RULES:
// - Accept DTOs
// - Call the list service
// - Return the host contract, never an Err
// - Never contain business logic

use crate::application::dto::{ListRequestDto, ListResponse};
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::ListRequest;
use crate::services::ListService;

/// Load one page of a list from a host request
pub async fn load_list(state: &AppState, dto: ListRequestDto) -> ListResponse {
    match ListRequest::try_from(dto) {
        Ok(request) => run_list_request(&state.list_service, &request).await,
        Err(e) => ListResponse::Failure(ErrorResponse::from_app_error(e)),
    }
}

/// Run an already-typed request
pub async fn run_list_request(service: &ListService, request: &ListRequest) -> ListResponse {
    service
        .load_page(request)
        .await
        .map(|page| page.items)
        .into()
}
