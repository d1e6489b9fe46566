use axum::http::HeaderMap;

use symbi::RequestContext;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const TENANT_ID_HEADER: &str = "x-tenant-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Caller identity as forwarded by the upstream auth gate. Missing or blank headers fall back
/// to the anonymous defaults.
pub fn request_context(headers: &HeaderMap) -> RequestContext {
    let defaults = RequestContext::default();
    RequestContext {
        user_id: header_or(headers, USER_ID_HEADER, defaults.user_id),
        tenant_id: header_or(headers, TENANT_ID_HEADER, defaults.tenant_id),
        role: header_or(headers, USER_ROLE_HEADER, defaults.role),
    }
}

fn header_or(headers: &HeaderMap, name: &str, default: String) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or(default)
}
