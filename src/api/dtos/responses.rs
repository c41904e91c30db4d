use serde::Serialize;

#[derive(Serialize)]
pub struct TenantCreatedResponse {
    pub tenant_id: String,
    pub subdomain: String,
    pub api_token: String,
}

#[derive(Serialize)]
pub struct CanonicalRedirectResponse {
    pub canonical_url: String,
    pub status_code: u16,
}
