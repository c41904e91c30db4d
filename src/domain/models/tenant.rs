use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub subdomain: String,
    pub custom_domain: Option<String>,
    pub logo_url: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub robots_txt: Option<String>,
    #[serde(skip_serializing)]
    pub api_token: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    pub fn new(name: String, subdomain: String) -> Self {
        let api_token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(40)
            .map(char::from)
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            subdomain,
            custom_domain: None,
            logo_url: None,
            phone: None,
            email: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            robots_txt: None,
            api_token,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Public base URL of this tenant's site: the custom domain when one is
    /// configured, otherwise a subdomain of the platform domain.
    pub fn site_url(&self, base_domain: &str) -> String {
        match &self.custom_domain {
            Some(domain) if !domain.is_empty() => {
                if domain.starts_with("http://") || domain.starts_with("https://") {
                    domain.trim_end_matches('/').to_string()
                } else {
                    format!("https://{}", domain.trim_end_matches('/'))
                }
            }
            _ => format!("https://{}.{}", self.subdomain, base_domain),
        }
    }

    pub fn robots_txt_body(&self) -> String {
        match &self.robots_txt {
            Some(body) if !body.is_empty() => body.clone(),
            _ => "User-agent: *\nAllow: /\n".to_string(),
        }
    }
}
