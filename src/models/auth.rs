// src/models/auth.rs

use serde::{Deserialize, Deserializer, Serialize};

// Claims as they travel inside the token. Tokens are issued elsewhere; this
// service only reads them.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(deserialize_with = "number_as_i64")]
    pub aid: i64, // Tenant (mservice) id
    #[serde(default)]
    pub invsvc: Option<String>, // Inventory permission tier
    pub exp: i64, // Expiration time
    #[serde(default)]
    pub sub: Option<String>,
}

// Issuers may encode integers as JSON floats.
fn number_as_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value as i64)
}

/// Ordered permission levels: admin implies read-write implies read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    ReadOnly,
    ReadWrite,
    Admin,
}

impl Tier {
    pub fn from_claim(value: &str) -> Option<Tier> {
        match value {
            "invadmin" => Some(Tier::Admin),
            "invrw" => Some(Tier::ReadWrite),
            "invro" => Some(Tier::ReadOnly),
            _ => None,
        }
    }

    pub fn claim(&self) -> &'static str {
        match self {
            Tier::Admin => "invadmin",
            Tier::ReadWrite => "invrw",
            Tier::ReadOnly => "invro",
        }
    }
}

/// Verified claims, typed once at verification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    pub tenant_id: i64,
    // `None` when the tier claim is missing or unknown: authorizes nothing.
    pub tier: Option<Tier>,
    pub subject: Option<String>,
}

impl From<Claims> for AccessClaims {
    fn from(claims: Claims) -> Self {
        Self {
            tenant_id: claims.aid,
            tier: claims.invsvc.as_deref().and_then(Tier::from_claim),
            subject: claims.sub,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered() {
        assert!(Tier::Admin > Tier::ReadWrite);
        assert!(Tier::ReadWrite > Tier::ReadOnly);
    }

    #[test]
    fn unknown_tier_claim_maps_to_none() {
        let claims: Claims =
            serde_json::from_str(r#"{"aid": 12.0, "invsvc": "superuser", "exp": 1}"#).unwrap();
        let typed = AccessClaims::from(claims);
        assert_eq!(typed.tenant_id, 12);
        assert_eq!(typed.tier, None);
    }

    #[test]
    fn claim_round_trip() {
        for tier in [Tier::Admin, Tier::ReadWrite, Tier::ReadOnly] {
            assert_eq!(Tier::from_claim(tier.claim()), Some(tier));
        }
    }
}
