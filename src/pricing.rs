use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::external_api::site_api::models::record_id::RecordId;
use crate::external_api::ApiError;
use crate::store::Resource;

/// One of the six fixed web plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanKey {
    LandingPage,
    BasicSite,
    InteractiveFormSite,
    CustomBrandingSite,
    BasicEcommerce,
    CorporateSite,
}

impl PlanKey {
    pub const ALL: [PlanKey; 6] = [
        PlanKey::LandingPage,
        PlanKey::BasicSite,
        PlanKey::InteractiveFormSite,
        PlanKey::CustomBrandingSite,
        PlanKey::BasicEcommerce,
        PlanKey::CorporateSite,
    ];

    /// Key used by the pricing endpoints
    pub fn wire_key(self) -> &'static str {
        match self {
            PlanKey::LandingPage => "landingPage",
            PlanKey::BasicSite => "basicSite",
            PlanKey::InteractiveFormSite => "interactiveFormSite",
            PlanKey::CustomBrandingSite => "customBrandingSite",
            PlanKey::BasicEcommerce => "basicEcommerce",
            PlanKey::CorporateSite => "corporateSite",
        }
    }

    pub fn default_price(self) -> f64 {
        match self {
            PlanKey::LandingPage => 3100.0,
            PlanKey::BasicSite => 5200.0,
            PlanKey::InteractiveFormSite => 6800.0,
            PlanKey::CustomBrandingSite => 8400.0,
            PlanKey::BasicEcommerce => 11500.0,
            PlanKey::CorporateSite => 13000.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlanKey::LandingPage => "Landing Page Básica",
            PlanKey::BasicSite => "Sitio Informativo Básico",
            PlanKey::InteractiveFormSite => "Sitio con Formulario Interactivo",
            PlanKey::CustomBrandingSite => "Sitio con Branding Personalizado",
            PlanKey::BasicEcommerce => "E-commerce Básico",
            PlanKey::CorporateSite => "Sitio Corporativo con Correos",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PlanKey::LandingPage => "Perfecta para una presencia rápida y profesional.",
            PlanKey::BasicSite => "Ideal para presentar tu negocio con más detalle.",
            PlanKey::InteractiveFormSite => "Perfecto para captar clientes o solicitudes.",
            PlanKey::CustomBrandingSite => "Tu marca desde cero, bien presentada.",
            PlanKey::BasicEcommerce => "Ideal para vender productos o servicios en línea.",
            PlanKey::CorporateSite => "Para empresas, escuelas o equipos grandes.",
        }
    }

    /// Plans highlighted on the public page
    pub fn is_popular(self) -> bool {
        matches!(self, PlanKey::BasicSite | PlanKey::BasicEcommerce)
    }
}

fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

/// Prices in MXN for every plan. All six keys are always present.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct PricingTable {
    pub landing_page: f64,
    pub basic_site: f64,
    pub interactive_form_site: f64,
    pub custom_branding_site: f64,
    pub basic_ecommerce: f64,
    pub corporate_site: f64,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            landing_page: PlanKey::LandingPage.default_price(),
            basic_site: PlanKey::BasicSite.default_price(),
            interactive_form_site: PlanKey::InteractiveFormSite.default_price(),
            custom_branding_site: PlanKey::CustomBrandingSite.default_price(),
            basic_ecommerce: PlanKey::BasicEcommerce.default_price(),
            corporate_site: PlanKey::CorporateSite.default_price(),
        }
    }
}

impl PricingTable {
    pub fn get(&self, key: PlanKey) -> f64 {
        match key {
            PlanKey::LandingPage => self.landing_page,
            PlanKey::BasicSite => self.basic_site,
            PlanKey::InteractiveFormSite => self.interactive_form_site,
            PlanKey::CustomBrandingSite => self.custom_branding_site,
            PlanKey::BasicEcommerce => self.basic_ecommerce,
            PlanKey::CorporateSite => self.corporate_site,
        }
    }

    pub fn set(&mut self, key: PlanKey, price: f64) -> Result<(), ApiError> {
        if !is_valid_price(price) {
            return Err(ApiError::InvalidPrice(price.to_string()));
        }
        self.set_unchecked(key, price);
        Ok(())
    }

    fn set_unchecked(&mut self, key: PlanKey, price: f64) {
        let slot = match key {
            PlanKey::LandingPage => &mut self.landing_page,
            PlanKey::BasicSite => &mut self.basic_site,
            PlanKey::InteractiveFormSite => &mut self.interactive_form_site,
            PlanKey::CustomBrandingSite => &mut self.custom_branding_site,
            PlanKey::BasicEcommerce => &mut self.basic_ecommerce,
            PlanKey::CorporateSite => &mut self.corporate_site,
        };
        *slot = price;
    }

    /// `None` when the backend has no stored row (`{}`, or `[]` from PHP).
    pub fn from_stored(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) if !map.is_empty() => Some(Self::from(value.clone())),
            _ => None,
        }
    }
}

/// Database rows come back as strings ("3100.00"). Missing, negative or
/// unreadable prices fall back to that plan's default.
impl From<Value> for PricingTable {
    fn from(value: Value) -> Self {
        let mut table = PricingTable::default();
        for key in PlanKey::ALL {
            let price = match value.get(key.wire_key()) {
                Some(Value::Number(number)) => number.as_f64(),
                Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
                _ => None,
            };
            // out-of-range values keep the default
            if let Some(price) = price.filter(|price| is_valid_price(*price)) {
                table.set_unchecked(key, price);
            }
        }
        table
    }
}

impl Resource for PricingTable {
    const NAME: &'static str = "pricing";
    const STORAGE_KEY: &'static str = "servicePricing";
    const SINGLETON: bool = true;

    fn id(&self) -> Option<&RecordId> {
        None
    }

    fn set_id(&mut self, _id: RecordId) {}

    fn seed() -> Vec<Self> {
        vec![PricingTable::default()]
    }
}
