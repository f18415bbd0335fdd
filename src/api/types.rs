use crate::models::{Agent, Amenities, Location, Property};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope every backend response is wrapped in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub success: Option<bool>,
    pub message: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneRef {
    #[serde(rename = "ID_zona")]
    pub id: i64,
    #[serde(rename = "zona")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyTypeRef {
    #[serde(rename = "ID_tipoinmueble")]
    pub id: i64,
    #[serde(rename = "inmueble")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusRef {
    #[serde(rename = "ID_estadopropiedad")]
    pub id: i64,
    #[serde(rename = "estado_propiedad")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomTypeRef {
    #[serde(rename = "ID_ambiente")]
    pub id: i64,
    #[serde(rename = "ambientes")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PetRef {
    #[serde(rename = "ID_Mascota")]
    pub id: i64,
    #[serde(rename = "Mascota")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentRef {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "matricula")]
    pub license: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRef {
    #[serde(rename = "ID_imagen")]
    pub id: i64,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "estado")]
    pub active: bool,
}

/// A property exactly as the backend returns it, with every foreign key
/// kept next to its display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyRecord {
    #[serde(rename = "ID_propiedades")]
    pub id: i64,
    #[serde(rename = "direccion")]
    pub address: String,
    /// Decimal text, e.g. "150000.00"
    #[serde(rename = "precio")]
    pub price: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "latitud", default)]
    pub latitude: String,
    #[serde(rename = "longitud", default)]
    pub longitude: String,
    #[serde(rename = "estado", default)]
    pub active: bool,
    #[serde(rename = "ID_zona")]
    pub zone_id: i64,
    #[serde(rename = "ID_tipoinmueble")]
    pub property_type_id: i64,
    #[serde(rename = "ID_estadopropiedad")]
    pub status_id: i64,
    #[serde(rename = "ID_ambiente")]
    pub room_type_id: i64,
    #[serde(default)]
    pub garage: bool,
    #[serde(rename = "balcon", default)]
    pub balcony: bool,
    #[serde(default)]
    pub patio: bool,
    #[serde(rename = "acepta_mascota", default)]
    pub accepts_pets: bool,
    #[serde(rename = "ID_Mascota", default)]
    pub pet_id: Option<i64>,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: String,
    #[serde(rename = "agenteinmobiliario", default)]
    pub agent: Option<AgentRef>,
    #[serde(rename = "zona")]
    pub zone: ZoneRef,
    #[serde(rename = "tipoinmueble")]
    pub property_type: PropertyTypeRef,
    #[serde(rename = "estadopropiedad")]
    pub status: StatusRef,
    #[serde(rename = "ambientes")]
    pub room_type: RoomTypeRef,
    #[serde(rename = "Mascota", default)]
    pub pet: Option<PetRef>,
    #[serde(rename = "imagenes", default)]
    pub images: Option<Vec<ImageRef>>,
}

impl PropertyRecord {
    /// Price parsed from the decimal text, truncated and clamped at zero
    pub fn parsed_price(&self) -> i64 {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .map(|p| p.max(0.0) as i64)
            .unwrap_or(0)
    }
}

/// Room count is the first digit of the room-type label ("3 ambientes").
fn rooms_from_label(label: &str) -> u32 {
    label
        .chars()
        .find_map(|c| c.to_digit(10))
        .unwrap_or(1)
}

fn parse_coordinate(text: &str) -> f64 {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

impl From<PropertyRecord> for Property {
    fn from(record: PropertyRecord) -> Self {
        let price = record.parsed_price();
        let listed_at = DateTime::parse_from_rfc3339(&record.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
        let images = record
            .images
            .unwrap_or_default()
            .into_iter()
            .filter(|img| img.active)
            .map(|img| img.url)
            .collect();
        let agent = match record.agent {
            Some(agent) => Agent {
                name: agent.name,
                license: agent.license,
            },
            None => Agent {
                name: "No agent".to_string(),
                license: "No license".to_string(),
            },
        };

        Property {
            id: record.id,
            property_type: record.property_type.name,
            price,
            address: record.address,
            rooms: rooms_from_label(&record.room_type.name),
            bathrooms: 1,
            floors: 1,
            images,
            accepts_pets: record.accepts_pets,
            pet_type: record
                .pet
                .map(|p| p.name)
                .unwrap_or_else(|| "No pets accepted".to_string()),
            location: Location {
                zone: record.zone.name,
                latitude: parse_coordinate(&record.latitude),
                longitude: parse_coordinate(&record.longitude),
            },
            description: record.description,
            operation: record.status.name,
            amenities: Amenities {
                garage: record.garage,
                balcony: record.balcony,
                patio: record.patio,
            },
            agent,
            listed_at,
        }
    }
}

/// Query parameters for the filter endpoint.
///
/// Every `None` is left out of the query string entirely; the backend reads
/// a missing parameter as "don't filter" and `false` as "must be false".
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FilterQuery {
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(rename = "precio_desde", skip_serializing_if = "Option::is_none")]
    pub price_min: Option<i64>,
    #[serde(rename = "precio_hasta", skip_serializing_if = "Option::is_none")]
    pub price_max: Option<i64>,
    #[serde(rename = "ID_zona", skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<i64>,
    #[serde(rename = "ID_tipoinmueble", skip_serializing_if = "Option::is_none")]
    pub property_type_id: Option<i64>,
    #[serde(rename = "ID_ambiente", skip_serializing_if = "Option::is_none")]
    pub room_type_id: Option<i64>,
    #[serde(rename = "ID_estadopropiedad", skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garage: Option<bool>,
    #[serde(rename = "balcon", skip_serializing_if = "Option::is_none")]
    pub balcony: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patio: Option<bool>,
    #[serde(rename = "acepta_mascota", skip_serializing_if = "Option::is_none")]
    pub accepts_pets: Option<bool>,
}

/// Contact inquiry about a single property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactRequest {
    #[serde(rename = "nombre_cliente")]
    pub name: String,
    pub email: String,
    #[serde(rename = "Mensaje", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "ID_propiedades")]
    pub property_id: i64,
    #[serde(rename = "quiere_visitar")]
    pub wants_visit: bool,
    #[serde(rename = "quiere_mas_info")]
    pub wants_info: bool,
    #[serde(rename = "estado")]
    active: bool,
    #[serde(rename = "ID_estadoconsulta")]
    inquiry_status_id: i64,
}

impl ContactRequest {
    pub fn new(name: impl Into<String>, email: impl Into<String>, property_id: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: None,
            phone: None,
            property_id,
            wants_visit: false,
            wants_info: false,
            active: true,
            inquiry_status_id: 1,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn wants_visit(mut self, wants_visit: bool) -> Self {
        self.wants_visit = wants_visit;
        self
    }

    pub fn wants_info(mut self, wants_info: bool) -> Self {
        self.wants_info = wants_info;
        self
    }
}
